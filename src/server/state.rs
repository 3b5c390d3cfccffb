use crate::location::{Autocomplete, GeocodeResolver, SuggestionRanker};
use std::sync::Arc;

pub struct AppState {
    pub ranker: SuggestionRanker,
    /// Organic suggestion source; `None` in offline mode.
    pub autocomplete: Option<Arc<dyn Autocomplete>>,
    pub resolver: GeocodeResolver,
}
