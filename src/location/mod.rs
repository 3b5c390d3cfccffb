//! Places subsystem: preferred-first suggestion ranking and address
//! geocoding.
//!
//! Provides the ranker, the async geocode resolver, the Nominatim and
//! built-in providers behind them, and the search-session state model.

pub mod preferred;
pub mod providers;
pub mod ranker;
pub mod resolver;
pub mod session;
pub mod types;

pub use preferred::ConfigError;
pub use providers::{Autocomplete, BuiltinGeocoder, Geocoder, NominatimClient, NominatimOptions};
pub use ranker::SuggestionRanker;
pub use resolver::{first_lat_lng, GeocodeResolver};
pub use session::SearchSession;
pub use types::{
    DisplayText, GeocodeCandidate, GeocodeError, GeocodeOutcome, LatLng, PreferredLocation,
    Suggestion,
};
