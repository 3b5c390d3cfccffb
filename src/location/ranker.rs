//! Preferred-first suggestion ranking.

use super::types::{PreferredLocation, Suggestion};
use std::sync::Arc;

/// Merges curated preferred locations ahead of organic suggestions.
#[derive(Debug, Clone)]
pub struct SuggestionRanker {
    preferred: Arc<[PreferredLocation]>,
}

impl SuggestionRanker {
    pub fn new(preferred: impl Into<Arc<[PreferredLocation]>>) -> Self {
        Self {
            preferred: preferred.into(),
        }
    }

    pub fn preferred(&self) -> &[PreferredLocation] {
        &self.preferred
    }

    /// Preferred locations whose text contains `query`, case-insensitively.
    ///
    /// An empty query matches every entry.
    pub fn preferred_matches(&self, query: &str) -> Vec<Suggestion> {
        let q = query.to_lowercase();
        self.preferred
            .iter()
            .filter(|loc| loc.text.to_lowercase().contains(&q))
            .map(Suggestion::from_preferred)
            .collect()
    }

    /// Preferred matches first, then `external` in its original order.
    pub fn rank(&self, query: &str, external: Vec<Suggestion>) -> Vec<Suggestion> {
        let mut ranked = self.preferred_matches(query);
        ranked.extend(external);
        ranked
    }
}
