//! Search-box state: the address being edited, whether a lookup is in
//! flight, and the last outcome to show.

use super::resolver::GeocodeResolver;
use super::types::GeocodeOutcome;

#[derive(Debug, Clone, Default)]
pub struct SearchSession {
    address: String,
    loading: bool,
    outcome: Option<GeocodeOutcome>,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn outcome(&self) -> Option<&GeocodeOutcome> {
        self.outcome.as_ref()
    }

    /// Input edited: any previous result no longer applies.
    ///
    /// Also clears `loading`, so a `select` future dropped mid-flight does
    /// not leave the session stuck.
    pub fn change(&mut self, address: impl Into<String>) {
        self.address = address.into();
        self.loading = false;
        self.outcome = None;
    }

    /// A suggestion was picked: resolve it and keep the outcome.
    ///
    /// If the returned future is dropped before completion, `loading` stays
    /// set until the next `change` or `select`.
    pub async fn select(
        &mut self,
        resolver: &GeocodeResolver,
        address: impl Into<String>,
    ) -> &GeocodeOutcome {
        self.address = address.into();
        self.loading = true;
        let outcome = resolver.resolve(&self.address).await;
        self.loading = false;
        self.outcome.insert(outcome)
    }

    /// One-line rendering of the current outcome, if any.
    pub fn status_line(&self) -> Option<String> {
        if self.loading {
            return None;
        }
        self.outcome.as_ref().map(|outcome| match outcome {
            GeocodeOutcome::Success { latitude, longitude } => format!(
                "Success! Geocoder found latitude and longitude: {}, {}",
                latitude, longitude
            ),
            GeocodeOutcome::Failure { message } => format!("Error! {}", message),
        })
    }
}
