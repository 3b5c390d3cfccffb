//! Geocode resolver: one address in, exactly one outcome out.
//!
//! Flow:  Idle → Pending (one collaborator lookup) → Resolved | Failed
//!
//! The collaborator runs on tokio's blocking pool, so awaiting it is the
//! only suspend point. No retry, no cancellation, no shared state.

use super::providers::Geocoder;
use super::types::{GeocodeCandidate, GeocodeError, GeocodeOutcome, LatLng};
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct GeocodeResolver {
    geocoder: Arc<dyn Geocoder>,
    timeout: Option<Duration>,
}

impl GeocodeResolver {
    pub fn new(geocoder: Arc<dyn Geocoder>) -> Self {
        Self {
            geocoder,
            timeout: None,
        }
    }

    /// Bound each resolution; expiry is reported as a network failure.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub async fn resolve(&self, address: &str) -> GeocodeOutcome {
        let result = self.lookup(address).await;
        match &result {
            Ok(at) => tracing::info!(address, %at, "geocode resolved"),
            Err(e) => tracing::warn!(address, error = %e, "geocode failed"),
        }
        result.into()
    }

    async fn lookup(&self, address: &str) -> Result<LatLng, GeocodeError> {
        let geocoder = Arc::clone(&self.geocoder);
        let owned = address.to_string();
        let task = tokio::task::spawn_blocking(move || geocoder.geocode(&owned));

        let joined = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, task)
                .await
                .map_err(|_| GeocodeError::Network(format!("timed out after {:?}", limit)))?,
            None => task.await,
        };
        let candidates =
            joined.map_err(|e| GeocodeError::Network(format!("lookup aborted: {}", e)))??;

        first_lat_lng(&candidates)
    }
}

/// Coordinates of the first candidate; zero candidates is `NoResults`.
pub fn first_lat_lng(candidates: &[GeocodeCandidate]) -> Result<LatLng, GeocodeError> {
    candidates
        .first()
        .map(|c| c.location)
        .ok_or(GeocodeError::NoResults)
}
