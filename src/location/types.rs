//! Core types for the places subsystem.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Two-line display form of a place, e.g. "Apple" / "Cupertino".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayText {
    pub primary: String,
    #[serde(default)]
    pub secondary: String,
}

impl DisplayText {
    pub fn new(primary: impl Into<String>, secondary: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
            secondary: secondary.into(),
        }
    }

    /// Split a comma-separated address into its first component and the rest.
    pub fn from_address(address: &str) -> Self {
        let mut parts = address.split(',').map(str::trim);
        let primary = parts.next().unwrap_or("").to_string();
        let secondary = parts.filter(|p| !p.is_empty()).collect::<Vec<_>>().join(", ");
        Self { primary, secondary }
    }
}

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

impl LatLng {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

impl fmt::Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.latitude, self.longitude)
    }
}

/// A curated place that is surfaced above organic results when it matches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreferredLocation {
    pub text: String,
    pub place_id: String,
    pub display: DisplayText,
    /// Known position, used by the offline geocoder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<LatLng>,
}

/// A single selectable address/place candidate.
///
/// Only the ranker can produce a preferred suggestion; everything built
/// through [`Suggestion::new`] is organic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
    text: String,
    place_id: String,
    display: DisplayText,
    preferred: bool,
}

impl Suggestion {
    pub fn new(text: impl Into<String>, place_id: impl Into<String>, display: DisplayText) -> Self {
        Self {
            text: text.into(),
            place_id: place_id.into(),
            display,
            preferred: false,
        }
    }

    pub(crate) fn from_preferred(location: &PreferredLocation) -> Self {
        Self {
            text: location.text.clone(),
            place_id: location.place_id.clone(),
            display: location.display.clone(),
            preferred: true,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn place_id(&self) -> &str {
        &self.place_id
    }

    pub fn display(&self) -> &DisplayText {
        &self.display
    }

    pub fn is_preferred(&self) -> bool {
        self.preferred
    }
}

/// One match returned by a geocoding collaborator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeocodeCandidate {
    pub formatted_address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place_id: Option<String>,
    pub location: LatLng,
}

/// Result of one geocode resolution. Exactly one is produced per request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GeocodeOutcome {
    Success { latitude: f64, longitude: f64 },
    Failure { message: String },
}

impl GeocodeOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

impl From<Result<LatLng, GeocodeError>> for GeocodeOutcome {
    fn from(result: Result<LatLng, GeocodeError>) -> Self {
        match result {
            Ok(LatLng { latitude, longitude }) => Self::Success { latitude, longitude },
            Err(e) => Self::Failure { message: e.to_string() },
        }
    }
}

/// Errors surfaced by geocoding and autocomplete collaborators.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeocodeError {
    #[error("network error: {0}")]
    Network(String),
    #[error("no results")]
    NoResults,
    #[error("invalid address: {0}")]
    InvalidAddress(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
