//! Place providers: Nominatim and the offline built-in geocoder.

use super::types::{
    DisplayText, GeocodeCandidate, GeocodeError, LatLng, PreferredLocation, Suggestion,
};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

/// Address → coordinate candidates. Implementations may block.
pub trait Geocoder: Send + Sync {
    fn geocode(&self, address: &str) -> Result<Vec<GeocodeCandidate>, GeocodeError>;
}

/// Query → organic suggestions. Implementations may block.
pub trait Autocomplete: Send + Sync {
    fn suggest(&self, query: &str) -> Result<Vec<Suggestion>, GeocodeError>;
}

/// Run a blocking autocomplete source on tokio's blocking pool.
pub async fn suggest_async(
    source: Arc<dyn Autocomplete>,
    query: &str,
) -> Result<Vec<Suggestion>, GeocodeError> {
    let q = query.to_string();
    tokio::task::spawn_blocking(move || source.suggest(&q))
        .await
        .map_err(|e| GeocodeError::Network(format!("autocomplete aborted: {}", e)))?
}

// ─── Built-in geocoder ──────────────────────────────────────────

/// Offline geocoder over the preferred list (entries with coordinates only).
pub struct BuiltinGeocoder {
    entries: Arc<[PreferredLocation]>,
}

impl BuiltinGeocoder {
    pub fn new(entries: Arc<[PreferredLocation]>) -> Self {
        Self { entries }
    }

    fn located(&self) -> impl Iterator<Item = (&PreferredLocation, LatLng)> + '_ {
        self.entries
            .iter()
            .filter_map(|e| e.coordinates.map(|c| (e, c)))
    }
}

impl Geocoder for BuiltinGeocoder {
    fn geocode(&self, address: &str) -> Result<Vec<GeocodeCandidate>, GeocodeError> {
        let q = address.trim().to_lowercase();
        if q.is_empty() {
            return Err(GeocodeError::InvalidAddress("empty address".into()));
        }

        // Exact match first
        if let Some((entry, at)) = self.located().find(|(e, _)| e.text.to_lowercase() == q) {
            return Ok(vec![to_candidate(entry, at)]);
        }

        // Substring match
        let partial: Vec<GeocodeCandidate> = self
            .located()
            .filter(|(e, _)| e.text.to_lowercase().contains(&q))
            .map(|(e, at)| to_candidate(e, at))
            .collect();
        if !partial.is_empty() {
            return Ok(partial);
        }

        // Fuzzy match (edit distance <= 2)
        let best = self
            .located()
            .map(|(e, at)| (e, at, edit_distance(&q, &e.text.to_lowercase())))
            .filter(|(_, _, dist)| *dist <= 2)
            .min_by_key(|(_, _, dist)| *dist);

        Ok(best.map(|(e, at, _)| vec![to_candidate(e, at)]).unwrap_or_default())
    }
}

fn to_candidate(entry: &PreferredLocation, location: LatLng) -> GeocodeCandidate {
    GeocodeCandidate {
        formatted_address: entry.text.clone(),
        place_id: Some(entry.place_id.clone()),
        location,
    }
}

/// Compute edit distance between two strings (Levenshtein).
fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (m, n) = (a.len(), b.len());

    let mut prev = (0..=n).collect::<Vec<_>>();
    let mut curr = vec![0; n + 1];

    for i in 1..=m {
        curr[0] = i;
        for j in 1..=n {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[n]
}

// ─── Nominatim provider ─────────────────────────────────────────

pub const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";
const USER_AGENT: &str = concat!("places_autocomplete/", env!("CARGO_PKG_VERSION"));

#[derive(Deserialize, Debug, Clone)]
struct NominatimResult {
    lat: String,
    lon: String,
    display_name: String,
    #[serde(default)]
    place_id: Option<u64>,
}

/// Settings for [`NominatimClient`].
#[derive(Debug, Clone)]
pub struct NominatimOptions {
    pub base_url: String,
    /// ISO 3166-1 alpha-2 country filter (e.g. "US")
    pub country: Option<String>,
    pub limit: usize,
    pub timeout: Duration,
}

impl Default for NominatimOptions {
    fn default() -> Self {
        Self {
            base_url: NOMINATIM_URL.to_string(),
            country: None,
            limit: 5,
            timeout: Duration::from_secs(10),
        }
    }
}

/// Geocoding and autocomplete against an OpenStreetMap Nominatim server.
pub struct NominatimClient {
    agent: ureq::Agent,
    options: NominatimOptions,
}

impl NominatimClient {
    pub fn new(options: NominatimOptions) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(options.timeout)
            .user_agent(USER_AGENT)
            .build();
        Self { agent, options }
    }

    fn search(&self, query: &str) -> Result<Vec<NominatimResult>, GeocodeError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(GeocodeError::InvalidAddress("empty address".into()));
        }

        let url = format!("{}/search", self.options.base_url.trim_end_matches('/'));
        let mut request = self
            .agent
            .get(&url)
            .query("q", query)
            .query("format", "json")
            .query("limit", &self.options.limit.clamp(1, 50).to_string());
        if let Some(cc) = &self.options.country {
            request = request.query("countrycodes", &cc.to_lowercase());
        }

        tracing::debug!(%url, query, "nominatim search");
        let response = request.call().map_err(|e| match e {
            ureq::Error::Status(400, _) => GeocodeError::InvalidAddress(query.to_string()),
            other => GeocodeError::Network(other.to_string()),
        })?;

        response
            .into_json()
            .map_err(|e| GeocodeError::InvalidResponse(e.to_string()))
    }
}

impl Geocoder for NominatimClient {
    fn geocode(&self, address: &str) -> Result<Vec<GeocodeCandidate>, GeocodeError> {
        let results = self.search(address)?;
        if results.is_empty() {
            return Ok(Vec::new());
        }

        // Malformed entries are skipped; error only when none remain.
        let candidates: Vec<GeocodeCandidate> = results
            .iter()
            .filter_map(|r| match candidate_from_result(r) {
                Ok(c) => Some(c),
                Err(e) => {
                    tracing::warn!(
                        display_name = %r.display_name,
                        error = %e,
                        "skipping nominatim result"
                    );
                    None
                }
            })
            .collect();

        if candidates.is_empty() {
            return Err(GeocodeError::InvalidResponse(format!(
                "no usable coordinates in {} result(s)",
                results.len()
            )));
        }
        Ok(candidates)
    }
}

impl Autocomplete for NominatimClient {
    fn suggest(&self, query: &str) -> Result<Vec<Suggestion>, GeocodeError> {
        Ok(self.search(query)?.iter().map(suggestion_from_result).collect())
    }
}

fn candidate_from_result(r: &NominatimResult) -> Result<GeocodeCandidate, GeocodeError> {
    let latitude: f64 = r
        .lat
        .parse()
        .map_err(|_| GeocodeError::InvalidResponse(format!("bad latitude '{}'", r.lat)))?;
    let longitude: f64 = r
        .lon
        .parse()
        .map_err(|_| GeocodeError::InvalidResponse(format!("bad longitude '{}'", r.lon)))?;

    Ok(GeocodeCandidate {
        formatted_address: r.display_name.clone(),
        place_id: r.place_id.map(|id| id.to_string()),
        location: LatLng::new(latitude, longitude),
    })
}

fn suggestion_from_result(r: &NominatimResult) -> Suggestion {
    Suggestion::new(
        r.display_name.clone(),
        r.place_id.map(|id| id.to_string()).unwrap_or_default(),
        DisplayText::from_address(&r.display_name),
    )
}
