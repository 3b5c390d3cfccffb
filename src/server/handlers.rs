use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

use crate::location::providers::suggest_async;
use crate::location::{GeocodeOutcome, PreferredLocation, Suggestion};

use super::state::AppState;

// ─── Error response ──────────────────────────────────────────────

#[derive(Serialize)]
struct ApiErrorBody {
    error: String,
    code: u16,
}

pub(super) struct ApiError(StatusCode, String);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiErrorBody {
            error: self.1,
            code: self.0.as_u16(),
        };
        (self.0, Json(body)).into_response()
    }
}

fn api_error(status: StatusCode, msg: impl Into<String>) -> ApiError {
    ApiError(status, msg.into())
}

// ─── GET /health ─────────────────────────────────────────────────

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

// ─── GET /api/suggest ────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SuggestQuery {
    pub query: Option<String>,
}

#[derive(Serialize)]
pub struct SuggestResponse {
    pub query: String,
    pub suggestions: Vec<Suggestion>,
}

pub async fn suggest(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SuggestQuery>,
) -> Json<SuggestResponse> {
    let start = Instant::now();
    let query = params.query.unwrap_or_default();

    let external = match &state.autocomplete {
        Some(source) if !query.trim().is_empty() => {
            suggest_async(Arc::clone(source), &query).await.unwrap_or_else(|e| {
                tracing::warn!(query = %query, error = %e, "autocomplete failed");
                Vec::new()
            })
        }
        _ => Vec::new(),
    };

    let suggestions = state.ranker.rank(&query, external);
    tracing::info!(
        query = %query,
        count = suggestions.len(),
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "GET /api/suggest"
    );

    Json(SuggestResponse { query, suggestions })
}

// ─── GET /api/geocode ────────────────────────────────────────────

#[derive(Deserialize)]
pub struct GeocodeQuery {
    pub address: Option<String>,
}

pub async fn geocode(
    State(state): State<Arc<AppState>>,
    Query(params): Query<GeocodeQuery>,
) -> Result<Json<GeocodeOutcome>, Response> {
    let address = params.address.as_deref().unwrap_or("").trim();
    if address.is_empty() {
        return Err(
            api_error(StatusCode::BAD_REQUEST, "Missing 'address' parameter").into_response(),
        );
    }

    Ok(Json(state.resolver.resolve(address).await))
}

// ─── GET /api/preferred ──────────────────────────────────────────

pub async fn preferred_list(State(state): State<Arc<AppState>>) -> Json<Vec<PreferredLocation>> {
    Json(state.ranker.preferred().to_vec())
}
