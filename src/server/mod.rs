mod handlers;
mod state;

use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::location::{Autocomplete, GeocodeResolver, SuggestionRanker};

pub use state::AppState;

pub fn build_router(
    ranker: SuggestionRanker,
    autocomplete: Option<Arc<dyn Autocomplete>>,
    resolver: GeocodeResolver,
) -> Router {
    let state = Arc::new(AppState {
        ranker,
        autocomplete,
        resolver,
    });

    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/suggest", get(handlers::suggest))
        .route("/api/geocode", get(handlers::geocode))
        .route("/api/preferred", get(handlers::preferred_list))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn start(host: &str, port: u16, app: Router) -> std::io::Result<()> {
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("places server listening on http://{}", addr);
    eprintln!("  Places server listening on http://{}", addr);
    eprintln!("  Press Ctrl+C to stop.");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("cannot listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::preferred::default_preferred;
    use crate::location::{BuiltinGeocoder, DisplayText, GeocodeError, Suggestion};
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    struct FixedAutocomplete(Result<Vec<Suggestion>, GeocodeError>);

    impl Autocomplete for FixedAutocomplete {
        fn suggest(&self, _query: &str) -> Result<Vec<Suggestion>, GeocodeError> {
            self.0.clone()
        }
    }

    fn app(autocomplete: Option<Arc<dyn Autocomplete>>) -> Router {
        let preferred: Arc<[_]> = default_preferred().into();
        let resolver = GeocodeResolver::new(Arc::new(BuiltinGeocoder::new(preferred.clone())));
        build_router(SuggestionRanker::new(preferred), autocomplete, resolver)
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = get_json(app(None), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_suggest_preferred_first() {
        let organic = Suggestion::new(
            "Cupertino, California, United States",
            "1",
            DisplayText::from_address("Cupertino, California, United States"),
        );
        let source: Arc<dyn Autocomplete> = Arc::new(FixedAutocomplete(Ok(vec![organic])));

        let (status, body) = get_json(app(Some(source)), "/api/suggest?query=cupertino").await;
        assert_eq!(status, StatusCode::OK);
        let list = body["suggestions"].as_array().unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0]["preferred"], true);
        assert_eq!(list[0]["display"]["primary"], "Apple");
        assert_eq!(list[1]["preferred"], false);
    }

    #[tokio::test]
    async fn test_suggest_autocomplete_error_keeps_preferred() {
        let source: Arc<dyn Autocomplete> =
            Arc::new(FixedAutocomplete(Err(GeocodeError::Network("down".into()))));
        let (status, body) = get_json(app(Some(source)), "/api/suggest?query=menlo").await;
        assert_eq!(status, StatusCode::OK);
        let list = body["suggestions"].as_array().unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0]["display"]["primary"], "Facebook");
    }

    #[tokio::test]
    async fn test_geocode_success_and_failure() {
        let (status, body) = get_json(app(None), "/api/geocode?address=Apple").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "success");

        let (status, body) = get_json(app(None), "/api/geocode?address=asdkjasdkj").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "failure");
        assert_eq!(body["message"], "no results");
    }

    #[tokio::test]
    async fn test_geocode_missing_address() {
        let (status, body) = get_json(app(None), "/api/geocode").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], 400);
    }

    #[tokio::test]
    async fn test_preferred_list() {
        let (_, body) = get_json(app(None), "/api/preferred").await;
        assert_eq!(body.as_array().unwrap().len(), 2);
    }
}
