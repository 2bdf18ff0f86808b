use axum::http::HeaderValue;
use chrono::{DateTime, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use speech_eval::config::ServerConfig;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::warn;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) started_at: DateTime<Utc>,
}

/// CORS policy for the configured origins. A `*` entry opens the API to any origin.
pub(crate) fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if server.allows_any_origin() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = server
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(%origin, error = %err, "ignoring unusable CORS origin");
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(origins))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request};
    use axum::routing::get;
    use axum::Router;
    use tower::ServiceExt;

    fn server(origins: &[&str]) -> ServerConfig {
        ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8000,
            allowed_origins: origins.iter().map(|origin| origin.to_string()).collect(),
        }
    }

    async fn allow_origin_header(server: &ServerConfig, origin: &str) -> Option<String> {
        let app = Router::new()
            .route("/", get(|| async { "ok" }))
            .layer(cors_layer(server));
        let request = Request::builder()
            .uri("/")
            .header(header::ORIGIN, origin)
            .body(Body::empty())
            .expect("request");

        let response = app.oneshot(request).await.expect("router response");
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    }

    #[tokio::test]
    async fn listed_origins_are_echoed() {
        let server = server(&["http://localhost:3000", "http://localhost:5173"]);

        assert_eq!(
            allow_origin_header(&server, "http://localhost:5173").await,
            Some("http://localhost:5173".to_string())
        );
        assert_eq!(
            allow_origin_header(&server, "http://evil.example").await,
            None
        );
    }

    #[tokio::test]
    async fn wildcard_allows_any_origin() {
        let server = server(&["*"]);

        assert_eq!(
            allow_origin_header(&server, "http://anywhere.example").await,
            Some("*".to_string())
        );
    }
}
