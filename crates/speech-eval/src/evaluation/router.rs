use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::warn;

use super::service::TranscriptEvaluator;

/// Body of `POST /api/evaluate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptRequest {
    pub transcript: String,
}

/// Router builder exposing transcript evaluation and the service health probe.
pub fn evaluation_router(evaluator: Arc<TranscriptEvaluator>) -> Router {
    Router::new()
        .route("/api/evaluate", post(evaluate_handler))
        .route("/api/health", get(health_handler))
        .with_state(evaluator)
}

pub(crate) async fn evaluate_handler(
    State(evaluator): State<Arc<TranscriptEvaluator>>,
    Json(request): Json<TranscriptRequest>,
) -> Response {
    match evaluator.evaluate(&request.transcript) {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(error) => {
            warn!(%error, "evaluation rejected");
            let payload = json!({
                "detail": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn health_handler(
    State(evaluator): State<Arc<TranscriptEvaluator>>,
) -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "models_loaded": evaluator.models_loaded(),
    }))
}
