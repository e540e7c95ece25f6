use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;

use crate::infrastructure::repositories::EntityRepository;

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// Ready once the audio backend answers a template listing
pub async fn health_ready(
    State(entity_repo): State<Arc<dyn EntityRepository>>,
) -> impl IntoResponse {
    match entity_repo.list_templates().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "ready",
                "audio_backend": "connected"
            })),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "Audio backend readiness probe failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "not_ready",
                    "audio_backend": "unreachable"
                })),
            )
        }
    }
}
