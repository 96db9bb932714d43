pub mod appointments;
pub mod services;

use crate::types::HealthResponse;
use axum::Json;

/// GET /health -> readiness probe.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}
