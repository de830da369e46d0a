// src/handlers/health.rs

use axum::Json;

use crate::models::api::HealthResponse;

// GET /api/health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
    })
}
