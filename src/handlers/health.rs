use axum::Json;

use crate::models::StatusResponse;

/// `GET /healthz`
pub async fn health() -> Json<StatusResponse> {
    Json(StatusResponse::ok())
}
