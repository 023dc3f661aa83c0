use axum::Json;

use crate::models::HealthResponse;

pub async fn healthz() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
