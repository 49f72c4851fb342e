use axum::Json;
use tracing::{debug, instrument};

use crate::entities::HealthStatusResponse;

/// Liveness probe
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "API is serving requests", body = HealthStatusResponse)
    ),
    tag = "health"
)]
#[instrument]
pub async fn health_check() -> Json<HealthStatusResponse> {
    debug!("Health check requested");
    Json(HealthStatusResponse::ok())
}
