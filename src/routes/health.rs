use axum::extract::State;
use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use crate::data::store::FixtureStore;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status ("ok" when healthy, "degraded" when the fixture
    /// directory is unreachable)
    pub status: String,
    /// API version
    pub version: String,
    /// Whether the fixture data directory is readable
    pub data_dir: bool,
}

/// Health check endpoint.
///
/// Returns the API status and version. Verifies that the fixture data
/// directory exists. Returns status "degraded" (still 200) when it does
/// not, so load balancers can distinguish partial failures.
#[utoipa::path(
    get,
    path = "/api/v1/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    )
)]
pub async fn health_check(State(store): State<FixtureStore>) -> Json<HealthResponse> {
    let data_ok = store.is_reachable();

    Json(HealthResponse {
        status: if data_ok {
            "ok".to_string()
        } else {
            "degraded".to_string()
        },
        version: env!("CARGO_PKG_VERSION").to_string(),
        data_dir: data_ok,
    })
}
