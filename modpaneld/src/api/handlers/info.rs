//! Static endpoints: root greeting, about descriptor, health check

use crate::api::error::ApiError;
use crate::api::AppState;

use axum::{extract::State, Json};
use modpanel_core::api::{AboutResponse, HealthResponse, RootResponse};
use tracing::debug;

/// Handle the root endpoint.
///
/// # Endpoint
///
/// `GET /`
pub(crate) async fn root() -> Result<Json<RootResponse>, ApiError> {
    debug!("Request: GET /");

    Ok(Json(RootResponse {
        message: "WebUI Magisk Module Controller Backend".to_string(),
    }))
}

/// Describe the module and its developer.
///
/// All values come from settings resolved at startup, so this never touches
/// the host.
///
/// # Endpoint
///
/// `GET /api/about`
pub(crate) async fn about(
    State(state): State<AppState>,
) -> Result<Json<AboutResponse>, ApiError> {
    debug!("Request: GET /api/about");

    Ok(Json(AboutResponse::from(&state.settings.identity)))
}

/// Report that the backend is up.
///
/// Always answers "running"; it does not probe the host.
///
/// # Endpoint
///
/// `GET /test`
pub(crate) async fn health() -> Result<Json<HealthResponse>, ApiError> {
    debug!("Request: GET /test");

    Ok(Json(HealthResponse {
        backend: "✅ Running".to_string(),
    }))
}
