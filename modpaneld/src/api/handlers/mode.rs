//! Mode handlers for reading and updating the module mode

use crate::api::error::ApiError;
use crate::api::AppState;

use axum::{extract::State, Json};
use modpanel_core::api::{ModeResponse, ModeUpdateRequest, ModeUpdateResponse};
use tracing::{debug, info};

/// Retrieve the current mode.
///
/// Reports `unknown` when the config file is missing, unreadable, has no
/// `mode=` line, or holds an unrecognised value.
///
/// # Endpoint
///
/// `GET /api/mode`
pub(crate) async fn get_mode(
    State(state): State<AppState>,
) -> Result<Json<ModeResponse>, ApiError> {
    debug!("Request: GET /api/mode");

    let mode = state.mode_store.status().await;

    Ok(Json(ModeResponse {
        mode,
        config_path: state.mode_store.path().display().to_string(),
    }))
}

/// Update the mode.
///
/// The requested value is trimmed and lowercased before validation, so
/// `" OTOMATIS "` is accepted.
///
/// # Endpoint
///
/// `POST /api/mode` with body `{"mode": "<otomatis|statis>"}`
///
/// # Errors
///
/// - 400 if the value is not `otomatis` or `statis`; the file is not touched
/// - 500 if the config file could not be written
pub(crate) async fn set_mode(
    State(state): State<AppState>,
    Json(request): Json<ModeUpdateRequest>,
) -> Result<Json<ModeUpdateResponse>, ApiError> {
    debug!("Request: POST /api/mode ({:?})", request.mode);

    let candidate = request.mode.trim().to_lowercase();
    let mode = state.mode_store.write_mode(&candidate).await?;

    info!("Mode updated to {}", mode);
    Ok(Json(ModeUpdateResponse {
        ok: true,
        mode: mode.to_string(),
    }))
}
