//! Device information handler

use crate::api::error::ApiError;
use crate::api::AppState;

use axum::{extract::State, Json};
use modpanel_core::api::DeviceResponse;
use tracing::debug;

/// Retrieve device information.
///
/// Every fact degrades to the "Tidak tersedia" placeholder on its own, so
/// this endpoint answers 200 even on a host with no `getprop`, no shell
/// access and no meminfo.
///
/// # Endpoint
///
/// `GET /api/device`
///
/// # Returns
///
/// - `info` - model, board, brand, android, kernel, cpu, ram
/// - `pretty` - the same facts as seven bullet-prefixed display lines
pub(crate) async fn get_device(
    State(state): State<AppState>,
) -> Result<Json<DeviceResponse>, ApiError> {
    debug!("Request: GET /api/device");

    let info = state.devices.collect().await;
    debug!("Collected device info: {:?}", info);

    Ok(Json(DeviceResponse::from(info)))
}
