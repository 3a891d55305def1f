//! API models for the modpanel REST API
//!
//! Request and response bodies shared by the server and the CLI client.
//! Responses are plain JSON objects; errors carry a single `detail` field.

use crate::types::{DeviceInfo, ModeStatus};
use serde::{Deserialize, Serialize};

/// Error body returned with any non-2xx status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

/// `GET /` response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootResponse {
    pub message: String,
}

/// `GET /test` response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub backend: String,
}

/// `GET /api/device` response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceResponse {
    /// Resolved device facts
    pub info: DeviceInfo,
    /// Display lines derived from `info`
    pub pretty: Vec<String>,
}

impl From<DeviceInfo> for DeviceResponse {
    fn from(info: DeviceInfo) -> Self {
        let pretty = info.pretty_lines();
        Self { info, pretty }
    }
}

/// `GET /api/mode` response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeResponse {
    pub mode: ModeStatus,
    pub config_path: String,
}

/// `POST /api/mode` request body
///
/// `mode` is free text; the server normalises it before validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeUpdateRequest {
    pub mode: String,
}

/// `POST /api/mode` response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeUpdateResponse {
    pub ok: bool,
    pub mode: String,
}

/// Developer section of the about response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeveloperInfo {
    pub name: String,
    pub contact: String,
    pub website: String,
}

/// Module section of the about response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleInfo {
    pub name: String,
    pub description: String,
    pub config_path: String,
}

/// `GET /api/about` response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AboutResponse {
    pub developer: DeveloperInfo,
    pub module: ModuleInfo,
}

impl From<&crate::ModuleIdentity> for AboutResponse {
    fn from(identity: &crate::ModuleIdentity) -> Self {
        Self {
            developer: DeveloperInfo {
                name: identity.developer_name.clone(),
                contact: identity.developer_contact.clone(),
                website: identity.developer_website.clone(),
            },
            module: ModuleInfo {
                name: identity.name.clone(),
                description: identity.description.clone(),
                config_path: identity.config_path().display().to_string(),
            },
        }
    }
}
