//! Process-wide settings resolved once at startup
//!
//! All values come from environment variables with built-in defaults.
//! Resolution goes through a lookup function so tests can supply their own
//! variables instead of mutating the process environment.

use super::paths::{config_path_for, default_module_root};
use crate::error::{ModPanelError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Module name used when `MODULE_NAME` is unset.
pub const DEFAULT_MODULE_NAME: &str = "YourModule";

/// Listening port used when `PORT` is unset.
pub const DEFAULT_PORT: u16 = 8000;

/// Per-command timeout used when `COMMAND_TIMEOUT_SECS` is unset.
pub const DEFAULT_COMMAND_TIMEOUT_SECS: u64 = 5;

/// Module description used when `MODULE_DESC` is unset.
pub const DEFAULT_MODULE_DESCRIPTION: &str = "Module Magisk ini menyediakan dua mode: otomatis dan statis. Mode otomatis menyesuaikan konfigurasi sesuai kondisi sistem, sedangkan mode statis menggunakan pengaturan tetap yang ditentukan pengguna.";

/// Identity of the deployed module and its developer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleIdentity {
    /// Module name, also the directory under `module_root`
    pub name: String,
    /// Directory holding installed modules
    pub module_root: PathBuf,
    /// Free-form module description for the about endpoint
    pub description: String,
    pub developer_name: String,
    pub developer_contact: String,
    pub developer_website: String,
}

impl ModuleIdentity {
    /// Path of the module's `config.conf`.
    pub fn config_path(&self) -> PathBuf {
        config_path_for(&self.module_root, &self.name)
    }
}

impl Default for ModuleIdentity {
    fn default() -> Self {
        Self {
            name: DEFAULT_MODULE_NAME.to_string(),
            module_root: default_module_root(),
            description: DEFAULT_MODULE_DESCRIPTION.to_string(),
            developer_name: "Your Name".to_string(),
            developer_contact: "@username".to_string(),
            developer_website: "https://example.com".to_string(),
        }
    }
}

/// Fallback device facts used when the live query yields nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceOverrides {
    pub model: Option<String>,
    pub board: Option<String>,
    pub brand: Option<String>,
    pub android: Option<String>,
    pub cpu: Option<String>,
}

/// Settings shared by every request handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub identity: ModuleIdentity,
    pub device: DeviceOverrides,
    pub port: u16,
    pub command_timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            identity: ModuleIdentity::default(),
            device: DeviceOverrides::default(),
            port: DEFAULT_PORT,
            command_timeout: Duration::from_secs(DEFAULT_COMMAND_TIMEOUT_SECS),
        }
    }
}

impl Settings {
    /// Resolve settings from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve settings from an arbitrary variable lookup.
    ///
    /// Device fallbacks treat an empty variable as unset. `PORT` and
    /// `COMMAND_TIMEOUT_SECS` must parse when present.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ModuleIdentity::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let identity = ModuleIdentity {
            name: lookup("MODULE_NAME").unwrap_or(defaults.name),
            module_root: lookup("MODULE_ROOT")
                .map(PathBuf::from)
                .unwrap_or(defaults.module_root),
            description: lookup("MODULE_DESC").unwrap_or(defaults.description),
            developer_name: lookup("DEV_NAME").unwrap_or(defaults.developer_name),
            developer_contact: lookup("DEV_CONTACT").unwrap_or(defaults.developer_contact),
            developer_website: lookup("DEV_WEBSITE").unwrap_or(defaults.developer_website),
        };

        let device = DeviceOverrides {
            model: non_empty("DEVICE_MODEL"),
            board: non_empty("DEVICE_BOARD"),
            brand: non_empty("DEVICE_BRAND"),
            android: non_empty("DEVICE_ANDROID"),
            cpu: non_empty("DEVICE_CPU"),
        };

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|e| ModPanelError::Config(format!("Invalid PORT '{}': {}", raw, e)))?,
            None => DEFAULT_PORT,
        };

        let timeout_secs = match lookup("COMMAND_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|e| {
                ModPanelError::Config(format!("Invalid COMMAND_TIMEOUT_SECS '{}': {}", raw, e))
            })?,
            None => DEFAULT_COMMAND_TIMEOUT_SECS,
        };
        if timeout_secs == 0 {
            return Err(ModPanelError::Config(
                "COMMAND_TIMEOUT_SECS must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            identity,
            device,
            port,
            command_timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Path of the module's `config.conf`.
    pub fn config_path(&self) -> PathBuf {
        self.identity.config_path()
    }
}
