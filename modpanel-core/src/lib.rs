//! modpanel Core Library
//!
//! Shared types, API models, and configuration for the modpanel module
//! controller. This crate is used by the host layer, the server and the CLI.

pub mod api;
pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::{
    apply_mode, default_module_root, parse_mode, DeviceOverrides, ModuleIdentity, Settings,
    DEFAULT_COMMAND_TIMEOUT_SECS, DEFAULT_MODULE_NAME, DEFAULT_PORT,
};
pub use error::*;
pub use types::*;
