//! Configuration types for modpanel
//!
//! # Architecture
//!
//! Configuration is split into:
//! - [`Settings`] - process-wide settings resolved once at startup from the
//!   environment (module identity, device fallbacks, port, command timeout)
//! - The module's `config.conf` - a line-oriented `key=value` file of which
//!   only the `mode` key is interpreted, see [`parse_mode`] and [`apply_mode`]

mod mode_file;
mod paths;
mod settings;

pub use mode_file::{apply_mode, parse_mode, MODE_KEY};
pub use paths::{config_path_for, default_module_root, CONFIG_FILE_NAME};
pub use settings::{
    DeviceOverrides, ModuleIdentity, Settings, DEFAULT_COMMAND_TIMEOUT_SECS,
    DEFAULT_MODULE_DESCRIPTION, DEFAULT_MODULE_NAME, DEFAULT_PORT,
};
