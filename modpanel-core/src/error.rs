//! Error types for the modpanel system

use thiserror::Error;

/// Core error type for modpanel operations
#[derive(Error, Debug)]
pub enum ModPanelError {
    /// Mode value outside the recognised set
    #[error("Invalid mode: {0}")]
    InvalidMode(String),

    /// The configuration file could not be persisted
    #[error("Failed to write configuration file: {0}")]
    ConfigWrite(String),

    /// Settings could not be resolved
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for modpanel operations
pub type Result<T> = std::result::Result<T, ModPanelError>;
