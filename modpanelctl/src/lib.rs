//! modpanel CLI Library
//!
//! This library provides the core functionality for the `modpanelctl` tool.
//!
//! # Public API
//!
//! The primary public API is [`client::ModPanelClient`], which talks to a
//! running `modpaneld`. Configuration types are available via
//! [`config::CliConfig`] and [`config::ConfigBuilder`].
//!
//! ```no_run
//! use modpanelctl::client::ModPanelClient;
//! use std::time::Duration;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = ModPanelClient::with_config(
//!     "http://localhost:8000".to_string(),
//!     10,  // timeout in seconds
//!     3,   // max retries
//!     Duration::from_millis(500),  // initial retry delay
//! )?;
//!
//! let device = client.get_device().await?;
//! for line in device.pretty {
//!     println!("{}", line);
//! }
//! # Ok(())
//! # }
//! ```

// Internal CLI implementation - not part of public API
#[doc(hidden)]
pub mod cli;

/// HTTP client for communicating with the modpanel server.
pub mod client;

/// Configuration types for the CLI tool.
pub mod config;

// Internal formatting functions - not part of public API
#[doc(hidden)]
pub mod format;

#[cfg(test)]
pub mod test_utils;
