//! API request handlers for the modpanel REST API.
//!
//! # Handler Modules
//!
//! - [`info`] - Root greeting, about descriptor and health check
//! - [`device`] - Device information
//! - [`mode`] - Module mode read and update
//!
//! Handlers accept `State<AppState>`, return `Result<Json<T>, ApiError>` and
//! log each request at debug level. Host failures never surface as errors
//! except when the mode file cannot be written.

pub mod device;
pub mod info;
pub mod mode;
