//! API module for the modpanel server
//!
//! Contains the REST API implementation with Axum router and handlers.

pub(crate) mod handlers;

use axum::{
    extract::DefaultBodyLimit,
    routing::get,
    Router,
};
use modpanel_core::Settings;
use modpanel_host::{CommandRunner, ConfigModeStore, DeviceInfoCollector};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

/// Application state shared across all handlers
#[derive(Clone)]
pub(crate) struct AppState {
    /// Settings resolved at startup
    pub settings: Arc<Settings>,
    /// Device facts collector
    pub devices: Arc<DeviceInfoCollector>,
    /// Mode file access
    pub mode_store: Arc<ConfigModeStore>,
}

impl AppState {
    /// Create application state backed by the standard `su`/`sh` runner
    pub fn new(settings: Settings) -> Self {
        let runner = Arc::new(CommandRunner::new(settings.command_timeout));
        Self::with_runner(settings, runner)
    }

    /// Create application state with a specific command runner
    pub fn with_runner(settings: Settings, runner: Arc<CommandRunner>) -> Self {
        let devices = DeviceInfoCollector::new(runner.clone(), settings.device.clone());
        let mode_store = ConfigModeStore::new(runner, settings.config_path());
        Self::from_parts(settings, devices, mode_store)
    }

    /// Assemble application state from prebuilt components
    pub fn from_parts(
        settings: Settings,
        devices: DeviceInfoCollector,
        mode_store: ConfigModeStore,
    ) -> Self {
        Self {
            settings: Arc::new(settings),
            devices: Arc::new(devices),
            mode_store: Arc::new(mode_store),
        }
    }
}

/// Create the main API router with all endpoints
pub(crate) fn create_router(state: AppState) -> Router {
    info!("Setting up API router...");

    // Fully open, credentials included: origin, methods and headers are
    // echoed back since a wildcard is not allowed alongside credentials.
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true);

    let middleware_stack = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(DefaultBodyLimit::max(64 * 1024)); // 64KB limit

    Router::new()
        .route("/", get(handlers::info::root))
        .route("/api/device", get(handlers::device::get_device))
        .route(
            "/api/mode",
            get(handlers::mode::get_mode).post(handlers::mode::set_mode),
        )
        .route("/api/about", get(handlers::info::about))
        // Health check
        .route("/test", get(handlers::info::health))
        .layer(middleware_stack)
        .with_state(state)
}

/// Error handling utilities
pub(crate) mod error {
    use axum::{
        http::StatusCode,
        response::{IntoResponse, Response},
        Json,
    };
    use modpanel_core::api::ErrorResponse;
    use modpanel_core::ModPanelError;
    use tracing::error;

    /// Detail returned for a rejected mode value
    pub const INVALID_MODE_DETAIL: &str = "Mode harus 'otomatis' atau 'statis'";

    /// Detail returned when the config file could not be written
    pub const WRITE_FAILED_DETAIL: &str =
        "Gagal menulis file konfigurasi. Pastikan perangkat sudah root dan path benar.";

    /// Custom error type for API responses
    #[derive(Debug)]
    pub struct ApiError {
        pub status_code: StatusCode,
        pub message: String,
    }

    impl ApiError {
        /// Create a new API error
        pub fn new(status_code: StatusCode, message: impl Into<String>) -> Self {
            Self {
                status_code,
                message: message.into(),
            }
        }

        /// Create a bad request error
        pub fn bad_request(message: impl Into<String>) -> Self {
            Self::new(StatusCode::BAD_REQUEST, message)
        }

        /// Create an internal server error
        pub fn internal_error(message: impl Into<String>) -> Self {
            Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
        }
    }

    impl IntoResponse for ApiError {
        fn into_response(self) -> Response {
            error!("API Error {}: {}", self.status_code, self.message);

            let body = ErrorResponse {
                detail: self.message,
            };

            (self.status_code, Json(body)).into_response()
        }
    }

    /// Convert ModPanelError to ApiError
    impl From<ModPanelError> for ApiError {
        fn from(err: ModPanelError) -> Self {
            match err {
                ModPanelError::InvalidMode(_) => Self::bad_request(INVALID_MODE_DETAIL),
                ModPanelError::ConfigWrite(_) => Self::internal_error(WRITE_FAILED_DETAIL),
                ModPanelError::Config(_) => Self::internal_error(err.to_string()),
            }
        }
    }

}
