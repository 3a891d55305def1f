//! HTTP client for communicating with the modpanel server.

use anyhow::{Context, Result};
use modpanel_core::api;
use modpanel_core::Mode;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Normalize a server URL by removing trailing slashes.
fn normalize_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

/// HTTP client for the modpanel daemon's REST API.
///
/// # Retry Logic
///
/// Requests that fail before a response arrives (connection refused,
/// timeouts) are retried with a linearly growing delay. Responses with a
/// 4xx or 5xx status are not retried; the server's `detail` message is
/// returned as the error.
///
/// # Examples
///
/// ```no_run
/// use modpanelctl::client::ModPanelClient;
/// use std::time::Duration;
///
/// # async fn example() -> anyhow::Result<()> {
/// let client = ModPanelClient::with_config(
///     "http://192.168.1.20:8000".to_string(),
///     10,  // timeout in seconds
///     3,   // max retries
///     Duration::from_millis(500),  // initial retry delay
/// )?;
///
/// let mode = client.get_mode().await?;
/// println!("Mode: {}", mode.mode);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ModPanelClient {
    client: Client,
    base_url: String,
    max_retries: u32,
    retry_delay: Duration,
}

impl ModPanelClient {
    /// Create a new client with custom configuration.
    ///
    /// # Arguments
    ///
    /// * `server_url` - Base URL of the server (e.g., "http://localhost:8000")
    /// * `timeout_secs` - Request timeout in seconds
    /// * `max_retries` - Maximum number of retry attempts for failed requests
    /// * `retry_delay` - Initial delay between retries
    pub fn with_config(
        server_url: String,
        timeout_secs: u64,
        max_retries: u32,
        retry_delay: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(concat!("modpanelctl/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: normalize_url(&server_url),
            max_retries,
            retry_delay,
        })
    }

    /// Process an HTTP response and decode its JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The HTTP status code indicates failure (4xx or 5xx)
    /// - The response body cannot be read
    /// - The JSON cannot be deserialized
    async fn handle_response<T: DeserializeOwned>(response: Response, endpoint: &str) -> Result<T> {
        let status = response.status();
        let text = response
            .text()
            .await
            .with_context(|| format!("Failed to read response body from {}", endpoint))?;

        if !status.is_success() {
            let detail = serde_json::from_str::<api::ErrorResponse>(&text)
                .map(|e| e.detail)
                .unwrap_or(text);
            let error_msg = match status {
                StatusCode::NOT_FOUND => format!("Endpoint {} not found", endpoint),
                StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                    format!("Bad request to {}: {}", endpoint, detail)
                }
                StatusCode::INTERNAL_SERVER_ERROR => {
                    format!("Server error at {}: {}", endpoint, detail)
                }
                _ => format!("HTTP {} error at {}: {}", status, endpoint, detail),
            };
            return Err(anyhow::anyhow!(error_msg));
        }

        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse JSON response from {}", endpoint))
    }

    /// Execute an HTTP request with automatic retry logic.
    ///
    /// Only retry on connection-related errors (connection failures, timeouts).
    /// The delay grows linearly: `retry_delay * (attempt + 1)`.
    async fn execute_with_retry<F, Fut, T>(&self, endpoint: &str, request_fn: F) -> Result<T>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = Result<Response, reqwest::Error>>,
        T: DeserializeOwned,
    {
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            match request_fn().await {
                Ok(response) => {
                    return Self::handle_response(response, endpoint).await;
                }
                Err(e) => {
                    let should_retry = e.is_connect() || e.is_timeout() || e.is_request();
                    last_error = Some(e);

                    if attempt < self.max_retries && should_retry {
                        tokio::time::sleep(self.retry_delay * (attempt + 1)).await;
                    } else {
                        break;
                    }
                }
            }
        }

        match last_error {
            Some(e) => Err(anyhow::anyhow!(
                "Failed to reach {} after {} attempts: {}",
                endpoint,
                self.max_retries + 1,
                e
            )),
            None => Err(anyhow::anyhow!("Failed to reach {}", endpoint)),
        }
    }

    /// Retrieve the service greeting.
    pub async fn get_root(&self) -> Result<api::RootResponse> {
        let url = format!("{}/", self.base_url);

        self.execute_with_retry("/", || self.client.get(&url).send())
            .await
    }

    /// Retrieve device information.
    pub async fn get_device(&self) -> Result<api::DeviceResponse> {
        let url = format!("{}/api/device", self.base_url);

        self.execute_with_retry("api/device", || self.client.get(&url).send())
            .await
    }

    /// Retrieve the current mode and config file path.
    pub async fn get_mode(&self) -> Result<api::ModeResponse> {
        let url = format!("{}/api/mode", self.base_url);

        self.execute_with_retry("api/mode", || self.client.get(&url).send())
            .await
    }

    /// Set the module mode.
    ///
    /// The value is normalized and checked locally before sending, so an
    /// invalid mode fails without contacting the server.
    pub async fn set_mode(&self, mode: &str) -> Result<api::ModeUpdateResponse> {
        let mode = Mode::normalize(mode)
            .map_err(|_| anyhow::anyhow!("Mode must be 'otomatis' or 'statis', got '{}'", mode))?;

        let url = format!("{}/api/mode", self.base_url);
        let body = api::ModeUpdateRequest {
            mode: mode.to_string(),
        };

        self.execute_with_retry("api/mode", || self.client.post(&url).json(&body).send())
            .await
    }

    /// Retrieve the developer/module descriptor.
    pub async fn get_about(&self) -> Result<api::AboutResponse> {
        let url = format!("{}/api/about", self.base_url);

        self.execute_with_retry("api/about", || self.client.get(&url).send())
            .await
    }

    /// Query the backend health endpoint.
    pub async fn health(&self) -> Result<api::HealthResponse> {
        let url = format!("{}/test", self.base_url);

        self.execute_with_retry("test", || self.client.get(&url).send())
            .await
    }

    /// Check whether the server answers at all.
    ///
    /// Uses a short 3 second timeout and no retries. Never returns an error
    /// for connection failures.
    pub async fn ping(&self) -> Result<bool> {
        let url = format!("{}/", self.base_url);

        let client = Client::builder()
            .timeout(Duration::from_secs(3))
            .build()
            .context("Failed to create ping client")?;

        match client.get(&url).send().await {
            Ok(response) => Ok(response.status().is_success()),
            Err(_) => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::MockServer;
    use modpanel_core::ModeStatus;

    fn client_for(url: &str) -> ModPanelClient {
        ModPanelClient::with_config(url.to_string(), 5, 0, Duration::from_millis(10)).unwrap()
    }

    #[test]
    fn test_normalize_url() {
        assert_eq!(
            normalize_url("http://localhost:8000"),
            "http://localhost:8000"
        );
        assert_eq!(
            normalize_url("http://localhost:8000///"),
            "http://localhost:8000"
        );
        assert_eq!(
            normalize_url("http://phone.local/panel/"),
            "http://phone.local/panel"
        );
    }

    #[tokio::test]
    async fn test_get_device() {
        let server = MockServer::start().await;
        let client = client_for(&server.url);

        let device = client.get_device().await.unwrap();
        assert_eq!(device.info.model, "Pixel 7");
        assert_eq!(device.pretty.len(), 7);
    }

    #[tokio::test]
    async fn test_mode_round_trip() {
        let server = MockServer::start().await;
        let client = client_for(&server.url);

        assert_eq!(client.get_mode().await.unwrap().mode, ModeStatus::Otomatis);

        let updated = client.set_mode("  STATIS").await.unwrap();
        assert!(updated.ok);
        assert_eq!(updated.mode, "statis");
        assert_eq!(client.get_mode().await.unwrap().mode, ModeStatus::Statis);
    }

    #[tokio::test]
    async fn test_set_mode_rejected_locally() {
        let server = MockServer::start().await;
        let client = client_for(&server.url);

        let err = client.set_mode("fast").await.unwrap_err();
        assert!(err.to_string().contains("otomatis"));
        assert_eq!(server.mode_posts(), 0);
    }

    #[tokio::test]
    async fn test_server_error_detail_is_surfaced() {
        let server = MockServer::start().await;
        server.fail_writes();
        let client = client_for(&server.url);

        let err = client.set_mode("statis").await.unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("Server error at api/mode"));
        assert!(message.contains("Gagal menulis file konfigurasi"));
    }

    #[tokio::test]
    async fn test_about_and_health() {
        let server = MockServer::start().await;
        let client = client_for(&server.url);

        let about = client.get_about().await.unwrap();
        assert_eq!(about.module.name, "YourModule");

        let health = client.health().await.unwrap();
        assert_eq!(health.backend, "✅ Running");

        let root = client.get_root().await.unwrap();
        assert!(root.message.contains("Backend"));
        assert!(client.ping().await.unwrap());
    }

    #[tokio::test]
    async fn test_unreachable_server() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let client = client_for(&format!("http://127.0.0.1:{}", port));

        assert!(!client.ping().await.unwrap());
        let err = client.get_mode().await.unwrap_err();
        assert!(err.to_string().contains("after 1 attempts"));
    }
}
