//! Configuration options for the Kita Kita client

use std::time::Duration;

/// Environment variable holding the backend base URL
pub const API_URL_ENV: &str = "KITAKITA_API_URL";

/// Backend address used when no override is configured
pub const DEFAULT_API_URL: &str = "http://localhost:8080";

/// Configuration options for the Kita Kita client
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Base URL of the backend, without trailing slash
    pub base_url: String,

    /// The request timeout; `None` leaves calls unbounded
    pub request_timeout: Option<Duration>,

    /// Value sent in the `X-Client-Info` header
    pub client_info: String,

    /// Page size used by list pages unless overridden
    pub default_page_size: u32,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            request_timeout: None,
            client_info: format!("kitakita-rust/{}", env!("CARGO_PKG_VERSION")),
            default_page_size: 10,
        }
    }
}

impl ClientOptions {
    /// Default options with the base URL taken from `KITAKITA_API_URL`
    pub fn from_env() -> Self {
        match std::env::var(API_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => Self::default().with_base_url(&url),
            _ => Self::default(),
        }
    }

    /// Set the backend base URL
    pub fn with_base_url(mut self, value: &str) -> Self {
        self.base_url = value.trim().trim_end_matches('/').to_string();
        self
    }

    /// Set the request timeout
    pub fn with_request_timeout(mut self, value: Option<Duration>) -> Self {
        self.request_timeout = value;
        self
    }

    /// Set the client info header value
    pub fn with_client_info(mut self, value: &str) -> Self {
        self.client_info = value.to_string();
        self
    }

    /// Set the default list page size
    pub fn with_default_page_size(mut self, value: u32) -> Self {
        self.default_page_size = value.max(1);
        self
    }
}
