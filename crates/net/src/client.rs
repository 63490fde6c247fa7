//! HTTP client wrapper

use reqwest::{Client, Response};
use std::time::Duration;
use winst_errors::{Error, NetworkError};

/// Network client configuration
#[derive(Debug, Clone)]
pub struct NetConfig {
    /// Bound on the whole request; `None` means wait forever
    pub timeout: Option<Duration>,
    pub connect_timeout: Duration,
    pub user_agent: String,
}

impl Default for NetConfig {
    fn default() -> Self {
        Self {
            timeout: None, // wait forever, matching the workflow default
            connect_timeout: Duration::from_secs(30),
            user_agent: format!("winst/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl From<&winst_config::NetworkConfig> for NetConfig {
    fn from(config: &winst_config::NetworkConfig) -> Self {
        Self {
            timeout: config.timeout_seconds.map(Duration::from_secs),
            connect_timeout: Duration::from_secs(config.connect_timeout_seconds),
            user_agent: config.user_agent.clone(),
        }
    }
}

/// HTTP client wrapper
///
/// Deliberately performs exactly one attempt per request. Retrying a
/// failed provisioning download is a decision for the caller, not this
/// workflow.
#[derive(Clone)]
pub struct NetClient {
    client: Client,
}

impl NetClient {
    /// Create a new network client
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying reqwest client fails to initialize.
    pub fn new(config: NetConfig) -> Result<Self, Error> {
        let mut builder = Client::builder()
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent);

        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| NetworkError::ConnectionRefused(e.to_string()))?;

        Ok(Self { client })
    }

    /// Create with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created with default settings.
    pub fn with_defaults() -> Result<Self, Error> {
        Self::new(NetConfig::default())
    }

    /// Execute a GET request
    ///
    /// # Errors
    ///
    /// Returns an error on timeout, connection failure, or any other
    /// transport problem.
    pub async fn get(&self, url: &str) -> Result<Response, Error> {
        self.client
            .get(url)
            .send()
            .await
            .map_err(|e| Self::classify_error(url, &e).into())
    }

    fn classify_error(url: &str, error: &reqwest::Error) -> NetworkError {
        if error.is_timeout() {
            NetworkError::Timeout {
                url: url.to_string(),
            }
        } else if error.is_connect() {
            NetworkError::ConnectionRefused(error.to_string())
        } else {
            NetworkError::DownloadFailed(error.to_string())
        }
    }

    /// Get the underlying reqwest client for advanced usage
    #[must_use]
    pub fn inner(&self) -> &Client {
        &self.client
    }
}
