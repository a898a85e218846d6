//! Configuration types for phoenixd-client.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

/// Default request timeout applied to every upstream call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for a phoenixd HTTP API.
#[derive(Debug, Clone)]
pub struct PhoenixdConfig {
    /// Base URL of the daemon (e.g., "http://127.0.0.1:9740").
    pub base_url: String,
    /// HTTP password from phoenixd's `phoenix.conf`.
    password: SecretString,
    /// Timeout for a single request.
    pub timeout: Duration,
}

impl PhoenixdConfig {
    /// Create a new configuration with the default timeout.
    pub fn new(base_url: impl Into<String>, password: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            password: SecretString::from(password.into()),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Builder method to set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the full URL for a path relative to the base URL.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) fn password(&self) -> &str {
        self.password.expose_secret()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_base_and_path() {
        let config = PhoenixdConfig::new("http://localhost:9740/", "secret");
        assert_eq!(config.base_url, "http://localhost:9740");
        assert_eq!(config.url("/getinfo"), "http://localhost:9740/getinfo");
    }

    #[test]
    fn debug_does_not_leak_password() {
        let config = PhoenixdConfig::new("http://localhost:9740", "hunter2");
        let printed = format!("{:?}", config);
        assert!(!printed.contains("hunter2"));
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }
}
