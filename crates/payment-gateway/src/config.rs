//! Configuration loaded from environment variables.

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use secrecy::SecretString;

/// Origins allowed to call the gateway when `ALLOWED_ORIGINS` is unset.
pub const DEFAULT_ALLOWED_ORIGINS: &[&str] = &[
    "http://localhost",
    "http://localhost:4200",
    "http://localhost:4201",
    "http://localhost:4210",
    "http://localhost:8080",
    "http://localhost:8888",
    "https://ariton.app",
    "https://alpha.ariton.app",
    "https://beta.ariton.app",
    "https://status.ariton.app",
];

pub const DEFAULT_PRICE_FEED_URL: &str = "https://mempool.space/api/v1/prices";

/// Gateway configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address.
    pub addr: SocketAddr,
    /// phoenixd base URL.
    pub phoenixd_url: String,
    /// phoenixd HTTP password.
    pub phoenixd_password: SecretString,
    /// Key required by `/payments/incoming`.
    pub api_key: Option<SecretString>,
    /// Origins allowed by the CORS guard.
    pub allowed_origins: Vec<String>,
    /// Timeout for upstream and price feed requests.
    pub upstream_timeout: Duration,
    /// Price feed endpoint.
    pub price_feed_url: String,
    /// How long a fetched price stays fresh.
    pub price_cache_ttl: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `PHOENIXD_URL` | phoenixd base URL | (required) |
    /// | `PHOENIXD_PASSWORD` | phoenixd HTTP password | (required) |
    /// | `PORT` | Listen port on `0.0.0.0` | `8080` |
    /// | `API_KEY` | Key for `/payments/incoming` | (unset) |
    /// | `ALLOWED_ORIGINS` | Comma-separated origins | built-in list |
    /// | `UPSTREAM_TIMEOUT_SECS` | Request timeout | `30` |
    /// | `PRICE_FEED_URL` | Price feed endpoint | mempool.space |
    /// | `PRICE_CACHE_TTL_SECS` | Price cache lifetime | `30` |
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let phoenixd_url =
            env::var("PHOENIXD_URL").map_err(|_| ConfigError::Missing("PHOENIXD_URL"))?;

        let phoenixd_password = env::var("PHOENIXD_PASSWORD")
            .map_err(|_| ConfigError::Missing("PHOENIXD_PASSWORD"))?;

        let api_key = env::var("API_KEY")
            .ok()
            .filter(|key| !key.is_empty())
            .map(SecretString::from);

        let allowed_origins = match env::var("ALLOWED_ORIGINS") {
            Ok(list) => parse_origins(&list),
            Err(_) => DEFAULT_ALLOWED_ORIGINS.iter().map(|o| o.to_string()).collect(),
        };

        let upstream_timeout = secs_var("UPSTREAM_TIMEOUT_SECS", 30)?;
        let price_cache_ttl = secs_var("PRICE_CACHE_TTL_SECS", 30)?;

        let price_feed_url =
            env::var("PRICE_FEED_URL").unwrap_or_else(|_| DEFAULT_PRICE_FEED_URL.to_string());

        Ok(Self {
            addr: SocketAddr::from(([0, 0, 0, 0], port)),
            phoenixd_url,
            phoenixd_password: SecretString::from(phoenixd_password),
            api_key,
            allowed_origins,
            upstream_timeout,
            price_feed_url,
            price_cache_ttl,
        })
    }
}

fn secs_var(name: &'static str, default: u64) -> Result<Duration, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|_| ConfigError::Invalid(name)),
        Err(_) => Ok(Duration::from_secs(default)),
    }
}

/// Split a comma-separated origin list, dropping blanks and trailing slashes.
pub fn parse_origins(list: &str) -> Vec<String> {
    list.split(',')
        .map(|origin| origin.trim().trim_end_matches('/'))
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    Missing(&'static str),

    #[error("Invalid {0} value")]
    Invalid(&'static str),
}
