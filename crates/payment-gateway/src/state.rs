//! Application state shared across handlers.

use std::sync::Arc;

use phoenixd_client::PhoenixdClient;
use secrecy::{ExposeSecret, SecretString};

use crate::price::PriceService;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// phoenixd client.
    pub wallet: PhoenixdClient,
    /// Cached price lookup.
    pub price: Arc<PriceService>,
    /// Key guarding `/payments/incoming`.
    pub api_key: Option<SecretString>,
    /// Origins allowed by the CORS guard.
    pub allowed_origins: Arc<Vec<String>>,
}

impl AppState {
    /// Create new application state.
    pub fn new(
        wallet: PhoenixdClient,
        price: Arc<PriceService>,
        api_key: Option<SecretString>,
        allowed_origins: Vec<String>,
    ) -> Self {
        Self {
            wallet,
            price,
            api_key,
            allowed_origins: Arc::new(allowed_origins),
        }
    }

    /// Whether `candidate` equals the configured API key.
    pub fn api_key_matches(&self, candidate: &str) -> bool {
        self.api_key
            .as_ref()
            .is_some_and(|key| key.expose_secret() == candidate)
    }
}
