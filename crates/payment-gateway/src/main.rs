//! Payment gateway server.

use std::sync::Arc;

use payment_gateway::price::{MempoolPriceFeed, PriceService};
use payment_gateway::{AppState, Config};
use phoenixd_client::{PhoenixdClient, PhoenixdConfig};
use secrecy::ExposeSecret;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    let wallet_config = PhoenixdConfig::new(
        &config.phoenixd_url,
        config.phoenixd_password.expose_secret(),
    )
    .with_timeout(config.upstream_timeout);
    let wallet = PhoenixdClient::new(wallet_config)?;

    let feed = MempoolPriceFeed::new(&config.price_feed_url, config.upstream_timeout)?;
    let price = Arc::new(PriceService::new(Arc::new(feed), config.price_cache_ttl));

    if config.api_key.is_none() {
        warn!("API_KEY is not set; /payments/incoming will reject every request");
    }
    info!(origins = config.allowed_origins.len(), "Loaded origin allow-list");

    let state = AppState::new(
        wallet,
        price,
        config.api_key.clone(),
        config.allowed_origins.clone(),
    );
    let app = payment_gateway::app(state);

    info!(addr = %config.addr, phoenixd = %config.phoenixd_url, "Payment gateway listening");
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
