//! REST gateway over a phoenixd Lightning wallet.
//!
//! Exposes invoice, offer and payment-status routes backed by phoenixd,
//! a cached BTC price lookup, and an origin allow-list enforced before
//! routing.

pub mod config;
pub mod cors;
pub mod error;
pub mod input;
pub mod price;
pub mod routes;
pub mod state;

use axum::middleware;
use axum::Router;

pub use config::{Config, ConfigError};
pub use error::GatewayError;
pub use state::AppState;

/// Build the full application: routes, CORS headers and the origin guard.
pub fn app(state: AppState) -> Router {
    let cors = cors::layer(&state.allowed_origins);

    routes::router()
        .layer(cors)
        .layer(middleware::from_fn_with_state(state.clone(), cors::guard))
        .with_state(state)
}
