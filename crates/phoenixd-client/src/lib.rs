//! phoenixd HTTP API client.
//!
//! A thin wrapper over phoenixd's private HTTP API. It covers only the
//! receive-side calls a payment gateway needs: creating and decoding
//! invoices and offers, looking up incoming payments, and reading node info.
//!
//! # Example
//!
//! ```no_run
//! use phoenixd_client::{PhoenixdClient, PhoenixdConfig};
//!
//! # async fn example() -> Result<(), phoenixd_client::PhoenixdError> {
//! let config = PhoenixdConfig::new("http://127.0.0.1:9740", "password");
//! let client = PhoenixdClient::new(config)?;
//!
//! let info = client.get_info().await?;
//! println!("chain: {:?}, height: {:?}", info.chain, info.block_height);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod types;

pub use client::PhoenixdClient;
pub use config::{PhoenixdConfig, DEFAULT_TIMEOUT};
pub use error::PhoenixdError;
pub use types::{CreateInvoiceParams, IncomingPayment, NodeInfo};
