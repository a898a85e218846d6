//! Route handlers for the payment gateway.

pub mod decode;
pub mod health;
pub mod invoice;
pub mod node;
pub mod payments;
pub mod price;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;

/// Build the router with all routes.
pub fn router() -> Router<AppState> {
    Router::new()
        // BOLT-11 invoices
        .route(
            "/invoice",
            get(invoice::create_invoice_query).post(invoice::create_invoice_body),
        )
        .route("/paid", get(payments::paid))
        .route("/decodeinvoice", get(decode::decode_invoice))
        // BOLT-12 offers
        .route(
            "/decodeoffer",
            get(decode::decode_offer_query).post(decode::decode_offer_body),
        )
        .route("/tip", get(node::tip))
        // Restricted
        .route("/payments/incoming", get(payments::incoming))
        .route("/status", get(node::status))
        .route("/price", get(price::price))
        .route("/health", get(health::health))
}
