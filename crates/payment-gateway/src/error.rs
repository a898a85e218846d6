//! Error types for the gateway.

use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use phoenixd_client::PhoenixdError;
use thiserror::Error;

use crate::price::PriceError;

/// Errors a gateway request can end with.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// A required input field was absent or empty.
    #[error("'{0}' must be provided")]
    MissingField(&'static str),

    /// The query string could not be parsed (e.g., a repeated key).
    #[error("{}", .0.body_text())]
    InvalidQuery(#[from] QueryRejection),

    /// The supplied API key did not match the configured one.
    #[error("'apikey' must be valid")]
    InvalidApiKey,

    /// The request's Origin is not on the allow-list.
    #[error("Not allowed by CORS")]
    OriginNotAllowed,

    /// phoenixd call failed. `message` is what the client sees.
    #[error("{message}")]
    Upstream {
        message: &'static str,
        #[source]
        source: PhoenixdError,
    },

    /// Price feed failed.
    #[error(transparent)]
    Price(#[from] PriceError),
}

impl GatewayError {
    /// Wrap a phoenixd error with the client-facing message for a route.
    pub fn upstream(message: &'static str) -> impl FnOnce(PhoenixdError) -> Self {
        move |source| GatewayError::Upstream { message, source }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::MissingField(_)
            | GatewayError::InvalidQuery(_)
            | GatewayError::InvalidApiKey => StatusCode::BAD_REQUEST,
            GatewayError::OriginNotAllowed => StatusCode::FORBIDDEN,
            GatewayError::Upstream { .. } | GatewayError::Price(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let message = match &self {
            GatewayError::MissingField(_)
            | GatewayError::InvalidQuery(_)
            | GatewayError::InvalidApiKey => {
                tracing::warn!("{}", self);
                self.to_string()
            }
            GatewayError::OriginNotAllowed => {
                tracing::warn!("Rejected request from disallowed origin");
                self.to_string()
            }
            GatewayError::Upstream { message, source } => {
                tracing::error!("{}: {}", message, source);
                message.to_string()
            }
            GatewayError::Price(err) => {
                tracing::error!("Error getting price: {}", err);
                err.client_message()
            }
        };

        let body = serde_json::json!({
            "error": message
        });

        (self.status(), Json(body)).into_response()
    }
}

/// Result type for gateway handlers.
pub type Result<T> = std::result::Result<T, GatewayError>;
