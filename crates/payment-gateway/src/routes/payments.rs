//! Incoming payment lookups.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::{GatewayError, Result};
use crate::input::{required, scalar};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PaidQuery {
    #[serde(default, deserialize_with = "scalar")]
    pub hash: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PaidResponse {
    pub paid: bool,
}

/// `GET /paid?hash=..` reports whether an invoice has been paid.
pub async fn paid(
    State(state): State<AppState>,
    query: std::result::Result<Query<PaidQuery>, QueryRejection>,
) -> Result<Json<PaidResponse>> {
    let Query(query) = query?;
    let hash = required("hash", query.hash)?;

    let payment = state
        .wallet
        .incoming_payment(&hash)
        .await
        .map_err(GatewayError::upstream("Failed to check paid status"))?;

    Ok(Json(PaidResponse {
        paid: payment.is_paid.unwrap_or(false),
    }))
}

#[derive(Debug, Deserialize)]
pub struct IncomingQuery {
    #[serde(default, deserialize_with = "scalar")]
    pub apikey: Option<String>,
}

/// `GET /payments/incoming?apikey=..` lists incoming payments.
///
/// Missing and wrong keys both answer 400, not 401/403.
pub async fn incoming(
    State(state): State<AppState>,
    query: std::result::Result<Query<IncomingQuery>, QueryRejection>,
) -> Result<Json<serde_json::Value>> {
    let Query(query) = query?;
    let apikey = required("apikey", query.apikey)?;
    if !state.api_key_matches(&apikey) {
        return Err(GatewayError::InvalidApiKey);
    }

    let payments = state
        .wallet
        .list_incoming_payments()
        .await
        .map_err(GatewayError::upstream("Failed to list incoming payments"))?;

    Ok(Json(payments))
}
