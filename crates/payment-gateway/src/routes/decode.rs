//! Invoice and offer decoding.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::error::{GatewayError, Result};
use crate::input::{required, scalar};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct InvoiceQuery {
    #[serde(default, deserialize_with = "scalar")]
    pub invoice: Option<String>,
}

/// `GET /decodeinvoice?invoice=..`
pub async fn decode_invoice(
    State(state): State<AppState>,
    query: std::result::Result<Query<InvoiceQuery>, QueryRejection>,
) -> Result<Json<serde_json::Value>> {
    let Query(query) = query?;
    let invoice = required("invoice", query.invoice)?;

    let decoded = state
        .wallet
        .decode_invoice(&invoice)
        .await
        .map_err(GatewayError::upstream("Failed to decode invoice"))?;

    Ok(Json(decoded))
}

#[derive(Debug, Default, Deserialize)]
pub struct OfferInput {
    #[serde(default, deserialize_with = "scalar")]
    pub offer: Option<String>,
}

/// `GET /decodeoffer?offer=..`
pub async fn decode_offer_query(
    State(state): State<AppState>,
    input: std::result::Result<Query<OfferInput>, QueryRejection>,
) -> Result<Json<serde_json::Value>> {
    let Query(input) = input?;
    decode_offer(&state, input).await
}

/// `POST /decodeoffer` with a JSON body.
pub async fn decode_offer_body(
    State(state): State<AppState>,
    body: Option<Json<OfferInput>>,
) -> Result<Json<serde_json::Value>> {
    let input = body.map(|Json(input)| input).unwrap_or_default();
    decode_offer(&state, input).await
}

async fn decode_offer(state: &AppState, input: OfferInput) -> Result<Json<serde_json::Value>> {
    let offer = required("offer", input.offer)?;

    let decoded = state
        .wallet
        .decode_offer(&offer)
        .await
        .map_err(GatewayError::upstream("Failed to decode offer"))?;

    Ok(Json(decoded))
}
