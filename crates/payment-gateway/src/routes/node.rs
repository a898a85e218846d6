//! Node-level endpoints: reusable offer and status.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::error::{GatewayError, Result};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct TipResponse {
    pub tip: String,
}

/// `GET /tip` returns the node's BOLT-12 offer.
pub async fn tip(State(state): State<AppState>) -> Result<Json<TipResponse>> {
    let offer = state
        .wallet
        .get_offer()
        .await
        .map_err(GatewayError::upstream("Failed to get offer"))?;

    Ok(Json(TipResponse { tip: offer }))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_height: Option<u64>,
}

/// `GET /status`
pub async fn status(State(state): State<AppState>) -> Result<Json<StatusResponse>> {
    let info = state
        .wallet
        .get_info()
        .await
        .map_err(GatewayError::upstream("Failed to get status"))?;

    Ok(Json(StatusResponse {
        status: "Running",
        chain: info.chain,
        block_height: info.block_height,
    }))
}
