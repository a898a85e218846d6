//! Cached BTC price.

use axum::extract::State;
use axum::Json;

use crate::error::Result;
use crate::price::PriceQuote;
use crate::state::AppState;

/// `GET /price`
pub async fn price(State(state): State<AppState>) -> Result<Json<PriceQuote>> {
    Ok(Json(state.price.quote().await?))
}
