//! Invoice creation.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use phoenixd_client::CreateInvoiceParams;
use serde::Deserialize;
use tracing::info;

use crate::error::{GatewayError, Result};
use crate::input::{required, scalar};
use crate::state::AppState;

/// Invoice request as accepted from clients.
#[derive(Debug, Default, Deserialize)]
pub struct InvoiceInput {
    #[serde(default, deserialize_with = "scalar")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "scalar")]
    pub amount: Option<String>,
    #[serde(default, deserialize_with = "scalar")]
    pub id: Option<String>,
}

impl InvoiceInput {
    /// Validate and map to phoenixd field names.
    pub fn into_params(self) -> Result<CreateInvoiceParams> {
        Ok(CreateInvoiceParams {
            description: required("description", self.description)?,
            amount_sat: required("amount", self.amount)?,
            external_id: required("id", self.id)?,
        })
    }
}

/// `GET /invoice?description=..&amount=..&id=..`
pub async fn create_invoice_query(
    State(state): State<AppState>,
    input: std::result::Result<Query<InvoiceInput>, QueryRejection>,
) -> Result<Json<serde_json::Value>> {
    let Query(input) = input?;
    create_invoice(&state, input).await
}

/// `POST /invoice` with a JSON body.
pub async fn create_invoice_body(
    State(state): State<AppState>,
    body: Option<Json<InvoiceInput>>,
) -> Result<Json<serde_json::Value>> {
    let input = body.map(|Json(input)| input).unwrap_or_default();
    create_invoice(&state, input).await
}

async fn create_invoice(state: &AppState, input: InvoiceInput) -> Result<Json<serde_json::Value>> {
    let params = input.into_params()?;

    let invoice = state
        .wallet
        .create_invoice(&params)
        .await
        .map_err(GatewayError::upstream("Error generating invoice"))?;

    info!(external_id = %params.external_id, "Created invoice");
    Ok(Json(invoice))
}
