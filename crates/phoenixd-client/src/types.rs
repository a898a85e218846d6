//! Request and response types for the phoenixd API.

use serde::{Deserialize, Serialize};

/// Form body for `POST /createinvoice`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInvoiceParams {
    pub description: String,
    pub amount_sat: String,
    pub external_id: String,
}

/// Form body for `POST /decodeinvoice`.
#[derive(Debug, Serialize)]
pub(crate) struct DecodeInvoiceParams<'a> {
    pub invoice: &'a str,
}

/// Form body for `POST /decodeoffer`.
#[derive(Debug, Serialize)]
pub(crate) struct DecodeOfferParams<'a> {
    pub offer: &'a str,
}

/// An incoming payment as reported by `GET /payments/incoming/{hash}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomingPayment {
    #[serde(default)]
    pub payment_hash: Option<String>,
    #[serde(default)]
    pub is_paid: Option<bool>,
    #[serde(default)]
    pub received_sat: Option<u64>,
    #[serde(default)]
    pub external_id: Option<String>,
}

/// Node information from `GET /getinfo`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeInfo {
    #[serde(default)]
    pub chain: Option<String>,
    #[serde(default)]
    pub block_height: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incoming_payment_defaults_to_unpaid() {
        let payment: IncomingPayment =
            serde_json::from_str(r#"{"paymentHash":"abc","receivedSat":0}"#).unwrap();
        assert_eq!(payment.payment_hash.as_deref(), Some("abc"));
        assert_eq!(payment.is_paid, None);
    }

    #[test]
    fn incoming_payment_accepts_null_is_paid() {
        let payment: IncomingPayment =
            serde_json::from_str(r#"{"paymentHash":"abc","isPaid":null}"#).unwrap();
        assert_eq!(payment.is_paid, None);
    }

    #[test]
    fn node_info_reads_camel_case() {
        let info: NodeInfo = serde_json::from_str(
            r#"{"nodeId":"03ab","chain":"mainnet","blockHeight":870000,"channels":[]}"#,
        )
        .unwrap();
        assert_eq!(info.chain.as_deref(), Some("mainnet"));
        assert_eq!(info.block_height, Some(870000));
    }
}
