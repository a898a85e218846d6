//! phoenixd HTTP client.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::config::PhoenixdConfig;
use crate::error::PhoenixdError;
use crate::types::{
    CreateInvoiceParams, DecodeInvoiceParams, DecodeOfferParams, IncomingPayment, NodeInfo,
};

/// Client for the phoenixd HTTP API.
///
/// Every request carries `Authorization: Basic base64(":" + password)`.
/// Payloads are sent as `application/x-www-form-urlencoded` bodies.
#[derive(Clone)]
pub struct PhoenixdClient {
    http: Client,
    config: PhoenixdConfig,
}

impl PhoenixdClient {
    /// Build a client for the given configuration.
    pub fn new(config: PhoenixdConfig) -> Result<Self, PhoenixdError> {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, basic_auth_header(config.password())?);

        let http = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self { http, config })
    }

    /// Create a BOLT-11 invoice.
    pub async fn create_invoice(
        &self,
        params: &CreateInvoiceParams,
    ) -> Result<serde_json::Value, PhoenixdError> {
        self.post("/createinvoice", params).await
    }

    /// Look up an incoming payment by its payment hash.
    pub async fn incoming_payment(&self, hash: &str) -> Result<IncomingPayment, PhoenixdError> {
        let path = format!("/payments/incoming/{}", urlencoding::encode(hash));
        self.get(&path).await
    }

    /// Decode a BOLT-11 invoice.
    pub async fn decode_invoice(&self, invoice: &str) -> Result<serde_json::Value, PhoenixdError> {
        self.post("/decodeinvoice", &DecodeInvoiceParams { invoice })
            .await
    }

    /// Decode a BOLT-12 offer.
    pub async fn decode_offer(&self, offer: &str) -> Result<serde_json::Value, PhoenixdError> {
        self.post("/decodeoffer", &DecodeOfferParams { offer }).await
    }

    /// List incoming payments.
    pub async fn list_incoming_payments(&self) -> Result<serde_json::Value, PhoenixdError> {
        self.get("/payments/incoming").await
    }

    /// Get the node's reusable BOLT-12 offer.
    pub async fn get_offer(&self) -> Result<String, PhoenixdError> {
        self.get_text("/getoffer").await
    }

    /// Get node information.
    pub async fn get_info(&self) -> Result<NodeInfo, PhoenixdError> {
        self.get("/getinfo").await
    }

    /// `GET` a path and parse the JSON response.
    pub async fn get<R: DeserializeOwned>(&self, path: &str) -> Result<R, PhoenixdError> {
        let response = self.send(self.request(Method::GET, path)).await?;
        Ok(response.json().await?)
    }

    /// `GET` a path and return the raw response text.
    pub async fn get_text(&self, path: &str) -> Result<String, PhoenixdError> {
        let response = self.send(self.request(Method::GET, path)).await?;
        Ok(response.text().await?)
    }

    /// `POST` a form-encoded payload and parse the JSON response.
    pub async fn post<P, R>(&self, path: &str, payload: &P) -> Result<R, PhoenixdError>
    where
        P: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response = self
            .send(self.request(Method::POST, path).form(payload))
            .await?;
        Ok(response.json().await?)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        debug!("phoenixd call: {} {}", method, path);
        self.http.request(method, self.config.url(path))
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, PhoenixdError> {
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!("phoenixd returned {}: {}", status, body);
            return Err(PhoenixdError::Status {
                status,
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        Ok(response)
    }
}

impl std::fmt::Debug for PhoenixdClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhoenixdClient")
            .field("config", &self.config)
            .finish()
    }
}

/// phoenixd uses an empty username with the configured password.
fn basic_auth_header(password: &str) -> Result<HeaderValue, PhoenixdError> {
    let encoded = STANDARD.encode(format!(":{}", password));
    let mut value = HeaderValue::from_str(&format!("Basic {}", encoded))
        .map_err(|e| PhoenixdError::Config(format!("Invalid password: {}", e)))?;
    value.set_sensitive(true);
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_auth_uses_empty_username() {
        let value = basic_auth_header("secret").unwrap();
        // base64(":secret")
        assert_eq!(value.to_str().unwrap(), "Basic OnNlY3JldA==");
        assert!(value.is_sensitive());
    }
}
