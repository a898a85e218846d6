//! Request input helpers.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::warn;

use crate::error::{GatewayError, Result};

/// Deserialize a scalar as text, accepting strings, numbers and booleans.
///
/// Lets the same input struct serve query strings and JSON bodies where
/// `amount` may arrive as `1000` or `"1000"`.
pub fn scalar<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

/// Require a non-blank field.
pub fn required(field: &'static str, value: Option<String>) -> Result<String> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => {
            warn!(field, "Required field missing");
            Err(GatewayError::MissingField(field))
        }
    }
}
