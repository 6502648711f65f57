//! Response body parsing for the DemoBlaze wire format.
//!
//! The backend has two quirks every caller has to deal with: list responses
//! wrap their payload in an `{"Items": [...]}` envelope, and rejections often
//! arrive as HTTP 200 with an `{"errorMessage": ...}` body. The helpers here
//! normalize both so the operation methods stay small.

use crate::types::Product;
use demoblaze_core::error::DecodeError;
use demoblaze_core::Result;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

/// Extracts the in-band rejection message from a response body, if present.
///
/// Returns `Some` when the body is a JSON object carrying an `errorMessage`
/// key. Bodies that are not JSON, or JSON without that key, return `None`.
#[must_use]
pub fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let message = value.get("errorMessage")?;
    Some(match message.as_str() {
        Some(text) => text.to_string(),
        None => message.to_string(),
    })
}

/// Parses an `{"Items": [...]}` envelope into typed entries.
///
/// Entries that fail to parse individually are logged and skipped rather
/// than failing the whole response; the backend occasionally carries stale
/// rows that no longer match the documented shape.
///
/// # Errors
///
/// Returns a decode error if the body is not JSON, the `Items` key is
/// missing, or `Items` is not an array.
pub fn parse_items<T>(body: &str) -> Result<Vec<T>>
where
    T: DeserializeOwned,
{
    let envelope: Value = serde_json::from_str(body)?;
    let items = match envelope.get("Items") {
        Some(Value::Array(items)) => items,
        Some(_) => return Err(DecodeError::invalid_value("Items", "expected an array").into()),
        None => return Err(DecodeError::missing_field("Items").into()),
    };

    let mut parsed = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        match serde_json::from_value::<T>(item.clone()) {
            Ok(value) => parsed.push(value),
            Err(e) => warn!(index, error = %e, "Skipping Items entry that failed to parse"),
        }
    }
    Ok(parsed)
}

/// Parses a single-product response from the `view` endpoint.
///
/// The backend answers `null` (with HTTP 200) for ids it does not know;
/// that case maps to `Ok(None)` so the caller can decide how to report it.
///
/// # Errors
///
/// Returns a decode error if the body is not JSON or is JSON of the wrong
/// shape.
pub fn parse_product(body: &str) -> Result<Option<Product>> {
    let value: Value = serde_json::from_str(body)?;
    if value.is_null() {
        return Ok(None);
    }
    let product = serde_json::from_value(value)?;
    Ok(Some(product))
}

/// Extracts the session token from a login response body.
///
/// A successful login answers with the JSON string `"Auth_token: <token>"`.
/// Both the JSON-encoded and the raw form are accepted; anything without the
/// prefix, or with an empty token, returns `None`.
#[must_use]
pub fn extract_auth_token(body: &str) -> Option<String> {
    let text = serde_json::from_str::<String>(body).unwrap_or_else(|_| body.to_string());
    text.trim()
        .strip_prefix("Auth_token: ")
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}
