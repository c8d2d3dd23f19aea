//! Response shape normalization.
//!
//! The backend may answer with bare data or with an envelope
//! `{data, success, message?, error?}`. Bodies carrying a `success` field are
//! envelopes; anything else is bare data. This module is the only place that
//! distinction is made: everything above it sees [`ApiResult`].

use alum_core::responses::{ApiFailure, ApiResult, Pagination};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// A normalized list body.
#[derive(Debug, Clone, PartialEq)]
pub struct ListBody {
    pub items: Vec<Value>,
    /// Size of the full set: envelope pagination, else `X-Total-Count`, else
    /// the number of items.
    pub total: usize,
    /// Pagination reported by an envelope, when present.
    pub pagination: Option<Pagination>,
    /// Whether `total` came from the server rather than from counting items.
    pub server_paginated: bool,
}

fn is_envelope(body: &Value) -> bool {
    body.as_object().is_some_and(|map| map.contains_key("success"))
}

/// Unwrap a single-item body.
///
/// # Errors
///
/// Returns the envelope's `error` as an [`ApiFailure`] when `success` is
/// `false`.
pub fn normalize_body(body: Value) -> ApiResult<Value> {
    if !is_envelope(&body) {
        return Ok(body);
    }
    let Value::Object(mut map) = body else {
        return Ok(Value::Null);
    };
    if map.get("success").and_then(Value::as_bool) == Some(false) {
        let error = map.remove("error").unwrap_or(Value::Null);
        let mut failure = error_from_payload(&error, 500);
        if failure.message.is_empty() {
            failure.message = map
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("request failed")
                .to_string();
        }
        return Err(failure);
    }
    Ok(map.remove("data").unwrap_or(Value::Null))
}

/// Unwrap a list body: a bare array or an envelope whose `data` is an array.
///
/// # Errors
///
/// Returns the envelope error for `success: false`, and 500 when the payload
/// is not a list at all.
pub fn normalize_list(body: Value, total_count: Option<usize>) -> ApiResult<ListBody> {
    let pagination = body
        .get("pagination")
        .filter(|_| is_envelope(&body))
        .and_then(|p| serde_json::from_value::<Pagination>(p.clone()).ok());

    let items = match normalize_body(body)? {
        Value::Array(items) => items,
        Value::Null => Vec::new(),
        Value::Object(mut map) => match map.remove("data") {
            Some(Value::Array(items)) => items,
            _ => return Err(ApiFailure::internal("expected a list response")),
        },
        _ => return Err(ApiFailure::internal("expected a list response")),
    };

    let (total, server_paginated) = match (pagination, total_count) {
        (Some(p), _) => (p.total, true),
        (None, Some(count)) => (count, true),
        (None, None) => (items.len(), false),
    };

    Ok(ListBody {
        items,
        total,
        pagination,
        server_paginated,
    })
}

/// Build an [`ApiFailure`] from an envelope `error` field.
///
/// Accepts `{code, message, details}` objects and plain strings. A missing
/// or non-numeric code falls back to `fallback_code`.
#[must_use]
pub fn error_from_payload(error: &Value, fallback_code: u16) -> ApiFailure {
    match error {
        Value::Object(map) => {
            let code = map
                .get("code")
                .and_then(Value::as_u64)
                .and_then(|c| u16::try_from(c).ok())
                .unwrap_or(fallback_code);
            let message = map
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or_default();
            let failure = ApiFailure::new(code, message);
            match map.get("details") {
                Some(details) if !details.is_null() => failure.with_details(details.clone()),
                _ => failure,
            }
        }
        Value::String(message) => ApiFailure::new(fallback_code, message.clone()),
        _ => ApiFailure::new(fallback_code, String::new()),
    }
}

/// Decode a normalized value into `T`; shape errors are 500s.
///
/// # Errors
///
/// Returns a 500 [`ApiFailure`] if `value` does not deserialize into `T`.
pub fn decode<T: DeserializeOwned>(value: Value) -> ApiResult<T> {
    serde_json::from_value(value)
        .map_err(|e| ApiFailure::internal(format!("unexpected response shape: {e}")))
}
