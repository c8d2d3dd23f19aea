//! Shared HTTP response helpers.
//!
//! Every response funnels through [`check_response`], so status handling and
//! body decoding happen once, below the typed verbs.

use alum_core::responses::{ApiFailure, ApiResult};
use serde_json::Value;

use crate::envelope::error_from_payload;

pub const TOTAL_COUNT_HEADER: &str = "x-total-count";

/// A successful response with its decoded JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    /// Value of `X-Total-Count`, when present and numeric.
    pub total_count: Option<usize>,
    /// Decoded body; an empty body decodes to `null`.
    pub body: Value,
}

/// Check status and decode the body.
///
/// - **Non-success status** → [`ApiFailure`] carrying the status code, a
///   message extracted from the body when it has one, and the body as
///   `details`.
/// - **Undecodable success body** → 500.
pub async fn check_response(resp: reqwest::Response) -> ApiResult<RawResponse> {
    let status = resp.status();
    let total_count = parse_total_count(resp.headers());
    let text = resp.text().await.map_err(transport_failure)?;

    let body = if text.trim().is_empty() {
        Value::Null
    } else {
        match serde_json::from_str::<Value>(&text) {
            Ok(value) => value,
            Err(_) if !status.is_success() => Value::String(text),
            Err(e) => {
                return Err(ApiFailure::internal(format!("undecodable response body: {e}")));
            }
        }
    };

    if !status.is_success() {
        let reason = status.canonical_reason().unwrap_or("request failed");
        return Err(status_failure(status.as_u16(), reason, body));
    }

    Ok(RawResponse {
        status: status.as_u16(),
        total_count,
        body,
    })
}

/// Map a transport error: status code when the error carries one, else 500.
pub fn transport_failure(err: reqwest::Error) -> ApiFailure {
    let code = err.status().map_or(500, |s| s.as_u16());
    ApiFailure::new(code, format!("request failed: {err}"))
}

fn status_failure(code: u16, reason: &str, body: Value) -> ApiFailure {
    let message = match &body {
        Value::Object(map) => map
            .get("error")
            .filter(|e| !e.is_null())
            .map(|e| error_from_payload(e, code).message)
            .or_else(|| map.get("message").and_then(Value::as_str).map(str::to_string)),
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        _ => None,
    }
    .unwrap_or_else(|| reason.to_string());

    let failure = ApiFailure::new(code, message);
    if body.is_null() {
        failure
    } else {
        failure.with_details(body)
    }
}

fn parse_total_count(headers: &reqwest::header::HeaderMap) -> Option<usize> {
    headers
        .get(TOTAL_COUNT_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<usize>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn mock_response(status: u16, body: &str) -> reqwest::Response {
        reqwest::Response::from(
            ::http::Response::builder()
                .status(status)
                .body(body.to_string())
                .unwrap(),
        )
    }

    fn mock_response_with_total(status: u16, body: &str, total: &str) -> reqwest::Response {
        reqwest::Response::from(
            ::http::Response::builder()
                .status(status)
                .header("X-Total-Count", total)
                .body(body.to_string())
                .unwrap(),
        )
    }

    #[tokio::test]
    async fn success_body_is_decoded() {
        let raw = check_response(mock_response(200, r#"{"id":"evt-1"}"#))
            .await
            .unwrap();
        assert_eq!(raw.status, 200);
        assert_eq!(raw.body, json!({"id": "evt-1"}));
        assert_eq!(raw.total_count, None);
    }

    #[tokio::test]
    async fn empty_body_is_null() {
        let raw = check_response(mock_response(204, "")).await.unwrap();
        assert_eq!(raw.body, Value::Null);
    }

    #[tokio::test]
    async fn total_count_header_is_parsed() {
        let raw = check_response(mock_response_with_total(200, "[]", "42"))
            .await
            .unwrap();
        assert_eq!(raw.total_count, Some(42));
    }

    #[tokio::test]
    async fn non_numeric_total_count_is_ignored() {
        let raw = check_response(mock_response_with_total(200, "[]", "many"))
            .await
            .unwrap();
        assert_eq!(raw.total_count, None);
    }

    #[tokio::test]
    async fn not_found_keeps_status_and_details() {
        let err = check_response(mock_response(404, r#"{"message":"no such event"}"#))
            .await
            .unwrap_err();
        assert_eq!(err.code, 404);
        assert_eq!(err.message, "no such event");
        assert_eq!(err.details, Some(json!({"message": "no such event"})));
    }

    #[tokio::test]
    async fn envelope_error_message_wins() {
        let body = r#"{"success":false,"error":{"code":409,"message":"event is full"}}"#;
        let err = check_response(mock_response(409, body)).await.unwrap_err();
        assert_eq!(err.code, 409);
        assert_eq!(err.message, "event is full");
    }

    #[tokio::test]
    async fn plain_text_error_body() {
        let err = check_response(mock_response(502, "bad gateway upstream"))
            .await
            .unwrap_err();
        assert_eq!(err.code, 502);
        assert_eq!(err.message, "bad gateway upstream");
    }

    #[tokio::test]
    async fn empty_error_body_uses_reason_phrase() {
        let err = check_response(mock_response(500, "")).await.unwrap_err();
        assert_eq!(err.code, 500);
        assert_eq!(err.message, "Internal Server Error");
        assert_eq!(err.details, None);
    }

    #[tokio::test]
    async fn undecodable_success_body_is_500() {
        let err = check_response(mock_response(200, "<html>")).await.unwrap_err();
        assert_eq!(err.code, 500);
        assert!(err.message.contains("undecodable"));
    }
}
