//! Response envelopes returned by the facade services.
//!
//! The transport layer speaks [`ApiResult`]; facades fold it into the
//! serializable envelopes below so callers can branch on `success` without
//! handling errors themselves.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Uniform error payload: `{code, message, details}`.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize, JsonSchema)]
#[error("{message} (code {code})")]
pub struct ApiFailure {
    /// HTTP-like status code (404 not found, 500 transport/unknown, ...).
    pub code: u16,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ApiFailure {
    #[must_use]
    pub fn new(code: u16, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    #[must_use]
    pub fn not_found(entity: &str, id: &str) -> Self {
        Self::new(404, format!("{entity} {id} not found"))
    }

    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(400, message)
    }

    #[must_use]
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(409, message)
    }

    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(500, message)
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        self.code == 404
    }
}

/// Result type used at the transport boundary.
pub type ApiResult<T> = Result<T, ApiFailure>;

/// Pagination metadata. Always derived from `(page, limit, total)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: usize,
    pub limit: usize,
    pub total: usize,
    pub total_pages: usize,
}

impl Pagination {
    /// Derive pagination metadata. A zero `limit` yields zero pages.
    #[must_use]
    pub const fn new(page: usize, limit: usize, total: usize) -> Self {
        let total_pages = if limit == 0 { 0 } else { total.div_ceil(limit) };
        Self {
            page,
            limit,
            total,
            total_pages,
        }
    }
}

/// One page of items plus the size of the full, unpaginated set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub limit: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    #[must_use]
    pub const fn pagination(&self) -> Pagination {
        Pagination {
            page: self.page,
            limit: self.limit,
            total: self.total,
            total_pages: self.total_pages,
        }
    }

    /// Transform items while keeping the pagination metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            limit: self.limit,
            total_pages: self.total_pages,
        }
    }

    /// An empty page that still reports the requested window.
    #[must_use]
    pub const fn empty(page: usize, limit: usize) -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            page,
            limit,
            total_pages: 0,
        }
    }
}

/// Single-item envelope: `{data, success, message?, error?}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub data: Option<T>,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiFailure>,
}

impl<T> ApiResponse<T> {
    #[must_use]
    pub const fn ok(data: T) -> Self {
        Self {
            data: Some(data),
            success: true,
            message: None,
            error: None,
        }
    }

    #[must_use]
    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            data: Some(data),
            success: true,
            message: Some(message.into()),
            error: None,
        }
    }

    #[must_use]
    pub fn fail(error: ApiFailure) -> Self {
        Self {
            data: None,
            success: false,
            message: Some(error.message.clone()),
            error: Some(error),
        }
    }

    /// Fold a transport result into an envelope.
    pub fn from_result(result: ApiResult<T>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(error) => Self::fail(error),
        }
    }

    /// Fold a transport result, attaching `message` on success.
    pub fn from_result_with_message(result: ApiResult<T>, message: impl Into<String>) -> Self {
        match result {
            Ok(data) => Self::ok_with_message(data, message),
            Err(error) => Self::fail(error),
        }
    }

    /// Convert back to a result; a successful envelope without data is a 404.
    ///
    /// # Errors
    ///
    /// Returns the carried [`ApiFailure`], or a 404 failure when `data` is absent.
    pub fn into_result(self) -> ApiResult<T> {
        match (self.success, self.data, self.error) {
            (true, Some(data), _) => Ok(data),
            (_, _, Some(error)) => Err(error),
            _ => Err(ApiFailure::new(404, self.message.unwrap_or_else(|| "no data".into()))),
        }
    }
}

/// List envelope: `{data, pagination, success, message?, error?}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub pagination: Pagination,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiFailure>,
}

impl<T> PaginatedResponse<T> {
    #[must_use]
    pub fn from_page(page: Page<T>) -> Self {
        let pagination = page.pagination();
        Self {
            data: page.items,
            pagination,
            success: true,
            message: None,
            error: None,
        }
    }

    /// A failed list degrades to an empty page with the requested window.
    #[must_use]
    pub fn fail(error: ApiFailure, page: usize, limit: usize) -> Self {
        Self {
            data: Vec::new(),
            pagination: Pagination::new(page, limit, 0),
            success: false,
            message: Some(error.message.clone()),
            error: Some(error),
        }
    }

    pub fn from_result(result: ApiResult<Page<T>>, page: usize, limit: usize) -> Self {
        match result {
            Ok(found) => Self::from_page(found),
            Err(error) => Self::fail(error, page, limit),
        }
    }
}

/// One failed id inside a bulk operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct BulkError {
    pub id: String,
    pub message: String,
}

/// Summary of a sequential per-id bulk operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BulkOperationResult {
    pub processed_ids: Vec<String>,
    pub success_count: usize,
    pub failure_count: usize,
    #[serde(default)]
    pub errors: Vec<BulkError>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_count: Option<usize>,
}

impl BulkOperationResult {
    pub fn record_success(&mut self, id: impl Into<String>) {
        self.processed_ids.push(id.into());
        self.success_count += 1;
    }

    pub fn record_failure(&mut self, id: impl Into<String>, message: impl Into<String>) {
        self.failure_count += 1;
        self.errors.push(BulkError {
            id: id.into(),
            message: message.into(),
        });
    }

    /// Mark this result as a delete: `deletedCount` mirrors `successCount`.
    #[must_use]
    pub const fn as_delete(mut self) -> Self {
        self.deleted_count = Some(self.success_count);
        self
    }

    /// Fold another summary (e.g. one batch of a chunked run) into this one.
    pub fn merge(&mut self, other: Self) {
        self.processed_ids.extend(other.processed_ids);
        self.success_count += other.success_count;
        self.failure_count += other.failure_count;
        self.errors.extend(other.errors);
        self.deleted_count = match (self.deleted_count, other.deleted_count) {
            (None, None) => None,
            (a, b) => Some(a.unwrap_or(0) + b.unwrap_or(0)),
        };
    }

    #[must_use]
    pub const fn is_complete_success(&self) -> bool {
        self.failure_count == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn pagination_derives_total_pages() {
        assert_eq!(Pagination::new(1, 20, 0).total_pages, 0);
        assert_eq!(Pagination::new(1, 20, 20).total_pages, 1);
        assert_eq!(Pagination::new(1, 20, 21).total_pages, 2);
        assert_eq!(Pagination::new(1, 0, 21).total_pages, 0);
    }

    #[test]
    fn failed_envelope_serializes_error_payload() {
        let resp: ApiResponse<String> = ApiResponse::fail(ApiFailure::not_found("Sponsor", "x"));
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["success"], false);
        assert!(json["data"].is_null());
        assert_eq!(json["error"]["code"], 404);
    }

    #[test]
    fn merge_sums_batches() {
        let mut first = BulkOperationResult::default();
        first.record_success("a");
        let mut second = BulkOperationResult::default();
        second.record_success("b");
        second.record_failure("c", "duplicate");

        first.merge(second);
        assert_eq!(first.processed_ids, vec!["a", "b"]);
        assert_eq!(first.success_count, 2);
        assert_eq!(first.failure_count, 1);
        assert_eq!(first.errors[0].id, "c");
        assert_eq!(first.deleted_count, None);
    }

    #[test]
    fn paginated_failure_keeps_window() {
        let resp: PaginatedResponse<u8> =
            PaginatedResponse::fail(ApiFailure::internal("boom"), 3, 10);
        assert!(!resp.success);
        assert!(resp.data.is_empty());
        assert_eq!(resp.pagination, Pagination::new(3, 10, 0));
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["pagination"]["totalPages"], 0);
    }

    #[test]
    fn bulk_result_counts() {
        let mut result = BulkOperationResult::default();
        result.record_success("a");
        result.record_failure("missing", "not found");
        result.record_success("b");
        assert_eq!(result.success_count, 2);
        assert_eq!(result.failure_count, 1);
        assert_eq!(result.processed_ids, vec!["a", "b"]);
        assert_eq!(result.errors[0].id, "missing");
        assert!(!result.is_complete_success());
        assert_eq!(result.as_delete().deleted_count, Some(2));
    }

    #[test]
    fn into_result_roundtrip() {
        assert_eq!(ApiResponse::ok(5).into_result(), Ok(5));
        let err = ApiResponse::<u8>::fail(ApiFailure::internal("x")).into_result();
        assert_eq!(err.unwrap_err().code, 500);
    }
}
