//! # alum-http
//!
//! Thin wrapper over `reqwest` for the real admin backend:
//! - [`ApiClient`]: verbs returning [`ApiResult`], bearer injection from the
//!   persisted `authToken`
//! - [`envelope`]: the one place response shapes are normalized
//! - [`Endpoints`]: per-entity REST path builders and [`fill_path`]
//! - [`ListQuery`]: pagination, sort and filter query parameters
//! - [`retry`]: fixed-delay retry and sequential batching helpers

mod client;
mod endpoints;
pub mod envelope;
mod http;
mod query;
pub mod retry;

pub use client::ApiClient;
pub use endpoints::{Endpoints, fill_path};
pub use http::{RawResponse, check_response, transport_failure};
pub use query::{ListQuery, SortDirection, SortSpec};

pub use alum_core::responses::{ApiFailure, ApiResult};
