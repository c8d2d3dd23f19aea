//! The API client: typed verbs over the real backend.

use std::sync::Arc;
use std::time::Duration;

use alum_config::ApiConfig;
use alum_core::responses::{ApiFailure, ApiResult, Page, Pagination};
use alum_core::state::{KEY_AUTH_TOKEN, KeyValueStore};
use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::envelope::{decode, normalize_body, normalize_list};
use crate::http::{RawResponse, check_response, transport_failure};
use crate::query::{ListQuery, encode_params};

/// HTTP client for the admin backend.
///
/// Every verb returns [`ApiResult`]; envelopes are unwrapped before the
/// caller sees the data. There are no retries at this layer.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token_store: Option<Arc<dyn KeyValueStore>>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("has_token_store", &self.token_store.is_some())
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Build a client for `config.base_url`.
    ///
    /// When `token_store` holds a non-empty `authToken`, every request
    /// carries `Authorization: Bearer <token>`. The token is read per request
    /// so a later sign-in takes effect without rebuilding the client.
    ///
    /// # Errors
    ///
    /// Returns a 500 [`ApiFailure`] if the underlying HTTP client cannot be
    /// built (e.g. no TLS backend).
    pub fn new(
        config: &ApiConfig,
        token_store: Option<Arc<dyn KeyValueStore>>,
    ) -> ApiResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("alum/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ApiFailure::internal(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            http,
            base_url: config.normalized_base_url().to_string(),
            token_store,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a path such as `/api/events`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }

    fn bearer_token(&self) -> Option<String> {
        self.token_store
            .as_ref()
            .and_then(|store| store.get_item(KEY_AUTH_TOKEN))
            .filter(|token| !token.trim().is_empty())
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        params: &[(String, String)],
        body: Option<Value>,
    ) -> ApiResult<RawResponse> {
        let mut url = self.url(path);
        if !params.is_empty() {
            url.push('?');
            url.push_str(&encode_params(params));
        }
        tracing::debug!(%method, %url, "api request");

        let mut request = self.http.request(method, &url);
        if let Some(token) = self.bearer_token() {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let resp = request.send().await.map_err(transport_failure)?;
        check_response(resp).await
    }

    async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> ApiResult<Value> {
        let body = serde_json::to_value(body)
            .map_err(|e| ApiFailure::bad_request(format!("unserializable request body: {e}")))?;
        let raw = self.send(method, path, &[], Some(body)).await?;
        normalize_body(raw.body)
    }

    /// GET a single resource.
    ///
    /// # Errors
    ///
    /// Non-2xx status, transport failure, failed envelope, or a body that
    /// does not decode into `T`.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.get_with_params(path, &[]).await
    }

    /// GET with explicit query parameters.
    ///
    /// # Errors
    ///
    /// Same as [`Self::get`].
    pub async fn get_with_params<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(String, String)],
    ) -> ApiResult<T> {
        let raw = self.send(Method::GET, path, params, None).await?;
        decode(normalize_body(raw.body)?)
    }

    /// GET a paginated list.
    ///
    /// The total comes from envelope pagination, `X-Total-Count`, or the
    /// array length, in that order. A backend that ignored the pagination
    /// parameters and returned everything is paginated here.
    ///
    /// # Errors
    ///
    /// Same as [`Self::get`].
    pub async fn get_list<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &ListQuery,
    ) -> ApiResult<Page<T>> {
        let raw = self.send(Method::GET, path, &query.to_params(), None).await?;
        let list = normalize_list(raw.body, raw.total_count)?;

        let pagination = list
            .pagination
            .unwrap_or_else(|| Pagination::new(query.page, query.limit, list.total));

        let items = if list.server_paginated {
            list.items
        } else {
            let start = query.page.saturating_sub(1).saturating_mul(query.limit);
            list.items
                .into_iter()
                .skip(start)
                .take(query.limit)
                .collect()
        };

        let items = items
            .into_iter()
            .map(decode::<T>)
            .collect::<ApiResult<Vec<T>>>()?;

        Ok(Page {
            items,
            total: pagination.total,
            page: pagination.page,
            limit: pagination.limit,
            total_pages: pagination.total_pages,
        })
    }

    /// POST a JSON body.
    ///
    /// # Errors
    ///
    /// Same as [`Self::get`].
    pub async fn post<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        decode(self.send_json(Method::POST, path, body).await?)
    }

    /// PUT a full replacement.
    ///
    /// # Errors
    ///
    /// Same as [`Self::get`].
    pub async fn put<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        decode(self.send_json(Method::PUT, path, body).await?)
    }

    /// PATCH a partial update.
    ///
    /// # Errors
    ///
    /// Same as [`Self::get`].
    pub async fn patch<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        decode(self.send_json(Method::PATCH, path, body).await?)
    }

    /// DELETE a resource. Any response body is ignored unless it is a failed
    /// envelope.
    ///
    /// # Errors
    ///
    /// Non-2xx status, transport failure, or a failed envelope.
    pub async fn delete(&self, path: &str) -> ApiResult<()> {
        let raw = self.send(Method::DELETE, path, &[], None).await?;
        normalize_body(raw.body).map(|_| ())
    }
}
