//! The mock data loader: whole-collection reads through a TTL cache and
//! fail-soft writes against a json-server style backend.
//!
//! Nothing here returns an error. Reads degrade to `[]`, writes to
//! `None`/`false`, and every call is a no-op while the mode resolver says
//! "real", so a mock-labelled call path can never touch a live backend.

use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use alum_config::{MockConfig, ModeResolver};
use alum_core::responses::ApiResult;
use alum_http::envelope::{normalize_body, normalize_list};
use alum_http::{RawResponse, check_response, transport_failure};
use reqwest::Method;
use serde_json::Value;

use crate::cache::{CollectionCache, TtlCache};
use crate::error::MockError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Warning categories; each is logged at `warn` level once per loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarnCategory {
    Fetch,
    Create,
    Update,
    Patch,
    Delete,
    Decode,
}

impl WarnCategory {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fetch => "fetch",
            Self::Create => "create",
            Self::Update => "update",
            Self::Patch => "patch",
            Self::Delete => "delete",
            Self::Decode => "decode",
        }
    }
}

impl fmt::Display for WarnCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub struct MockDataLoader {
    http: reqwest::Client,
    base_url: String,
    cache: Arc<dyn CollectionCache>,
    resolver: Arc<ModeResolver>,
    synthesize_demo_data: bool,
    warned: Mutex<HashSet<WarnCategory>>,
}

impl fmt::Debug for MockDataLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockDataLoader")
            .field("base_url", &self.base_url)
            .field("resolver", &self.resolver)
            .field("synthesize_demo_data", &self.synthesize_demo_data)
            .finish_non_exhaustive()
    }
}

impl MockDataLoader {
    /// # Errors
    ///
    /// Returns [`MockError::HttpClient`] if the HTTP client cannot be built.
    pub fn new(
        config: &MockConfig,
        resolver: Arc<ModeResolver>,
        cache: Arc<dyn CollectionCache>,
    ) -> Result<Self, MockError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            base_url: config.normalized_base_url().to_string(),
            cache,
            resolver,
            synthesize_demo_data: config.synthesize_demo_data,
            warned: Mutex::new(HashSet::new()),
        })
    }

    /// Loader with a [`TtlCache`] on the system clock using
    /// `config.cache_ttl_ms`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::new`].
    pub fn from_config(
        config: &MockConfig,
        resolver: Arc<ModeResolver>,
    ) -> Result<Self, MockError> {
        let cache = Arc::new(TtlCache::new(Duration::from_millis(config.cache_ttl_ms)));
        Self::new(config, resolver, cache)
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.resolver.use_mock()
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub const fn cache(&self) -> &Arc<dyn CollectionCache> {
        &self.cache
    }

    #[must_use]
    pub const fn resolver(&self) -> &Arc<ModeResolver> {
        &self.resolver
    }

    #[must_use]
    pub const fn synthesize_demo_data(&self) -> bool {
        self.synthesize_demo_data
    }

    pub fn invalidate(&self, collection: &str) {
        self.cache.invalidate(collection);
    }

    fn collection_url(&self, collection: &str) -> String {
        format!("{}/{collection}", self.base_url)
    }

    fn item_url(&self, collection: &str, id: &str) -> String {
        format!("{}/{collection}/{}", self.base_url, urlencoding::encode(id))
    }

    /// Log at `warn` the first time a category fails, `debug` afterwards.
    pub fn warn_once(&self, category: WarnCategory, collection: &str, error: &dyn fmt::Display) {
        let first = self
            .warned
            .lock()
            .map(|mut warned| warned.insert(category))
            .unwrap_or(false);
        if first {
            tracing::warn!(%category, collection, %error, "mock backend request failed");
        } else {
            tracing::debug!(%category, collection, %error, "mock backend request failed");
        }
    }

    async fn request(&self, method: Method, url: &str, body: Option<&Value>) -> ApiResult<RawResponse> {
        let mut request = self.http.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }
        let resp = request.send().await.map_err(transport_failure)?;
        check_response(resp).await
    }

    /// GET `{base}/{collection}`, through the cache.
    ///
    /// Accepts a bare array or a `{data: [...]}` envelope. Failures are not
    /// cached, so the next call tries again.
    pub async fn fetch_collection(&self, collection: &str) -> Vec<Value> {
        if !self.is_enabled() {
            tracing::debug!(collection, "mock backend disabled; fetch skipped");
            return Vec::new();
        }
        if let Some(items) = self.cache.get(collection) {
            tracing::debug!(collection, items = items.len(), "mock cache hit");
            return items;
        }
        tracing::debug!(collection, "mock cache miss");

        let result = self
            .request(Method::GET, &self.collection_url(collection), None)
            .await
            .and_then(|raw| normalize_list(raw.body, raw.total_count));
        match result {
            Ok(list) => {
                self.cache.set(collection, list.items.clone());
                list.items
            }
            Err(e) => {
                self.warn_once(WarnCategory::Fetch, collection, &e);
                Vec::new()
            }
        }
    }

    async fn write(
        &self,
        category: WarnCategory,
        method: Method,
        collection: &str,
        url: &str,
        body: Option<&Value>,
    ) -> Option<Value> {
        if !self.is_enabled() {
            tracing::debug!(%category, collection, "mock backend disabled; write skipped");
            return None;
        }
        let result = self
            .request(method, url, body)
            .await
            .and_then(|raw| normalize_body(raw.body));
        match result {
            Ok(value) => {
                self.cache.invalidate(collection);
                Some(value)
            }
            Err(e) => {
                self.warn_once(category, collection, &e);
                None
            }
        }
    }

    /// POST a new record; returns the stored record.
    pub async fn create_item(&self, collection: &str, item: &Value) -> Option<Value> {
        let url = self.collection_url(collection);
        self.write(WarnCategory::Create, Method::POST, collection, &url, Some(item))
            .await
    }

    /// PUT a full replacement of record `id`.
    pub async fn put_item(&self, collection: &str, id: &str, item: &Value) -> Option<Value> {
        let url = self.item_url(collection, id);
        self.write(WarnCategory::Update, Method::PUT, collection, &url, Some(item))
            .await
    }

    /// PATCH record `id` with the given fields.
    pub async fn patch_item(&self, collection: &str, id: &str, patch: &Value) -> Option<Value> {
        let url = self.item_url(collection, id);
        self.write(WarnCategory::Patch, Method::PATCH, collection, &url, Some(patch))
            .await
    }

    /// DELETE record `id`; `true` when the backend confirmed it.
    pub async fn delete_item(&self, collection: &str, id: &str) -> bool {
        let url = self.item_url(collection, id);
        self.write(WarnCategory::Delete, Method::DELETE, collection, &url, None)
            .await
            .is_some()
    }

    /// Reachability check for health reporting; bypasses cache and mode.
    ///
    /// # Errors
    ///
    /// Returns the transport or status failure.
    pub async fn probe(&self) -> ApiResult<()> {
        self.request(Method::GET, &format!("{}/db", self.base_url), None)
            .await
            .map(|_| ())
    }
}
