//! Typed CRUD over one mock collection.

use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;

use alum_core::errors::CoreError;
use alum_core::ids::{generate_id, prefix_for_collection};
use alum_core::resource::Resource;
use alum_core::responses::{ApiFailure, ApiResult, BulkOperationResult, Page};
use alum_http::ListQuery;
use chrono::Utc;
use serde_json::{Map, Value};

use crate::loader::{MockDataLoader, WarnCategory};
use crate::query::apply_query;

/// A typed view of collection `R::COLLECTION` served by the mock loader.
///
/// Reads go through the loader's cache; writes invalidate it. Unlike the
/// loader, operations here report failures as [`ApiFailure`]s: 404 for
/// unknown ids, 409 for duplicate ids, 422 for patches that do not fit the
/// record and for stored records that no longer decode, 500 when the mock
/// backend refused a write.
pub struct MockCollection<R> {
    loader: Arc<MockDataLoader>,
    _record: PhantomData<fn() -> R>,
}

impl<R> Clone for MockCollection<R> {
    fn clone(&self) -> Self {
        Self {
            loader: Arc::clone(&self.loader),
            _record: PhantomData,
        }
    }
}

impl<R: Resource> MockCollection<R> {
    #[must_use]
    pub const fn new(loader: Arc<MockDataLoader>) -> Self {
        Self {
            loader,
            _record: PhantomData,
        }
    }

    #[must_use]
    pub const fn loader(&self) -> &Arc<MockDataLoader> {
        &self.loader
    }

    fn decode(&self, value: Value) -> Option<R> {
        serde_json::from_value(value)
            .map_err(|e| self.loader.warn_once(WarnCategory::Decode, R::COLLECTION, &e))
            .ok()
    }

    fn encode(record: &R) -> ApiResult<Value> {
        serde_json::to_value(record)
            .map_err(|e| ApiFailure::internal(format!("failed to encode {}: {e}", R::ENTITY)))
    }

    fn write_failed(action: &str) -> ApiFailure {
        ApiFailure::internal(format!("mock backend failed to {action} {}", R::ENTITY))
    }

    /// Raw records; undecoded.
    pub async fn raw(&self) -> Vec<Value> {
        self.loader.fetch_collection(R::COLLECTION).await
    }

    /// Every record that decodes; undecodable ones are skipped.
    pub async fn all(&self) -> Vec<R> {
        self.raw()
            .await
            .into_iter()
            .filter_map(|v| self.decode(v))
            .collect()
    }

    /// Filter, sort and paginate per `query`. Records that do not decode are
    /// left out before counting, so `total` matches what can be listed.
    pub async fn list(&self, query: &ListQuery) -> Page<R> {
        let decodable: Vec<Value> = self
            .raw()
            .await
            .into_iter()
            .filter(|v| self.decode(v.clone()).is_some())
            .collect();
        let page = apply_query(&decodable, query);
        let items = page
            .items
            .into_iter()
            .filter_map(|v| self.decode(v))
            .collect();
        Page {
            items,
            total: page.total,
            page: page.page,
            limit: page.limit,
            total_pages: page.total_pages,
        }
    }

    /// The stored record with `id`, decoded or not.
    async fn find_raw(&self, id: &str) -> Option<Value> {
        self.raw().await.into_iter().find(|v| has_id(v, id))
    }

    async fn require_raw(&self, id: &str) -> ApiResult<Map<String, Value>> {
        match self.find_raw(id).await {
            Some(Value::Object(map)) => Ok(map),
            Some(_) => Ok(Map::new()),
            None => Err(ApiFailure::not_found(R::ENTITY, id)),
        }
    }

    /// # Errors
    ///
    /// 404 when no record has `id`; 422 when the stored record does not
    /// decode.
    pub async fn get(&self, id: &str) -> ApiResult<R> {
        let stored = self
            .find_raw(id)
            .await
            .ok_or_else(|| ApiFailure::not_found(R::ENTITY, id))?;
        serde_json::from_value(stored).map_err(|e| {
            CoreError::Malformed {
                entity: R::ENTITY.to_string(),
                id: id.to_string(),
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// Store a new record. An empty id is replaced by a generated one.
    ///
    /// # Errors
    ///
    /// 409 if the id is taken; 500 if the backend refused the write.
    pub async fn create(&self, mut draft: R) -> ApiResult<R> {
        if draft.id().is_empty() {
            draft.set_id(generate_id(prefix_for_collection(R::COLLECTION)));
        } else if self.find_raw(draft.id()).await.is_some() {
            return Err(ApiFailure::conflict(format!(
                "{} {} already exists",
                R::ENTITY,
                draft.id()
            )));
        }
        draft.stamp_created(Utc::now());

        let body = Self::encode(&draft)?;
        let stored = self
            .loader
            .create_item(R::COLLECTION, &body)
            .await
            .ok_or_else(|| Self::write_failed("create"))?;
        Ok(self.decode(stored).unwrap_or(draft))
    }

    /// Replace record `id`. The id inside `record` is forced to `id`; stored
    /// fields the record type does not model are carried over.
    ///
    /// Works on records that no longer decode, which makes it the way to
    /// repair one.
    ///
    /// # Errors
    ///
    /// 404 for unknown ids; 500 if the backend refused the write.
    pub async fn update(&self, id: &str, mut record: R) -> ApiResult<R> {
        let mut body = self.require_raw(id).await?;
        record.set_id(id.to_string());
        record.stamp_updated(Utc::now());
        if let Value::Object(fields) = Self::encode(&record)? {
            for (key, value) in fields {
                // Unset optionals stay absent rather than becoming `null`.
                if !value.is_null() || body.contains_key(&key) {
                    body.insert(key, value);
                }
            }
        }
        let stored = self
            .loader
            .put_item(R::COLLECTION, id, &Value::Object(body))
            .await
            .ok_or_else(|| Self::write_failed("update"))?;
        Ok(self.decode(stored).unwrap_or(record))
    }

    /// Load record `id`, let `change` edit it, and PATCH only the fields
    /// that changed (plus `updatedAt`).
    ///
    /// # Errors
    ///
    /// 404 for unknown ids, 422 for undecodable ones, whatever `change`
    /// returns, or 500 on a refused write.
    pub async fn modify<F>(&self, id: &str, change: F) -> ApiResult<R>
    where
        F: FnOnce(&mut R) -> ApiResult<()>,
    {
        let mut record = self.get(id).await?;
        let before = Self::encode(&record)?;
        change(&mut record)?;
        record.set_id(id.to_string());
        record.stamp_updated(Utc::now());
        let after = Self::encode(&record)?;

        let body = changed_fields(&before, &after);
        let stored = self
            .loader
            .patch_item(R::COLLECTION, id, &Value::Object(body))
            .await
            .ok_or_else(|| Self::write_failed("update"))?;
        Ok(self.decode(stored).unwrap_or(record))
    }

    /// Shallow-merge `patch` into record `id`. `id` in the patch is ignored.
    ///
    /// # Errors
    ///
    /// 404 for unknown ids; 422 when the merged record does not decode
    /// (e.g. an unknown status); 500 on a refused write.
    pub async fn patch(&self, id: &str, patch: &Value) -> ApiResult<R> {
        let Some(fields) = patch.as_object() else {
            return Err(ApiFailure::new(422, "patch must be a JSON object"));
        };
        let mut merged = self.require_raw(id).await?;
        for (key, value) in fields.iter().filter(|(k, _)| k.as_str() != "id") {
            merged.insert(key.clone(), value.clone());
        }
        let mut candidate: R = serde_json::from_value(Value::Object(merged))
            .map_err(|e| ApiFailure::new(422, format!("invalid {} patch: {e}", R::ENTITY)))?;
        candidate.stamp_updated(Utc::now());

        let mut body = fields.clone();
        body.remove("id");
        if let Some(updated_at) = Self::encode(&candidate)?.get("updatedAt") {
            body.insert("updatedAt".to_string(), updated_at.clone());
        }
        let stored = self
            .loader
            .patch_item(R::COLLECTION, id, &Value::Object(body))
            .await
            .ok_or_else(|| Self::write_failed("patch"))?;
        Ok(self.decode(stored).unwrap_or(candidate))
    }

    /// # Errors
    ///
    /// 404 for unknown ids; 500 on a refused delete.
    pub async fn delete(&self, id: &str) -> ApiResult<()> {
        self.require_raw(id).await?;
        if self.loader.delete_item(R::COLLECTION, id).await {
            Ok(())
        } else {
            Err(Self::write_failed("delete"))
        }
    }

    /// Run `op` for each id in order. A failing id is recorded and the rest
    /// still run; nothing is rolled back.
    pub async fn bulk<F, Fut>(&self, ids: &[String], mut op: F) -> BulkOperationResult
    where
        F: FnMut(String) -> Fut,
        Fut: Future<Output = ApiResult<()>>,
    {
        let mut result = BulkOperationResult::default();
        for id in ids {
            match op(id.clone()).await {
                Ok(()) => result.record_success(id.clone()),
                Err(e) => result.record_failure(id.clone(), e.message),
            }
        }
        result
    }

    pub async fn delete_many(&self, ids: &[String]) -> BulkOperationResult {
        self.bulk(ids, |id| async move { self.delete(&id).await })
            .await
            .as_delete()
    }

    pub async fn export(&self) -> Vec<R> {
        self.all().await
    }

    /// Create every record; failures are reported per record. Records
    /// without an id are reported as `#<index>`.
    pub async fn import(&self, records: Vec<R>) -> BulkOperationResult {
        let mut result = BulkOperationResult::default();
        for (index, record) in records.into_iter().enumerate() {
            let label = if record.id().is_empty() {
                format!("#{index}")
            } else {
                record.id().to_string()
            };
            match self.create(record).await {
                Ok(stored) => result.record_success(stored.id()),
                Err(e) => result.record_failure(label, e.message),
            }
        }
        result
    }

    pub fn invalidate(&self) {
        self.loader.invalidate(R::COLLECTION);
    }
}

fn has_id(record: &Value, id: &str) -> bool {
    match record.get("id") {
        Some(Value::String(s)) => s == id,
        Some(Value::Number(n)) => n.to_string() == id,
        _ => false,
    }
}

/// Top-level fields of `after` that differ from `before`; fields dropped
/// from `after` are sent as `null`. `id` is never included.
fn changed_fields(before: &Value, after: &Value) -> Map<String, Value> {
    let empty = Map::new();
    let before = before.as_object().unwrap_or(&empty);
    let after = after.as_object().unwrap_or(&empty);

    let mut changed: Map<String, Value> = after
        .iter()
        .filter(|(key, value)| before.get(key.as_str()) != Some(*value))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();
    for key in before.keys().filter(|key| !after.contains_key(key.as_str())) {
        changed.insert(key.clone(), Value::Null);
    }
    changed.remove("id");
    changed
}
