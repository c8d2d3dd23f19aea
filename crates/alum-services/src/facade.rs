//! Shared plumbing for the facade services: the typed real-backend
//! collection and the envelope folds.

use std::marker::PhantomData;
use std::sync::Arc;

use alum_core::resource::Resource;
use alum_core::responses::{ApiResult, BulkOperationResult, Page};
use alum_http::{ApiClient, Endpoints, ListQuery};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

/// REST verbs for one entity on the real backend.
pub struct RealCollection<R> {
    client: Arc<ApiClient>,
    endpoints: Endpoints,
    _record: PhantomData<fn() -> R>,
}

impl<R> Clone for RealCollection<R> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            endpoints: self.endpoints,
            _record: PhantomData,
        }
    }
}

impl<R: Resource> RealCollection<R> {
    #[must_use]
    pub const fn new(client: Arc<ApiClient>, endpoints: Endpoints) -> Self {
        Self {
            client,
            endpoints,
            _record: PhantomData,
        }
    }

    #[must_use]
    pub const fn endpoints(&self) -> Endpoints {
        self.endpoints
    }

    #[must_use]
    pub const fn client(&self) -> &Arc<ApiClient> {
        &self.client
    }

    pub async fn list(&self, query: &ListQuery) -> ApiResult<Page<R>> {
        self.client.get_list(self.endpoints.base(), query).await
    }

    pub async fn get(&self, id: &str) -> ApiResult<R> {
        self.client.get(&self.endpoints.by_id(id)).await
    }

    pub async fn create(&self, draft: &R) -> ApiResult<R> {
        self.client.post(self.endpoints.base(), draft).await
    }

    pub async fn update(&self, id: &str, record: &R) -> ApiResult<R> {
        self.client.put(&self.endpoints.by_id(id), record).await
    }

    pub async fn patch(&self, id: &str, patch: &Value) -> ApiResult<R> {
        self.client.patch(&self.endpoints.by_id(id), patch).await
    }

    pub async fn delete(&self, id: &str) -> ApiResult<()> {
        self.client.delete(&self.endpoints.by_id(id)).await
    }

    /// POST `/{id}/{action}` with `body`.
    pub async fn action<T, B>(&self, id: &str, action: &str, body: &B) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.client.post(&self.endpoints.action(id, action), body).await
    }

    /// GET `/{id}/{sub}`, for nested reads such as analytics or sessions.
    pub async fn nested<T: DeserializeOwned>(&self, id: &str, sub: &str) -> ApiResult<T> {
        self.client.get(&self.endpoints.action(id, sub)).await
    }

    /// GET `/{segment}` below the collection root, e.g. `/api/events/upcoming`.
    pub async fn view<T: DeserializeOwned>(
        &self,
        segment: &str,
        params: &[(String, String)],
    ) -> ApiResult<T> {
        let path = format!("{}/{segment}", self.endpoints.base());
        self.client.get_with_params(&path, params).await
    }

    /// POST `/bulk` with `{action, ids}`.
    pub async fn bulk(&self, action: &str, ids: &[String]) -> ApiResult<BulkOperationResult> {
        self.client
            .post(&self.endpoints.bulk(), &json!({ "action": action, "ids": ids }))
            .await
    }

    pub async fn stats<T: DeserializeOwned>(&self) -> ApiResult<T> {
        self.client.get(&self.endpoints.stats()).await
    }

    pub async fn export(&self) -> ApiResult<Vec<R>> {
        self.client.get(&self.endpoints.export()).await
    }

    pub async fn import(&self, records: &[R]) -> ApiResult<BulkOperationResult> {
        self.client.post(&self.endpoints.import(), records).await
    }
}

/// A bulk call that failed as a whole counts every id as failed.
#[must_use]
pub fn bulk_from_result(ids: &[String], result: ApiResult<BulkOperationResult>) -> BulkOperationResult {
    match result {
        Ok(summary) => summary,
        Err(error) => {
            tracing::warn!(code = error.code, %error, ids = ids.len(), "bulk operation failed");
            let mut summary = BulkOperationResult::default();
            for id in ids {
                summary.record_failure(id.clone(), error.message.clone());
            }
            summary
        }
    }
}

/// CRUD facade methods over `self.real` and the matching mock in
/// `self.backend.mocks().$mock`.
macro_rules! facade_crud {
    ($record:ty, $mock:ident) => {
        /// Paginated list; failures become an empty, unsuccessful page.
        pub async fn list(
            &self,
            query: &::alum_http::ListQuery,
        ) -> ::alum_core::responses::PaginatedResponse<$record> {
            let mocks = self.backend.mocks();
            let result = self
                .backend
                .route(async { Ok(mocks.$mock.list(query).await) }, self.real.list(query))
                .await;
            ::alum_core::responses::PaginatedResponse::from_result(result, query.page, query.limit)
        }

        pub async fn get(&self, id: &str) -> ::alum_core::responses::ApiResponse<$record> {
            ::alum_core::responses::ApiResponse::from_result(self.try_get(id).await)
        }

        /// Single read that hands the failure to the caller instead of
        /// folding it into an envelope.
        ///
        /// # Errors
        ///
        /// 404 for unknown ids; transport failures on the real path.
        pub async fn try_get(&self, id: &str) -> ::alum_core::responses::ApiResult<$record> {
            let mocks = self.backend.mocks();
            self.backend
                .route(mocks.$mock.get(id), self.real.get(id))
                .await
        }

        pub async fn create(&self, draft: $record) -> ::alum_core::responses::ApiResponse<$record> {
            let mocks = self.backend.mocks();
            let result = self
                .backend
                .route(mocks.$mock.create(draft.clone()), self.real.create(&draft))
                .await;
            ::alum_core::responses::ApiResponse::from_result_with_message(
                result,
                format!("{} created", <$record as ::alum_core::resource::Resource>::ENTITY),
            )
        }

        pub async fn update(
            &self,
            id: &str,
            record: $record,
        ) -> ::alum_core::responses::ApiResponse<$record> {
            let mocks = self.backend.mocks();
            let result = self
                .backend
                .route(mocks.$mock.update(id, record.clone()), self.real.update(id, &record))
                .await;
            ::alum_core::responses::ApiResponse::from_result(result)
        }

        pub async fn patch(
            &self,
            id: &str,
            patch: &::serde_json::Value,
        ) -> ::alum_core::responses::ApiResponse<$record> {
            let mocks = self.backend.mocks();
            let result = self
                .backend
                .route(mocks.$mock.patch(id, patch), self.real.patch(id, patch))
                .await;
            ::alum_core::responses::ApiResponse::from_result(result)
        }

        pub async fn delete(&self, id: &str) -> ::alum_core::responses::ApiResponse<()> {
            let mocks = self.backend.mocks();
            let result = self
                .backend
                .route(mocks.$mock.delete(id), self.real.delete(id))
                .await;
            ::alum_core::responses::ApiResponse::from_result_with_message(
                result,
                format!("{} {id} deleted", <$record as ::alum_core::resource::Resource>::ENTITY),
            )
        }

        /// Delete every id; `deletedCount` reports how many went.
        pub async fn delete_many(&self, ids: &[String]) -> ::alum_core::responses::BulkOperationResult {
            if self.backend.use_mock() {
                self.backend.mocks().$mock.records().delete_many(ids).await
            } else {
                $crate::facade::bulk_from_result(ids, self.real.bulk("delete", ids).await).as_delete()
            }
        }
    };
}

pub(crate) use facade_crud;

#[cfg(test)]
mod tests {
    use super::*;
    use alum_core::responses::ApiFailure;
    use pretty_assertions::assert_eq;

    #[test]
    fn whole_bulk_failure_marks_every_id() {
        let ids = vec!["a".to_string(), "b".to_string()];
        let summary = bulk_from_result(&ids, Err(ApiFailure::internal("backend down")));
        assert_eq!(summary.success_count, 0);
        assert_eq!(summary.failure_count, 2);
        assert_eq!(summary.errors[1].id, "b");
        assert_eq!(summary.errors[1].message, "backend down");
    }

    #[test]
    fn successful_bulk_passes_through() {
        let mut ok = BulkOperationResult::default();
        ok.record_success("a");
        let summary = bulk_from_result(&["a".to_string()], Ok(ok.clone()));
        assert_eq!(summary, ok);
    }
}
