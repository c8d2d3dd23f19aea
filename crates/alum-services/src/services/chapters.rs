use std::sync::Arc;

use alum_core::entities::Chapter;
use alum_core::responses::ApiResponse;
use alum_core::stats::ChapterStats;
use alum_http::Endpoints;
use serde_json::json;

use crate::context::Backend;
use crate::facade::{RealCollection, facade_crud};

#[derive(Clone)]
pub struct ChaptersService {
    backend: Backend,
    real: RealCollection<Chapter>,
}

impl ChaptersService {
    #[must_use]
    pub fn new(backend: Backend) -> Self {
        let real = RealCollection::new(Arc::clone(backend.client()), Endpoints::CHAPTERS);
        Self { backend, real }
    }

    facade_crud!(Chapter, chapters);

    pub async fn add_member(&self, id: &str, user_id: &str) -> ApiResponse<Chapter> {
        let mocks = self.backend.mocks();
        let body = json!({ "userId": user_id });
        let result = self
            .backend
            .route(
                mocks.chapters.add_member(id, user_id),
                self.real.action(id, "members", &body),
            )
            .await;
        ApiResponse::from_result(result)
    }

    /// Removing the chapter lead also clears `leadId`.
    pub async fn remove_member(&self, id: &str, user_id: &str) -> ApiResponse<Chapter> {
        let mocks = self.backend.mocks();
        let body = json!({ "userId": user_id });
        let result = self
            .backend
            .route(
                mocks.chapters.remove_member(id, user_id),
                self.real.action(id, "remove-member", &body),
            )
            .await;
        ApiResponse::from_result(result)
    }

    pub async fn activate(&self, id: &str) -> ApiResponse<Chapter> {
        let mocks = self.backend.mocks();
        let result = self
            .backend
            .route(mocks.chapters.activate(id), self.real.action(id, "activate", &json!({})))
            .await;
        ApiResponse::from_result(result)
    }

    pub async fn deactivate(&self, id: &str) -> ApiResponse<Chapter> {
        let mocks = self.backend.mocks();
        let result = self
            .backend
            .route(mocks.chapters.deactivate(id), self.real.action(id, "deactivate", &json!({})))
            .await;
        ApiResponse::from_result(result)
    }

    pub async fn stats(&self) -> ApiResponse<ChapterStats> {
        let mocks = self.backend.mocks();
        let result = self
            .backend
            .route(async { Ok(mocks.chapters.stats().await) }, self.real.stats())
            .await;
        ApiResponse::from_result(result)
    }
}
