use std::sync::Arc;

use alum_core::entities::Spotlight;
use alum_core::responses::ApiResponse;
use alum_core::stats::SpotlightStats;
use alum_http::Endpoints;
use serde_json::json;

use crate::context::Backend;
use crate::facade::{RealCollection, facade_crud};

#[derive(Clone)]
pub struct SpotlightsService {
    backend: Backend,
    real: RealCollection<Spotlight>,
}

impl SpotlightsService {
    #[must_use]
    pub fn new(backend: Backend) -> Self {
        let real = RealCollection::new(Arc::clone(backend.client()), Endpoints::SPOTLIGHTS);
        Self { backend, real }
    }

    facade_crud!(Spotlight, spotlights);

    pub async fn publish(&self, id: &str) -> ApiResponse<Spotlight> {
        let mocks = self.backend.mocks();
        let result = self
            .backend
            .route(mocks.spotlights.publish(id), self.real.action(id, "publish", &json!({})))
            .await;
        ApiResponse::from_result_with_message(result, "Spotlight published")
    }

    /// Archiving also drops the featured flag.
    pub async fn archive(&self, id: &str) -> ApiResponse<Spotlight> {
        let mocks = self.backend.mocks();
        let result = self
            .backend
            .route(mocks.spotlights.archive(id), self.real.action(id, "archive", &json!({})))
            .await;
        ApiResponse::from_result(result)
    }

    pub async fn set_featured(&self, id: &str, featured: bool) -> ApiResponse<Spotlight> {
        let mocks = self.backend.mocks();
        let body = json!({ "featured": featured });
        let result = self
            .backend
            .route(
                mocks.spotlights.set_featured(id, featured),
                self.real.action(id, "feature", &body),
            )
            .await;
        ApiResponse::from_result(result)
    }

    pub async fn featured(&self) -> ApiResponse<Vec<Spotlight>> {
        let mocks = self.backend.mocks();
        let result = self
            .backend
            .route(
                async { Ok(mocks.spotlights.featured().await) },
                self.real.view("featured", &[]),
            )
            .await;
        ApiResponse::from_result(result)
    }

    pub async fn stats(&self) -> ApiResponse<SpotlightStats> {
        let mocks = self.backend.mocks();
        let result = self
            .backend
            .route(async { Ok(mocks.spotlights.stats().await) }, self.real.stats())
            .await;
        ApiResponse::from_result(result)
    }
}
