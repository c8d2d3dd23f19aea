use std::sync::Arc;

use alum_core::entities::Opportunity;
use alum_core::responses::ApiResponse;
use alum_core::stats::OpportunityStats;
use alum_http::Endpoints;
use chrono::Utc;
use serde_json::json;

use crate::context::Backend;
use crate::facade::{RealCollection, facade_crud};

#[derive(Clone)]
pub struct OpportunitiesService {
    backend: Backend,
    real: RealCollection<Opportunity>,
}

impl OpportunitiesService {
    #[must_use]
    pub fn new(backend: Backend) -> Self {
        let real = RealCollection::new(Arc::clone(backend.client()), Endpoints::OPPORTUNITIES);
        Self { backend, real }
    }

    facade_crud!(Opportunity, opportunities);

    pub async fn publish(&self, id: &str) -> ApiResponse<Opportunity> {
        let mocks = self.backend.mocks();
        let result = self
            .backend
            .route(mocks.opportunities.publish(id), self.real.action(id, "publish", &json!({})))
            .await;
        ApiResponse::from_result_with_message(result, "Opportunity published")
    }

    pub async fn close(&self, id: &str) -> ApiResponse<Opportunity> {
        let mocks = self.backend.mocks();
        let result = self
            .backend
            .route(mocks.opportunities.close(id), self.real.action(id, "close", &json!({})))
            .await;
        ApiResponse::from_result(result)
    }

    /// Apply as `user_id`. Closed, expired or repeated applications are 409.
    pub async fn apply(&self, id: &str, user_id: &str) -> ApiResponse<Opportunity> {
        let mocks = self.backend.mocks();
        let body = json!({ "userId": user_id });
        let result = self
            .backend
            .route(
                mocks.opportunities.apply(id, user_id, Utc::now()),
                self.real.action(id, "apply", &body),
            )
            .await;
        ApiResponse::from_result_with_message(result, "Application submitted")
    }

    pub async fn stats(&self) -> ApiResponse<OpportunityStats> {
        let mocks = self.backend.mocks();
        let result = self
            .backend
            .route(async { Ok(mocks.opportunities.stats().await) }, self.real.stats())
            .await;
        ApiResponse::from_result(result)
    }
}
