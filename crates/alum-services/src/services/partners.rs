use std::sync::Arc;

use alum_core::actions::PartnerBulkAction;
use alum_core::entities::Partner;
use alum_core::responses::{ApiResponse, BulkOperationResult};
use alum_core::stats::PartnerStats;
use alum_http::Endpoints;
use serde_json::json;

use crate::context::Backend;
use crate::facade::{RealCollection, bulk_from_result, facade_crud};

#[derive(Clone)]
pub struct PartnersService {
    backend: Backend,
    real: RealCollection<Partner>,
}

impl PartnersService {
    #[must_use]
    pub fn new(backend: Backend) -> Self {
        let real = RealCollection::new(Arc::clone(backend.client()), Endpoints::PARTNERS);
        Self { backend, real }
    }

    facade_crud!(Partner, partners);

    /// Approve a pending partner; anything else is 409.
    pub async fn approve(&self, id: &str) -> ApiResponse<Partner> {
        let mocks = self.backend.mocks();
        let result = self
            .backend
            .route(mocks.partners.approve(id), self.real.action(id, "approve", &json!({})))
            .await;
        ApiResponse::from_result_with_message(result, "Partner approved")
    }

    pub async fn activate(&self, id: &str) -> ApiResponse<Partner> {
        let mocks = self.backend.mocks();
        let result = self
            .backend
            .route(mocks.partners.activate(id), self.real.action(id, "activate", &json!({})))
            .await;
        ApiResponse::from_result(result)
    }

    pub async fn deactivate(&self, id: &str) -> ApiResponse<Partner> {
        let mocks = self.backend.mocks();
        let result = self
            .backend
            .route(mocks.partners.deactivate(id), self.real.action(id, "deactivate", &json!({})))
            .await;
        ApiResponse::from_result(result)
    }

    pub async fn stats(&self) -> ApiResponse<PartnerStats> {
        let mocks = self.backend.mocks();
        let result = self
            .backend
            .route(async { Ok(mocks.partners.stats().await) }, self.real.stats())
            .await;
        ApiResponse::from_result(result)
    }

    pub async fn bulk_operation(&self, ids: &[String], action: PartnerBulkAction) -> BulkOperationResult {
        if self.backend.use_mock() {
            return self.backend.mocks().partners.bulk(ids, action).await;
        }
        let summary = bulk_from_result(ids, self.real.bulk(action.as_str(), ids).await);
        if action == PartnerBulkAction::Delete {
            summary.as_delete()
        } else {
            summary
        }
    }
}
