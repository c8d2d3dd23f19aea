use std::sync::Arc;

use alum_core::actions::SponsorBulkAction;
use alum_core::entities::Sponsor;
use alum_core::enums::SponsorTier;
use alum_core::responses::{ApiResponse, BulkOperationResult};
use alum_core::stats::SponsorStats;
use alum_http::Endpoints;
use alum_http::retry::run_in_batches;
use serde_json::json;

use crate::context::Backend;
use crate::facade::{RealCollection, bulk_from_result, facade_crud};

/// Records sent per import request on the real backend.
pub const IMPORT_BATCH_SIZE: usize = 50;

#[derive(Clone)]
pub struct SponsorsService {
    backend: Backend,
    real: RealCollection<Sponsor>,
}

impl SponsorsService {
    #[must_use]
    pub fn new(backend: Backend) -> Self {
        let real = RealCollection::new(Arc::clone(backend.client()), Endpoints::SPONSORS);
        Self { backend, real }
    }

    facade_crud!(Sponsor, sponsors);

    pub async fn activate(&self, id: &str) -> ApiResponse<Sponsor> {
        let mocks = self.backend.mocks();
        let result = self
            .backend
            .route(mocks.sponsors.activate(id), self.real.action(id, "activate", &json!({})))
            .await;
        ApiResponse::from_result_with_message(result, "Sponsor activated")
    }

    pub async fn deactivate(&self, id: &str) -> ApiResponse<Sponsor> {
        let mocks = self.backend.mocks();
        let result = self
            .backend
            .route(mocks.sponsors.deactivate(id), self.real.action(id, "deactivate", &json!({})))
            .await;
        ApiResponse::from_result_with_message(result, "Sponsor deactivated")
    }

    /// Sponsors of one tier, largest contribution first.
    pub async fn by_tier(&self, tier: SponsorTier) -> ApiResponse<Vec<Sponsor>> {
        let mocks = self.backend.mocks();
        let params = [("tier".to_string(), tier.as_str().to_string())];
        let result = self
            .backend
            .route(
                async { Ok(mocks.sponsors.by_tier(tier).await) },
                self.real.view("by-tier", &params),
            )
            .await;
        ApiResponse::from_result(result)
    }

    pub async fn stats(&self) -> ApiResponse<SponsorStats> {
        let mocks = self.backend.mocks();
        let result = self
            .backend
            .route(async { Ok(mocks.sponsors.stats().await) }, self.real.stats())
            .await;
        ApiResponse::from_result(result)
    }

    pub async fn bulk_operation(&self, ids: &[String], action: SponsorBulkAction) -> BulkOperationResult {
        if self.backend.use_mock() {
            return self.backend.mocks().sponsors.bulk(ids, action).await;
        }
        let summary = bulk_from_result(ids, self.real.bulk(action.as_str(), ids).await);
        if action == SponsorBulkAction::Delete {
            summary.as_delete()
        } else {
            summary
        }
    }

    pub async fn export(&self) -> ApiResponse<Vec<Sponsor>> {
        let mocks = self.backend.mocks();
        let result = self
            .backend
            .route(async { Ok(mocks.sponsors.export().await) }, self.real.export())
            .await;
        ApiResponse::from_result(result)
    }

    /// Create every record. On the real backend records go out in batches
    /// of [`IMPORT_BATCH_SIZE`]; a failed request counts each record of its
    /// batch as failed.
    pub async fn import(&self, sponsors: Vec<Sponsor>) -> BulkOperationResult {
        if self.backend.use_mock() {
            return self.backend.mocks().sponsors.import(sponsors).await;
        }
        let labelled: Vec<(String, Sponsor)> = sponsors
            .into_iter()
            .enumerate()
            .map(|(index, s)| {
                let label = if s.id.is_empty() {
                    format!("#{index}")
                } else {
                    s.id.clone()
                };
                (label, s)
            })
            .collect();

        let batches = run_in_batches(labelled, IMPORT_BATCH_SIZE, |batch| async move {
            let (ids, records): (Vec<String>, Vec<Sponsor>) = batch.into_iter().unzip();
            bulk_from_result(&ids, self.real.import(&records).await)
        })
        .await;

        let mut summary = BulkOperationResult::default();
        for batch in batches {
            summary.merge(batch);
        }
        summary
    }
}
