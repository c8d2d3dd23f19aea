use std::sync::Arc;

use alum_core::actions::SponsorBulkAction;
use alum_core::entities::Sponsor;
use alum_core::enums::{SponsorStatus, SponsorTier};
use alum_core::responses::{ApiResult, BulkOperationResult};
use alum_core::stats::{SponsorStats, breakdown};

use super::crud_delegates;
use crate::collection::MockCollection;
use crate::loader::MockDataLoader;

#[derive(Clone)]
pub struct SponsorsMock {
    sponsors: MockCollection<Sponsor>,
}

impl SponsorsMock {
    #[must_use]
    pub const fn new(loader: Arc<MockDataLoader>) -> Self {
        Self {
            sponsors: MockCollection::new(loader),
        }
    }

    crud_delegates!(sponsors: Sponsor);

    async fn set_status(&self, id: &str, status: SponsorStatus) -> ApiResult<Sponsor> {
        self.sponsors
            .modify(id, |sponsor| {
                sponsor.status = status;
                Ok(())
            })
            .await
    }

    /// # Errors
    ///
    /// 404 for unknown ids.
    pub async fn activate(&self, id: &str) -> ApiResult<Sponsor> {
        self.set_status(id, SponsorStatus::Active).await
    }

    /// # Errors
    ///
    /// 404 for unknown ids.
    pub async fn deactivate(&self, id: &str) -> ApiResult<Sponsor> {
        self.set_status(id, SponsorStatus::Inactive).await
    }

    /// Sponsors in `tier`, largest contribution first.
    pub async fn by_tier(&self, tier: SponsorTier) -> Vec<Sponsor> {
        let mut sponsors: Vec<Sponsor> = self
            .sponsors
            .all()
            .await
            .into_iter()
            .filter(|s| s.tier == tier)
            .collect();
        sponsors.sort_by(|a, b| b.contribution_amount.total_cmp(&a.contribution_amount));
        sponsors
    }

    pub async fn stats(&self) -> SponsorStats {
        let sponsors = self.sponsors.all().await;
        SponsorStats {
            total: sponsors.len(),
            by_tier: breakdown(&sponsors, |s| s.tier.as_str()),
            by_status: breakdown(&sponsors, |s| s.status.as_str()),
            total_contribution: sponsors.iter().map(|s| s.contribution_amount).sum(),
        }
    }

    pub async fn bulk(&self, ids: &[String], action: SponsorBulkAction) -> BulkOperationResult {
        let status = match action {
            SponsorBulkAction::Delete => return self.sponsors.delete_many(ids).await,
            SponsorBulkAction::Activate => SponsorStatus::Active,
            SponsorBulkAction::Deactivate => SponsorStatus::Inactive,
        };
        self.sponsors
            .bulk(ids, |id| async move { self.set_status(&id, status).await.map(|_| ()) })
            .await
    }

    pub async fn export(&self) -> Vec<Sponsor> {
        self.sponsors.export().await
    }

    pub async fn import(&self, sponsors: Vec<Sponsor>) -> BulkOperationResult {
        self.sponsors.import(sponsors).await
    }
}
