use std::sync::Arc;

use alum_core::actions::PartnerBulkAction;
use alum_core::entities::Partner;
use alum_core::enums::PartnerStatus;
use alum_core::resource::Resource;
use alum_core::responses::{ApiResult, BulkOperationResult};
use alum_core::stats::{PartnerStats, breakdown};

use super::{crud_delegates, invalid_transition};
use crate::collection::MockCollection;
use crate::loader::MockDataLoader;

#[derive(Clone)]
pub struct PartnersMock {
    partners: MockCollection<Partner>,
}

impl PartnersMock {
    #[must_use]
    pub const fn new(loader: Arc<MockDataLoader>) -> Self {
        Self {
            partners: MockCollection::new(loader),
        }
    }

    crud_delegates!(partners: Partner);

    /// Move a pending partner to active.
    ///
    /// # Errors
    ///
    /// 404 for unknown ids; 409 unless the partner is pending.
    pub async fn approve(&self, id: &str) -> ApiResult<Partner> {
        self.partners
            .modify(id, |partner| {
                if partner.status != PartnerStatus::Pending {
                    return Err(invalid_transition(
                        Partner::ENTITY,
                        id,
                        partner.status,
                        PartnerStatus::Active,
                    ));
                }
                partner.status = PartnerStatus::Active;
                Ok(())
            })
            .await
    }

    async fn set_status(&self, id: &str, status: PartnerStatus) -> ApiResult<Partner> {
        self.partners
            .modify(id, |partner| {
                partner.status = status;
                Ok(())
            })
            .await
    }

    /// # Errors
    ///
    /// 404 for unknown ids.
    pub async fn activate(&self, id: &str) -> ApiResult<Partner> {
        self.set_status(id, PartnerStatus::Active).await
    }

    /// # Errors
    ///
    /// 404 for unknown ids.
    pub async fn deactivate(&self, id: &str) -> ApiResult<Partner> {
        self.set_status(id, PartnerStatus::Inactive).await
    }

    pub async fn stats(&self) -> PartnerStats {
        let partners = self.partners.all().await;
        PartnerStats {
            total: partners.len(),
            by_type: breakdown(&partners, |p| p.partner_type.as_str()),
            by_status: breakdown(&partners, |p| p.status.as_str()),
        }
    }

    pub async fn bulk(&self, ids: &[String], action: PartnerBulkAction) -> BulkOperationResult {
        match action {
            PartnerBulkAction::Delete => self.partners.delete_many(ids).await,
            PartnerBulkAction::Approve => {
                self.partners
                    .bulk(ids, |id| async move { self.approve(&id).await.map(|_| ()) })
                    .await
            }
            PartnerBulkAction::Activate | PartnerBulkAction::Deactivate => {
                let status = if action == PartnerBulkAction::Activate {
                    PartnerStatus::Active
                } else {
                    PartnerStatus::Inactive
                };
                self.partners
                    .bulk(ids, |id| async move { self.set_status(&id, status).await.map(|_| ()) })
                    .await
            }
        }
    }
}
