use std::sync::Arc;

use alum_core::entities::Opportunity;
use alum_core::enums::OpportunityStatus;
use alum_core::resource::Resource;
use alum_core::responses::{ApiFailure, ApiResult};
use alum_core::stats::{OpportunityStats, breakdown};
use chrono::{DateTime, Utc};

use super::{crud_delegates, invalid_transition};
use crate::collection::MockCollection;
use crate::loader::MockDataLoader;

#[derive(Clone)]
pub struct OpportunitiesMock {
    opportunities: MockCollection<Opportunity>,
}

impl OpportunitiesMock {
    #[must_use]
    pub const fn new(loader: Arc<MockDataLoader>) -> Self {
        Self {
            opportunities: MockCollection::new(loader),
        }
    }

    crud_delegates!(opportunities: Opportunity);

    /// # Errors
    ///
    /// 404 for unknown ids; 409 unless the opportunity is a draft.
    pub async fn publish(&self, id: &str) -> ApiResult<Opportunity> {
        self.opportunities
            .modify(id, |o| {
                if o.status != OpportunityStatus::Draft {
                    return Err(invalid_transition(
                        Opportunity::ENTITY,
                        id,
                        o.status,
                        OpportunityStatus::Open,
                    ));
                }
                o.status = OpportunityStatus::Open;
                Ok(())
            })
            .await
    }

    /// # Errors
    ///
    /// 404 for unknown ids; 409 when already closed.
    pub async fn close(&self, id: &str) -> ApiResult<Opportunity> {
        self.opportunities
            .modify(id, |o| {
                if o.status == OpportunityStatus::Closed {
                    return Err(invalid_transition(
                        Opportunity::ENTITY,
                        id,
                        o.status,
                        OpportunityStatus::Closed,
                    ));
                }
                o.status = OpportunityStatus::Closed;
                Ok(())
            })
            .await
    }

    /// Record an application as of `now`.
    ///
    /// # Errors
    ///
    /// 404 for unknown ids. 409 when the opportunity is not open, its
    /// deadline has passed, or the user already applied.
    pub async fn apply(&self, id: &str, user_id: &str, now: DateTime<Utc>) -> ApiResult<Opportunity> {
        self.opportunities
            .modify(id, |o| {
                if o.status != OpportunityStatus::Open {
                    return Err(ApiFailure::conflict(format!(
                        "Opportunity {id} is not accepting applications"
                    )));
                }
                if o.deadline.is_some_and(|d| d < now) {
                    return Err(ApiFailure::conflict(format!(
                        "The deadline for opportunity {id} has passed"
                    )));
                }
                if o.applicant_ids.iter().any(|a| a == user_id) {
                    return Err(ApiFailure::conflict(format!(
                        "User {user_id} already applied to opportunity {id}"
                    )));
                }
                o.applicant_ids.push(user_id.to_string());
                Ok(())
            })
            .await
    }

    pub async fn stats(&self) -> OpportunityStats {
        let opportunities = self.opportunities.all().await;
        OpportunityStats {
            total: opportunities.len(),
            by_type: breakdown(&opportunities, |o| o.opportunity_type.as_str()),
            by_status: breakdown(&opportunities, |o| o.status.as_str()),
            total_applicants: opportunities.iter().map(|o| o.applicant_ids.len()).sum(),
        }
    }
}
