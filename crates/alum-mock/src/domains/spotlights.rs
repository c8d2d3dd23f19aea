use std::sync::Arc;

use alum_core::entities::Spotlight;
use alum_core::enums::SpotlightStatus;
use alum_core::resource::Resource;
use alum_core::responses::{ApiFailure, ApiResult};
use alum_core::stats::{SpotlightStats, breakdown};
use chrono::Utc;

use super::{crud_delegates, invalid_transition};
use crate::collection::MockCollection;
use crate::loader::MockDataLoader;

#[derive(Clone)]
pub struct SpotlightsMock {
    spotlights: MockCollection<Spotlight>,
}

impl SpotlightsMock {
    #[must_use]
    pub const fn new(loader: Arc<MockDataLoader>) -> Self {
        Self {
            spotlights: MockCollection::new(loader),
        }
    }

    crud_delegates!(spotlights: Spotlight);

    /// # Errors
    ///
    /// 404 for unknown ids; 409 when already published.
    pub async fn publish(&self, id: &str) -> ApiResult<Spotlight> {
        self.spotlights
            .modify(id, |s| {
                if s.status == SpotlightStatus::Published {
                    return Err(invalid_transition(
                        Spotlight::ENTITY,
                        id,
                        s.status,
                        SpotlightStatus::Published,
                    ));
                }
                s.status = SpotlightStatus::Published;
                s.published_at = Some(Utc::now());
                Ok(())
            })
            .await
    }

    /// Archiving also un-features the spotlight.
    ///
    /// # Errors
    ///
    /// 404 for unknown ids.
    pub async fn archive(&self, id: &str) -> ApiResult<Spotlight> {
        self.spotlights
            .modify(id, |s| {
                s.status = SpotlightStatus::Archived;
                s.featured = false;
                Ok(())
            })
            .await
    }

    /// # Errors
    ///
    /// 404 for unknown ids; 409 when featuring an unpublished spotlight.
    pub async fn set_featured(&self, id: &str, featured: bool) -> ApiResult<Spotlight> {
        self.spotlights
            .modify(id, |s| {
                if featured && s.status != SpotlightStatus::Published {
                    return Err(ApiFailure::conflict(format!(
                        "Spotlight {id} must be published before it can be featured"
                    )));
                }
                s.featured = featured;
                Ok(())
            })
            .await
    }

    /// Published, featured spotlights, most recently published first.
    pub async fn featured(&self) -> Vec<Spotlight> {
        let mut featured: Vec<Spotlight> = self
            .spotlights
            .all()
            .await
            .into_iter()
            .filter(|s| s.featured && s.status == SpotlightStatus::Published)
            .collect();
        featured.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        featured
    }

    pub async fn stats(&self) -> SpotlightStats {
        let spotlights = self.spotlights.all().await;
        SpotlightStats {
            total: spotlights.len(),
            by_status: breakdown(&spotlights, |s| s.status.as_str()),
            featured: spotlights.iter().filter(|s| s.featured).count(),
        }
    }
}
