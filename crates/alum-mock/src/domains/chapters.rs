use std::sync::Arc;

use alum_core::entities::Chapter;
use alum_core::enums::ChapterStatus;
use alum_core::responses::{ApiFailure, ApiResult};
use alum_core::stats::{ChapterStats, breakdown};

use super::crud_delegates;
use crate::collection::MockCollection;
use crate::loader::MockDataLoader;

#[derive(Clone)]
pub struct ChaptersMock {
    chapters: MockCollection<Chapter>,
}

impl ChaptersMock {
    #[must_use]
    pub const fn new(loader: Arc<MockDataLoader>) -> Self {
        Self {
            chapters: MockCollection::new(loader),
        }
    }

    crud_delegates!(chapters: Chapter);

    /// # Errors
    ///
    /// 404 for unknown chapters; 409 when the user is already a member.
    pub async fn add_member(&self, id: &str, user_id: &str) -> ApiResult<Chapter> {
        self.chapters
            .modify(id, |chapter| {
                if chapter.member_ids.iter().any(|m| m == user_id) {
                    return Err(ApiFailure::conflict(format!(
                        "User {user_id} is already a member of chapter {id}"
                    )));
                }
                chapter.member_ids.push(user_id.to_string());
                Ok(())
            })
            .await
    }

    /// Removing the chapter lead also clears `lead_id`.
    ///
    /// # Errors
    ///
    /// 404 for unknown chapters or non-members.
    pub async fn remove_member(&self, id: &str, user_id: &str) -> ApiResult<Chapter> {
        self.chapters
            .modify(id, |chapter| {
                let before = chapter.member_ids.len();
                chapter.member_ids.retain(|m| m != user_id);
                if chapter.member_ids.len() == before {
                    return Err(ApiFailure::new(
                        404,
                        format!("User {user_id} is not a member of chapter {id}"),
                    ));
                }
                if chapter.lead_id.as_deref() == Some(user_id) {
                    chapter.lead_id = None;
                }
                Ok(())
            })
            .await
    }

    async fn set_status(&self, id: &str, status: ChapterStatus) -> ApiResult<Chapter> {
        self.chapters
            .modify(id, |chapter| {
                chapter.status = status;
                Ok(())
            })
            .await
    }

    /// # Errors
    ///
    /// 404 for unknown ids.
    pub async fn activate(&self, id: &str) -> ApiResult<Chapter> {
        self.set_status(id, ChapterStatus::Active).await
    }

    /// # Errors
    ///
    /// 404 for unknown ids.
    pub async fn deactivate(&self, id: &str) -> ApiResult<Chapter> {
        self.set_status(id, ChapterStatus::Inactive).await
    }

    pub async fn stats(&self) -> ChapterStats {
        let chapters = self.chapters.all().await;
        ChapterStats {
            total: chapters.len(),
            active: chapters
                .iter()
                .filter(|c| c.status == ChapterStatus::Active)
                .count(),
            total_members: chapters.iter().map(|c| c.member_ids.len()).sum(),
            by_country: breakdown(&chapters, |c| {
                c.country.clone().unwrap_or_else(|| "unknown".to_string())
            }),
        }
    }
}
