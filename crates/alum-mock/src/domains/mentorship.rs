use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use alum_core::entities::{Mentorship, MentorshipSession};
use alum_core::enums::MentorshipStatus;
use alum_core::resource::Resource;
use alum_core::responses::{ApiFailure, ApiResult};
use alum_core::stats::{MentorshipStats, breakdown};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::{crud_delegates, invalid_transition};
use crate::collection::MockCollection;
use crate::loader::MockDataLoader;
use crate::stub;

/// A mentee asking a mentor for guidance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MentorshipRequest {
    pub mentor_id: String,
    pub mentee_id: String,
    pub focus_areas: Vec<String>,
    pub goals: Option<String>,
}

#[derive(Clone)]
pub struct MentorshipMock {
    mentorships: MockCollection<Mentorship>,
    sessions: MockCollection<MentorshipSession>,
}

impl MentorshipMock {
    #[must_use]
    pub fn new(loader: Arc<MockDataLoader>) -> Self {
        Self {
            sessions: MockCollection::new(Arc::clone(&loader)),
            mentorships: MockCollection::new(loader),
        }
    }

    crud_delegates!(mentorships: Mentorship);

    /// Open a pending mentorship.
    ///
    /// # Errors
    ///
    /// 422 when either party is missing or both are the same person; 409 when
    /// the pair already has a pending or active mentorship.
    pub async fn request(&self, request: MentorshipRequest) -> ApiResult<Mentorship> {
        if request.mentor_id.trim().is_empty() || request.mentee_id.trim().is_empty() {
            return Err(ApiFailure::new(422, "mentorId and menteeId are required"));
        }
        if request.mentor_id == request.mentee_id {
            return Err(ApiFailure::new(422, "a user cannot mentor themselves"));
        }
        let open = self.mentorships.all().await.into_iter().any(|m| {
            m.mentor_id == request.mentor_id
                && m.mentee_id == request.mentee_id
                && matches!(m.status, MentorshipStatus::Pending | MentorshipStatus::Active)
        });
        if open {
            return Err(ApiFailure::conflict(format!(
                "{} already has an open mentorship with {}",
                request.mentee_id, request.mentor_id
            )));
        }

        self.mentorships
            .create(Mentorship {
                mentor_id: request.mentor_id,
                mentee_id: request.mentee_id,
                focus_areas: request.focus_areas,
                goals: request.goals,
                status: MentorshipStatus::Pending,
                ..Default::default()
            })
            .await
    }

    async fn move_to(&self, id: &str, next: MentorshipStatus) -> ApiResult<Mentorship> {
        self.mentorships
            .modify(id, |m| {
                if !m.status.can_transition_to(next) {
                    return Err(invalid_transition(Mentorship::ENTITY, id, m.status, next));
                }
                let now = Utc::now();
                match next {
                    MentorshipStatus::Active => m.started_at = Some(now),
                    MentorshipStatus::Completed | MentorshipStatus::Cancelled => {
                        m.ended_at = Some(now);
                    }
                    MentorshipStatus::Pending => {}
                }
                m.status = next;
                Ok(())
            })
            .await
    }

    /// # Errors
    ///
    /// 404 for unknown ids; 409 unless pending.
    pub async fn approve(&self, id: &str) -> ApiResult<Mentorship> {
        self.move_to(id, MentorshipStatus::Active).await
    }

    /// # Errors
    ///
    /// 404 for unknown ids; 409 unless active.
    pub async fn complete(&self, id: &str) -> ApiResult<Mentorship> {
        self.move_to(id, MentorshipStatus::Completed).await
    }

    /// # Errors
    ///
    /// 404 for unknown ids; 409 once completed or cancelled.
    pub async fn cancel(&self, id: &str) -> ApiResult<Mentorship> {
        self.move_to(id, MentorshipStatus::Cancelled).await
    }

    fn sessions_for(
        &self,
        mentorship: &Mentorship,
        stored: &BTreeMap<String, Vec<MentorshipSession>>,
    ) -> Vec<MentorshipSession> {
        match stored.get(&mentorship.id) {
            Some(sessions) if !sessions.is_empty() => sessions.clone(),
            _ if self.sessions.loader().synthesize_demo_data() => {
                stub::mentorship_sessions(mentorship)
            }
            _ => Vec::new(),
        }
    }

    async fn stored_sessions(&self) -> BTreeMap<String, Vec<MentorshipSession>> {
        let mut grouped: BTreeMap<String, Vec<MentorshipSession>> = BTreeMap::new();
        for session in self.sessions.all().await {
            grouped
                .entry(session.mentorship_id.clone())
                .or_default()
                .push(session);
        }
        for sessions in grouped.values_mut() {
            sessions.sort_by_key(|s| s.scheduled_at);
        }
        grouped
    }

    /// Sessions of one mentorship, earliest first. Mentorships without
    /// stored sessions get synthesized ones when demo data is enabled.
    ///
    /// # Errors
    ///
    /// 404 for unknown mentorships.
    pub async fn sessions(&self, id: &str) -> ApiResult<Vec<MentorshipSession>> {
        let mentorship = self.mentorships.get(id).await?;
        let stored = self.stored_sessions().await;
        Ok(self.sessions_for(&mentorship, &stored))
    }

    /// # Errors
    ///
    /// 404 for unknown mentorships.
    pub async fn schedule_session(
        &self,
        id: &str,
        session: MentorshipSession,
    ) -> ApiResult<MentorshipSession> {
        self.mentorships.get(id).await?;
        self.sessions
            .create(MentorshipSession {
                mentorship_id: id.to_string(),
                ..session
            })
            .await
    }

    pub async fn stats(&self) -> MentorshipStats {
        let mentorships = self.mentorships.all().await;
        let stored = self.stored_sessions().await;
        let active_mentors: BTreeSet<&str> = mentorships
            .iter()
            .filter(|m| m.status == MentorshipStatus::Active)
            .map(|m| m.mentor_id.as_str())
            .collect();
        MentorshipStats {
            total: mentorships.len(),
            by_status: breakdown(&mentorships, |m| m.status.as_str()),
            active_mentors: active_mentors.len(),
            total_sessions: mentorships
                .iter()
                .map(|m| self.sessions_for(m, &stored).len())
                .sum(),
        }
    }
}
