use std::sync::Arc;

use alum_core::entities::{Mentorship, MentorshipSession};
use alum_core::responses::ApiResponse;
use alum_core::stats::MentorshipStats;
use alum_http::Endpoints;
use alum_mock::MentorshipRequest;
use serde_json::json;

use crate::context::Backend;
use crate::facade::{RealCollection, facade_crud};

#[derive(Clone)]
pub struct MentorshipService {
    backend: Backend,
    real: RealCollection<Mentorship>,
}

impl MentorshipService {
    #[must_use]
    pub fn new(backend: Backend) -> Self {
        let real = RealCollection::new(Arc::clone(backend.client()), Endpoints::MENTORSHIPS);
        Self { backend, real }
    }

    facade_crud!(Mentorship, mentorship);

    /// Open a pending mentorship between two distinct users.
    pub async fn request(&self, request: MentorshipRequest) -> ApiResponse<Mentorship> {
        let mocks = self.backend.mocks();
        let result = self
            .backend
            .route(
                mocks.mentorship.request(request.clone()),
                self.real.client().post(Endpoints::MENTORSHIPS.base(), &request),
            )
            .await;
        ApiResponse::from_result_with_message(result, "Mentorship requested")
    }

    pub async fn approve(&self, id: &str) -> ApiResponse<Mentorship> {
        let mocks = self.backend.mocks();
        let result = self
            .backend
            .route(mocks.mentorship.approve(id), self.real.action(id, "approve", &json!({})))
            .await;
        ApiResponse::from_result(result)
    }

    pub async fn complete(&self, id: &str) -> ApiResponse<Mentorship> {
        let mocks = self.backend.mocks();
        let result = self
            .backend
            .route(mocks.mentorship.complete(id), self.real.action(id, "complete", &json!({})))
            .await;
        ApiResponse::from_result(result)
    }

    pub async fn cancel(&self, id: &str) -> ApiResponse<Mentorship> {
        let mocks = self.backend.mocks();
        let result = self
            .backend
            .route(mocks.mentorship.cancel(id), self.real.action(id, "cancel", &json!({})))
            .await;
        ApiResponse::from_result(result)
    }

    pub async fn sessions(&self, id: &str) -> ApiResponse<Vec<MentorshipSession>> {
        let mocks = self.backend.mocks();
        let result = self
            .backend
            .route(mocks.mentorship.sessions(id), self.real.nested(id, "sessions"))
            .await;
        ApiResponse::from_result(result)
    }

    pub async fn schedule_session(
        &self,
        id: &str,
        session: MentorshipSession,
    ) -> ApiResponse<MentorshipSession> {
        let mocks = self.backend.mocks();
        let result = self
            .backend
            .route(
                mocks.mentorship.schedule_session(id, session.clone()),
                self.real.action(id, "sessions", &session),
            )
            .await;
        ApiResponse::from_result(result)
    }

    pub async fn stats(&self) -> ApiResponse<MentorshipStats> {
        let mocks = self.backend.mocks();
        let result = self
            .backend
            .route(async { Ok(mocks.mentorship.stats().await) }, self.real.stats())
            .await;
        ApiResponse::from_result(result)
    }
}
