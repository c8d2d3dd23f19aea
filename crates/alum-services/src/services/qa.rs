use std::sync::Arc;

use alum_core::actions::VoteDirection;
use alum_core::entities::{Answer, Question};
use alum_core::responses::ApiResponse;
use alum_core::stats::QaStats;
use alum_http::{Endpoints, fill_path};
use serde_json::json;

use crate::context::Backend;
use crate::facade::{RealCollection, facade_crud};

const ACCEPT_ANSWER_PATH: &str = "/api/questions/:id/answers/:answerId/accept";

/// Questions are the primary collection; answers hang off them.
#[derive(Clone)]
pub struct QaService {
    backend: Backend,
    real: RealCollection<Question>,
    real_answers: RealCollection<Answer>,
}

impl QaService {
    #[must_use]
    pub fn new(backend: Backend) -> Self {
        let real = RealCollection::new(Arc::clone(backend.client()), Endpoints::QUESTIONS);
        let real_answers = RealCollection::new(Arc::clone(backend.client()), Endpoints::ANSWERS);
        Self {
            backend,
            real,
            real_answers,
        }
    }

    facade_crud!(Question, qa);

    /// Delete a question together with its answers.
    pub async fn delete_question(&self, id: &str) -> ApiResponse<()> {
        let mocks = self.backend.mocks();
        let result = self
            .backend
            .route(mocks.qa.delete_question(id), self.real.delete(id))
            .await;
        ApiResponse::from_result_with_message(result, format!("Question {id} deleted"))
    }

    pub async fn vote(&self, id: &str, direction: VoteDirection) -> ApiResponse<Question> {
        let mocks = self.backend.mocks();
        let body = json!({ "direction": direction });
        let result = self
            .backend
            .route(mocks.qa.vote(id, direction), self.real.action(id, "vote", &body))
            .await;
        ApiResponse::from_result(result)
    }

    /// Flag for moderation; a blank reason is 422.
    pub async fn flag(&self, id: &str, reason: &str) -> ApiResponse<Question> {
        let mocks = self.backend.mocks();
        let body = json!({ "reason": reason });
        let result = self
            .backend
            .route(mocks.qa.flag(id, reason), self.real.action(id, "flag", &body))
            .await;
        ApiResponse::from_result(result)
    }

    pub async fn close(&self, id: &str) -> ApiResponse<Question> {
        let mocks = self.backend.mocks();
        let result = self
            .backend
            .route(mocks.qa.close(id), self.real.action(id, "close", &json!({})))
            .await;
        ApiResponse::from_result(result)
    }

    /// Answers to one question, accepted first.
    pub async fn answers(&self, question_id: &str) -> ApiResponse<Vec<Answer>> {
        let mocks = self.backend.mocks();
        let result = self
            .backend
            .route(mocks.qa.answers(question_id), self.real.nested(question_id, "answers"))
            .await;
        ApiResponse::from_result(result)
    }

    pub async fn post_answer(&self, question_id: &str, draft: Answer) -> ApiResponse<Answer> {
        let mocks = self.backend.mocks();
        let result = self
            .backend
            .route(
                mocks.qa.post_answer(question_id, draft.clone()),
                self.real.action(question_id, "answers", &draft),
            )
            .await;
        ApiResponse::from_result_with_message(result, "Answer posted")
    }

    pub async fn accept_answer(&self, question_id: &str, answer_id: &str) -> ApiResponse<Answer> {
        let mocks = self.backend.mocks();
        let path = fill_path(ACCEPT_ANSWER_PATH, &[("id", question_id), ("answerId", answer_id)]);
        let result = self
            .backend
            .route(
                mocks.qa.accept_answer(question_id, answer_id),
                self.real.client().post(&path, &json!({})),
            )
            .await;
        ApiResponse::from_result_with_message(result, "Answer accepted")
    }

    pub async fn vote_answer(&self, answer_id: &str, direction: VoteDirection) -> ApiResponse<Answer> {
        let mocks = self.backend.mocks();
        let body = json!({ "direction": direction });
        let result = self
            .backend
            .route(
                mocks.qa.vote_answer(answer_id, direction),
                self.real_answers.action(answer_id, "vote", &body),
            )
            .await;
        ApiResponse::from_result(result)
    }

    pub async fn stats(&self) -> ApiResponse<QaStats> {
        let mocks = self.backend.mocks();
        let result = self
            .backend
            .route(async { Ok(mocks.qa.stats().await) }, self.real.stats())
            .await;
        ApiResponse::from_result(result)
    }
}
