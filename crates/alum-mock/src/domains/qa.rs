use std::sync::Arc;

use alum_core::actions::VoteDirection;
use alum_core::entities::{Answer, Question};
use alum_core::enums::QuestionStatus;
use alum_core::responses::{ApiFailure, ApiResult};
use alum_core::stats::{QaStats, breakdown};

use super::crud_delegates;
use crate::collection::MockCollection;
use crate::loader::MockDataLoader;

/// Questions and their flat-stored answers.
#[derive(Clone)]
pub struct QaMock {
    questions: MockCollection<Question>,
    answers: MockCollection<Answer>,
}

impl QaMock {
    #[must_use]
    pub fn new(loader: Arc<MockDataLoader>) -> Self {
        Self {
            answers: MockCollection::new(Arc::clone(&loader)),
            questions: MockCollection::new(loader),
        }
    }

    crud_delegates!(questions: Question);

    /// Delete a question and, best effort, its answers.
    ///
    /// # Errors
    ///
    /// 404 for unknown questions.
    pub async fn delete_question(&self, id: &str) -> ApiResult<()> {
        self.questions.delete(id).await?;
        for answer in self.answers_of(id).await {
            if let Err(e) = self.answers.delete(&answer.id).await {
                tracing::debug!(answer = %answer.id, %e, "orphaned answer left behind");
            }
        }
        Ok(())
    }

    /// # Errors
    ///
    /// 404 for unknown ids.
    pub async fn vote(&self, id: &str, direction: VoteDirection) -> ApiResult<Question> {
        self.questions
            .modify(id, |q| {
                q.votes += direction.delta();
                Ok(())
            })
            .await
    }

    /// # Errors
    ///
    /// 404 for unknown ids; 422 for a blank reason.
    pub async fn flag(&self, id: &str, reason: &str) -> ApiResult<Question> {
        if reason.trim().is_empty() {
            return Err(ApiFailure::new(422, "a flag reason is required"));
        }
        self.questions
            .modify(id, |q| {
                q.status = QuestionStatus::Flagged;
                q.flag_reason = Some(reason.trim().to_string());
                Ok(())
            })
            .await
    }

    /// # Errors
    ///
    /// 404 for unknown ids.
    pub async fn close(&self, id: &str) -> ApiResult<Question> {
        self.questions
            .modify(id, |q| {
                q.status = QuestionStatus::Closed;
                Ok(())
            })
            .await
    }

    async fn answers_of(&self, question_id: &str) -> Vec<Answer> {
        self.answers
            .all()
            .await
            .into_iter()
            .filter(|a| a.question_id == question_id)
            .collect()
    }

    /// Answers to a question: accepted first, then by votes.
    ///
    /// # Errors
    ///
    /// 404 for unknown questions.
    pub async fn answers(&self, question_id: &str) -> ApiResult<Vec<Answer>> {
        self.questions.get(question_id).await?;
        let mut answers = self.answers_of(question_id).await;
        answers.sort_by(|a, b| b.accepted.cmp(&a.accepted).then(b.votes.cmp(&a.votes)));
        Ok(answers)
    }

    /// # Errors
    ///
    /// 404 for unknown questions; 409 for closed ones; 422 for an empty body.
    pub async fn post_answer(&self, question_id: &str, draft: Answer) -> ApiResult<Answer> {
        if draft.body.trim().is_empty() {
            return Err(ApiFailure::new(422, "answer body is required"));
        }
        let question = self.questions.get(question_id).await?;
        if question.status == QuestionStatus::Closed {
            return Err(ApiFailure::conflict(format!(
                "Question {question_id} is closed"
            )));
        }

        let answer = self
            .answers
            .create(Answer {
                question_id: question_id.to_string(),
                accepted: false,
                ..draft
            })
            .await?;
        self.questions
            .modify(question_id, |q| {
                q.answer_count += 1;
                Ok(())
            })
            .await?;
        Ok(answer)
    }

    /// Mark one answer accepted; any previously accepted answer is
    /// un-accepted and the question becomes answered.
    ///
    /// # Errors
    ///
    /// 404 for unknown ids or when the answer belongs to another question.
    pub async fn accept_answer(&self, question_id: &str, answer_id: &str) -> ApiResult<Answer> {
        let question = self.questions.get(question_id).await?;
        let answer = self.answers.get(answer_id).await?;
        if answer.question_id != question_id {
            return Err(ApiFailure::new(
                404,
                format!("Answer {answer_id} does not belong to question {question_id}"),
            ));
        }

        if let Some(previous) = question
            .accepted_answer_id
            .as_deref()
            .filter(|prev| *prev != answer_id)
        {
            if let Err(e) = self
                .answers
                .modify(previous, |a| {
                    a.accepted = false;
                    Ok(())
                })
                .await
            {
                tracing::debug!(answer = previous, %e, "previously accepted answer not updated");
            }
        }

        let accepted = self
            .answers
            .modify(answer_id, |a| {
                a.accepted = true;
                Ok(())
            })
            .await?;
        self.questions
            .modify(question_id, |q| {
                q.accepted_answer_id = Some(answer_id.to_string());
                q.status = QuestionStatus::Answered;
                Ok(())
            })
            .await?;
        Ok(accepted)
    }

    /// # Errors
    ///
    /// 404 for unknown answers.
    pub async fn vote_answer(&self, answer_id: &str, direction: VoteDirection) -> ApiResult<Answer> {
        self.answers
            .modify(answer_id, |a| {
                a.votes += direction.delta();
                Ok(())
            })
            .await
    }

    pub async fn stats(&self) -> QaStats {
        let questions = self.questions.all().await;
        let answers = self.answers.all().await;
        QaStats {
            total_questions: questions.len(),
            total_answers: answers.len(),
            by_status: breakdown(&questions, |q| q.status.as_str()),
            unanswered: questions
                .iter()
                .filter(|q| q.status == QuestionStatus::Open && q.answer_count == 0)
                .count(),
            accepted_answers: answers.iter().filter(|a| a.accepted).count(),
        }
    }
}
