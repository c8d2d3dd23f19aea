use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::QuestionStatus;
use crate::resource::Resource;

/// A community Q&A question.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub title: String,
    pub body: String,
    pub author_id: Option<String>,
    pub tags: Vec<String>,
    pub status: QuestionStatus,
    pub votes: i64,
    pub views: u64,
    pub answer_count: u32,
    pub accepted_answer_id: Option<String>,
    pub flag_reason: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Resource for Question {
    const COLLECTION: &'static str = "questions";
    const ENTITY: &'static str = "Question";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn stamp_created(&mut self, now: DateTime<Utc>) {
        self.created_at = Some(now);
        self.updated_at = Some(now);
    }

    fn stamp_updated(&mut self, now: DateTime<Utc>) {
        self.updated_at = Some(now);
    }
}

/// An answer to a [`Question`], stored flat and keyed by `question_id`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct Answer {
    pub id: String,
    pub question_id: String,
    pub body: String,
    pub author_id: Option<String>,
    pub votes: i64,
    pub accepted: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Resource for Answer {
    const COLLECTION: &'static str = "answers";
    const ENTITY: &'static str = "Answer";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn stamp_created(&mut self, now: DateTime<Utc>) {
        self.created_at = Some(now);
        self.updated_at = Some(now);
    }

    fn stamp_updated(&mut self, now: DateTime<Utc>) {
        self.updated_at = Some(now);
    }
}
