use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::MentorshipStatus;
use crate::resource::Resource;

/// A mentor/mentee pairing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct Mentorship {
    pub id: String,
    pub mentor_id: String,
    pub mentee_id: String,
    pub status: MentorshipStatus,
    pub focus_areas: Vec<String>,
    pub goals: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
    pub ended_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Resource for Mentorship {
    const COLLECTION: &'static str = "mentorships";
    const ENTITY: &'static str = "Mentorship";

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

/// One meeting within a mentorship, keyed by `mentorship_id`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct MentorshipSession {
    pub id: String,
    pub mentorship_id: String,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub duration_minutes: u32,
    pub notes: Option<String>,
    pub completed: bool,
}

impl Resource for MentorshipSession {
    const COLLECTION: &'static str = "mentorshipSessions";
    const ENTITY: &'static str = "Mentorship session";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}
