use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::EventStatus;
use crate::resource::Resource;

/// An alumni event (reunion, webinar, meetup), optionally owned by a chapter.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub event_type: Option<String>,
    pub status: EventStatus,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub chapter_id: Option<String>,
    /// Maximum attendees; `0` means unlimited.
    pub capacity: u32,
    pub attendee_ids: Vec<String>,
    pub tags: Vec<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Event {
    /// Whether another attendee can register.
    #[must_use]
    pub fn has_capacity(&self) -> bool {
        self.capacity == 0 || self.attendee_ids.len() < self.capacity as usize
    }
}

impl Resource for Event {
    const COLLECTION: &'static str = "events";
    const ENTITY: &'static str = "Event";

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
