use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::ChapterStatus;
use crate::resource::Resource;

/// A regional alumni chapter.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct Chapter {
    pub id: String,
    pub name: String,
    pub city: Option<String>,
    pub country: Option<String>,
    pub status: ChapterStatus,
    pub lead_id: Option<String>,
    pub member_ids: Vec<String>,
    pub founded_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Resource for Chapter {
    const COLLECTION: &'static str = "chapters";
    const ENTITY: &'static str = "Chapter";

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
