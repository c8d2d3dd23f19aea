use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{SponsorStatus, SponsorTier};
use crate::resource::Resource;

/// A company or individual funding platform events.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Sponsor {
    pub id: String,
    pub name: String,
    pub tier: SponsorTier,
    pub status: SponsorStatus,
    pub website: Option<String>,
    pub contact_email: Option<String>,
    pub contribution_amount: f64,
    pub event_ids: Vec<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Resource for Sponsor {
    const COLLECTION: &'static str = "sponsors";
    const ENTITY: &'static str = "Sponsor";

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
