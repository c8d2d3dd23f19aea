use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{OpportunityStatus, OpportunityType};
use crate::resource::Resource;

/// A job, internship, or volunteer posting shared with the network.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct Opportunity {
    pub id: String,
    pub title: String,
    pub company: String,
    pub opportunity_type: OpportunityType,
    pub status: OpportunityStatus,
    pub location: Option<String>,
    pub remote: bool,
    pub posted_by: Option<String>,
    pub deadline: Option<DateTime<Utc>>,
    pub applicant_ids: Vec<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Resource for Opportunity {
    const COLLECTION: &'static str = "opportunities";
    const ENTITY: &'static str = "Opportunity";

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
