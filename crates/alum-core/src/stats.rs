//! Aggregates computed per collection.
//!
//! The mock backend derives these by scanning the collection; the real
//! backend serves them from `/api/{collection}/stats`. Both decode into the
//! same structs.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Counts keyed by a status or category string.
pub type Breakdown = BTreeMap<String, usize>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct EventStats {
    pub total: usize,
    pub by_status: Breakdown,
    /// Published events starting in the future.
    pub upcoming: usize,
    pub total_attendees: usize,
}

/// Per-event analytics.
///
/// `registrations` and `fill_rate` are derived from the record. `check_ins`
/// and `page_views` have no stored source; they are synthesized demo values
/// when `synthesized` is set and zero otherwise.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct EventAnalytics {
    pub event_id: String,
    pub registrations: usize,
    pub capacity: u32,
    /// Registrations over capacity in `0.0..=1.0`; `0.0` for unlimited events.
    pub fill_rate: f64,
    pub check_ins: usize,
    pub page_views: u64,
    pub synthesized: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct SponsorStats {
    pub total: usize,
    pub by_tier: Breakdown,
    pub by_status: Breakdown,
    pub total_contribution: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct PartnerStats {
    pub total: usize,
    pub by_type: Breakdown,
    pub by_status: Breakdown,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct ChapterStats {
    pub total: usize,
    pub active: usize,
    pub total_members: usize,
    pub by_country: Breakdown,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct MentorshipStats {
    pub total: usize,
    pub by_status: Breakdown,
    /// Distinct mentors with at least one active mentorship.
    pub active_mentors: usize,
    pub total_sessions: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct QaStats {
    pub total_questions: usize,
    pub total_answers: usize,
    pub by_status: Breakdown,
    /// Open questions without any answer.
    pub unanswered: usize,
    pub accepted_answers: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct OpportunityStats {
    pub total: usize,
    pub by_type: Breakdown,
    pub by_status: Breakdown,
    pub total_applicants: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct SpotlightStats {
    pub total: usize,
    pub by_status: Breakdown,
    pub featured: usize,
}

/// Count `items` by the string key `key` returns.
pub fn breakdown<T, K, F>(items: &[T], key: F) -> Breakdown
where
    F: Fn(&T) -> K,
    K: Into<String>,
{
    let mut counts = Breakdown::new();
    for item in items {
        *counts.entry(key(item).into()).or_default() += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn breakdown_counts_keys() {
        let counts = breakdown(&["gold", "silver", "gold"], |s| *s);
        assert_eq!(counts.get("gold"), Some(&2));
        assert_eq!(counts.get("silver"), Some(&1));
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn stats_serialize_camel_case() {
        let stats = EventStats {
            total: 3,
            total_attendees: 10,
            ..Default::default()
        };
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["totalAttendees"], 10);
        assert!(json.get("byStatus").is_some());
    }
}
