//! Status enums and entity classifications.
//!
//! All enums serialize in `snake_case` and default to their initial state so
//! partially populated records still deserialize. Enums with a lifecycle
//! provide `allowed_next_states()`; the record store itself does not enforce
//! them, the domain actions check before writing.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// EventStatus
// ---------------------------------------------------------------------------

/// Lifecycle status of an event.
///
/// ```text
/// draft → published → completed
///       → cancelled
/// published → cancelled
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    #[default]
    Draft,
    Published,
    Cancelled,
    Completed,
}

impl EventStatus {
    pub const ALL: &'static [Self] = &[Self::Draft, Self::Published, Self::Cancelled, Self::Completed];

    /// Valid next states from the current state.
    #[must_use]
    #[allow(clippy::match_same_arms)]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Draft => &[Self::Published, Self::Cancelled],
            Self::Published => &[Self::Completed, Self::Cancelled],
            Self::Cancelled => &[],
            Self::Completed => &[],
        }
    }

    /// Check whether transitioning to `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
            Self::Cancelled => "cancelled",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// SponsorStatus
// ---------------------------------------------------------------------------

/// Status of a sponsor account.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum SponsorStatus {
    Active,
    Inactive,
    #[default]
    Pending,
}

impl SponsorStatus {
    pub const ALL: &'static [Self] = &[Self::Active, Self::Inactive, Self::Pending];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Pending => "pending",
        }
    }
}

impl fmt::Display for SponsorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// SponsorTier
// ---------------------------------------------------------------------------

/// Sponsorship tier, highest first.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum SponsorTier {
    Platinum,
    Gold,
    Silver,
    #[default]
    Bronze,
}

impl SponsorTier {
    pub const ALL: &'static [Self] = &[Self::Platinum, Self::Gold, Self::Silver, Self::Bronze];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Platinum => "platinum",
            Self::Gold => "gold",
            Self::Silver => "silver",
            Self::Bronze => "bronze",
        }
    }
}

impl fmt::Display for SponsorTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// PartnerStatus
// ---------------------------------------------------------------------------

/// Status of a partner organization.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum PartnerStatus {
    Active,
    Inactive,
    #[default]
    Pending,
}

impl PartnerStatus {
    pub const ALL: &'static [Self] = &[Self::Active, Self::Inactive, Self::Pending];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Pending => "pending",
        }
    }
}

impl fmt::Display for PartnerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// PartnerType
// ---------------------------------------------------------------------------

/// Kind of partner organization.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum PartnerType {
    #[default]
    Corporate,
    Academic,
    Nonprofit,
    Government,
}

impl PartnerType {
    pub const ALL: &'static [Self] = &[Self::Corporate, Self::Academic, Self::Nonprofit, Self::Government];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Corporate => "corporate",
            Self::Academic => "academic",
            Self::Nonprofit => "nonprofit",
            Self::Government => "government",
        }
    }
}

impl fmt::Display for PartnerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ChapterStatus
// ---------------------------------------------------------------------------

/// Status of a regional chapter.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ChapterStatus {
    #[default]
    Active,
    Inactive,
}

impl ChapterStatus {
    pub const ALL: &'static [Self] = &[Self::Active, Self::Inactive];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

impl fmt::Display for ChapterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// MentorshipStatus
// ---------------------------------------------------------------------------

/// Status of a mentor/mentee pairing.
///
/// ```text
/// pending → active → completed
///         → cancelled
/// active → cancelled
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum MentorshipStatus {
    #[default]
    Pending,
    Active,
    Completed,
    Cancelled,
}

impl MentorshipStatus {
    pub const ALL: &'static [Self] = &[Self::Pending, Self::Active, Self::Completed, Self::Cancelled];

    /// Valid next states from the current state.
    #[must_use]
    #[allow(clippy::match_same_arms)]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Pending => &[Self::Active, Self::Cancelled],
            Self::Active => &[Self::Completed, Self::Cancelled],
            Self::Completed => &[],
            Self::Cancelled => &[],
        }
    }

    /// Check whether transitioning to `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for MentorshipStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// QuestionStatus
// ---------------------------------------------------------------------------

/// Status of a Q&A question.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum QuestionStatus {
    #[default]
    Open,
    Answered,
    Closed,
    Flagged,
}

impl QuestionStatus {
    pub const ALL: &'static [Self] = &[Self::Open, Self::Answered, Self::Closed, Self::Flagged];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Answered => "answered",
            Self::Closed => "closed",
            Self::Flagged => "flagged",
        }
    }
}

impl fmt::Display for QuestionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// OpportunityType
// ---------------------------------------------------------------------------

/// Kind of posted opportunity.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum OpportunityType {
    #[default]
    Job,
    Internship,
    Volunteer,
    Fellowship,
}

impl OpportunityType {
    pub const ALL: &'static [Self] = &[Self::Job, Self::Internship, Self::Volunteer, Self::Fellowship];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Job => "job",
            Self::Internship => "internship",
            Self::Volunteer => "volunteer",
            Self::Fellowship => "fellowship",
        }
    }
}

impl fmt::Display for OpportunityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// OpportunityStatus
// ---------------------------------------------------------------------------

/// Status of a posted opportunity.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum OpportunityStatus {
    #[default]
    Draft,
    Open,
    Closed,
}

impl OpportunityStatus {
    pub const ALL: &'static [Self] = &[Self::Draft, Self::Open, Self::Closed];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }
}

impl fmt::Display for OpportunityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// SpotlightStatus
// ---------------------------------------------------------------------------

/// Publication status of a spotlight story.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum SpotlightStatus {
    #[default]
    Draft,
    Published,
    Archived,
}

impl SpotlightStatus {
    pub const ALL: &'static [Self] = &[Self::Draft, Self::Published, Self::Archived];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
            Self::Archived => "archived",
        }
    }
}

impl fmt::Display for SpotlightStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// UserRole
// ---------------------------------------------------------------------------

/// Role of a platform user.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    Moderator,
    Mentor,
    #[default]
    Alumni,
    Student,
}

impl UserRole {
    pub const ALL: &'static [Self] = &[Self::Admin, Self::Moderator, Self::Mentor, Self::Alumni, Self::Student];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Moderator => "moderator",
            Self::Mentor => "mentor",
            Self::Alumni => "alumni",
            Self::Student => "student",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// UserStatus
// ---------------------------------------------------------------------------

/// Account status of a platform user.
///
/// ```text
/// active → inactive → active
///        → suspended → active
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    #[default]
    Active,
    Inactive,
    Suspended,
}

impl UserStatus {
    pub const ALL: &'static [Self] = &[Self::Active, Self::Inactive, Self::Suspended];

    /// Valid next states from the current state.
    #[must_use]
    #[allow(clippy::match_same_arms)]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Active => &[Self::Inactive, Self::Suspended],
            Self::Inactive => &[Self::Active],
            Self::Suspended => &[Self::Active],
        }
    }

    /// Check whether transitioning to `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Suspended => "suspended",
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&SponsorTier::Platinum).unwrap();
        assert_eq!(json, "\"platinum\"");
        let status: EventStatus = serde_json::from_str("\"cancelled\"").unwrap();
        assert_eq!(status, EventStatus::Cancelled);
    }

    #[test]
    fn as_str_matches_serde() {
        for status in SponsorStatus::ALL {
            let json = serde_json::to_value(status).unwrap();
            assert_eq!(json.as_str(), Some(status.as_str()));
        }
        for role in UserRole::ALL {
            let json = serde_json::to_value(role).unwrap();
            assert_eq!(json.as_str(), Some(role.as_str()));
        }
    }

    #[test]
    fn user_status_transitions() {
        assert!(UserStatus::Active.can_transition_to(UserStatus::Suspended));
        assert!(UserStatus::Suspended.can_transition_to(UserStatus::Active));
        assert!(!UserStatus::Suspended.can_transition_to(UserStatus::Inactive));
        assert!(!UserStatus::Active.can_transition_to(UserStatus::Active));
    }

    #[test]
    fn terminal_states_have_no_successors() {
        assert!(EventStatus::Completed.allowed_next_states().is_empty());
        assert!(MentorshipStatus::Cancelled.allowed_next_states().is_empty());
    }

    #[test]
    fn defaults_are_initial_states() {
        assert_eq!(EventStatus::default(), EventStatus::Draft);
        assert_eq!(SponsorStatus::default(), SponsorStatus::Pending);
        assert_eq!(UserStatus::default(), UserStatus::Active);
    }
}
