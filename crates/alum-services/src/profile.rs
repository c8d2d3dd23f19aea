//! Display profiles derived from raw user records.
//!
//! [`map_profile`] is pure apart from the injected [`Jitter`]; with
//! [`NoJitter`] the same user always maps to the same profile.

use alum_core::entities::User;
use alum_core::enums::{UserRole, UserStatus};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const BADGE_VERIFIED: &str = "verified";
pub const BADGE_SKILLED: &str = "skilled";
pub const BADGE_CURIOUS: &str = "curious";

/// Skill count at which a user earns [`BADGE_SKILLED`].
pub const SKILLED_THRESHOLD: usize = 5;
/// Interest count at which a user earns [`BADGE_CURIOUS`].
pub const CURIOUS_THRESHOLD: usize = 3;

pub const VERIFIED_WEIGHT: u32 = 25;
pub const SKILL_WEIGHT: u32 = 10;
pub const INTEREST_WEIGHT: u32 = 5;
/// Upper bound (inclusive) of [`RandomJitter`].
pub const MAX_JITTER: u32 = 10;

/// Source of the random component of the impact score.
pub trait Jitter: Send + Sync {
    fn sample(&self) -> u32;
}

/// Always zero; makes [`map_profile`] deterministic.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoJitter;

impl Jitter for NoJitter {
    fn sample(&self) -> u32 {
        0
    }
}

/// Uniform-ish `0..=MAX_JITTER` from the OS random source; zero if the
/// source is unavailable.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomJitter;

impl Jitter for RandomJitter {
    fn sample(&self) -> u32 {
        let mut byte = [0u8; 1];
        if getrandom::fill(&mut byte).is_err() {
            return 0;
        }
        u32::from(byte[0]) % (MAX_JITTER + 1)
    }
}

/// A user record plus the derived display fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(flatten)]
    pub user: User,
    pub display_name: String,
    pub badges: Vec<String>,
    pub impact_score: u32,
}

#[must_use]
pub const fn role_weight(role: UserRole) -> u32 {
    match role {
        UserRole::Admin => 50,
        UserRole::Moderator | UserRole::Mentor => 40,
        UserRole::Alumni => 30,
        UserRole::Student => 20,
    }
}

#[must_use]
pub const fn status_weight(status: UserStatus) -> u32 {
    match status {
        UserStatus::Active => 20,
        UserStatus::Inactive => 5,
        UserStatus::Suspended => 0,
    }
}

/// Rule-based badge list, in a fixed order: verified, role, skilled, curious.
#[must_use]
pub fn badges(user: &User) -> Vec<String> {
    let mut badges = Vec::new();
    if user.verified {
        badges.push(BADGE_VERIFIED.to_string());
    }
    badges.push(user.role.as_str().to_string());
    if user.skills.len() >= SKILLED_THRESHOLD {
        badges.push(BADGE_SKILLED.to_string());
    }
    if user.interests.len() >= CURIOUS_THRESHOLD {
        badges.push(BADGE_CURIOUS.to_string());
    }
    badges
}

fn count_weight(count: usize, weight: u32) -> u32 {
    u32::try_from(count).unwrap_or(u32::MAX).saturating_mul(weight)
}

/// Weighted score without the random component.
#[must_use]
pub fn base_impact_score(user: &User) -> u32 {
    let verified = if user.verified { VERIFIED_WEIGHT } else { 0 };
    role_weight(user.role)
        .saturating_add(verified)
        .saturating_add(status_weight(user.status))
        .saturating_add(count_weight(user.skills.len(), SKILL_WEIGHT))
        .saturating_add(count_weight(user.interests.len(), INTEREST_WEIGHT))
}

#[must_use]
pub fn map_profile(user: &User, jitter: &dyn Jitter) -> Profile {
    Profile {
        display_name: user.display_name(),
        badges: badges(user),
        impact_score: base_impact_score(user).saturating_add(jitter.sample()),
        user: user.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    struct Fixed(u32);

    impl Jitter for Fixed {
        fn sample(&self) -> u32 {
            self.0
        }
    }

    fn user(role: UserRole, status: UserStatus, verified: bool, skills: usize, interests: usize) -> User {
        User {
            id: "usr-1".into(),
            first_name: "Amara".into(),
            last_name: "Okafor".into(),
            email: "amara@example.com".into(),
            role,
            status,
            verified,
            skills: (0..skills).map(|i| format!("skill-{i}")).collect(),
            interests: (0..interests).map(|i| format!("interest-{i}")).collect(),
            ..User::default()
        }
    }

    #[test]
    fn mapping_without_jitter_is_deterministic() {
        let u = user(UserRole::Mentor, UserStatus::Active, true, 5, 3);
        let first = map_profile(&u, &NoJitter);
        let second = map_profile(&u, &NoJitter);
        assert_eq!(first, second);
        // 40 mentor + 25 verified + 20 active + 50 skills + 15 interests
        assert_eq!(first.impact_score, 150);
        assert_eq!(first.display_name, "Amara Okafor");
        assert_eq!(first.badges, vec!["verified", "mentor", "skilled", "curious"]);
    }

    #[rstest]
    #[case(UserRole::Admin, UserStatus::Active, 70)]
    #[case(UserRole::Moderator, UserStatus::Inactive, 45)]
    #[case(UserRole::Alumni, UserStatus::Active, 50)]
    #[case(UserRole::Student, UserStatus::Suspended, 20)]
    fn role_and_status_weights(#[case] role: UserRole, #[case] status: UserStatus, #[case] expected: u32) {
        let u = user(role, status, false, 0, 0);
        assert_eq!(base_impact_score(&u), expected);
    }

    #[test]
    fn thresholds_are_inclusive() {
        let below = user(UserRole::Alumni, UserStatus::Active, false, 4, 2);
        assert_eq!(badges(&below), vec!["alumni"]);
        let at = user(UserRole::Alumni, UserStatus::Active, false, 5, 3);
        assert_eq!(badges(&at), vec!["alumni", "skilled", "curious"]);
    }

    #[test]
    fn jitter_is_added_on_top() {
        let u = user(UserRole::Student, UserStatus::Active, false, 0, 0);
        assert_eq!(map_profile(&u, &Fixed(7)).impact_score, 47);
    }

    #[test]
    fn random_jitter_stays_in_range() {
        for _ in 0..200 {
            assert!(RandomJitter.sample() <= MAX_JITTER);
        }
    }

    #[test]
    fn blank_names_fall_back_to_email() {
        let u = User {
            email: "wanjiru@example.com".into(),
            ..User::default()
        };
        assert_eq!(map_profile(&u, &NoJitter).display_name, "wanjiru@example.com");
    }

    #[test]
    fn profile_serializes_flat() {
        let p = map_profile(&user(UserRole::Alumni, UserStatus::Active, false, 0, 0), &NoJitter);
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["firstName"], "Amara");
        assert_eq!(json["displayName"], "Amara Okafor");
        assert_eq!(json["impactScore"], 50);
    }
}
