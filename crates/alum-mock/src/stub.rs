//! Deterministic demo values for data the mock backend does not store.
//!
//! Everything is derived from a hash of the record id, so the same record
//! always yields the same numbers across runs and processes.

use std::ops::RangeInclusive;

use alum_core::entities::{Event, Mentorship, MentorshipSession};
use alum_core::enums::MentorshipStatus;
use alum_core::stats::EventAnalytics;
use chrono::{DateTime, Duration, TimeZone, Utc};

/// FNV-1a over the id bytes.
#[must_use]
pub fn seed(id: &str) -> u64 {
    id.bytes().fold(0xcbf2_9ce4_8422_2325, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(0x0100_0000_01b3)
    })
}

/// A value in `range`, fixed for a given `(seed, salt)`.
#[must_use]
pub fn pick(seed: u64, salt: u64, range: RangeInclusive<u64>) -> u64 {
    let (low, high) = (*range.start(), *range.end());
    if high <= low {
        return low;
    }
    let mixed = (seed ^ salt.wrapping_mul(0x9e37_79b9_7f4a_7c15)).rotate_left(17);
    low + mixed % (high - low + 1)
}

fn to_usize(value: u64) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}

/// Analytics for `event`. Registration numbers come from the record;
/// check-ins and page views are synthesized only when `synthesize` is set.
#[must_use]
pub fn event_analytics(event: &Event, synthesize: bool) -> EventAnalytics {
    let registrations = event.attendee_ids.len();
    let fill_rate = if event.capacity == 0 {
        0.0
    } else {
        #[allow(clippy::cast_precision_loss)]
        let rate = registrations as f64 / f64::from(event.capacity);
        rate.min(1.0)
    };

    let (check_ins, page_views) = if synthesize {
        let s = seed(&event.id);
        let check_in_pct = to_usize(pick(s, 1, 60..=95));
        let registered = u64::try_from(registrations).unwrap_or(u64::MAX);
        (
            registrations * check_in_pct / 100,
            registered.saturating_mul(pick(s, 2, 3..=12)) + pick(s, 3, 50..=500),
        )
    } else {
        (0, 0)
    };

    EventAnalytics {
        event_id: event.id.clone(),
        registrations,
        capacity: event.capacity,
        fill_rate,
        check_ins,
        page_views,
        synthesized: synthesize,
    }
}

/// Weekly sessions for a mentorship that has none stored.
///
/// Pending and cancelled mentorships get none. The schedule starts at
/// `started_at`, else `created_at`, else 2024-01-01.
#[must_use]
pub fn mentorship_sessions(mentorship: &Mentorship) -> Vec<MentorshipSession> {
    if matches!(
        mentorship.status,
        MentorshipStatus::Pending | MentorshipStatus::Cancelled
    ) {
        return Vec::new();
    }

    let s = seed(&mentorship.id);
    let count = pick(s, 4, 1..=4);
    let start: DateTime<Utc> = mentorship
        .started_at
        .or(mentorship.created_at)
        .or_else(|| Utc.with_ymd_and_hms(2024, 1, 1, 17, 0, 0).single())
        .unwrap_or_default();

    (0..count)
        .map(|n| {
            let weeks = i64::try_from(n).unwrap_or_default();
            let completed =
                mentorship.status == MentorshipStatus::Completed || n + 1 < count;
            MentorshipSession {
                id: format!("mss-{}-{}", mentorship.id, n + 1),
                mentorship_id: mentorship.id.clone(),
                scheduled_at: Some(start + Duration::weeks(weeks)),
                duration_minutes: [30, 45, 60][to_usize(pick(s, 5 + n, 0..=2))],
                notes: None,
                completed,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn seed_is_stable() {
        assert_eq!(seed("evt-1"), seed("evt-1"));
        assert_ne!(seed("evt-1"), seed("evt-2"));
    }

    #[test]
    fn pick_stays_in_range() {
        for salt in 0..100 {
            let v = pick(seed("x"), salt, 3..=12);
            assert!((3..=12).contains(&v));
        }
        assert_eq!(pick(1, 1, 5..=5), 5);
    }

    #[test]
    fn analytics_are_deterministic() {
        let event = Event {
            id: "evt-9".into(),
            capacity: 10,
            attendee_ids: vec!["a".into(), "b".into(), "c".into(), "d".into()],
            ..Default::default()
        };
        let first = event_analytics(&event, true);
        assert_eq!(first, event_analytics(&event, true));
        assert_eq!(first.registrations, 4);
        assert!((first.fill_rate - 0.4).abs() < f64::EPSILON);
        assert!(first.check_ins <= 4);
        assert!(first.page_views >= 50);
    }

    #[test]
    fn analytics_without_synthesis_are_zeroed() {
        let event = Event {
            id: "evt-9".into(),
            ..Default::default()
        };
        let analytics = event_analytics(&event, false);
        assert_eq!(analytics.check_ins, 0);
        assert_eq!(analytics.page_views, 0);
        assert!(!analytics.synthesized);
        assert!(analytics.fill_rate.abs() < f64::EPSILON);
    }

    #[test]
    fn pending_mentorship_has_no_sessions() {
        let m = Mentorship {
            id: "mnt-1".into(),
            ..Default::default()
        };
        assert!(mentorship_sessions(&m).is_empty());
    }

    #[test]
    fn completed_mentorship_sessions_are_completed() {
        let m = Mentorship {
            id: "mnt-2".into(),
            status: MentorshipStatus::Completed,
            ..Default::default()
        };
        let sessions = mentorship_sessions(&m);
        assert!(!sessions.is_empty());
        assert!(sessions.iter().all(|s| s.completed && s.mentorship_id == "mnt-2"));
        assert_eq!(sessions, mentorship_sessions(&m));
    }
}
