//! ID prefixes and generation.
//!
//! IDs look like `spn-a3f8b2c1`: a three-letter collection prefix, a dash,
//! and eight lowercase hex characters from the OS random source.

pub const PREFIX_EVENT: &str = "evt";
pub const PREFIX_SPONSOR: &str = "spn";
pub const PREFIX_PARTNER: &str = "prt";
pub const PREFIX_CHAPTER: &str = "chp";
pub const PREFIX_MENTORSHIP: &str = "mnt";
pub const PREFIX_MENTORSHIP_SESSION: &str = "mss";
pub const PREFIX_QUESTION: &str = "qst";
pub const PREFIX_ANSWER: &str = "ans";
pub const PREFIX_OPPORTUNITY: &str = "opp";
pub const PREFIX_SPOTLIGHT: &str = "spt";
pub const PREFIX_USER: &str = "usr";

/// Prefix used for collections that have no registered prefix.
pub const PREFIX_GENERIC: &str = "rec";

pub const ALL_PREFIXES: &[&str] = &[
    PREFIX_EVENT,
    PREFIX_SPONSOR,
    PREFIX_PARTNER,
    PREFIX_CHAPTER,
    PREFIX_MENTORSHIP,
    PREFIX_MENTORSHIP_SESSION,
    PREFIX_QUESTION,
    PREFIX_ANSWER,
    PREFIX_OPPORTUNITY,
    PREFIX_SPOTLIGHT,
    PREFIX_USER,
];

/// Map a collection name to its ID prefix.
#[must_use]
pub fn prefix_for_collection(collection: &str) -> &'static str {
    match collection {
        "events" => PREFIX_EVENT,
        "sponsors" => PREFIX_SPONSOR,
        "partners" => PREFIX_PARTNER,
        "chapters" => PREFIX_CHAPTER,
        "mentorships" => PREFIX_MENTORSHIP,
        "mentorshipSessions" => PREFIX_MENTORSHIP_SESSION,
        "questions" => PREFIX_QUESTION,
        "answers" => PREFIX_ANSWER,
        "opportunities" => PREFIX_OPPORTUNITY,
        "spotlights" => PREFIX_SPOTLIGHT,
        "users" => PREFIX_USER,
        _ => PREFIX_GENERIC,
    }
}

/// Generate a prefixed ID, e.g. `"evt-0f3a9c21"`.
///
/// Falls back to the low bits of the current timestamp if the OS random
/// source is unavailable, so ID generation never fails.
#[must_use]
pub fn generate_id(prefix: &str) -> String {
    let mut bytes = [0u8; 4];
    if getrandom::fill(&mut bytes).is_err() {
        let nanos = chrono::Utc::now().timestamp_subsec_nanos();
        bytes = nanos.to_le_bytes();
    }
    let hex: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
    format!("{prefix}-{hex}")
}
