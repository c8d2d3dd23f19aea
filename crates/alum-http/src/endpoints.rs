//! REST path builders for the real backend.

/// Paths for one entity collection mounted under `/api`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoints {
    base: &'static str,
}

impl Endpoints {
    pub const EVENTS: Self = Self::new("/api/events");
    pub const SPONSORS: Self = Self::new("/api/sponsors");
    pub const PARTNERS: Self = Self::new("/api/partners");
    pub const CHAPTERS: Self = Self::new("/api/chapters");
    pub const MENTORSHIPS: Self = Self::new("/api/mentorships");
    pub const QUESTIONS: Self = Self::new("/api/questions");
    pub const ANSWERS: Self = Self::new("/api/answers");
    pub const OPPORTUNITIES: Self = Self::new("/api/opportunities");
    pub const SPOTLIGHTS: Self = Self::new("/api/spotlights");
    pub const USERS: Self = Self::new("/api/users");

    pub const HEALTH: &'static str = "/api/health";

    #[must_use]
    pub const fn new(base: &'static str) -> Self {
        Self { base }
    }

    #[must_use]
    pub const fn base(&self) -> &'static str {
        self.base
    }

    #[must_use]
    pub fn by_id(&self, id: &str) -> String {
        format!("{}/{}", self.base, urlencoding::encode(id))
    }

    /// `/api/{collection}/{id}/{action}`, e.g. `/api/events/evt-1/publish`.
    #[must_use]
    pub fn action(&self, id: &str, action: &str) -> String {
        format!("{}/{action}", self.by_id(id))
    }

    #[must_use]
    pub fn bulk(&self) -> String {
        format!("{}/bulk", self.base)
    }

    #[must_use]
    pub fn stats(&self) -> String {
        format!("{}/stats", self.base)
    }

    #[must_use]
    pub fn export(&self) -> String {
        format!("{}/export", self.base)
    }

    #[must_use]
    pub fn import(&self) -> String {
        format!("{}/import", self.base)
    }
}

/// Substitute `:name` segments in `template` with URL-encoded values.
///
/// Placeholders without a matching parameter are left untouched.
///
/// ```
/// use alum_http::fill_path;
/// let path = fill_path("/api/questions/:id/answers/:answerId", &[("id", "qst-1"), ("answerId", "a b")]);
/// assert_eq!(path, "/api/questions/qst-1/answers/a%20b");
/// ```
#[must_use]
pub fn fill_path(template: &str, params: &[(&str, &str)]) -> String {
    template
        .split('/')
        .map(|segment| {
            segment
                .strip_prefix(':')
                .and_then(|name| params.iter().find(|(key, _)| *key == name))
                .map_or_else(
                    || segment.to_string(),
                    |(_, value)| urlencoding::encode(value).into_owned(),
                )
        })
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn entity_paths() {
        let e = Endpoints::EVENTS;
        assert_eq!(e.base(), "/api/events");
        assert_eq!(e.by_id("evt-1"), "/api/events/evt-1");
        assert_eq!(e.action("evt-1", "publish"), "/api/events/evt-1/publish");
        assert_eq!(e.bulk(), "/api/events/bulk");
        assert_eq!(e.stats(), "/api/events/stats");
        assert_eq!(Endpoints::SPONSORS.export(), "/api/sponsors/export");
        assert_eq!(Endpoints::SPONSORS.import(), "/api/sponsors/import");
    }

    #[test]
    fn ids_are_encoded() {
        assert_eq!(Endpoints::USERS.by_id("a/b"), "/api/users/a%2Fb");
    }

    #[test]
    fn unknown_placeholders_are_kept() {
        assert_eq!(
            fill_path("/api/chapters/:id/members/:userId", &[("id", "chp-1")]),
            "/api/chapters/chp-1/members/:userId"
        );
    }

    #[test]
    fn template_without_placeholders() {
        assert_eq!(fill_path("/api/health", &[("id", "x")]), "/api/health");
    }
}
