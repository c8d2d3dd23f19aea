//! List query parameters: `_page`, `_limit`, `_sort`, `_order` and filters.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_PAGE: usize = 1;
pub const DEFAULT_LIMIT: usize = 20;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Asc),
            "desc" | "descending" => Ok(Self::Desc),
            other => Err(format!("unknown sort direction: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub field: String,
    pub direction: SortDirection,
}

/// One page request. Filters with empty values are never sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub page: usize,
    pub limit: usize,
    pub filters: BTreeMap<String, String>,
    pub sort: Option<SortSpec>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE, DEFAULT_LIMIT)
    }
}

impl ListQuery {
    #[must_use]
    pub const fn new(page: usize, limit: usize) -> Self {
        Self {
            page,
            limit,
            filters: BTreeMap::new(),
            sort: None,
        }
    }

    #[must_use]
    pub fn with_filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_filters<K, V>(mut self, filters: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.filters
            .extend(filters.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    #[must_use]
    pub fn with_sort(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.sort = Some(SortSpec {
            field: field.into(),
            direction,
        });
        self
    }

    /// Filters that actually constrain the result (non-empty values).
    pub fn active_filters(&self) -> impl Iterator<Item = (&str, &str)> {
        self.filters
            .iter()
            .filter(|(_, v)| !v.trim().is_empty())
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Query parameters in json-server convention.
    #[must_use]
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![
            ("_page".to_string(), self.page.to_string()),
            ("_limit".to_string(), self.limit.to_string()),
        ];
        if let Some(sort) = &self.sort {
            params.push(("_sort".to_string(), sort.field.clone()));
            params.push(("_order".to_string(), sort.direction.to_string()));
        }
        params.extend(
            self.active_filters()
                .map(|(k, v)| (k.to_string(), v.to_string())),
        );
        params
    }

    /// Encoded query string without the leading `?`.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        encode_params(&self.to_params())
    }
}

#[must_use]
pub fn encode_params(params: &[(String, String)]) -> String {
    params
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn defaults() {
        let q = ListQuery::default();
        assert_eq!(q.page, 1);
        assert_eq!(q.limit, 20);
        assert_eq!(q.to_query_string(), "_page=1&_limit=20");
    }

    #[test]
    fn empty_filters_are_dropped() {
        let q = ListQuery::new(2, 5)
            .with_filter("status", "published")
            .with_filter("tags", "")
            .with_sort("startDate", SortDirection::Desc);
        assert_eq!(
            q.to_query_string(),
            "_page=2&_limit=5&_sort=startDate&_order=desc&status=published"
        );
    }

    #[test]
    fn values_are_encoded() {
        let q = ListQuery::new(1, 10).with_filter("title", "career fair & mixer");
        assert!(q.to_query_string().ends_with("title=career%20fair%20%26%20mixer"));
    }

    #[rstest]
    #[case("asc", SortDirection::Asc)]
    #[case("DESC", SortDirection::Desc)]
    #[case("descending", SortDirection::Desc)]
    fn parse_direction(#[case] input: &str, #[case] expected: SortDirection) {
        assert_eq!(input.parse::<SortDirection>().unwrap(), expected);
    }

    #[test]
    fn parse_direction_rejects_garbage() {
        assert!("sideways".parse::<SortDirection>().is_err());
    }
}
