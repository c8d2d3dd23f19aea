//! Pure filter/sort/paginate helpers over raw JSON records.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use alum_core::responses::{Page, Pagination};
use alum_http::{ListQuery, SortDirection};
use serde_json::Value;

/// Filter map: field name → wanted value. `null`, `""` and absent values
/// constrain nothing.
pub type Filters = BTreeMap<String, Value>;

/// Full-text key: matches when any string field contains the value.
pub const SEARCH_KEY: &str = "q";

/// Filters carried by a [`ListQuery`], as JSON strings.
#[must_use]
pub fn filters_from_query(query: &ListQuery) -> Filters {
    query
        .active_filters()
        .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
        .collect()
}

fn is_empty_filter(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// Scalar rendering used when a string filter meets a non-string field.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn equals(field: &Value, wanted: &Value) -> bool {
    if field == wanted {
        return true;
    }
    match wanted {
        Value::String(text) => scalar_text(field).is_some_and(|f| f == *text),
        _ => false,
    }
}

fn field_matches(field: Option<&Value>, wanted: &Value) -> bool {
    match field {
        Some(Value::Array(elements)) => elements.iter().any(|e| equals(e, wanted)),
        Some(Value::String(text)) => scalar_text(wanted)
            .is_some_and(|w| text.to_lowercase().contains(&w.to_lowercase())),
        Some(other) => equals(other, wanted),
        None => false,
    }
}

fn search_matches(item: &Value, wanted: &Value) -> bool {
    let Some(needle) = scalar_text(wanted).map(|w| w.to_lowercase()) else {
        return false;
    };
    item.as_object().is_some_and(|map| {
        map.values().any(|v| match v {
            Value::String(s) => s.to_lowercase().contains(&needle),
            Value::Array(elements) => elements
                .iter()
                .filter_map(Value::as_str)
                .any(|s| s.to_lowercase().contains(&needle)),
            _ => false,
        })
    })
}

fn item_matches(item: &Value, filters: &Filters) -> bool {
    filters
        .iter()
        .filter(|(_, wanted)| !is_empty_filter(wanted))
        .all(|(key, wanted)| {
            if key == SEARCH_KEY && item.get(SEARCH_KEY).is_none() {
                search_matches(item, wanted)
            } else {
                field_matches(item.get(key), wanted)
            }
        })
}

/// Keep items matching every non-empty filter.
///
/// - array field: contains the value
/// - string field: case-insensitive substring
/// - anything else: equality (a string filter also matches a number or
///   boolean that renders to it)
#[must_use]
pub fn filter_items(items: &[Value], filters: &Filters) -> Vec<Value> {
    items
        .iter()
        .filter(|item| item_matches(item, filters))
        .cloned()
        .collect()
}

fn rank(value: Option<&Value>) -> u8 {
    match value {
        None | Some(Value::Null) => 0,
        Some(Value::Bool(_)) => 1,
        Some(Value::Number(_)) => 2,
        Some(Value::String(_)) => 3,
        Some(Value::Array(_)) => 4,
        Some(Value::Object(_)) => 5,
    }
}

/// Total order on JSON field values: missing/null first, then by kind, then
/// by value within a kind.
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            let (x, y) = (x.as_f64().unwrap_or(0.0), y.as_f64().unwrap_or(0.0));
            x.total_cmp(&y)
        }
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (Some(Value::Array(x)), Some(Value::Array(y))) => x.len().cmp(&y.len()),
        _ => rank(a).cmp(&rank(b)),
    }
}

/// Stable sort on `key`; returns a new vector.
#[must_use]
pub fn sort_items(items: &[Value], key: &str, direction: SortDirection) -> Vec<Value> {
    let mut sorted = items.to_vec();
    sorted.sort_by(|a, b| {
        let ordering = compare_values(a.get(key), b.get(key));
        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
    sorted
}

/// Slice `[(page-1)*limit, page*limit)` out of `items`.
///
/// Out-of-range pages (including page 0) yield no items; `total` always
/// counts the full set. A zero `limit` yields no items and zero pages.
#[must_use]
pub fn paginate_items<T: Clone>(items: &[T], page: usize, limit: usize) -> Page<T> {
    let pagination = Pagination::new(page, limit, items.len());
    let slice: &[T] = if page == 0 || limit == 0 {
        &[]
    } else {
        let start = (page - 1).saturating_mul(limit).min(items.len());
        let end = start.saturating_add(limit).min(items.len());
        &items[start..end]
    };
    Page {
        items: slice.to_vec(),
        total: pagination.total,
        page: pagination.page,
        limit: pagination.limit,
        total_pages: pagination.total_pages,
    }
}

/// Filter, sort and paginate in one go, as the mock list endpoints do.
#[must_use]
pub fn apply_query(items: &[Value], query: &ListQuery) -> Page<Value> {
    let filtered = filter_items(items, &filters_from_query(query));
    let ordered = match &query.sort {
        Some(sort) => sort_items(&filtered, &sort.field, sort.direction),
        None => filtered,
    };
    paginate_items(&ordered, query.page, query.limit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    fn events() -> Vec<Value> {
        vec![
            json!({"id": "evt-1", "title": "Spring Gala", "capacity": 100, "tags": ["social", "fundraiser"], "status": "published"}),
            json!({"id": "evt-2", "title": "Career Fair", "capacity": 250, "tags": ["career"], "status": "draft"}),
            json!({"id": "evt-3", "title": "Alumni Gala Dinner", "capacity": 80, "tags": [], "status": "published"}),
        ]
    }

    fn ids(items: &[Value]) -> Vec<&str> {
        items.iter().filter_map(|v| v["id"].as_str()).collect()
    }

    #[test]
    fn empty_filters_are_identity() {
        assert_eq!(filter_items(&events(), &Filters::new()), events());
    }

    #[rstest]
    #[case(Value::Null)]
    #[case(json!(""))]
    #[case(json!("   "))]
    fn empty_values_never_exclude(#[case] value: Value) {
        let filters = Filters::from([("status".to_string(), value)]);
        assert_eq!(filter_items(&events(), &filters).len(), 3);
    }

    #[test]
    fn string_fields_match_case_insensitive_substring() {
        let filters = Filters::from([("title".to_string(), json!("gala"))]);
        assert_eq!(ids(&filter_items(&events(), &filters)), vec!["evt-1", "evt-3"]);
    }

    #[test]
    fn array_fields_match_membership() {
        let filters = Filters::from([("tags".to_string(), json!("career"))]);
        assert_eq!(ids(&filter_items(&events(), &filters)), vec!["evt-2"]);
    }

    #[test]
    fn numbers_match_exactly_even_from_strings() {
        let filters = Filters::from([("capacity".to_string(), json!("100"))]);
        assert_eq!(ids(&filter_items(&events(), &filters)), vec!["evt-1"]);
        let filters = Filters::from([("capacity".to_string(), json!(80))]);
        assert_eq!(ids(&filter_items(&events(), &filters)), vec!["evt-3"]);
    }

    #[test]
    fn missing_field_excludes() {
        let filters = Filters::from([("chapterId".to_string(), json!("chp-1"))]);
        assert!(filter_items(&events(), &filters).is_empty());
    }

    #[test]
    fn search_key_scans_string_fields() {
        let filters = Filters::from([(SEARCH_KEY.to_string(), json!("FUNDRAISER"))]);
        assert_eq!(ids(&filter_items(&events(), &filters)), vec!["evt-1"]);
    }

    #[test]
    fn sort_does_not_mutate_input() {
        let input = events();
        let sorted = sort_items(&input, "capacity", SortDirection::Asc);
        assert_eq!(ids(&sorted), vec!["evt-3", "evt-1", "evt-2"]);
        assert_eq!(ids(&input), vec!["evt-1", "evt-2", "evt-3"]);
    }

    #[rstest]
    #[case("capacity")]
    #[case("title")]
    #[case("id")]
    fn asc_reversed_equals_desc(#[case] key: &str) {
        let mut asc = sort_items(&events(), key, SortDirection::Asc);
        asc.reverse();
        assert_eq!(asc, sort_items(&events(), key, SortDirection::Desc));
    }

    #[test]
    fn sort_is_stable_for_ties() {
        let sorted = sort_items(&events(), "status", SortDirection::Asc);
        assert_eq!(ids(&sorted), vec!["evt-2", "evt-1", "evt-3"]);
    }

    #[test]
    fn missing_values_sort_first() {
        let items = vec![json!({"id": "a", "n": 2}), json!({"id": "b"}), json!({"id": "c", "n": 1})];
        assert_eq!(ids(&sort_items(&items, "n", SortDirection::Asc)), vec!["b", "c", "a"]);
    }

    #[rstest]
    #[case(0, 3)]
    #[case(1, 3)]
    #[case(7, 3)]
    #[case(10, 4)]
    #[case(23, 5)]
    #[case(5, 10)]
    fn pages_concatenate_to_input(#[case] len: usize, #[case] limit: usize) {
        let items: Vec<usize> = (0..len).collect();
        let first = paginate_items(&items, 1, limit);
        assert_eq!(first.total_pages, len.div_ceil(limit));

        let mut rebuilt = Vec::new();
        for page in 1..=first.total_pages {
            let p = paginate_items(&items, page, limit);
            assert_eq!(p.total, len);
            rebuilt.extend(p.items);
        }
        assert_eq!(rebuilt, items);
    }

    #[rstest]
    #[case(0)]
    #[case(4)]
    #[case(99)]
    fn out_of_range_pages_are_empty(#[case] page: usize) {
        let p = paginate_items(&[1, 2, 3, 4, 5], page, 2);
        assert!(p.items.is_empty());
        assert_eq!(p.total, 5);
        assert_eq!(p.total_pages, 3);
    }

    #[test]
    fn zero_limit_has_no_pages() {
        let p = paginate_items(&[1, 2, 3], 1, 0);
        assert!(p.items.is_empty());
        assert_eq!(p.total_pages, 0);
    }

    #[test]
    fn apply_query_combines_steps() {
        let query = ListQuery::new(1, 1)
            .with_filter("status", "published")
            .with_sort("capacity", SortDirection::Desc);
        let page = apply_query(&events(), &query);
        assert_eq!(ids(&page.items), vec!["evt-1"]);
        assert_eq!(page.total, 2);
        assert_eq!(page.total_pages, 2);
    }
}
