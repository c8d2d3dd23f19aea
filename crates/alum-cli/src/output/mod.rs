use alum_core::responses::{ApiFailure, ApiResponse, PaginatedResponse};
use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_table(value),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

/// Print a single-item envelope; an unsuccessful one becomes the error.
///
/// Tables show only the record, JSON keeps the whole envelope.
pub fn output_response<T: Serialize>(
    response: &ApiResponse<T>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    if !response.success {
        return Err(envelope_error(response.error.as_ref(), response.message.as_deref()));
    }
    match format {
        OutputFormat::Table => {
            let data = serde_json::to_value(&response.data)?;
            if data.is_null() {
                output(&response.message, format)
            } else {
                output(&data, format)
            }
        }
        OutputFormat::Json | OutputFormat::Raw => output(response, format),
    }
}

/// Print a page envelope; an unsuccessful one becomes the error.
pub fn output_page<T: Serialize>(
    page: &PaginatedResponse<T>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    if !page.success {
        return Err(envelope_error(page.error.as_ref(), page.message.as_deref()));
    }
    match format {
        OutputFormat::Table => {
            output(&page.data, format)?;
            let p = &page.pagination;
            println!(
                "page {} of {} ({} total)",
                p.page,
                p.total_pages.max(1),
                p.total
            );
            Ok(())
        }
        OutputFormat::Json | OutputFormat::Raw => output(page, format),
    }
}

fn envelope_error(error: Option<&ApiFailure>, message: Option<&str>) -> anyhow::Error {
    match error {
        Some(failure) => anyhow::Error::new(failure.clone()),
        None => anyhow::anyhow!("{}", message.unwrap_or("request failed")),
    }
}

fn table_options() -> table::TableOptions {
    let prefs = ui::prefs();
    table::TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
    }
}

fn render_table<T: Serialize>(value: &T) -> anyhow::Result<String> {
    let options = table_options();
    let value = serde_json::to_value(value)?;
    match value {
        Value::Array(items) => Ok(render_array_table(&items, options)),
        Value::Object(map) => {
            let headers = ["key", "value"];
            let mut entries = map.into_iter().collect::<Vec<_>>();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            let rows = entries
                .into_iter()
                .map(|(key, value)| vec![key, value_to_cell(&value)])
                .collect::<Vec<_>>();
            Ok(table::render_entity_table(&headers, &rows, options))
        }
        scalar => {
            let headers = ["value"];
            let rows = vec![vec![value_to_cell(&scalar)]];
            Ok(table::render_entity_table(&headers, &rows, options))
        }
    }
}

fn render_array_table(items: &[Value], options: table::TableOptions) -> String {
    if items.is_empty() {
        return String::from("(no rows)");
    }

    if !items.iter().all(Value::is_object) {
        let headers = ["value"];
        let rows = items
            .iter()
            .map(|item| vec![value_to_cell(item)])
            .collect::<Vec<_>>();
        return table::render_entity_table(&headers, &rows, options);
    }

    let mut headers = Vec::<String>::new();
    for map in items.iter().filter_map(Value::as_object) {
        for key in map.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }

    if headers.is_empty() {
        return String::from("(no columns)");
    }

    // `id` first, the rest alphabetical.
    headers.sort_by(|a, b| (a != "id").cmp(&(b != "id")).then_with(|| a.cmp(b)));

    let header_refs = headers.iter().map(String::as_str).collect::<Vec<_>>();
    let rows = items
        .iter()
        .filter_map(Value::as_object)
        .map(|map| {
            headers
                .iter()
                .map(|header| map.get(header).map_or_else(|| String::from("-"), value_to_cell))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    table::render_entity_table(&header_refs, &rows, options)
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        Value::Array(items) if items.iter().all(Value::is_string) => items
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join(","),
        other => serde_json::to_string(other).unwrap_or_else(|_| String::from("<invalid-json>")),
    }
}

#[cfg(test)]
mod tests {
    use alum_core::responses::{ApiFailure, ApiResponse};
    use pretty_assertions::assert_eq;
    use serde::Serialize;
    use serde_json::json;

    use super::{output_response, render, value_to_cell};
    use crate::cli::OutputFormat;

    #[derive(Serialize)]
    struct Row {
        title: &'static str,
        id: &'static str,
        capacity: u32,
    }

    #[test]
    fn json_render_is_valid_json() {
        let value = Row {
            title: "Gala",
            id: "evt-1",
            capacity: 80,
        };
        let out = render(&value, OutputFormat::Json).expect("json render should work");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["id"], "evt-1");
        assert_eq!(parsed["capacity"], 80);
    }

    #[test]
    fn raw_render_is_single_line_json() {
        let out = render(&json!({"a": [1, 2]}), OutputFormat::Raw).expect("raw render should work");
        assert!(!out.contains('\n'));
    }

    #[test]
    fn array_table_puts_id_first() {
        let rows = vec![
            Row {
                title: "Gala",
                id: "evt-1",
                capacity: 80,
            },
            Row {
                title: "Career fair",
                id: "evt-2",
                capacity: 200,
            },
        ];
        let out = render(&rows, OutputFormat::Table).expect("table render should work");
        let header = out.lines().next().expect("header line");
        let columns: Vec<&str> = header.split_whitespace().collect();
        assert_eq!(columns, vec!["id", "capacity", "title"]);
        assert!(out.contains("Career fair"));
    }

    #[test]
    fn empty_array_renders_placeholder() {
        let rows: Vec<Row> = Vec::new();
        assert_eq!(render(&rows, OutputFormat::Table).expect("render"), "(no rows)");
    }

    #[test]
    fn string_lists_render_comma_separated() {
        assert_eq!(value_to_cell(&json!(["rust", "go"])), "rust,go");
        assert_eq!(value_to_cell(&json!([1, 2])), "[1,2]");
        assert_eq!(value_to_cell(&json!(null)), "-");
    }

    #[test]
    fn failed_envelope_is_an_error() {
        let response: ApiResponse<Row> =
            ApiResponse::fail(ApiFailure::not_found("Event", "evt-9"));
        let err = output_response(&response, OutputFormat::Json).expect_err("should fail");
        assert_eq!(err.to_string(), "Event evt-9 not found (code 404)");
    }
}
