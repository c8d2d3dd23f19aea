use serde_json::Value;

/// Parse a JSON object argument such as a settings patch.
pub fn parse_json_object(raw: &str, field: &str) -> anyhow::Result<Value> {
    let value: Value = serde_json::from_str(raw)
        .map_err(|error| anyhow::anyhow!("invalid {field} '{raw}': {error}"))?;
    if !value.is_object() {
        anyhow::bail!("invalid {field} '{raw}': expected a JSON object");
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::parse_json_object;

    #[test]
    fn parses_nested_object() {
        let patch = parse_json_object(r#"{"notifications":{"email":false}}"#, "patch")
            .expect("patch should parse");
        assert_eq!(patch, json!({"notifications": {"email": false}}));
    }

    #[test]
    fn rejects_non_objects() {
        let err = parse_json_object("[1,2]", "patch").expect_err("should fail");
        assert!(err.to_string().contains("expected a JSON object"));
    }

    #[test]
    fn rejects_malformed_json() {
        let err = parse_json_object("{oops", "patch").expect_err("should fail");
        assert!(err.to_string().starts_with("invalid patch '{oops'"));
    }
}
