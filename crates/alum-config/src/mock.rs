//! Mock backend configuration.

use serde::{Deserialize, Deserializer, Serialize};

fn default_base_url() -> String {
    "http://localhost:3001".to_string()
}

/// Default collection cache lifetime: 30 seconds.
const fn default_cache_ttl_ms() -> u64 {
    30_000
}

const fn default_synthesize_demo_data() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MockConfig {
    /// Base URL of the local JSON document server.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Raw mock flag. Only the literals `"true"` and `"false"` carry meaning;
    /// anything else is treated as unset.
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub use_mock_api: Option<String>,

    /// Lifetime of a cached collection, in milliseconds.
    #[serde(default = "default_cache_ttl_ms")]
    pub cache_ttl_ms: u64,

    /// Whether mock APIs may synthesize data that is not in the store
    /// (event analytics, placeholder mentorship sessions).
    #[serde(default = "default_synthesize_demo_data")]
    pub synthesize_demo_data: bool,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            use_mock_api: None,
            cache_ttl_ms: default_cache_ttl_ms(),
            synthesize_demo_data: default_synthesize_demo_data(),
        }
    }
}

impl MockConfig {
    #[must_use]
    pub fn normalized_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

/// Environment providers parse `true`/`false` into booleans; keep both
/// shapes as the literal string so the resolver can compare exactly.
fn deserialize_flag<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawFlag {
        Bool(bool),
        Text(String),
    }

    Ok(
        Option::<RawFlag>::deserialize(deserializer)?.map(|raw| match raw {
            RawFlag::Bool(flag) => flag.to_string(),
            RawFlag::Text(text) => text,
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = MockConfig::default();
        assert_eq!(config.base_url, "http://localhost:3001");
        assert_eq!(config.cache_ttl_ms, 30_000);
        assert!(config.use_mock_api.is_none());
        assert!(config.synthesize_demo_data);
    }

    #[test]
    fn flag_accepts_bool_or_string() {
        let from_bool: MockConfig = serde_json::from_str(r#"{"use_mock_api": true}"#).unwrap();
        assert_eq!(from_bool.use_mock_api.as_deref(), Some("true"));

        let from_text: MockConfig = serde_json::from_str(r#"{"use_mock_api": "false"}"#).unwrap();
        assert_eq!(from_text.use_mock_api.as_deref(), Some("false"));
    }
}
