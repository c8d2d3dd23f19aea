//! Mock/real mode resolution.
//!
//! Decision order, first match wins:
//! 1. The persisted `useMockApi` override (`"true"` / `"false"`).
//! 2. Environment candidates: any literal `"false"` disables mocks, otherwise
//!    any literal `"true"` enables them.
//! 3. Test mode enables mocks.
//! 4. Real backend.
//!
//! An explicit `"false"` in the environment must be checked before the test
//! mode fallback so it can suppress auto-enabling.
//!
//! Environment candidates and test mode are collected once into
//! [`EnvSignals`]; only the override is re-read on every call because users
//! toggle it at runtime.

use std::fmt;
use std::sync::Arc;

use alum_core::state::{KEY_USE_MOCK_API, KeyValueStore};
use serde::{Deserialize, Serialize};

use crate::AlumConfig;

/// Process environment fallback for the mock flag.
pub const ENV_USE_MOCK_API: &str = "USE_MOCK_API";

/// Which backend serves a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiMode {
    Mock,
    Real,
}

impl ApiMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mock => "mock",
            Self::Real => "real",
        }
    }

    #[must_use]
    pub const fn is_mock(self) -> bool {
        matches!(self, Self::Mock)
    }
}

impl fmt::Display for ApiMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The rule that settled a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModeSource {
    Override,
    Environment,
    TestMode,
    Default,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeDecision {
    pub mode: ApiMode,
    pub source: ModeSource,
}

/// Interpret a flag literal. Only exact `"true"` / `"false"` count.
#[must_use]
pub fn parse_flag(value: &str) -> Option<bool> {
    match value {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// Environment-derived inputs, collected once at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSignals {
    candidates: Vec<Option<String>>,
    test_mode: bool,
}

impl EnvSignals {
    #[must_use]
    pub const fn new(candidates: Vec<Option<String>>, test_mode: bool) -> Self {
        Self {
            candidates,
            test_mode,
        }
    }

    /// Gather the three candidate sources: the loaded config value (which
    /// carries injected overrides and `ALUM_MOCK__USE_MOCK_API`), the
    /// build-time `ALUM_USE_MOCK_API`, and the `USE_MOCK_API` process variable.
    #[must_use]
    pub fn collect(config: &AlumConfig) -> Self {
        Self {
            candidates: vec![
                config.mock.use_mock_api.clone(),
                option_env!("ALUM_USE_MOCK_API").map(String::from),
                std::env::var(ENV_USE_MOCK_API).ok(),
            ],
            test_mode: config.runtime.detect_test_mode(),
        }
    }

    /// The environment's explicit verdict, if any. `"false"` outranks `"true"`.
    #[must_use]
    pub fn explicit(&self) -> Option<bool> {
        let flags: Vec<bool> = self
            .candidates
            .iter()
            .flatten()
            .filter_map(|value| parse_flag(value))
            .collect();
        if flags.contains(&false) {
            Some(false)
        } else if flags.contains(&true) {
            Some(true)
        } else {
            None
        }
    }

    #[must_use]
    pub const fn test_mode(&self) -> bool {
        self.test_mode
    }
}

/// Pure decision function over the override and environment signals.
#[must_use]
pub fn resolve_mode(override_flag: Option<&str>, env: &EnvSignals) -> ModeDecision {
    if let Some(use_mock) = override_flag.and_then(parse_flag) {
        return ModeDecision {
            mode: if use_mock { ApiMode::Mock } else { ApiMode::Real },
            source: ModeSource::Override,
        };
    }
    if let Some(use_mock) = env.explicit() {
        return ModeDecision {
            mode: if use_mock { ApiMode::Mock } else { ApiMode::Real },
            source: ModeSource::Environment,
        };
    }
    if env.test_mode() {
        return ModeDecision {
            mode: ApiMode::Mock,
            source: ModeSource::TestMode,
        };
    }
    ModeDecision {
        mode: ApiMode::Real,
        source: ModeSource::Default,
    }
}

/// Per-call resolver shared by the mock loader and every facade service.
#[derive(Clone)]
pub struct ModeResolver {
    env: EnvSignals,
    store: Option<Arc<dyn KeyValueStore>>,
}

impl ModeResolver {
    #[must_use]
    pub fn new(env: EnvSignals, store: Option<Arc<dyn KeyValueStore>>) -> Self {
        Self { env, store }
    }

    /// Resolver pinned to one mode via environment signals, with no override store.
    #[must_use]
    pub fn fixed(mode: ApiMode) -> Self {
        let flag = if mode.is_mock() { "true" } else { "false" };
        Self::new(EnvSignals::new(vec![Some(flag.to_string())], false), None)
    }

    #[must_use]
    pub fn decision(&self) -> ModeDecision {
        let override_flag = self
            .store
            .as_ref()
            .and_then(|store| store.get_item(KEY_USE_MOCK_API));
        let decision = resolve_mode(override_flag.as_deref(), &self.env);
        tracing::debug!(mode = %decision.mode, source = ?decision.source, "resolved api mode");
        decision
    }

    #[must_use]
    pub fn resolve(&self) -> ApiMode {
        self.decision().mode
    }

    #[must_use]
    pub fn use_mock(&self) -> bool {
        self.resolve().is_mock()
    }

    /// Persist (or clear, with `None`) the explicit override.
    ///
    /// Without a backing store this is a no-op and logs a warning.
    pub fn set_override(&self, mode: Option<ApiMode>) {
        let Some(store) = &self.store else {
            tracing::warn!("no persisted store configured; mode override ignored");
            return;
        };
        match mode {
            Some(ApiMode::Mock) => store.set_item(KEY_USE_MOCK_API, "true"),
            Some(ApiMode::Real) => store.set_item(KEY_USE_MOCK_API, "false"),
            None => store.remove_item(KEY_USE_MOCK_API),
        }
    }

    #[must_use]
    pub const fn env(&self) -> &EnvSignals {
        &self.env
    }
}

impl fmt::Debug for ModeResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModeResolver")
            .field("env", &self.env)
            .field("has_store", &self.store.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryStore(Mutex<HashMap<String, String>>);

    impl KeyValueStore for MemoryStore {
        fn get_item(&self, key: &str) -> Option<String> {
            self.0.lock().ok()?.get(key).cloned()
        }

        fn set_item(&self, key: &str, value: &str) {
            if let Ok(mut map) = self.0.lock() {
                map.insert(key.to_string(), value.to_string());
            }
        }

        fn remove_item(&self, key: &str) {
            if let Ok(mut map) = self.0.lock() {
                map.remove(key);
            }
        }
    }

    fn env(flag: Option<&str>, test_mode: bool) -> EnvSignals {
        EnvSignals::new(vec![flag.map(String::from)], test_mode)
    }

    #[rstest]
    #[case::override_false_beats_env_true(Some("false"), Some("true"), false, ApiMode::Real, ModeSource::Override)]
    #[case::override_true_beats_env_false(Some("true"), Some("false"), false, ApiMode::Mock, ModeSource::Override)]
    #[case::env_false_suppresses_test_mode(None, Some("false"), true, ApiMode::Real, ModeSource::Environment)]
    #[case::env_true(None, Some("true"), false, ApiMode::Mock, ModeSource::Environment)]
    #[case::test_mode_auto_enables(None, None, true, ApiMode::Mock, ModeSource::TestMode)]
    #[case::default_is_real(None, None, false, ApiMode::Real, ModeSource::Default)]
    #[case::garbage_override_ignored(Some("yes"), None, false, ApiMode::Real, ModeSource::Default)]
    #[case::non_literal_env_ignored(None, Some("TRUE"), true, ApiMode::Mock, ModeSource::TestMode)]
    fn precedence(
        #[case] override_flag: Option<&str>,
        #[case] env_flag: Option<&str>,
        #[case] test_mode: bool,
        #[case] mode: ApiMode,
        #[case] source: ModeSource,
    ) {
        let decision = resolve_mode(override_flag, &env(env_flag, test_mode));
        assert_eq!(decision, ModeDecision { mode, source });
    }

    #[test]
    fn any_false_candidate_wins_over_true() {
        let signals = EnvSignals::new(
            vec![Some("true".into()), None, Some("false".into())],
            false,
        );
        assert_eq!(signals.explicit(), Some(false));
    }

    #[test]
    fn resolver_reads_override_each_call() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::default());
        let resolver = ModeResolver::new(env(Some("true"), false), Some(store));
        assert_eq!(resolver.resolve(), ApiMode::Mock);

        resolver.set_override(Some(ApiMode::Real));
        assert_eq!(resolver.resolve(), ApiMode::Real);
        assert_eq!(resolver.decision().source, ModeSource::Override);

        resolver.set_override(None);
        assert_eq!(resolver.resolve(), ApiMode::Mock);
    }

    #[test]
    fn fixed_resolver() {
        assert!(ModeResolver::fixed(ApiMode::Mock).use_mock());
        assert!(!ModeResolver::fixed(ApiMode::Real).use_mock());
    }
}
