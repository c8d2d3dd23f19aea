//! Runtime environment detection.

use serde::{Deserialize, Serialize};

/// Set by cargo-nextest for every test process it spawns.
const NEXTEST_MARKER: &str = "NEXTEST_RUN_ID";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RuntimeConfig {
    /// Declare that the process runs under a test harness. Mocks auto-enable
    /// in test mode unless the environment explicitly says otherwise.
    #[serde(default)]
    pub test_mode: bool,
}

impl RuntimeConfig {
    /// Test mode from config, or detected from the test runner's environment.
    #[must_use]
    pub fn detect_test_mode(&self) -> bool {
        self.test_mode || std::env::var_os(NEXTEST_MARKER).is_some()
    }
}
