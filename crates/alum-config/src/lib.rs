//! # alum-config
//!
//! Layered configuration loading using figment, plus the mock/real
//! [`mode`] resolver built from it.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`ALUM_*` prefix, `__` as separator)
//! 2. Injected overrides (see [`AlumConfig::load_with_env_overrides`])
//! 3. Project-level `.alum/config.toml`
//! 4. User-level `~/.config/alum/config.toml`
//! 5. Built-in defaults
//!
//! Figment maps `ALUM_API__BASE_URL` -> `api.base_url`,
//! `ALUM_MOCK__USE_MOCK_API` -> `mock.use_mock_api`, etc.
//!
//! ```no_run
//! use alum_config::AlumConfig;
//!
//! let config = AlumConfig::load_with_dotenv().expect("config");
//! println!("backend: {}", config.api.base_url);
//! ```

mod api;
mod error;
mod general;
mod mock;
pub mod mode;
mod runtime;
mod storage;

pub use api::ApiConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;
pub use mock::MockConfig;
pub use mode::{ApiMode, EnvSignals, ModeDecision, ModeResolver, ModeSource};
pub use runtime::RuntimeConfig;
pub use storage::StorageConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const ENV_PREFIX: &str = "ALUM_";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AlumConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub mock: MockConfig,
    #[serde(default)]
    pub runtime: RuntimeConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl AlumConfig {
    /// Load configuration from TOML files and environment variables.
    ///
    /// Does NOT read `.env`; use [`Self::load_with_dotenv`] for that.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if a source cannot be parsed or a
    /// value has the wrong type.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with_env_overrides(&[])
    }

    /// Load configuration after reading `.env` from the working directory.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Load configuration with externally supplied `ALUM_*` pairs layered
    /// below the process environment.
    ///
    /// This is the injection point for test stubs: pass
    /// `("ALUM_MOCK__USE_MOCK_API", "true")` to pin mock mode without touching
    /// the real environment.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_env_overrides(overrides: &[(String, String)]) -> Result<Self, ConfigError> {
        let config: Self = Self::figment_with_overrides(overrides).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain without injected overrides.
    #[must_use]
    pub fn figment() -> Figment {
        Self::figment_with_overrides(&[])
    }

    fn figment_with_overrides(overrides: &[(String, String)]) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        let local_path = PathBuf::from(".alum/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        for (key, value) in overrides {
            if let Some(path) = env_key_to_path(key) {
                figment = figment.merge((path, value.clone()));
            }
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.general.default_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "general.default_limit".into(),
                reason: "must be greater than zero".into(),
            });
        }
        for (field, url) in [
            ("api.base_url", &self.api.base_url),
            ("mock.base_url", &self.mock.base_url),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::InvalidValue {
                    field: field.into(),
                    reason: format!("expected an http(s) URL, got '{url}'"),
                });
            }
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("alum").join("config.toml"))
    }
}

/// `ALUM_MOCK__USE_MOCK_API` -> `mock.use_mock_api`.
fn env_key_to_path(key: &str) -> Option<String> {
    let rest = key.strip_prefix(ENV_PREFIX)?;
    if rest.is_empty() {
        return None;
    }
    Some(rest.to_ascii_lowercase().replace("__", "."))
}
