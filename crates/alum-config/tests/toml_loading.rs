//! Integration tests for TOML configuration loading.
//!
//! Uses `figment::Jail` for sandboxed cwd and env var manipulation.

use alum_config::AlumConfig;
use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};

#[test]
fn loads_sections_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[api]
base_url = "https://alumni.example.org"
timeout_secs = 5

[mock]
base_url = "http://127.0.0.1:4000"
use_mock_api = "true"
cache_ttl_ms = 1000
synthesize_demo_data = false

[general]
default_limit = 50
"#,
        )?;

        let config: AlumConfig = Figment::from(Serialized::defaults(AlumConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.api.base_url, "https://alumni.example.org");
        assert_eq!(config.api.timeout_secs, 5);
        assert_eq!(config.mock.base_url, "http://127.0.0.1:4000");
        assert_eq!(config.mock.use_mock_api.as_deref(), Some("true"));
        assert_eq!(config.mock.cache_ttl_ms, 1000);
        assert!(!config.mock.synthesize_demo_data);
        assert_eq!(config.general.default_limit, 50);
        Ok(())
    });
}

#[test]
fn project_config_is_picked_up_by_load() {
    Jail::expect_with(|jail| {
        jail.create_dir(".alum")?;
        jail.create_file(
            ".alum/config.toml",
            r#"
[storage]
dir = "/tmp/alum-test-state"
"#,
        )?;

        let config = AlumConfig::load().expect("config loads");
        assert_eq!(config.storage.dir, "/tmp/alum-test-state");
        Ok(())
    });
}

#[test]
fn env_beats_project_toml() {
    Jail::expect_with(|jail| {
        jail.create_dir(".alum")?;
        jail.create_file(
            ".alum/config.toml",
            r#"
[mock]
cache_ttl_ms = 1000
"#,
        )?;
        jail.set_env("ALUM_MOCK__CACHE_TTL_MS", "250");

        let config = AlumConfig::load().expect("config loads");
        assert_eq!(config.mock.cache_ttl_ms, 250);
        Ok(())
    });
}
