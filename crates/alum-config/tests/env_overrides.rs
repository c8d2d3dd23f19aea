use alum_config::{AlumConfig, ApiMode, EnvSignals, ModeSource, mode::resolve_mode};
use figment::Jail;
use rstest::rstest;

#[test]
fn external_overrides_fill_config_values() {
    Jail::expect_with(|_jail| {
        let overrides = vec![(
            "ALUM_MOCK__USE_MOCK_API".to_string(),
            "true".to_string(),
        )];

        let config = AlumConfig::load_with_env_overrides(&overrides).expect("config loads");
        assert_eq!(config.mock.use_mock_api.as_deref(), Some("true"));
        Ok(())
    });
}

#[test]
fn process_env_beats_external_overrides() {
    Jail::expect_with(|jail| {
        jail.set_env("ALUM_MOCK__USE_MOCK_API", "false");
        let overrides = vec![(
            "ALUM_MOCK__USE_MOCK_API".to_string(),
            "true".to_string(),
        )];

        let config = AlumConfig::load_with_env_overrides(&overrides).expect("config loads");
        assert_eq!(config.mock.use_mock_api.as_deref(), Some("false"));
        Ok(())
    });
}

#[test]
fn explicit_false_env_suppresses_test_mode() {
    Jail::expect_with(|jail| {
        jail.set_env("ALUM_MOCK__USE_MOCK_API", "false");
        jail.set_env("ALUM_RUNTIME__TEST_MODE", "true");

        let config = AlumConfig::load().expect("config loads");
        let signals = EnvSignals::collect(&config);
        assert!(signals.test_mode());

        let decision = resolve_mode(None, &signals);
        assert_eq!(decision.mode, ApiMode::Real);
        assert_eq!(decision.source, ModeSource::Environment);
        Ok(())
    });
}

#[test]
fn test_mode_without_env_signal_enables_mocks() {
    Jail::expect_with(|jail| {
        jail.set_env("ALUM_RUNTIME__TEST_MODE", "true");

        let config = AlumConfig::load().expect("config loads");
        let signals = EnvSignals::new(vec![config.mock.use_mock_api.clone()], config.runtime.test_mode);
        let decision = resolve_mode(None, &signals);
        assert_eq!(decision.mode, ApiMode::Mock);
        assert_eq!(decision.source, ModeSource::TestMode);
        Ok(())
    });
}

#[test]
fn invalid_base_url_is_rejected() {
    Jail::expect_with(|jail| {
        jail.set_env("ALUM_API__BASE_URL", "localhost:8080");
        let err = AlumConfig::load().expect_err("should reject");
        assert!(err.to_string().contains("api.base_url"));
        Ok(())
    });
}

#[rstest]
#[case(Some("true"), Some("false"), false, ApiMode::Mock, ModeSource::Override)]
#[case(Some("false"), Some("true"), true, ApiMode::Real, ModeSource::Override)]
#[case(Some("yes"), Some("true"), false, ApiMode::Mock, ModeSource::Environment)]
#[case(None, Some("false"), true, ApiMode::Real, ModeSource::Environment)]
#[case(None, Some("TRUE"), true, ApiMode::Mock, ModeSource::TestMode)]
#[case(None, None, false, ApiMode::Real, ModeSource::Default)]
fn mode_precedence(
    #[case] override_flag: Option<&str>,
    #[case] env_flag: Option<&str>,
    #[case] test_mode: bool,
    #[case] mode: ApiMode,
    #[case] source: ModeSource,
) {
    let signals = EnvSignals::new(vec![env_flag.map(str::to_string)], test_mode);
    let decision = resolve_mode(override_flag, &signals);
    assert_eq!(decision.mode, mode);
    assert_eq!(decision.source, source);
}
