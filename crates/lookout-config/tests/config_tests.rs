// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Lookout configuration system.

use lookout_config::diagnostic::ConfigError;
use lookout_config::model::{LookoutConfig, RoutingMode, SearchDepth};
use lookout_config::{load_and_validate_path, load_and_validate_str, load_config_from_str};

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_lookout_config() {
    let toml = r#"
[agent]
name = "scout"
log_level = "debug"
log_file = "/tmp/lookout.log"
system_prompt = "Be brief."

[groq]
api_key = "gsk_test"
base_url = "https://groq.example.com/openai/v1"
model = "llama-3.1-8b-instant"
temperature = 0.5
timeout_secs = 30
max_retries = 2

[tavily]
api_key = "tvly-test"
max_results = 5
search_depth = "advanced"
timeout_secs = 5

[routing]
mode = "always"
extra_keywords = ["standings", "box office"]
recent_year_floor = 2025
max_snippet_chars = 200
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.agent.name, "scout");
    assert_eq!(config.agent.log_level, "debug");
    assert_eq!(config.agent.log_file.as_deref(), Some("/tmp/lookout.log"));
    assert_eq!(config.agent.system_prompt, "Be brief.");
    assert_eq!(config.groq.api_key.as_deref(), Some("gsk_test"));
    assert_eq!(config.groq.base_url, "https://groq.example.com/openai/v1");
    assert_eq!(config.groq.model, "llama-3.1-8b-instant");
    assert_eq!(config.groq.temperature, 0.5);
    assert_eq!(config.groq.timeout_secs, 30);
    assert_eq!(config.groq.max_retries, 2);
    assert_eq!(config.tavily.api_key.as_deref(), Some("tvly-test"));
    assert_eq!(config.tavily.base_url, "https://api.tavily.com");
    assert_eq!(config.tavily.max_results, 5);
    assert_eq!(config.tavily.search_depth, SearchDepth::Advanced);
    assert_eq!(config.tavily.timeout_secs, 5);
    assert_eq!(config.routing.mode, RoutingMode::Always);
    assert_eq!(config.routing.extra_keywords, vec!["standings", "box office"]);
    assert_eq!(config.routing.recent_year_floor, 2025);
    assert_eq!(config.routing.max_snippet_chars, 200);
}

/// Missing optional sections use defaults without error.
#[test]
fn missing_optional_sections_use_defaults() {
    let config = load_config_from_str("").expect("empty TOML should use defaults");

    assert_eq!(config.agent.name, "lookout");
    assert_eq!(config.agent.log_level, "info");
    assert!(config.agent.log_file.is_none());
    assert!(config.agent.system_prompt.starts_with("You are an expert AI assistant"));
    assert!(config.groq.api_key.is_none());
    assert_eq!(config.groq.base_url, "https://api.groq.com/openai/v1");
    assert_eq!(config.groq.model, "llama-3.3-70b-versatile");
    assert_eq!(config.groq.temperature, 0.2);
    assert_eq!(config.groq.timeout_secs, 60);
    assert_eq!(config.groq.max_retries, 1);
    assert!(config.tavily.api_key.is_none());
    assert_eq!(config.tavily.max_results, 3);
    assert_eq!(config.tavily.search_depth, SearchDepth::Basic);
    assert_eq!(config.tavily.timeout_secs, 10);
    assert_eq!(config.routing.mode, RoutingMode::Auto);
    assert!(config.routing.extra_keywords.is_empty());
    assert_eq!(config.routing.recent_year_floor, 2024);
    assert_eq!(config.routing.max_snippet_chars, 500);
}

/// Unknown field in [groq] is rejected by deny_unknown_fields.
#[test]
fn unknown_field_in_groq_produces_error() {
    let toml = r#"
[groq]
modle = "llama"
"#;

    let err = load_config_from_str(toml).expect_err("should reject unknown field");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("modle"),
        "error should mention unknown field or the bad key, got: {err_str}"
    );
}

/// Unexpected top-level section is rejected by deny_unknown_fields.
#[test]
fn deny_unknown_fields_at_top_level() {
    let toml = r#"
[openai]
api_key = "sk-x"
"#;

    let err = load_config_from_str(toml).expect_err("unknown top-level section should be rejected");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("openai"),
        "error should mention unknown field, got: {err_str}"
    );
}

/// LOOKOUT_* environment variables override TOML values.
#[test]
fn env_vars_override_file_values() {
    figment::Jail::expect_with(|jail| {
        jail.create_file(
            "lookout.toml",
            r#"
[groq]
model = "from-file"

[tavily]
max_results = 2
"#,
        )?;
        jail.set_env("LOOKOUT_GROQ_MODEL", "from-env");
        jail.set_env("LOOKOUT_GROQ_API_KEY", "gsk_from_env");
        jail.set_env("LOOKOUT_TAVILY_MAX_RESULTS", "7");

        let config = lookout_config::load_config()?;
        assert_eq!(config.groq.model, "from-env");
        assert_eq!(config.groq.api_key.as_deref(), Some("gsk_from_env"));
        assert_eq!(config.tavily.max_results, 7);
        Ok(())
    });
}

/// Missing config files are silently skipped (Figment's Toml::file() behavior).
#[test]
fn missing_config_files_silently_skipped() {
    use figment::{
        Figment,
        providers::{Format, Serialized, Toml},
    };

    let config: LookoutConfig = Figment::new()
        .merge(Serialized::defaults(LookoutConfig::default()))
        .merge(Toml::file("/nonexistent/path/lookout.toml"))
        .extract()
        .expect("missing file should be silently skipped");

    assert_eq!(config.agent.name, "lookout");
}

/// An explicit --config path that does not exist is an error, not a silent default.
#[test]
fn explicit_missing_path_is_rejected() {
    let errors = load_and_validate_path(std::path::Path::new("/nonexistent/lookout.toml"))
        .expect_err("missing explicit path should fail");
    assert!(matches!(&errors[0], ConfigError::Other(msg) if msg.contains("does not exist")));
}

/// An explicit config file is loaded and validated.
#[test]
fn explicit_path_is_loaded() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("custom.toml");
    std::fs::write(&path, "[routing]\nmode = \"never\"\n").unwrap();

    let config = load_and_validate_path(&path).expect("file should load");
    assert_eq!(config.routing.mode, RoutingMode::Never);
}

/// Unknown key in a section produces an UnknownKey diagnostic with a suggestion.
#[test]
fn diagnostic_error_includes_suggestion_and_valid_keys() {
    let toml = r#"
[tavily]
max_result = 4
"#;

    let errors = load_and_validate_str(toml).expect_err("should produce errors");
    let found = errors.iter().any(|e| {
        matches!(e, ConfigError::UnknownKey { key, suggestion, valid_keys, .. } if {
            key == "max_result"
                && suggestion.as_deref() == Some("max_results")
                && valid_keys.contains("search_depth")
        })
    });
    assert!(found, "expected UnknownKey for max_result, got: {errors:?}");
}

/// An unknown routing mode is reported as an invalid value.
#[test]
fn diagnostic_invalid_routing_mode() {
    let toml = r#"
[routing]
mode = "sometimes"
"#;

    let errors = load_and_validate_str(toml).expect_err("should reject unknown mode");
    let found = errors.iter().any(|e| {
        matches!(e, ConfigError::InvalidValue { detail, .. } if detail.contains("sometimes"))
    });
    assert!(found, "expected InvalidValue for mode, got: {errors:?}");
}

/// Invalid type (string where number expected) produces a clear message.
#[test]
fn diagnostic_invalid_type_message() {
    let toml = r#"
[groq]
timeout_secs = "soon"
"#;

    let errors = load_and_validate_str(toml).expect_err("should reject invalid type");
    let found = errors.iter().any(|e| {
        matches!(e, ConfigError::InvalidType { key, .. } if key.contains("timeout_secs"))
    });
    assert!(found, "expected InvalidType for timeout_secs, got: {errors:?}");
}

/// ConfigError can be rendered using miette's graphical handler.
#[test]
fn config_error_renders_with_miette() {
    use miette::{Diagnostic, GraphicalReportHandler};

    let error = ConfigError::UnknownKey {
        key: "modle".to_string(),
        suggestion: Some("model".to_string()),
        valid_keys: "api_key, base_url, model".to_string(),
        span: None,
        src: None,
    };

    assert!(error.code().is_some(), "should have diagnostic code");
    let help = error.help().expect("should have help text").to_string();
    assert!(help.contains("did you mean `model`"), "got: {help}");

    let mut buf = String::new();
    GraphicalReportHandler::new()
        .render_report(&mut buf, &error)
        .expect("should render without error");
    assert!(buf.contains("modle"), "rendered report should mention the key");
}

/// Validation catches out-of-range values after a successful parse.
#[test]
fn validation_catches_out_of_range_values() {
    let toml = r#"
[groq]
temperature = 4.0

[tavily]
max_results = 50
"#;

    let errors = load_and_validate_str(toml).expect_err("out-of-range values should fail");
    let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
    assert!(messages.iter().any(|m| m.contains("groq.temperature")));
    assert!(messages.iter().any(|m| m.contains("tavily.max_results")));
}

/// load_and_validate_str with valid TOML returns Ok config.
#[test]
fn load_and_validate_valid_toml() {
    let config = load_and_validate_str("[agent]\nname = \"test\"\n")
        .expect("valid TOML should validate");
    assert_eq!(config.agent.name, "test");
}

/// Env overrides also apply when an explicit config path is given.
#[test]
fn env_vars_apply_to_explicit_path_and_validate() {
    figment::Jail::expect_with(|jail| {
        jail.create_file("custom.toml", "[groq]\nmodel = \"from-file\"\n")?;
        jail.set_env("LOOKOUT_GROQ_MODEL", "from-env");
        jail.set_env("LOOKOUT_ROUTING_MODE", "never");

        let path = jail.directory().join("custom.toml");
        let config = load_and_validate_path(&path).expect("env overrides should be accepted");
        assert_eq!(config.groq.model, "from-env");
        assert_eq!(config.routing.mode, RoutingMode::Never);
        Ok(())
    });
}
