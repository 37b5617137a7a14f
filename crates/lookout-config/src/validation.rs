// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as parseable endpoint URLs, bounded numeric ranges, and known log levels.

use crate::diagnostic::ConfigError;
use crate::model::LookoutConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Tavily rejects larger result counts.
const MAX_SEARCH_RESULTS: u32 = 20;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &LookoutConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let level = config.agent.log_level.trim().to_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "agent.log_level `{}` is not one of: {}",
                config.agent.log_level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if config.agent.system_prompt.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "agent.system_prompt must not be empty".to_string(),
        });
    }

    if config
        .agent
        .log_file
        .as_deref()
        .is_some_and(|path| path.trim().is_empty())
    {
        errors.push(ConfigError::Validation {
            message: "agent.log_file must not be empty when set".to_string(),
        });
    }

    validate_base_url("groq.base_url", &config.groq.base_url, &mut errors);
    validate_base_url("tavily.base_url", &config.tavily.base_url, &mut errors);

    if config.groq.model.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "groq.model must not be empty".to_string(),
        });
    }

    if !(0.0..=2.0).contains(&config.groq.temperature) {
        errors.push(ConfigError::Validation {
            message: format!(
                "groq.temperature must be between 0.0 and 2.0, got {}",
                config.groq.temperature
            ),
        });
    }

    if config.groq.timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "groq.timeout_secs must be at least 1".to_string(),
        });
    }

    if config.tavily.timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "tavily.timeout_secs must be at least 1".to_string(),
        });
    }

    if config.tavily.max_results == 0 || config.tavily.max_results > MAX_SEARCH_RESULTS {
        errors.push(ConfigError::Validation {
            message: format!(
                "tavily.max_results must be between 1 and {MAX_SEARCH_RESULTS}, got {}",
                config.tavily.max_results
            ),
        });
    }

    if config.routing.max_snippet_chars < 20 {
        errors.push(ConfigError::Validation {
            message: format!(
                "routing.max_snippet_chars must be at least 20, got {}",
                config.routing.max_snippet_chars
            ),
        });
    }

    for (i, keyword) in config.routing.extra_keywords.iter().enumerate() {
        if keyword.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("routing.extra_keywords[{i}] must not be empty"),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_base_url(key: &str, value: &str, errors: &mut Vec<ConfigError>) {
    match url::Url::parse(value.trim()) {
        Ok(parsed) if parsed.scheme() == "https" => {}
        Ok(parsed) if parsed.scheme() == "http" && is_loopback(&parsed) => {}
        Ok(parsed) if parsed.scheme() == "http" => errors.push(ConfigError::Validation {
            message: format!("{key} must use https for remote hosts, got `{value}`"),
        }),
        Ok(parsed) => errors.push(ConfigError::Validation {
            message: format!(
                "{key} must use http or https, got scheme `{}`",
                parsed.scheme()
            ),
        }),
        Err(e) => errors.push(ConfigError::Validation {
            message: format!("{key} `{value}` is not a valid URL: {e}"),
        }),
    }
}

/// Plain http is only accepted for the local machine.
fn is_loopback(parsed: &url::Url) -> bool {
    match parsed.host() {
        Some(url::Host::Domain(domain)) => domain.eq_ignore_ascii_case("localhost"),
        Some(url::Host::Ipv4(ip)) => ip.is_loopback(),
        Some(url::Host::Ipv6(ip)) => ip.is_loopback(),
        None => false,
    }
}
