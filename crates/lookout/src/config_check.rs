// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `lookout config check` summary rendering.

use std::fmt::Write;

use lookout_config::LookoutConfig;

/// Renders the effective configuration. API keys are never printed; only
/// where each one comes from.
pub fn render_summary(config: &LookoutConfig) -> String {
    let groq_key = key_source(&config.groq.api_key, lookout_groq::API_KEY_ENV);
    let tavily_key = key_source(&config.tavily.api_key, lookout_tavily::API_KEY_ENV);

    let mut out = String::from("configuration is valid\n\n");
    let rows: [(&str, String); 18] = [
        ("agent.name", config.agent.name.clone()),
        ("agent.log_level", config.agent.log_level.clone()),
        (
            "agent.log_file",
            config
                .agent
                .log_file
                .clone()
                .unwrap_or_else(|| "(none)".to_string()),
        ),
        ("groq.api_key", groq_key),
        ("groq.base_url", config.groq.base_url.clone()),
        ("groq.model", config.groq.model.clone()),
        ("groq.temperature", config.groq.temperature.to_string()),
        ("groq.timeout_secs", config.groq.timeout_secs.to_string()),
        ("groq.max_retries", config.groq.max_retries.to_string()),
        ("tavily.api_key", tavily_key),
        ("tavily.base_url", config.tavily.base_url.clone()),
        ("tavily.max_results", config.tavily.max_results.to_string()),
        ("tavily.search_depth", config.tavily.search_depth.to_string()),
        ("tavily.timeout_secs", config.tavily.timeout_secs.to_string()),
        ("routing.mode", config.routing.mode.to_string()),
        (
            "routing.extra_keywords",
            if config.routing.extra_keywords.is_empty() {
                "(none)".to_string()
            } else {
                config.routing.extra_keywords.join(", ")
            },
        ),
        (
            "routing.max_snippet_chars",
            config.routing.max_snippet_chars.to_string(),
        ),
        (
            "routing.recent_year_floor",
            config.routing.recent_year_floor.to_string(),
        ),
    ];

    for (key, value) in rows {
        // Writing to a String cannot fail.
        let _ = writeln!(out, "{key:<26} {value}");
    }
    out
}

fn key_source(configured: &Option<String>, env_var: &str) -> String {
    let in_config = configured
        .as_deref()
        .is_some_and(|k| !k.trim().is_empty());
    if in_config {
        return "set in config".to_string();
    }
    match std::env::var(env_var) {
        Ok(value) if !value.trim().is_empty() => format!("set via {env_var}"),
        _ => format!("MISSING (set {env_var})"),
    }
}
