// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Lookout assistant.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};
use strum::Display;

/// Top-level Lookout configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LookoutConfig {
    /// Assistant identity, prompt, and logging settings.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Completion endpoint settings (Groq, OpenAI-compatible).
    #[serde(default)]
    pub groq: GroqConfig,

    /// Search endpoint settings (Tavily).
    #[serde(default)]
    pub tavily: TavilyConfig,

    /// Search-or-not routing settings.
    #[serde(default)]
    pub routing: RoutingConfig,
}

/// Assistant identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name of the assistant.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Optional file that receives a copy of every log record.
    #[serde(default)]
    pub log_file: Option<String>,

    /// System prompt sent with every completion request.
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
            log_file: None,
            system_prompt: default_system_prompt(),
        }
    }
}

fn default_agent_name() -> String {
    "lookout".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_system_prompt() -> String {
    "You are an expert AI assistant with deep knowledge across multiple domains. \
     Provide accurate, detailed, and well-structured answers. Be clear, concise, \
     and helpful. If you're unsure about something, say so."
        .to_string()
}

/// Groq (OpenAI-compatible) completion endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GroqConfig {
    /// Groq API key. `None` falls back to the `GROQ_API_KEY` environment variable.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Base URL of the OpenAI-compatible API, without the `/chat/completions` suffix.
    #[serde(default = "default_groq_base_url")]
    pub base_url: String,

    /// Model identifier.
    #[serde(default = "default_groq_model")]
    pub model: String,

    /// Sampling temperature.
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Upper bound for one completion call, in seconds.
    #[serde(default = "default_groq_timeout_secs")]
    pub timeout_secs: u64,

    /// Retries on transient HTTP statuses (429, 500, 502, 503).
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

impl Default for GroqConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_groq_base_url(),
            model: default_groq_model(),
            temperature: default_temperature(),
            timeout_secs: default_groq_timeout_secs(),
            max_retries: default_max_retries(),
        }
    }
}

fn default_groq_base_url() -> String {
    "https://api.groq.com/openai/v1".to_string()
}

fn default_groq_model() -> String {
    "llama-3.3-70b-versatile".to_string()
}

fn default_temperature() -> f32 {
    0.2
}

fn default_groq_timeout_secs() -> u64 {
    60
}

fn default_max_retries() -> u32 {
    1
}

/// Tavily search endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TavilyConfig {
    /// Tavily API key. `None` falls back to the `TAVILY_API_KEY` environment variable.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Base URL of the Tavily API, without the `/search` suffix.
    #[serde(default = "default_tavily_base_url")]
    pub base_url: String,

    /// Number of results requested per search.
    #[serde(default = "default_max_results")]
    pub max_results: u32,

    /// Search depth.
    #[serde(default)]
    pub search_depth: SearchDepth,

    /// Upper bound for one search call, in seconds.
    #[serde(default = "default_tavily_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for TavilyConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_tavily_base_url(),
            max_results: default_max_results(),
            search_depth: SearchDepth::default(),
            timeout_secs: default_tavily_timeout_secs(),
        }
    }
}

fn default_tavily_base_url() -> String {
    "https://api.tavily.com".to_string()
}

fn default_max_results() -> u32 {
    3
}

fn default_tavily_timeout_secs() -> u64 {
    10
}

/// Tavily search depth.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SearchDepth {
    #[default]
    Basic,
    Advanced,
}

/// Search-or-not routing configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RoutingConfig {
    /// `auto` classifies each query; `always`/`never` force the decision.
    #[serde(default)]
    pub mode: RoutingMode,

    /// Additional words or phrases that mark a query as needing live information.
    #[serde(default)]
    pub extra_keywords: Vec<String>,

    /// Years at or after this value count as a recency cue.
    #[serde(default = "default_recent_year_floor")]
    pub recent_year_floor: u16,

    /// Snippets longer than this many characters are truncated in the prompt.
    #[serde(default = "default_max_snippet_chars")]
    pub max_snippet_chars: usize,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            mode: RoutingMode::default(),
            extra_keywords: Vec::new(),
            recent_year_floor: default_recent_year_floor(),
            max_snippet_chars: default_max_snippet_chars(),
        }
    }
}

fn default_recent_year_floor() -> u16 {
    2024
}

fn default_max_snippet_chars() -> usize {
    500
}

/// How the router decides whether to search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RoutingMode {
    /// Classify each query heuristically.
    #[default]
    Auto,
    /// Search for every query.
    Always,
    /// Never search.
    Never,
}
