// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./lookout.toml` > `~/.config/lookout/lookout.toml` > `/etc/lookout/lookout.toml`
//! with environment variable overrides via `LOOKOUT_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::LookoutConfig;

/// System-wide config file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/lookout/lookout.toml";

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "lookout.toml";

/// User config file under the XDG config directory.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("lookout").join(LOCAL_CONFIG_FILE))
}

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/lookout/lookout.toml` (system-wide)
/// 3. `~/.config/lookout/lookout.toml` (user XDG config)
/// 4. `./lookout.toml` (local directory)
/// 5. `LOOKOUT_*` environment variables
pub fn load_config() -> Result<LookoutConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env vars).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<LookoutConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(LookoutConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<LookoutConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(LookoutConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading.
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(LookoutConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_FILE))
        .merge(env_provider())
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` because key names contain
/// underscores: `LOOKOUT_GROQ_API_KEY` must map to `groq.api_key`, not `groq.api.key`.
fn env_provider() -> Env {
    Env::prefixed("LOOKOUT_").map(|key| {
        // `key` keeps the env var's case, with the prefix stripped.
        // Example: LOOKOUT_TAVILY_MAX_RESULTS -> "TAVILY_MAX_RESULTS"
        let mapped = map_env_key(key.as_str());
        mapped.into()
    })
}

/// Maps a prefix-stripped env var name, in any case, to a dotted config path.
pub(crate) fn map_env_key(key: &str) -> String {
    let key = key.to_ascii_lowercase();
    for section in ["agent", "groq", "tavily", "routing"] {
        if let Some(rest) = key.strip_prefix(section).and_then(|r| r.strip_prefix('_')) {
            return format!("{section}.{rest}");
        }
    }
    key
}
