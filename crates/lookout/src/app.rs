// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wires configuration, credentials, and adapters into a [`QueryRouter`].

use std::sync::Arc;

use lookout_config::LookoutConfig;
use lookout_core::LookoutError;
use lookout_groq::GroqProvider;
use lookout_router::QueryRouter;
use lookout_security::{RedactingWriter, SecretList};
use lookout_tavily::TavilySearch;
use secrecy::ExposeSecret;
use tracing::info;

/// Resolves both API keys, registers them for log redaction, and builds the router.
///
/// A missing key is a startup error.
pub fn build_router(config: &LookoutConfig, secrets: &SecretList) -> Result<QueryRouter, LookoutError> {
    let groq_key = lookout_groq::resolve_api_key(&config.groq.api_key)?;
    let tavily_key = lookout_tavily::resolve_api_key(&config.tavily.api_key)?;

    RedactingWriter::<std::io::Stderr>::add_secret(secrets, groq_key.expose_secret().to_string());
    RedactingWriter::<std::io::Stderr>::add_secret(secrets, tavily_key.expose_secret().to_string());

    let completion = GroqProvider::new(config, groq_key)?;
    let search = TavilySearch::new(config, tavily_key)?;

    info!(
        agent = %config.agent.name,
        routing = %config.routing.mode,
        "lookout ready"
    );

    Ok(QueryRouter::new(
        Arc::new(completion),
        Arc::new(search),
        config,
    ))
}

/// Renders an error with known credentials removed.
pub fn redacted(error: &LookoutError, secrets: &SecretList) -> String {
    let values = secrets.read().map(|v| v.clone()).unwrap_or_default();
    lookout_security::redact(&error.to_string(), &values)
}
