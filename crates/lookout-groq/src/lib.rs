// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Groq completion adapter for Lookout.
//!
//! Implements [`CompletionAdapter`] over Groq's OpenAI-compatible
//! chat completions endpoint. Each call sends one system message and one
//! user message; there is no conversation history.

pub mod client;
pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use lookout_config::LookoutConfig;
use lookout_core::error::LookoutError;
use lookout_core::traits::{CompletionAdapter, PluginAdapter};
use lookout_core::types::{
    AdapterType, CompletionRequest, CompletionResponse, HealthStatus, TokenUsage,
};
use secrecy::SecretString;
use tracing::{debug, info};

use crate::client::GroqClient;
use crate::types::{ChatCompletionRequest, ChatMessage};

/// Environment variable consulted when `groq.api_key` is not configured.
pub const API_KEY_ENV: &str = "GROQ_API_KEY";

/// Groq provider implementing [`CompletionAdapter`].
///
/// API key resolution order: config -> `GROQ_API_KEY` env var -> error.
pub struct GroqProvider {
    client: GroqClient,
    model: String,
    system_prompt: String,
    temperature: f32,
}

impl GroqProvider {
    /// Creates a provider with an already-resolved API key.
    pub fn new(config: &LookoutConfig, api_key: SecretString) -> Result<Self, LookoutError> {
        let client = GroqClient::new(
            &api_key,
            &config.groq.base_url,
            Duration::from_secs(config.groq.timeout_secs),
            config.groq.max_retries,
        )?;

        info!(model = %config.groq.model, "Groq provider initialized");

        Ok(Self::with_client(
            client,
            config.groq.model.clone(),
            config.agent.system_prompt.clone(),
            config.groq.temperature,
        ))
    }

    /// Creates a provider, resolving the API key from config or environment.
    pub fn from_config(config: &LookoutConfig) -> Result<Self, LookoutError> {
        let api_key = resolve_api_key(&config.groq.api_key)?;
        Self::new(config, api_key)
    }

    /// Creates a provider around an existing client.
    pub fn with_client(
        client: GroqClient,
        model: String,
        system_prompt: String,
        temperature: f32,
    ) -> Self {
        Self {
            client,
            model,
            system_prompt,
            temperature,
        }
    }

    /// Converts a [`CompletionRequest`] into the wire request.
    fn to_chat_request(&self, request: &CompletionRequest) -> ChatCompletionRequest {
        let system = request
            .system_prompt
            .clone()
            .unwrap_or_else(|| self.system_prompt.clone());

        ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage::system(system),
                ChatMessage::user(request.prompt.clone()),
            ],
            temperature: request.temperature.unwrap_or(self.temperature),
        }
    }
}

#[async_trait]
impl PluginAdapter for GroqProvider {
    fn name(&self) -> &str {
        "groq"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Completion
    }

    async fn health_check(&self) -> Result<HealthStatus, LookoutError> {
        // A test request would spend tokens, so none is sent.
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), LookoutError> {
        debug!("Groq provider shutting down");
        Ok(())
    }
}

#[async_trait]
impl CompletionAdapter for GroqProvider {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, LookoutError> {
        let api_request = self.to_chat_request(&request);
        let response = self.client.chat_completion(&api_request).await?;

        let content = response
            .first_content()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .ok_or_else(|| LookoutError::completion("Groq returned an empty completion"))?
            .to_string();

        debug!(model = %response.model, chars = content.len(), "completion received");

        Ok(CompletionResponse {
            content,
            model: response.model,
            usage: response.usage.map(|u| TokenUsage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
            }),
        })
    }
}

/// Resolves the Groq API key: config value first, then `GROQ_API_KEY`.
///
/// Blank values count as absent.
pub fn resolve_api_key(config_key: &Option<String>) -> Result<SecretString, LookoutError> {
    if let Some(key) = config_key.as_deref().map(str::trim).filter(|k| !k.is_empty()) {
        return Ok(SecretString::from(key.to_string()));
    }

    std::env::var(API_KEY_ENV)
        .ok()
        .map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty())
        .map(SecretString::from)
        .ok_or_else(|| {
            LookoutError::Config(format!(
                "Groq API key not found. Set groq.api_key in config or the {API_KEY_ENV} environment variable."
            ))
        })
}
