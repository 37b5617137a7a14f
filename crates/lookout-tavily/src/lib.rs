// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tavily web search adapter for Lookout.
//!
//! Implements [`SearchAdapter`] over Tavily's `/search` endpoint.

pub mod client;
pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use lookout_config::LookoutConfig;
use lookout_config::model::SearchDepth;
use lookout_core::error::LookoutError;
use lookout_core::traits::{PluginAdapter, SearchAdapter};
use lookout_core::types::{AdapterType, HealthStatus, SearchHit};
use secrecy::SecretString;
use tracing::{debug, info};

use crate::client::TavilyClient;
use crate::types::SearchRequest;

/// Environment variable consulted when `tavily.api_key` is not configured.
pub const API_KEY_ENV: &str = "TAVILY_API_KEY";

/// Tavily search implementing [`SearchAdapter`].
pub struct TavilySearch {
    client: TavilyClient,
    max_results: u32,
    search_depth: SearchDepth,
}

impl TavilySearch {
    /// Creates a search adapter with an already-resolved API key.
    pub fn new(config: &LookoutConfig, api_key: SecretString) -> Result<Self, LookoutError> {
        let client = TavilyClient::new(
            &api_key,
            &config.tavily.base_url,
            Duration::from_secs(config.tavily.timeout_secs),
        )?;

        info!(
            max_results = config.tavily.max_results,
            depth = %config.tavily.search_depth,
            "Tavily search initialized"
        );

        Ok(Self {
            client,
            max_results: config.tavily.max_results,
            search_depth: config.tavily.search_depth,
        })
    }

    /// Creates a search adapter, resolving the API key from config or environment.
    pub fn from_config(config: &LookoutConfig) -> Result<Self, LookoutError> {
        let api_key = resolve_api_key(&config.tavily.api_key)?;
        Self::new(config, api_key)
    }
}

#[async_trait]
impl PluginAdapter for TavilySearch {
    fn name(&self) -> &str {
        "tavily"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Search
    }

    async fn health_check(&self) -> Result<HealthStatus, LookoutError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), LookoutError> {
        debug!("Tavily search shutting down");
        Ok(())
    }
}

#[async_trait]
impl SearchAdapter for TavilySearch {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, LookoutError> {
        let request = SearchRequest {
            query: query.to_string(),
            max_results: self.max_results,
            search_depth: self.search_depth,
        };

        let response = self.client.search(&request).await?;
        let hits: Vec<SearchHit> = response
            .results
            .into_iter()
            .take(self.max_results as usize)
            .map(|r| r.into_hit())
            .collect();

        debug!(
            hits = hits.len(),
            response_time = response.response_time,
            "search completed"
        );
        Ok(hits)
    }
}

/// Resolves the Tavily API key: config value first, then `TAVILY_API_KEY`.
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
                "Tavily API key not found. Set tavily.api_key in config or the {API_KEY_ENV} environment variable."
            ))
        })
}
