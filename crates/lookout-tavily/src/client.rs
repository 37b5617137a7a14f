// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Tavily search API.

use std::time::Duration;

use lookout_core::LookoutError;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::types::{ApiErrorResponse, SearchRequest, SearchResponse};

/// HTTP client for Tavily. One attempt per search; no retries.
#[derive(Debug, Clone)]
pub struct TavilyClient {
    client: reqwest::Client,
    endpoint: String,
}

impl TavilyClient {
    /// Creates a client posting to `{base_url}/search`.
    pub fn new(
        api_key: &SecretString,
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, LookoutError> {
        lookout_security::validate_url(base_url)?;

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", api_key.expose_secret()))
            .map_err(|e| {
                LookoutError::Config(format!("invalid Tavily API key header value: {e}"))
            })?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        Ok(Self {
            client: lookout_security::build_client(headers, timeout)?,
            endpoint: format!("{}/search", base_url.trim_end_matches('/')),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Posts a search request and parses the response.
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, LookoutError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| LookoutError::SearchUnavailable {
                message: if e.is_timeout() {
                    "request to Tavily timed out".to_string()
                } else {
                    format!("HTTP request failed: {e}")
                },
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, "search response received");

        let body = response
            .text()
            .await
            .map_err(|e| LookoutError::SearchUnavailable {
                message: format!("failed to read response body: {e}"),
                source: Some(Box::new(e)),
            })?;

        if !status.is_success() {
            let detail = serde_json::from_str::<ApiErrorResponse>(&body)
                .ok()
                .and_then(|err| err.message().map(str::to_string))
                .unwrap_or_else(|| body.trim().to_string());
            return Err(LookoutError::search(format!(
                "Tavily API returned {status}: {detail}"
            )));
        }

        serde_json::from_str(&body).map_err(|e| LookoutError::SearchUnavailable {
            message: format!("failed to parse API response: {e}"),
            source: Some(Box::new(e)),
        })
    }
}
