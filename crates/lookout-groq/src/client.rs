// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Groq OpenAI-compatible chat completions API.
//!
//! Provides [`GroqClient`] which handles request construction,
//! bearer authentication, and transient error retry.

use std::time::Duration;

use lookout_core::LookoutError;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, warn};

use crate::types::{ApiErrorResponse, ChatCompletionRequest, ChatCompletionResponse};

/// Default delay between a transient failure and its retry.
const RETRY_DELAY: Duration = Duration::from_secs(1);

/// HTTP client for Groq API communication.
///
/// Manages authentication headers, connection pooling, and retry logic
/// for transient errors (429, 500, 502, 503).
#[derive(Debug, Clone)]
pub struct GroqClient {
    client: reqwest::Client,
    endpoint: String,
    max_retries: u32,
    retry_delay: Duration,
}

impl GroqClient {
    /// Creates a new Groq API client.
    ///
    /// `base_url` is the OpenAI-compatible root (e.g. `https://api.groq.com/openai/v1`);
    /// `/chat/completions` is appended.
    pub fn new(
        api_key: &SecretString,
        base_url: &str,
        timeout: Duration,
        max_retries: u32,
    ) -> Result<Self, LookoutError> {
        lookout_security::validate_url(base_url)?;

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", api_key.expose_secret()))
            .map_err(|e| LookoutError::Config(format!("invalid Groq API key header value: {e}")))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = lookout_security::build_client(headers, timeout)?;

        Ok(Self {
            client,
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
            max_retries,
            retry_delay: RETRY_DELAY,
        })
    }

    /// Overrides the delay between retries.
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    /// Full URL requests are posted to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Sends a chat completion request and returns the parsed response.
    ///
    /// On transient errors (429, 500, 502, 503), retries up to `max_retries`
    /// times after `retry_delay`.
    pub async fn chat_completion(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, LookoutError> {
        let mut attempt = 0;

        loop {
            if attempt > 0 {
                warn!(attempt, "retrying completion request after transient error");
                tokio::time::sleep(self.retry_delay).await;
            }

            let response = self
                .client
                .post(&self.endpoint)
                .json(request)
                .send()
                .await
                .map_err(|e| LookoutError::CompletionUnavailable {
                    message: describe_transport_error(&e),
                    source: Some(Box::new(e)),
                })?;

            let status = response.status();
            debug!(status = %status, attempt, "completion response received");

            if status.is_success() {
                let body = response.text().await.map_err(|e| {
                    LookoutError::CompletionUnavailable {
                        message: format!("failed to read response body: {e}"),
                        source: Some(Box::new(e)),
                    }
                })?;
                return serde_json::from_str(&body).map_err(|e| {
                    LookoutError::CompletionUnavailable {
                        message: format!("failed to parse API response: {e}"),
                        source: Some(Box::new(e)),
                    }
                });
            }

            let body = response.text().await.unwrap_or_default();

            if is_transient_error(status) && attempt < self.max_retries {
                warn!(status = %status, "transient error, will retry");
                attempt += 1;
                continue;
            }

            return Err(LookoutError::completion(describe_api_error(status, &body)));
        }
    }
}

/// Returns true for HTTP status codes that indicate transient errors worth retrying.
fn is_transient_error(status: reqwest::StatusCode) -> bool {
    matches!(status.as_u16(), 429 | 500 | 502 | 503)
}

fn describe_transport_error(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        "request to Groq timed out".to_string()
    } else if e.is_connect() {
        "could not connect to Groq".to_string()
    } else {
        format!("HTTP request failed: {e}")
    }
}

fn describe_api_error(status: reqwest::StatusCode, body: &str) -> String {
    let detail = serde_json::from_str::<ApiErrorResponse>(body)
        .map(|api_err| match api_err.error.type_ {
            Some(kind) => format!("{kind}: {}", api_err.error.message),
            None => api_err.error.message,
        })
        .unwrap_or_else(|_| body.trim().to_string());

    match status.as_u16() {
        401 | 403 => format!("Groq rejected the credentials ({status}): {detail}"),
        429 => format!("Groq rate limit exceeded ({status}): {detail}"),
        _ => format!("Groq API returned {status}: {detail}"),
    }
}
