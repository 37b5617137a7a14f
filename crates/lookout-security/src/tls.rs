// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Outbound HTTP policy for the collaborator adapters.
//!
//! Endpoint URLs must use HTTPS unless they point at localhost, and every
//! client carries a bounded request timeout.

use std::time::Duration;

use lookout_core::LookoutError;
use reqwest::header::HeaderMap;
use tracing::error;

/// User agent sent with every outbound request.
const USER_AGENT: &str = concat!("lookout/", env!("CARGO_PKG_VERSION"));

/// Build a reqwest::Client with the given default headers and request timeout.
pub fn build_client(
    default_headers: HeaderMap,
    timeout: Duration,
) -> Result<reqwest::Client, LookoutError> {
    reqwest::Client::builder()
        .default_headers(default_headers)
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .build()
        .map_err(|e| {
            error!("failed to build HTTP client: {e}");
            LookoutError::Internal(format!("failed to build HTTP client: {e}"))
        })
}

/// Validate an endpoint URL for security policy compliance.
///
/// - Localhost URLs (127.0.0.1, ::1, localhost) are allowed with any http(s) scheme.
/// - Remote URLs MUST use HTTPS.
pub fn validate_url(url: &str) -> Result<(), LookoutError> {
    let parsed = url::Url::parse(url)
        .map_err(|e| LookoutError::Config(format!("invalid endpoint URL `{url}`: {e}")))?;

    let host = parsed.host_str().unwrap_or("");
    match parsed.scheme() {
        "https" => Ok(()),
        "http" if is_localhost(host) => Ok(()),
        "http" => {
            error!(url = %url, "TLS required for remote endpoints");
            Err(LookoutError::Config(format!(
                "endpoint `{url}` must use HTTPS for remote hosts"
            )))
        }
        other => Err(LookoutError::Config(format!(
            "endpoint `{url}` has unsupported scheme `{other}`"
        ))),
    }
}

/// Check if a host refers to localhost.
pub fn is_localhost(host: &str) -> bool {
    matches!(host, "::1" | "localhost" | "[::1]") || host.starts_with("127.")
}
