// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tavily `/search` request and response types.

use lookout_config::model::SearchDepth;
use lookout_core::types::SearchHit;
use serde::{Deserialize, Serialize};

/// Placeholder used when a result carries no title.
pub const NO_TITLE: &str = "No title";
/// Placeholder used when a result carries neither content nor snippet.
pub const NO_SNIPPET: &str = "No snippet";
/// Placeholder used when a result carries no URL.
pub const NO_URL: &str = "No URL";

/// Body of a `POST /search` request.
#[derive(Debug, Clone, Serialize)]
pub struct SearchRequest {
    pub query: String,
    pub max_results: u32,
    pub search_depth: SearchDepth,
}

/// Body of a successful `/search` response. Unknown fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub results: Vec<SearchResult>,
    #[serde(default)]
    pub response_time: Option<f64>,
}

/// One ranked result. Every field is optional on the wire.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub snippet: Option<String>,
    #[serde(default)]
    pub score: Option<f64>,
}

impl SearchResult {
    /// Converts to a [`SearchHit`], filling missing fields with placeholders.
    ///
    /// `content` wins over `snippet` when both are present.
    pub fn into_hit(self) -> SearchHit {
        let snippet = non_blank(self.content).or_else(|| non_blank(self.snippet));
        SearchHit::new(
            non_blank(self.title).unwrap_or_else(|| NO_TITLE.to_string()),
            snippet.unwrap_or_else(|| NO_SNIPPET.to_string()),
            non_blank(self.url).unwrap_or_else(|| NO_URL.to_string()),
        )
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Error body on non-2xx responses. Tavily has used both shapes.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    #[serde(default)]
    pub detail: Option<ApiErrorDetail>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ApiErrorDetail {
    Message { error: String },
    Text(String),
}

impl ApiErrorResponse {
    pub fn message(&self) -> Option<&str> {
        match (&self.detail, &self.error) {
            (Some(ApiErrorDetail::Message { error }), _) => Some(error),
            (Some(ApiErrorDetail::Text(text)), _) => Some(text),
            (None, Some(error)) => Some(error),
            (None, None) => None,
        }
    }
}
