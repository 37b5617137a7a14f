// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the collaborator traits and the query router.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::LookoutError;

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Identifies the kind of external collaborator an adapter talks to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    Completion,
    Search,
}

/// A validated user query: trimmed and never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserQuery(String);

impl UserQuery {
    /// Validates raw input into a query.
    ///
    /// Empty or whitespace-only input is rejected with
    /// [`LookoutError::InvalidInput`].
    pub fn parse(raw: &str) -> Result<Self, LookoutError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(LookoutError::InvalidInput(
                "query must not be empty".to_string(),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the query text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single ranked web search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub title: String,
    pub snippet: String,
    pub url: String,
}

impl SearchHit {
    pub fn new(
        title: impl Into<String>,
        snippet: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            snippet: snippet.into(),
            url: url.into(),
        }
    }
}

/// Lead-in line placed before the augmentation block.
const AUGMENTATION_PREAMBLE: &str = "Use the following context to answer the question:";

/// The user-turn text sent to the completion collaborator.
///
/// Holds at most one augmentation block. The block is always rendered ahead
/// of the query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    query: String,
    augmentation: Option<String>,
}

impl Prompt {
    /// A prompt consisting of the raw query only.
    pub fn plain(query: &UserQuery) -> Self {
        Self {
            query: query.as_str().to_string(),
            augmentation: None,
        }
    }

    /// A prompt with a single augmentation block ahead of the query.
    pub fn augmented(query: &UserQuery, block: impl Into<String>) -> Self {
        Self {
            query: query.as_str().to_string(),
            augmentation: Some(block.into()),
        }
    }

    pub fn is_augmented(&self) -> bool {
        self.augmentation.is_some()
    }

    /// Renders the final prompt text.
    pub fn render(&self) -> String {
        match &self.augmentation {
            Some(block) => format!(
                "{AUGMENTATION_PREAMBLE}\n{block}\n\nQuestion: {}",
                self.query
            ),
            None => self.query.clone(),
        }
    }
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// A request to the completion collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// Rendered user-turn text.
    pub prompt: String,
    /// System prompt override. `None` uses the adapter's configured prompt.
    pub system_prompt: Option<String>,
    /// Sampling temperature override. `None` uses the adapter's configured value.
    pub temperature: Option<f32>,
}

impl CompletionRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            system_prompt: None,
            temperature: None,
        }
    }
}

impl From<&Prompt> for CompletionRequest {
    fn from(prompt: &Prompt) -> Self {
        Self::new(prompt.render())
    }
}

/// Token usage reported by the completion collaborator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

/// A response from the completion collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionResponse {
    pub content: String,
    pub model: String,
    pub usage: Option<TokenUsage>,
}

/// How an answer was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum AnswerSource {
    /// The query was answered from model knowledge alone.
    #[strum(serialize = "model only")]
    ModelOnly,
    /// Search results were folded into the prompt.
    #[strum(serialize = "search + model")]
    SearchAugmented,
    /// Search was wanted but failed; answered from model knowledge alone.
    #[strum(serialize = "model only (search unavailable)")]
    Degraded,
}

/// The outcome of one request/response cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct Answer {
    pub query: UserQuery,
    pub source: AnswerSource,
    pub response: String,
    /// Formatted search results, present when the prompt was augmented.
    pub search_context: Option<String>,
}
