// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Lookout assistant.

use thiserror::Error;

/// The primary error type used across collaborator traits and the query router.
#[derive(Debug, Error)]
pub enum LookoutError {
    /// Configuration errors (missing credentials, invalid endpoint URLs).
    /// Fatal at startup.
    #[error("configuration error: {0}")]
    Config(String),

    /// The caller supplied unusable input (empty or whitespace-only query).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The search collaborator failed or timed out.
    #[error("search unavailable: {message}")]
    SearchUnavailable {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The completion collaborator failed or timed out.
    #[error("completion unavailable: {message}")]
    CompletionUnavailable {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A request could not be answered. Wraps the cause.
    #[error("answer failed: {source}")]
    AnswerFailed { source: Box<LookoutError> },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl LookoutError {
    /// Builds a [`LookoutError::SearchUnavailable`] without an underlying source.
    pub fn search(message: impl Into<String>) -> Self {
        Self::SearchUnavailable {
            message: message.into(),
            source: None,
        }
    }

    /// Builds a [`LookoutError::CompletionUnavailable`] without an underlying source.
    pub fn completion(message: impl Into<String>) -> Self {
        Self::CompletionUnavailable {
            message: message.into(),
            source: None,
        }
    }

    /// Short, stable name of the error kind for structured log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::InvalidInput(_) => "invalid_input",
            Self::SearchUnavailable { .. } => "search_unavailable",
            Self::CompletionUnavailable { .. } => "completion_unavailable",
            Self::AnswerFailed { .. } => "answer_failed",
            Self::Internal(_) => "internal",
        }
    }

    /// Returns the innermost cause of an [`LookoutError::AnswerFailed`] chain,
    /// or `self` for every other variant.
    pub fn root_cause(&self) -> &LookoutError {
        match self {
            Self::AnswerFailed { source } => source.root_cause(),
            other => other,
        }
    }
}
