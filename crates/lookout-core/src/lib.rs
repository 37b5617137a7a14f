// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Lookout assistant.
//!
//! This crate provides the foundational trait definitions, error types, and
//! common types used throughout the Lookout workspace. The completion and
//! search adapters implement traits defined here.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::LookoutError;
pub use types::{
    AdapterType, Answer, AnswerSource, CompletionRequest, CompletionResponse, HealthStatus,
    Prompt, SearchHit, TokenUsage, UserQuery,
};

pub use traits::{CompletionAdapter, PluginAdapter, SearchAdapter};
