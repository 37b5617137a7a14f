// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Completion adapter trait for hosted chat-completion endpoints.

use async_trait::async_trait;

use crate::error::LookoutError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{CompletionRequest, CompletionResponse};

/// Adapter for the completion collaborator.
///
/// Implementations map every failure (network, authentication, rate limit,
/// malformed payload) to [`LookoutError::CompletionUnavailable`].
#[async_trait]
pub trait CompletionAdapter: PluginAdapter {
    /// Sends a prompt and returns the full response text.
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, LookoutError>;
}
