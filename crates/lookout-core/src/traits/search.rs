// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Search adapter trait for hosted web-search endpoints.

use async_trait::async_trait;

use crate::error::LookoutError;
use crate::traits::adapter::PluginAdapter;
use crate::types::SearchHit;

/// Adapter for the search collaborator.
///
/// Implementations map every failure to [`LookoutError::SearchUnavailable`].
#[async_trait]
pub trait SearchAdapter: PluginAdapter {
    /// Runs a web search and returns hits in ranked order. May be empty.
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, LookoutError>;
}
