// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock search adapter for deterministic testing.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use lookout_core::LookoutError;
use lookout_core::traits::{PluginAdapter, SearchAdapter};
use lookout_core::types::{AdapterType, HealthStatus, SearchHit};

/// A search adapter that returns queued outcomes in FIFO order.
///
/// An empty queue yields an empty hit list.
#[derive(Clone, Default)]
pub struct MockSearch {
    outcomes: Arc<Mutex<VecDeque<Result<Vec<SearchHit>, LookoutError>>>>,
    queries: Arc<Mutex<Vec<String>>>,
    delay: Option<Duration>,
    health: Option<HealthStatus>,
    shut_down: Arc<AtomicBool>,
}

impl MockSearch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock whose first call returns `hits`.
    pub fn with_hits(hits: Vec<SearchHit>) -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(VecDeque::from([Ok(hits)]))),
            ..Self::default()
        }
    }

    /// Create a mock whose first call fails with a search error.
    pub fn failing(message: &str) -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(VecDeque::from([Err(LookoutError::search(
                message,
            ))]))),
            ..Self::default()
        }
    }

    /// Sleep this long before answering each call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Report this status from `health_check` instead of `Healthy`.
    pub fn with_health(mut self, health: HealthStatus) -> Self {
        self.health = Some(health);
        self
    }

    /// Whether `shutdown` has been called on this mock or any clone of it.
    pub fn is_shut_down(&self) -> bool {
        self.shut_down.load(Ordering::SeqCst)
    }

    pub async fn push_hits(&self, hits: Vec<SearchHit>) {
        self.outcomes.lock().await.push_back(Ok(hits));
    }

    pub async fn push_error(&self, error: LookoutError) {
        self.outcomes.lock().await.push_back(Err(error));
    }

    /// All queries received so far.
    pub async fn queries(&self) -> Vec<String> {
        self.queries.lock().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.queries.lock().await.len()
    }
}

#[async_trait]
impl PluginAdapter for MockSearch {
    fn name(&self) -> &str {
        "mock-search"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Search
    }

    async fn health_check(&self) -> Result<HealthStatus, LookoutError> {
        Ok(self.health.clone().unwrap_or(HealthStatus::Healthy))
    }

    async fn shutdown(&self) -> Result<(), LookoutError> {
        self.shut_down.store(true, Ordering::SeqCst);
        Ok(())
    }
}

#[async_trait]
impl SearchAdapter for MockSearch {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, LookoutError> {
        self.queries.lock().await.push(query.to_string());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        self.outcomes
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_hits_then_empty() {
        let mock = MockSearch::with_hits(vec![SearchHit::new("t", "s", "u")]);
        assert_eq!(mock.search("q").await.unwrap().len(), 1);
        assert!(mock.search("q").await.unwrap().is_empty());
        assert_eq!(mock.queries().await, vec!["q", "q"]);
    }

    #[tokio::test]
    async fn failing_yields_search_error() {
        let err = MockSearch::failing("quota").search("q").await.unwrap_err();
        assert_eq!(err.kind(), "search_unavailable");
    }

    #[tokio::test]
    async fn pushed_outcomes_follow_initial_queue() {
        let mock = MockSearch::failing("first");
        mock.push_hits(vec![SearchHit::new("t", "s", "u")]).await;
        mock.push_error(LookoutError::search("third")).await;

        assert!(mock.search("a").await.is_err());
        assert_eq!(mock.search("b").await.unwrap().len(), 1);
        assert!(mock.search("c").await.is_err());
        assert!(mock.search("d").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unhealthy_status_is_reported() {
        let mock = MockSearch::new().with_health(HealthStatus::Unhealthy("quota".into()));
        assert_eq!(
            mock.health_check().await.unwrap(),
            HealthStatus::Unhealthy("quota".into())
        );
        mock.shutdown().await.unwrap();
        assert!(mock.is_shut_down());
    }
}
