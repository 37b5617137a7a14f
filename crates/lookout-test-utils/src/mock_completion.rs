// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock completion adapter for deterministic testing.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use lookout_core::LookoutError;
use lookout_core::traits::{CompletionAdapter, PluginAdapter};
use lookout_core::types::{
    AdapterType, CompletionRequest, CompletionResponse, HealthStatus, TokenUsage,
};

/// Text returned when the response queue is empty.
pub const DEFAULT_COMPLETION: &str = "mock response";

/// A completion adapter that returns queued outcomes in FIFO order.
///
/// Every request is recorded, including ones that fail or hang.
#[derive(Clone, Default)]
pub struct MockCompletion {
    outcomes: Arc<Mutex<VecDeque<Result<String, LookoutError>>>>,
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
    delay: Option<Duration>,
    health: Option<HealthStatus>,
    shut_down: Arc<AtomicBool>,
}

impl MockCompletion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock pre-loaded with successful responses.
    pub fn with_responses<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let queue = responses.into_iter().map(|s| Ok(s.into())).collect();
        Self {
            outcomes: Arc::new(Mutex::new(queue)),
            ..Self::default()
        }
    }

    /// Create a mock whose first call fails with a completion error.
    pub fn failing(message: &str) -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(VecDeque::from([Err(
                LookoutError::completion(message),
            )]))),
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

    pub async fn push_response(&self, text: impl Into<String>) {
        self.outcomes.lock().await.push_back(Ok(text.into()));
    }

    pub async fn push_error(&self, error: LookoutError) {
        self.outcomes.lock().await.push_back(Err(error));
    }

    /// All requests received so far.
    pub async fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.requests.lock().await.len()
    }
}

#[async_trait]
impl PluginAdapter for MockCompletion {
    fn name(&self) -> &str {
        "mock-completion"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Completion
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
impl CompletionAdapter for MockCompletion {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, LookoutError> {
        self.requests.lock().await.push(request);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let outcome = self
            .outcomes
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Ok(DEFAULT_COMPLETION.to_string()));

        outcome.map(|content| CompletionResponse {
            content,
            model: "mock-model".to_string(),
            usage: Some(TokenUsage {
                prompt_tokens: 10,
                completion_tokens: 20,
            }),
        })
    }
}
