// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Query routing: classify, optionally search, then complete.
//!
//! Search failures degrade to a plain answer. Completion failures abort the
//! request.

use std::sync::Arc;
use std::time::Duration;

use lookout_config::LookoutConfig;
use lookout_core::error::LookoutError;
use lookout_core::traits::{CompletionAdapter, PluginAdapter, SearchAdapter};
use lookout_core::types::{
    Answer, AnswerSource, CompletionRequest, HealthStatus, Prompt, SearchHit, UserQuery,
};
use tracing::{debug, error, info, warn};

use crate::classifier::LiveInfoClassifier;
use crate::formatter::SearchFormatter;

/// Answers user queries using a completion collaborator, consulting a search
/// collaborator first when the query needs live information.
///
/// Holds no per-request state; `answer` may be called concurrently.
pub struct QueryRouter {
    completion: Arc<dyn CompletionAdapter>,
    search: Arc<dyn SearchAdapter>,
    classifier: LiveInfoClassifier,
    formatter: SearchFormatter,
    search_timeout: Duration,
    completion_timeout: Duration,
}

impl QueryRouter {
    /// Create a router from collaborators and the loaded configuration.
    pub fn new(
        completion: Arc<dyn CompletionAdapter>,
        search: Arc<dyn SearchAdapter>,
        config: &LookoutConfig,
    ) -> Self {
        Self {
            completion,
            search,
            classifier: LiveInfoClassifier::from_config(&config.routing),
            formatter: SearchFormatter::new(config.routing.max_snippet_chars),
            search_timeout: Duration::from_secs(config.tavily.timeout_secs),
            completion_timeout: Duration::from_secs(config.groq.timeout_secs),
        }
    }

    /// Override the per-call time limits.
    pub fn with_timeouts(mut self, search: Duration, completion: Duration) -> Self {
        self.search_timeout = search;
        self.completion_timeout = completion;
        self
    }

    /// Answer one query.
    ///
    /// Blank input fails with [`LookoutError::InvalidInput`] before any
    /// collaborator is called. A failed completion is returned as
    /// [`LookoutError::AnswerFailed`].
    pub async fn answer(&self, raw_query: &str) -> Result<Answer, LookoutError> {
        let query = match UserQuery::parse(raw_query) {
            Ok(query) => query,
            Err(e) => {
                warn!(
                    error_kind = e.kind(),
                    searched = false,
                    search_failed = false,
                    completion_failed = false,
                    "query rejected: invalid input"
                );
                return Err(e);
            }
        };

        let classification = self.classifier.classify(query.as_str());
        debug!(
            query = %query,
            needs_search = classification.needs_search,
            reason = classification.reason,
            matched = ?classification.matched,
            "query classified"
        );

        let mut search_failed = false;
        let (prompt, search_context) = if classification.needs_search {
            match self.run_search(&query).await {
                Ok(hits) => {
                    let block = self.formatter.format(&hits);
                    (Prompt::augmented(&query, block.clone()), Some(block))
                }
                Err(e) => {
                    warn!(
                        query = %query,
                        collaborator = self.search.name(),
                        error_kind = e.kind(),
                        error = %e,
                        "search failed, answering without search results"
                    );
                    search_failed = true;
                    (Prompt::plain(&query), None)
                }
            }
        } else {
            (Prompt::plain(&query), None)
        };

        let source = match (classification.needs_search, search_failed) {
            (false, _) => AnswerSource::ModelOnly,
            (true, false) => AnswerSource::SearchAugmented,
            (true, true) => AnswerSource::Degraded,
        };

        match self.run_completion(&prompt).await {
            Ok(response) => {
                info!(
                    query = %query,
                    searched = classification.needs_search,
                    search_failed,
                    completion_failed = false,
                    source = %source,
                    "query answered"
                );
                Ok(Answer {
                    query,
                    source,
                    response,
                    search_context,
                })
            }
            Err(e) => {
                error!(
                    query = %query,
                    collaborator = self.completion.name(),
                    error_kind = e.kind(),
                    error = %e,
                    "completion failed"
                );
                info!(
                    query = %query,
                    searched = classification.needs_search,
                    search_failed,
                    completion_failed = true,
                    source = "none",
                    "query failed"
                );
                Err(LookoutError::AnswerFailed {
                    source: Box::new(e),
                })
            }
        }
    }

    /// Asks both collaborators for their health. Anything but healthy is
    /// logged as a warning; the router keeps working either way.
    pub async fn health_check(&self) -> Vec<(String, HealthStatus)> {
        vec![
            adapter_health(self.completion.as_ref()).await,
            adapter_health(self.search.as_ref()).await,
        ]
    }

    /// Shuts both collaborators down. Failures are logged, not returned.
    pub async fn shutdown(&self) {
        shutdown_adapter(self.completion.as_ref()).await;
        shutdown_adapter(self.search.as_ref()).await;
    }

    async fn run_search(&self, query: &UserQuery) -> Result<Vec<SearchHit>, LookoutError> {
        let hits = tokio::time::timeout(self.search_timeout, self.search.search(query.as_str()))
            .await
            .map_err(|_| {
                LookoutError::search(format!(
                    "search timed out after {}s",
                    self.search_timeout.as_secs_f32()
                ))
            })??;
        debug!(hits = hits.len(), "search returned");
        Ok(hits)
    }

    async fn run_completion(&self, prompt: &Prompt) -> Result<String, LookoutError> {
        let request = CompletionRequest::from(prompt);
        let response = tokio::time::timeout(self.completion_timeout, self.completion.complete(request))
            .await
            .map_err(|_| {
                LookoutError::completion(format!(
                    "completion timed out after {}s",
                    self.completion_timeout.as_secs_f32()
                ))
            })??;
        Ok(response.content)
    }
}

async fn adapter_health<A: PluginAdapter + ?Sized>(adapter: &A) -> (String, HealthStatus) {
    let status = adapter
        .health_check()
        .await
        .unwrap_or_else(|e| HealthStatus::Unhealthy(e.to_string()));

    match &status {
        HealthStatus::Healthy => debug!(
            adapter = adapter.name(),
            version = %adapter.version(),
            kind = %adapter.adapter_type(),
            "adapter healthy"
        ),
        HealthStatus::Degraded(reason) | HealthStatus::Unhealthy(reason) => warn!(
            adapter = adapter.name(),
            version = %adapter.version(),
            kind = %adapter.adapter_type(),
            status = ?status,
            reason = %reason,
            "adapter not healthy"
        ),
    }

    (adapter.name().to_string(), status)
}

async fn shutdown_adapter<A: PluginAdapter + ?Sized>(adapter: &A) {
    if let Err(e) = adapter.shutdown().await {
        warn!(adapter = adapter.name(), error = %e, "adapter shutdown failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lookout_config::model::RoutingMode;
    use lookout_test_utils::{MockCompletion, MockSearch};
    use tracing_test::traced_test;

    fn router(completion: &MockCompletion, search: &MockSearch) -> QueryRouter {
        router_with(completion, search, &LookoutConfig::default())
    }

    fn router_with(
        completion: &MockCompletion,
        search: &MockSearch,
        config: &LookoutConfig,
    ) -> QueryRouter {
        QueryRouter::new(Arc::new(completion.clone()), Arc::new(search.clone()), config)
    }

    fn weather_hits() -> Vec<SearchHit> {
        vec![
            SearchHit::new("Paris weather", "Sunny, 22C", "https://w.example/paris"),
            SearchHit::new("Hourly forecast", "Light wind", "https://f.example"),
        ]
    }

    #[tokio::test]
    async fn weather_query_is_search_augmented() {
        let completion = MockCompletion::with_responses(["It is sunny in Paris."]);
        let search = MockSearch::with_hits(weather_hits());
        let query = "What's the weather in Paris right now?";

        let answer = router(&completion, &search).answer(query).await.unwrap();

        assert_eq!(answer.source, AnswerSource::SearchAugmented);
        assert_eq!(answer.response, "It is sunny in Paris.");
        assert_eq!(search.queries().await, vec![query]);

        let block = "1. Paris weather: Sunny, 22C (https://w.example/paris)\n\
                     2. Hourly forecast: Light wind (https://f.example)";
        assert_eq!(answer.search_context.as_deref(), Some(block));

        let requests = completion.requests().await;
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0].prompt,
            format!(
                "Use the following context to answer the question:\n{block}\n\nQuestion: {query}"
            )
        );
    }

    #[tokio::test]
    async fn capital_query_skips_search() {
        let completion = MockCompletion::with_responses(["Paris."]);
        let search = MockSearch::new();

        let answer = router(&completion, &search)
            .answer("What is the capital of France?")
            .await
            .unwrap();

        assert_eq!(answer.source, AnswerSource::ModelOnly);
        assert_eq!(answer.response, "Paris.");
        assert!(answer.search_context.is_none());
        assert_eq!(search.call_count().await, 0);
        assert_eq!(
            completion.requests().await[0].prompt,
            "What is the capital of France?"
        );
    }

    #[tokio::test]
    async fn query_is_trimmed_before_use() {
        let completion = MockCompletion::new();
        let search = MockSearch::new();

        let answer = router(&completion, &search)
            .answer("  What is the capital of France?\n")
            .await
            .unwrap();

        assert_eq!(answer.query.as_str(), "What is the capital of France?");
        assert_eq!(
            completion.requests().await[0].prompt,
            "What is the capital of France?"
        );
    }

    #[tokio::test]
    async fn empty_query_makes_no_calls() {
        let completion = MockCompletion::new();
        let search = MockSearch::new();
        let router = router(&completion, &search);

        for input in ["", "   ", "\n\t"] {
            let err = router.answer(input).await.unwrap_err();
            assert!(matches!(err, LookoutError::InvalidInput(_)), "got: {err:?}");
        }

        assert_eq!(completion.call_count().await, 0);
        assert_eq!(search.call_count().await, 0);
    }

    #[tokio::test]
    #[traced_test]
    async fn empty_query_is_logged() {
        let completion = MockCompletion::new();
        let search = MockSearch::new();

        let err = router(&completion, &search).answer("   ").await.unwrap_err();

        assert_eq!(err.kind(), "invalid_input");
        assert!(logs_contain("query rejected: invalid input"));
        assert!(logs_contain("error_kind=\"invalid_input\""));
        assert!(logs_contain("searched=false"));
    }

    #[tokio::test]
    async fn empty_search_results_still_augment() {
        let completion = MockCompletion::new();
        let search = MockSearch::with_hits(Vec::new());

        let answer = router(&completion, &search)
            .answer("latest news on the Artemis program")
            .await
            .unwrap();

        assert_eq!(answer.source, AnswerSource::SearchAugmented);
        assert_eq!(answer.search_context.as_deref(), Some("No results found."));
        assert!(
            completion.requests().await[0]
                .prompt
                .contains("No results found.")
        );
    }

    #[tokio::test]
    #[traced_test]
    async fn search_failure_degrades_to_plain_answer() {
        let completion = MockCompletion::with_responses(["Probably mild."]);
        let search = MockSearch::failing("quota exceeded");
        let query = "What's the weather in Paris right now?";

        let answer = router(&completion, &search).answer(query).await.unwrap();

        assert_eq!(answer.source, AnswerSource::Degraded);
        assert_eq!(answer.response, "Probably mild.");
        assert!(answer.search_context.is_none());
        assert_eq!(completion.requests().await[0].prompt, query);

        assert!(logs_contain("search failed, answering without search results"));
        assert!(logs_contain("quota exceeded"));
        assert!(logs_contain("search_failed=true"));
    }

    #[tokio::test]
    #[traced_test]
    async fn completion_failure_is_answer_failed() {
        let completion = MockCompletion::failing("401 invalid key");
        let search = MockSearch::new();

        let err = router(&completion, &search)
            .answer("What is the capital of France?")
            .await
            .unwrap_err();

        match &err {
            LookoutError::AnswerFailed { source } => {
                assert!(matches!(
                    **source,
                    LookoutError::CompletionUnavailable { .. }
                ));
            }
            other => panic!("expected AnswerFailed, got {other:?}"),
        }
        assert_eq!(err.root_cause().kind(), "completion_unavailable");
        assert!(logs_contain("completion failed"));
        assert!(logs_contain("completion_failed=true"));
    }

    #[tokio::test]
    async fn both_failing_is_answer_failed() {
        let completion = MockCompletion::failing("down");
        let search = MockSearch::failing("down");

        let err = router(&completion, &search)
            .answer("breaking news")
            .await
            .unwrap_err();
        assert!(matches!(err, LookoutError::AnswerFailed { .. }));
        assert_eq!(search.call_count().await, 1);
        assert_eq!(completion.call_count().await, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn hanging_search_times_out_and_degrades() {
        let completion = MockCompletion::with_responses(["fallback"]);
        let search = MockSearch::with_hits(weather_hits()).with_delay(Duration::from_secs(300));

        let answer = router(&completion, &search)
            .with_timeouts(Duration::from_secs(10), Duration::from_secs(60))
            .answer("weather in Oslo today")
            .await
            .unwrap();

        assert_eq!(answer.source, AnswerSource::Degraded);
        assert_eq!(answer.response, "fallback");
    }

    #[tokio::test(start_paused = true)]
    async fn hanging_completion_times_out() {
        let completion = MockCompletion::new().with_delay(Duration::from_secs(300));
        let search = MockSearch::new();

        let err = router(&completion, &search)
            .answer("What is the capital of France?")
            .await
            .unwrap_err();

        assert!(err.to_string().contains("timed out"), "got: {err}");
        assert_eq!(err.root_cause().kind(), "completion_unavailable");
    }

    #[tokio::test]
    async fn queued_outcomes_are_replayed_per_request() {
        let completion = MockCompletion::new();
        let search = MockSearch::new();
        search.push_error(LookoutError::search("rate limited")).await;
        search.push_hits(weather_hits()).await;
        completion.push_response("first").await;
        completion.push_error(LookoutError::completion("overloaded")).await;
        let router = router(&completion, &search);

        let first = router.answer("weather today").await.unwrap();
        assert_eq!(first.source, AnswerSource::Degraded);
        assert_eq!(first.response, "first");

        let second = router.answer("weather tomorrow").await.unwrap_err();
        assert!(matches!(second, LookoutError::AnswerFailed { .. }));
        assert_eq!(search.call_count().await, 2);
    }

    #[tokio::test]
    #[traced_test]
    async fn health_check_reports_each_adapter() {
        let completion = MockCompletion::new();
        let search = MockSearch::new().with_health(HealthStatus::Unhealthy("quota exhausted".into()));

        let report = router(&completion, &search).health_check().await;

        assert_eq!(
            report,
            vec![
                ("mock-completion".to_string(), HealthStatus::Healthy),
                (
                    "mock-search".to_string(),
                    HealthStatus::Unhealthy("quota exhausted".into())
                ),
            ]
        );
        assert!(logs_contain("adapter not healthy"));
        assert!(logs_contain("quota exhausted"));
    }

    #[tokio::test]
    async fn degraded_adapter_is_reported() {
        let completion = MockCompletion::new().with_health(HealthStatus::Degraded("slow".into()));
        let search = MockSearch::new();

        let report = router(&completion, &search).health_check().await;
        assert_eq!(report[0].1, HealthStatus::Degraded("slow".into()));
        assert_eq!(report[1].1, HealthStatus::Healthy);
    }

    #[tokio::test]
    async fn shutdown_reaches_both_adapters() {
        let completion = MockCompletion::new();
        let search = MockSearch::new();

        router(&completion, &search).shutdown().await;

        assert!(completion.is_shut_down());
        assert!(search.is_shut_down());
    }

    #[tokio::test]
    async fn never_mode_does_not_search() {
        let mut config = LookoutConfig::default();
        config.routing.mode = RoutingMode::Never;
        let completion = MockCompletion::new();
        let search = MockSearch::new();

        let answer = router_with(&completion, &search, &config)
            .answer("weather today")
            .await
            .unwrap();
        assert_eq!(answer.source, AnswerSource::ModelOnly);
        assert_eq!(search.call_count().await, 0);
    }

    #[tokio::test]
    async fn snippet_cap_comes_from_config() {
        let mut config = LookoutConfig::default();
        config.routing.max_snippet_chars = 20;
        let completion = MockCompletion::new();
        let search = MockSearch::with_hits(vec![SearchHit::new(
            "T",
            "a very long snippet that keeps going and going",
            "u",
        )]);

        let answer = router_with(&completion, &search, &config)
            .answer("news today")
            .await
            .unwrap();
        assert_eq!(
            answer.search_context.as_deref(),
            Some("1. T: a very long snippet… (u)")
        );
    }

    #[tokio::test]
    async fn concurrent_answers_share_router() {
        let completion = MockCompletion::new();
        let search = MockSearch::new();
        let router = Arc::new(router(&completion, &search));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let router = Arc::clone(&router);
                tokio::spawn(async move { router.answer(&format!("question {i}")).await })
            })
            .collect();

        for handle in handles {
            assert!(handle.await.unwrap().is_ok());
        }
        assert_eq!(completion.call_count().await, 8);
    }
}
