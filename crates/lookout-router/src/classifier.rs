// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Heuristic live-information classification.
//!
//! Decides whether a query needs fresh web results using keyword and
//! pattern rules. No LLM pre-call, no network, no latency.

use lookout_config::model::{RoutingConfig, RoutingMode};

/// Result of classifying a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Whether the router should consult the search collaborator.
    pub needs_search: bool,
    /// Human-readable reason for the decision.
    pub reason: &'static str,
    /// The cue that triggered the decision, if any.
    pub matched: Option<String>,
}

/// Phrases signalling that the answer depends on the current date.
const TEMPORAL_CUES: &[&str] = &[
    "right now", "today", "tonight", "tomorrow", "yesterday", "this week",
    "this month", "this year", "currently", "current", "latest", "recent",
    "recently", "breaking", "up to date", "as of", "these days", "so far",
    "upcoming",
];

/// Topics whose answers go stale quickly.
const TOPICAL_CUES: &[&str] = &[
    "news", "headline", "headlines", "weather", "forecast", "stock price",
    "stock market", "stocks", "share price", "price of", "exchange rate",
    "bitcoin", "crypto", "score", "scores", "live score", "election", "poll",
    "polls", "traffic", "release date", "trending", "announced", "who won",
    "who is winning",
];

/// Heuristic live-information classifier. Pure and deterministic.
#[derive(Debug, Clone)]
pub struct LiveInfoClassifier {
    mode: RoutingMode,
    extra_keywords: Vec<String>,
    recent_year_floor: u16,
}

impl LiveInfoClassifier {
    /// Create a classifier in `auto` mode with no extra keywords.
    pub fn new() -> Self {
        Self::from_config(&RoutingConfig::default())
    }

    pub fn from_config(config: &RoutingConfig) -> Self {
        let extra_keywords = config
            .extra_keywords
            .iter()
            .map(|k| normalize(k))
            .filter(|k| !k.is_empty())
            .collect();

        Self {
            mode: config.mode,
            extra_keywords,
            recent_year_floor: config.recent_year_floor,
        }
    }

    /// Classify a query.
    ///
    /// Cues match whole words after lowercasing and stripping punctuation,
    /// so `current` matches "current events" but not "currency".
    pub fn classify(&self, query: &str) -> Classification {
        match self.mode {
            RoutingMode::Always => return decided(true, "routing mode is always", None),
            RoutingMode::Never => return decided(false, "routing mode is never", None),
            RoutingMode::Auto => {}
        }

        let normalized = normalize(query);
        if normalized.is_empty() {
            return decided(false, "empty query", None);
        }
        let padded = format!(" {normalized} ");

        if let Some(cue) = find_phrase(&padded, TEMPORAL_CUES.iter().copied()) {
            return decided(true, "temporal cue", Some(cue));
        }

        if let Some(cue) = find_phrase(&padded, TOPICAL_CUES.iter().copied()) {
            return decided(true, "time-sensitive topic", Some(cue));
        }

        if let Some(year) = normalized
            .split(' ')
            .filter(|t| t.len() == 4 && t.bytes().all(|b| b.is_ascii_digit()))
            .find(|t| t.parse::<u16>().is_ok_and(|y| y >= self.recent_year_floor))
        {
            return decided(true, "recent year", Some(year.to_string()));
        }

        if let Some(cue) = find_phrase(&padded, self.extra_keywords.iter().map(String::as_str)) {
            return decided(true, "configured keyword", Some(cue));
        }

        decided(false, "no live-information cue", None)
    }
}

impl Default for LiveInfoClassifier {
    fn default() -> Self {
        Self::new()
    }
}

fn decided(needs_search: bool, reason: &'static str, matched: Option<String>) -> Classification {
    Classification {
        needs_search,
        reason,
        matched,
    }
}

/// Lowercase, turn every non-alphanumeric run into one space, trim.
fn normalize(text: &str) -> String {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// First cue whose normalized form appears on word boundaries in `padded`.
fn find_phrase<'a>(padded: &str, cues: impl Iterator<Item = &'a str>) -> Option<String> {
    cues.map(normalize)
        .find(|cue| !cue.is_empty() && padded.contains(&format!(" {cue} ")))
}
