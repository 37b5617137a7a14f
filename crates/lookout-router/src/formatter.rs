// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Search-result formatting for the augmentation block.

use lookout_core::types::SearchHit;

/// Text used in place of a list when the search returned nothing.
pub const NO_RESULTS: &str = "No results found.";

/// Snippet length cap used by [`format_hits`].
pub const DEFAULT_MAX_SNIPPET_CHARS: usize = 500;

const ELLIPSIS: char = '…';

/// Formats hits with the default snippet cap.
pub fn format_hits(hits: &[SearchHit]) -> String {
    SearchFormatter::new(DEFAULT_MAX_SNIPPET_CHARS).format(hits)
}

/// Renders search hits as a numbered list: `"{n}. {title}: {snippet} ({url})"`.
#[derive(Debug, Clone, Copy)]
pub struct SearchFormatter {
    max_snippet_chars: usize,
}

impl SearchFormatter {
    pub fn new(max_snippet_chars: usize) -> Self {
        Self { max_snippet_chars }
    }

    pub fn format(&self, hits: &[SearchHit]) -> String {
        if hits.is_empty() {
            return NO_RESULTS.to_string();
        }

        hits.iter()
            .enumerate()
            .map(|(i, hit)| {
                format!(
                    "{}. {}: {} ({})",
                    i + 1,
                    collapse_whitespace(&hit.title),
                    self.snippet(&hit.snippet),
                    hit.url.trim()
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn snippet(&self, raw: &str) -> String {
        let collapsed = collapse_whitespace(raw);
        if collapsed.chars().count() <= self.max_snippet_chars {
            return collapsed;
        }
        let mut cut: String = collapsed.chars().take(self.max_snippet_chars).collect();
        cut.truncate(cut.trim_end().len());
        cut.push(ELLIPSIS);
        cut
    }
}

impl Default for SearchFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SNIPPET_CHARS)
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
