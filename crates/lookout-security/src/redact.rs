// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Secret redaction for log output and error messages.
//!
//! Two complementary mechanisms:
//! 1. **Regex-based**: Catches known credential formats (Groq, Tavily, Bearer tokens).
//! 2. **Exact-match**: Catches the API keys actually loaded at startup.

use std::io::Write;
use std::sync::{Arc, LazyLock, RwLock};

use regex::Regex;

/// Known secret patterns to redact from output.
static REDACTION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // Groq API keys: gsk_...
        r"gsk_[a-zA-Z0-9]{20,}",
        // Tavily API keys: tvly-... (optionally tvly-dev-...)
        r"tvly-[a-zA-Z0-9_\-]{16,}",
        // OpenAI-style secret keys: sk-...
        r"sk-[a-zA-Z0-9_\-]{20,}",
        // Bearer tokens in headers
        r"Bearer\s+[a-zA-Z0-9._\-]{10,}",
    ]
    .iter()
    .filter_map(|p| Regex::new(p).ok())
    .collect()
});

/// The redaction placeholder.
pub const REDACTED: &str = "[REDACTED]";

/// Exact-match secret values shared between log writers.
pub type SecretList = Arc<RwLock<Vec<String>>>;

/// Redact secrets from a string using regex patterns and exact-match values.
///
/// Standalone counterpart of [`RedactingWriter`] for error messages printed
/// outside the logging pipeline.
pub fn redact(input: &str, secrets: &[String]) -> String {
    let mut result = input.to_string();

    for pattern in REDACTION_PATTERNS.iter() {
        result = pattern.replace_all(&result, REDACTED).into_owned();
    }

    // Longest first so a key that contains another key is fully replaced.
    let mut sorted: Vec<&String> = secrets.iter().filter(|s| !s.is_empty()).collect();
    sorted.sort_by_key(|v| std::cmp::Reverse(v.len()));
    for value in sorted {
        result = result.replace(value.as_str(), REDACTED);
    }

    result
}

/// A writer wrapper that redacts secrets from output.
///
/// Wraps any `Write` implementor and replaces known credential patterns and
/// the exact loaded API keys with `[REDACTED]`.
pub struct RedactingWriter<W> {
    inner: W,
    secrets: SecretList,
}

impl<W: Write> RedactingWriter<W> {
    pub fn new(inner: W, secrets: SecretList) -> Self {
        Self { inner, secrets }
    }

    /// Register a secret with every writer sharing `secrets`.
    pub fn add_secret(secrets: &SecretList, value: String) {
        if value.is_empty() {
            return;
        }
        if let Ok(mut values) = secrets.write() {
            if !values.contains(&value) {
                values.push(value);
            }
        }
    }
}

impl<W: Write> Write for RedactingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let input = String::from_utf8_lossy(buf);
        let values = self
            .secrets
            .read()
            .map(|v| v.clone())
            .unwrap_or_default();
        self.inner.write_all(redact(&input, &values).as_bytes())?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}
