// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tracing subscriber setup.
//!
//! Logs go to stderr and, when `agent.log_file` is set, are appended to that
//! file. Both sinks pass through [`RedactingWriter`].

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::sync::Arc;

use lookout_config::model::AgentConfig;
use lookout_core::LookoutError;
use lookout_security::{RedactingWriter, SecretList};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

/// Installs the global subscriber. `RUST_LOG` overrides `agent.log_level`.
pub fn init_tracing(agent: &AgentConfig, secrets: SecretList) -> Result<(), LookoutError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(&agent.log_level)));

    let stderr_secrets = secrets.clone();
    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_writer(move || RedactingWriter::new(io::stderr(), stderr_secrets.clone()));

    let file_layer = match &agent.log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| LookoutError::Config(format!("cannot open log file `{path}`: {e}")))?;
            let file = Arc::new(file);
            Some(
                fmt::layer()
                    .with_target(true)
                    .with_ansi(false)
                    .with_writer(move || {
                        RedactingWriter::new(SharedFile(Arc::clone(&file)), secrets.clone())
                    }),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| LookoutError::Internal(format!("failed to install tracing subscriber: {e}")))
}

fn default_directive(log_level: &str) -> String {
    format!("lookout={},warn", log_level.trim().to_lowercase())
}

/// Append handle shared by every writer the file layer creates.
struct SharedFile(Arc<File>);

impl Write for SharedFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        (&*self.0).write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        (&*self.0).flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directive_normalizes_level() {
        assert_eq!(default_directive(" DEBUG "), "lookout=debug,warn");
        assert_eq!(default_directive("info"), "lookout=info,warn");
    }

    #[test]
    fn shared_file_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lookout.log");
        let file = Arc::new(
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .unwrap(),
        );

        let secrets = SecretList::default();
        RedactingWriter::<SharedFile>::add_secret(&secrets, "tvly-abc123".into());
        let mut writer = RedactingWriter::new(SharedFile(Arc::clone(&file)), secrets.clone());
        writer.write_all(b"first line\n").unwrap();
        let mut writer = RedactingWriter::new(SharedFile(file), secrets);
        writer.write_all(b"key=tvly-abc123\n").unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "first line\nkey=[REDACTED]\n");
    }
}
