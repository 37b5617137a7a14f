// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Secret redaction and outbound HTTP policy for the Lookout assistant.
//!
//! Provides credential redaction for log output and error messages, endpoint
//! URL validation, and the shared reqwest client builder used by the
//! completion and search adapters.

pub mod redact;
pub mod tls;

pub use redact::{RedactingWriter, SecretList, redact};
pub use tls::{build_client, is_localhost, validate_url};
