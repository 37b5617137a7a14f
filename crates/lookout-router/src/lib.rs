// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Search-or-not routing for the Lookout assistant.
//!
//! This crate provides:
//! - [`LiveInfoClassifier`]: heuristic live-information detection (zero-cost, zero-latency)
//! - [`SearchFormatter`]: renders search hits into the augmentation block
//! - [`QueryRouter`]: classify, optionally search, then complete

pub mod classifier;
pub mod formatter;
pub mod router;

pub use classifier::{Classification, LiveInfoClassifier};
pub use formatter::{NO_RESULTS, SearchFormatter, format_hits};
pub use router::QueryRouter;
