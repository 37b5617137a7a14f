// SPDX-FileCopyrightText: 2026 Lookout Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test doubles for the Lookout collaborator traits.
//!
//! [`MockCompletion`] and [`MockSearch`] replay queued outcomes and record
//! every call, so router tests run without network access.

pub mod mock_completion;
pub mod mock_search;

pub use mock_completion::MockCompletion;
pub use mock_search::MockSearch;
