// SPDX-License-Identifier: MPL-2.0
//! Upload use cases: the queue manager and the task runner.
//!
//! # Components
//!
//! - [`queue`] - `UploadQueue`, the ordered item list and its rules
//!   (validation, count cap, failure handling)
//! - [`runner`] - turns pending items into upload jobs and applies results
//! - [`options`] - behavior switches shared with the presentation layer
//! - [`hooks`] - the upload function and optional validation/deletion hooks

pub mod hooks;
pub mod options;
pub mod queue;
pub mod runner;

pub use hooks::{Hooks, OnDelete};
pub use options::Options;
pub use queue::{Completion, QueueEvent, Selection, UploadQueue};
pub use runner::{JobOutcome, UploadJob};
