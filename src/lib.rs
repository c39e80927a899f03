// SPDX-License-Identifier: MPL-2.0
//! `iced_uploader` is an image uploader widget for the Iced GUI framework.
//!
//! Files are picked or dropped, checked by an optional validation hook and
//! a count limit, uploaded concurrently through a pluggable uploader, and
//! shown as a grid of thumbnails with progress and failure states. Done
//! images open in a full-screen preview, and deletion can be confirmed by a
//! dialog or an external guard.
//!
//! # Layers
//!
//! - [`domain`] - Upload items, their status and the selected files
//! - [`application`] - Ports (uploader, validation, delete guard), the
//!   upload queue and the task runner
//! - [`infrastructure`] - Directory and HTTP uploaders, file reading,
//!   thumbnail decoding and fetching
//! - [`ui`] - The uploader widget, toasts and theming
//! - [`app`] - Demo application hosting the widget, with configuration
//!   and localization

pub mod app;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod ui;
