// SPDX-License-Identifier: MPL-2.0
//! User interface components and state management.
//!
//! Components follow the Elm-style "state down, messages up" pattern: a
//! `State` owns its data, `update` turns a `Message` into events for the
//! host, and `view` renders from a borrowed environment.
//!
//! - [`image_uploader`] - The image uploader widget (grid, preview, delete dialog)
//! - [`notifications`] - Toast notification system for user feedback
//! - [`widgets`] - Custom Iced widgets (spinner)
//! - [`design_tokens`] - Design system constants (colors, spacing, sizing)
//! - [`theming`] - Light/Dark/System theme mode management

pub mod design_tokens;
pub mod image_uploader;
pub mod notifications;
pub mod theming;
pub mod widgets;
