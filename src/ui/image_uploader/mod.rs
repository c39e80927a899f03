// SPDX-License-Identifier: MPL-2.0
//! Image uploader widget.
//!
//! A grid of thumbnails followed by an "add" cell. Picked files go through
//! the validation hook and the count cap, then upload concurrently; each
//! cell shows a spinner while uploading and a marker when the upload
//! failed. Done cells open a full-screen preview, and the delete badge can
//! be gated by a confirmation dialog or an external guard.
//!
//! # Structure
//!
//! - [`component`] - State, update and view (Elm-style, returns events)
//! - [`cell`] - Pure projection from the queue to grid cells
//! - [`preview`] - Full-screen viewer over done items
//! - [`dialog`] - Delete confirmation overlay
//! - [`styles`] - Cell, overlay and dialog styles
//!
//! # Usage
//!
//! ```ignore
//! let hooks = Hooks::new(Arc::new(DirectoryUploader::new("/tmp/uploads")));
//! let (uploader, task) = State::new(Options::default(), hooks, ["https://cdn/a.png"]);
//!
//! // In update
//! let (events, task) = uploader.update(message);
//!
//! // In view
//! uploader.view(ViewEnv::new(&i18n)).map(Message::Uploader)
//! ```

pub mod cell;
pub mod component;
pub mod dialog;
pub mod preview;
pub mod styles;

pub use cell::{project, CellKind, ItemCell, Overlay};
pub use component::{Event, Message, RenderItem, State, ViewEnv};
