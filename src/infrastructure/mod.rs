// SPDX-License-Identifier: MPL-2.0
//! Infrastructure layer adapters.
//!
//! Concrete implementations of the ports defined in `application::port`,
//! plus the file and image I/O the widget needs.
//!
//! # Available Adapters
//!
//! - [`directory`]: Stores uploads in a local folder (implements [`Uploader`])
//! - [`http`]: Multipart POST to an endpoint (implements [`Uploader`])
//! - [`files`]: Reads picked or dropped files, opens the native picker
//! - [`images`]: Fetches and decodes thumbnails, with an LRU cache
//!
//! [`Uploader`]: crate::application::port::Uploader

pub mod directory;
pub mod files;
pub mod http;
pub mod images;

pub use directory::DirectoryUploader;
pub use http::HttpUploader;
pub use images::{ImageLoader, LoadedImage};
