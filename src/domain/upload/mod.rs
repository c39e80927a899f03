// SPDX-License-Identifier: MPL-2.0
//! Upload item domain types.

mod file;
mod item;

pub use file::SelectedFile;
pub use item::{ItemId, ItemStatus, UploadItem};
