// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! These are the only points where the uploader yields control to code it
//! does not own. All of them are fallible and their failures are part of
//! normal operation.
//!
//! # Available Ports
//!
//! - [`upload`]: The asynchronous upload function
//! - [`validation`]: The synchronous `before_upload` hook
//! - [`deletion`]: The asynchronous deletion confirmation
//!
//! # Design Notes
//!
//! - Traits use domain types only (no Iced handles, no reqwest types)
//! - Traits are `Send + Sync` so they can be shared with upload tasks
//! - Asynchronous ports return a boxed `'static` future; callers wrap it
//!   in an Iced `Task`
//! - Plain closures implement every port, which keeps tests short

pub mod deletion;
pub mod upload;
pub mod validation;

pub use deletion::{DeleteCancelled, DeleteGuard};
pub use upload::{SharedUploader, UploadError, UploadResponse, Uploader};
pub use validation::{AcceptFilter, BeforeUpload, MaxFileSize, Rejection, ValidationChain};
