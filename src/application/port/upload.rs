// SPDX-License-Identifier: MPL-2.0
//! Upload port definition.
//!
//! This module defines the [`Uploader`] trait: the externally supplied
//! function that takes a selected file and eventually yields either the
//! URL of the stored file or an error.

use crate::domain::upload::SelectedFile;
use futures_util::future::BoxFuture;
use serde::Deserialize;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

// =============================================================================
// UploadError
// =============================================================================

/// Errors an uploader can report. All of them are recoverable per item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadError {
    /// Reading or writing the file failed.
    Io(String),

    /// The request could not be sent or the connection dropped.
    Transport(String),

    /// The server answered with a non-success status code.
    Status(u16),

    /// The server answered but the body was not the expected `{ "url": ... }`.
    InvalidResponse(String),

    /// Any other failure reported by a custom uploader.
    Other(String),
}

impl UploadError {
    /// Returns the i18n message key for this error type.
    #[must_use]
    pub fn i18n_key(&self) -> &'static str {
        match self {
            UploadError::Io(_) => "error-upload-io",
            UploadError::Transport(_) => "error-upload-transport",
            UploadError::Status(_) => "error-upload-status",
            UploadError::InvalidResponse(_) => "error-upload-invalid-response",
            UploadError::Other(_) => "error-upload-general",
        }
    }
}

impl fmt::Display for UploadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadError::Io(msg) => write!(f, "I/O error: {msg}"),
            UploadError::Transport(msg) => write!(f, "Transport error: {msg}"),
            UploadError::Status(code) => write!(f, "Server responded with status {code}"),
            UploadError::InvalidResponse(msg) => write!(f, "Invalid server response: {msg}"),
            UploadError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for UploadError {}

impl From<std::io::Error> for UploadError {
    fn from(err: std::io::Error) -> Self {
        UploadError::Io(err.to_string())
    }
}

// =============================================================================
// UploadResponse
// =============================================================================

/// Successful upload result.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UploadResponse {
    /// Where the uploaded file can be fetched from.
    pub url: String,
}

impl UploadResponse {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

// =============================================================================
// Uploader Trait
// =============================================================================

/// Port for the upload function supplied by the embedding application.
///
/// The returned future must be `'static`: it runs as an independent task
/// and may outlive the item it was started for.
///
/// # Example
///
/// ```
/// use iced_uploader::application::port::{UploadError, UploadResponse, Uploader};
/// use iced_uploader::domain::upload::SelectedFile;
///
/// let uploader = |file: SelectedFile| async move {
///     Ok::<_, UploadError>(UploadResponse::new(format!("memory://{}", file.name())))
/// };
/// let _future = uploader.upload(SelectedFile::new("a.png", Vec::<u8>::new()));
/// ```
pub trait Uploader: Send + Sync {
    /// Uploads one file.
    fn upload(&self, file: SelectedFile) -> BoxFuture<'static, Result<UploadResponse, UploadError>>;
}

impl<F, Fut> Uploader for F
where
    F: Fn(SelectedFile) -> Fut + Send + Sync,
    Fut: Future<Output = Result<UploadResponse, UploadError>> + Send + 'static,
{
    fn upload(&self, file: SelectedFile) -> BoxFuture<'static, Result<UploadResponse, UploadError>> {
        Box::pin(self(file))
    }
}

/// Uploader shared between the widget and its in-flight tasks.
pub type SharedUploader = Arc<dyn Uploader>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_error_display() {
        assert_eq!(
            UploadError::Status(500).to_string(),
            "Server responded with status 500"
        );
        assert!(UploadError::Io("denied".into()).to_string().contains("denied"));
    }

    #[test]
    fn upload_error_i18n_keys() {
        assert_eq!(UploadError::Status(404).i18n_key(), "error-upload-status");
        assert_eq!(
            UploadError::Transport("reset".into()).i18n_key(),
            "error-upload-transport"
        );
    }

    #[test]
    fn response_deserializes_from_json_shape() {
        let parsed: UploadResponse =
            serde_json::from_str(r#"{"url":"https://cdn/x.png","size":42}"#).unwrap();
        assert_eq!(parsed, UploadResponse::new("https://cdn/x.png"));
    }

    #[tokio::test]
    async fn closures_are_uploaders() {
        let uploader: SharedUploader = Arc::new(|file: SelectedFile| async move {
            if file.size() > 3 {
                Err(UploadError::Other("too big".into()))
            } else {
                Ok(UploadResponse::new(file.name().to_string()))
            }
        });

        let ok = uploader.upload(SelectedFile::new("a.png", vec![1u8])).await;
        assert_eq!(ok, Ok(UploadResponse::new("a.png")));

        let err = uploader.upload(SelectedFile::new("b.png", vec![1u8; 8])).await;
        assert!(err.is_err());
    }
}
