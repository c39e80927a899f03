// SPDX-License-Identifier: MPL-2.0
//! A file picked by the user and waiting to be uploaded.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Mime type used when the extension is unknown.
const FALLBACK_MIME: &str = "application/octet-stream";

/// Raw file content plus the bits of metadata the uploader needs.
///
/// The bytes are shared, so cloning a `SelectedFile` (for snapshots or
/// for handing it to an upload task) does not copy the content.
///
/// # Example
///
/// ```
/// use iced_uploader::domain::upload::SelectedFile;
///
/// let file = SelectedFile::new("hello.png", b"hello".to_vec());
/// assert_eq!(file.mime(), "image/png");
/// assert_eq!(file.size(), 5);
/// ```
#[derive(Clone)]
pub struct SelectedFile {
    name: String,
    mime: String,
    bytes: Arc<[u8]>,
    path: Option<PathBuf>,
}

impl SelectedFile {
    /// Creates a file from a name and its content. The mime type is
    /// guessed from the name's extension.
    pub fn new(name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        let name = name.into();
        let mime = guess_mime(&name).to_string();
        Self {
            name,
            mime,
            bytes: bytes.into(),
            path: None,
        }
    }

    /// Overrides the guessed mime type.
    #[must_use]
    pub fn with_mime(mut self, mime: impl Into<String>) -> Self {
        self.mime = mime.into();
        self
    }

    /// Records the path the file was read from.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn mime(&self) -> &str {
        &self.mime
    }

    #[must_use]
    pub fn bytes(&self) -> &Arc<[u8]> {
        &self.bytes
    }

    /// Size of the content in bytes.
    #[must_use]
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Returns `true` if the mime type is an image type.
    #[must_use]
    pub fn is_image(&self) -> bool {
        self.mime.starts_with("image/")
    }
}

impl fmt::Debug for SelectedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectedFile")
            .field("name", &self.name)
            .field("mime", &self.mime)
            .field("size", &self.bytes.len())
            .field("path", &self.path)
            .finish()
    }
}

impl PartialEq for SelectedFile {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.mime == other.mime && self.bytes == other.bytes
    }
}

/// Guesses a mime type from a file name extension.
#[must_use]
pub fn guess_mime(name: &str) -> &'static str {
    let Some((_, ext)) = name.rsplit_once('.') else {
        return FALLBACK_MIME;
    };
    match ext.to_ascii_lowercase().as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "tif" | "tiff" => "image/tiff",
        "ico" => "image/x-icon",
        "svg" => "image/svg+xml",
        _ => FALLBACK_MIME,
    }
}
