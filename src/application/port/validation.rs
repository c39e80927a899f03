// SPDX-License-Identifier: MPL-2.0
//! Validation port (`before_upload`).
//!
//! A [`BeforeUpload`] hook runs synchronously for every selected file before
//! it enters the queue. It may pass the file through, replace it (for
//! example with a re-encoded version), or reject it.

use crate::domain::upload::{SelectedFile, UploadItem};
use std::fmt;
use std::sync::Arc;

// =============================================================================
// Rejection
// =============================================================================

/// Why a file was kept out of the queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// The file is larger than the configured limit.
    TooLarge {
        /// Actual size in bytes.
        size: u64,
        /// Allowed size in bytes.
        limit: u64,
    },

    /// The mime type does not match any accepted pattern.
    UnsupportedType(String),

    /// Rejected by a custom hook.
    Custom(String),
}

impl Rejection {
    /// Returns the i18n message key for this rejection.
    #[must_use]
    pub fn i18n_key(&self) -> &'static str {
        match self {
            Rejection::TooLarge { .. } => "notification-rejected-too-large",
            Rejection::UnsupportedType(_) => "notification-rejected-type",
            Rejection::Custom(_) => "notification-rejected-custom",
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::TooLarge { size, limit } => {
                write!(f, "The file is too large! ({size} bytes, limit {limit})")
            }
            Rejection::UnsupportedType(mime) => write!(f, "Unsupported file type: {mime}"),
            Rejection::Custom(reason) => write!(f, "{reason}"),
        }
    }
}

impl std::error::Error for Rejection {}

// =============================================================================
// BeforeUpload Trait
// =============================================================================

/// Port for the validation/transform hook.
///
/// `queue` is the list as it was before this selection, so hooks can
/// implement rules like "no duplicate names".
pub trait BeforeUpload: Send + Sync {
    /// Returns the (possibly replaced) file to enqueue, or a rejection.
    ///
    /// # Errors
    ///
    /// Returns a [`Rejection`] when the file must not be uploaded.
    fn check(&self, file: SelectedFile, queue: &[UploadItem]) -> Result<SelectedFile, Rejection>;
}

impl<F> BeforeUpload for F
where
    F: Fn(SelectedFile, &[UploadItem]) -> Result<SelectedFile, Rejection> + Send + Sync,
{
    fn check(&self, file: SelectedFile, queue: &[UploadItem]) -> Result<SelectedFile, Rejection> {
        self(file, queue)
    }
}

// =============================================================================
// Built-in hooks
// =============================================================================

/// Rejects files larger than the given number of bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaxFileSize(pub u64);

impl BeforeUpload for MaxFileSize {
    fn check(&self, file: SelectedFile, _queue: &[UploadItem]) -> Result<SelectedFile, Rejection> {
        if file.size() > self.0 {
            Err(Rejection::TooLarge {
                size: file.size(),
                limit: self.0,
            })
        } else {
            Ok(file)
        }
    }
}

/// Rejects files whose mime type matches none of the patterns.
///
/// Patterns are exact mime types (`image/png`) or wildcards (`image/*`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptFilter {
    patterns: Vec<String>,
}

impl AcceptFilter {
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            patterns: patterns
                .into_iter()
                .map(Into::into)
                .map(|p: String| p.trim().to_ascii_lowercase())
                .filter(|p| !p.is_empty())
                .collect(),
        }
    }

    /// Only image types, the uploader's default.
    #[must_use]
    pub fn images() -> Self {
        Self::new(["image/*"])
    }

    #[must_use]
    pub fn accepts(&self, mime: &str) -> bool {
        if self.patterns.is_empty() {
            return true;
        }
        let mime = mime.to_ascii_lowercase();
        self.patterns.iter().any(|pattern| {
            if pattern == "*" || pattern == "*/*" {
                return true;
            }
            match pattern.strip_suffix("/*") {
                Some(major) => mime
                    .split_once('/')
                    .is_some_and(|(mime_major, _)| mime_major == major),
                None => *pattern == mime,
            }
        })
    }
}

impl BeforeUpload for AcceptFilter {
    fn check(&self, file: SelectedFile, _queue: &[UploadItem]) -> Result<SelectedFile, Rejection> {
        if self.accepts(file.mime()) {
            Ok(file)
        } else {
            Err(Rejection::UnsupportedType(file.mime().to_string()))
        }
    }
}

/// Runs hooks in order; the first rejection wins and each hook sees the
/// file returned by the previous one.
#[derive(Clone, Default)]
pub struct ValidationChain {
    hooks: Vec<Arc<dyn BeforeUpload>>,
}

impl ValidationChain {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, hook: impl BeforeUpload + 'static) -> Self {
        self.hooks.push(Arc::new(hook));
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}

impl fmt::Debug for ValidationChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationChain")
            .field("hooks", &self.hooks.len())
            .finish()
    }
}

impl BeforeUpload for ValidationChain {
    fn check(&self, file: SelectedFile, queue: &[UploadItem]) -> Result<SelectedFile, Rejection> {
        self.hooks
            .iter()
            .try_fold(file, |file, hook| hook.check(file, queue))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png(bytes: &[u8]) -> SelectedFile {
        SelectedFile::new("hello.png", bytes.to_vec())
    }

    #[test]
    fn max_file_size_rejects_large_files() {
        let hook = MaxFileSize(4);
        assert!(hook.check(png(b"four"), &[]).is_ok());
        assert_eq!(
            hook.check(png(b"hello"), &[]),
            Err(Rejection::TooLarge { size: 5, limit: 4 })
        );
    }

    #[test]
    fn rejection_message_mentions_size() {
        let rejection = Rejection::TooLarge { size: 5, limit: 4 };
        assert!(rejection.to_string().contains("The file is too large!"));
        assert_eq!(rejection.i18n_key(), "notification-rejected-too-large");
    }

    #[test]
    fn accept_filter_matches_wildcards_and_exact_types() {
        let filter = AcceptFilter::new(["image/*", "application/pdf"]);
        assert!(filter.accepts("image/png"));
        assert!(filter.accepts("IMAGE/JPEG"));
        assert!(filter.accepts("application/pdf"));
        assert!(!filter.accepts("application/zip"));
        assert!(!filter.accepts("imagery"));
    }

    #[test]
    fn empty_accept_filter_accepts_everything() {
        assert!(AcceptFilter::new(Vec::<String>::new()).accepts("text/plain"));
        assert!(AcceptFilter::new(["*/*"]).accepts("text/plain"));
    }

    #[test]
    fn accept_filter_rejects_with_mime() {
        let file = SelectedFile::new("a.txt", Vec::<u8>::new());
        let result = AcceptFilter::images().check(file, &[]);
        assert_eq!(
            result,
            Err(Rejection::UnsupportedType("application/octet-stream".into()))
        );
    }

    #[test]
    fn chain_stops_at_first_rejection() {
        let chain = ValidationChain::new()
            .with(AcceptFilter::images())
            .with(MaxFileSize(2));
        assert!(matches!(
            chain.check(png(b"abc"), &[]),
            Err(Rejection::TooLarge { .. })
        ));
        assert!(chain.check(png(b"ab"), &[]).is_ok());
    }

    #[test]
    fn chain_passes_replaced_file_along() {
        let rename = |file: SelectedFile, _: &[UploadItem]| {
            Ok::<_, Rejection>(SelectedFile::new("renamed.png", file.bytes().clone()))
        };
        let chain = ValidationChain::new().with(rename).with(MaxFileSize(10));
        let checked = chain.check(png(b"abc"), &[]).unwrap();
        assert_eq!(checked.name(), "renamed.png");
    }

    #[test]
    fn closures_see_the_current_queue() {
        let no_duplicates = |file: SelectedFile, queue: &[UploadItem]| {
            if queue.iter().any(|item| item.label() == file.name()) {
                Err(Rejection::Custom("duplicate".into()))
            } else {
                Ok(file)
            }
        };
        let queue = vec![UploadItem::done("https://cdn/hello.png")];
        assert!(no_duplicates.check(png(b"x"), &queue).is_err());
        assert!(no_duplicates.check(png(b"x"), &[]).is_ok());
    }
}
