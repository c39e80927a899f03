// SPDX-License-Identifier: MPL-2.0
//! Upload items and their per-item state machine.
//!
//! ```text
//! pending --start--> uploading --succeed--> done
//!                    uploading --fail-----> failed
//! ```
//!
//! Removal is handled by the queue and is valid from any state.

use super::SelectedFile;

/// Stable identifier of an upload item, generated at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(u64);

impl ItemId {
    /// Creates a new unique item ID.
    pub fn new() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

/// Where an item is in its upload lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemStatus {
    /// Uploaded; the item has a URL.
    Done,
    /// Selected but not handed to the uploader yet.
    Pending,
    /// Upload in flight.
    Uploading,
    /// Upload rejected by the uploader.
    Failed,
}

/// One entry of the upload list.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadItem {
    id: ItemId,
    url: Option<String>,
    file: Option<SelectedFile>,
    status: ItemStatus,
}

impl UploadItem {
    /// An already uploaded item, e.g. part of the initial value.
    pub fn done(url: impl Into<String>) -> Self {
        Self {
            id: ItemId::new(),
            url: Some(url.into()),
            file: None,
            status: ItemStatus::Done,
        }
    }

    /// A freshly selected file waiting for upload.
    #[must_use]
    pub fn pending(file: SelectedFile) -> Self {
        Self {
            id: ItemId::new(),
            url: None,
            file: Some(file),
            status: ItemStatus::Pending,
        }
    }

    #[must_use]
    pub fn id(&self) -> ItemId {
        self.id
    }

    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    #[must_use]
    pub fn file(&self) -> Option<&SelectedFile> {
        self.file.as_ref()
    }

    #[must_use]
    pub fn status(&self) -> ItemStatus {
        self.status
    }

    #[must_use]
    pub fn is_done(&self) -> bool {
        self.status == ItemStatus::Done
    }

    #[must_use]
    pub fn is_failed(&self) -> bool {
        self.status == ItemStatus::Failed
    }

    /// Display name: the file name while uploading, the last URL segment
    /// once done.
    #[must_use]
    pub fn label(&self) -> &str {
        if let Some(file) = &self.file {
            return file.name();
        }
        self.url
            .as_deref()
            .and_then(|url| url.rsplit('/').find(|segment| !segment.is_empty()))
            .unwrap_or_default()
    }

    /// Moves a pending item to `Uploading` and hands out its file.
    ///
    /// Returns `None` (and leaves the item untouched) from any other state.
    pub(crate) fn start(&mut self) -> Option<SelectedFile> {
        if self.status != ItemStatus::Pending {
            return None;
        }
        let file = self.file.clone()?;
        self.status = ItemStatus::Uploading;
        Some(file)
    }

    /// Marks the upload as successful. The raw file is released.
    pub(crate) fn succeed(&mut self, url: String) -> bool {
        if self.status != ItemStatus::Uploading {
            return false;
        }
        self.status = ItemStatus::Done;
        self.url = Some(url);
        self.file = None;
        true
    }

    /// Marks the upload as failed. No partial URL is kept.
    pub(crate) fn fail(&mut self) -> bool {
        if self.status != ItemStatus::Uploading {
            return false;
        }
        self.status = ItemStatus::Failed;
        self.url = None;
        self.file = None;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file() -> SelectedFile {
        SelectedFile::new("hello.png", b"hello".to_vec())
    }

    #[test]
    fn item_ids_are_unique() {
        assert_ne!(ItemId::new(), ItemId::new());
        assert_ne!(UploadItem::done("a").id(), UploadItem::done("a").id());
    }

    #[test]
    fn done_item_has_url() {
        let item = UploadItem::done("https://cdn.example.com/a.png");
        assert!(item.is_done());
        assert_eq!(item.url(), Some("https://cdn.example.com/a.png"));
        assert_eq!(item.label(), "a.png");
    }

    #[test]
    fn happy_path_transitions() {
        let mut item = UploadItem::pending(file());
        assert_eq!(item.status(), ItemStatus::Pending);

        let handed_out = item.start().expect("pending item should start");
        assert_eq!(handed_out.name(), "hello.png");
        assert_eq!(item.status(), ItemStatus::Uploading);

        assert!(item.succeed("file:///tmp/hello.png".into()));
        assert!(item.is_done());
        assert!(item.file().is_none());
        assert_eq!(item.url(), Some("file:///tmp/hello.png"));
    }

    #[test]
    fn failure_keeps_no_url() {
        let mut item = UploadItem::pending(file());
        item.start();
        assert!(item.fail());
        assert!(item.is_failed());
        assert!(item.url().is_none());
    }

    #[test]
    fn start_only_from_pending() {
        let mut item = UploadItem::done("a");
        assert!(item.start().is_none());
        assert!(item.is_done());

        let mut item = UploadItem::pending(file());
        item.start();
        assert!(item.start().is_none());
    }

    #[test]
    fn completion_only_from_uploading() {
        let mut item = UploadItem::pending(file());
        assert!(!item.succeed("x".into()));
        assert!(!item.fail());
        assert_eq!(item.status(), ItemStatus::Pending);
    }
}
