// SPDX-License-Identifier: MPL-2.0
//! Behavior switches of the image uploader.

/// Default number of cells per grid row.
pub const DEFAULT_COLUMNS: usize = 4;

/// Minimum number of cells per grid row.
pub const MIN_COLUMNS: usize = 1;

/// Maximum number of cells per grid row.
pub const MAX_COLUMNS: usize = 8;

/// Options recognized by the uploader.
///
/// The queue only looks at `multiple`, `max_count` and `show_failed`; the
/// rest drive the rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct Options {
    /// Allow more than one file per selection.
    pub multiple: bool,
    /// Cap on the total number of items. `None` means unlimited.
    pub max_count: Option<usize>,
    /// Number of cells per grid row.
    pub columns: usize,
    /// Show the spinner overlay while an item uploads.
    pub show_upload: bool,
    /// Keep failed items visible; otherwise they are dropped on failure.
    pub show_failed: bool,
    /// Render the delete affordance.
    pub deletable: bool,
    /// Open the built-in full-screen viewer when a done cell is pressed.
    pub preview: bool,
    /// Emit `Event::Preview` when a done cell is pressed.
    pub notify_preview: bool,
    /// Hide the add cell.
    pub disable_upload: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            multiple: false,
            max_count: None,
            columns: DEFAULT_COLUMNS,
            show_upload: true,
            show_failed: true,
            deletable: true,
            preview: true,
            notify_preview: false,
            disable_upload: false,
        }
    }
}

impl Options {
    #[must_use]
    pub fn multiple(mut self, multiple: bool) -> Self {
        self.multiple = multiple;
        self
    }

    /// Sets the item cap; `0` removes it.
    #[must_use]
    pub fn max_count(mut self, max_count: usize) -> Self {
        self.max_count = (max_count > 0).then_some(max_count);
        self
    }

    #[must_use]
    pub fn columns(mut self, columns: usize) -> Self {
        self.columns = columns.clamp(MIN_COLUMNS, MAX_COLUMNS);
        self
    }

    #[must_use]
    pub fn show_upload(mut self, show_upload: bool) -> Self {
        self.show_upload = show_upload;
        self
    }

    #[must_use]
    pub fn show_failed(mut self, show_failed: bool) -> Self {
        self.show_failed = show_failed;
        self
    }

    #[must_use]
    pub fn deletable(mut self, deletable: bool) -> Self {
        self.deletable = deletable;
        self
    }

    #[must_use]
    pub fn preview(mut self, preview: bool) -> Self {
        self.preview = preview;
        self
    }

    #[must_use]
    pub fn notify_preview(mut self, notify_preview: bool) -> Self {
        self.notify_preview = notify_preview;
        self
    }

    #[must_use]
    pub fn disable_upload(mut self, disable_upload: bool) -> Self {
        self.disable_upload = disable_upload;
        self
    }
}
