// SPDX-License-Identifier: MPL-2.0
//! Projection from queue state to grid cells.
//!
//! [`project`] decides what every cell shows and which gestures it accepts.
//! It is pure so the rendering rules can be tested without a renderer.

use crate::application::upload::Options;
use crate::domain::upload::{ItemId, ItemStatus, UploadItem};

/// What is drawn over the thumbnail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    /// Spinner and "Uploading..." caption.
    Uploading,
    /// Failure marker.
    Failed,
}

/// A cell showing one upload item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemCell {
    pub id: ItemId,
    /// Position in the queue.
    pub index: usize,
    pub status: ItemStatus,
    pub overlay: Overlay,
    /// Whether the delete badge is shown.
    pub deletable: bool,
    /// Position among done items, when clicking the cell previews it.
    pub preview_index: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Item(ItemCell),
    /// The trailing "add" cell.
    Add,
}

/// Maps the queue to the ordered cells of the grid.
#[must_use]
pub fn project(items: &[UploadItem], options: &Options) -> Vec<CellKind> {
    let clickable = options.preview || options.notify_preview;
    let mut done_index = 0;
    let mut cells = Vec::with_capacity(items.len() + 1);

    for (index, item) in items.iter().enumerate() {
        let status = item.status();
        if status == ItemStatus::Failed && !options.show_failed {
            continue;
        }

        let overlay = match status {
            ItemStatus::Pending | ItemStatus::Uploading if options.show_upload => Overlay::Uploading,
            ItemStatus::Failed => Overlay::Failed,
            _ => Overlay::None,
        };

        let preview_index = (status == ItemStatus::Done).then(|| {
            done_index += 1;
            done_index - 1
        });

        cells.push(CellKind::Item(ItemCell {
            id: item.id(),
            index,
            status,
            overlay,
            deletable: options.deletable,
            preview_index: preview_index.filter(|_| clickable),
        }));
    }

    let full = options.max_count.is_some_and(|max| items.len() >= max);
    if !options.disable_upload && !full {
        cells.push(CellKind::Add);
    }
    cells
}
