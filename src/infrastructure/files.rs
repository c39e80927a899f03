// SPDX-License-Identifier: MPL-2.0
//! Reading picked or dropped files and opening the native picker.

use crate::domain::upload::SelectedFile;
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Extensions offered by the picker's image filter.
pub const IMAGE_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "webp", "bmp", "tif", "tiff", "ico", "svg",
];

/// Reads a file from disk into a [`SelectedFile`].
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub async fn read_selected_file(path: PathBuf) -> Result<SelectedFile> {
    let bytes = tokio::fs::read(&path).await?;
    let name = file_name(&path);
    Ok(SelectedFile::new(name, bytes).with_path(path))
}

/// Outcome of reading a batch of paths.
#[derive(Debug, Clone, Default)]
pub struct ReadBatch {
    pub files: Vec<SelectedFile>,
    /// Paths that could not be read, with the reason.
    pub failed: Vec<(PathBuf, Error)>,
}

/// Reads every path, keeping the selection order. Unreadable paths are
/// reported instead of failing the whole batch.
pub async fn read_selected_files(paths: Vec<PathBuf>) -> ReadBatch {
    let mut batch = ReadBatch::default();
    for path in paths {
        match read_selected_file(path.clone()).await {
            Ok(file) => batch.files.push(file),
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "cannot read selected file");
                batch.failed.push((path, err));
            }
        }
    }
    batch
}

/// Opens the native file dialog. Returns an empty list when cancelled.
pub async fn pick_files(multiple: bool) -> Vec<PathBuf> {
    let dialog = rfd::AsyncFileDialog::new()
        .add_filter("Images", IMAGE_EXTENSIONS)
        .add_filter("All files", &["*"]);

    if multiple {
        dialog
            .pick_files()
            .await
            .map(|handles| handles.iter().map(|h| h.path().to_path_buf()).collect())
            .unwrap_or_default()
    } else {
        dialog
            .pick_file()
            .await
            .map(|handle| vec![handle.path().to_path_buf()])
            .unwrap_or_default()
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
