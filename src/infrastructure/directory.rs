// SPDX-License-Identifier: MPL-2.0
//! Uploader that copies files into a local directory.

use crate::application::port::{UploadError, UploadResponse, Uploader};
use crate::domain::upload::SelectedFile;
use futures_util::future::BoxFuture;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

/// Stops probing for a free name after this many collisions.
const MAX_NAME_ATTEMPTS: u32 = 1000;

/// Writes each file into `dir` and answers with a `file://` URL.
///
/// Names that already exist get a numeric suffix (`cat-1.png`), so two
/// uploads of the same file never overwrite each other.
#[derive(Debug, Clone)]
pub struct DirectoryUploader {
    dir: PathBuf,
}

impl DirectoryUploader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Uploader for DirectoryUploader {
    fn upload(&self, file: SelectedFile) -> BoxFuture<'static, Result<UploadResponse, UploadError>> {
        let dir = self.dir.clone();
        Box::pin(async move {
            tokio::fs::create_dir_all(&dir).await?;
            let path = write_unique(&dir, &file).await?;
            tracing::debug!(path = %path.display(), "stored upload");
            Ok(UploadResponse::new(file_url(&path)))
        })
    }
}

async fn write_unique(dir: &Path, file: &SelectedFile) -> Result<PathBuf, UploadError> {
    let file_name = sanitize(file.name());
    let (stem, ext) = match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem.to_string(), Some(ext.to_string())),
        _ => (file_name.clone(), None),
    };

    for attempt in 0..MAX_NAME_ATTEMPTS {
        let candidate = match (attempt, &ext) {
            (0, _) => file_name.clone(),
            (n, Some(ext)) => format!("{stem}-{n}.{ext}"),
            (n, None) => format!("{stem}-{n}"),
        };
        let path = dir.join(candidate);
        let opened = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await;
        match opened {
            Ok(mut out) => {
                out.write_all(file.bytes()).await?;
                out.flush().await?;
                return Ok(path);
            }
            Err(err) if err.kind() == ErrorKind::AlreadyExists => {}
            Err(err) => return Err(err.into()),
        }
    }

    Err(UploadError::Io(format!(
        "no free name for {} in {}",
        file.name(),
        dir.display()
    )))
}

/// Keeps only the final path component and replaces separators.
fn sanitize(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name).trim();
    if base.is_empty() || base == "." || base == ".." {
        "upload".to_string()
    } else {
        base.to_string()
    }
}

/// Builds a `file://` URL for an absolute path.
#[must_use]
pub fn file_url(path: &Path) -> String {
    let raw = path.to_string_lossy().replace('\\', "/");
    if raw.starts_with('/') {
        format!("file://{raw}")
    } else {
        format!("file:///{raw}")
    }
}
