// SPDX-License-Identifier: MPL-2.0
//! Image loading for cells and the preview.
//!
//! Local files come as bytes with the selection; already uploaded items
//! only have a URL, which is fetched over HTTP(S) or read from disk for
//! `file://` URLs. Fetched bytes are kept in an LRU cache keyed by URL so
//! re-rendering the same value does not hit the network again.

use crate::error::{Error, Result};
use iced::widget::image::Handle;
use image_rs::GenericImageView;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

/// Longest edge of a decoded thumbnail, in pixels.
pub const THUMBNAIL_EDGE_PX: u32 = 160;

/// Number of remote images kept in memory.
pub const REMOTE_IMAGE_CACHE_CAPACITY: usize = 64;

/// A decoded image ready for display.
#[derive(Debug, Clone)]
pub struct LoadedImage {
    /// Downscaled copy for grid cells.
    pub thumbnail: Handle,
    /// Original encoded bytes, decoded by Iced for the preview.
    pub full: Handle,
    pub width: u32,
    pub height: u32,
}

/// Decodes `bytes` and builds a thumbnail whose longest edge is at most `edge`.
///
/// # Errors
///
/// Returns [`Error::Image`] if the bytes are not a supported image.
pub fn decode(bytes: &[u8], edge: u32) -> Result<LoadedImage> {
    let img = image_rs::load_from_memory(bytes)?;
    let (width, height) = img.dimensions();

    let small = if width > edge || height > edge {
        img.thumbnail(edge, edge)
    } else {
        img
    };
    let (thumb_width, thumb_height) = small.dimensions();
    let thumbnail = Handle::from_rgba(thumb_width, thumb_height, small.to_rgba8().into_vec());

    Ok(LoadedImage {
        thumbnail,
        full: Handle::from_bytes(bytes.to_vec()),
        width,
        height,
    })
}

/// [`decode`] on the blocking pool.
///
/// # Errors
///
/// Returns an error if decoding fails or the blocking task panics.
pub async fn decode_in_background(bytes: Arc<[u8]>) -> Result<LoadedImage> {
    tokio::task::spawn_blocking(move || decode(&bytes, THUMBNAIL_EDGE_PX))
        .await
        .map_err(|err| Error::Image(err.to_string()))?
}

/// Fetches images by URL, with a shared LRU cache.
#[derive(Debug, Clone)]
pub struct ImageLoader {
    client: reqwest::Client,
    cache: Arc<Mutex<LruCache<String, Arc<[u8]>>>>,
}

impl ImageLoader {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(10))
            .user_agent(concat!("IcedUploader/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(client, REMOTE_IMAGE_CACHE_CAPACITY))
    }

    pub fn with_client(client: reqwest::Client, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            client,
            cache: Arc::new(Mutex::new(LruCache::new(capacity))),
        }
    }

    /// Number of URLs currently cached.
    #[must_use]
    pub fn cached_len(&self) -> usize {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Returns the raw bytes behind `url`, from the cache when possible.
    ///
    /// # Errors
    ///
    /// Returns an error for unsupported schemes, unreachable servers,
    /// non-success statuses and unreadable files.
    pub async fn fetch(&self, url: &str) -> Result<Arc<[u8]>> {
        let cached = self
            .cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(url)
            .cloned();
        if let Some(bytes) = cached {
            return Ok(bytes);
        }

        let bytes: Arc<[u8]> = if let Some(path) = file_url_to_path(url) {
            tokio::fs::read(&path).await?.into()
        } else if url.starts_with("http://") || url.starts_with("https://") {
            let response = self.client.get(url).send().await?;
            if !response.status().is_success() {
                return Err(Error::Http(format!("HTTP status: {}", response.status())));
            }
            response.bytes().await?.to_vec().into()
        } else {
            return Err(Error::Http(format!("unsupported image URL: {url}")));
        };

        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .put(url.to_string(), Arc::clone(&bytes));
        Ok(bytes)
    }

    /// Fetches and decodes the image behind `url`.
    ///
    /// # Errors
    ///
    /// See [`ImageLoader::fetch`] and [`decode`].
    pub async fn load(&self, url: String) -> Result<LoadedImage> {
        let bytes = self.fetch(&url).await?;
        decode_in_background(bytes).await
    }
}

/// Maps a `file://` URL to a local path.
#[must_use]
pub fn file_url_to_path(url: &str) -> Option<PathBuf> {
    let rest = url.strip_prefix("file://")?;
    // `file:///C:/x` on Windows, `file:///tmp/x` elsewhere.
    if cfg!(windows) {
        Some(PathBuf::from(rest.trim_start_matches('/')))
    } else {
        Some(PathBuf::from(rest))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image_rs::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;
    use tempfile::tempdir;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        RgbaImage::from_pixel(width, height, Rgba([0, 128, 255, 255]))
            .write_to(&mut out, ImageFormat::Png)
            .expect("encode png");
        out.into_inner()
    }

    #[test]
    fn decode_keeps_original_dimensions() {
        let image = decode(&png_bytes(400, 200), THUMBNAIL_EDGE_PX).expect("decode");
        assert_eq!((image.width, image.height), (400, 200));
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(matches!(decode(b"hello", THUMBNAIL_EDGE_PX), Err(Error::Image(_))));
    }

    #[tokio::test]
    async fn fetch_reads_file_urls_and_caches_them() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("a.png");
        std::fs::write(&path, png_bytes(2, 2)).unwrap();
        let url = crate::infrastructure::directory::file_url(&path);

        let loader = ImageLoader::with_client(reqwest::Client::new(), 4);
        let first = loader.fetch(&url).await.expect("fetch");
        assert_eq!(loader.cached_len(), 1);

        // Served from the cache even after the file is gone.
        std::fs::remove_file(&path).unwrap();
        let second = loader.fetch(&url).await.expect("cached fetch");
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn load_decodes_file_urls() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("b.png");
        std::fs::write(&path, png_bytes(3, 5)).unwrap();

        let loader = ImageLoader::with_client(reqwest::Client::new(), 4);
        let image = loader
            .load(crate::infrastructure::directory::file_url(&path))
            .await
            .expect("load");
        assert_eq!((image.width, image.height), (3, 5));
    }

    #[tokio::test]
    async fn unsupported_scheme_is_an_error() {
        let loader = ImageLoader::with_client(reqwest::Client::new(), 4);
        assert!(loader.fetch("ftp://example.com/a.png").await.is_err());
        assert_eq!(loader.cached_len(), 0);
    }

    #[test]
    fn file_url_to_path_strips_scheme() {
        assert!(file_url_to_path("https://x/a.png").is_none());
        if !cfg!(windows) {
            assert_eq!(file_url_to_path("file:///tmp/a.png"), Some(PathBuf::from("/tmp/a.png")));
        }
    }
}
