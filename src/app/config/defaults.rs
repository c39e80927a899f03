// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the application. Constants are organized by category.
//!
//! # Categories
//!
//! - **Grid**: Number of cells per row
//! - **Limits**: Count and size limits applied to selections
//! - **Thumbnails**: Thumbnail size and remote cache capacity

// ==========================================================================
// Grid Defaults
// ==========================================================================

pub use crate::application::upload::options::{DEFAULT_COLUMNS, MAX_COLUMNS, MIN_COLUMNS};

// ==========================================================================
// Limit Defaults
// ==========================================================================

/// Default maximum file size accepted by the built-in size check (10 MiB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Default accepted mime patterns.
pub const DEFAULT_ACCEPT: &[&str] = &["image/*"];

// ==========================================================================
// Thumbnail Defaults
// ==========================================================================

pub use crate::infrastructure::images::{REMOTE_IMAGE_CACHE_CAPACITY, THUMBNAIL_EDGE_PX};

// ==========================================================================
// Animation Defaults
// ==========================================================================

/// Interval between spinner frames, in milliseconds.
pub const SPINNER_TICK_MS: u64 = 50;

/// Spinner rotation per tick, in radians.
pub const SPINNER_STEP_RAD: f32 = 0.25;
