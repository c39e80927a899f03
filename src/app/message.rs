// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::ui::image_uploader;
use crate::ui::notifications;
use std::path::PathBuf;
use std::time::Instant;

/// Top-level messages consumed by `App::update`.
#[derive(Debug, Clone)]
pub enum Message {
    Uploader(image_uploader::Message),
    Notification(notifications::NotificationMessage),
    /// A file was dropped on the window.
    FileDropped(PathBuf),
    /// Periodic tick for notification auto-dismiss.
    Tick(Instant),
}

/// Runtime flags passed in from the command line.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional locale override in BCP-47 form (e.g. `fr`, `en-US`).
    pub lang: Option<String>,
    /// Optional config directory override (for settings.toml).
    /// Takes precedence over `ICED_UPLOADER_CONFIG_DIR` environment variable.
    pub config_dir: Option<String>,
    /// Directory receiving uploads when no endpoint is set.
    pub upload_dir: Option<String>,
    /// HTTP endpoint receiving multipart uploads.
    pub endpoint: Option<String>,
    /// Maximum number of images; `0` means unlimited.
    pub max_count: Option<usize>,
    /// Allow several files per selection.
    pub multiple: bool,
    /// Already uploaded image URLs shown at startup.
    pub value: Vec<String>,
    /// Image files uploaded right after startup.
    pub files: Vec<String>,
}
