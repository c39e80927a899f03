// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[general]` - Language and theme mode
//! - `[uploader]` - Uploader behavior (limits, visibility switches, destination)
//!
//! # Path Resolution
//!
//! The config file location can be customized for testing or portable deployments:
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. Set `ICED_UPLOADER_CONFIG_DIR` environment variable
//! 3. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use iced_uploader::app::config;
//!
//! // Load existing configuration (returns tuple with optional warning)
//! let (mut config, _warning) = config::load();
//!
//! // Modify a setting
//! config.uploader.max_count = Some(9);
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::application::upload::Options;
use crate::error::Result;
use crate::ui::theming::ThemeMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";

// =============================================================================
// Section Structs
// =============================================================================

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct GeneralConfig {
    /// UI language code (e.g., "en-US", "fr", "zh-CN").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Application theme mode (light, dark, or system).
    #[serde(default, deserialize_with = "deserialize_theme_mode")]
    pub theme_mode: ThemeMode,
}

/// Uploader behavior.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UploaderConfig {
    /// Allow several files per selection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiple: Option<bool>,

    /// Maximum number of items; `0` or absent means unlimited.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_count: Option<usize>,

    /// Cells per grid row.
    #[serde(default = "default_columns", skip_serializing_if = "Option::is_none")]
    pub columns: Option<usize>,

    /// Show the spinner while uploading.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_upload: Option<bool>,

    /// Keep failed items visible.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_failed: Option<bool>,

    /// Show delete buttons.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deletable: Option<bool>,

    /// Open the full-screen preview on click.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview: Option<bool>,

    /// Ask for confirmation before deleting.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirm_delete: Option<bool>,

    /// Largest accepted file, in bytes.
    #[serde(
        default = "default_max_file_size",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_file_size: Option<u64>,

    /// Accepted mime patterns (e.g. `image/*`).
    #[serde(default = "default_accept", skip_serializing_if = "Option::is_none")]
    pub accept: Option<Vec<String>>,

    /// Directory receiving files when no endpoint is configured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upload_dir: Option<PathBuf>,

    /// HTTP endpoint receiving multipart uploads.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
}

impl Default for UploaderConfig {
    fn default() -> Self {
        Self {
            multiple: Some(false),
            max_count: None,
            columns: default_columns(),
            show_upload: Some(true),
            show_failed: Some(true),
            deletable: Some(true),
            preview: Some(true),
            confirm_delete: Some(true),
            max_file_size: default_max_file_size(),
            accept: default_accept(),
            upload_dir: None,
            endpoint: None,
        }
    }
}

/// Root configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub uploader: UploaderConfig,
}

// =============================================================================
// Widget options
// =============================================================================

impl From<&UploaderConfig> for Options {
    fn from(cfg: &UploaderConfig) -> Self {
        let defaults = Options::default();
        Options {
            multiple: cfg.multiple.unwrap_or(defaults.multiple),
            max_count: cfg.max_count.filter(|count| *count > 0),
            columns: cfg
                .columns
                .map_or(defaults.columns, |c| c.clamp(MIN_COLUMNS, MAX_COLUMNS)),
            show_upload: cfg.show_upload.unwrap_or(defaults.show_upload),
            show_failed: cfg.show_failed.unwrap_or(defaults.show_failed),
            deletable: cfg.deletable.unwrap_or(defaults.deletable),
            preview: cfg.preview.unwrap_or(defaults.preview),
            notify_preview: defaults.notify_preview,
            disable_upload: defaults.disable_upload,
        }
    }
}

// =============================================================================
// Serde helpers
// =============================================================================

fn default_columns() -> Option<usize> {
    Some(DEFAULT_COLUMNS)
}

fn default_max_file_size() -> Option<u64> {
    Some(DEFAULT_MAX_FILE_SIZE)
}

fn default_accept() -> Option<Vec<String>> {
    Some(DEFAULT_ACCEPT.iter().map(ToString::to_string).collect())
}

fn deserialize_theme_mode<'de, D>(deserializer: D) -> std::result::Result<ThemeMode, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;

    let raw = String::deserialize(deserializer)?;
    match raw.to_lowercase().as_str() {
        "light" => Ok(ThemeMode::Light),
        "dark" => Ok(ThemeMode::Dark),
        "system" => Ok(ThemeMode::System),
        other => Err(D::Error::custom(format!("invalid theme_mode: {}", other))),
    }
}

// =============================================================================
// Config Path Resolution
// =============================================================================

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load / Save
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with the i18n key of a warning to show.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "invalid settings file");
                    return (
                        Config::default(),
                        Some("notification-config-load-error".to_string()),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads the configuration from an explicit file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid TOML.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str::<Config>(&content)?)
}

/// Saves the configuration to the default path.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves the configuration to an explicit file, creating parent directories.
///
/// # Errors
///
/// Returns an error if serialization fails or the file cannot be written.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
