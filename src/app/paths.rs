// SPDX-License-Identifier: MPL-2.0
//! Centralized path management for application directories.
//!
//! # Path Resolution Order
//!
//! Paths are resolved in the following priority order:
//! 1. **Explicit override** - parameter to `_with_override()` functions (for tests)
//! 2. **CLI argument** (`--config-dir`) - set via [`init_cli_overrides`]
//! 3. **Environment variables** (`ICED_UPLOADER_DATA_DIR`, `ICED_UPLOADER_CONFIG_DIR`)
//! 4. **Platform default** - via `dirs` crate

use std::path::PathBuf;
use std::sync::OnceLock;

/// Application name used for directory naming.
const APP_NAME: &str = "IcedUploader";

/// Sub-directory of the data directory receiving local uploads.
const UPLOADS_DIR: &str = "uploads";

/// Environment variable to override the data directory.
pub const ENV_DATA_DIR: &str = "ICED_UPLOADER_DATA_DIR";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "ICED_UPLOADER_CONFIG_DIR";

/// Global CLI override for config directory (set once at startup).
static CLI_CONFIG_DIR: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Initializes the CLI override for the config directory.
///
/// Later calls are ignored; the first value wins.
pub fn init_cli_overrides(config_dir: Option<String>) {
    if CLI_CONFIG_DIR.set(config_dir.map(PathBuf::from)).is_err() {
        tracing::debug!("config dir override already initialized");
    }
}

fn get_cli_config_dir() -> Option<PathBuf> {
    CLI_CONFIG_DIR.get().and_then(Clone::clone)
}

fn env_dir(name: &str) -> Option<PathBuf> {
    std::env::var(name)
        .ok()
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

/// Returns the application data directory path.
///
/// - Linux: `~/.local/share/IcedUploader/`
/// - macOS: `~/Library/Application Support/IcedUploader/`
/// - Windows: `C:\Users\<User>\AppData\Roaming\IcedUploader\`
pub fn get_app_data_dir() -> Option<PathBuf> {
    get_app_data_dir_with_override(None)
}

/// Returns the application data directory path with an optional override.
pub fn get_app_data_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(path) = override_path {
        return Some(path);
    }

    if let Some(path) = env_dir(ENV_DATA_DIR) {
        return Some(path);
    }

    dirs::data_dir().map(|mut path| {
        path.push(APP_NAME);
        path
    })
}

/// Returns the default destination of the directory uploader.
pub fn get_default_upload_dir() -> Option<PathBuf> {
    get_app_data_dir().map(|mut path| {
        path.push(UPLOADS_DIR);
        path
    })
}

/// Returns the application config directory path (where `settings.toml` lives)
/// with an optional override.
pub fn get_app_config_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(path) = override_path {
        return Some(path);
    }

    if let Some(path) = get_cli_config_dir() {
        return Some(path);
    }

    if let Some(path) = env_dir(ENV_CONFIG_DIR) {
        return Some(path);
    }

    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_override_wins() {
        let custom = PathBuf::from("/tmp/custom-uploader");
        assert_eq!(
            get_app_config_dir_with_override(Some(custom.clone())),
            Some(custom.clone())
        );
        assert_eq!(get_app_data_dir_with_override(Some(custom.clone())), Some(custom));
    }

    #[test]
    fn upload_dir_is_inside_data_dir() {
        if let (Some(data), Some(uploads)) = (get_app_data_dir(), get_default_upload_dir()) {
            assert!(uploads.starts_with(&data));
            assert!(uploads.ends_with(UPLOADS_DIR));
        }
    }
}
