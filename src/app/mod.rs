// SPDX-License-Identifier: MPL-2.0
//! Application root state hosting the image uploader in a window.
//!
//! The `App` struct wires together the uploader, localization, the
//! configured upload destination and the toast notifications, and turns
//! uploader events into user feedback.

pub mod config;
pub mod i18n;
mod message;
pub mod paths;
mod subscription;
mod update;
mod view;

pub use message::{Flags, Message};

use crate::application::port::{AcceptFilter, MaxFileSize, SharedUploader, ValidationChain};
use crate::application::upload::{Hooks, OnDelete, Options};
use crate::infrastructure::{DirectoryUploader, HttpUploader};
use crate::ui::image_uploader;
use crate::ui::notifications::{self, Notification};
use crate::ui::theming::ThemeMode;
use config::{Config, UploaderConfig};
use i18n::I18n;
use iced::{window, Element, Subscription, Task, Theme};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Root Iced application state.
pub struct App {
    pub i18n: I18n,
    uploader: image_uploader::State,
    theme_mode: ThemeMode,
    /// Where uploads go, shown in the header.
    destination: String,
    /// URLs of the done items, as last reported by the uploader.
    value: Vec<String>,
    /// Toast notification manager for user feedback.
    notifications: notifications::Manager,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("items", &self.uploader.items().len())
            .field("destination", &self.destination)
            .finish()
    }
}

pub const WINDOW_DEFAULT_HEIGHT: u32 = 560;
pub const WINDOW_DEFAULT_WIDTH: u32 = 640;
pub const MIN_WINDOW_HEIGHT: u32 = 320;
pub const MIN_WINDOW_WIDTH: u32 = 360;

/// Builds the window settings.
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // iced requires a `Fn` boot; the flags are consumed on the first call.
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state.borrow_mut().take().unwrap_or_default();
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

/// Upload function plus the label of its destination.
struct Destination {
    uploader: SharedUploader,
    label: String,
    /// Set when the endpoint was unusable and the directory was used instead.
    fallback_warning: Option<Notification>,
}

fn upload_dir(cfg: &UploaderConfig, flags: &Flags) -> PathBuf {
    flags
        .upload_dir
        .clone()
        .map(PathBuf::from)
        .or_else(|| cfg.upload_dir.clone())
        .or_else(paths::get_default_upload_dir)
        .unwrap_or_else(|| std::env::temp_dir().join("iced_uploader"))
}

fn destination(cfg: &UploaderConfig, flags: &Flags) -> Destination {
    let endpoint = flags.endpoint.clone().or_else(|| cfg.endpoint.clone());
    let dir = upload_dir(cfg, flags);

    let Some(endpoint) = endpoint else {
        return Destination {
            label: dir.display().to_string(),
            uploader: Arc::new(DirectoryUploader::new(dir)),
            fallback_warning: None,
        };
    };

    match HttpUploader::new(endpoint.clone()) {
        Ok(uploader) => Destination {
            uploader: Arc::new(uploader),
            label: endpoint,
            fallback_warning: None,
        },
        Err(err) => {
            tracing::warn!(endpoint = %endpoint, error = %err, "cannot use upload endpoint");
            let label = dir.display().to_string();
            Destination {
                fallback_warning: Some(
                    Notification::warning("notification-endpoint-error")
                        .with_arg("dir", label.clone()),
                ),
                uploader: Arc::new(DirectoryUploader::new(dir)),
                label,
            }
        }
    }
}

/// Built-in validation from `accept` and `max_file_size`.
fn validation(cfg: &UploaderConfig) -> ValidationChain {
    let mut chain = ValidationChain::new();
    if let Some(patterns) = cfg.accept.as_ref().filter(|patterns| !patterns.is_empty()) {
        chain = chain.with(AcceptFilter::new(patterns.iter().map(String::as_str)));
    }
    if let Some(limit) = cfg.max_file_size.filter(|limit| *limit > 0) {
        chain = chain.with(MaxFileSize(limit));
    }
    chain
}

fn options(cfg: &UploaderConfig, flags: &Flags) -> Options {
    let mut options = Options::from(cfg);
    if flags.multiple {
        options.multiple = true;
    }
    if let Some(max) = flags.max_count {
        options.max_count = (max > 0).then_some(max);
    }
    options
}

impl App {
    /// Loads the configuration and builds the application from it.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        paths::init_cli_overrides(flags.config_dir.clone());
        let (config, config_warning) = config::load();
        Self::from_config(flags, &config, config_warning)
    }

    fn from_config(
        flags: Flags,
        config: &Config,
        config_warning: Option<String>,
    ) -> (Self, Task<Message>) {
        let i18n = I18n::new(flags.lang.clone(), config);
        let mut notifications = notifications::Manager::new();
        if let Some(key) = config_warning {
            notifications.push(Notification::warning(key));
        }

        let Destination {
            uploader,
            label,
            fallback_warning,
        } = destination(&config.uploader, &flags);
        if let Some(warning) = fallback_warning {
            notifications.push(warning);
        }

        let mut hooks = Hooks::new(uploader);
        let chain = validation(&config.uploader);
        if !chain.is_empty() {
            hooks = hooks.with_before_upload(chain);
        }
        if config.uploader.confirm_delete.unwrap_or(true) {
            hooks = hooks.with_on_delete(OnDelete::Dialog);
        }

        let options = options(&config.uploader, &flags);
        tracing::info!(destination = %label, ?options, "starting uploader");

        let (uploader, load_task) =
            image_uploader::State::new(options, hooks, flags.value.iter().cloned());
        let startup_files = uploader.add_paths(flags.files.iter().map(PathBuf::from).collect());

        let app = App {
            i18n,
            value: flags.value,
            uploader,
            theme_mode: config.general.theme_mode,
            destination: label,
            notifications,
        };

        let task = Task::batch([load_task, startup_files]).map(Message::Uploader);
        (app, task)
    }

    fn title(&self) -> String {
        self.i18n.tr("window-title")
    }

    fn theme(&self) -> Theme {
        self.theme_mode.to_iced_theme()
    }

    fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            subscription::create_event_subscription(),
            subscription::create_tick_subscription(self.notifications.has_notifications()),
            self.uploader.subscription().map(Message::Uploader),
        ])
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            i18n: &self.i18n,
            uploader: &self.uploader,
            notifications: &self.notifications,
            destination: &self.destination,
            done: self.value.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn flags_with_dir(dir: &std::path::Path) -> Flags {
        Flags {
            lang: Some("en-US".to_string()),
            upload_dir: Some(dir.display().to_string()),
            ..Flags::default()
        }
    }

    #[test]
    fn directory_destination_is_used_without_endpoint() {
        let temp = tempdir().expect("temp dir");
        let flags = flags_with_dir(temp.path());
        let dest = destination(&UploaderConfig::default(), &flags);
        assert_eq!(dest.label, temp.path().display().to_string());
        assert!(dest.fallback_warning.is_none());
    }

    #[test]
    fn endpoint_flag_selects_http_destination() {
        let temp = tempdir().expect("temp dir");
        let flags = Flags {
            endpoint: Some("https://upload.example.com/files".to_string()),
            ..flags_with_dir(temp.path())
        };
        let dest = destination(&UploaderConfig::default(), &flags);
        assert_eq!(dest.label, "https://upload.example.com/files");
    }

    #[test]
    fn flags_override_config_options() {
        let flags = Flags {
            multiple: true,
            max_count: Some(3),
            ..Flags::default()
        };
        let opts = options(&UploaderConfig::default(), &flags);
        assert!(opts.multiple);
        assert_eq!(opts.max_count, Some(3));

        let unlimited = Flags {
            max_count: Some(0),
            ..Flags::default()
        };
        assert_eq!(options(&UploaderConfig::default(), &unlimited).max_count, None);
    }

    #[test]
    fn default_config_validates_type_and_size() {
        assert!(!validation(&UploaderConfig::default()).is_empty());

        let open = UploaderConfig {
            accept: None,
            max_file_size: None,
            ..UploaderConfig::default()
        };
        assert!(validation(&open).is_empty());
    }

    #[test]
    fn config_warning_becomes_a_toast() {
        let temp = tempdir().expect("temp dir");
        let (app, _task) = App::from_config(
            flags_with_dir(temp.path()),
            &Config::default(),
            Some("notification-config-load-error".to_string()),
        );
        assert!(app.notifications.has_notifications());
        assert_eq!(app.title(), "Image Uploader");
    }

    #[test]
    fn initial_value_is_shown() {
        let temp = tempdir().expect("temp dir");
        let flags = Flags {
            value: vec!["https://images.example.com/a.jpg".to_string()],
            ..flags_with_dir(temp.path())
        };
        let (app, _task) = App::from_config(flags, &Config::default(), None);
        assert_eq!(app.uploader.items().len(), 1);
        assert_eq!(app.value.len(), 1);
    }
}
