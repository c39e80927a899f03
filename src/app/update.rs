// SPDX-License-Identifier: MPL-2.0
//! Message handling for the application.
//!
//! Uploader events are turned into toasts here; the uploader itself never
//! talks to the notification manager.

use super::{App, Message};
use crate::ui::image_uploader::{self, Event};
use crate::ui::notifications::Notification;
use iced::Task;

impl App {
    pub(super) fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Uploader(message) => {
                let (events, task) = self.uploader.update(message);
                self.handle_events(events);
                task.map(Message::Uploader)
            }
            Message::Notification(message) => {
                self.notifications.handle_message(&message);
                Task::none()
            }
            Message::FileDropped(path) => {
                tracing::debug!(path = %path.display(), "file dropped");
                self.uploader
                    .add_paths(vec![path])
                    .map(Message::Uploader)
            }
            Message::Tick(_now) => {
                self.notifications.tick();
                Task::none()
            }
        }
    }

    fn handle_events(&mut self, events: Vec<image_uploader::Event>) {
        for event in events {
            self.handle_event(event);
        }
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::QueueChanged(items) => {
                tracing::debug!(count = items.len(), "upload queue changed");
            }
            Event::ValueChanged(items) => {
                self.value = items
                    .iter()
                    .filter_map(|item| item.url().map(str::to_string))
                    .collect();
                tracing::info!(value = ?self.value, "value changed");
            }
            Event::CountExceeded(dropped) => {
                self.notifications.push(Notification::count_exceeded(dropped));
            }
            Event::Rejected { file_name, reason } => {
                self.notifications
                    .push(Notification::rejected(&file_name, &reason));
            }
            Event::UploadFailed { label, error } => {
                self.notifications
                    .push(Notification::upload_failed(&label, &error));
            }
            Event::ReadFailed { path, error } => {
                tracing::warn!(path = %path.display(), error = %error, "cannot read file");
                self.notifications.push(
                    Notification::error("notification-file-read-error")
                        .with_arg("file", path.display().to_string()),
                );
            }
            Event::Preview { index, item } => {
                tracing::info!(index, label = item.label(), "preview requested");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::config::Config;
    use crate::app::Flags;
    use crate::application::port::{Rejection, UploadError};
    use crate::domain::upload::UploadItem;
    use crate::error::Error;
    use crate::ui::notifications::Severity;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn app() -> (App, tempfile::TempDir) {
        let temp = tempdir().expect("temp dir");
        let flags = Flags {
            lang: Some("en-US".to_string()),
            upload_dir: Some(temp.path().display().to_string()),
            ..Flags::default()
        };
        let (app, _task) = App::from_config(flags, &Config::default(), None);
        (app, temp)
    }

    fn severities(app: &App) -> Vec<Severity> {
        app.notifications.visible().map(Notification::severity).collect()
    }

    #[test]
    fn count_exceeded_shows_warning() {
        let (mut app, _temp) = app();
        app.handle_event(Event::CountExceeded(1));
        assert_eq!(severities(&app), vec![Severity::Warning]);
    }

    #[test]
    fn rejection_shows_warning() {
        let (mut app, _temp) = app();
        app.handle_event(Event::Rejected {
            file_name: "big.png".to_string(),
            reason: Rejection::TooLarge { size: 10, limit: 5 },
        });
        assert_eq!(severities(&app), vec![Severity::Warning]);
    }

    #[test]
    fn upload_and_read_failures_show_errors() {
        let (mut app, _temp) = app();
        app.handle_events(vec![
            Event::UploadFailed {
                label: "a.png".to_string(),
                error: UploadError::Status(500),
            },
            Event::ReadFailed {
                path: PathBuf::from("/missing.png"),
                error: Error::Io("not found".to_string()),
            },
        ]);
        assert_eq!(severities(&app), vec![Severity::Error, Severity::Error]);
    }

    #[test]
    fn value_change_tracks_done_urls() {
        let (mut app, _temp) = app();
        app.handle_event(Event::ValueChanged(vec![UploadItem::done(
            "file:///uploads/a.png",
        )]));
        assert_eq!(app.value, vec!["file:///uploads/a.png".to_string()]);
        assert!(!app.notifications.has_notifications());
    }
}
