// SPDX-License-Identifier: MPL-2.0
//! Notification data.

use crate::application::port::{Rejection, UploadError};
use crate::ui::design_tokens::palette;
use iced::Color;
use std::time::{Duration, Instant};

/// Unique identifier for a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotificationId(u64);

impl NotificationId {
    pub fn new() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for NotificationId {
    fn default() -> Self {
        Self::new()
    }
}

/// Severity level determines display duration and accent color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    /// Informational message (3s).
    #[default]
    Info,
    /// A file or setting was skipped (5s).
    Warning,
    /// An upload failed (manual dismiss).
    Error,
}

impl Severity {
    #[must_use]
    pub fn color(self) -> Color {
        match self {
            Severity::Info => palette::INFO_500,
            Severity::Warning => palette::WARNING_500,
            Severity::Error => palette::ERROR_500,
        }
    }

    /// Text glyph shown before the message.
    #[must_use]
    pub fn glyph(self) -> &'static str {
        match self {
            Severity::Info => "i",
            Severity::Warning | Severity::Error => "!",
        }
    }

    /// Returns `None` for errors (manual dismiss required).
    #[must_use]
    pub fn auto_dismiss_duration(self) -> Option<Duration> {
        match self {
            Severity::Info => Some(Duration::from_secs(3)),
            Severity::Warning => Some(Duration::from_secs(5)),
            Severity::Error => None,
        }
    }
}

/// Translated sub-message interpolated as the `reason` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reason {
    pub key: String,
    pub args: Vec<(String, String)>,
}

/// A notification to be displayed to the user.
///
/// Messages are stored as i18n keys and resolved when rendered, so a
/// language switch also applies to toasts already on screen.
#[derive(Debug, Clone)]
pub struct Notification {
    id: NotificationId,
    severity: Severity,
    message_key: String,
    message_args: Vec<(String, String)>,
    reason: Option<Reason>,
    created_at: Instant,
}

impl Notification {
    pub fn new(severity: Severity, message_key: impl Into<String>) -> Self {
        Self {
            id: NotificationId::new(),
            severity,
            message_key: message_key.into(),
            message_args: Vec::new(),
            reason: None,
            created_at: Instant::now(),
        }
    }

    pub fn info(message_key: impl Into<String>) -> Self {
        Self::new(Severity::Info, message_key)
    }

    pub fn warning(message_key: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message_key)
    }

    pub fn error(message_key: impl Into<String>) -> Self {
        Self::new(Severity::Error, message_key)
    }

    /// A file kept out of the queue by validation.
    #[must_use]
    pub fn rejected(file_name: &str, rejection: &Rejection) -> Self {
        let notification =
            Self::warning(rejection.i18n_key()).with_arg("file", file_name);
        match rejection {
            Rejection::TooLarge { size, limit } => notification
                .with_arg("size", size.to_string())
                .with_arg("limit", limit.to_string()),
            Rejection::UnsupportedType(mime) => notification.with_arg("mime", mime),
            Rejection::Custom(reason) => notification.with_arg("reason", reason),
        }
    }

    /// Files dropped because the count limit was reached.
    #[must_use]
    pub fn count_exceeded(dropped: usize) -> Self {
        Self::warning("notification-count-exceeded").with_arg("count", dropped.to_string())
    }

    /// An upload that ended in failure.
    #[must_use]
    pub fn upload_failed(label: &str, error: &UploadError) -> Self {
        let mut reason = Reason {
            key: error.i18n_key().to_string(),
            args: Vec::new(),
        };
        if let UploadError::Status(status) = error {
            reason.args.push(("status".to_string(), status.to_string()));
        }
        let mut notification =
            Self::error("notification-upload-failed").with_arg("file", label);
        notification.reason = Some(reason);
        notification
    }

    #[must_use]
    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.message_args.push((key.into(), value.into()));
        self
    }

    #[must_use]
    pub fn id(&self) -> NotificationId {
        self.id
    }

    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    #[must_use]
    pub fn message_key(&self) -> &str {
        &self.message_key
    }

    #[must_use]
    pub fn message_args(&self) -> &[(String, String)] {
        &self.message_args
    }

    #[must_use]
    pub fn reason(&self) -> Option<&Reason> {
        self.reason.as_ref()
    }

    #[must_use]
    pub fn should_auto_dismiss(&self) -> bool {
        self.severity
            .auto_dismiss_duration()
            .is_some_and(|duration| self.created_at.elapsed() >= duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arg<'a>(notification: &'a Notification, key: &str) -> Option<&'a str> {
        notification
            .message_args()
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn notification_ids_are_unique() {
        assert_ne!(Notification::info("a").id(), Notification::info("a").id());
    }

    #[test]
    fn error_severity_has_no_auto_dismiss() {
        assert!(Severity::Error.auto_dismiss_duration().is_none());
        assert!(!Notification::error("x").should_auto_dismiss());
    }

    #[test]
    fn warning_lasts_longer_than_info() {
        assert!(Severity::Warning.auto_dismiss_duration() > Severity::Info.auto_dismiss_duration());
    }

    #[test]
    fn rejected_too_large_carries_sizes() {
        let notification =
            Notification::rejected("big.png", &Rejection::TooLarge { size: 20, limit: 10 });
        assert_eq!(notification.severity(), Severity::Warning);
        assert_eq!(notification.message_key(), "notification-rejected-too-large");
        assert_eq!(arg(&notification, "file"), Some("big.png"));
        assert_eq!(arg(&notification, "size"), Some("20"));
        assert_eq!(arg(&notification, "limit"), Some("10"));
    }

    #[test]
    fn count_exceeded_carries_count() {
        let notification = Notification::count_exceeded(2);
        assert_eq!(notification.message_key(), "notification-count-exceeded");
        assert_eq!(arg(&notification, "count"), Some("2"));
    }

    #[test]
    fn upload_failed_nests_the_error_message() {
        let notification = Notification::upload_failed("a.png", &UploadError::Status(503));
        assert_eq!(notification.severity(), Severity::Error);
        let reason = notification.reason().expect("reason should be set");
        assert_eq!(reason.key, "error-upload-status");
        assert_eq!(reason.args, vec![("status".to_string(), "503".to_string())]);
    }
}
