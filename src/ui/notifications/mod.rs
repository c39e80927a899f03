// SPDX-License-Identifier: MPL-2.0
//! Toast notifications for uploader feedback.
//!
//! Rejected files, count overflows, failed uploads and configuration
//! problems are reported as toasts in the bottom-right corner. At most
//! three are visible; the rest wait in a queue.
//!
//! # Usage
//!
//! ```ignore
//! let mut manager = Manager::new();
//! manager.push(Notification::count_exceeded(2));
//!
//! // In the view
//! let overlay = Toast::view_overlay(&manager, &i18n).map(Message::Notification);
//! ```

mod manager;
mod notification;
mod toast;

pub use manager::{Manager, Message as NotificationMessage};
pub use notification::{Notification, NotificationId, Severity};
pub use toast::Toast;
