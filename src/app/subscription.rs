// SPDX-License-Identifier: MPL-2.0
//! Subscription management for the application.

use super::Message;
use iced::{event, time, window, Subscription};
use std::time::Duration;

/// Creates the event subscription forwarding dropped files.
pub fn create_event_subscription() -> Subscription<Message> {
    event::listen_with(|event, _status, _window_id| {
        if let event::Event::Window(window::Event::FileDropped(path)) = event {
            return Some(Message::FileDropped(path));
        }
        None
    })
}

/// Creates a periodic tick subscription for notification auto-dismiss.
pub fn create_tick_subscription(has_notifications: bool) -> Subscription<Message> {
    if has_notifications {
        time::every(Duration::from_millis(100)).map(Message::Tick)
    } else {
        Subscription::none()
    }
}
