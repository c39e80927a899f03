// SPDX-License-Identifier: MPL-2.0
//! Toast rendering.

use super::manager::{Manager, Message};
use super::notification::Notification;
use crate::app::i18n::I18n;
use crate::ui::design_tokens::{border, opacity, palette, radius, shadow, spacing, typography};
use iced::widget::{button, container, text, Column, Container, Row};
use iced::{alignment, Background, Border, Color, Element, Length, Theme};

pub struct Toast;

impl Toast {
    /// Resolves the notification text, nested reason included.
    #[must_use]
    pub fn message(notification: &Notification, i18n: &I18n) -> String {
        let reason = notification.reason().map(|reason| {
            let args: Vec<(&str, &str)> = reason
                .args
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str()))
                .collect();
            i18n.tr_with_args(&reason.key, &args)
        });

        let mut args: Vec<(&str, &str)> = notification
            .message_args()
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        if let Some(reason) = reason.as_deref() {
            args.push(("reason", reason));
        }

        if args.is_empty() {
            i18n.tr(notification.message_key())
        } else {
            i18n.tr_with_args(notification.message_key(), &args)
        }
    }

    pub fn view<'a>(notification: &'a Notification, i18n: &'a I18n) -> Element<'a, Message> {
        let severity = notification.severity();
        let accent = severity.color();

        let glyph = container(text(severity.glyph()).size(typography::BODY).color(palette::WHITE))
            .center(typography::BODY + spacing::XS)
            .style(move |_theme: &Theme| container::Style {
                background: Some(Background::Color(accent)),
                border: Border {
                    radius: radius::FULL.into(),
                    ..Border::default()
                },
                ..Default::default()
            });

        let dismiss = button(text("×").size(typography::BODY))
            .on_press(Message::Dismiss(notification.id()))
            .padding([0.0, spacing::XXS])
            .style(dismiss_button_style);

        let content = Row::new()
            .spacing(spacing::SM)
            .align_y(alignment::Vertical::Center)
            .push(glyph)
            .push(
                Container::new(text(Self::message(notification, i18n)).size(typography::BODY))
                    .width(Length::Fill),
            )
            .push(dismiss);

        Container::new(content)
            .width(Length::Fixed(crate::ui::design_tokens::sizing::TOAST_WIDTH))
            .padding(spacing::SM)
            .style(move |theme: &Theme| toast_container_style(theme, accent))
            .into()
    }

    /// All visible toasts stacked in the bottom-right corner.
    pub fn view_overlay<'a>(manager: &'a Manager, i18n: &'a I18n) -> Element<'a, Message> {
        let toasts = Column::with_children(
            manager
                .visible()
                .map(|notification| Self::view(notification, i18n)),
        )
        .spacing(spacing::XS)
        .align_x(alignment::Horizontal::Right);

        Container::new(toasts)
            .width(Length::Fill)
            .height(Length::Fill)
            .align_x(alignment::Horizontal::Right)
            .align_y(alignment::Vertical::Bottom)
            .padding(spacing::MD)
            .into()
    }
}

fn toast_container_style(theme: &Theme, accent: Color) -> container::Style {
    container::Style {
        background: Some(Background::Color(theme.extended_palette().background.base.color)),
        border: Border {
            color: accent,
            width: border::WIDTH_MD,
            radius: radius::MD.into(),
        },
        shadow: shadow::MD,
        text_color: Some(theme.palette().text),
        ..Default::default()
    }
}

fn dismiss_button_style(theme: &Theme, status: button::Status) -> button::Style {
    let text_color = theme.extended_palette().background.base.text;
    let hover = |alpha: f32| button::Style {
        background: Some(Background::Color(Color {
            a: alpha,
            ..palette::GRAY_400
        })),
        text_color,
        border: Border {
            radius: radius::SM.into(),
            ..Default::default()
        },
        shadow: shadow::NONE,
        snap: true,
    };

    match status {
        button::Status::Hovered => hover(opacity::OVERLAY_SUBTLE),
        button::Status::Pressed => hover(opacity::OVERLAY_MEDIUM),
        button::Status::Active | button::Status::Disabled => button::Style {
            background: None,
            text_color,
            border: Border::default(),
            shadow: shadow::NONE,
            snap: true,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::config::Config;
    use crate::application::port::UploadError;

    fn english() -> I18n {
        I18n::new(Some("en-US".to_string()), &Config::default())
    }

    #[test]
    fn toast_container_style_uses_accent_color() {
        let style = toast_container_style(&Theme::Dark, palette::ERROR_500);
        assert_eq!(style.border.color, palette::ERROR_500);
        assert!(style.background.is_some());
    }

    #[test]
    fn message_interpolates_nested_reason() {
        let notification = Notification::upload_failed("cat.png", &UploadError::Status(500));
        let message = Toast::message(&notification, &english());
        assert!(message.contains("cat.png"), "got {message}");
        assert!(message.contains("500"), "got {message}");
        assert!(!message.contains("MISSING"), "got {message}");
    }

    #[test]
    fn message_without_args_is_plain_translation() {
        let notification = Notification::warning("notification-config-load-error");
        assert!(!Toast::message(&notification, &english()).contains("MISSING"));
    }
}
