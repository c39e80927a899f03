// SPDX-License-Identifier: MPL-2.0
//! Full-screen preview of done items.
//!
//! The preview walks the done items only. Navigation stops at both ends.

use super::styles;
use crate::app::i18n::I18n;
use crate::ui::design_tokens::{sizing, spacing, typography};
use iced::widget::{
    button, container, image, mouse_area, opaque, text, Column, Container, Row, Space,
};
use iced::{alignment, ContentFit, Element, Length};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    Previous,
    Next,
    Close,
}

/// Position of the preview among the done items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct State {
    index: usize,
}

impl State {
    /// Opens the preview at `index`, clamped to `total`.
    #[must_use]
    pub fn new(index: usize, total: usize) -> Self {
        Self {
            index: index.min(total.saturating_sub(1)),
        }
    }

    pub fn index(self) -> usize {
        self.index
    }

    pub fn has_previous(self) -> bool {
        self.index > 0
    }

    pub fn has_next(self, total: usize) -> bool {
        self.index + 1 < total
    }

    /// Applies a navigation message. Returns `false` when the preview closes.
    pub fn update(&mut self, message: Message, total: usize) -> bool {
        match message {
            Message::Previous => {
                self.index = self.index.saturating_sub(1);
                true
            }
            Message::Next => {
                if self.has_next(total) {
                    self.index += 1;
                }
                true
            }
            Message::Close => false,
        }
    }

    /// Keeps the index valid after the done items changed.
    ///
    /// Returns `false` when nothing is left to show.
    pub fn clamp(&mut self, total: usize) -> bool {
        if total == 0 {
            return false;
        }
        self.index = self.index.min(total - 1);
        true
    }
}

/// Data needed to draw the preview.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub state: State,
    pub total: usize,
    /// Decoded image, `None` while it is still loading.
    pub handle: Option<&'a image::Handle>,
}

fn nav_button<'a>(label: &'a str, message: Option<Message>) -> Element<'a, Message> {
    button(
        text(label)
            .size(typography::BODY_LG)
            .width(Length::Fill)
            .height(Length::Fill)
            .center(),
    )
    .width(Length::Fixed(sizing::PREVIEW_NAV))
    .height(Length::Fixed(sizing::PREVIEW_NAV))
    .style(styles::preview_control)
    .on_press_maybe(message)
    .into()
}

pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let ViewContext {
        i18n,
        state,
        total,
        handle,
    } = ctx;

    let picture: Element<'_, Message> = match handle {
        Some(handle) => image(handle.clone())
            .content_fit(ContentFit::Contain)
            .width(Length::Fill)
            .height(Length::Fill)
            .into(),
        None => text(i18n.tr("uploader-uploading"))
            .size(typography::BODY)
            .into(),
    };

    // Clicking the picture itself closes the preview.
    let picture = mouse_area(
        Container::new(picture)
            .width(Length::Fill)
            .height(Length::Fill)
            .center(Length::Fill),
    )
    .on_press(Message::Close);

    let index = (state.index() + 1).to_string();
    let count = total.to_string();
    let position = text(i18n.tr_with_args(
        "preview-position",
        &[("index", index.as_str()), ("total", count.as_str())],
    ))
    .size(typography::BODY);

    let close = button(text(i18n.tr("preview-close")).size(typography::BODY))
        .padding([spacing::XS, spacing::MD])
        .style(styles::preview_control)
        .on_press(Message::Close);

    let header = Row::new()
        .spacing(spacing::MD)
        .align_y(alignment::Vertical::Center)
        .push(position)
        .push(Space::new().width(Length::Fill))
        .push(close);

    let body = Row::new()
        .spacing(spacing::MD)
        .align_y(alignment::Vertical::Center)
        .push(nav_button(
            "◀",
            state.has_previous().then_some(Message::Previous),
        ))
        .push(picture)
        .push(nav_button("▶", state.has_next(total).then_some(Message::Next)));

    let content = Column::new()
        .spacing(spacing::MD)
        .push(header)
        .push(body.height(Length::Fill));

    opaque(
        container(content)
            .padding(spacing::LG)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(styles::preview_backdrop),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_clamps_to_last_item() {
        assert_eq!(State::new(5, 3).index(), 2);
        assert_eq!(State::new(0, 0).index(), 0);
    }

    #[test]
    fn navigation_stops_at_both_ends() {
        let mut state = State::new(0, 2);
        assert!(!state.has_previous());
        assert!(state.update(Message::Previous, 2));
        assert_eq!(state.index(), 0);

        assert!(state.update(Message::Next, 2));
        assert_eq!(state.index(), 1);
        assert!(!state.has_next(2));
        assert!(state.update(Message::Next, 2));
        assert_eq!(state.index(), 1);
    }

    #[test]
    fn close_ends_the_preview() {
        let mut state = State::new(1, 3);
        assert!(!state.update(Message::Close, 3));
    }

    #[test]
    fn clamp_follows_removed_items() {
        let mut state = State::new(2, 3);
        assert!(state.clamp(2));
        assert_eq!(state.index(), 1);
        assert!(!state.clamp(0));
    }
}
