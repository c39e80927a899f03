// SPDX-License-Identifier: MPL-2.0
//! Delete confirmation dialog.

use super::styles;
use crate::app::i18n::I18n;
use crate::ui::design_tokens::{sizing, spacing, typography};
use iced::widget::{button, container, opaque, text, Column, Container, Row};
use iced::{alignment, Element, Length};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    Confirm,
    Cancel,
}

/// Modal card asking whether the item should be deleted.
///
/// The backdrop swallows every press so the grid below stays inert.
pub fn view(i18n: &I18n) -> Element<'_, Message> {
    let content = text(i18n.tr("dialog-delete-content"))
        .size(typography::BODY_LG)
        .width(Length::Fill)
        .center();

    let cancel = button(text(i18n.tr("dialog-cancel")).size(typography::BODY).center())
        .width(Length::Fill)
        .height(Length::Fixed(sizing::BUTTON_HEIGHT))
        .style(styles::dialog_cancel)
        .on_press(Message::Cancel);

    let confirm = button(text(i18n.tr("dialog-confirm")).size(typography::BODY).center())
        .width(Length::Fill)
        .height(Length::Fixed(sizing::BUTTON_HEIGHT))
        .style(styles::dialog_confirm)
        .on_press(Message::Confirm);

    let actions = Row::new()
        .spacing(spacing::SM)
        .align_y(alignment::Vertical::Center)
        .push(cancel)
        .push(confirm);

    let card = Container::new(
        Column::new()
            .spacing(spacing::LG)
            .push(content)
            .push(actions),
    )
    .width(Length::Fixed(sizing::DIALOG_WIDTH))
    .padding(spacing::LG)
    .style(styles::dialog_card);

    opaque(
        container(card)
            .width(Length::Fill)
            .height(Length::Fill)
            .center(Length::Fill)
            .style(styles::dialog_backdrop),
    )
}
