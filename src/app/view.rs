// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.

use super::Message;
use crate::app::i18n::I18n;
use crate::domain::upload::UploadItem;
use crate::ui::design_tokens::{palette, spacing, typography};
use crate::ui::image_uploader::{self, styles, ViewEnv};
use crate::ui::notifications::{Manager, Toast};
use iced::widget::{tooltip, Column, Container, Row, Space, Stack, Text};
use iced::{alignment, Element, Length};

/// Context required to render the application view.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub uploader: &'a image_uploader::State,
    pub notifications: &'a Manager,
    pub destination: &'a str,
    /// Number of done items.
    pub done: usize,
}

/// Renders the header, the uploader and the toast overlay.
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let ViewContext {
        i18n,
        uploader,
        notifications,
        destination,
        done,
    } = ctx;

    let done_count = done.to_string();
    let count = match uploader.options().max_count {
        Some(max) => {
            let max = max.to_string();
            i18n.tr_with_args(
                "uploader-count-limited",
                &[("count", done_count.as_str()), ("max", max.as_str())],
            )
        }
        None => i18n.tr_with_args("uploader-count", &[("count", done_count.as_str())]),
    };

    let header = Row::new()
        .spacing(spacing::MD)
        .align_y(alignment::Vertical::Center)
        .push(Text::new(count).size(typography::BODY_LG))
        .push(Space::new().width(Length::Fill))
        .push(
            Text::new(i18n.tr_with_args("uploader-destination", &[("target", destination)]))
                .size(typography::CAPTION)
                .color(palette::GRAY_400),
        );

    let content = Column::new()
        .push(
            Container::new(header)
                .width(Length::Fill)
                .padding([spacing::SM, spacing::MD]),
        )
        .push(
            uploader
                .view(ViewEnv {
                    i18n,
                    render_item: Some(&with_label_tooltip),
                    upload_button: Some(add_cell_content(i18n)),
                })
                .map(Message::Uploader),
        )
        .width(Length::Fill)
        .height(Length::Fill);

    Stack::new()
        .width(Length::Fill)
        .height(Length::Fill)
        .push(content)
        .push(Toast::view_overlay(notifications, i18n).map(Message::Notification))
        .into()
}

/// Shows the file name or URL of an item when its cell is hovered.
fn with_label_tooltip<'a>(
    cell: Element<'a, image_uploader::Message>,
    item: &UploadItem,
) -> Element<'a, image_uploader::Message> {
    let label = Container::new(Text::new(item.label().to_string()).size(typography::CAPTION))
        .padding(spacing::XXS)
        .style(styles::label_tooltip);

    tooltip(cell, label, tooltip::Position::Bottom)
        .gap(spacing::XXS)
        .into()
}

/// Add cell hinting that files can also be dropped on the window.
fn add_cell_content<'a>(i18n: &I18n) -> Element<'a, image_uploader::Message> {
    Column::new()
        .spacing(spacing::XXS)
        .align_x(alignment::Horizontal::Center)
        .push(Text::new("+").size(typography::GLYPH))
        .push(Text::new(i18n.tr("uploader-add-hint")).size(typography::CAPTION))
        .into()
}
