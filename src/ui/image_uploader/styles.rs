// SPDX-License-Identifier: MPL-2.0
//! Styles for uploader cells, the preview overlay and the delete dialog.

use crate::ui::design_tokens::{
    border, opacity,
    palette::{self, BLACK, WHITE},
    radius, shadow,
};
use crate::ui::theming::ColorScheme;
use iced::widget::{button, container};
use iced::{Background, Border, Color, Theme};

/// Frame of an item cell. Failed cells get an error-colored border.
pub fn cell(failed: bool) -> impl Fn(&Theme) -> container::Style {
    move |theme: &Theme| {
        let colors = ColorScheme::for_theme(theme);
        container::Style {
            background: Some(Background::Color(colors.cell_background)),
            text_color: Some(colors.cell_text),
            border: Border {
                color: if failed { colors.error } else { colors.cell_border },
                width: if failed { border::WIDTH_MD } else { border::WIDTH_SM },
                radius: radius::SM.into(),
            },
            ..Default::default()
        }
    }
}

/// Semi-transparent layer over uploading and failed thumbnails.
pub fn mask(theme: &Theme) -> container::Style {
    let colors = ColorScheme::for_theme(theme);
    container::Style {
        background: Some(Background::Color(colors.mask)),
        text_color: Some(colors.mask_text),
        border: Border {
            radius: radius::SM.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// The "add" cell.
pub fn add_cell(theme: &Theme, status: button::Status) -> button::Style {
    let colors = ColorScheme::for_theme(theme);
    let border_color = match status {
        button::Status::Hovered | button::Status::Pressed => colors.cell_border_hover,
        button::Status::Active | button::Status::Disabled => colors.cell_border,
    };
    button::Style {
        background: Some(Background::Color(colors.cell_background)),
        text_color: colors.cell_text,
        border: Border {
            color: border_color,
            width: border::WIDTH_SM,
            radius: radius::SM.into(),
        },
        shadow: shadow::NONE,
        snap: true,
    }
}

/// Transparent button wrapping a clickable thumbnail.
pub fn thumbnail(_theme: &Theme, status: button::Status) -> button::Style {
    let background = match status {
        button::Status::Hovered => Some(Background::Color(Color {
            a: opacity::OVERLAY_SUBTLE,
            ..WHITE
        })),
        _ => None,
    };
    button::Style {
        background,
        text_color: WHITE,
        border: Border::default(),
        shadow: shadow::NONE,
        snap: true,
    }
}

/// Round badge in the top-right corner of a cell.
pub fn delete_badge(_theme: &Theme, status: button::Status) -> button::Style {
    let alpha = match status {
        button::Status::Hovered | button::Status::Pressed => opacity::OPAQUE,
        _ => opacity::OVERLAY_STRONG,
    };
    button::Style {
        background: Some(Background::Color(Color { a: alpha, ..BLACK })),
        text_color: WHITE,
        border: Border {
            radius: radius::FULL.into(),
            ..Default::default()
        },
        shadow: shadow::NONE,
        snap: true,
    }
}

/// Full-screen backdrop behind the preview image.
pub fn preview_backdrop(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(Color {
            a: opacity::BACKDROP,
            ..BLACK
        })),
        text_color: Some(WHITE),
        ..Default::default()
    }
}

/// Preview navigation and close buttons.
pub fn preview_control(_theme: &Theme, status: button::Status) -> button::Style {
    let alpha = match status {
        button::Status::Hovered => opacity::OVERLAY_STRONG,
        button::Status::Pressed => opacity::BACKDROP,
        button::Status::Active => opacity::OVERLAY_MEDIUM,
        button::Status::Disabled => opacity::OVERLAY_SUBTLE,
    };
    button::Style {
        background: Some(Background::Color(Color { a: alpha, ..BLACK })),
        text_color: WHITE,
        border: Border {
            radius: radius::FULL.into(),
            ..Default::default()
        },
        shadow: shadow::NONE,
        snap: true,
    }
}

/// Dim layer behind the confirmation dialog.
pub fn dialog_backdrop(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(Color {
            a: opacity::OVERLAY_MEDIUM,
            ..BLACK
        })),
        ..Default::default()
    }
}

/// The dialog card.
pub fn dialog_card(theme: &Theme) -> container::Style {
    let base = theme.extended_palette().background.base;
    container::Style {
        background: Some(Background::Color(base.color)),
        text_color: Some(base.text),
        border: Border {
            radius: radius::MD.into(),
            ..Default::default()
        },
        shadow: shadow::LG,
        ..Default::default()
    }
}

/// Hover label of a cell. Dark on light themes and light on dark ones.
pub fn label_tooltip(theme: &Theme) -> container::Style {
    let base = theme.extended_palette().background.base;
    let is_dark = (base.color.r + base.color.g + base.color.b) / 3.0 < 0.5;
    let (background, text) = if is_dark {
        (palette::GRAY_50, palette::GRAY_700)
    } else {
        (palette::GRAY_700, palette::GRAY_50)
    };

    container::Style {
        background: Some(Background::Color(Color {
            a: opacity::BACKDROP,
            ..background
        })),
        text_color: Some(text),
        border: Border {
            radius: radius::SM.into(),
            ..Default::default()
        },
        shadow: shadow::MD,
        ..Default::default()
    }
}

/// Confirm button of the dialog.
pub fn dialog_confirm(_theme: &Theme, status: button::Status) -> button::Style {
    let background = match status {
        button::Status::Hovered => palette::PRIMARY_400,
        _ => palette::PRIMARY_500,
    };
    button::Style {
        background: Some(Background::Color(background)),
        text_color: WHITE,
        border: Border {
            color: palette::PRIMARY_600,
            width: border::WIDTH_SM,
            radius: radius::SM.into(),
        },
        shadow: shadow::NONE,
        snap: true,
    }
}

/// Cancel button of the dialog.
pub fn dialog_cancel(theme: &Theme, status: button::Status) -> button::Style {
    let base = theme.extended_palette().background;
    let background = match status {
        button::Status::Hovered | button::Status::Pressed => base.weak.color,
        _ => base.base.color,
    };
    button::Style {
        background: Some(Background::Color(background)),
        text_color: base.base.text,
        border: Border {
            color: palette::GRAY_400,
            width: border::WIDTH_SM,
            radius: radius::SM.into(),
        },
        shadow: shadow::NONE,
        snap: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_cell_uses_error_border() {
        let style = cell(true)(&Theme::Light);
        assert_eq!(style.border.color, palette::ERROR_500);
        assert_eq!(style.border.width, border::WIDTH_MD);

        let style = cell(false)(&Theme::Light);
        assert_ne!(style.border.color, palette::ERROR_500);
    }

    #[test]
    fn add_cell_highlights_on_hover() {
        let idle = add_cell(&Theme::Dark, button::Status::Active);
        let hovered = add_cell(&Theme::Dark, button::Status::Hovered);
        assert_ne!(idle.border.color, hovered.border.color);
    }

    #[test]
    fn label_tooltip_contrasts_with_theme() {
        let light = label_tooltip(&Theme::Light);
        let dark = label_tooltip(&Theme::Dark);
        assert_eq!(light.text_color, Some(palette::GRAY_50));
        assert_eq!(dark.text_color, Some(palette::GRAY_700));
    }
}
