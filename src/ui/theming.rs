// SPDX-License-Identifier: MPL-2.0
//! Theme mode selection and the color scheme derived from it.

use crate::ui::design_tokens::{opacity, palette};
use iced::{Color, Theme};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
    #[default]
    System,
}

impl ThemeMode {
    /// Returns true if the effective theme is dark.
    /// For System mode, detects the actual system theme.
    #[must_use]
    pub fn is_dark(self) -> bool {
        match self {
            ThemeMode::Light => false,
            ThemeMode::Dark => true,
            // Default to dark on detection error
            ThemeMode::System => !matches!(dark_light::detect(), Ok(dark_light::Mode::Light)),
        }
    }

    /// The Iced theme for this mode.
    #[must_use]
    pub fn to_iced_theme(self) -> Theme {
        if self.is_dark() {
            Theme::Dark
        } else {
            Theme::Light
        }
    }
}

/// Colors used by the uploader widgets.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScheme {
    /// Background of the upload cell and placeholders.
    pub cell_background: Color,
    /// Border of idle cells.
    pub cell_border: Color,
    /// Border of the upload cell while hovered.
    pub cell_border_hover: Color,
    /// Text inside cells.
    pub cell_text: Color,

    pub error: Color,

    /// Mask drawn over uploading and failed cells.
    pub mask: Color,
    /// Text drawn on the mask.
    pub mask_text: Color,
}

impl ColorScheme {
    #[must_use]
    pub fn light() -> Self {
        Self {
            cell_background: palette::GRAY_50,
            cell_border: palette::GRAY_100,
            cell_border_hover: palette::PRIMARY_500,
            cell_text: palette::GRAY_700,
            error: palette::ERROR_500,
            mask: Color {
                a: opacity::OVERLAY_MEDIUM,
                ..palette::BLACK
            },
            mask_text: palette::WHITE,
        }
    }

    #[must_use]
    pub fn dark() -> Self {
        Self {
            cell_background: Color::from_rgb(0.15, 0.15, 0.15),
            cell_border: palette::GRAY_700,
            cell_border_hover: palette::PRIMARY_400,
            cell_text: palette::GRAY_200,
            error: palette::ERROR_500,
            mask: Color {
                a: opacity::OVERLAY_STRONG,
                ..palette::BLACK
            },
            mask_text: palette::WHITE,
        }
    }

    /// Picks the scheme matching an Iced theme.
    #[must_use]
    pub fn for_theme(theme: &Theme) -> Self {
        if theme.extended_palette().is_dark {
            Self::dark()
        } else {
            Self::light()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_modes_map_to_iced_themes() {
        assert_eq!(ThemeMode::Light.to_iced_theme(), Theme::Light);
        assert_eq!(ThemeMode::Dark.to_iced_theme(), Theme::Dark);
        // System mode depends on the desktop; it must not panic.
        let _ = ThemeMode::System.to_iced_theme();
    }

    #[test]
    fn scheme_follows_theme_brightness() {
        assert_eq!(ColorScheme::for_theme(&Theme::Dark), ColorScheme::dark());
        assert_eq!(ColorScheme::for_theme(&Theme::Light), ColorScheme::light());
    }

    #[test]
    fn light_cells_are_lighter_than_dark_cells() {
        assert!(ColorScheme::light().cell_background.r > ColorScheme::dark().cell_background.r);
    }
}
