// SPDX-License-Identifier: MPL-2.0
//! Rotating arc drawn on a canvas, shown in uploading cells.

use crate::app::config::SPINNER_STEP_RAD;
use iced::widget::canvas::{self, path::Arc, Cache, Canvas, Frame, Geometry, Path, Stroke};
use iced::{mouse, Color, Element, Length, Radians, Rectangle, Renderer, Theme};
use std::f32::consts::{PI, TAU};

const STROKE_WIDTH: f32 = 3.0;

/// Spinner angle, advanced by the widget's tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rotation(f32);

impl Rotation {
    /// Advances one frame, wrapping at a full turn.
    pub fn advance(&mut self) {
        self.0 = (self.0 + SPINNER_STEP_RAD) % TAU;
    }

    #[must_use]
    pub fn radians(self) -> f32 {
        self.0
    }
}

pub struct Spinner {
    cache: Cache,
    rotation: Rotation,
    color: Color,
    size: f32,
}

impl Spinner {
    #[must_use]
    pub fn new(color: Color, rotation: Rotation, size: f32) -> Self {
        Self {
            cache: Cache::default(),
            rotation,
            color,
            size,
        }
    }

    pub fn into_element<Message: 'static>(self) -> Element<'static, Message> {
        let size = self.size;
        Canvas::new(self)
            .width(Length::Fixed(size))
            .height(Length::Fixed(size))
            .into()
    }
}

impl<Message> canvas::Program<Message> for Spinner {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let geometry = self
            .cache
            .draw(renderer, bounds.size(), |frame: &mut Frame| {
                let center = frame.center();
                let radius = frame.width().min(frame.height()) / 2.0 - STROKE_WIDTH;

                frame.stroke(
                    &Path::circle(center, radius),
                    Stroke::default()
                        .with_width(STROKE_WIDTH)
                        .with_color(Color { a: 0.25, ..self.color }),
                );

                // Half-turn arc starting at the top.
                let start = self.rotation.radians() - PI / 2.0;
                let arc = Path::new(|builder| {
                    builder.arc(Arc {
                        center,
                        radius,
                        start_angle: Radians(start),
                        end_angle: Radians(start + PI),
                    });
                });
                frame.stroke(
                    &arc,
                    Stroke::default()
                        .with_width(STROKE_WIDTH)
                        .with_color(self.color)
                        .with_line_cap(canvas::LineCap::Round),
                );
            });

        vec![geometry]
    }
}
