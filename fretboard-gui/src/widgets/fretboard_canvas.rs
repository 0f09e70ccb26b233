//! # Fretboard Canvas Widget
//!
//! Draws the board and turns pointer input into trainer messages.
//!
//! ## Features
//! - Replays the core renderer's draw commands onto an iced frame
//! - Click-to-toggle and hover tracking while a quiz is running
//! - Hit-testing against the same geometry that was drawn

use fretboard_core::geometry::{self as board, BoardGeometry, BoardLayout, CANVAS_HEIGHT};
use fretboard_core::palette;
use fretboard_core::render::{DrawCommand, HorizontalAlign, VerticalAlign};
use fretboard_core::{Cell, TrainerState, cell_at, render};
use iced::alignment;
use iced::widget::canvas::{
    self, Event, Fill, Geometry, LineCap, Path, Stroke, Text, event, gradient,
};
use iced::{Element, Length, Point, Rectangle, Renderer, Size, Theme, mouse};

use crate::Message;

/// Canvas program over a borrowed trainer state.
#[derive(Debug, Clone, Copy)]
pub struct FretboardCanvas<'a> {
    state: &'a TrainerState,
}

impl<'a> FretboardCanvas<'a> {
    pub fn new(state: &'a TrainerState) -> Self {
        Self { state }
    }

    /// Full-width canvas of fixed height.
    pub fn view(self) -> Element<'a, Message> {
        canvas::Canvas::new(self)
            .width(Length::Fill)
            .height(Length::Fixed(CANVAS_HEIGHT))
            .into()
    }

    fn geometry(&self, bounds: Rectangle) -> BoardGeometry {
        BoardGeometry::new(BoardLayout::for_width(bounds.width), &self.state.range())
    }

    /// The cell under `position`, given in canvas-local coordinates.
    fn cell_under(&self, bounds: Rectangle, position: Point) -> Option<Cell> {
        let geometry = self.geometry(bounds);
        cell_at(to_board(position), geometry.origin(), &geometry)
    }

    fn hover_message(&self, cell: Option<Cell>) -> (event::Status, Option<Message>) {
        if cell == self.state.hovered() {
            (event::Status::Ignored, None)
        } else {
            (event::Status::Ignored, Some(Message::CellHovered(cell)))
        }
    }
}

impl canvas::Program<Message> for FretboardCanvas<'_> {
    type State = ();

    fn update(
        &self,
        _state: &mut Self::State,
        event: Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> (event::Status, Option<Message>) {
        // Pointer input only matters while a quiz is running.
        if !self.state.is_quiz() {
            return (event::Status::Ignored, None);
        }

        let Event::Mouse(mouse_event) = event else {
            return (event::Status::Ignored, None);
        };

        match (mouse_event, cursor.position_in(bounds)) {
            (mouse::Event::ButtonPressed(mouse::Button::Left), Some(position)) => {
                match self.cell_under(bounds, position) {
                    Some(cell) => (event::Status::Captured, Some(Message::CellClicked(cell))),
                    None => (event::Status::Ignored, None),
                }
            }
            (mouse::Event::CursorMoved { .. }, Some(position)) => {
                self.hover_message(self.cell_under(bounds, position))
            }
            (mouse::Event::CursorMoved { .. } | mouse::Event::CursorLeft, _) => {
                self.hover_message(None)
            }
            _ => (event::Status::Ignored, None),
        }
    }

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());
        let geometry = self.geometry(bounds);

        for command in render(&geometry, self.state) {
            replay(&mut frame, command);
        }

        vec![frame.into_geometry()]
    }

    fn mouse_interaction(
        &self,
        _state: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        let over_cell = cursor
            .position_in(bounds)
            .and_then(|position| self.cell_under(bounds, position))
            .is_some();
        if self.state.is_quiz() && over_cell {
            mouse::Interaction::Pointer
        } else {
            mouse::Interaction::default()
        }
    }
}

/// Paints one draw command.
fn replay(frame: &mut canvas::Frame, command: DrawCommand) {
    match command {
        DrawCommand::FillRect { rect, color } => {
            frame.fill_rectangle(top_left(rect), rect_size(rect), Fill::from(to_iced(color)));
        }
        DrawCommand::GradientRect { rect, top, bottom } => {
            let gradient = gradient::Linear::new(
                Point::new(rect.x, rect.y),
                Point::new(rect.x, rect.y + rect.height),
            )
            .add_stop(0.0, to_iced(top))
            .add_stop(1.0, to_iced(bottom));
            frame.fill_rectangle(top_left(rect), rect_size(rect), Fill::from(gradient));
        }
        DrawCommand::StrokeRect { rect, color, width } => {
            frame.stroke(
                &Path::rectangle(top_left(rect), rect_size(rect)),
                Stroke::default().with_width(width).with_color(to_iced(color)),
            );
        }
        DrawCommand::Line { from, to, color, width, round_cap } => {
            let cap = if round_cap { LineCap::Round } else { LineCap::Butt };
            frame.stroke(
                &Path::line(to_point(from), to_point(to)),
                Stroke::default()
                    .with_width(width)
                    .with_color(to_iced(color))
                    .with_line_cap(cap),
            );
        }
        DrawCommand::Circle { center, radius, fill, stroke } => {
            let circle = Path::circle(to_point(center), radius);
            frame.fill(&circle, Fill::from(to_iced(fill)));
            if let Some((color, width)) = stroke {
                let outline = Stroke::default().with_width(width).with_color(to_iced(color));
                frame.stroke(&circle, outline);
            }
        }
        DrawCommand::Text { content, position, size, color, horizontal, vertical } => {
            frame.fill_text(Text {
                content,
                position: to_point(position),
                color: to_iced(color),
                size: size.into(),
                horizontal_alignment: match horizontal {
                    HorizontalAlign::Left => alignment::Horizontal::Left,
                    HorizontalAlign::Center => alignment::Horizontal::Center,
                    HorizontalAlign::Right => alignment::Horizontal::Right,
                },
                vertical_alignment: match vertical {
                    VerticalAlign::Top => alignment::Vertical::Top,
                    VerticalAlign::Center => alignment::Vertical::Center,
                    VerticalAlign::Bottom => alignment::Vertical::Bottom,
                },
                ..Text::default()
            });
        }
    }
}

pub fn to_iced(color: palette::Color) -> iced::Color {
    iced::Color::from_rgba(color.r, color.g, color.b, color.a)
}

fn to_point(point: board::Point) -> Point {
    Point::new(point.x, point.y)
}

fn to_board(point: Point) -> board::Point {
    board::Point::new(point.x, point.y)
}

fn top_left(rect: board::Rect) -> Point {
    Point::new(rect.x, rect.y)
}

fn rect_size(rect: board::Rect) -> Size {
    Size::new(rect.width, rect.height)
}
