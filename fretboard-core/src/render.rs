//! # Renderer Module
//!
//! Turns a `BoardGeometry` and a `TrainerState` into a flat list of draw
//! commands. Any 2D backend can replay the list; the GUI crate replays it
//! onto an `iced` canvas frame.
//!
//! Drawing order:
//! 1. Background and board gradient
//! 2. Nut block
//! 3. Strings, thin to thick
//! 4. Fret lines, last fret styled apart
//! 5. String numbers and fret numbers
//! 6. Inlays
//! 7. Explore markers, or quiz hover + click markers

use crate::fretboard::{cells, Cell};
use crate::geometry::{BoardGeometry, Point, Rect, NOTE_RADIUS};
use crate::notation::display_name;
use crate::palette::{contrast_text, Color};
use crate::state::{Mode, TrainerState};

/// Frets that get a single inlay dot.
pub const INLAY_FRETS: [u8; 8] = [3, 5, 7, 9, 15, 17, 19, 21];
/// Fret with the double (octave) inlay.
pub const DOUBLE_INLAY_FRET: u8 = 12;

const INLAY_RADIUS: f32 = 4.0;
const DOUBLE_INLAY_OFFSET: f32 = 6.0;
const LABEL_SIZE: f32 = 12.0;
const MARKER_LABEL_SIZE: f32 = 11.0;

const BACKGROUND: Color = Color::from_rgb8(0xFF, 0xFF, 0xFF);
const BOARD_TOP: Color = Color::from_rgb8(0xF8, 0xFA, 0xFC);
const BOARD_BOTTOM: Color = Color::from_rgb8(0xEE, 0xF2, 0xF7);
const BOARD_BORDER: Color = Color::from_rgb8(0xE2, 0xE8, 0xF0);
const NUT: Color = Color::from_rgb8(0x0F, 0x17, 0x2A);
const STRING: Color = Color::from_rgb8(0x94, 0xA3, 0xB8);
const FRET: Color = Color::from_rgb8(0x9A, 0xA7, 0xB8);
const LAST_FRET: Color = Color::from_rgb8(0x94, 0xA3, 0xB8);
const STRING_LABEL: Color = Color::from_rgb8(0x0F, 0x17, 0x2A);
const FRET_LABEL: Color = Color::from_rgb8(0x64, 0x74, 0x8B);
const INLAY: Color = Color::from_rgb8(0xCB, 0xD5, 0xE1);
const HOVER: Color = Color::from_rgb8(0x3B, 0x82, 0xF6).with_alpha(0.18);
const MARKER_OUTLINE: Color = Color::from_rgb8(0xFF, 0xFF, 0xFF);

/// Marker color for a correct quiz click.
pub const CORRECT: Color = Color::from_rgb8(0x10, 0xB9, 0x81);
/// Marker color for a wrong quiz click.
pub const WRONG: Color = Color::from_rgb8(0xEF, 0x44, 0x44);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalAlign {
    Top,
    Center,
    Bottom,
}

/// A single drawing primitive in canvas coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRect {
        rect: Rect,
        color: Color,
    },
    /// Vertical gradient from `top` to `bottom`.
    GradientRect {
        rect: Rect,
        top: Color,
        bottom: Color,
    },
    StrokeRect {
        rect: Rect,
        color: Color,
        width: f32,
    },
    Line {
        from: Point,
        to: Point,
        color: Color,
        width: f32,
        round_cap: bool,
    },
    Circle {
        center: Point,
        radius: f32,
        fill: Color,
        stroke: Option<(Color, f32)>,
    },
    Text {
        content: String,
        position: Point,
        size: f32,
        color: Color,
        horizontal: HorizontalAlign,
        vertical: VerticalAlign,
    },
}

/// Draws the whole board for `state`.
pub fn render(geometry: &BoardGeometry, state: &TrainerState) -> Vec<DrawCommand> {
    let mut commands = Vec::new();
    draw_background(&mut commands, geometry);
    draw_nut(&mut commands, geometry);
    draw_strings(&mut commands, geometry);
    draw_frets(&mut commands, geometry);
    draw_string_labels(&mut commands, geometry);
    draw_fret_numbers(&mut commands, geometry);
    draw_inlays(&mut commands, geometry);
    match state.mode() {
        Mode::Explore => draw_selected_notes(&mut commands, geometry, state),
        Mode::Quiz => {
            draw_hover(&mut commands, geometry, state);
            draw_clicked(&mut commands, geometry, state);
        }
    }
    commands
}

fn draw_background(commands: &mut Vec<DrawCommand>, geometry: &BoardGeometry) {
    let layout = geometry.layout();
    commands.push(DrawCommand::FillRect {
        rect: Rect::new(0.0, 0.0, layout.width, layout.height),
        color: BACKGROUND,
    });
    let board = layout.board_rect();
    commands.push(DrawCommand::GradientRect {
        rect: board,
        top: BOARD_TOP,
        bottom: BOARD_BOTTOM,
    });
    commands.push(DrawCommand::StrokeRect {
        rect: board,
        color: BOARD_BORDER,
        width: 2.0,
    });
}

fn draw_nut(commands: &mut Vec<DrawCommand>, geometry: &BoardGeometry) {
    if !geometry.has_nut() {
        return;
    }
    let board = geometry.layout().board_rect();
    commands.push(DrawCommand::FillRect {
        rect: Rect::new(board.x, board.y, geometry.nut_width(), board.height),
        color: NUT.with_alpha(0.08),
    });
    // Heavy bar on the nut's fret-side edge.
    let x = board.x + geometry.nut_width();
    commands.push(DrawCommand::Line {
        from: Point::new(x, board.y),
        to: Point::new(x, board.y + board.height),
        color: NUT,
        width: 4.0,
        round_cap: false,
    });
}

fn draw_strings(commands: &mut Vec<DrawCommand>, geometry: &BoardGeometry) {
    let board = geometry.layout().board_rect();
    for (i, &y) in geometry.string_y().iter().enumerate() {
        let y = board.y + y;
        commands.push(DrawCommand::Line {
            from: Point::new(board.x, y),
            to: Point::new(board.x + board.width, y),
            color: STRING,
            width: geometry.string_thickness(i),
            round_cap: true,
        });
    }
}

fn draw_frets(commands: &mut Vec<DrawCommand>, geometry: &BoardGeometry) {
    let board = geometry.layout().board_rect();
    let last = geometry.fret_x().len().saturating_sub(1);
    for (i, &x) in geometry.fret_x().iter().enumerate() {
        // Fret 0 is the nut, drawn separately.
        if i == 0 && geometry.has_nut() {
            continue;
        }
        let color = if i == last { LAST_FRET } else { FRET };
        let x = board.x + x;
        commands.push(DrawCommand::Line {
            from: Point::new(x, board.y),
            to: Point::new(x, board.y + board.height),
            color,
            width: 1.5,
            round_cap: false,
        });
    }
}

fn draw_string_labels(commands: &mut Vec<DrawCommand>, geometry: &BoardGeometry) {
    let board = geometry.layout().board_rect();
    for (i, &y) in geometry.string_y().iter().enumerate() {
        commands.push(DrawCommand::Text {
            content: (i + 1).to_string(),
            position: Point::new(board.x - 8.0, board.y + y),
            size: LABEL_SIZE,
            color: STRING_LABEL,
            horizontal: HorizontalAlign::Right,
            vertical: VerticalAlign::Center,
        });
    }
}

/// Horizontal centre of every band after the first, with its fret number.
fn numbered_bands(geometry: &BoardGeometry) -> impl Iterator<Item = (u8, f32)> + '_ {
    geometry
        .visible_frets()
        .iter()
        .enumerate()
        .skip(1)
        .map(move |(i, &fret)| (fret, geometry.fret_label_x(i)))
}

fn draw_fret_numbers(commands: &mut Vec<DrawCommand>, geometry: &BoardGeometry) {
    let board = geometry.layout().board_rect();
    for (fret, x) in numbered_bands(geometry) {
        commands.push(DrawCommand::Text {
            content: fret.to_string(),
            position: Point::new(x, board.y + board.height + 12.0),
            size: LABEL_SIZE,
            color: FRET_LABEL,
            horizontal: HorizontalAlign::Center,
            vertical: VerticalAlign::Center,
        });
    }
}

fn draw_inlays(commands: &mut Vec<DrawCommand>, geometry: &BoardGeometry) {
    let board = geometry.layout().board_rect();
    let y = board.y + board.height / 2.0;
    let dot = |x: f32| DrawCommand::Circle {
        center: Point::new(x, y),
        radius: INLAY_RADIUS,
        fill: INLAY,
        stroke: None,
    };
    for (fret, x) in numbered_bands(geometry) {
        if INLAY_FRETS.contains(&fret) {
            commands.push(dot(x));
        } else if fret == DOUBLE_INLAY_FRET {
            commands.push(dot(x - DOUBLE_INLAY_OFFSET));
            commands.push(dot(x + DOUBLE_INLAY_OFFSET));
        }
    }
}

fn marker(commands: &mut Vec<DrawCommand>, center: Point, fill: Color, label: &str) {
    commands.push(DrawCommand::Circle {
        center,
        radius: NOTE_RADIUS,
        fill,
        stroke: Some((MARKER_OUTLINE, 1.5)),
    });
    commands.push(DrawCommand::Text {
        content: label.to_string(),
        position: center,
        size: MARKER_LABEL_SIZE,
        color: contrast_text(fill),
        horizontal: HorizontalAlign::Center,
        vertical: VerticalAlign::Center,
    });
}

fn label_for(state: &TrainerState, cell: Cell) -> &'static str {
    display_name(state.pitch_at(cell), state.notation_mode(), state.note_notations())
}

fn draw_selected_notes(
    commands: &mut Vec<DrawCommand>,
    geometry: &BoardGeometry,
    state: &TrainerState,
) {
    let range = state.range();
    for cell in cells(&range) {
        let pc = state.pitch_at(cell);
        if !state.selected_notes().contains(&pc) {
            continue;
        }
        if let Some(center) = geometry.cell_center(cell) {
            marker(commands, center, state.note_colors().get(pc), label_for(state, cell));
        }
    }
}

fn draw_hover(commands: &mut Vec<DrawCommand>, geometry: &BoardGeometry, state: &TrainerState) {
    if let Some(rect) = state.hovered().and_then(|cell| geometry.cell_rect(cell)) {
        commands.push(DrawCommand::FillRect { rect, color: HOVER });
    }
}

fn draw_clicked(commands: &mut Vec<DrawCommand>, geometry: &BoardGeometry, state: &TrainerState) {
    for &cell in state.clicked() {
        let Some(center) = geometry.cell_center(cell) else {
            continue;
        };
        let fill = if state.is_correct(cell) { CORRECT } else { WRONG };
        marker(commands, center, fill, label_for(state, cell));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::BoardLayout;
    use crate::pitch::PitchClass;
    use crate::state::{reduce, Event};

    fn geometry(state: &TrainerState) -> BoardGeometry {
        BoardGeometry::new(BoardLayout::for_width(1000.0), &state.range())
    }

    fn marker_labels(commands: &[DrawCommand]) -> Vec<(Point, String)> {
        commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Text { content, position, size, .. } if *size == MARKER_LABEL_SIZE => {
                    Some((*position, content.clone()))
                }
                _ => None,
            })
            .collect()
    }

    fn marker_fills(commands: &[DrawCommand]) -> Vec<Color> {
        commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Circle { fill, radius, .. } if *radius == NOTE_RADIUS => Some(*fill),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn starts_with_background_and_gradient() {
        let state = TrainerState::default();
        let commands = render(&geometry(&state), &state);
        assert!(matches!(commands[0], DrawCommand::FillRect { .. }));
        assert!(matches!(commands[1], DrawCommand::GradientRect { .. }));
    }

    #[test]
    fn inlays_follow_the_traditional_pattern() {
        let state = reduce(TrainerState::default(), Event::SetFretRange { start: 0, end: 22 });
        let commands = render(&geometry(&state), &state);
        let inlays = commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { radius, .. } if *radius == INLAY_RADIUS))
            .count();
        // Eight single dots plus the double at 12.
        assert_eq!(inlays, 10);
    }

    #[test]
    fn explore_marks_every_selected_pitch() {
        let state = TrainerState::default();
        let others: Vec<PitchClass> = state
            .selected_notes()
            .iter()
            .copied()
            .filter(|&pc| pc != PitchClass::A)
            .collect();
        let state = others
            .into_iter()
            .fold(state, |s, pc| reduce(s, Event::ToggleNote(pc)));
        assert_eq!(state.selected_notes().len(), 1);

        let commands = render(&geometry(&state), &state);
        let labels = marker_labels(&commands);
        let expected = cells(&state.range())
            .filter(|&c| state.pitch_at(c) == PitchClass::A)
            .count();
        assert_eq!(labels.len(), expected);
        assert!(labels.iter().all(|(_, label)| label == "A"));
    }

    #[test]
    fn explore_labels_use_flat_spelling() {
        let state = reduce(TrainerState::default(), Event::ToggleNote(PitchClass::As));
        let state = reduce(state, Event::ToggleAllNotations);
        let commands = render(&geometry(&state), &state);
        assert!(marker_labels(&commands).iter().any(|(_, label)| label == "Bb"));
        assert!(!marker_labels(&commands).iter().any(|(_, label)| label == "A#"));
    }

    #[test]
    fn quiz_colors_clicks_by_correctness() {
        let state = reduce(TrainerState::default(), Event::StartQuiz { target: PitchClass::C });
        let state = reduce(state, Event::ToggleCell(Cell::new(0, 8)));
        let state = reduce(state, Event::ToggleCell(Cell::new(0, 7)));
        let commands = render(&geometry(&state), &state);
        // Clicked set iterates in cell order: (0,7) then (0,8).
        assert_eq!(marker_fills(&commands), vec![WRONG, CORRECT]);
        let labels: Vec<String> = marker_labels(&commands).into_iter().map(|(_, l)| l).collect();
        assert_eq!(labels, vec!["B".to_string(), "C".to_string()]);
    }

    #[test]
    fn quiz_hides_explore_markers() {
        let state = reduce(TrainerState::default(), Event::StartQuiz { target: PitchClass::C });
        let commands = render(&geometry(&state), &state);
        assert!(marker_fills(&commands).is_empty());
    }

    #[test]
    fn hover_draws_the_cell_band() {
        let state = reduce(TrainerState::default(), Event::StartQuiz { target: PitchClass::C });
        let state = reduce(state, Event::Hover(Some(Cell::new(2, 4))));
        let geometry = geometry(&state);
        let commands = render(&geometry, &state);
        let rect = geometry.cell_rect(Cell::new(2, 4)).unwrap();
        assert!(commands.contains(&DrawCommand::FillRect { rect, color: HOVER }));
    }

    #[test]
    fn nut_is_drawn_only_from_fret_zero() {
        let with_nut = TrainerState::default();
        let without = reduce(TrainerState::default(), Event::SetFretRange { start: 5, end: 9 });
        let nut_lines = |state: &TrainerState| {
            render(&geometry(state), state)
                .iter()
                .filter(|c| matches!(c, DrawCommand::Line { color, .. } if *color == NUT))
                .count()
        };
        assert_eq!(nut_lines(&with_nut), 1);
        assert_eq!(nut_lines(&without), 0);
    }
}
