//! # Note Toggle
//!
//! One explore-mode control per pitch class: a toggle labeled with the
//! note's display name and a swatch that cycles its marker color.

use fretboard_core::notation::display_name;
use fretboard_core::palette::{NEUTRAL_GRAY, contrast_text};
use fretboard_core::{PitchClass, TrainerState};
use iced::widget::{button, column, text};
use iced::{Alignment, Background, Border, Color, Element, Length};

use crate::Message;
use crate::widgets::fretboard_canvas::to_iced;

const TOGGLE_WIDTH: f32 = 44.0;
const SWATCH_HEIGHT: f32 = 8.0;
const UNSELECTED: Color = Color::from_rgb(0.22, 0.24, 0.28);

/// Creates the toggle and swatch column for `pc`.
///
/// # Arguments
/// * `pc` - The pitch class this control stands for
/// * `state` - Current trainer state, for selection, color and spelling
pub fn note_toggle(pc: PitchClass, state: &TrainerState) -> Element<'static, Message> {
    let selected = state.selected_notes().contains(&pc);
    let color = state.note_colors().get(pc);
    let label = display_name(pc, state.notation_mode(), state.note_notations());

    let (background, label_color) = if selected {
        (to_iced(color), to_iced(contrast_text(color)))
    } else {
        (UNSELECTED, to_iced(NEUTRAL_GRAY))
    };

    let toggle = button(text(label).size(14).center().width(Length::Fill))
        .width(Length::Fixed(TOGGLE_WIDTH))
        .padding([6, 4])
        .on_press(Message::NoteToggled(pc))
        .style(move |_theme, _status| button::Style {
            background: Some(Background::Color(background)),
            text_color: label_color,
            border: Border::default().rounded(6.0),
            ..button::Style::default()
        });

    let swatch_color = to_iced(color);
    let swatch = button(text(""))
        .width(Length::Fixed(TOGGLE_WIDTH))
        .height(Length::Fixed(SWATCH_HEIGHT))
        .padding(0)
        .on_press(Message::NoteColorCycled(pc))
        .style(move |_theme, _status| button::Style {
            background: Some(Background::Color(swatch_color)),
            border: Border::default().rounded(3.0),
            ..button::Style::default()
        });

    column![toggle, swatch]
        .spacing(3)
        .align_x(Alignment::Center)
        .into()
}
