//! # Main Display Module
//!
//! This module contains the main display components and layout logic
//! for the fretboard trainer: header, mode toolbar, canvas and footer.

use fretboard_core::fretboard::QUICK_RANGES;
use fretboard_core::notation::{NotationMode, Spelling, display_name};
use fretboard_core::render::CORRECT;
use fretboard_core::{MAX_FRET, PitchClass, TrainerState, TuningPreset};
use iced::widget::{Space, button, column, container, horizontal_space, pick_list, row, text};
use iced::{Alignment, Background, Border, Color, Element, Length};

use super::note_toggle::note_toggle;
use crate::Message;
use crate::widgets::fretboard_canvas::{FretboardCanvas, to_iced};

const ACTIVE: Color = Color::from_rgb(0.23, 0.51, 0.96);
const INACTIVE: Color = Color::from_rgb(0.22, 0.24, 0.28);

/// Creates the complete main application view.
pub fn create_main_view(state: &TrainerState) -> Element<'_, Message> {
    let toolbar = if state.is_quiz() {
        create_quiz_toolbar(state)
    } else {
        create_explore_toolbar(state)
    };

    let board = container(FretboardCanvas::new(state).view())
        .width(Length::Fill)
        .style(|_theme| container::Style {
            background: Some(Background::Color(Color::WHITE)),
            border: Border::default().rounded(8.0),
            ..container::Style::default()
        });

    let main_content = column![
        create_header(state),
        toolbar,
        board,
        create_footer(state),
    ]
    .spacing(16)
    .padding(20);

    container(main_content)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

/// Title, mode buttons, fret steppers and the tuning preset list.
fn create_header(state: &TrainerState) -> Element<'static, Message> {
    let title = text("Fretboard Trainer").size(28);

    let modes = row![
        mode_button("Explore", !state.is_quiz(), Message::ExploreSelected),
        mode_button("Quiz", state.is_quiz(), Message::QuizSelected),
    ]
    .spacing(4);

    let range = state.range();
    let start = stepper(
        "Start",
        range.start(),
        (range.start() > 0).then(|| Message::StartFretChanged(range.start() - 1)),
        (range.start() < MAX_FRET).then(|| Message::StartFretChanged(range.start() + 1)),
    );
    let end = stepper(
        "End",
        range.end(),
        (range.end() > range.start()).then(|| Message::EndFretChanged(range.end() - 1)),
        (range.end() < MAX_FRET).then(|| Message::EndFretChanged(range.end() + 1)),
    );

    let presets = pick_list(TuningPreset::ALL, Some(state.preset()), Message::PresetSelected)
        .text_size(14);

    row![
        title,
        horizontal_space(),
        modes,
        Space::with_width(20),
        start,
        end,
        Space::with_width(20),
        text("Tuning").size(14),
        presets,
    ]
    .spacing(10)
    .align_y(Alignment::Center)
    .into()
}

/// Note toggles plus the notation switches.
fn create_explore_toolbar(state: &TrainerState) -> Element<'static, Message> {
    let toggles = PitchClass::ALL
        .into_iter()
        .fold(row![].spacing(6), |row, pc| row.push(note_toggle(pc, state)));

    let notation_label = match state.notation_mode() {
        NotationMode::Letter => "Letters",
        NotationMode::Degree => "Degrees",
    };
    let all_flat = PitchClass::ALL
        .into_iter()
        .filter(|pc| pc.is_accidental())
        .all(|pc| state.note_notations().get(pc) == Spelling::Flat);
    let spelling_label = if all_flat { "b" } else { "#" };

    row![
        toggles,
        horizontal_space(),
        toolbar_button(notation_label, Some(Message::NotationModeToggled)),
        toolbar_button(spelling_label, Some(Message::SpellingToggled)),
    ]
    .spacing(10)
    .align_y(Alignment::Center)
    .into()
}

/// Target, progress counter and quiz controls.
fn create_quiz_toolbar(state: &TrainerState) -> Element<'static, Message> {
    let target = display_name(
        state.quiz_target(),
        NotationMode::Letter,
        state.note_notations(),
    );

    let total = state.correct_set().len();
    let counter_color = if state.all_found() {
        to_iced(CORRECT)
    } else {
        Color::from_rgb(0.8, 0.8, 0.8)
    };
    let counter = text(format!("Found {}/{}", state.found_count(), total))
        .size(16)
        .color(counter_color);

    let has_clicks = !state.clicked().is_empty();

    row![
        text("Find").size(16),
        text(target).size(26),
        toolbar_button("Next note", Some(Message::NextTarget)),
        Space::with_width(20),
        counter,
        horizontal_space(),
        toolbar_button("Reset clicks", has_clicks.then_some(Message::ResetClicks)),
        toolbar_button("New quiz", Some(Message::NewQuiz)),
        toolbar_button("Stop", Some(Message::StopQuiz)),
    ]
    .spacing(10)
    .align_y(Alignment::Center)
    .into()
}

/// Quick fret-range shortcuts and the pitch formula.
fn create_footer(state: &TrainerState) -> Element<'static, Message> {
    let current = (state.range().start(), state.range().end());
    let quick = QUICK_RANGES.into_iter().fold(
        row![text("Quick ranges").size(14)].spacing(6).align_y(Alignment::Center),
        |row, (start, end)| {
            row.push(mode_button_sized(
                format!("{start}-{end}"),
                current == (start, end),
                Message::QuickRange(start, end),
                13,
            ))
        },
    );

    row![
        quick,
        horizontal_space(),
        text("pitch = (open string + fret) mod 12").size(13),
    ]
    .align_y(Alignment::Center)
    .into()
}

/// Label, value and -/+ buttons. A `None` message disables its button.
fn stepper(
    label: &'static str,
    value: u8,
    decrement: Option<Message>,
    increment: Option<Message>,
) -> Element<'static, Message> {
    row![
        text(label).size(14),
        toolbar_button("-", decrement),
        text(value.to_string()).size(16).width(Length::Fixed(24.0)).center(),
        toolbar_button("+", increment),
    ]
    .spacing(4)
    .align_y(Alignment::Center)
    .into()
}

fn toolbar_button(label: &'static str, message: Option<Message>) -> Element<'static, Message> {
    button(text(label).size(14))
        .padding([6, 10])
        .on_press_maybe(message)
        .into()
}

fn mode_button(label: &'static str, active: bool, message: Message) -> Element<'static, Message> {
    mode_button_sized(label.to_string(), active, message, 14)
}

/// A button highlighted when `active`.
fn mode_button_sized(
    label: String,
    active: bool,
    message: Message,
    size: u16,
) -> Element<'static, Message> {
    let background = if active { ACTIVE } else { INACTIVE };
    button(text(label).size(size))
        .padding([6, 12])
        .on_press(message)
        .style(move |_theme, _status| button::Style {
            background: Some(Background::Color(background)),
            text_color: Color::WHITE,
            border: Border::default().rounded(6.0),
            ..button::Style::default()
        })
        .into()
}
