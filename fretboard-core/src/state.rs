//! # Trainer State Module
//!
//! The explore/quiz controller as a value plus a pure reducer.
//!
//! The GUI never mutates `TrainerState` directly: every interaction becomes an
//! `Event` and `reduce(state, event)` returns the next state. Randomness
//! (picking a quiz target) happens at the caller through `random_target`, so
//! the reducer stays deterministic.

use rand::Rng;
use std::collections::BTreeSet;
use tracing::debug;

use crate::fretboard::{cells, Cell, FretRange, STRING_COUNT};
use crate::notation::{NotationMode, NoteNotations};
use crate::palette::{Color, NoteColors};
use crate::pitch::PitchClass;
use crate::tuning::{Tuning, TuningPreset};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Explore,
    Quiz,
}

/// Everything a user can do to the trainer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    StartQuiz { target: PitchClass },
    StopQuiz,
    SetQuizTarget(PitchClass),
    /// Moves the quiz target up one semitone.
    NextTarget,
    ToggleCell(Cell),
    ResetClicks,
    SetStartFret(u8),
    SetEndFret(u8),
    SetFretRange { start: u8, end: u8 },
    ApplyPreset(TuningPreset),
    ToggleNote(PitchClass),
    SetNoteColor(PitchClass, Color),
    CycleNoteColor(PitchClass),
    ToggleAllNotations,
    SetNotationMode(NotationMode),
    Hover(Option<Cell>),
}

/// Picks a quiz target uniformly from the twelve pitch classes.
pub fn random_target<R: Rng + ?Sized>(rng: &mut R) -> PitchClass {
    PitchClass::ALL[rng.gen_range(0..PitchClass::ALL.len())]
}

/// Session state of the trainer. Nothing here outlives the window.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainerState {
    mode: Mode,
    range: FretRange,
    preset: TuningPreset,
    tuning: Tuning,
    quiz_target: PitchClass,
    clicked: BTreeSet<Cell>,
    hovered: Option<Cell>,
    selected_notes: BTreeSet<PitchClass>,
    note_colors: NoteColors,
    note_notations: NoteNotations,
    notation_mode: NotationMode,
}

impl Default for TrainerState {
    fn default() -> Self {
        Self {
            mode: Mode::Explore,
            range: FretRange::default(),
            preset: TuningPreset::Standard,
            tuning: TuningPreset::Standard.tuning(),
            quiz_target: PitchClass::C,
            clicked: BTreeSet::new(),
            hovered: None,
            selected_notes: PitchClass::ALL
                .into_iter()
                .filter(|pc| !pc.is_accidental())
                .collect(),
            note_colors: NoteColors::default(),
            note_notations: NoteNotations::default(),
            notation_mode: NotationMode::Letter,
        }
    }
}

impl TrainerState {
    pub(crate) fn with_settings(
        range: FretRange,
        preset: TuningPreset,
        selected_notes: BTreeSet<PitchClass>,
        note_colors: NoteColors,
        note_notations: NoteNotations,
        notation_mode: NotationMode,
    ) -> Self {
        Self {
            range,
            preset,
            tuning: preset.tuning(),
            selected_notes,
            note_colors,
            note_notations,
            notation_mode,
            ..Self::default()
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_quiz(&self) -> bool {
        self.mode == Mode::Quiz
    }

    pub fn range(&self) -> FretRange {
        self.range
    }

    pub fn preset(&self) -> TuningPreset {
        self.preset
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn quiz_target(&self) -> PitchClass {
        self.quiz_target
    }

    pub fn clicked(&self) -> &BTreeSet<Cell> {
        &self.clicked
    }

    pub fn hovered(&self) -> Option<Cell> {
        self.hovered
    }

    pub fn selected_notes(&self) -> &BTreeSet<PitchClass> {
        &self.selected_notes
    }

    pub fn note_colors(&self) -> &NoteColors {
        &self.note_colors
    }

    pub fn note_notations(&self) -> &NoteNotations {
        &self.note_notations
    }

    pub fn notation_mode(&self) -> NotationMode {
        self.notation_mode
    }

    /// Sounded pitch class of `cell` under the current tuning.
    pub(crate) fn pitch_at(&self, cell: Cell) -> PitchClass {
        cell.pitch_class(&self.tuning)
    }

    /// Visible cells that sound the quiz target.
    pub fn correct_set(&self) -> BTreeSet<Cell> {
        cells(&self.range)
            .filter(|&cell| self.pitch_at(cell) == self.quiz_target)
            .collect()
    }

    pub fn is_correct(&self, cell: Cell) -> bool {
        self.pitch_at(cell) == self.quiz_target
    }

    /// Clicked cells that are correct answers.
    pub fn found_count(&self) -> usize {
        self.correct_set().intersection(&self.clicked).count()
    }

    /// True once every correct cell has been clicked. An empty answer set
    /// never counts as solved.
    pub fn all_found(&self) -> bool {
        if !self.is_quiz() {
            return false;
        }
        let correct = self.correct_set();
        !correct.is_empty() && correct.is_subset(&self.clicked)
    }

    fn is_on_board(&self, cell: Cell) -> bool {
        (cell.string as usize) < STRING_COUNT && self.range.contains(cell.fret)
    }

    // Range, tuning and target changes invalidate the current answers.
    fn puzzle_changed(&mut self) {
        if self.is_quiz() {
            self.clicked.clear();
        }
        self.hovered = None;
    }
}

/// Applies `event` to `state` and returns the next state.
pub fn reduce(mut state: TrainerState, event: Event) -> TrainerState {
    match event {
        Event::StartQuiz { target } => {
            debug!(%target, "quiz started");
            state.mode = Mode::Quiz;
            state.quiz_target = target;
            state.clicked.clear();
            state.hovered = None;
        }
        Event::StopQuiz => {
            debug!("quiz stopped");
            state.mode = Mode::Explore;
            state.clicked.clear();
            state.hovered = None;
        }
        Event::SetQuizTarget(target) => {
            if target != state.quiz_target {
                debug!(from = %state.quiz_target, to = %target, "quiz target changed");
                state.quiz_target = target;
                state.puzzle_changed();
            }
        }
        Event::NextTarget => {
            let next = state.quiz_target.transpose(1);
            return reduce(state, Event::SetQuizTarget(next));
        }
        Event::ToggleCell(cell) => {
            if !state.is_on_board(cell) {
                debug!(?cell, "ignoring toggle outside the visible board");
            } else if !state.clicked.remove(&cell) {
                state.clicked.insert(cell);
            }
        }
        Event::ResetClicks => state.clicked.clear(),
        Event::SetStartFret(start) => {
            let range = state.range.with_start(start);
            return set_range(state, range);
        }
        Event::SetEndFret(end) => {
            let range = state.range.with_end(end);
            return set_range(state, range);
        }
        Event::SetFretRange { start, end } => {
            return set_range(state, FretRange::new(start, end));
        }
        Event::ApplyPreset(preset) => {
            let tuning = preset.tuning();
            state.preset = preset;
            if tuning != state.tuning {
                debug!(preset = preset.name(), "tuning changed");
                state.tuning = tuning;
                state.puzzle_changed();
            }
        }
        Event::ToggleNote(pc) => {
            if !state.selected_notes.remove(&pc) {
                state.selected_notes.insert(pc);
            }
        }
        Event::SetNoteColor(pc, color) => state.note_colors.set(pc, color),
        Event::CycleNoteColor(pc) => state.note_colors.cycle(pc),
        Event::ToggleAllNotations => state.note_notations.toggle_all(),
        Event::SetNotationMode(mode) => state.notation_mode = mode,
        Event::Hover(cell) => {
            state.hovered = cell.filter(|&c| state.is_quiz() && state.is_on_board(c));
        }
    }
    state
}

fn set_range(mut state: TrainerState, range: FretRange) -> TrainerState {
    if range != state.range {
        debug!(start = range.start(), end = range.end(), "fret range changed");
        state.range = range;
        state.puzzle_changed();
    }
    state
}
