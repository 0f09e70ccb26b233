//! # Fretboard Trainer - GUI
//!
//! Desktop front end of the fretboard note trainer. It renders the board,
//! forwards every control and pointer interaction to the core reducer, and
//! shows the quiz progress.
//!
//! ## Architecture
//! - **State**: a single `TrainerState` owned by the app, replaced on each event
//! - **Messages**: thin GUI messages mapped onto core `Event`s
//! - **Randomness**: quiz targets are drawn here and passed into the reducer
//! - **Startup**: optional JSON config, tracing subscriber, dark theme

mod ui;
mod widgets;

use anyhow::{Context, anyhow};
use fretboard_core::{
    Cell, Event, PitchClass, TrainerConfig, TrainerState, TuningPreset, random_target, reduce,
};
use iced::{Element, Task, Theme};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;
use ui::main_display::create_main_view;

/// Entry point: logging, config, then the iced event loop.
pub fn main() -> anyhow::Result<()> {
    init_tracing();
    info!("starting fretboard trainer");

    let state = match load_initial_state() {
        Ok(state) => state,
        Err(e) => {
            warn!("{e:#}; falling back to defaults");
            TrainerState::default()
        }
    };

    iced::application("Fretboard Trainer", TrainerApp::update, TrainerApp::view)
        .theme(TrainerApp::theme)
        .window_size((1180.0, 620.0))
        .run_with(move || (TrainerApp::new(state), Task::none()))
        .map_err(|e| anyhow!("GUI event loop failed: {e}"))
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Reads the startup config if one is present.
fn load_initial_state() -> anyhow::Result<TrainerState> {
    let Some(path) = TrainerConfig::locate() else {
        debug!("no config file found");
        return Ok(TrainerState::default());
    };
    let config = TrainerConfig::load(&path)
        .with_context(|| format!("could not load config from {}", path.display()))?;
    Ok(TrainerState::from_config(&config))
}

/// Messages produced by the toolbars and the fretboard canvas.
#[derive(Debug, Clone)]
pub enum Message {
    // Header
    ExploreSelected,
    QuizSelected,
    StartFretChanged(u8),
    EndFretChanged(u8),
    PresetSelected(TuningPreset),

    // Explore toolbar
    NoteToggled(PitchClass),
    NoteColorCycled(PitchClass),
    NotationModeToggled,
    SpellingToggled,

    // Quiz toolbar
    NextTarget,
    ResetClicks,
    NewQuiz,
    StopQuiz,

    // Footer
    QuickRange(u8, u8),

    // Canvas
    CellClicked(Cell),
    CellHovered(Option<Cell>),
}

/// Application state: the trainer session plus the target generator.
struct TrainerApp {
    state: TrainerState,
    rng: StdRng,
}

impl TrainerApp {
    fn new(state: TrainerState) -> Self {
        Self { state, rng: StdRng::from_entropy() }
    }

    fn update(&mut self, message: Message) {
        if let Some(event) = self.event_for(message) {
            let state = std::mem::take(&mut self.state);
            self.state = reduce(state, event);
        }
    }

    /// Maps a GUI message to the core event it stands for.
    fn event_for(&mut self, message: Message) -> Option<Event> {
        let event = match message {
            Message::ExploreSelected if self.state.is_quiz() => Event::StopQuiz,
            Message::ExploreSelected => return None,
            Message::QuizSelected if self.state.is_quiz() => return None,
            Message::QuizSelected | Message::NewQuiz => Event::StartQuiz {
                target: random_target(&mut self.rng),
            },
            Message::StopQuiz => Event::StopQuiz,
            Message::StartFretChanged(fret) => Event::SetStartFret(fret),
            Message::EndFretChanged(fret) => Event::SetEndFret(fret),
            Message::PresetSelected(preset) => Event::ApplyPreset(preset),
            Message::NoteToggled(pc) => Event::ToggleNote(pc),
            Message::NoteColorCycled(pc) => Event::CycleNoteColor(pc),
            Message::NotationModeToggled => {
                Event::SetNotationMode(self.state.notation_mode().toggled())
            }
            Message::SpellingToggled => Event::ToggleAllNotations,
            Message::NextTarget => Event::NextTarget,
            Message::ResetClicks => Event::ResetClicks,
            Message::QuickRange(start, end) => Event::SetFretRange { start, end },
            Message::CellClicked(cell) => Event::ToggleCell(cell),
            Message::CellHovered(cell) => Event::Hover(cell),
        };
        Some(event)
    }

    fn view(&self) -> Element<'_, Message> {
        create_main_view(&self.state)
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }
}
