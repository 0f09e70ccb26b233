// fretboard-core/src/lib.rs

//! Headless core of the fretboard note trainer.
//! Owns the music model, the board geometry, pointer resolution and the
//! session reducer. Rendering is expressed as a list of draw commands so
//! this crate never depends on a GUI toolkit.

pub mod config;
pub mod error;
pub mod fretboard;
pub mod geometry;
pub mod notation;
pub mod palette;
pub mod pitch;
pub mod render;
pub mod state;
pub mod tuning;

pub use config::TrainerConfig;
pub use error::{Error, Result};
pub use fretboard::{Cell, FretRange, MAX_FRET, STRING_COUNT};
pub use geometry::{BoardGeometry, BoardLayout, Point, Rect};
pub use hit_test::cell_at;
pub use pitch::PitchClass;
pub use render::{DrawCommand, render};
pub use state::{Event, Mode, TrainerState, random_target, reduce};
pub use tuning::{Tuning, TuningPreset};
