//! Error type shared by the core crate.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("unknown note name: {0:?}")]
    UnknownNote(String),

    #[error("pitch class out of range: {0} (expected 0-11)")]
    InvalidPitchClass(u8),

    #[error("tuning needs exactly 6 strings, got {0}")]
    InvalidTuningLength(usize),

    #[error("invalid color: {0:?}")]
    InvalidColor(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("config: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
