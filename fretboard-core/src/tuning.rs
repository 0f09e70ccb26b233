//! # Tuning Module
//!
//! Open-string pitch classes for a six-string instrument and the tuning
//! presets offered by the trainer.
//!
//! ## Features
//! - Validated six-string `Tuning`, index 0 = string 1 (highest pitched)
//! - Standard, Drop D, Open G and Open D presets
//! - Preset lookup by display name

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::Error;
use crate::fretboard::STRING_COUNT;
use crate::pitch::PitchClass;

/// Open pitch class of each string, from string 1 (top) to string 6 (bottom).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tuning([PitchClass; STRING_COUNT]);

impl Tuning {
    pub const fn new(strings: [PitchClass; STRING_COUNT]) -> Self {
        Self(strings)
    }

    /// Open pitch class of the string at `index` (0 = string 1).
    ///
    /// # Panics
    /// If `index >= STRING_COUNT`.
    pub fn open(&self, index: usize) -> PitchClass {
        self.0[index]
    }

    pub fn strings(&self) -> &[PitchClass; STRING_COUNT] {
        &self.0
    }

    pub fn pitch_classes(&self) -> [u8; STRING_COUNT] {
        self.0.map(PitchClass::index)
    }

    /// Open-string letters, string 1 first.
    pub fn labels(&self) -> [&'static str; STRING_COUNT] {
        self.0.map(PitchClass::sharp_name)
    }
}

impl Default for Tuning {
    fn default() -> Self {
        TuningPreset::Standard.tuning()
    }
}

impl TryFrom<&[u8]> for Tuning {
    type Error = Error;

    fn try_from(values: &[u8]) -> Result<Self, Self::Error> {
        if values.len() != STRING_COUNT {
            return Err(Error::InvalidTuningLength(values.len()));
        }
        let mut strings = [PitchClass::C; STRING_COUNT];
        for (slot, &value) in strings.iter_mut().zip(values) {
            *slot = PitchClass::try_from(value)?;
        }
        Ok(Self(strings))
    }
}

/// Tunings available from the preset menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TuningPreset {
    #[default]
    Standard,
    DropD,
    OpenG,
    OpenD,
}

impl TuningPreset {
    pub const ALL: [TuningPreset; 4] = [
        TuningPreset::Standard,
        TuningPreset::DropD,
        TuningPreset::OpenG,
        TuningPreset::OpenD,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TuningPreset::Standard => "Standard (EADGBE)",
            TuningPreset::DropD => "Drop D",
            TuningPreset::OpenG => "Open G",
            TuningPreset::OpenD => "Open D",
        }
    }

    pub fn tuning(self) -> Tuning {
        use PitchClass::*;
        match self {
            TuningPreset::Standard => Tuning::new([E, B, G, D, A, E]),
            TuningPreset::DropD => Tuning::new([E, B, G, D, A, D]),
            TuningPreset::OpenG => Tuning::new([D, G, D, G, B, D]),
            TuningPreset::OpenD => Tuning::new([D, A, D, Fs, A, D]),
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|preset| preset.name() == name)
    }
}

impl fmt::Display for TuningPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<String> for TuningPreset {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_name(&value).ok_or_else(|| format!("unknown tuning preset {value:?}"))
    }
}

impl From<TuningPreset> for String {
    fn from(preset: TuningPreset) -> Self {
        preset.name().to_string()
    }
}
