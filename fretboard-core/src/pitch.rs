//! # Pitch Model Module
//!
//! Pitch classes and their names. Octaves are irrelevant to the trainer, so
//! every pitch is one of twelve equivalence classes with arithmetic mod 12.
//!
//! ## Features
//! - Closed `PitchClass` enum, `C = 0` through `B = 11`
//! - Sharp and flat spellings for the five accidentals
//! - Note name parsing with either spelling

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Number of pitch classes in an octave.
pub const PITCH_CLASS_COUNT: u8 = 12;

/// One of the twelve pitch classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PitchClass {
    C,
    Cs,
    D,
    Ds,
    E,
    F,
    Fs,
    G,
    Gs,
    A,
    As,
    B,
}

const SHARP_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

const FLAT_NAMES: [&str; 12] = [
    "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B",
];

/// Lowercased note name -> pitch class, covering both spellings.
///
/// Built once on first use. Unicode accidentals are normalized before lookup.
static NAME_MAP: Lazy<BTreeMap<String, PitchClass>> = Lazy::new(|| {
    PitchClass::ALL
        .iter()
        .flat_map(|&pc| {
            [
                (pc.sharp_name().to_ascii_lowercase(), pc),
                (pc.flat_name().to_ascii_lowercase(), pc),
            ]
        })
        .collect()
});

impl PitchClass {
    /// All pitch classes in ascending order starting from C.
    pub const ALL: [PitchClass; 12] = [
        PitchClass::C,
        PitchClass::Cs,
        PitchClass::D,
        PitchClass::Ds,
        PitchClass::E,
        PitchClass::F,
        PitchClass::Fs,
        PitchClass::G,
        PitchClass::Gs,
        PitchClass::A,
        PitchClass::As,
        PitchClass::B,
    ];

    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    /// Maps any integer onto a pitch class, normalizing negatives.
    pub fn wrapping(value: i32) -> Self {
        let index = value.rem_euclid(PITCH_CLASS_COUNT as i32);
        Self::ALL[index as usize]
    }

    pub fn transpose(self, semitones: i32) -> Self {
        Self::wrapping(self.index() as i32 + semitones)
    }

    /// True for the five pitch classes that need a sharp or flat.
    pub fn is_accidental(self) -> bool {
        matches!(
            self,
            PitchClass::Cs | PitchClass::Ds | PitchClass::Fs | PitchClass::Gs | PitchClass::As
        )
    }

    pub fn sharp_name(self) -> &'static str {
        SHARP_NAMES[self as usize]
    }

    pub fn flat_name(self) -> &'static str {
        FLAT_NAMES[self as usize]
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sharp_name())
    }
}

impl FromStr for PitchClass {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace('♯', "#").replace('♭', "b").to_ascii_lowercase();
        NAME_MAP
            .get(&normalized)
            .copied()
            .ok_or_else(|| Error::UnknownNote(s.to_string()))
    }
}

impl TryFrom<u8> for PitchClass {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_index(value).ok_or(Error::InvalidPitchClass(value))
    }
}

impl TryFrom<String> for PitchClass {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PitchClass> for String {
    fn from(pc: PitchClass) -> Self {
        pc.sharp_name().to_string()
    }
}
