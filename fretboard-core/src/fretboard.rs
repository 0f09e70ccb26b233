//! Fret ranges and board cells.

use std::ops::RangeInclusive;

use crate::pitch::PitchClass;
use crate::tuning::Tuning;

/// Highest fret the trainer can show.
pub const MAX_FRET: u8 = 22;

/// Strings on the instrument.
pub const STRING_COUNT: usize = 6;

/// Preset ranges offered as one-click shortcuts.
pub const QUICK_RANGES: [(u8, u8); 3] = [(0, 12), (5, 9), (12, 17)];

/// Inclusive range of visible frets. Always `start <= end <= MAX_FRET`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FretRange {
    start: u8,
    end: u8,
}

impl Default for FretRange {
    fn default() -> Self {
        Self { start: 0, end: 12 }
    }
}

impl FretRange {
    /// Clamps both ends to `0..=MAX_FRET` and pulls `end` up to `start`.
    pub fn new(start: u8, end: u8) -> Self {
        let start = start.min(MAX_FRET);
        let end = end.min(MAX_FRET).max(start);
        Self { start, end }
    }

    pub fn start(&self) -> u8 {
        self.start
    }

    pub fn end(&self) -> u8 {
        self.end
    }

    /// Moves the start fret, dragging the end along if it would fall behind.
    pub fn with_start(self, start: u8) -> Self {
        let start = start.min(MAX_FRET);
        Self { start, end: self.end.max(start) }
    }

    /// Moves the end fret; it never goes below the start fret.
    pub fn with_end(self, end: u8) -> Self {
        Self { start: self.start, end: end.min(MAX_FRET).max(self.start) }
    }

    pub fn frets(&self) -> RangeInclusive<u8> {
        self.start..=self.end
    }

    pub fn visible_frets(&self) -> Vec<u8> {
        self.frets().collect()
    }

    pub fn fret_count(&self) -> usize {
        (self.end - self.start) as usize + 1
    }

    pub fn contains(&self, fret: u8) -> bool {
        self.frets().contains(&fret)
    }

    /// Whether fret 0 is visible and gets its own nut zone.
    pub fn has_nut(&self) -> bool {
        self.start == 0
    }
}

/// A playable position: string index (0 = string 1) and fret number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cell {
    pub string: u8,
    pub fret: u8,
}

impl Cell {
    pub const fn new(string: u8, fret: u8) -> Self {
        Self { string, fret }
    }

    /// Sounded pitch class: open string plus one semitone per fret.
    pub fn pitch_class(&self, tuning: &Tuning) -> PitchClass {
        tuning.open(self.string as usize).transpose(self.fret as i32)
    }
}

/// Every cell on the visible part of the board, string-major.
pub fn cells(range: &FretRange) -> impl Iterator<Item = Cell> + '_ {
    (0..STRING_COUNT as u8)
        .flat_map(move |string| range.frets().map(move |fret| Cell::new(string, fret)))
}
