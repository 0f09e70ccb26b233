//! Display names for pitch classes: letter vs scale degree, sharp vs flat.

use serde::{Deserialize, Serialize};

use crate::pitch::PitchClass;

/// How an accidental is spelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Spelling {
    #[default]
    Sharp,
    Flat,
}

impl Spelling {
    pub fn toggled(self) -> Self {
        match self {
            Spelling::Sharp => Spelling::Flat,
            Spelling::Flat => Spelling::Sharp,
        }
    }
}

/// Whether markers show note letters or scale degrees relative to C.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotationMode {
    #[default]
    Letter,
    Degree,
}

impl NotationMode {
    pub fn toggled(self) -> Self {
        match self {
            NotationMode::Letter => NotationMode::Degree,
            NotationMode::Degree => NotationMode::Letter,
        }
    }
}

const DEGREE_SHARP_NAMES: [&str; 12] = [
    "1", "#1", "2", "#2", "3", "4", "#4", "5", "#5", "6", "#6", "7",
];

const DEGREE_FLAT_NAMES: [&str; 12] = [
    "1", "b2", "2", "b3", "3", "4", "b5", "5", "b6", "6", "b7", "7",
];

/// Spelling chosen for each pitch class. Naturals ignore their entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NoteNotations([Spelling; 12]);

impl NoteNotations {
    pub fn uniform(spelling: Spelling) -> Self {
        Self([spelling; 12])
    }

    pub fn get(&self, pc: PitchClass) -> Spelling {
        self.0[pc.index() as usize]
    }

    pub fn set(&mut self, pc: PitchClass, spelling: Spelling) {
        self.0[pc.index() as usize] = spelling;
    }

    /// Respells every accidental at once: all sharp if they are all flat
    /// already, otherwise all flat. The result is always uniform.
    pub fn toggle_all(&mut self) {
        let all_flat = PitchClass::ALL
            .iter()
            .filter(|pc| pc.is_accidental())
            .all(|&pc| self.get(pc) == Spelling::Flat);
        let next = if all_flat { Spelling::Sharp } else { Spelling::Flat };
        *self = Self::uniform(next);
    }
}

/// The label shown for `pc` on the board and on the note toggles.
pub fn display_name(pc: PitchClass, mode: NotationMode, notations: &NoteNotations) -> &'static str {
    let spelling = if pc.is_accidental() {
        notations.get(pc)
    } else {
        Spelling::Sharp
    };
    let index = pc.index() as usize;
    match (mode, spelling) {
        (NotationMode::Letter, Spelling::Sharp) => pc.sharp_name(),
        (NotationMode::Letter, Spelling::Flat) => pc.flat_name(),
        (NotationMode::Degree, Spelling::Sharp) => DEGREE_SHARP_NAMES[index],
        (NotationMode::Degree, Spelling::Flat) => DEGREE_FLAT_NAMES[index],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letter_names_follow_spelling() {
        let mut notations = NoteNotations::default();
        assert_eq!(display_name(PitchClass::As, NotationMode::Letter, &notations), "A#");
        notations.set(PitchClass::As, Spelling::Flat);
        assert_eq!(display_name(PitchClass::As, NotationMode::Letter, &notations), "Bb");
        assert_eq!(display_name(PitchClass::Cs, NotationMode::Letter, &notations), "C#");
    }

    #[test]
    fn degree_names_are_relative_to_c() {
        let flats = NoteNotations::uniform(Spelling::Flat);
        assert_eq!(display_name(PitchClass::G, NotationMode::Degree, &flats), "5");
        assert_eq!(display_name(PitchClass::Ds, NotationMode::Degree, &flats), "b3");
        let sharps = NoteNotations::default();
        assert_eq!(display_name(PitchClass::Fs, NotationMode::Degree, &sharps), "#4");
    }

    #[test]
    fn toggle_all_flips_between_uniform_spellings() {
        let mut notations = NoteNotations::default();
        notations.set(PitchClass::Cs, Spelling::Flat);
        // Mixed spellings go to all flat first.
        notations.toggle_all();
        assert_eq!(notations, NoteNotations::uniform(Spelling::Flat));
        notations.toggle_all();
        assert_eq!(notations, NoteNotations::uniform(Spelling::Sharp));
    }

    #[test]
    fn respelling_all_flat_returns_to_the_default() {
        let mut notations = NoteNotations::uniform(Spelling::Flat);
        notations.toggle_all();
        assert_eq!(notations, NoteNotations::default());

        // Naturals may carry either entry; only accidentals decide.
        let mut notations = NoteNotations::default();
        for pc in PitchClass::ALL.into_iter().filter(|pc| pc.is_accidental()) {
            notations.set(pc, Spelling::Flat);
        }
        notations.toggle_all();
        assert_eq!(notations, NoteNotations::default());
    }
}
