//! Colors for note markers.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::Error;
use crate::pitch::PitchClass;

/// An RGBA color with channels in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::from_rgb8(0xFF, 0xFF, 0xFF);

    pub const fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: 1.0,
        }
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Parses `#RRGGBB`, `RRGGBB` or `#RGB`.
    pub fn from_hex(hex: &str) -> Result<Self, Error> {
        let invalid = || Error::InvalidColor(hex.to_string());
        let digits = hex.trim().trim_start_matches('#');
        if !digits.is_ascii() {
            return Err(invalid());
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
        match digits.len() {
            6 => Ok(Self::from_rgb8(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            3 => {
                let short = |i: usize| channel(&digits[i..i + 1]).map(|v| v * 17);
                Ok(Self::from_rgb8(short(0)?, short(1)?, short(2)?))
            }
            _ => Err(invalid()),
        }
    }

    pub fn to_hex(self) -> String {
        let to_u8 = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02X}{:02X}{:02X}", to_u8(self.r), to_u8(self.g), to_u8(self.b))
    }

    /// Perceived brightness: Rec. 601 luma weights on the gamma-encoded channels.
    pub fn luminance(self) -> f32 {
        0.299 * self.r + 0.587 * self.g + 0.114 * self.b
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl TryFrom<String> for Color {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

/// Used wherever a color cannot be resolved.
pub const NEUTRAL_GRAY: Color = Color::from_rgb8(0x94, 0xA3, 0xB8);

/// Dark label color for light markers.
pub const DARK_TEXT: Color = Color::from_rgb8(0x0F, 0x17, 0x2A);

const LUMINANCE_THRESHOLD: f32 = 0.6;

/// Picks a readable label color for text drawn on `background`.
pub fn contrast_text(background: Color) -> Color {
    if background.luminance() > LUMINANCE_THRESHOLD {
        DARK_TEXT
    } else {
        Color::WHITE
    }
}

/// Default marker color per pitch class, C through B.
const DEFAULT_NOTE_COLORS: [Color; 12] = [
    Color::from_rgb8(0xEF, 0x44, 0x44),
    Color::from_rgb8(0xF9, 0x73, 0x16),
    Color::from_rgb8(0xFB, 0xBF, 0x24),
    Color::from_rgb8(0x84, 0xCC, 0x16),
    Color::from_rgb8(0x10, 0xB9, 0x81),
    Color::from_rgb8(0x14, 0xB8, 0xA6),
    Color::from_rgb8(0x06, 0xB6, 0xD4),
    Color::from_rgb8(0x3B, 0x82, 0xF6),
    Color::from_rgb8(0x8B, 0x5C, 0xF6),
    Color::from_rgb8(0xEC, 0x48, 0x99),
    Color::from_rgb8(0xF4, 0x72, 0xB6),
    Color::from_rgb8(0xFB, 0x92, 0x3C),
];

/// Swatches a note color steps through when cycled from the UI.
pub const SWATCHES: [Color; 8] = [
    Color::from_rgb8(0xEF, 0x44, 0x44),
    Color::from_rgb8(0xF9, 0x73, 0x16),
    Color::from_rgb8(0xFB, 0xBF, 0x24),
    Color::from_rgb8(0x10, 0xB9, 0x81),
    Color::from_rgb8(0x06, 0xB6, 0xD4),
    Color::from_rgb8(0x3B, 0x82, 0xF6),
    Color::from_rgb8(0x8B, 0x5C, 0xF6),
    NEUTRAL_GRAY,
];

/// Marker color for every pitch class.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoteColors([Color; 12]);

impl Default for NoteColors {
    fn default() -> Self {
        Self(DEFAULT_NOTE_COLORS)
    }
}

impl NoteColors {
    pub fn get(&self, pc: PitchClass) -> Color {
        self.0[pc.index() as usize]
    }

    pub fn set(&mut self, pc: PitchClass, color: Color) {
        self.0[pc.index() as usize] = color;
    }

    /// Moves `pc` to the swatch after its current color. A color that is not
    /// a swatch moves to the first one.
    pub fn cycle(&mut self, pc: PitchClass) {
        let current = self.get(pc);
        let next = SWATCHES
            .iter()
            .position(|&swatch| swatch == current)
            .map(|i| SWATCHES[(i + 1) % SWATCHES.len()])
            .unwrap_or(SWATCHES[0]);
        self.set(pc, next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_forms() {
        assert_eq!(Color::from_hex("#EF4444").unwrap(), Color::from_rgb8(0xEF, 0x44, 0x44));
        assert_eq!(Color::from_hex("10b981").unwrap(), Color::from_rgb8(0x10, 0xB9, 0x81));
        assert_eq!(Color::from_hex("#fff").unwrap(), Color::WHITE);
        assert!(Color::from_hex("#12345").is_err());
        assert!(Color::from_hex("#zzzzzz").is_err());
        assert!(Color::from_hex("#ééé").is_err());
    }

    #[test]
    fn hex_output_is_uppercase() {
        assert_eq!(NEUTRAL_GRAY.to_hex(), "#94A3B8");
    }

    #[test]
    fn contrast_text_depends_on_luminance() {
        // Amber is light, blue is dark.
        assert_eq!(contrast_text(Color::from_rgb8(0xFB, 0xBF, 0x24)), DARK_TEXT);
        assert_eq!(contrast_text(Color::from_rgb8(0x3B, 0x82, 0xF6)), Color::WHITE);
    }

    #[test]
    fn luminance_weights_raw_channels() {
        // No linearization: mid gray stays at its channel value.
        let gray = Color { r: 0.5, g: 0.5, b: 0.5, a: 1.0 };
        assert!((gray.luminance() - 0.5).abs() < 1e-6);
        assert!((Color::WHITE.luminance() - 1.0).abs() < 1e-6);
        assert!((Color::from_rgb8(0, 0xFF, 0).luminance() - 0.587).abs() < 1e-6);
    }

    #[test]
    fn default_colors_match_palette() {
        let colors = NoteColors::default();
        assert_eq!(colors.get(PitchClass::C).to_hex(), "#EF4444");
        assert_eq!(colors.get(PitchClass::B).to_hex(), "#FB923C");
    }

    #[test]
    fn cycle_walks_swatches_and_wraps() {
        let mut colors = NoteColors::default();
        // D's default amber is the third swatch.
        colors.cycle(PitchClass::D);
        assert_eq!(colors.get(PitchClass::D), SWATCHES[3]);

        // Gray is the last swatch.
        colors.set(PitchClass::Cs, NEUTRAL_GRAY);
        colors.cycle(PitchClass::Cs);
        assert_eq!(colors.get(PitchClass::Cs), SWATCHES[0]);

        // Off-palette colors restart at the first swatch.
        colors.set(PitchClass::E, Color::from_rgb8(1, 2, 3));
        colors.cycle(PitchClass::E);
        assert_eq!(colors.get(PitchClass::E), SWATCHES[0]);
    }
}
