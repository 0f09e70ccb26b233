//! Startup settings read from a JSON file.
//!
//! The file is only ever read. Missing fields take their defaults, and values
//! that do not make sense are clamped or dropped with a warning instead of
//! failing the whole load.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::error::Result;
use crate::fretboard::{FretRange, MAX_FRET};
use crate::notation::{NotationMode, NoteNotations, Spelling};
use crate::palette::{Color, NoteColors};
use crate::pitch::PitchClass;
use crate::state::TrainerState;
use crate::tuning::TuningPreset;

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "FRETBOARD_CONFIG";
/// File looked up in the working directory when `CONFIG_ENV` is unset.
pub const DEFAULT_CONFIG_FILE: &str = "fretboard.json";

/// Raw settings as written in the file.
///
/// Values are kept loose (wide integers, plain strings) so one bad entry
/// only resets that entry. `TrainerState::from_config` resolves them.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TrainerConfig {
    pub start_fret: i64,
    pub end_fret: i64,
    /// Preset display name, e.g. `"Drop D"`.
    pub tuning: String,
    /// `letter` or `degree`.
    pub notation: String,
    /// `sharp` or `flat`.
    pub spelling: String,
    /// Note names highlighted in explore mode. Unknown names are skipped.
    pub selected_notes: Vec<String>,
    /// Note name -> `#RRGGBB`. Unparseable entries keep the default color.
    pub note_colors: BTreeMap<String, String>,
    /// Keys this version does not know about.
    #[serde(flatten)]
    pub unknown: BTreeMap<String, Value>,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        let range = FretRange::default();
        Self {
            start_fret: range.start().into(),
            end_fret: range.end().into(),
            tuning: TuningPreset::default().name().to_string(),
            notation: "letter".to_string(),
            spelling: "sharp".to_string(),
            selected_notes: PitchClass::ALL
                .into_iter()
                .filter(|pc| !pc.is_accidental())
                .map(String::from)
                .collect(),
            note_colors: BTreeMap::new(),
            unknown: BTreeMap::new(),
        }
    }
}

impl TrainerConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        let config = Self::from_json(&data)?;
        info!(path = %path.display(), "loaded trainer config");
        Ok(config)
    }

    /// The config file to read, if any: `$FRETBOARD_CONFIG`, or
    /// `fretboard.json` when it exists in the working directory.
    pub fn locate() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }
        let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
        fallback.exists().then_some(fallback)
    }
}

impl TrainerState {
    /// Initial session state from a config, sanitizing every field.
    pub fn from_config(config: &TrainerConfig) -> Self {
        for key in config.unknown.keys() {
            warn!(key = key.as_str(), "ignoring unknown config key");
        }

        let start = clamp_fret("start_fret", config.start_fret);
        let end = clamp_fret("end_fret", config.end_fret);
        let range = FretRange::new(start, end);
        if range.end() != end {
            warn!(start, end, "end_fret raised to the start fret");
        }

        let preset: TuningPreset = keyword_or_default("tuning", &config.tuning);
        let notation: NotationMode = keyword_or_default("notation", &config.notation);
        let spelling: Spelling = keyword_or_default("spelling", &config.spelling);

        let selected_notes = config
            .selected_notes
            .iter()
            .filter_map(|name| match name.parse::<PitchClass>() {
                Ok(pc) => Some(pc),
                Err(e) => {
                    warn!("skipping selected note: {e}");
                    None
                }
            })
            .collect();

        let mut note_colors = NoteColors::default();
        for (name, hex) in &config.note_colors {
            match (name.parse::<PitchClass>(), Color::from_hex(hex)) {
                (Ok(pc), Ok(color)) => note_colors.set(pc, color),
                (Err(e), _) | (_, Err(e)) => warn!("skipping note color {name:?}: {e}"),
            }
        }

        Self::with_settings(
            range,
            preset,
            selected_notes,
            note_colors,
            NoteNotations::uniform(spelling),
            notation,
        )
    }
}

fn clamp_fret(field: &str, value: i64) -> u8 {
    let clamped = value.clamp(0, i64::from(MAX_FRET)) as u8;
    if i64::from(clamped) != value {
        warn!(field, value, "fret clamped to {clamped}");
    }
    clamped
}

/// Parses a string setting through its serde form, or warns and defaults.
fn keyword_or_default<T: DeserializeOwned + Default>(field: &str, value: &str) -> T {
    serde_json::from_value(Value::String(value.to_owned())).unwrap_or_else(|e| {
        warn!(field, value, "{e}; using the default");
        T::default()
    })
}
