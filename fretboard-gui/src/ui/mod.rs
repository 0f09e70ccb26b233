//! # UI Module
//!
//! Layout and controls around the fretboard canvas.

pub mod main_display;
pub mod note_toggle;
