//! # Widgets Module
//!
//! Custom canvas widgets.

pub mod fretboard_canvas;
