//! Word-cloud rendering for Korean text
//!
//! Raw text is normalized into tokens, counted into a ranked frequency table
//! and handed to a word placer together with a shape mask and a color rule.
//! The result is a PNG image plus the table that produced it.

#![forbid(unsafe_code)]

/// Configuration, errors, fonts, persistence and file output
pub mod io;
/// Curves and spiral paths used by masks and placement
pub mod math;
/// Request orchestration and per-caller sessions
pub mod pipeline;
/// Colors, glyph rasterization and word placement
pub mod render;
/// Masks and occupancy tracking
pub mod spatial;
/// Tokenization, noun extraction and frequency ranking
pub mod text;

pub use io::error::{CloudError, Result};
