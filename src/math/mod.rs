//! Mathematical utilities for masks and layout

/// Parametric shape outlines
pub mod curves;
/// Spiral position search
pub mod spiral;
