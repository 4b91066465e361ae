//! Word coloring, glyph rasterization and layout invocation

/// Color strategies and color parsing
pub mod color;
/// Word rasterization
pub mod glyph;
/// Word placer capability and the bundled spiral placer
pub mod layout;

pub use color::{ColorStrategy, WordColor};
pub use layout::{LayoutJob, LayoutSettings, SpiralPlacer, WordPlacer, invoke_layout};
