//! Text processing: normalization, noun extraction and frequency ranking

/// Optional linguistic-analysis service
pub mod analyzer;
/// Word frequency ranking
pub mod frequency;
/// Character filtering and token splitting
pub mod normalize;

pub use frequency::{FrequencyEntry, FrequencyTable, rank};
pub use normalize::{Normalizer, Script, TokenPolicy};
