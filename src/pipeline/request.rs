//! Render requests, results and the JSON response payload

use crate::io::configuration::{
    DEFAULT_BACKGROUND, DEFAULT_HEIGHT, DEFAULT_MAX_WORDS, DEFAULT_WIDTH,
};
use crate::io::image::to_base64;
use crate::io::repository::WordCloudId;
use crate::pipeline::orchestrator::RenderFailure;
use crate::render::color::ColorStrategy;
use crate::spatial::mask::MaskShape;
use crate::text::frequency::{FrequencyEntry, FrequencyTable};
use serde::{Deserialize, Serialize};

/// Parameters for one word-cloud render
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RenderRequest {
    /// Free-form input text
    pub text: String,
    /// Background as a CSS name or hex string
    pub background_color: String,
    /// Coloring rule
    #[serde(rename = "color_func")]
    pub color_strategy: ColorStrategy,
    /// Mask outline
    #[serde(rename = "mask_type")]
    pub mask_shape: MaskShape,
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
    /// Upper bound on drawn words
    pub max_words: usize,
    /// Font file name inside the font directory
    pub font: Option<String>,
    /// Name used when persisting the table
    pub name: Option<String>,
}

impl Default for RenderRequest {
    fn default() -> Self {
        Self {
            text: String::new(),
            background_color: DEFAULT_BACKGROUND.to_owned(),
            color_strategy: ColorStrategy::default(),
            mask_shape: MaskShape::default(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            max_words: DEFAULT_MAX_WORDS,
            font: None,
            name: None,
        }
    }
}

impl RenderRequest {
    /// Request with default settings for `text`
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }
}

/// Successful render output
#[derive(Debug, Clone, PartialEq)]
pub struct RenderResult {
    /// PNG-encoded image
    pub png: Vec<u8>,
    /// Full frequency table
    pub table: FrequencyTable,
    /// Identifier assigned by the repository, if storing succeeded
    pub wordcloud_id: Option<WordCloudId>,
    /// Number of words the placer drew
    pub placed_words: usize,
}

impl RenderResult {
    /// Capped, ranked view of the table
    pub fn ranked(&self) -> &[FrequencyEntry] {
        self.table.ranked()
    }

    /// PNG bytes as base64
    pub fn image_base64(&self) -> String {
        to_base64(&self.png)
    }
}

/// Structured outcome handed to transport layers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderResponse {
    /// Whether an image was produced
    pub success: bool,
    /// Human-readable status
    pub message: String,
    /// Base64 PNG, present only on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Ranked table, empty on failure
    pub words: Vec<FrequencyEntry>,
    /// Persisted identifier, null when unavailable
    pub wordcloud_id: Option<WordCloudId>,
}

impl RenderResponse {
    /// Response for a successful render
    pub fn success(result: &RenderResult) -> Self {
        Self {
            success: true,
            message: format!(
                "Rendered {} words from {} tokens",
                result.placed_words,
                result.table.total()
            ),
            image: Some(result.image_base64()),
            words: result.ranked().to_vec(),
            wordcloud_id: result.wordcloud_id,
        }
    }

    /// Response for a failed render
    pub fn failure(failure: &RenderFailure) -> Self {
        Self {
            success: false,
            message: failure.error.to_string(),
            image: None,
            words: Vec::new(),
            wordcloud_id: None,
        }
    }
}
