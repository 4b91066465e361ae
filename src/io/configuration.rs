//! Pipeline constants and runtime configuration defaults

use crate::text::normalize::{Script, TokenPolicy};
use std::path::PathBuf;

// Mask geometry
/// Border left unpainted around rectangle and circle masks
pub const MASK_PADDING: u32 = 10;
/// Number of samples taken along the heart curve
pub const HEART_SAMPLES: usize = 200;

/// Maximum number of ranked entries exposed to callers
pub const RANKED_TABLE_CAP: usize = 100;

// Minimum token lengths, counted in characters
/// Minimum token length on the simple normalizer path
pub const FALLBACK_MIN_TOKEN_CHARS: usize = 2;
/// Minimum token length for tokens returned by the analysis service
pub const ANALYZER_MIN_TOKEN_CHARS: usize = 1;

// Layout defaults handed to the word placer
/// Fraction of words laid out horizontally
pub const PREFER_HORIZONTAL: f32 = 0.7;
/// Smallest font size the placer may shrink a word to
pub const MIN_FONT_SIZE: f32 = 10.0;
/// Font size of the most frequent word
pub const MAX_FONT_SIZE: f32 = 200.0;
/// Weight of relative frequency when sizing consecutive words
pub const RELATIVE_SCALING: f32 = 0.5;
/// Font size decrement when a word does not fit
pub const FONT_STEP: f32 = 1.0;
/// Empty pixels kept around every placed word
pub const WORD_MARGIN: u32 = 2;
/// Spiral positions tried per word, size and orientation
pub const MAX_SPIRAL_STEPS: usize = 30_000;

/// Fixed seed for reproducible layouts
pub const DEFAULT_SEED: u64 = 42;

// Request defaults
/// Default canvas width in pixels
pub const DEFAULT_WIDTH: u32 = 800;
/// Default canvas height in pixels
pub const DEFAULT_HEIGHT: u32 = 400;
/// Default number of words drawn
pub const DEFAULT_MAX_WORDS: usize = 200;
/// Default canvas background
pub const DEFAULT_BACKGROUND: &str = "white";

// Font resolution
/// Font used when the requested one is missing
pub const DEFAULT_FALLBACK_FONT: &str = "NanumGothic.ttf";
/// Directory scanned for fonts when none is configured
#[cfg(windows)]
pub const DEFAULT_FONT_DIR: &str = r"C:\Windows\Fonts";
/// Directory scanned for fonts when none is configured
#[cfg(not(windows))]
pub const DEFAULT_FONT_DIR: &str = "/usr/share/fonts/truetype";

// Output settings
/// Suffix added to rendered image filenames
pub const OUTPUT_SUFFIX: &str = "_cloud";
/// Input files are plain text with this extension
pub const INPUT_EXTENSION: &str = "txt";
/// Timeout for calls to the analysis service
pub const ANALYZER_TIMEOUT_SECS: u64 = 10;

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;

// Environment variables read by `ServiceConfig::from_env`
/// Font directory override
pub const ENV_FONT_DIR: &str = "WORDMASK_FONT_DIR";
/// Fallback font path override
pub const ENV_FALLBACK_FONT: &str = "WORDMASK_FALLBACK_FONT";
/// Analysis service endpoint; the service is disabled when unset
pub const ENV_ANALYZER_URL: &str = "WORDMASK_ANALYZER_URL";
/// Bearer token sent to the analysis service
pub const ENV_ANALYZER_TOKEN: &str = "WORDMASK_ANALYZER_TOKEN";
/// Normalizer alphabet, `hangul` or `hangul-latin`
pub const ENV_SCRIPT: &str = "WORDMASK_SCRIPT";

/// Connection details for the linguistic-analysis service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzerConfig {
    /// Endpoint receiving `{"text": ...}` posts
    pub endpoint: String,
    /// Optional bearer token
    pub token: Option<String>,
}

/// Deployment settings for collaborators outside the core pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Directory searched for requested fonts
    pub font_dir: PathBuf,
    /// Font used when the requested one is missing
    pub fallback_font: PathBuf,
    /// Analysis service, if one is configured
    pub analyzer: Option<AnalyzerConfig>,
    /// Tokenization policy
    pub token_policy: TokenPolicy,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        let font_dir = PathBuf::from(DEFAULT_FONT_DIR);
        let fallback_font = font_dir.join(DEFAULT_FALLBACK_FONT);
        Self {
            font_dir,
            fallback_font,
            analyzer: None,
            token_policy: TokenPolicy::default(),
        }
    }
}

impl ServiceConfig {
    /// Build a configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup
    ///
    /// Empty values are treated as unset. Unknown script names keep the
    /// default policy.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(dir) = get(ENV_FONT_DIR) {
            config.font_dir = PathBuf::from(dir);
            config.fallback_font = config.font_dir.join(DEFAULT_FALLBACK_FONT);
        }
        if let Some(font) = get(ENV_FALLBACK_FONT) {
            config.fallback_font = PathBuf::from(font);
        }

        config.analyzer = get(ENV_ANALYZER_URL).map(|endpoint| AnalyzerConfig {
            endpoint,
            token: get(ENV_ANALYZER_TOKEN),
        });

        if let Some(script) = get(ENV_SCRIPT).and_then(|name| Script::from_name(&name)) {
            config.token_policy.script = script;
        }

        config
    }
}
