//! Render orchestration from raw text to a packaged response
//!
//! A render walks `Received → Normalized → Masked → Ranked → Rendered →
//! Packaged`. Any fatal error moves it to `Failed` and is reported together
//! with the stage it interrupted. Persistence is the only stage after
//! `Rendered` that may fail. Non-fatal persistence errors degrade to a
//! missing identifier, as non-fatal analysis errors degrade to the simple
//! tokenizer.

use crate::io::configuration::ServiceConfig;
use crate::io::error::{CloudError, Result, invalid_parameter};
use crate::io::fonts::FontLocator;
use crate::io::image::encode_png;
use crate::io::repository::{WordCloudId, WordCloudRepository};
use crate::pipeline::request::{RenderRequest, RenderResponse, RenderResult};
use crate::render::layout::{LayoutJob, LayoutSettings, SpiralPlacer, WordPlacer, invoke_layout};
use crate::spatial::mask::generate_mask;
use crate::text::analyzer::{HttpNounExtractor, NounExtractor};
use crate::text::frequency::{FrequencyTable, rank};
use crate::text::normalize::Normalizer;
use log::{debug, error, warn};
use std::fmt;

/// Progress marker of a single render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Request accepted, nothing done yet
    Received,
    /// Tokens extracted
    Normalized,
    /// Placement mask built
    Masked,
    /// Frequency table built
    Ranked,
    /// Canvas drawn
    Rendered,
    /// PNG encoded and table stored
    Packaged,
    /// Aborted
    Failed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Received => "received",
            Self::Normalized => "normalized",
            Self::Masked => "masked",
            Self::Ranked => "ranked",
            Self::Rendered => "rendered",
            Self::Packaged => "packaged",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// A fatal error together with the last stage the render completed
#[derive(Debug)]
pub struct RenderFailure {
    /// Last stage reached before the error
    pub stage: Stage,
    /// What went wrong
    pub error: CloudError,
}

impl fmt::Display for RenderFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "render failed after stage '{}': {}", self.stage, self.error)
    }
}

impl std::error::Error for RenderFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

/// Stateless render pipeline with injected collaborators
///
/// The service holds no per-request state and can be shared between threads;
/// callers that need the most recent table use a
/// [`RenderSession`](crate::pipeline::session::RenderSession).
pub struct RenderService {
    normalizer: Normalizer,
    analyzer: Option<Box<dyn NounExtractor>>,
    placer: Box<dyn WordPlacer>,
    fonts: FontLocator,
    repository: Option<Box<dyn WordCloudRepository>>,
}

impl RenderService {
    /// Service without analyzer or repository
    pub fn new(normalizer: Normalizer, placer: Box<dyn WordPlacer>, fonts: FontLocator) -> Self {
        Self {
            normalizer,
            analyzer: None,
            placer,
            fonts,
            repository: None,
        }
    }

    /// Use a linguistic-analysis service before falling back to the normalizer
    #[must_use]
    pub fn with_analyzer(mut self, analyzer: Box<dyn NounExtractor>) -> Self {
        self.analyzer = Some(analyzer);
        self
    }

    /// Store every rendered table in `repository`
    #[must_use]
    pub fn with_repository(mut self, repository: Box<dyn WordCloudRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Service wired from deployment settings with the bundled spiral placer
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The token policy cannot be compiled
    /// - The configured analysis client cannot be built
    pub fn from_config(config: &ServiceConfig, settings: LayoutSettings) -> Result<Self> {
        let normalizer = Normalizer::new(config.token_policy)?;
        let service = Self::new(
            normalizer,
            Box::new(SpiralPlacer::new(settings)),
            FontLocator::from_config(config),
        );

        match &config.analyzer {
            Some(analyzer) => {
                debug!("Using analysis service at {}", analyzer.endpoint);
                Ok(service.with_analyzer(Box::new(HttpNounExtractor::new(analyzer.clone())?)))
            }
            None => Ok(service),
        }
    }

    /// Persistence collaborator, if one is attached
    pub fn repository(&self) -> Option<&dyn WordCloudRepository> {
        self.repository.as_deref()
    }

    /// Font locator used to resolve requested fonts
    pub const fn fonts(&self) -> &FontLocator {
        &self.fonts
    }

    /// Turn raw text into tokens
    ///
    /// Tries the analysis service first when one is attached. A non-fatal
    /// analysis error or an answer with no eligible nouns falls back to the
    /// normalizer.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The analyzer fails with a fatal error
    /// - No token survives normalization ([`CloudError::EmptyInput`])
    pub fn tokenize(&self, text: &str) -> Result<Vec<String>> {
        if let Some(analyzer) = &self.analyzer {
            match analyzer.extract_nouns(text) {
                Ok(nouns) => {
                    let tokens = self.normalizer.filter_tokens(nouns);
                    if !tokens.is_empty() {
                        return Ok(tokens);
                    }
                    warn!("Analysis service returned no eligible nouns, using simple tokenizer");
                }
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => warn!("{e}; using simple tokenizer"),
            }
        }
        self.normalizer.normalize(text)
    }

    /// Run the full pipeline for one request
    ///
    /// # Errors
    ///
    /// Returns a [`RenderFailure`] if:
    /// - The canvas size is zero or `max_words` is zero
    /// - The text yields no eligible tokens
    /// - The analyzer or repository fails with a fatal error
    /// - The placer fails
    /// - The image cannot be encoded
    pub fn render(&self, request: &RenderRequest) -> std::result::Result<RenderResult, RenderFailure> {
        let mut stage = Stage::Received;
        debug!(
            "Render received: {} characters, {}x{} {} mask, {} colors",
            request.text.chars().count(),
            request.width,
            request.height,
            request.mask_shape.name(),
            request.color_strategy.name()
        );

        self.run(request, &mut stage).map_err(|error| {
            debug!("Render stage {stage} -> {}", Stage::Failed);
            error!("Render failed after stage '{stage}': {error}");
            RenderFailure { stage, error }
        })
    }

    /// Run the pipeline and convert the outcome into a response payload
    pub fn respond(&self, request: &RenderRequest) -> RenderResponse {
        match self.render(request) {
            Ok(result) => RenderResponse::success(&result),
            Err(failure) => RenderResponse::failure(&failure),
        }
    }

    fn run(&self, request: &RenderRequest, stage: &mut Stage) -> Result<RenderResult> {
        validate(request)?;

        let tokens = self.tokenize(&request.text)?;
        advance(stage, Stage::Normalized);

        let mask = generate_mask(request.mask_shape, request.width, request.height)?;
        advance(stage, Stage::Masked);

        let table = rank(&tokens);
        advance(stage, Stage::Ranked);

        let font_path = self.fonts.resolve(request.font.as_deref());
        let job = LayoutJob {
            words: table.entries(),
            mask: &mask,
            max_words: request.max_words,
            background: &request.background_color,
            colors: request.color_strategy,
            font_path: &font_path,
        };
        let layout = invoke_layout(self.placer.as_ref(), &job)?;
        advance(stage, Stage::Rendered);

        let png = encode_png(&layout.image)?;
        let wordcloud_id = self.persist(request, &table)?;
        advance(stage, Stage::Packaged);

        Ok(RenderResult {
            png,
            table,
            wordcloud_id,
            placed_words: layout.words.len(),
        })
    }

    fn persist(&self, request: &RenderRequest, table: &FrequencyTable) -> Result<Option<WordCloudId>> {
        let Some(repository) = &self.repository else {
            return Ok(None);
        };
        let name = request.name.as_deref().unwrap_or_else(|| {
            table
                .entries()
                .first()
                .map_or("wordcloud", |entry| entry.word.as_str())
        });

        match repository.store(name, table.ranked()) {
            Ok(id) => Ok(Some(id)),
            Err(e) if e.is_fatal() => Err(e),
            Err(e) => {
                warn!("{e}; continuing without a stored id");
                Ok(None)
            }
        }
    }
}

fn advance(stage: &mut Stage, next: Stage) {
    debug!("Render stage {stage} -> {next}");
    *stage = next;
}

fn validate(request: &RenderRequest) -> Result<()> {
    if request.width == 0 || request.height == 0 {
        return Err(CloudError::MaskGeneration {
            width: request.width,
            height: request.height,
        });
    }
    if request.max_words == 0 {
        return Err(invalid_parameter(
            "max_words",
            &request.max_words,
            &"must be at least 1",
        ));
    }
    if request.text.trim().is_empty() {
        return Err(CloudError::EmptyInput {
            input_chars: request.text.chars().count(),
        });
    }
    Ok(())
}
