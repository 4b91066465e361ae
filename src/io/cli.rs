//! Command-line interface for batch rendering of text files

use crate::io::configuration::{
    DEFAULT_BACKGROUND, DEFAULT_HEIGHT, DEFAULT_MAX_WORDS, DEFAULT_SEED, DEFAULT_WIDTH,
    ENV_FONT_DIR, INPUT_EXTENSION, OUTPUT_SUFFIX, ServiceConfig,
};
use crate::io::error::{Result, file_system_error, invalid_parameter};
use crate::io::image::save_png;
use crate::io::progress::ProgressManager;
use crate::io::repository::InMemoryRepository;
use crate::pipeline::orchestrator::RenderService;
use crate::pipeline::request::{RenderRequest, RenderResponse};
use crate::pipeline::session::RenderSession;
use crate::render::color::ColorStrategy;
use crate::render::layout::LayoutSettings;
use crate::spatial::mask::MaskShape;
use clap::Parser;
use log::{error, info};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "wordmask")]
#[command(author, version, about = "Render word clouds from Korean text files")]
/// Command-line arguments for the word-cloud renderer
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Input text file or directory of .txt files
    #[arg(value_name = "TARGET", required_unless_present = "list_fonts")]
    pub target: Option<PathBuf>,

    /// Random seed for reproducible layouts
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Canvas width in pixels
    #[arg(short = 'w', long, default_value_t = DEFAULT_WIDTH)]
    pub width: u32,

    /// Canvas height in pixels
    #[arg(short = 'H', long, default_value_t = DEFAULT_HEIGHT)]
    pub height: u32,

    /// Mask outline: rectangle, circle or heart
    #[arg(short, long, default_value = "rectangle")]
    pub mask: String,

    /// Coloring: single_color, random_color or gradient_color
    #[arg(short, long, default_value = "single_color")]
    pub colors: String,

    /// Background color as a CSS name or hex string
    #[arg(short, long, default_value = DEFAULT_BACKGROUND)]
    pub background: String,

    /// Maximum number of words drawn
    #[arg(short = 'n', long, default_value_t = DEFAULT_MAX_WORDS)]
    pub max_words: usize,

    /// Font file name inside the font directory
    #[arg(short, long)]
    pub font: Option<String>,

    /// Font directory, overriding the environment
    #[arg(long)]
    pub font_dir: Option<PathBuf>,

    /// Cycle the vocabulary until the word budget is used
    #[arg(short, long)]
    pub repeat: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process files even if output exists
    #[arg(long)]
    pub no_skip: bool,

    /// Also write the frequency table as <name>_cloud.csv
    #[arg(short, long)]
    pub export: bool,

    /// Also write the response payload as <name>_cloud.json
    #[arg(short, long)]
    pub json: bool,

    /// Print the font catalogue as JSON and exit
    #[arg(long)]
    pub list_fonts: bool,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Layout knobs implied by the arguments
    pub fn layout_settings(&self) -> LayoutSettings {
        LayoutSettings {
            seed: self.seed,
            repeat: self.repeat,
            ..LayoutSettings::default()
        }
    }

    /// Render request for one input text
    pub fn request_for(&self, text: String, name: Option<String>) -> RenderRequest {
        RenderRequest {
            text,
            background_color: self.background.clone(),
            color_strategy: ColorStrategy::resolve(&self.colors),
            mask_shape: MaskShape::from_name(&self.mask),
            width: self.width,
            height: self.height,
            max_words: self.max_words,
            font: self.font.clone(),
            name,
        }
    }

    /// Service configuration from the environment with argument overrides
    pub fn service_config(&self) -> ServiceConfig {
        self.service_config_with(|key| std::env::var(key).ok())
    }

    /// Service configuration from `lookup` with argument overrides
    ///
    /// `--font-dir` takes the place of the font directory variable, so the
    /// fallback font moves with it unless it is set on its own.
    pub fn service_config_with(&self, lookup: impl Fn(&str) -> Option<String>) -> ServiceConfig {
        ServiceConfig::from_lookup(|key| match (key, &self.font_dir) {
            (ENV_FONT_DIR, Some(dir)) => Some(dir.to_string_lossy().into_owned()),
            _ => lookup(key),
        })
    }
}

/// Orchestrates batch rendering of text files with progress tracking
pub struct FileProcessor {
    cli: Cli,
    service: RenderService,
    session: RenderSession,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a processor with a service built from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if the render service cannot be configured
    pub fn new(cli: Cli) -> Result<Self> {
        let service = RenderService::from_config(&cli.service_config(), cli.layout_settings())?
            .with_repository(Box::new(InMemoryRepository::new()));
        Ok(Self::with_service(cli, service))
    }

    /// Create a processor around an existing service
    pub fn with_service(cli: Cli, service: RenderService) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            service,
            session: RenderSession::new(),
            progress_manager,
        }
    }

    /// Session holding the table of the last rendered file
    pub const fn session(&self) -> &RenderSession {
        &self.session
    }

    /// Write the catalogue of the service's font directory as JSON
    ///
    /// # Errors
    ///
    /// Returns an error if the font directory cannot be read or the
    /// catalogue cannot be written
    pub fn write_font_catalogue(&self, writer: &mut impl Write) -> Result<()> {
        let fonts = self.service.fonts();
        let catalogue = fonts.catalogue()?;
        serde_json::to_writer_pretty(&mut *writer, &catalogue)
            .map_err(std::io::Error::from)
            .and_then(|()| writeln!(writer))
            .map_err(file_system_error(fonts.directory(), "write font catalogue"))
    }

    /// Render every selected file
    ///
    /// Files whose render fails are reported and skipped; the count of
    /// failures is returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the target is invalid or an output cannot be written
    pub fn process(&mut self) -> Result<usize> {
        let files = self.collect_files()?;

        if files.is_empty() {
            return Ok(0);
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        let mut failures = 0;
        for (index, file) in files.iter().enumerate() {
            if !self.process_file(file, index)? {
                failures += 1;
            }
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }

        info!(
            "Rendered {} of {} files",
            files.len() - failures,
            files.len()
        );
        Ok(failures)
    }

    /// Files the batch will render, sorted by path
    ///
    /// # Errors
    ///
    /// Returns an error if the target is missing or is neither a text file nor
    /// a directory
    pub fn collect_files(&self) -> Result<Vec<PathBuf>> {
        let Some(target) = &self.cli.target else {
            return Err(invalid_parameter(
                "target",
                &"<none>",
                &"a .txt file or directory is required",
            ));
        };
        if target.is_file() {
            if is_text_file(target) {
                Ok(self
                    .should_process_file(target)
                    .then(|| target.clone())
                    .into_iter()
                    .collect())
            } else {
                Err(invalid_parameter(
                    "target",
                    &target.display(),
                    &"target file must be a .txt file",
                ))
            }
        } else if target.is_dir() {
            let mut files = Vec::new();
            let entries =
                std::fs::read_dir(target).map_err(file_system_error(target, "read directory"))?;
            for entry in entries {
                let path = entry
                    .map_err(file_system_error(target, "read directory"))?
                    .path();
                if is_text_file(&path) && self.should_process_file(&path) {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(invalid_parameter(
                "target",
                &target.display(),
                &"target must be a .txt file or directory",
            ))
        }
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output_path = output_path(input_path, "png");
        if output_path.exists() {
            // Allow print for user feedback for progress messages
            #[allow(clippy::print_stderr)]
            if !self.cli.quiet {
                eprintln!("Skipping: {} (output exists)", input_path.display());
            }
            false
        } else {
            true
        }
    }

    fn process_file(&mut self, input_path: &Path, index: usize) -> Result<bool> {
        let start_time = Instant::now();

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_file(index, input_path);
        }

        let text = std::fs::read_to_string(input_path)
            .map_err(file_system_error(input_path, "read text"))?;
        let name = input_path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned());
        let request = self.cli.request_for(text, name);

        let (response, rendered) = match self.session.render_result(&self.service, &request) {
            Ok(result) => {
                save_png(&result.png, &output_path(input_path, "png"))?;
                if self.cli.export {
                    self.session.export_last(&output_path(input_path, "csv"))?;
                }
                if let Some(ref mut pm) = self.progress_manager {
                    pm.complete_file(index, result.placed_words, start_time.elapsed());
                }
                (RenderResponse::success(&result), true)
            }
            Err(failure) => {
                error!("{}: {failure}", input_path.display());
                if let Some(ref mut pm) = self.progress_manager {
                    pm.fail_file(index);
                }
                (RenderResponse::failure(&failure), false)
            }
        };

        if self.cli.json {
            write_response(&response, &output_path(input_path, "json"))?;
        }

        Ok(rendered)
    }
}

fn is_text_file(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some(INPUT_EXTENSION)
}

/// Output path next to the input: `<stem>_cloud.<extension>`
pub fn output_path(input_path: &Path, extension: &str) -> PathBuf {
    let stem = input_path.file_stem().unwrap_or_default();
    let output_name = format!("{}{}.{}", stem.to_string_lossy(), OUTPUT_SUFFIX, extension);

    if let Some(parent) = input_path.parent() {
        parent.join(output_name)
    } else {
        PathBuf::from(output_name)
    }
}

fn write_response(response: &RenderResponse, path: &Path) -> Result<()> {
    let file = File::create(path).map_err(file_system_error(path, "create response"))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, response)
        .map_err(std::io::Error::from)
        .and_then(|()| writer.flush())
        .map_err(file_system_error(path, "write response"))
}
