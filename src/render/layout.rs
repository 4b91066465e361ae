//! Word placement behind a swappable capability
//!
//! The core hands a [`LayoutJob`] to a [`WordPlacer`] and gets a raster
//! back. [`SpiralPlacer`] is the bundled placer: words are sized from their
//! relative frequency, searched for along a spiral from the canvas center,
//! and shrunk one step at a time until they fit or fall below the minimum
//! font size, at which point layout stops.

use crate::io::configuration::{
    DEFAULT_SEED, FONT_STEP, MAX_FONT_SIZE, MAX_SPIRAL_STEPS, MIN_FONT_SIZE, PREFER_HORIZONTAL,
    RELATIVE_SCALING, WORD_MARGIN,
};
use crate::io::error::{CloudError, Result, render_error};
use crate::math::spiral::ArchimedeanSpiral;
use crate::render::color::{ColorStrategy, WordColor, WordStyle, parse_color};
use crate::render::glyph::GlyphSprite;
use crate::spatial::mask::Mask;
use crate::spatial::occupancy::OccupancyGrid;
use crate::text::frequency::FrequencyEntry;
use fontdue::{Font, FontSettings};
use image::{Pixel, Rgba, RgbaImage};
use ndarray::Array2;
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::path::Path;

/// Knobs passed through to the placer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutSettings {
    /// Probability that a word is tried horizontally first
    pub prefer_horizontal: f32,
    /// Words are never drawn smaller than this
    pub min_font_size: f32,
    /// Font size of the most frequent word
    ///
    /// Capped at the canvas height.
    pub max_font_size: f32,
    /// 0 sizes by rank only, 1 sizes proportionally to frequency
    pub relative_scaling: f32,
    /// Shrink applied when a word does not fit
    pub font_step: f32,
    /// Empty pixels kept around each word
    pub margin: u32,
    /// Cycle the vocabulary until `max_words` words are drawn
    pub repeat: bool,
    /// Seed for orientation, spiral direction and random colors
    pub seed: u64,
    /// Spiral positions tried per attempt
    pub max_spiral_steps: usize,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            prefer_horizontal: PREFER_HORIZONTAL,
            min_font_size: MIN_FONT_SIZE,
            max_font_size: MAX_FONT_SIZE,
            relative_scaling: RELATIVE_SCALING,
            font_step: FONT_STEP,
            margin: WORD_MARGIN,
            repeat: false,
            seed: DEFAULT_SEED,
            max_spiral_steps: MAX_SPIRAL_STEPS,
        }
    }
}

/// Everything a placer needs for one image
#[derive(Debug, Clone, Copy)]
pub struct LayoutJob<'a> {
    /// Ranked words, most frequent first
    pub words: &'a [FrequencyEntry],
    /// Placement mask; its size is the canvas size
    pub mask: &'a Mask,
    /// Upper bound on drawn words
    pub max_words: usize,
    /// Background color as a CSS name or hex string
    pub background: &'a str,
    /// Coloring rule
    pub colors: ColorStrategy,
    /// Font file used for every word
    pub font_path: &'a Path,
}

/// One word as drawn on the canvas
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedWord {
    /// Word text
    pub word: String,
    /// Font size used
    pub font_size: f32,
    /// Left edge of the word's box
    pub x: u32,
    /// Top edge of the word's box
    pub y: u32,
    /// Box width
    pub width: u32,
    /// Box height
    pub height: u32,
    /// Whether the word reads left to right
    pub horizontal: bool,
    /// Color it was drawn in
    pub color: WordColor,
}

/// Placer output
#[derive(Debug, Clone)]
pub struct Layout {
    /// Rendered canvas
    pub image: RgbaImage,
    /// Words in drawing order
    pub words: Vec<PlacedWord>,
}

/// External word-placement capability
pub trait WordPlacer: Send + Sync {
    /// Lay out and draw the job's words
    ///
    /// # Errors
    ///
    /// Returns an error if the font cannot be used, the vocabulary is empty
    /// or no word fits the mask
    fn place(&self, job: &LayoutJob<'_>) -> Result<Layout>;
}

/// Run a placer, reporting every failure as [`CloudError::Render`]
///
/// # Errors
///
/// Returns [`CloudError::Render`] wrapping whatever the placer reported
pub fn invoke_layout(placer: &dyn WordPlacer, job: &LayoutJob<'_>) -> Result<Layout> {
    placer.place(job).map_err(|error| match error {
        CloudError::Render { .. } => error,
        other => render_error(&other),
    })
}

/// Spiral-search placer drawing glyphs with `fontdue`
#[derive(Debug, Clone, Default)]
pub struct SpiralPlacer {
    settings: LayoutSettings,
}

struct Spot {
    sprite: GlyphSprite,
    footprint: Array2<bool>,
    x: i64,
    y: i64,
    horizontal: bool,
}

impl SpiralPlacer {
    /// Placer using the given knobs
    pub const fn new(settings: LayoutSettings) -> Self {
        Self { settings }
    }

    /// Knobs this placer runs with
    pub const fn settings(&self) -> &LayoutSettings {
        &self.settings
    }

    /// Words to draw with their frequency relative to the most frequent one
    fn vocabulary<'w>(&self, words: &'w [FrequencyEntry], max_words: usize) -> Vec<(&'w str, f32)> {
        let Some(max_frequency) = words.first().map(|entry| entry.frequency as f32) else {
            return Vec::new();
        };

        let mut vocabulary: Vec<(&str, f32)> = words
            .iter()
            .take(max_words)
            .map(|entry| (entry.word.as_str(), entry.frequency as f32 / max_frequency))
            .collect();

        if self.settings.repeat && !vocabulary.is_empty() && vocabulary.len() < max_words {
            let first_pass = vocabulary.clone();
            let tail = first_pass.last().map_or(1.0, |&(_, rel)| rel);
            let mut round = 1;
            while vocabulary.len() < max_words {
                let damping = tail.powi(round);
                let remaining = max_words - vocabulary.len();
                vocabulary.extend(
                    first_pass
                        .iter()
                        .take(remaining)
                        .map(|&(word, rel)| (word, rel * damping)),
                );
                round += 1;
            }
        }

        vocabulary
    }

    fn find_spot(
        &self,
        font: &Font,
        word: &str,
        font_size: f32,
        horizontal: bool,
        grid: &OccupancyGrid,
        rng: &mut StdRng,
    ) -> Option<Spot> {
        let sprite = GlyphSprite::rasterize(font, word, font_size)?;
        let sprite = if horizontal { sprite } else { sprite.rotated() };
        let footprint = sprite.footprint(self.settings.margin);
        let (rows, cols) = footprint.dim();
        let (box_w, box_h) = (cols as u32, rows as u32);
        if box_w > grid.width() || box_h > grid.height() {
            return None;
        }

        let start_x = i64::from(grid.width() / 2) - i64::from(box_w / 2);
        let start_y = i64::from(grid.height() / 2) - i64::from(box_h / 2);
        let clockwise = rng.random_bool(0.5);

        ArchimedeanSpiral::new(grid.width(), grid.height(), clockwise)
            .take(self.settings.max_spiral_steps)
            .map(|(dx, dy)| (start_x + i64::from(dx), start_y + i64::from(dy)))
            .find(|&(x, y)| grid.region_is_free(x, y, box_w, box_h))
            .map(|(x, y)| Spot {
                sprite,
                footprint,
                x,
                y,
                horizontal,
            })
    }

    /// Try the preferred orientation, then the other one, shrinking the font
    /// until something fits
    fn fit_word(
        &self,
        font: &Font,
        word: &str,
        font_size: &mut f32,
        grid: &OccupancyGrid,
        rng: &mut StdRng,
    ) -> Option<Spot> {
        let prefer = self.settings.prefer_horizontal.clamp(0.0, 1.0);
        let horizontal_first = rng.random_bool(f64::from(prefer));
        let attempts = if prefer > 0.0 && prefer < 1.0 { 2 } else { 1 };
        let orientations = [horizontal_first, !horizontal_first];

        while *font_size >= self.settings.min_font_size {
            for &horizontal in orientations.iter().take(attempts) {
                if let Some(spot) = self.find_spot(font, word, *font_size, horizontal, grid, rng) {
                    return Some(spot);
                }
            }
            *font_size -= self.settings.font_step.max(1.0);
        }
        None
    }
}

impl WordPlacer for SpiralPlacer {
    fn place(&self, job: &LayoutJob<'_>) -> Result<Layout> {
        let background = parse_color(job.background).ok_or_else(|| {
            render_error(&format!("unrecognized background color '{}'", job.background))
        })?;

        let vocabulary = self.vocabulary(job.words, job.max_words);
        if vocabulary.is_empty() {
            return Err(render_error(&"no words left to lay out"));
        }

        let font = load_font(job.font_path)?;
        let (width, height) = (job.mask.width(), job.mask.height());
        let mut canvas = RgbaImage::from_pixel(width, height, background);
        let mut grid = OccupancyGrid::from_mask(job.mask);
        let mut rng = StdRng::seed_from_u64(self.settings.seed);

        let scaling = self.settings.relative_scaling;
        // A word taller than the canvas never fits
        let mut font_size = self.settings.max_font_size.min(height as f32);
        let mut last_rel = 1.0f32;
        let mut placed = Vec::new();

        for (word, rel) in vocabulary {
            if scaling.abs() > f32::EPSILON && last_rel > 0.0 {
                font_size = (scaling.mul_add(rel / last_rel, 1.0 - scaling) * font_size).round();
            }

            let Some(spot) = self.fit_word(&font, word, &mut font_size, &grid, &mut rng) else {
                log::debug!("Stopping layout at '{word}': minimum font size reached");
                break;
            };

            let glyph_x = spot.x + i64::from(self.settings.margin);
            let glyph_y = spot.y + i64::from(self.settings.margin);
            let style = WordStyle {
                word,
                font_size,
                position: (glyph_x as u32, glyph_y as u32),
                horizontal: spot.horizontal,
            };
            let color = job.colors.color_for(&style, &mut rng);

            draw_sprite(&mut canvas, &spot.sprite, glyph_x, glyph_y, color.to_rgba());
            grid.occupy(&spot.footprint, spot.x, spot.y);

            placed.push(PlacedWord {
                word: word.to_owned(),
                font_size,
                x: glyph_x as u32,
                y: glyph_y as u32,
                width: spot.sprite.width(),
                height: spot.sprite.height(),
                horizontal: spot.horizontal,
                color,
            });
            last_rel = rel;
        }

        if placed.is_empty() {
            return Err(render_error(&format!(
                "could not place any word on the {width}x{height} mask"
            )));
        }

        log::debug!("Placed {} of {} words", placed.len(), job.max_words);
        Ok(Layout {
            image: canvas,
            words: placed,
        })
    }
}

/// Read and parse a font file
///
/// # Errors
///
/// Returns [`CloudError::Render`] if the file cannot be read or parsed
pub fn load_font(path: &Path) -> Result<Font> {
    let bytes = std::fs::read(path)
        .map_err(|e| render_error(&format!("cannot read font '{}': {e}", path.display())))?;
    Font::from_bytes(bytes, FontSettings::default())
        .map_err(|e| render_error(&format!("cannot parse font '{}': {e}", path.display())))
}

fn draw_sprite(canvas: &mut RgbaImage, sprite: &GlyphSprite, x: i64, y: i64, color: Rgba<u8>) {
    let Rgba([r, g, b, _]) = color;
    for ((row, col), &alpha) in sprite.coverage().indexed_iter() {
        if alpha == 0 {
            continue;
        }
        let (px, py) = (x + col as i64, y + row as i64);
        if px < 0 || py < 0 {
            continue;
        }
        if let Some(pixel) = canvas.get_pixel_mut_checked(px as u32, py as u32) {
            pixel.blend(&Rgba([r, g, b, alpha]));
        }
    }
}
