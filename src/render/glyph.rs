//! Word rasterization into coverage bitmaps

use fontdue::Font;
use ndarray::{Array2, Axis};

/// Anti-aliased coverage of one word, indexed `[row, col]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphSprite {
    coverage: Array2<u8>,
}

impl GlyphSprite {
    /// Rasterize `text` horizontally at `size` pixels
    ///
    /// The box spans the font's ascent to descent and the sum of advances.
    /// Returns `None` for text that produces an empty box.
    pub fn rasterize(font: &Font, text: &str, size: f32) -> Option<Self> {
        let (ascent, descent) = font
            .horizontal_line_metrics(size)
            .map_or((size * 0.8, size * -0.2), |m| (m.ascent, m.descent));

        let mut glyphs = Vec::new();
        let mut pen = 0.0f32;
        for ch in text.chars() {
            let (metrics, bitmap) = font.rasterize(ch, size);
            glyphs.push((pen, metrics, bitmap));
            pen += metrics.advance_width;
        }

        let width = pen.ceil().max(0.0) as usize;
        let height = (ascent - descent).ceil().max(0.0) as usize;
        if width == 0 || height == 0 {
            return None;
        }

        let mut coverage = Array2::<u8>::zeros((height, width));
        for (offset, metrics, bitmap) in &glyphs {
            let left = (offset + metrics.xmin as f32).round() as i64;
            let top = (ascent - (metrics.ymin + metrics.height as i32) as f32).round() as i64;
            for (i, &value) in bitmap.iter().enumerate() {
                if value == 0 || metrics.width == 0 {
                    continue;
                }
                let row = top + (i / metrics.width) as i64;
                let col = left + (i % metrics.width) as i64;
                if row < 0 || col < 0 {
                    continue;
                }
                if let Some(cell) = coverage.get_mut([row as usize, col as usize]) {
                    *cell = (*cell).max(value);
                }
            }
        }

        Some(Self { coverage })
    }

    /// Sprite from precomputed coverage values
    pub const fn from_coverage(coverage: Array2<u8>) -> Self {
        Self { coverage }
    }

    /// Copy turned 90° counter-clockwise
    #[must_use]
    pub fn rotated(&self) -> Self {
        let mut coverage = self.coverage.t().to_owned();
        coverage.invert_axis(Axis(0));
        Self { coverage }
    }

    /// Coverage values, shape `(height, width)`
    pub const fn coverage(&self) -> &Array2<u8> {
        &self.coverage
    }

    /// Sprite width in pixels
    pub fn width(&self) -> u32 {
        self.coverage.ncols() as u32
    }

    /// Sprite height in pixels
    pub fn height(&self) -> u32 {
        self.coverage.nrows() as u32
    }

    /// Inked pixels grown by `margin` on every side
    ///
    /// The result is `2 * margin` larger in both dimensions; the sprite's own
    /// pixel `(r, c)` sits at `(r + margin, c + margin)`.
    pub fn footprint(&self, margin: u32) -> Array2<bool> {
        let m = margin as usize;
        let (rows, cols) = self.coverage.dim();
        let mut footprint = Array2::from_elem((rows + 2 * m, cols + 2 * m), false);
        for ((row, col), &value) in self.coverage.indexed_iter() {
            if value == 0 {
                continue;
            }
            for r in row..=row + 2 * m {
                for c in col..=col + 2 * m {
                    if let Some(cell) = footprint.get_mut([r, c]) {
                        *cell = true;
                    }
                }
            }
        }
        footprint
    }
}
