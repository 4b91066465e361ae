//! Shape masks constraining where words may be drawn
//!
//! Every shape is first drawn as a stencil with the interior at 255 and the
//! exterior at 0, then inverted exactly once. The resulting [`Mask`] uses
//! 0 for paintable pixels and 255 for excluded ones, the convention the word
//! placer expects.

use crate::io::configuration::{HEART_SAMPLES, MASK_PADDING};
use crate::io::error::{CloudError, Result};
use crate::math::curves::{fit_to_square, sample_heart};
use ndarray::Array2;
use serde::Deserialize;
use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, Transform};

/// Stencil value for pixels inside a shape
pub const STENCIL_INSIDE: u8 = 255;
/// Stencil value for pixels outside a shape
pub const STENCIL_OUTSIDE: u8 = 0;

/// Supported mask outlines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum MaskShape {
    /// Full canvas minus a fixed border
    #[default]
    Rectangle,
    /// Centered disk
    Circle,
    /// Parametric heart
    Heart,
}

impl MaskShape {
    /// Parse a shape name, defaulting to [`MaskShape::Rectangle`]
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "circle" => Self::Circle,
            "heart" => Self::Heart,
            _ => Self::Rectangle,
        }
    }

    /// Canonical name of the shape
    pub const fn name(self) -> &'static str {
        match self {
            Self::Rectangle => "rectangle",
            Self::Circle => "circle",
            Self::Heart => "heart",
        }
    }
}

impl From<String> for MaskShape {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

/// Binary placement mask indexed `[row, col]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    pixels: Array2<u8>,
}

impl Mask {
    /// Value of pixels that may receive glyphs
    pub const PAINTABLE: u8 = 0;
    /// Value of pixels that must stay empty
    pub const EXCLUDED: u8 = 255;

    /// Build a mask by inverting a shape stencil
    pub fn from_stencil(stencil: &Array2<u8>) -> Self {
        Self {
            pixels: stencil.mapv(|v| if v >= 128 { Self::PAINTABLE } else { Self::EXCLUDED }),
        }
    }

    /// Raw pixel values, shape `(height, width)`
    pub const fn pixels(&self) -> &Array2<u8> {
        &self.pixels
    }

    /// Mask width in pixels
    pub fn width(&self) -> u32 {
        self.pixels.ncols() as u32
    }

    /// Mask height in pixels
    pub fn height(&self) -> u32 {
        self.pixels.nrows() as u32
    }

    /// Whether a glyph may cover pixel `(x, y)`; out-of-range pixels are not
    pub fn is_paintable(&self, x: u32, y: u32) -> bool {
        self.pixels.get([y as usize, x as usize]) == Some(&Self::PAINTABLE)
    }

    /// Number of paintable pixels
    pub fn paintable_count(&self) -> usize {
        self.pixels.iter().filter(|&&v| v == Self::PAINTABLE).count()
    }
}

/// Generate the placement mask for a shape
///
/// # Errors
///
/// Returns [`CloudError::MaskGeneration`] if either dimension is zero or the
/// heart raster cannot be allocated
pub fn generate_mask(shape: MaskShape, width: u32, height: u32) -> Result<Mask> {
    if width == 0 || height == 0 {
        return Err(CloudError::MaskGeneration { width, height });
    }

    let stencil = match shape {
        MaskShape::Rectangle => rectangle_stencil(width, height, MASK_PADDING),
        MaskShape::Circle => circle_stencil(width, height, MASK_PADDING),
        MaskShape::Heart => heart_stencil(width, height)?,
    };

    Ok(Mask::from_stencil(&stencil))
}

/// Inclusive rectangle from `(padding, padding)` to `(w - padding, h - padding)`
pub fn rectangle_stencil(width: u32, height: u32, padding: u32) -> Array2<u8> {
    let pad = i64::from(padding);
    let right = i64::from(width) - pad;
    let bottom = i64::from(height) - pad;

    Array2::from_shape_fn((height as usize, width as usize), |(row, col)| {
        let (x, y) = (col as i64, row as i64);
        if x >= pad && x <= right && y >= pad && y <= bottom {
            STENCIL_INSIDE
        } else {
            STENCIL_OUTSIDE
        }
    })
}

/// Disk centered at `(w / 2, h / 2)` with radius `min(w, h) / 2 - padding`
pub fn circle_stencil(width: u32, height: u32, padding: u32) -> Array2<u8> {
    let cx = i64::from(width / 2);
    let cy = i64::from(height / 2);
    let radius = i64::from(width.min(height) / 2) - i64::from(padding);
    let radius_sq = radius * radius;

    Array2::from_shape_fn((height as usize, width as usize), |(row, col)| {
        let dx = col as i64 - cx;
        let dy = row as i64 - cy;
        if radius >= 0 && dx * dx + dy * dy <= radius_sq {
            STENCIL_INSIDE
        } else {
            STENCIL_OUTSIDE
        }
    })
}

/// Heart curve scaled to `min(w, h)`, centered and filled without anti-aliasing
///
/// # Errors
///
/// Returns [`CloudError::MaskGeneration`] if the raster cannot be allocated
pub fn heart_stencil(width: u32, height: u32) -> Result<Array2<u8>> {
    let mut pixmap =
        Pixmap::new(width, height).ok_or(CloudError::MaskGeneration { width, height })?;

    let side = f64::from(width.min(height));
    let center = (f64::from(width) / 2.0, f64::from(height) / 2.0);
    let outline = fit_to_square(&sample_heart(HEART_SAMPLES), side, center);

    let mut builder = PathBuilder::new();
    let mut points = outline.iter();
    if let Some(&(x, y)) = points.next() {
        builder.move_to(x as f32, y as f32);
    }
    for &(x, y) in points {
        builder.line_to(x as f32, y as f32);
    }
    builder.close();

    if let Some(path) = builder.finish() {
        let mut paint = Paint::default();
        paint.set_color_rgba8(255, 255, 255, 255);
        paint.anti_alias = false;
        pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
    }

    Ok(Array2::from_shape_fn(
        (height as usize, width as usize),
        |(row, col)| match pixmap.pixel(col as u32, row as u32) {
            Some(pixel) if pixel.alpha() >= 128 => STENCIL_INSIDE,
            _ => STENCIL_OUTSIDE,
        },
    ))
}
