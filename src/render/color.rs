//! Per-word color strategies and color parsing

use image::Rgba;
use rand::Rng;
use serde::Deserialize;
use std::fmt;

/// Color chosen for one placed word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordColor {
    /// Plain black
    Black,
    /// HSL color with hue in degrees and percentages for the rest
    Hsl {
        /// Hue in `[0, 360)`
        hue: u16,
        /// Saturation percentage
        saturation: u8,
        /// Lightness percentage
        lightness: u8,
    },
}

impl WordColor {
    /// Hue in degrees, if the color has one
    pub const fn hue(self) -> Option<u16> {
        match self {
            Self::Black => None,
            Self::Hsl { hue, .. } => Some(hue),
        }
    }

    /// Opaque RGBA value
    pub fn to_rgba(self) -> Rgba<u8> {
        match self {
            Self::Black => Rgba([0, 0, 0, 255]),
            Self::Hsl {
                hue,
                saturation,
                lightness,
            } => hsl_to_rgba(
                f32::from(hue),
                f32::from(saturation) / 100.0,
                f32::from(lightness) / 100.0,
            ),
        }
    }
}

impl fmt::Display for WordColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Black => write!(f, "black"),
            Self::Hsl {
                hue,
                saturation,
                lightness,
            } => write!(f, "hsl({hue}, {saturation}%, {lightness}%)"),
        }
    }
}

/// Attributes of a word at the moment it is colored
#[derive(Debug, Clone, Copy)]
pub struct WordStyle<'a> {
    /// Word being drawn
    pub word: &'a str,
    /// Font size it was placed at
    pub font_size: f32,
    /// Top-left corner of its box on the canvas
    pub position: (u32, u32),
    /// Whether it is drawn horizontally
    pub horizontal: bool,
}

/// Closed set of coloring rules
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum ColorStrategy {
    /// Every word black
    #[default]
    Single,
    /// Random hue per word, 70% saturation, 50% lightness
    Random,
    /// Hue follows font size from red (small) towards violet (large)
    Gradient,
}

impl ColorStrategy {
    /// Map a strategy name to a rule, defaulting to [`ColorStrategy::Single`]
    pub fn resolve(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "random_color" | "random" => Self::Random,
            "gradient_color" | "gradient" => Self::Gradient,
            _ => Self::Single,
        }
    }

    /// Canonical strategy name
    pub const fn name(self) -> &'static str {
        match self {
            Self::Single => "single_color",
            Self::Random => "random_color",
            Self::Gradient => "gradient_color",
        }
    }

    /// Color for one word
    ///
    /// Only [`ColorStrategy::Random`] draws from `rng`.
    pub fn color_for<R: Rng + ?Sized>(self, style: &WordStyle<'_>, rng: &mut R) -> WordColor {
        match self {
            Self::Single => WordColor::Black,
            Self::Random => WordColor::Hsl {
                hue: rng.random_range(0..360),
                saturation: 70,
                lightness: 50,
            },
            Self::Gradient => WordColor::Hsl {
                hue: gradient_hue(style.font_size),
                saturation: 80,
                lightness: 50,
            },
        }
    }
}

impl From<String> for ColorStrategy {
    fn from(name: String) -> Self {
        Self::resolve(&name)
    }
}

/// Hue for a font size: size clamped to `[0, 100]`, mapped onto `[0, 300]`
pub fn gradient_hue(font_size: f32) -> u16 {
    let position = font_size.clamp(0.0, 100.0) / 100.0;
    (300.0 * position) as u16
}

/// Convert HSL (hue in degrees, saturation and lightness in `[0, 1]`)
pub fn hsl_to_rgba(hue: f32, saturation: f32, lightness: f32) -> Rgba<u8> {
    let chroma = (1.0 - 2.0f32.mul_add(lightness, -1.0).abs()) * saturation;
    let sector = hue.rem_euclid(360.0) / 60.0;
    let x = chroma * (1.0 - (sector.rem_euclid(2.0) - 1.0).abs());
    let (r, g, b) = match sector as u8 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    let m = lightness - chroma / 2.0;
    let channel = |v: f32| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    Rgba([channel(r), channel(g), channel(b), 255])
}

const NAMED_COLORS: &[(&str, [u8; 3])] = &[
    ("black", [0, 0, 0]),
    ("white", [255, 255, 255]),
    ("red", [255, 0, 0]),
    ("green", [0, 128, 0]),
    ("blue", [0, 0, 255]),
    ("yellow", [255, 255, 0]),
    ("gray", [128, 128, 128]),
    ("grey", [128, 128, 128]),
    ("lightgray", [211, 211, 211]),
    ("navy", [0, 0, 128]),
    ("pink", [255, 192, 203]),
    ("purple", [128, 0, 128]),
    ("orange", [255, 165, 0]),
    ("beige", [245, 245, 220]),
    ("ivory", [255, 255, 240]),
    ("skyblue", [135, 206, 235]),
];

/// Parse a background color given as a CSS name, `#rgb` or `#rrggbb`
pub fn parse_color(value: &str) -> Option<Rgba<u8>> {
    let value = value.trim().to_ascii_lowercase();

    if let Some(hex) = value.strip_prefix('#') {
        let digits: Vec<u8> = hex
            .chars()
            .map(|c| c.to_digit(16).map(|d| d as u8))
            .collect::<Option<_>>()?;
        return match digits.as_slice() {
            [r, g, b] => Some(Rgba([r * 17, g * 17, b * 17, 255])),
            [r1, r2, g1, g2, b1, b2] => {
                Some(Rgba([r1 * 16 + r2, g1 * 16 + g2, b1 * 16 + b2, 255]))
            }
            _ => None,
        };
    }

    NAMED_COLORS
        .iter()
        .find(|(name, _)| *name == value)
        .map(|(_, [r, g, b])| Rgba([*r, *g, *b, 255]))
}
