//! Font lookup inside a font directory with a fixed fallback

use crate::io::configuration::ServiceConfig;
use crate::io::error::{Result, file_system_error};
use fontdue::{Font, FontSettings};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Character probed to decide whether a font can draw Korean text
pub const HANGUL_PROBE: char = '가';

const FONT_EXTENSIONS: [&str; 2] = ["ttf", "otf"];

/// Catalogue entry for one font file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FontInfo {
    /// File stem
    pub name: String,
    /// File name inside the font directory, usable as a font identifier
    pub file_name: String,
    /// Whether the font has a glyph for [`HANGUL_PROBE`]
    pub supports_hangul: bool,
}

/// Resolves font identifiers to font files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontLocator {
    directory: PathBuf,
    fallback: PathBuf,
}

impl FontLocator {
    /// Locator for a directory with a fallback font path
    pub fn new(directory: impl Into<PathBuf>, fallback: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            fallback: fallback.into(),
        }
    }

    /// Locator using the configured directory and fallback
    pub fn from_config(config: &ServiceConfig) -> Self {
        Self::new(&config.font_dir, &config.fallback_font)
    }

    /// Directory searched for requested fonts
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Path of the requested font file, or the fallback if it is absent
    ///
    /// Only the file-name part of `requested` is used, so identifiers cannot
    /// point outside the font directory.
    pub fn resolve(&self, requested: Option<&str>) -> PathBuf {
        let Some(name) = requested.map(str::trim).filter(|n| !n.is_empty()) else {
            return self.fallback.clone();
        };

        let candidate = Path::new(name)
            .file_name()
            .map(|file| self.directory.join(file));
        match candidate {
            Some(path) if path.is_file() => path,
            _ => {
                log::warn!(
                    "Font '{name}' not found in {}, using {}",
                    self.directory.display(),
                    self.fallback.display()
                );
                self.fallback.clone()
            }
        }
    }

    /// List fonts in the directory, Hangul-capable first, then by name
    ///
    /// Fonts that fail to parse are listed as not Hangul-capable.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be read
    pub fn catalogue(&self) -> Result<Vec<FontInfo>> {
        let entries = std::fs::read_dir(&self.directory)
            .map_err(file_system_error(&self.directory, "read font directory"))?;

        let mut fonts = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(file_system_error(&self.directory, "read font directory"))?
                .path();
            let is_font = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| FONT_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()));
            if !is_font {
                continue;
            }

            let (Some(name), Some(file_name)) = (
                path.file_stem().map(|s| s.to_string_lossy().into_owned()),
                path.file_name().map(|s| s.to_string_lossy().into_owned()),
            ) else {
                continue;
            };

            fonts.push(FontInfo {
                supports_hangul: supports_hangul(&path),
                name,
                file_name,
            });
        }

        fonts.sort_by(|a, b| {
            b.supports_hangul
                .cmp(&a.supports_hangul)
                .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        });
        Ok(fonts)
    }
}

/// Whether the font file at `path` has a glyph for [`HANGUL_PROBE`]
pub fn supports_hangul(path: &Path) -> bool {
    match std::fs::read(path) {
        Ok(bytes) => match Font::from_bytes(bytes, FontSettings::default()) {
            Ok(font) => font.lookup_glyph_index(HANGUL_PROBE) != 0,
            Err(e) => {
                log::error!("Cannot parse font {}: {e}", path.display());
                false
            }
        },
        Err(e) => {
            log::error!("Cannot read font {}: {e}", path.display());
            false
        }
    }
}
