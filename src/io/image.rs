//! PNG encoding of rendered canvases and their JSON-embeddable form

use crate::io::error::{CloudError, Result, file_system_error};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::{ImageFormat, RgbaImage};
use std::io::Cursor;
use std::path::Path;

/// Encode a canvas as PNG bytes
///
/// # Errors
///
/// Returns an error if the encoder rejects the image
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|source| CloudError::ImageEncode { source })?;
    Ok(bytes)
}

/// Base64 form of encoded bytes for embedding in JSON
pub fn to_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Write already-encoded PNG bytes, creating parent directories as needed
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The file cannot be written
pub fn save_png(png: &[u8], output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(file_system_error(parent, "create directory"))?;
    }
    std::fs::write(output_path, png).map_err(file_system_error(output_path, "write image"))
}
