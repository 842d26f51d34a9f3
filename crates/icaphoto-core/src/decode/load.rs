//! Format-agnostic decoding to RGBA.

use std::io::Cursor;

use image::ImageReader;

use super::{DecodeError, RgbaRaster};

/// Decode PNG or JPEG bytes into an RGBA raster.
///
/// The format is guessed from the content. Images without an alpha channel
/// come back fully opaque.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the format cannot be recognized.
/// Returns `DecodeError::CorruptedFile` if decoding fails.
pub fn decode_image(bytes: &[u8]) -> Result<RgbaRaster, DecodeError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }

    let img = reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    Ok(RgbaRaster::from_image(img.into_rgba8()))
}
