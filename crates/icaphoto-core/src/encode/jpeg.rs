//! JPEG encoding for the digital photo and the print sheet.
//!
//! Quality is expressed as a fraction in (0, 1], the same scale the browser
//! canvas uses for `toDataURL("image/jpeg", q)`, and mapped onto the
//! encoder's 1-100 scale.

use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use std::io::Cursor;
use thiserror::Error;

use crate::decode::RgbRaster;

/// Errors that can occur during JPEG encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// JPEG encoding failed
    #[error("JPEG encoding failed: {0}")]
    EncodingFailed(String),
}

/// Map a (0, 1] quality fraction to the encoder's 1-100 scale.
///
/// Out-of-range and non-finite values are clamped (NaN maps to 1).
pub fn quality_percent(quality: f32) -> u8 {
    if !quality.is_finite() {
        return 1;
    }
    (quality * 100.0).round().clamp(1.0, 100.0) as u8
}

/// Encode an RGB raster to JPEG bytes.
///
/// # Arguments
///
/// * `image` - Opaque RGB raster
/// * `quality` - Fraction in (0, 1]; the photo pipeline uses 0.95
///
/// # Errors
///
/// Fails if the raster has a zero dimension, its buffer does not match
/// `width * height * 3`, or the encoder rejects it.
pub fn encode_jpeg(image: &RgbRaster, quality: f32) -> Result<Vec<u8>, EncodeError> {
    let (width, height) = (image.width, image.height);
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected_len = (width as usize) * (height as usize) * 3;
    if image.pixels.len() != expected_len {
        return Err(EncodeError::InvalidPixelData {
            expected: expected_len,
            actual: image.pixels.len(),
        });
    }

    let mut buffer = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut buffer, quality_percent(quality))
        .write_image(&image.pixels, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}
