//! Photo composition.
//!
//! Draws the planned crop region of the background-removed source onto a
//! white canvas of the output size. Transparent source pixels become white.

use image::imageops;
use thiserror::Error;

use crate::config::PhotoSpec;
use crate::crop::CropRect;
use crate::decode::{FilterType, RgbRaster, RgbaRaster};

/// Errors that can occur while composing the photo.
#[derive(Debug, Error, PartialEq)]
pub enum ComposeError {
    /// The source has a zero dimension.
    #[error("Source image is empty")]
    EmptySource,

    /// The source buffer does not match its dimensions.
    #[error("Source pixel buffer does not match {width}x{height}")]
    InvalidSource { width: u32, height: u32 },
}

/// Compose the digital photo at `target_width x target_height`.
pub fn compose_photo(source: &RgbaRaster, crop: &CropRect, spec: &PhotoSpec) -> Result<RgbRaster, ComposeError> {
    compose_at(source, crop, spec.target_width, spec.target_height, FilterType::Lanczos3)
}

/// Compose the HD print version at `hd_width x hd_height`.
pub fn compose_photo_hd(source: &RgbaRaster, crop: &CropRect, spec: &PhotoSpec) -> Result<RgbRaster, ComposeError> {
    compose_at(source, crop, spec.hd_width, spec.hd_height, FilterType::Lanczos3)
}

/// Resample `crop` from `source` to fill a `width x height` white canvas.
pub fn compose_at(
    source: &RgbaRaster,
    crop: &CropRect,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<RgbRaster, ComposeError> {
    if source.is_empty() {
        return Err(ComposeError::EmptySource);
    }
    let image = source.to_image().ok_or(ComposeError::InvalidSource {
        width: source.width,
        height: source.height,
    })?;

    let (left, top, crop_w, crop_h) = crop.to_pixels(source.width, source.height);
    let region = imageops::crop_imm(&image, left, top, crop_w, crop_h).to_image();
    let scaled = imageops::resize(&region, width, height, filter.to_image_filter());

    let mut out = RgbRaster::white(width, height);
    for (dst, src) in out.pixels.chunks_exact_mut(3).zip(scaled.pixels()) {
        let [r, g, b, a] = src.0;
        dst[0] = over_white(r, a);
        dst[1] = over_white(g, a);
        dst[2] = over_white(b, a);
    }

    log::debug!(
        target: "icaphoto::compose",
        "composed {width}x{height} from {crop_w}x{crop_h} at ({left}, {top})"
    );
    Ok(out)
}

/// Blend one channel over a white background.
#[inline]
fn over_white(channel: u8, alpha: u8) -> u8 {
    let a = alpha as u32;
    ((channel as u32 * a + 255 * (255 - a) + 127) / 255) as u8
}
