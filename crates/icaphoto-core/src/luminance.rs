//! Luma calculation for the lighting check, using ITU-R BT.601 coefficients.
//!
//! Live frames arrive as RGBA (the layout of a canvas `ImageData` buffer).
//! The lighting check only looks at a square patch in the centre of the
//! frame, where the face is expected to be.

/// ITU-R BT.601 coefficient for red channel in luma calculation.
pub const LUMA_R: f64 = 0.299;

/// ITU-R BT.601 coefficient for green channel in luma calculation.
pub const LUMA_G: f64 = 0.587;

/// ITU-R BT.601 coefficient for blue channel in luma calculation.
pub const LUMA_B: f64 = 0.114;

/// Calculate luma from u8 RGB values.
///
/// # Returns
/// Luma value in the range 0.0 to 255.0
#[inline]
pub fn luma_601(r: u8, g: u8, b: u8) -> f64 {
    LUMA_R * r as f64 + LUMA_G * g as f64 + LUMA_B * b as f64
}

/// Mean luma over a square patch centred in an RGBA frame.
///
/// The patch is `sample_size` pixels on each side, centred at
/// `(width / 2, height / 2)` and clipped to the frame.
///
/// # Returns
/// `None` if the buffer length is not `width * height * 4` or the clipped
/// patch is empty.
pub fn sample_center_luma(rgba: &[u8], width: u32, height: u32, sample_size: u32) -> Option<f64> {
    let expected_len = (width as usize) * (height as usize) * 4;
    if expected_len == 0 || rgba.len() != expected_len {
        return None;
    }

    let half = sample_size / 2;
    let x0 = (width / 2).saturating_sub(half);
    let y0 = (height / 2).saturating_sub(half);
    let x1 = x0.saturating_add(sample_size).min(width);
    let y1 = y0.saturating_add(sample_size).min(height);
    if x1 <= x0 || y1 <= y0 {
        return None;
    }

    let stride = width as usize * 4;
    let mut total = 0.0;
    for y in y0..y1 {
        let row = &rgba[y as usize * stride..(y as usize + 1) * stride];
        for px in row[x0 as usize * 4..x1 as usize * 4].chunks_exact(4) {
            total += luma_601(px[0], px[1], px[2]);
        }
    }

    let count = ((x1 - x0) as usize * (y1 - y0) as usize) as f64;
    Some(total / count)
}
