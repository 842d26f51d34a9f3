//! Crop planning WASM bindings.
//!
//! # Example
//!
//! ```typescript
//! const rect = compute_crop(landmarks, video.videoWidth, video.videoHeight, spec);
//! ctx.drawImage(cutout, rect.x, rect.y, rect.w, rect.h, 0, 0, 400, 514);
//! ```

use crate::spec::JsPhotoSpec;
use crate::types::JsCropRect;
use icaphoto_core::{crop, LandmarkFrame};
use wasm_bindgen::prelude::*;

/// Plan the crop for a captured frame.
///
/// # Arguments
///
/// * `landmarks` - Interleaved normalized `x, y` pairs; `NaN` marks an absent point
/// * `width` / `height` - Source raster size in pixels
/// * `spec` - Photo specification
///
/// Falls back to [`center_crop`] when the chin, forehead or nose is missing.
#[wasm_bindgen]
pub fn compute_crop(landmarks: &[f32], width: u32, height: u32, spec: &JsPhotoSpec) -> JsCropRect {
    let frame = LandmarkFrame::from_flat(landmarks);
    crop::compute_crop(&frame, width, height, spec.inner()).into()
}

/// Largest target-aspect rectangle centred in the image.
#[wasm_bindgen]
pub fn center_crop(width: u32, height: u32, spec: &JsPhotoSpec) -> JsCropRect {
    crop::center_crop(width, height, spec.inner()).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use icaphoto_core::landmarks::index;

    fn flat_face() -> Vec<f32> {
        let mut values = vec![f32::NAN; icaphoto_core::LANDMARK_COUNT * 2];
        for (i, x, y) in [
            (index::CHIN, 0.5, 0.8),
            (index::FOREHEAD, 0.5, 0.3),
            (index::NOSE_TIP, 0.5, 0.55),
            (index::LEFT_EYE_OUTER, 0.4, 0.45),
            (index::RIGHT_EYE_OUTER, 0.6, 0.45),
        ] {
            values[i * 2] = x;
            values[i * 2 + 1] = y;
        }
        values
    }

    #[test]
    fn test_compute_crop_within_bounds() {
        let spec = JsPhotoSpec::default();
        let rect = compute_crop(&flat_face(), 1280, 720, &spec).rect();
        assert!(rect.fits_within(1280.0, 720.0));
        assert!((rect.aspect_ratio() - 400.0 / 514.0).abs() < 1e-3);
    }

    #[test]
    fn test_empty_landmarks_use_center_crop() {
        let spec = JsPhotoSpec::default();
        let planned = compute_crop(&[], 640, 480, &spec).rect();
        let centred = center_crop(640, 480, &spec).rect();
        assert_eq!(planned, centred);
    }
}
