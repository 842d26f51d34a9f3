//! Photo output WASM bindings.
//!
//! Each function takes the background-removed raster and the landmarks of
//! the captured frame, plans the crop, and returns finished JPEG bytes at the
//! `jpegQuality` of `spec`.
//!
//! # Example
//!
//! ```typescript
//! const photo = compose_photo(cutout, landmarks, spec);   // 400x514 JPEG
//! const sheet = print_sheet(cutout, landmarks, spec);     // 1200x1800 JPEG
//! download(new Blob([photo], { type: 'image/jpeg' }), 'ica-photo.jpg');
//! ```

use crate::spec::JsPhotoSpec;
use crate::types::JsRaster;
use icaphoto_core::{compose, crop, encode, sheet, LandmarkFrame, PhotoSpec, RgbRaster, RgbaRaster};
use wasm_bindgen::prelude::*;

/// Compose the digital photo and encode it as JPEG.
///
/// # Errors
///
/// Returns an error if the raster is empty or encoding fails.
#[wasm_bindgen]
pub fn compose_photo(raster: &JsRaster, landmarks: &[f32], spec: &JsPhotoSpec) -> Result<Vec<u8>, JsValue> {
    let photo = compose_digital(raster.raster(), landmarks, spec.inner())?;
    encode::encode_jpeg(&photo, spec.inner().jpeg_quality).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Compose the 35x45 mm photo at 600 DPI and encode it as JPEG.
#[wasm_bindgen]
pub fn compose_photo_hd(raster: &JsRaster, landmarks: &[f32], spec: &JsPhotoSpec) -> Result<Vec<u8>, JsValue> {
    let spec = spec.inner();
    let source = raster.raster();
    let rect = crop::compute_crop(&LandmarkFrame::from_flat(landmarks), source.width, source.height, spec);
    let photo = compose::compose_photo_hd(source, &rect, spec).map_err(|e| JsValue::from_str(&e.to_string()))?;
    encode::encode_jpeg(&photo, spec.jpeg_quality).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Compose the photo, tile four copies on a 4x6 in sheet, and encode as JPEG.
#[wasm_bindgen]
pub fn print_sheet(raster: &JsRaster, landmarks: &[f32], spec: &JsPhotoSpec) -> Result<Vec<u8>, JsValue> {
    let photo = compose_digital(raster.raster(), landmarks, spec.inner())?;
    let tiled = sheet::tile_print_sheet(&photo, spec.inner()).map_err(|e| JsValue::from_str(&e.to_string()))?;
    encode::encode_jpeg(&tiled, spec.inner().jpeg_quality).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn compose_digital(source: &RgbaRaster, landmarks: &[f32], spec: &PhotoSpec) -> Result<RgbRaster, JsValue> {
    let rect = crop::compute_crop(&LandmarkFrame::from_flat(landmarks), source.width, source.height, spec);
    compose::compose_photo(source, &rect, spec).map_err(|e| JsValue::from_str(&e.to_string()))
}


/// WASM-specific tests that require JsValue.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_empty_raster_rejected() {
        let empty = JsRaster::from_raster(RgbaRaster::filled(0, 0, [0; 4]));
        assert!(compose_photo(&empty, &[], &JsPhotoSpec::default()).is_err());
    }
}
