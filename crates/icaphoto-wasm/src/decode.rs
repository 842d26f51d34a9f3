//! Image decoding WASM bindings.
//!
//! The background-removal provider hands back an encoded image (usually a
//! PNG with alpha). [`decode_image`] turns it into a [`JsRaster`] that the
//! composer and capture session accept.
//!
//! # Example
//!
//! ```typescript
//! import { decode_image } from '@icaphoto/wasm';
//!
//! const cutout = decode_image(new Uint8Array(await blob.arrayBuffer()));
//! console.log(`Cutout ${cutout.width}x${cutout.height}`);
//! ```

use crate::types::JsRaster;
use icaphoto_core::decode;
use wasm_bindgen::prelude::*;

/// Decode PNG or JPEG bytes into an RGBA raster.
///
/// # Errors
///
/// Returns an error if the format is not recognized or the data is corrupted.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsRaster, JsValue> {
    decode::decode_image(bytes)
        .map(JsRaster::from_raster)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}


/// WASM-specific tests that require JsValue.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_decode_garbage() {
        assert!(decode_image(&[0x00, 0x01, 0x02, 0x03]).is_err());
    }
}
