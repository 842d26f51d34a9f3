//! WASM-compatible wrapper types for rasters and crop rectangles.
//!
//! Landmarks cross the boundary as a flat `Float32Array` of interleaved
//! normalized `x, y` pairs in face-mesh order, with `NaN` marking an absent
//! point. Rasters cross as RGBA bytes, the layout of `ImageData.data`.

use icaphoto_core::{CropRect, RgbaRaster};
use wasm_bindgen::prelude::*;

/// An RGBA raster held in WASM memory.
///
/// Typically built from a canvas `ImageData` or returned by [`decode_image`].
///
/// [`decode_image`]: crate::decode::decode_image
#[wasm_bindgen]
pub struct JsRaster {
    inner: RgbaRaster,
}

#[wasm_bindgen]
impl JsRaster {
    /// Wrap RGBA pixel data (4 bytes per pixel, row-major order).
    ///
    /// # Errors
    ///
    /// Returns an error if `pixels.length != width * height * 4`.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<JsRaster, JsValue> {
        RgbaRaster::from_rgba(width, height, pixels)
            .map(Self::from_raster)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.pixels.len()
    }

    /// Returns RGBA pixel data as Uint8Array.
    ///
    /// Note: This copies the pixel data out of WASM memory.
    pub fn pixels(&self) -> Vec<u8> {
        self.inner.pixels.clone()
    }
}

impl JsRaster {
    pub(crate) fn from_raster(inner: RgbaRaster) -> Self {
        Self { inner }
    }

    pub(crate) fn raster(&self) -> &RgbaRaster {
        &self.inner
    }
}

/// A crop rectangle in source pixels.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy)]
pub struct JsCropRect {
    inner: CropRect,
}

#[wasm_bindgen]
impl JsCropRect {
    #[wasm_bindgen(getter)]
    pub fn x(&self) -> f64 {
        self.inner.x
    }

    #[wasm_bindgen(getter)]
    pub fn y(&self) -> f64 {
        self.inner.y
    }

    #[wasm_bindgen(getter)]
    pub fn w(&self) -> f64 {
        self.inner.w
    }

    #[wasm_bindgen(getter)]
    pub fn h(&self) -> f64 {
        self.inner.h
    }
}

impl From<CropRect> for JsCropRect {
    fn from(inner: CropRect) -> Self {
        Self { inner }
    }
}

#[cfg(test)]
impl JsCropRect {
    pub(crate) fn rect(&self) -> CropRect {
        self.inner
    }
}
