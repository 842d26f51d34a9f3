//! Live-frame validation WASM bindings.
//!
//! Called once per detector result from the camera loop. The returned object
//! has the shape:
//!
//! ```typescript
//! {
//!   isPass: boolean,
//!   messages: string[],   // blocking, e.g. "Move Closer"
//!   warnings: string[],   // advisory, e.g. "Too Dark - Add more light"
//!   metrics: { coverage, centering, rotation, eyesOpen, mouthClosed, spectacles, lighting? }
//! }
//! ```
//!
//! # Example
//!
//! ```typescript
//! const result = validate_frame(landmarks, video.videoWidth, video.videoHeight, undefined, spec);
//! captureButton.disabled = !result.isPass;
//! ```

use crate::spec::JsPhotoSpec;
use icaphoto_core::validate::{self, FrameInput, ValidationResult};
use icaphoto_core::{LandmarkFrame, PhotoSpec};
use js_sys::{Array, Float32Array};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

/// Validate one face.
///
/// # Arguments
///
/// * `landmarks` - Interleaved normalized `x, y` pairs; `NaN` marks an absent point
/// * `width` / `height` - Video frame size in pixels
/// * `rgba` - Optional frame pixels; enables the lighting check
/// * `spec` - Photo specification
#[wasm_bindgen]
pub fn validate_frame(
    landmarks: &[f32],
    width: u32,
    height: u32,
    rgba: Option<Vec<u8>>,
    spec: &JsPhotoSpec,
) -> Result<JsValue, JsValue> {
    let face = LandmarkFrame::from_flat(landmarks);
    let result = run(std::slice::from_ref(&face), width, height, rgba.as_deref(), spec.inner());
    to_js(&result)
}

/// Validate a detector result holding zero or more faces.
///
/// Each element of `faces` is a `Float32Array` in the `validate_frame`
/// layout. Only the first face is scored; an empty array reports
/// "No face detected".
#[wasm_bindgen]
pub fn validate_faces(
    faces: Array,
    width: u32,
    height: u32,
    rgba: Option<Vec<u8>>,
    spec: &JsPhotoSpec,
) -> Result<JsValue, JsValue> {
    let frames = faces
        .iter()
        .map(|face| {
            face.dyn_into::<Float32Array>()
                .map(|values| LandmarkFrame::from_flat(&values.to_vec()))
                .map_err(|_| JsValue::from_str("Each face must be a Float32Array"))
        })
        .collect::<Result<Vec<_>, _>>()?;
    let result = run(&frames, width, height, rgba.as_deref(), spec.inner());
    to_js(&result)
}

fn run(faces: &[LandmarkFrame], width: u32, height: u32, rgba: Option<&[u8]>, spec: &PhotoSpec) -> ValidationResult {
    let frame = match rgba {
        Some(pixels) => FrameInput::new(width, height).with_pixels(pixels),
        None => FrameInput::new(width, height),
    };
    validate::validate_faces(faces, frame, spec)
}

fn to_js(result: &ValidationResult) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(result).map_err(|e| JsValue::from_str(&e.to_string()))
}
