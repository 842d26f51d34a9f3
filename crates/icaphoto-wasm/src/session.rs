//! Capture session WASM bindings.
//!
//! Background removal runs in JavaScript, so the session splits the capture
//! in two: `begin()` takes a ticket before the provider is called, and
//! `finish()` runs the rest of the pipeline once it resolves. If the user
//! pressed retake (or started another capture) in between, `finish()`
//! returns `undefined` and the stale result is dropped.
//!
//! # Example
//!
//! ```typescript
//! const session = new JsCaptureSession();
//! const ticket = session.begin();
//! const cutout = decode_image(await removeBackground(frameBlob));
//! const result = session.finish(ticket, cutout, landmarks, spec);
//! if (result) {
//!   showPreview(result.photo, result.sheet);
//! }
//! ```

use crate::spec::JsPhotoSpec;
use crate::types::{JsCropRect, JsRaster};
use icaphoto_core::{finish_capture, CaptureOutcome, CaptureSession, CaptureTicket, CropRect, LandmarkFrame};
use wasm_bindgen::prelude::*;

/// Ticket identifying one capture attempt.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy)]
pub struct JsCaptureTicket {
    inner: CaptureTicket,
}

#[wasm_bindgen]
impl JsCaptureTicket {
    #[wasm_bindgen(getter)]
    pub fn generation(&self) -> f64 {
        self.inner.generation() as f64
    }
}

/// Photo and print sheet of a completed capture.
#[wasm_bindgen]
pub struct JsCapturedPhoto {
    crop: CropRect,
    photo: Vec<u8>,
    sheet: Vec<u8>,
}

#[wasm_bindgen]
impl JsCapturedPhoto {
    /// Crop planned on the background-removed raster.
    #[wasm_bindgen(getter)]
    pub fn crop(&self) -> JsCropRect {
        self.crop.into()
    }

    /// Digital photo as JPEG bytes (copied out of WASM memory).
    #[wasm_bindgen(getter)]
    pub fn photo(&self) -> Vec<u8> {
        self.photo.clone()
    }

    /// Print sheet as JPEG bytes (copied out of WASM memory).
    #[wasm_bindgen(getter)]
    pub fn sheet(&self) -> Vec<u8> {
        self.sheet.clone()
    }
}

#[wasm_bindgen]
#[derive(Default)]
pub struct JsCaptureSession {
    inner: CaptureSession,
}

#[wasm_bindgen]
impl JsCaptureSession {
    #[wasm_bindgen(constructor)]
    pub fn new() -> JsCaptureSession {
        Self::default()
    }

    /// Start a capture. Any capture still in flight becomes stale.
    pub fn begin(&self) -> JsCaptureTicket {
        JsCaptureTicket {
            inner: self.inner.begin(),
        }
    }

    /// Discard the current capture.
    pub fn retake(&self) {
        self.inner.retake();
    }

    pub fn is_current(&self, ticket: &JsCaptureTicket) -> bool {
        self.inner.is_current(ticket.inner)
    }

    /// Crop, compose and tile the background-removed raster.
    ///
    /// Returns `undefined` when `ticket` is stale.
    ///
    /// # Errors
    ///
    /// Returns an error if the raster is empty or encoding fails.
    pub fn finish(
        &self,
        ticket: &JsCaptureTicket,
        cutout: &JsRaster,
        landmarks: &[f32],
        spec: &JsPhotoSpec,
    ) -> Result<Option<JsCapturedPhoto>, JsValue> {
        let frame = LandmarkFrame::from_flat(landmarks);
        let outcome = finish_capture(&self.inner, ticket.inner, cutout.raster(), &frame, spec.inner())
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(match outcome {
            CaptureOutcome::Completed(captured) => Some(JsCapturedPhoto {
                crop: captured.crop,
                photo: captured.photo_jpeg,
                sheet: captured.sheet_jpeg,
            }),
            CaptureOutcome::Superseded => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use icaphoto_core::RgbaRaster;

    fn cutout() -> JsRaster {
        JsRaster::from_raster(RgbaRaster::filled(120, 90, [60, 80, 100, 255]))
    }

    #[test]
    fn test_finish_current_ticket() {
        let session = JsCaptureSession::new();
        let ticket = session.begin();
        assert!(session.is_current(&ticket));

        let captured = session
            .finish(&ticket, &cutout(), &[], &JsPhotoSpec::default())
            .ok()
            .flatten()
            .unwrap();
        assert_eq!(&captured.photo()[0..2], &[0xFF, 0xD8]);
        assert_eq!(&captured.sheet()[0..2], &[0xFF, 0xD8]);
        assert!(captured.crop().rect().fits_within(120.0, 90.0));
    }

    #[test]
    fn test_retake_makes_finish_return_none() {
        let session = JsCaptureSession::new();
        let ticket = session.begin();
        session.retake();
        assert!(!session.is_current(&ticket));

        let result = session.finish(&ticket, &cutout(), &[], &JsPhotoSpec::default()).ok().unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_second_begin_supersedes_first() {
        let session = JsCaptureSession::new();
        let first = session.begin();
        let second = session.begin();
        assert!(second.generation() > first.generation());
        assert!(!session.is_current(&first));
        assert!(session.is_current(&second));
    }
}
