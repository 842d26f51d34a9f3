//! icaphoto WASM - WebAssembly bindings for icaphoto
//!
//! This crate exposes icaphoto-core to the browser capture UI. The landmark
//! detector and the background-removal model run in JavaScript; everything
//! between them (validation, crop planning, composition, the print sheet)
//! runs here.
//!
//! # Module Structure
//!
//! - `spec` - Photo specification with optional partial overrides
//! - `types` - WASM-compatible raster and crop wrappers
//! - `validate` - Per-frame compliance checks for the live preview
//! - `crop` - Crop planning
//! - `decode` - Decoding provider output into a raster
//! - `encode` - Photo and print sheet JPEG output
//! - `session` - Capture sessions that discard stale results
//! - `logger` - Console backend for core log events
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsPhotoSpec, validate_frame } from '@icaphoto/wasm';
//!
//! await init();
//! const spec = new JsPhotoSpec();
//! const result = validate_frame(landmarks, 1280, 720, undefined, spec);
//! console.log(result.isPass ? 'Ready' : result.messages[0]);
//! ```

use wasm_bindgen::prelude::*;

mod crop;
mod decode;
mod encode;
mod logger;
mod session;
mod spec;
mod types;
mod validate;

// Re-export public types
pub use crop::{center_crop, compute_crop};
pub use decode::decode_image;
pub use encode::{compose_photo, compose_photo_hd, print_sheet};
pub use logger::set_log_level;
pub use session::{JsCaptureSession, JsCaptureTicket, JsCapturedPhoto};
pub use spec::JsPhotoSpec;
pub use types::{JsCropRect, JsRaster};
pub use validate::{validate_faces, validate_frame};

/// Initialize the WASM module (called automatically on load)
///
/// Routes core warnings and errors to the browser console. Use
/// `set_log_level` for more detail.
#[wasm_bindgen(start)]
pub fn init() {
    logger::install(log::LevelFilter::Warn);
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
