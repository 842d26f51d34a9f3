//! Image encoding for the photo outputs.
//!
//! This module provides functionality for:
//! - Encoding the composed photo and the print sheet to JPEG
//!
//! # Examples
//!
//! ```ignore
//! use icaphoto_core::decode::RgbRaster;
//! use icaphoto_core::encode::encode_jpeg;
//!
//! let photo = RgbRaster::white(400, 514);
//! let jpeg_bytes = encode_jpeg(&photo, 0.95).unwrap();
//! println!("Encoded {} bytes", jpeg_bytes.len());
//! ```

mod jpeg;

pub use jpeg::{encode_jpeg, quality_percent, EncodeError};
