//! Image decoding for the capture pipeline.
//!
//! This module provides functionality for:
//! - Decoding the background-removal provider's output (PNG with alpha) or a
//!   captured frame (JPEG) into an RGBA raster
//! - The raster types passed between the pipeline stages
//!
//! # Examples
//!
//! ```ignore
//! use icaphoto_core::decode::decode_image;
//!
//! let png_bytes = std::fs::read("cutout.png").unwrap();
//! let image = decode_image(&png_bytes).unwrap();
//! println!("Decoded {}x{} image", image.width, image.height);
//! ```

mod load;
mod types;

pub use load::decode_image;
pub use types::{DecodeError, FilterType, RgbRaster, RgbaRaster};
