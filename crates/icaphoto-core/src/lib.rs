//! icaphoto Core - identity photo library
//!
//! This crate turns a captured portrait frame plus detected facial landmarks
//! into an ICA-compliant identity photo, and scores live camera frames
//! against the same photo specification to gate when a capture may be taken.
//!
//! Everything is a stateless function of its inputs and one immutable
//! [`PhotoSpec`]. The only asynchronous step is background removal, which is
//! supplied by the caller through [`BackgroundRemover`].

pub mod compose;
pub mod config;
pub mod crop;
pub mod decode;
pub mod encode;
pub mod geometry;
pub mod landmarks;
pub mod luminance;
pub mod metrics;
pub mod pipeline;
pub mod sheet;
pub mod validate;

pub use compose::{compose_photo, compose_photo_hd, ComposeError};
pub use config::{ConfigError, PhotoSpec};
pub use crop::{center_crop, compute_crop, CropRect};
pub use decode::{decode_image, DecodeError, RgbRaster, RgbaRaster};
pub use encode::{encode_jpeg, EncodeError};
pub use landmarks::{LandmarkFrame, Point, LANDMARK_COUNT};
pub use metrics::FaceMetrics;
pub use pipeline::{
    finish_capture, process_capture, BackgroundRemover, CaptureError, CaptureOutcome, CaptureSession,
    CaptureTicket, CapturedPhoto, ProviderError,
};
pub use sheet::tile_print_sheet;
pub use validate::{validate, validate_faces, FrameInput, Issue, ValidationResult, Warning};
