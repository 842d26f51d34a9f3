//! The photo specification table.
//!
//! Every dimension, ratio and compliance threshold used by the crop planner,
//! the validator and the composer lives in a single [`PhotoSpec`] value. The
//! defaults encode the ICA digital photo requirements; callers override
//! individual fields with struct update syntax or by deserializing a partial
//! object (missing fields fall back to the defaults).
//!
//! # Example
//!
//! ```ignore
//! let relaxed = PhotoSpec {
//!     max_rotation_degrees: 12.0,
//!     ..PhotoSpec::default()
//! };
//! relaxed.check()?;
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors reported by [`PhotoSpec::check`].
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// An output dimension is zero.
    #[error("Invalid dimension: {name} must be non-zero")]
    ZeroDimension { name: &'static str },

    /// A ratio lies outside the half-open range (0, 1].
    #[error("Invalid ratio: {name} = {value} must be in (0, 1]")]
    RatioOutOfRange { name: &'static str, value: f64 },

    /// A lower bound exceeds its upper bound.
    #[error("Inverted range: {name} lower bound {min} exceeds upper bound {max}")]
    InvertedRange {
        name: &'static str,
        min: f64,
        max: f64,
    },
}

/// Output dimensions, crop ratios and compliance thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PhotoSpec {
    /// Digital photo width in pixels.
    pub target_width: u32,
    /// Digital photo height in pixels.
    pub target_height: u32,
    /// HD print width (35mm at 600 DPI).
    pub hd_width: u32,
    /// HD print height (45mm at 600 DPI).
    pub hd_height: u32,

    /// Fraction of the output height spanned by forehead-to-chin.
    pub target_face_ratio: f64,
    /// Fraction of the output height above the eye line.
    pub eye_position_ratio: f64,
    /// Smallest crop edge in source pixels.
    pub min_crop_size: f64,

    /// Live-preview coverage lower bound (relaxed to allow headroom).
    pub min_coverage: f64,
    /// Coverage upper bound.
    pub max_coverage: f64,
    /// Ideal coverage, reported to the UI only.
    pub target_coverage: f64,
    /// Largest allowed horizontal nose offset from the frame centre.
    pub center_tolerance: f64,
    /// Largest allowed eye-line tilt in degrees.
    pub max_rotation_degrees: f64,

    /// Lowest acceptable mean luma (0-255).
    pub min_brightness: f64,
    /// Highest acceptable mean luma (0-255).
    pub max_brightness: f64,
    /// Edge of the square patch sampled for lighting.
    pub lighting_sample_size: u32,

    /// Eye aspect ratio at or below which eyes count as closed.
    pub eye_open_threshold: f64,
    /// Mouth aspect ratio at or above which the mouth counts as open.
    pub mouth_closed_threshold: f64,

    /// Enables the landmark-only spectacle heuristic. Off by default: without
    /// pixel-edge analysis it produces too many false positives.
    pub spectacles_enabled: bool,
    /// Eye-span / cheek-span ratio above which spectacles are reported.
    pub spectacle_ratio_threshold: f64,

    /// JPEG quality in (0, 1].
    pub jpeg_quality: f32,

    /// Print sheet width (4in at 300 DPI).
    pub sheet_width: u32,
    /// Print sheet height (6in at 300 DPI).
    pub sheet_height: u32,
    /// Width of one photo on the sheet (35mm at 300 DPI).
    pub print_photo_width: u32,
    /// Height of one photo on the sheet (45mm at 300 DPI).
    pub print_photo_height: u32,
}

impl Default for PhotoSpec {
    fn default() -> Self {
        Self {
            target_width: 400,
            target_height: 514,
            hd_width: 827,
            hd_height: 1063,

            target_face_ratio: 0.65,
            eye_position_ratio: 0.40,
            min_crop_size: 10.0,

            min_coverage: 0.45,
            max_coverage: 0.80,
            target_coverage: 0.70,
            center_tolerance: 0.12,
            max_rotation_degrees: 8.0,

            min_brightness: 80.0,
            max_brightness: 220.0,
            lighting_sample_size: 100,

            eye_open_threshold: 0.18,
            mouth_closed_threshold: 0.30,

            spectacles_enabled: false,
            spectacle_ratio_threshold: 0.65,

            jpeg_quality: 0.95,

            sheet_width: 1200,
            sheet_height: 1800,
            print_photo_width: 413,
            print_photo_height: 531,
        }
    }
}

impl PhotoSpec {
    /// The ICA digital photo table.
    pub fn ica() -> Self {
        Self::default()
    }

    /// Width / height of the digital photo (400 / 514 ≈ 0.778, i.e. 35:45mm).
    pub fn target_aspect_ratio(&self) -> f64 {
        self.target_width as f64 / self.target_height.max(1) as f64
    }

    /// Reject tables the algorithms cannot work with.
    pub fn check(&self) -> Result<(), ConfigError> {
        let dimensions = [
            ("targetWidth", self.target_width),
            ("targetHeight", self.target_height),
            ("hdWidth", self.hd_width),
            ("hdHeight", self.hd_height),
            ("lightingSampleSize", self.lighting_sample_size),
            ("sheetWidth", self.sheet_width),
            ("sheetHeight", self.sheet_height),
            ("printPhotoWidth", self.print_photo_width),
            ("printPhotoHeight", self.print_photo_height),
        ];
        if let Some((name, _)) = dimensions.iter().find(|(_, v)| *v == 0) {
            return Err(ConfigError::ZeroDimension { name: *name });
        }

        let ratios = [
            ("targetFaceRatio", self.target_face_ratio),
            ("eyePositionRatio", self.eye_position_ratio),
            ("jpegQuality", self.jpeg_quality as f64),
        ];
        for (name, value) in ratios {
            if !(value > 0.0 && value <= 1.0) {
                return Err(ConfigError::RatioOutOfRange { name, value });
            }
        }

        if self.min_coverage > self.max_coverage {
            return Err(ConfigError::InvertedRange {
                name: "coverage",
                min: self.min_coverage,
                max: self.max_coverage,
            });
        }
        if self.min_brightness > self.max_brightness {
            return Err(ConfigError::InvertedRange {
                name: "brightness",
                min: self.min_brightness,
                max: self.max_brightness,
            });
        }

        Ok(())
    }
}
