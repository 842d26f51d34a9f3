//! Crop planning for the digital photo.
//!
//! Converts a face mesh and the dimensions of the background-removed source
//! image into a pixel-space rectangle that, once scaled to the output size,
//! places the face at the required coverage with the eyes at a fixed height.
//!
//! # Coordinate System
//!
//! - Landmarks are normalized (0.0 to 1.0) relative to the source image
//! - The returned [`CropRect`] is in source pixels, origin top-left
//!
//! # Guarantees
//!
//! For any input the planner returns a rectangle inside the image whose
//! aspect ratio matches [`PhotoSpec::target_aspect_ratio`]. Missing or
//! degenerate landmarks fall back to [`center_crop`].

use serde::Serialize;

use crate::config::PhotoSpec;
use crate::landmarks::{index, LandmarkFrame, LANDMARK_COUNT};

/// Face heights below this many pixels are treated as degenerate.
const MIN_FACE_HEIGHT: f64 = 1e-6;

/// Horizontal half-width assumed for the face when cheek landmarks are
/// absent, in normalized units.
const CHEEK_FALLBACK_OFFSET: f64 = 0.1;

/// A crop region in source pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CropRect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl CropRect {
    pub fn aspect_ratio(&self) -> f64 {
        self.w / self.h
    }

    /// Whether the rectangle lies within a `width x height` image.
    pub fn fits_within(&self, width: f64, height: f64) -> bool {
        const SLACK: f64 = 1e-9;
        self.x >= 0.0
            && self.y >= 0.0
            && self.x + self.w <= width + SLACK
            && self.y + self.h <= height + SLACK
    }

    /// Integer pixel bounds `(left, top, width, height)` clamped to the image.
    ///
    /// Used by the composer; each edge is at least one pixel.
    pub fn to_pixels(&self, img_w: u32, img_h: u32) -> (u32, u32, u32, u32) {
        let left = (self.x.max(0.0).round() as u32).min(img_w.saturating_sub(1));
        let top = (self.y.max(0.0).round() as u32).min(img_h.saturating_sub(1));
        let right = ((self.x + self.w).round().max(0.0) as u32).min(img_w);
        let bottom = ((self.y + self.h).round().max(0.0) as u32).min(img_h);
        (
            left,
            top,
            right.saturating_sub(left).max(1),
            bottom.saturating_sub(top).max(1),
        )
    }
}

/// Largest rectangle of the target aspect ratio centred in the image.
///
/// If the image is relatively wider than the target, the sides are cropped
/// (full height); otherwise the top and bottom are cropped (full width).
pub fn center_crop(img_w: u32, img_h: u32, spec: &PhotoSpec) -> CropRect {
    let ratio = spec.target_aspect_ratio();
    let (img_w, img_h) = (img_w as f64, img_h as f64);

    let (w, h) = if img_h > 0.0 && img_w / img_h > ratio {
        (img_h * ratio, img_h)
    } else {
        (img_w, img_w / ratio)
    };

    CropRect {
        x: (img_w - w) / 2.0,
        y: (img_h - h) / 2.0,
        w,
        h,
    }
}

/// Plan the crop for a captured frame.
///
/// # Arguments
///
/// * `landmarks` - Face mesh for the captured frame
/// * `img_w` / `img_h` - Source image dimensions in pixels
/// * `spec` - Output specification
///
/// # Algorithm
///
/// 1. Face height from forehead and chin; output height is face height over
///    the target face ratio, output width follows the aspect ratio
/// 2. Shrink to fit the image width, then the image height
/// 3. Grow towards the minimum crop size, capped at the image size
/// 4. Put the eye line at `eye_position_ratio` from the top and centre
///    horizontally on the nose tip
/// 5. Translate back inside the image (never resize)
pub fn compute_crop(landmarks: &LandmarkFrame, img_w: u32, img_h: u32, spec: &PhotoSpec) -> CropRect {
    let (Some(chin), Some(forehead), Some(nose)) = (
        landmarks.get(index::CHIN),
        landmarks.get(index::FOREHEAD),
        landmarks.get(index::NOSE_TIP),
    ) else {
        log::warn!(
            target: "icaphoto::crop",
            "missing chin/forehead/nose landmarks ({} of {} present), using center crop",
            landmarks.present_count(),
            LANDMARK_COUNT
        );
        return center_crop(img_w, img_h, spec);
    };

    let (iw, ih) = (img_w as f64, img_h as f64);
    let ratio = spec.target_aspect_ratio();

    let face_top = forehead.y * ih;
    let face_bottom = chin.y * ih;
    let face_height = (face_bottom - face_top).abs();
    if !face_height.is_finite() || face_height < MIN_FACE_HEIGHT {
        log::warn!(target: "icaphoto::crop", "degenerate face height {face_height}, using center crop");
        return center_crop(img_w, img_h, spec);
    }

    let face_left = landmarks
        .get(index::LEFT_CHEEK)
        .map_or(nose.x - CHEEK_FALLBACK_OFFSET, |p| p.x)
        * iw;
    let face_right = landmarks
        .get(index::RIGHT_CHEEK)
        .map_or(nose.x + CHEEK_FALLBACK_OFFSET, |p| p.x)
        * iw;
    let face_width = (face_right - face_left).abs();

    let center_x = nose.x * iw;
    let left_eye_y = landmarks.get(index::LEFT_EYE_OUTER).map_or(forehead.y, |p| p.y);
    let right_eye_y = landmarks.get(index::RIGHT_EYE_OUTER).map_or(forehead.y, |p| p.y);
    let eye_center_y = (left_eye_y + right_eye_y) / 2.0 * ih;

    log::debug!(
        target: "icaphoto::crop",
        "face {face_width:.0}x{face_height:.0}px, center x {center_x:.0}, eye y {eye_center_y:.0}"
    );

    let mut target_h = face_height / spec.target_face_ratio;
    let mut target_w = target_h * ratio;

    if target_w > iw {
        log::debug!(target: "icaphoto::crop", "crop wider than image, scaling to fit width");
        target_w = iw;
        target_h = target_w / ratio;
    }
    if target_h > ih {
        log::debug!(target: "icaphoto::crop", "crop taller than image, scaling to fit height");
        target_h = ih;
        target_w = target_h * ratio;
    }

    // Grow tiny faces towards the minimum size, no further than the image allows.
    let min_size = spec.min_crop_size;
    if target_w < min_size || target_h < min_size {
        let wanted = (min_size / target_w).max(min_size / target_h);
        let scale = wanted.min(iw / target_w).min(ih / target_h);
        if scale > 1.0 {
            target_w *= scale;
            target_h *= scale;
        }
    }

    let mut crop_x = center_x - target_w / 2.0;
    let mut crop_y = eye_center_y - target_h * spec.eye_position_ratio;

    if crop_x < 0.0 {
        log::debug!(target: "icaphoto::crop", "clamping left boundary");
        crop_x = 0.0;
    }
    if crop_x + target_w > iw {
        log::debug!(target: "icaphoto::crop", "clamping right boundary");
        crop_x = iw - target_w;
    }
    if crop_y < 0.0 {
        log::debug!(target: "icaphoto::crop", "clamping top boundary");
        crop_y = 0.0;
    }
    if crop_y + target_h > ih {
        log::debug!(target: "icaphoto::crop", "clamping bottom boundary");
        crop_y = ih - target_h;
    }

    let rect = CropRect {
        x: crop_x.max(0.0),
        y: crop_y.max(0.0),
        w: target_w,
        h: target_h,
    };

    log::debug!(
        target: "icaphoto::crop",
        "crop x={:.0}, y={:.0}, w={:.0}, h={:.0}",
        rect.x,
        rect.y,
        rect.w,
        rect.h
    );
    rect
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Image dimensions from a single pixel upwards.
    fn dimensions_strategy() -> impl Strategy<Value = (u32, u32)> {
        (1u32..=4000, 1u32..=4000)
    }

    fn coord() -> impl Strategy<Value = f64> {
        0.0f64..=1.0
    }

    /// A face with every crop landmark present at arbitrary positions.
    fn face_strategy() -> impl Strategy<Value = LandmarkFrame> {
        (
            (coord(), coord(), coord()),
            (coord(), coord(), coord(), coord()),
            (coord(), coord()),
        )
            .prop_map(|((chin_y, forehead_y, nose_x), (lc, rc, ley, rey), (nose_y, chin_x))| {
                LandmarkFrame::empty()
                    .with(index::CHIN, chin_x, chin_y)
                    .with(index::FOREHEAD, chin_x, forehead_y)
                    .with(index::NOSE_TIP, nose_x, nose_y)
                    .with(index::LEFT_CHEEK, lc, nose_y)
                    .with(index::RIGHT_CHEEK, rc, nose_y)
                    .with(index::LEFT_EYE_OUTER, lc, ley)
                    .with(index::RIGHT_EYE_OUTER, rc, rey)
            })
    }

    proptest! {
        /// Property: The crop always lies inside the image.
        #[test]
        fn prop_crop_within_bounds(
            (w, h) in dimensions_strategy(),
            face in face_strategy(),
        ) {
            let rect = compute_crop(&face, w, h, &PhotoSpec::default());
            prop_assert!(rect.fits_within(w as f64, h as f64), "{:?} outside {}x{}", rect, w, h);
        }

        /// Property: The crop keeps the target aspect ratio.
        #[test]
        fn prop_crop_keeps_aspect_ratio(
            (w, h) in dimensions_strategy(),
            face in face_strategy(),
        ) {
            let spec = PhotoSpec::default();
            let rect = compute_crop(&face, w, h, &spec);
            prop_assert!(
                (rect.aspect_ratio() - spec.target_aspect_ratio()).abs() < 1e-3,
                "aspect {} for {:?}",
                rect.aspect_ratio(),
                rect
            );
        }

        /// Property: The crop respects the minimum size.
        #[test]
        fn prop_crop_minimum_size(
            (w, h) in dimensions_strategy(),
            face in face_strategy(),
        ) {
            let spec = PhotoSpec::default();
            let min_h = spec.min_crop_size / spec.target_aspect_ratio();
            prop_assume!(w as f64 >= spec.min_crop_size && h as f64 >= min_h);
            let rect = compute_crop(&face, w, h, &spec);
            prop_assert!(rect.w >= 10.0 - 1e-9, "{:?} in {}x{}", rect, w, h);
            prop_assert!(rect.h >= 10.0 - 1e-9, "{:?} in {}x{}", rect, w, h);
        }

        /// Property: Centre crop is centred and deterministic.
        #[test]
        fn prop_center_crop_centered((w, h) in dimensions_strategy()) {
            let spec = PhotoSpec::default();
            let a = center_crop(w, h, &spec);
            let b = center_crop(w, h, &spec);
            prop_assert_eq!(a, b);
            prop_assert!((a.x - (w as f64 - a.x - a.w)).abs() < 1e-6);
            prop_assert!((a.y - (h as f64 - a.y - a.h)).abs() < 1e-6);
            prop_assert!(a.fits_within(w as f64, h as f64));
        }

        /// Property: Without a nose tip the planner always uses the centre crop.
        #[test]
        fn prop_missing_nose_is_center_crop(
            (w, h) in dimensions_strategy(),
            face in face_strategy(),
        ) {
            let spec = PhotoSpec::default();
            let face = face.without(index::NOSE_TIP);
            prop_assert_eq!(compute_crop(&face, w, h, &spec), center_crop(w, h, &spec));
        }
    }
}
