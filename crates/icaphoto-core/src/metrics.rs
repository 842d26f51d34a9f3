//! Per-frame face measurements derived from landmarks.
//!
//! All values are in normalized frame units except the rotation, which is
//! in degrees. A measurement whose landmarks are absent is `None`; policy
//! for what that means belongs to the validator.

use crate::geometry::{angle_degrees, distance, gap_ratio};
use crate::landmarks::{index, LandmarkFrame};

/// Measurements for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FaceMetrics {
    /// Forehead-to-chin span as a fraction of frame height.
    pub coverage: Option<f64>,
    /// Horizontal distance of the nose tip from the frame centre.
    pub centering_offset: Option<f64>,
    /// Tilt of the outer-eye-corner line in degrees.
    pub rotation_degrees: Option<f64>,
    /// Mean eye aspect ratio over both eyes.
    pub eye_aspect_ratio: Option<f64>,
    /// Mouth aspect ratio.
    pub mouth_aspect_ratio: Option<f64>,
    /// Outer-eye span over cheek span, used by the spectacle heuristic.
    pub eye_cheek_ratio: Option<f64>,
}

impl FaceMetrics {
    pub fn from_landmarks(face: &LandmarkFrame) -> Self {
        Self {
            coverage: coverage(face),
            centering_offset: centering_offset(face),
            rotation_degrees: rotation_degrees(face),
            eye_aspect_ratio: eye_aspect_ratio(face),
            mouth_aspect_ratio: mouth_aspect_ratio(face),
            eye_cheek_ratio: eye_cheek_ratio(face),
        }
    }
}

fn coverage(face: &LandmarkFrame) -> Option<f64> {
    let chin = face.get(index::CHIN)?;
    let top = face.get(index::FOREHEAD)?;
    Some((chin.y - top.y).abs())
}

fn centering_offset(face: &LandmarkFrame) -> Option<f64> {
    let nose = face.get(index::NOSE_TIP)?;
    Some((nose.x - 0.5).abs())
}

fn rotation_degrees(face: &LandmarkFrame) -> Option<f64> {
    let left = face.get(index::LEFT_EYE_OUTER)?;
    let right = face.get(index::RIGHT_EYE_OUTER)?;
    Some(angle_degrees(left, right))
}

/// Mean EAR; every one of the eight eye landmarks must be present.
fn eye_aspect_ratio(face: &LandmarkFrame) -> Option<f64> {
    let left = gap_ratio(
        face.get(index::LEFT_EYE_TOP)?,
        face.get(index::LEFT_EYE_BOTTOM)?,
        face.get(index::LEFT_EYE_OUTER)?,
        face.get(index::LEFT_EYE_INNER)?,
    );
    let right = gap_ratio(
        face.get(index::RIGHT_EYE_TOP)?,
        face.get(index::RIGHT_EYE_BOTTOM)?,
        face.get(index::RIGHT_EYE_OUTER)?,
        face.get(index::RIGHT_EYE_INNER)?,
    );
    Some((left + right) / 2.0)
}

fn mouth_aspect_ratio(face: &LandmarkFrame) -> Option<f64> {
    Some(gap_ratio(
        face.get(index::MOUTH_TOP)?,
        face.get(index::MOUTH_BOTTOM)?,
        face.get(index::MOUTH_RIGHT)?,
        face.get(index::MOUTH_LEFT)?,
    ))
}

fn eye_cheek_ratio(face: &LandmarkFrame) -> Option<f64> {
    let left_eye = face.get(index::LEFT_EYE_OUTER)?;
    let right_eye = face.get(index::RIGHT_EYE_OUTER)?;
    let left_cheek = face.get(index::LEFT_CHEEK)?;
    let right_cheek = face.get(index::RIGHT_CHEEK)?;

    let cheek_width = distance(left_cheek, right_cheek);
    if cheek_width < f64::EPSILON {
        return None;
    }
    Some(distance(left_eye, right_eye) / cheek_width)
}
