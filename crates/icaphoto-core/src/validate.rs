//! Live-frame compliance checks.
//!
//! [`validate`] scores one detector frame against the photo specification and
//! decides whether the capture button may be enabled. It runs on every video
//! frame, so it does a fixed amount of work per call and keeps no state.
//!
//! # Checks
//!
//! Blocking (reported in [`ValidationResult::messages`]), in this order:
//! 1. Coverage: forehead-to-chin span within `[min_coverage, max_coverage]`
//! 2. Centering: nose tip within `center_tolerance` of the frame centre
//! 3. Rotation: eye-corner line within `max_rotation_degrees` of level
//! 4. Eyes open: mean eye aspect ratio above `eye_open_threshold`
//! 5. Mouth closed: mouth aspect ratio below `mouth_closed_threshold`
//!
//! Non-blocking (reported in [`ValidationResult::warnings`]):
//! 6. Spectacles, only when `spectacles_enabled` is set
//! 7. Lighting, only when frame pixels are supplied
//!
//! Eye and mouth checks whose landmarks are absent pass by assumption and
//! say so in their metrics (`assumed = true`), so a dropped landmark never
//! locks out capture.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::config::PhotoSpec;
use crate::landmarks::LandmarkFrame;
use crate::luminance::sample_center_luma;
use crate::metrics::FaceMetrics;

/// EAR reported when eye landmarks are missing.
const ASSUMED_OPEN_EAR: f64 = 0.3;

/// Luma reported when the lighting patch cannot be sampled.
const NEUTRAL_LUMA: f64 = 128.0;

/// A blocking compliance failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Issue {
    NoFace,
    MoveCloser,
    MoveBack,
    CenterFace,
    StraightenHead,
    OpenEyes,
    CloseMouth,
}

impl Issue {
    /// User-facing instruction.
    pub fn message(self) -> &'static str {
        match self {
            Issue::NoFace => "No face detected",
            Issue::MoveCloser => "Move Closer",
            Issue::MoveBack => "Move Back",
            Issue::CenterFace => "Center your face",
            Issue::StraightenHead => "Straighten your head",
            Issue::OpenEyes => "Open your eyes",
            Issue::CloseMouth => "Close your mouth",
        }
    }
}

/// A non-blocking compliance hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Warning {
    TooDark,
    TooBright,
    Spectacles,
}

impl Warning {
    /// User-facing hint.
    pub fn message(self) -> &'static str {
        match self {
            Warning::TooDark => "Too Dark - Add more light",
            Warning::TooBright => "Too Bright - Reduce glare",
            Warning::Spectacles => "Glasses detected - remove for best results",
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl Serialize for Issue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.message())
    }
}

impl Serialize for Warning {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.message())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CenteringMetric {
    pub is_centered: bool,
    pub offset: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EyesMetric {
    pub is_open: bool,
    pub ear: f64,
    /// True when the landmarks were missing and the eyes were assumed open.
    pub assumed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MouthMetric {
    pub is_closed: bool,
    pub mar: f64,
    /// True when the landmarks were missing and the mouth was assumed closed.
    pub assumed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct SpectaclesMetric {
    pub detected: bool,
    pub confidence: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LightingMetric {
    pub ok: bool,
    pub score: f64,
}

/// Raw outcome of every check, keyed by check name when serialized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationMetrics {
    pub coverage: f64,
    pub centering: CenteringMetric,
    pub rotation: f64,
    pub eyes_open: EyesMetric,
    pub mouth_closed: MouthMetric,
    pub spectacles: SpectaclesMetric,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lighting: Option<LightingMetric>,
}

impl Default for ValidationMetrics {
    fn default() -> Self {
        Self {
            coverage: 0.0,
            centering: CenteringMetric {
                is_centered: false,
                offset: 1.0,
            },
            rotation: 0.0,
            eyes_open: EyesMetric {
                is_open: true,
                ear: ASSUMED_OPEN_EAR,
                assumed: true,
            },
            mouth_closed: MouthMetric {
                is_closed: true,
                mar: 0.0,
                assumed: true,
            },
            spectacles: SpectaclesMetric::default(),
            lighting: None,
        }
    }
}

/// Outcome of one validation call.
///
/// `is_pass` is derived from `messages` at construction and the fields are
/// read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    is_pass: bool,
    messages: Vec<Issue>,
    warnings: Vec<Warning>,
    metrics: ValidationMetrics,
}

impl ValidationResult {
    fn new(messages: Vec<Issue>, warnings: Vec<Warning>, metrics: ValidationMetrics) -> Self {
        Self {
            is_pass: messages.is_empty(),
            messages,
            warnings,
            metrics,
        }
    }

    pub fn is_pass(&self) -> bool {
        self.is_pass
    }

    /// Blocking issues in check order.
    pub fn messages(&self) -> &[Issue] {
        &self.messages
    }

    /// Non-blocking hints in check order.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn metrics(&self) -> &ValidationMetrics {
        &self.metrics
    }
}

/// The video frame a landmark set was detected on.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameInput<'a> {
    pub width: u32,
    pub height: u32,
    /// RGBA pixels, row-major. Enables the lighting check when present.
    pub rgba: Option<&'a [u8]>,
}

impl<'a> FrameInput<'a> {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            rgba: None,
        }
    }

    pub fn with_pixels(self, rgba: &'a [u8]) -> Self {
        Self {
            rgba: Some(rgba),
            ..self
        }
    }
}

/// Validate the detector output for one frame.
///
/// The first face is validated; an empty slice fails with
/// [`Issue::NoFace`].
pub fn validate_faces(faces: &[LandmarkFrame], frame: FrameInput<'_>, spec: &PhotoSpec) -> ValidationResult {
    match faces.first() {
        Some(face) => validate(face, frame, spec),
        None => ValidationResult::new(vec![Issue::NoFace], Vec::new(), ValidationMetrics::default()),
    }
}

/// Run every compliance check against one face.
pub fn validate(face: &LandmarkFrame, frame: FrameInput<'_>, spec: &PhotoSpec) -> ValidationResult {
    let measured = FaceMetrics::from_landmarks(face);
    let mut messages = Vec::new();
    let mut warnings = Vec::new();

    let coverage = measured.coverage.unwrap_or(0.0);
    if coverage < spec.min_coverage {
        messages.push(Issue::MoveCloser);
    } else if coverage > spec.max_coverage {
        messages.push(Issue::MoveBack);
    }

    let offset = measured.centering_offset.unwrap_or(1.0);
    let centering = CenteringMetric {
        is_centered: offset < spec.center_tolerance,
        offset,
    };
    if !centering.is_centered {
        messages.push(Issue::CenterFace);
    }

    let rotation = measured.rotation_degrees.unwrap_or(0.0);
    if rotation.abs() > spec.max_rotation_degrees {
        messages.push(Issue::StraightenHead);
    }

    let eyes_open = match measured.eye_aspect_ratio {
        Some(ear) => EyesMetric {
            is_open: ear > spec.eye_open_threshold,
            ear,
            assumed: false,
        },
        None => ValidationMetrics::default().eyes_open,
    };
    if !eyes_open.is_open {
        messages.push(Issue::OpenEyes);
    }

    let mouth_closed = match measured.mouth_aspect_ratio {
        Some(mar) => MouthMetric {
            is_closed: mar < spec.mouth_closed_threshold,
            mar,
            assumed: false,
        },
        None => ValidationMetrics::default().mouth_closed,
    };
    if !mouth_closed.is_closed {
        messages.push(Issue::CloseMouth);
    }

    let spectacles = check_spectacles(&measured, spec);
    if spectacles.detected {
        warnings.push(Warning::Spectacles);
    }

    let lighting = frame.rgba.map(|rgba| check_lighting(rgba, frame.width, frame.height, spec));
    if let Some(LightingMetric { ok: false, score }) = lighting {
        warnings.push(if score < spec.min_brightness {
            Warning::TooDark
        } else {
            Warning::TooBright
        });
    }

    let result = ValidationResult::new(
        messages,
        warnings,
        ValidationMetrics {
            coverage,
            centering,
            rotation,
            eyes_open,
            mouth_closed,
            spectacles,
            lighting,
        },
    );
    log::trace!(target: "icaphoto::validate", "pass={} issues={:?}", result.is_pass, result.messages);
    result
}

fn check_spectacles(measured: &FaceMetrics, spec: &PhotoSpec) -> SpectaclesMetric {
    if !spec.spectacles_enabled {
        return SpectaclesMetric::default();
    }
    match measured.eye_cheek_ratio {
        Some(ratio) => SpectaclesMetric {
            detected: ratio > spec.spectacle_ratio_threshold,
            confidence: ratio,
        },
        None => SpectaclesMetric::default(),
    }
}

fn check_lighting(rgba: &[u8], width: u32, height: u32, spec: &PhotoSpec) -> LightingMetric {
    match sample_center_luma(rgba, width, height, spec.lighting_sample_size) {
        Some(score) => LightingMetric {
            ok: (spec.min_brightness..=spec.max_brightness).contains(&score),
            score,
        },
        None => LightingMetric {
            ok: true,
            score: NEUTRAL_LUMA,
        },
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::landmarks::{Point, LANDMARK_COUNT};
    use proptest::prelude::*;

    /// Frames with every landmark independently present or absent.
    fn frame_strategy() -> impl Strategy<Value = LandmarkFrame> {
        proptest::collection::vec(
            proptest::option::of((0.0f64..=1.0, 0.0f64..=1.0).prop_map(|(x, y)| Point::new(x, y))),
            LANDMARK_COUNT,
        )
        .prop_map(LandmarkFrame::new)
    }

    proptest! {
        /// Property: Pass iff there are no blocking messages.
        #[test]
        fn prop_pass_iff_no_messages(face in frame_strategy()) {
            let result = validate(&face, FrameInput::new(640, 480), &PhotoSpec::default());
            prop_assert_eq!(result.is_pass(), result.messages().is_empty());
        }

        /// Property: Validation is deterministic.
        #[test]
        fn prop_validate_is_pure(face in frame_strategy()) {
            let spec = PhotoSpec::default();
            let a = validate(&face, FrameInput::new(640, 480), &spec);
            let b = validate(&face, FrameInput::new(640, 480), &spec);
            prop_assert_eq!(a, b);
        }

        /// Property: Spectacles never surface while disabled.
        #[test]
        fn prop_spectacles_silent_by_default(face in frame_strategy()) {
            let result = validate(&face, FrameInput::new(640, 480), &PhotoSpec::default());
            prop_assert!(!result.warnings().contains(&Warning::Spectacles));
            prop_assert!(!result.metrics().spectacles.detected);
        }

        /// Property: Missing eye landmarks never block capture.
        #[test]
        fn prop_missing_eyes_never_block(face in frame_strategy()) {
            let face = face.without(crate::landmarks::index::LEFT_EYE_TOP);
            let result = validate(&face, FrameInput::new(640, 480), &PhotoSpec::default());
            prop_assert!(!result.messages().contains(&Issue::OpenEyes));
        }
    }
}
