//! Facial landmark snapshots.
//!
//! A [`LandmarkFrame`] holds the 468-point face mesh produced by the external
//! detector for one video frame. Coordinates are normalized to `[0, 1]`
//! relative to the frame width and height, origin top-left. Any individual
//! point may be missing when the detector drops it; consumers must treat
//! every lookup as optional.

use serde::{Deserialize, Serialize};

/// Number of points in the face mesh schema.
pub const LANDMARK_COUNT: usize = 468;

/// Anatomical indices into the face mesh.
///
/// These are part of the detector's output schema and must never be
/// renumbered.
pub mod index {
    pub const NOSE_TIP: usize = 1;
    pub const FOREHEAD: usize = 10;
    pub const MOUTH_TOP: usize = 13;
    pub const MOUTH_BOTTOM: usize = 14;
    pub const LEFT_EYE_OUTER: usize = 33;
    pub const MOUTH_LEFT: usize = 61;
    pub const LEFT_EYE_INNER: usize = 133;
    pub const LEFT_EYE_BOTTOM: usize = 145;
    pub const CHIN: usize = 152;
    pub const LEFT_EYE_TOP: usize = 159;
    pub const LEFT_CHEEK: usize = 234;
    pub const RIGHT_EYE_OUTER: usize = 263;
    pub const MOUTH_RIGHT: usize = 291;
    pub const RIGHT_EYE_INNER: usize = 362;
    pub const RIGHT_EYE_BOTTOM: usize = 374;
    pub const RIGHT_EYE_TOP: usize = 386;
    pub const RIGHT_CHEEK: usize = 454;
}

/// A normalized 2D landmark position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Landmark positions for one frame, indexed by [`index`] constants.
#[derive(Debug, Clone, PartialEq)]
pub struct LandmarkFrame {
    points: Vec<Option<Point>>,
}

impl Default for LandmarkFrame {
    fn default() -> Self {
        Self::empty()
    }
}

impl LandmarkFrame {
    /// A frame where every landmark is absent.
    pub fn empty() -> Self {
        Self {
            points: vec![None; LANDMARK_COUNT],
        }
    }

    /// Build a frame from detector output.
    ///
    /// Short input is padded with absent points, long input is truncated to
    /// [`LANDMARK_COUNT`], and non-finite coordinates are treated as absent.
    pub fn new(mut points: Vec<Option<Point>>) -> Self {
        points.resize(LANDMARK_COUNT, None);
        for slot in points.iter_mut() {
            if slot.is_some_and(|p| !p.is_finite()) {
                *slot = None;
            }
        }
        Self { points }
    }

    /// Build a frame from interleaved `x, y` pairs.
    ///
    /// A pair containing NaN marks an absent landmark. A trailing unpaired
    /// value is ignored.
    pub fn from_flat(coords: &[f32]) -> Self {
        let points = coords
            .chunks_exact(2)
            .map(|pair| Some(Point::new(pair[0] as f64, pair[1] as f64)))
            .collect();
        Self::new(points)
    }

    /// Look up one landmark. Out-of-range indices are absent.
    #[inline]
    pub fn get(&self, index: usize) -> Option<Point> {
        self.points.get(index).copied().flatten()
    }

    /// Replace one landmark. Out-of-range indices are ignored.
    pub fn set(&mut self, index: usize, point: Option<Point>) {
        if let Some(slot) = self.points.get_mut(index) {
            *slot = point.filter(Point::is_finite);
        }
    }

    /// Builder form of [`LandmarkFrame::set`] for a present point.
    pub fn with(mut self, index: usize, x: f64, y: f64) -> Self {
        self.set(index, Some(Point::new(x, y)));
        self
    }

    /// Builder form of [`LandmarkFrame::set`] that removes a point.
    pub fn without(mut self, index: usize) -> Self {
        self.set(index, None);
        self
    }

    /// Number of landmarks present in this frame.
    pub fn present_count(&self) -> usize {
        self.points.iter().filter(|p| p.is_some()).count()
    }
}
