//! Vector helpers shared by the crop planner and the validator.

use crate::landmarks::Point;

/// Smallest denominator used for landmark aspect ratios.
pub const RATIO_EPSILON: f64 = 0.001;

/// Euclidean distance between two points.
#[inline]
pub fn distance(a: Point, b: Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    (dx * dx + dy * dy).sqrt()
}

/// Angle of the vector `from -> to` in degrees, measured from the +x axis.
///
/// Positive angles point downward because image y grows downward.
#[inline]
pub fn angle_degrees(from: Point, to: Point) -> f64 {
    (to.y - from.y).atan2(to.x - from.x).to_degrees()
}

/// `vertical / horizontal` with the denominator floored at [`RATIO_EPSILON`].
///
/// Both gaps are taken as absolute values so landmark ordering does not
/// matter.
#[inline]
pub fn aspect_ratio(vertical: f64, horizontal: f64) -> f64 {
    vertical.abs() / horizontal.abs().max(RATIO_EPSILON)
}

/// Vertical gap between `top` and `bottom` over the horizontal gap between
/// `a` and `b`.
#[inline]
pub fn gap_ratio(top: Point, bottom: Point, a: Point, b: Point) -> f64 {
    aspect_ratio(top.y - bottom.y, a.x - b.x)
}
