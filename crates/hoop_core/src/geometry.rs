//! # Geometry Helpers
//!
//! Plain 2D helpers shared by the possession estimator, the keypoint
//! validator and the tactical converter.

use crate::models::{BoundingBox, Point2};

/// Euclidean distance between two points.
pub fn distance(p: Point2, q: Point2) -> f64 {
    let dx = p.0 - q.0;
    let dy = p.1 - q.1;
    (dx * dx + dy * dy).sqrt()
}

/// Bottom-center of a box: the player's ground-contact point.
pub fn foot_position(bbox: &BoundingBox) -> Point2 {
    ((bbox.x1 + bbox.x2) / 2.0, bbox.y2)
}

/// Closest point of a box to `p` (the point itself when it lies inside).
pub fn nearest_point_on_box(bbox: &BoundingBox, p: Point2) -> Point2 {
    (p.0.clamp(bbox.x1, bbox.x2), p.1.clamp(bbox.y1, bbox.y2))
}

/// Linear interpolation between two points, `t` in `[0, 1]`.
pub fn lerp(a: Point2, b: Point2, t: f64) -> Point2 {
    (a.0 + (b.0 - a.0) * t, a.1 + (b.1 - a.1) * t)
}
