//! Per-frame track geometry handed over by the external detector/tracker.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};

/// Stable identity assigned by the external multi-frame tracker.
pub type TrackId = u32;

/// 2D point in pixel space, serialised as `[x, y]`.
pub type Point2 = (f64, f64);

/// Axis-aligned box in pixel coordinates, serialised as `[x1, y1, x2, y2]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct BoundingBox {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl BoundingBox {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn center(&self) -> Point2 {
        ((self.x1 + self.x2) / 2.0, (self.y1 + self.y2) / 2.0)
    }

    /// Finite coordinates with `x1 <= x2` and `y1 <= y2`.
    pub fn is_well_formed(&self) -> bool {
        [self.x1, self.y1, self.x2, self.y2].iter().all(|v| v.is_finite())
            && self.x1 <= self.x2
            && self.y1 <= self.y2
    }

    /// Returns the box unchanged if well formed, `MalformedBoundingBox` otherwise.
    pub fn checked(&self, track_id: TrackId) -> Result<BoundingBox> {
        if self.is_well_formed() {
            Ok(*self)
        } else {
            Err(AnalysisError::MalformedBoundingBox {
                track_id,
                x1: self.x1,
                y1: self.y1,
                x2: self.x2,
                y2: self.y2,
            })
        }
    }
}

impl From<[f64; 4]> for BoundingBox {
    fn from(v: [f64; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }
}

impl From<BoundingBox> for [f64; 4] {
    fn from(b: BoundingBox) -> Self {
        [b.x1, b.y1, b.x2, b.y2]
    }
}

/// Track id -> box for one frame. Ordered by id so every scan is deterministic.
pub type PlayerTrackFrame = BTreeMap<TrackId, BoundingBox>;

/// Usually zero or one entry; empty when the ball is not visible.
pub type BallTrackFrame = BTreeMap<TrackId, BoundingBox>;

/// Track id -> raw team label (1 or 2) for one frame.
pub type TeamAssignmentFrame = BTreeMap<TrackId, u8>;

/// Detected court keypoints for one frame, parallel-indexed to the canonical
/// layout. `(0, 0)` (or any non-positive coordinate) means "not detected".
pub type KeypointFrame = Vec<Point2>;

/// Track id -> position in tactical-view pixels for one frame.
pub type TacticalFrame = BTreeMap<TrackId, Point2>;

/// A keypoint counts as detected only when both coordinates are strictly
/// positive (and finite).
pub fn is_detected(p: &Point2) -> bool {
    p.0 > 0.0 && p.1 > 0.0 && p.0.is_finite() && p.1.is_finite()
}

/// Indices of detected keypoints, ascending.
pub fn detected_indices(frame: &[Point2]) -> Vec<usize> {
    frame
        .iter()
        .enumerate()
        .filter(|(_, p)| is_detected(p))
        .map(|(i, _)| i)
        .collect()
}
