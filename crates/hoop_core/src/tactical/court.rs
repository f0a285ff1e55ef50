//! Canonical court landmarks in tactical-view pixels.
//!
//! The landmark order is the index contract shared with the external
//! keypoint detector: detected keypoint `i` always refers to landmark `i`.
//!
//! | Index | Landmark |
//! |-------|----------|
//! | 0-5   | left baseline, top to bottom (corner, corner-three, lane, lane, corner-three, corner) |
//! | 6-7   | half-court line (bottom, top) |
//! | 8-9   | left free-throw line ends |
//! | 10-15 | right baseline, bottom to top (mirror of 0-5) |
//! | 16-17 | right free-throw line ends |

use serde::{Deserialize, Serialize};

use crate::config::CourtConfig;
use crate::models::Point2;

/// Corner-three line offset from the sideline (m)
const CORNER_THREE_NEAR_M: f64 = 0.91;
const CORNER_THREE_FAR_M: f64 = 14.1;
/// Lane edges measured from the top sideline (m)
const LANE_TOP_M: f64 = 5.18;
const LANE_BOTTOM_M: f64 = 10.0;
/// Free-throw line distance from the baseline (m)
const FREE_THROW_M: f64 = 5.79;

pub const LANDMARK_COUNT: usize = 18;

pub const LANDMARK_NAMES: [&str; LANDMARK_COUNT] = [
    "left_top_corner",
    "left_top_corner_three",
    "left_lane_top",
    "left_lane_bottom",
    "left_bottom_corner_three",
    "left_bottom_corner",
    "half_court_bottom",
    "half_court_top",
    "left_free_throw_top",
    "left_free_throw_bottom",
    "right_bottom_corner",
    "right_bottom_corner_three",
    "right_lane_bottom",
    "right_lane_top",
    "right_top_corner_three",
    "right_top_corner",
    "right_free_throw_top",
    "right_free_throw_bottom",
];

/// Physical landmark positions in meters, in index order.
fn landmarks_m(width_m: f64, height_m: f64) -> [Point2; LANDMARK_COUNT] {
    let mid = width_m / 2.0;
    let right_ft = width_m - FREE_THROW_M;
    [
        (0.0, 0.0),
        (0.0, CORNER_THREE_NEAR_M),
        (0.0, LANE_TOP_M),
        (0.0, LANE_BOTTOM_M),
        (0.0, CORNER_THREE_FAR_M),
        (0.0, height_m),
        (mid, height_m),
        (mid, 0.0),
        (FREE_THROW_M, LANE_TOP_M),
        (FREE_THROW_M, LANE_BOTTOM_M),
        (width_m, height_m),
        (width_m, CORNER_THREE_FAR_M),
        (width_m, LANE_BOTTOM_M),
        (width_m, LANE_TOP_M),
        (width_m, CORNER_THREE_NEAR_M),
        (width_m, 0.0),
        (right_ft, LANE_TOP_M),
        (right_ft, LANE_BOTTOM_M),
    ]
}

/// Canonical keypoint layout, computed once from the court configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourtLayout {
    pub width_px: u32,
    pub height_px: u32,
    pub keypoints: Vec<Point2>,
    /// Landmark name per keypoint index
    #[serde(default)]
    pub names: Vec<String>,
}

impl CourtLayout {
    /// `pixel = floor((meters / court_meters) * image_pixels)` per axis.
    pub fn from_config(court: &CourtConfig) -> Self {
        let w_px = f64::from(court.image_width_px);
        let h_px = f64::from(court.image_height_px);
        let keypoints = landmarks_m(court.width_m, court.height_m)
            .iter()
            .map(|&(x, y)| {
                (
                    ((x / court.width_m) * w_px).floor(),
                    ((y / court.height_m) * h_px).floor(),
                )
            })
            .collect();
        Self {
            width_px: court.image_width_px,
            height_px: court.image_height_px,
            keypoints,
            names: LANDMARK_NAMES.iter().map(|name| name.to_string()).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.keypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keypoints.is_empty()
    }

    /// Inside `[0, width] x [0, height]`, edges included.
    pub fn contains(&self, p: Point2) -> bool {
        (0.0..=f64::from(self.width_px)).contains(&p.0)
            && (0.0..=f64::from(self.height_px)).contains(&p.1)
    }
}

impl Default for CourtLayout {
    fn default() -> Self {
        Self::from_config(&CourtConfig::default())
    }
}
