//! Court and keypoint-validation settings.

use serde::{Deserialize, Serialize};

/// Real-world court size and the tactical diagram it is drawn into.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CourtConfig {
    /// Court length in meters (baseline to baseline)
    pub width_m: f64,
    /// Court width in meters (sideline to sideline)
    pub height_m: f64,
    /// Tactical diagram width in pixels
    pub image_width_px: u32,
    /// Tactical diagram height in pixels
    pub image_height_px: u32,
}

impl Default for CourtConfig {
    fn default() -> Self {
        Self {
            width_m: 28.0,
            height_m: 15.0,
            image_width_px: 300,
            image_height_px: 161,
        }
    }
}

/// Thresholds for rejecting inconsistent detected keypoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeypointConfig {
    /// Relative distance-ratio error above which a keypoint is zeroed
    pub max_ratio_error: f64,
    /// Frames with fewer detected keypoints are left untouched
    pub min_detected_for_validation: usize,
}

impl Default for KeypointConfig {
    fn default() -> Self {
        Self {
            max_ratio_error: 0.8,
            min_detected_for_validation: 3,
        }
    }
}
