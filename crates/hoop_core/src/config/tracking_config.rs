//! Possession and ball-track settings.

use serde::{Deserialize, Serialize};

/// Which point of a player's box is measured against the ball center.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PossessionReference {
    /// Bottom-center of the player box
    #[default]
    FootPosition,
    /// Closest point of the player box (zero when the ball overlaps it)
    NearestEdge,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PossessionConfig {
    /// Ball farther than this from every player means nobody holds it
    pub max_distance_px: f64,
    pub reference: PossessionReference,
    /// Holder runs shorter than this many frames are dropped; 1 disables
    pub min_hold_frames: usize,
}

impl Default for PossessionConfig {
    fn default() -> Self {
        Self {
            max_distance_px: 70.0,
            reference: PossessionReference::FootPosition,
            min_hold_frames: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BallTrackConfig {
    /// Allowed ball center displacement per elapsed frame
    pub max_jump_px_per_frame: f64,
    pub remove_outliers: bool,
    pub interpolate: bool,
}

impl Default for BallTrackConfig {
    fn default() -> Self {
        Self {
            max_jump_px_per_frame: 25.0,
            remove_outliers: true,
            interpolate: true,
        }
    }
}
