//! # Analysis Configuration
//!
//! Every tunable constant of the analysis lives here instead of being
//! scattered through the components.
//!
//! ## Usage
//!
//! ```rust
//! use hoop_core::config::AnalysisConfig;
//!
//! // Default thresholds
//! let config = AnalysisConfig::default();
//!
//! // Tighter gates, short possession runs filtered out
//! let strict = AnalysisConfig::strict();
//!
//! // From environment variable
//! let from_env = AnalysisConfig::from_env_or_default();
//! ```
//!
//! ## Environment Variables
//!
//! - `HOOP_ANALYSIS_PROFILE`: Select preset (strict, lenient, default)

mod court_config;
mod tracking_config;

pub use court_config::{CourtConfig, KeypointConfig};
pub use tracking_config::{BallTrackConfig, PossessionConfig, PossessionReference};

use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

use crate::error::{AnalysisError, Result};

pub const PROFILE_ENV_VAR: &str = "HOOP_ANALYSIS_PROFILE";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub court: CourtConfig,
    pub keypoints: KeypointConfig,
    pub possession: PossessionConfig,
    pub ball_track: BallTrackConfig,
}

impl AnalysisConfig {
    /// Strict preset - tighter possession gate, flicker filtered, stricter keypoints
    pub fn strict() -> Self {
        Self {
            keypoints: KeypointConfig {
                max_ratio_error: 0.5,
                ..KeypointConfig::default()
            },
            possession: PossessionConfig {
                max_distance_px: 50.0,
                min_hold_frames: 3,
                ..PossessionConfig::default()
            },
            ball_track: BallTrackConfig {
                max_jump_px_per_frame: 20.0,
                ..BallTrackConfig::default()
            },
            ..Self::default()
        }
    }

    /// Lenient preset - wider gates, raw ball tracks
    pub fn lenient() -> Self {
        Self {
            keypoints: KeypointConfig {
                max_ratio_error: 1.2,
                ..KeypointConfig::default()
            },
            possession: PossessionConfig {
                max_distance_px: 100.0,
                reference: PossessionReference::NearestEdge,
                ..PossessionConfig::default()
            },
            ball_track: BallTrackConfig {
                remove_outliers: false,
                ..BallTrackConfig::default()
            },
            ..Self::default()
        }
    }

    /// Preset by name; unknown names fall back to the default.
    pub fn from_profile(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "strict" => Self::strict(),
            "lenient" => Self::lenient(),
            _ => Self::default(),
        }
    }

    /// Load from environment variable HOOP_ANALYSIS_PROFILE or use default
    pub fn from_env_or_default() -> Self {
        Self::from_profile(&env::var(PROFILE_ENV_VAR).unwrap_or_default())
    }

    /// Parse a YAML document; missing sections keep their defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: AnalysisConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    pub fn validate(&self) -> Result<()> {
        let court = &self.court;
        if !(court.width_m > 0.0 && court.height_m > 0.0) {
            return Err(AnalysisError::InvalidConfig(format!(
                "court dimensions must be positive, got {} x {} m",
                court.width_m, court.height_m
            )));
        }
        if court.image_width_px == 0 || court.image_height_px == 0 {
            return Err(AnalysisError::InvalidConfig(format!(
                "tactical image must be non-empty, got {} x {} px",
                court.image_width_px, court.image_height_px
            )));
        }
        if !(self.keypoints.max_ratio_error > 0.0) {
            return Err(AnalysisError::InvalidConfig(format!(
                "keypoints.max_ratio_error must be positive, got {}",
                self.keypoints.max_ratio_error
            )));
        }
        if !(self.possession.max_distance_px >= 0.0) {
            return Err(AnalysisError::InvalidConfig(format!(
                "possession.max_distance_px must be non-negative, got {}",
                self.possession.max_distance_px
            )));
        }
        if self.possession.min_hold_frames == 0 {
            return Err(AnalysisError::InvalidConfig(
                "possession.min_hold_frames must be at least 1".to_string(),
            ));
        }
        if !(self.ball_track.max_jump_px_per_frame > 0.0) {
            return Err(AnalysisError::InvalidConfig(format!(
                "ball_track.max_jump_px_per_frame must be positive, got {}",
                self.ball_track.max_jump_px_per_frame
            )));
        }
        if self.keypoints.min_detected_for_validation < 3 {
            tracing::warn!(
                min_detected = self.keypoints.min_detected_for_validation,
                "keypoint validation needs three points; smaller frames are skipped anyway"
            );
        }
        Ok(())
    }
}
