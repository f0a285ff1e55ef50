//! # Tactical View Converter
//!
//! Projects player foot positions from broadcast pixels onto the canonical
//! top-down court diagram, one homography per frame.

use rayon::prelude::*;
use tracing::debug;

use super::court::CourtLayout;
use super::homography::{Homography, MIN_CORRESPONDENCES};
use super::keypoint_validator::validate_frame;
use crate::config::{AnalysisConfig, CourtConfig, KeypointConfig};
use crate::error::{ensure_frame_count, AnalysisError, Result};
use crate::geometry::foot_position;
use crate::models::{is_detected, KeypointFrame, PlayerTrackFrame, Point2, TacticalFrame};

#[derive(Debug, Clone)]
pub struct TacticalViewConverter {
    layout: CourtLayout,
    keypoint_config: KeypointConfig,
}

impl TacticalViewConverter {
    pub fn new(court: &CourtConfig, keypoint_config: KeypointConfig) -> Self {
        Self {
            layout: CourtLayout::from_config(court),
            keypoint_config,
        }
    }

    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self::new(&config.court, config.keypoints.clone())
    }

    pub fn layout(&self) -> &CourtLayout {
        &self.layout
    }

    /// Zero out inconsistent keypoints in every frame.
    ///
    /// Works on copies; empty frames mean "nothing detected" and pass through,
    /// as do frames whose length does not match the layout.
    pub fn validate(&self, keypoints_per_frame: &[KeypointFrame]) -> Vec<KeypointFrame> {
        keypoints_per_frame
            .par_iter()
            .enumerate()
            .map(|(frame_idx, frame)| match self.check_keypoint_count(frame_idx, frame) {
                Ok(()) => validate_frame(frame, &self.layout.keypoints, &self.keypoint_config),
                Err(err) => {
                    debug!(error = %err, "keypoint frame left unvalidated");
                    frame.clone()
                }
            })
            .collect()
    }

    /// Tactical positions per frame for every player that projects inside
    /// the diagram.
    ///
    /// Frames without four usable keypoints, with a keypoint count that does
    /// not match the layout, or whose homography cannot be fitted, yield an
    /// empty mapping. Only misaligned sequences fail.
    pub fn project(
        &self,
        keypoints_per_frame: &[KeypointFrame],
        player_tracks: &[PlayerTrackFrame],
    ) -> Result<Vec<TacticalFrame>> {
        ensure_frame_count("player_tracks", keypoints_per_frame.len(), player_tracks.len())?;

        Ok(keypoints_per_frame
            .par_iter()
            .zip(player_tracks.par_iter())
            .enumerate()
            .map(|(frame_idx, (keypoints, players))| {
                self.project_frame(frame_idx, keypoints, players)
            })
            .collect())
    }

    fn project_frame(
        &self,
        frame_idx: usize,
        keypoints: &[Point2],
        players: &PlayerTrackFrame,
    ) -> TacticalFrame {
        let mut positions = TacticalFrame::new();

        if let Err(err) = self.check_keypoint_count(frame_idx, keypoints) {
            debug!(error = %err, "no tactical projection for frame");
            return positions;
        }

        let (source, destination): (Vec<Point2>, Vec<Point2>) = keypoints
            .iter()
            .zip(&self.layout.keypoints)
            .filter(|(detected, _)| is_detected(detected))
            .map(|(detected, canonical)| (*detected, *canonical))
            .unzip();

        if source.len() < MIN_CORRESPONDENCES {
            return positions;
        }

        let homography = match Homography::from_correspondences(&source, &destination) {
            Ok(h) => h,
            Err(err) => {
                debug!(frame = frame_idx, error = %err, "no tactical projection for frame");
                return positions;
            }
        };

        for (&track_id, bbox) in players {
            let bbox = match bbox.checked(track_id) {
                Ok(b) => b,
                Err(err) => {
                    debug!(frame = frame_idx, error = %err, "skipping player");
                    continue;
                }
            };
            match homography.transform_point(foot_position(&bbox)) {
                Ok(p) if self.layout.contains(p) => {
                    positions.insert(track_id, p);
                }
                Ok(_) => {}
                Err(err) => {
                    debug!(frame = frame_idx, track_id, error = %err, "player not projectable");
                }
            }
        }

        positions
    }

    /// Empty frames are fine; anything else must match the layout length.
    fn check_keypoint_count(&self, frame: usize, keypoints: &[Point2]) -> Result<()> {
        let expected = self.layout.len();
        if keypoints.is_empty() || keypoints.len() == expected {
            return Ok(());
        }
        Err(AnalysisError::KeypointCountMismatch {
            frame,
            expected,
            found: keypoints.len(),
        })
    }
}

impl Default for TacticalViewConverter {
    fn default() -> Self {
        Self::from_config(&AnalysisConfig::default())
    }
}
