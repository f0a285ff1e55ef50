//! # Ball Possession Estimator
//!
//! Per frame, the player nearest to the ball holds it, provided the ball is
//! within the possession distance.
//!
//! ## Algorithm
//! 1. No ball in the frame -> `NoHolder`
//! 2. Ball reference = center of the (lowest id, well formed) ball box
//! 3. Player reference = foot position or nearest box edge (config)
//! 4. Nearest player wins; ties go to the lowest track id
//! 5. Nearest distance above `max_distance_px` -> `NoHolder`
//! 6. Optional: holder runs shorter than `min_hold_frames` become `NoHolder`

use rayon::prelude::*;
use tracing::debug;

use crate::config::{PossessionConfig, PossessionReference};
use crate::error::{ensure_frame_count, Result};
use crate::geometry::{distance, foot_position, nearest_point_on_box};
use crate::models::{BallTrackFrame, BoundingBox, PlayerTrackFrame, Point2, Possession, TrackId};

/// Distances closer than this are treated as equal.
const TIE_EPS: f64 = 1e-9;

#[derive(Debug, Clone, Default)]
pub struct BallPossessionEstimator {
    config: PossessionConfig,
}

impl BallPossessionEstimator {
    pub fn new(config: PossessionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PossessionConfig {
        &self.config
    }

    /// One possession value per frame.
    pub fn estimate(
        &self,
        player_tracks: &[PlayerTrackFrame],
        ball_tracks: &[BallTrackFrame],
    ) -> Result<Vec<Possession>> {
        ensure_frame_count("ball_tracks", player_tracks.len(), ball_tracks.len())?;

        let raw: Vec<Possession> = player_tracks
            .par_iter()
            .zip(ball_tracks.par_iter())
            .map(|(players, ball)| self.estimate_frame(players, ball))
            .collect();

        Ok(drop_short_holds(&raw, self.config.min_hold_frames))
    }

    /// Possession for a single frame, without run-length filtering.
    pub fn estimate_frame(&self, players: &PlayerTrackFrame, ball: &BallTrackFrame) -> Possession {
        let Some(ball_center) = ball_reference(ball) else {
            return Possession::NoHolder;
        };

        let mut best: Option<(TrackId, f64)> = None;
        for (&track_id, bbox) in players {
            let bbox = match bbox.checked(track_id) {
                Ok(b) => b,
                Err(err) => {
                    debug!(error = %err, "skipping player for possession");
                    continue;
                }
            };
            let d = self.player_distance(&bbox, ball_center);
            // Ascending id order: a later player must be strictly closer
            match best {
                Some((_, best_d)) if d >= best_d - TIE_EPS => {}
                _ => best = Some((track_id, d)),
            }
        }

        match best {
            Some((track_id, d)) if d <= self.config.max_distance_px => Possession::HeldBy(track_id),
            _ => Possession::NoHolder,
        }
    }

    fn player_distance(&self, bbox: &BoundingBox, ball_center: Point2) -> f64 {
        match self.config.reference {
            PossessionReference::FootPosition => distance(foot_position(bbox), ball_center),
            PossessionReference::NearestEdge => {
                distance(nearest_point_on_box(bbox, ball_center), ball_center)
            }
        }
    }
}

/// Center of the lowest-id well-formed ball box, if any.
fn ball_reference(ball: &BallTrackFrame) -> Option<Point2> {
    ball.iter().find_map(|(&track_id, bbox)| match bbox.checked(track_id) {
        Ok(b) => Some(b.center()),
        Err(err) => {
            debug!(error = %err, "ignoring ball detection");
            None
        }
    })
}

/// Replace holder runs shorter than `min_frames` with `NoHolder`.
///
/// `NoHolder` runs are kept as they are; `min_frames <= 1` is the identity.
pub fn drop_short_holds(possession: &[Possession], min_frames: usize) -> Vec<Possession> {
    let mut out = possession.to_vec();
    if min_frames <= 1 {
        return out;
    }

    let mut start = 0;
    while start < out.len() {
        let current = out[start];
        let end = out[start..]
            .iter()
            .position(|p| *p != current)
            .map_or(out.len(), |offset| start + offset);
        if current != Possession::NoHolder && end - start < min_frames {
            for p in &mut out[start..end] {
                *p = Possession::NoHolder;
            }
        }
        start = end;
    }
    out
}
