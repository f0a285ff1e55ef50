//! # Ball Track Cleanup
//!
//! The ball detector fires on heads, shoes and spectators often enough that
//! its raw track needs two passes before possession estimation:
//!
//! 1. `remove_wrong_detections` drops detections that jump farther from the
//!    last accepted one than the ball could travel in the elapsed frames
//! 2. `interpolate_ball_positions` fills the resulting gaps linearly
//!
//! Each frame is reduced to its primary detection: the lowest track id with a
//! well-formed box. Malformed boxes count as absent.

use tracing::debug;

use crate::config::BallTrackConfig;
use crate::geometry::{distance, lerp};
use crate::models::{BallTrackFrame, BoundingBox, TrackId};

/// Track id used for frames filled in by interpolation.
pub const BALL_TRACK_ID: TrackId = 1;

fn primary_detection(frame: &BallTrackFrame) -> Option<(TrackId, BoundingBox)> {
    frame
        .iter()
        .find(|(_, bbox)| bbox.is_well_formed())
        .map(|(&id, bbox)| (id, *bbox))
}

fn single(track_id: TrackId, bbox: BoundingBox) -> BallTrackFrame {
    let mut frame = BallTrackFrame::new();
    frame.insert(track_id, bbox);
    frame
}

/// Drop detections whose center moved more than
/// `max_jump_px_per_frame * frame_gap` from the last accepted detection.
///
/// The first detection is always accepted. Rejected frames become empty.
pub fn remove_wrong_detections(
    ball_tracks: &[BallTrackFrame],
    max_jump_px_per_frame: f64,
) -> Vec<BallTrackFrame> {
    let mut last_accepted: Option<(usize, BoundingBox)> = None;

    ball_tracks
        .iter()
        .enumerate()
        .map(|(frame_idx, frame)| {
            let Some((track_id, bbox)) = primary_detection(frame) else {
                return BallTrackFrame::new();
            };
            if let Some((last_idx, last_box)) = last_accepted {
                let allowed = max_jump_px_per_frame * (frame_idx - last_idx) as f64;
                let jump = distance(last_box.center(), bbox.center());
                if jump > allowed {
                    debug!(frame = frame_idx, jump, allowed, "dropping ball detection");
                    return BallTrackFrame::new();
                }
            }
            last_accepted = Some((frame_idx, bbox));
            single(track_id, bbox)
        })
        .collect()
}

/// Fill empty frames by interpolating box corners between neighbouring
/// detections. Leading frames copy the first detection, trailing frames the
/// last. Without any detection the input is returned as is.
pub fn interpolate_ball_positions(ball_tracks: &[BallTrackFrame]) -> Vec<BallTrackFrame> {
    let anchors: Vec<(usize, TrackId, BoundingBox)> = ball_tracks
        .iter()
        .enumerate()
        .filter_map(|(idx, frame)| primary_detection(frame).map(|(id, b)| (idx, id, b)))
        .collect();

    let (Some(&first), Some(&last)) = (anchors.first(), anchors.last()) else {
        return ball_tracks.to_vec();
    };

    let mut out = Vec::with_capacity(ball_tracks.len());
    let mut next_anchor = 0;
    for idx in 0..ball_tracks.len() {
        while next_anchor < anchors.len() && anchors[next_anchor].0 < idx {
            next_anchor += 1;
        }

        let frame = if idx < first.0 {
            single(BALL_TRACK_ID, first.2)
        } else if idx > last.0 {
            single(BALL_TRACK_ID, last.2)
        } else if anchors[next_anchor].0 == idx {
            let (_, id, bbox) = anchors[next_anchor];
            single(id, bbox)
        } else {
            let (before_idx, _, a) = anchors[next_anchor - 1];
            let (after_idx, _, b) = anchors[next_anchor];
            let t = (idx - before_idx) as f64 / (after_idx - before_idx) as f64;
            let (x1, y1) = lerp((a.x1, a.y1), (b.x1, b.y1), t);
            let (x2, y2) = lerp((a.x2, a.y2), (b.x2, b.y2), t);
            single(BALL_TRACK_ID, BoundingBox::new(x1, y1, x2, y2))
        };
        out.push(frame);
    }
    out
}

/// Apply the cleanup passes enabled in `config`.
pub fn clean_ball_tracks(ball_tracks: &[BallTrackFrame], config: &BallTrackConfig) -> Vec<BallTrackFrame> {
    let filtered = if config.remove_outliers {
        remove_wrong_detections(ball_tracks, config.max_jump_px_per_frame)
    } else {
        ball_tracks.to_vec()
    };
    if config.interpolate {
        interpolate_ball_positions(&filtered)
    } else {
        filtered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ball(x: f64, y: f64) -> BallTrackFrame {
        single(1, BoundingBox::new(x - 4.0, y - 4.0, x + 4.0, y + 4.0))
    }

    fn center_of(frame: &BallTrackFrame) -> (f64, f64) {
        primary_detection(frame).map(|(_, b)| b.center()).unwrap()
    }

    #[test]
    fn test_jump_outlier_removed() {
        let tracks = vec![ball(100.0, 100.0), ball(110.0, 100.0), ball(400.0, 50.0), ball(120.0, 100.0)];
        let cleaned = remove_wrong_detections(&tracks, 25.0);
        assert_eq!(cleaned.len(), 4);
        assert!(!cleaned[1].is_empty());
        assert!(cleaned[2].is_empty(), "400px jump must be dropped");
        assert!(!cleaned[3].is_empty());
    }

    #[test]
    fn test_allowed_jump_scales_with_gap() {
        // 60px over 3 frames is fine at 25px/frame, 60px over 1 frame is not
        let tracks = vec![ball(0.0, 0.0), BallTrackFrame::new(), BallTrackFrame::new(), ball(60.0, 0.0)];
        assert!(!remove_wrong_detections(&tracks, 25.0)[3].is_empty());

        let tracks = vec![ball(0.0, 0.0), ball(60.0, 0.0)];
        assert!(remove_wrong_detections(&tracks, 25.0)[1].is_empty());
    }

    #[test]
    fn test_first_detection_always_accepted() {
        let tracks = vec![BallTrackFrame::new(), ball(900.0, 900.0)];
        let cleaned = remove_wrong_detections(&tracks, 1.0);
        assert_eq!(cleaned[1], tracks[1]);
    }

    #[test]
    fn test_malformed_box_is_absent() {
        let mut frame = BallTrackFrame::new();
        frame.insert(1, BoundingBox::new(10.0, 10.0, 0.0, 0.0));
        frame.insert(3, BoundingBox::new(0.0, 0.0, 8.0, 8.0));
        let cleaned = remove_wrong_detections(&[frame], 25.0);
        assert_eq!(cleaned[0].keys().copied().collect::<Vec<_>>(), vec![3]);
    }

    #[test]
    fn test_interpolation_fills_gaps_and_edges() {
        let tracks = vec![
            BallTrackFrame::new(),
            ball(10.0, 20.0),
            BallTrackFrame::new(),
            BallTrackFrame::new(),
            ball(40.0, 50.0),
            BallTrackFrame::new(),
        ];
        let filled = interpolate_ball_positions(&tracks);
        assert_eq!(filled.len(), tracks.len());
        assert_eq!(center_of(&filled[0]), (10.0, 20.0));
        assert_eq!(center_of(&filled[1]), (10.0, 20.0));
        let (x2, y2) = center_of(&filled[2]);
        assert!((x2 - 20.0).abs() < 1e-9 && (y2 - 30.0).abs() < 1e-9);
        let (x3, y3) = center_of(&filled[3]);
        assert!((x3 - 30.0).abs() < 1e-9 && (y3 - 40.0).abs() < 1e-9);
        assert_eq!(center_of(&filled[4]), (40.0, 50.0));
        assert_eq!(center_of(&filled[5]), (40.0, 50.0));
        assert!(filled[2].contains_key(&BALL_TRACK_ID));
    }

    #[test]
    fn test_interpolation_without_detections_is_identity() {
        let tracks = vec![BallTrackFrame::new(); 3];
        assert_eq!(interpolate_ball_positions(&tracks), tracks);
        assert!(interpolate_ball_positions(&[]).is_empty());
    }

    #[test]
    fn test_clean_respects_config() {
        let tracks = vec![ball(0.0, 0.0), ball(500.0, 0.0), ball(10.0, 0.0)];
        let config = BallTrackConfig::default();
        let cleaned = clean_ball_tracks(&tracks, &config);
        let (x1, _) = center_of(&cleaned[1]);
        assert!((x1 - 5.0).abs() < 1e-9, "outlier replaced by interpolation, got {}", x1);

        let passthrough = BallTrackConfig {
            remove_outliers: false,
            interpolate: false,
            ..BallTrackConfig::default()
        };
        assert_eq!(clean_ball_tracks(&tracks, &passthrough), tracks);
    }
}
