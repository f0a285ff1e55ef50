//! # Court Keypoint Validator
//!
//! Zeroes detected keypoints whose relative geometry disagrees with the
//! canonical court layout.
//!
//! ## Algorithm
//! 1. Collect detected indices (both coordinates > 0); frames with fewer than
//!    three are returned untouched
//! 2. Walk detected indices in ascending order; for index `i` take the first
//!    two other detected indices `j`, `k` not yet invalidated
//! 3. Compare `d(i,j)/d(i,k)` in the frame with `t(i,j)/t(i,k)` in the layout
//! 4. Relative error above the threshold zeroes `i`, which is then never used
//!    as a reference for later indices of the same frame
//!
//! The pass is single and order dependent: lower indices are judged first.
//! A keypoint already judged against a reference that is zeroed later in the
//! same pass is not re-checked, so running the validator again on its own
//! output may zero more keypoints.

use tracing::debug;

use crate::config::KeypointConfig;
use crate::geometry::distance;
use crate::models::{detected_indices, KeypointFrame, Point2};

/// Fewest detected keypoints that allow a ratio check.
const MIN_DETECTED: usize = 3;

/// Validate one frame against `canonical` (parallel-indexed).
///
/// Returns a new frame of the same length; the input is never modified.
/// Entries beyond the canonical layout are passed through unchecked.
pub fn validate_frame(
    frame: &[Point2],
    canonical: &[Point2],
    config: &KeypointConfig,
) -> KeypointFrame {
    let mut output = frame.to_vec();

    let detected: Vec<usize> = detected_indices(frame)
        .into_iter()
        .filter(|&i| i < canonical.len())
        .collect();
    if detected.len() < config.min_detected_for_validation.max(MIN_DETECTED) {
        return output;
    }

    let mut invalid = vec![false; frame.len()];

    for &i in &detected {
        let mut references = detected
            .iter()
            .copied()
            .filter(|&idx| idx != i && !invalid[idx]);
        let (Some(j), Some(k)) = (references.next(), references.next()) else {
            continue;
        };

        let t_ij = distance(canonical[i], canonical[j]);
        let t_ik = distance(canonical[i], canonical[k]);
        if t_ij <= 0.0 || t_ik <= 0.0 {
            continue;
        }

        let d_ij = distance(frame[i], frame[j]);
        let d_ik = distance(frame[i], frame[k]);
        let detected_ratio = if d_ik > 0.0 { d_ij / d_ik } else { f64::INFINITY };
        let canonical_ratio = t_ij / t_ik;
        let error = ((detected_ratio - canonical_ratio) / canonical_ratio).abs();

        if error > config.max_ratio_error {
            debug!(
                keypoint = i,
                reference_j = j,
                reference_k = k,
                error,
                "keypoint inconsistent with court layout, zeroed"
            );
            output[i] = (0.0, 0.0);
            invalid[i] = true;
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tactical::court::CourtLayout;

    /// Detected frame that is an exact similarity of the layout for `indices`.
    fn similar_frame(layout: &CourtLayout, indices: &[usize]) -> KeypointFrame {
        let mut frame = vec![(0.0, 0.0); layout.len()];
        for &i in indices {
            let (x, y) = layout.keypoints[i];
            frame[i] = (2.0 * x + 10.0, 2.0 * y + 10.0);
        }
        frame
    }

    #[test]
    fn test_consistent_frame_untouched() {
        let layout = CourtLayout::default();
        let frame = similar_frame(&layout, &[0, 2, 8, 9, 7, 6]);
        let validated = validate_frame(&frame, &layout.keypoints, &KeypointConfig::default());
        assert_eq!(validated, frame);
    }

    #[test]
    fn test_outlier_is_zeroed_in_place() {
        let layout = CourtLayout::default();
        let mut frame = similar_frame(&layout, &[0, 2, 8, 9]);
        // Keypoint 9 pulled next to keypoint 0
        frame[9] = (12.0, 14.0);

        let validated = validate_frame(&frame, &layout.keypoints, &KeypointConfig::default());
        assert_eq!(validated.len(), frame.len(), "index alignment must be preserved");
        assert_eq!(validated[9], (0.0, 0.0));
        for i in [0, 2, 8] {
            assert_eq!(validated[i], frame[i], "keypoint {} should survive", i);
        }
        // Input untouched
        assert_eq!(frame[9], (12.0, 14.0));
    }

    #[test]
    fn test_invalidated_keypoint_not_used_as_reference() {
        let layout = CourtLayout::default();
        let mut frame = similar_frame(&layout, &[0, 2, 8, 9]);
        // Keypoint 0 collapsed onto keypoint 2. Judged first, it is zeroed and
        // must not be used when judging keypoint 2 (that pairing would flag 2 too).
        frame[0] = (11.0, 119.0);

        let validated = validate_frame(&frame, &layout.keypoints, &KeypointConfig::default());
        assert_eq!(validated[0], (0.0, 0.0));
        assert_eq!(validated[2], frame[2]);
        assert_eq!(validated[8], frame[8]);
        assert_eq!(validated[9], frame[9]);
    }

    #[test]
    fn test_fewer_than_three_detected_untouched() {
        let layout = CourtLayout::default();
        let mut frame = vec![(0.0, 0.0); layout.len()];
        frame[0] = (500.0, 3.0);
        frame[17] = (1.0, 900.0);
        let validated = validate_frame(&frame, &layout.keypoints, &KeypointConfig::default());
        assert_eq!(validated, frame);
    }

    #[test]
    fn test_zero_canonical_distance_skips_check() {
        // Landmarks 0 and 1 coincide in the layout
        let canonical = vec![(10.0, 10.0), (10.0, 10.0), (50.0, 10.0), (10.0, 50.0)];
        let frame = vec![(100.0, 100.0), (300.0, 5.0), (7.0, 400.0), (90.0, 90.0)];
        let validated = validate_frame(&frame, &canonical, &KeypointConfig::default());
        // Keypoints 0 and 1 reference each other first: both skipped
        assert_eq!(validated[0], frame[0]);
        assert_eq!(validated[1], frame[1]);
    }

    #[test]
    fn test_revalidation_stable_when_zeroed_point_never_referenced() {
        let layout = CourtLayout::default();
        let mut frame = similar_frame(&layout, &[0, 2, 8, 9]);
        // Highest detected index: zeroed last, never a reference for earlier ones
        frame[9] = (12.0, 14.0);
        let config = KeypointConfig::default();

        let once = validate_frame(&frame, &layout.keypoints, &config);
        let twice = validate_frame(&once, &layout.keypoints, &config);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_revalidation_can_zero_more_after_reference_dropped() {
        let canonical = vec![(10.0, 10.0), (20.0, 10.0), (10.0, 20.0), (20.0, 20.0)];
        let frame = vec![(15.0, 23.0), (15.0, 44.0), (15.0, 49.0), (30.0, 19.0)];
        let config = KeypointConfig::default();

        // Keypoint 0 passes against (1, 2); keypoint 1 is zeroed afterwards
        let once = validate_frame(&frame, &canonical, &config);
        assert_eq!(once, vec![frame[0], (0.0, 0.0), frame[2], frame[3]]);

        // Judged against (2, 3) on a second run, keypoint 0 fails too
        let twice = validate_frame(&once, &canonical, &config);
        assert_eq!(twice, vec![(0.0, 0.0), (0.0, 0.0), frame[2], frame[3]]);
    }

    #[test]
    fn test_threshold_is_configurable() {
        let layout = CourtLayout::default();
        let mut frame = similar_frame(&layout, &[0, 2, 8, 9]);
        frame[9] = (12.0, 14.0);
        let lenient = KeypointConfig {
            max_ratio_error: 5.0,
            ..KeypointConfig::default()
        };
        assert_eq!(validate_frame(&frame, &layout.keypoints, &lenient), frame);
    }
}
