use thiserror::Error;

use crate::models::TrackId;

/// Failures while fitting or applying a planar homography.
///
/// Always local to a single frame: the tactical converter turns these into
/// an empty projection for that frame.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HomographyError {
    #[error("Insufficient correspondences: need at least 4, found {found}")]
    InsufficientCorrespondences { found: usize },

    #[error("Mismatched correspondences: {source_len} source vs {destination_len} destination points")]
    MismatchedCorrespondences {
        source_len: usize,
        destination_len: usize,
    },

    #[error("Degenerate geometry: {0}")]
    DegenerateGeometry(&'static str),
}

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Length mismatch for {context}: expected {expected} frames, found {found}")]
    LengthMismatch {
        context: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("Keypoint count mismatch at frame {frame}: expected {expected}, found {found}")]
    KeypointCountMismatch {
        frame: usize,
        expected: usize,
        found: usize,
    },

    #[error("Malformed bounding box for track {track_id}: [{x1}, {y1}, {x2}, {y2}]")]
    MalformedBoundingBox {
        track_id: TrackId,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
    },

    #[error("Homography error: {0}")]
    Homography(#[from] HomographyError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unsupported schema version: found {found}, expected {expected}")]
    UnsupportedSchema { found: u8, expected: u8 },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AnalysisError {
    /// Whether the analysis can continue after this error by skipping the
    /// affected entity or frame.
    pub fn is_recoverable(&self) -> bool {
        match self {
            AnalysisError::MalformedBoundingBox { .. } => true,
            AnalysisError::Homography(_) => true,
            AnalysisError::KeypointCountMismatch { .. } => true,
            AnalysisError::LengthMismatch { .. } => false,
            AnalysisError::UnsupportedSchema { .. } => false,
            _ => false,
        }
    }
}

/// Fail fast unless `found` frames line up with the `expected` frame count.
pub(crate) fn ensure_frame_count(
    context: &'static str,
    expected: usize,
    found: usize,
) -> Result<()> {
    if expected != found {
        return Err(AnalysisError::LengthMismatch {
            context,
            expected,
            found,
        });
    }
    Ok(())
}

pub type Result<T> = std::result::Result<T, AnalysisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable_classification() {
        let frame_local = AnalysisError::from(HomographyError::InsufficientCorrespondences {
            found: 2,
        });
        assert!(frame_local.is_recoverable());
        assert!(AnalysisError::KeypointCountMismatch {
            frame: 1,
            expected: 18,
            found: 17,
        }
        .is_recoverable());

        let contract = AnalysisError::LengthMismatch {
            context: "ball_tracks",
            expected: 4,
            found: 3,
        };
        assert!(!contract.is_recoverable());
        assert_eq!(
            contract.to_string(),
            "Length mismatch for ball_tracks: expected 4 frames, found 3"
        );
    }

    #[test]
    fn test_ensure_frame_count() {
        assert!(ensure_frame_count("players", 3, 3).is_ok());
        assert!(matches!(
            ensure_frame_count("players", 3, 2),
            Err(AnalysisError::LengthMismatch { expected: 3, found: 2, .. })
        ));
    }
}
