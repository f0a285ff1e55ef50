//! # Tactical View
//!
//! Broadcast pixels -> top-down court diagram.
//!
//! - `court` - Canonical landmark layout in diagram pixels
//! - `homography` - Planar projective transform fitting and application
//! - `keypoint_validator` - Outlier rejection for detected court keypoints
//! - `converter` - Per-frame validation and player projection

pub mod converter;
pub mod court;
pub mod homography;
pub mod keypoint_validator;

pub use converter::TacticalViewConverter;
pub use court::{CourtLayout, LANDMARK_COUNT, LANDMARK_NAMES};
pub use homography::{Homography, MIN_CORRESPONDENCES};
pub use keypoint_validator::validate_frame;
