//! # Track Cleanup
//!
//! Pre-processing of raw detector tracks before analysis.
//!
//! - `ball_track` - Outlier removal and gap interpolation for the ball

pub mod ball_track;

pub use ball_track::{clean_ball_tracks, interpolate_ball_positions, remove_wrong_detections, BALL_TRACK_ID};
