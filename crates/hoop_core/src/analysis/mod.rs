//! # Analysis Module
//!
//! Frame-aligned game analysis on top of tracked detections.
//!
//! ## Submodules
//!
//! - `possession` - Per-frame ball holder from player and ball boxes
//! - `passes` - Pass / interception events from holder changes
//! - `ball_control` - Team in control per frame and running percentages
//! - `stats` - Cumulative event tallies and the match summary

pub mod ball_control;
pub mod passes;
pub mod possession;
pub mod stats;

pub use ball_control::{control_codes, team_ball_control, BallControlStats, NO_CONTROL_CODE};
pub use passes::{EventTimeline, HolderState, PassInterceptionClassifier};
pub use possession::{drop_short_holds, BallPossessionEstimator};
pub use stats::{EventTally, MatchSummary};
