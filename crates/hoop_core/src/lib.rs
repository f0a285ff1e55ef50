//! # hoop_core - Basketball Video Analytics
//!
//! Turns per-frame detector and tracker output from a broadcast basketball
//! video into game analytics:
//!
//! ## Features
//! - Ball possession per frame (nearest player within a pixel threshold)
//! - Pass / interception events from holder changes
//! - Team ball control and running event tallies
//! - Court keypoint validation and top-down tactical projection
//! - JSON API for integration with non-Rust front ends
//!
//! Detection, tracking and team classification happen upstream; this crate
//! only consumes their frame-aligned output.

// Doc formatting lints - purely cosmetic, fix incrementally
#![allow(clippy::doc_lazy_continuation)]
// Struct initialization pattern used intentionally
#![allow(clippy::field_reassign_with_default)]
// Loop style - can fix incrementally
#![allow(clippy::needless_range_loop)]

pub mod analysis;
pub mod api;
pub mod config;
pub mod error;
pub mod geometry;
pub mod models;
pub mod pipeline;
pub mod tactical;
pub mod tracks;

// Re-export main API functions
pub use api::{analyze_tracks_json, court_layout_json, AnalysisRequest, AnalysisResponse, SCHEMA_VERSION};
pub use error::{AnalysisError, HomographyError, Result};

// Re-export analysis components
pub use analysis::{
    BallControlStats, BallPossessionEstimator, EventTally, EventTimeline, MatchSummary,
    PassInterceptionClassifier,
};
pub use config::AnalysisConfig;
pub use models::{BoundingBox, FrameEvent, Possession, Team};
pub use pipeline::{MatchAnalysis, MatchAnalyzer, MatchTracks};
pub use tactical::{CourtLayout, Homography, TacticalViewConverter};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
