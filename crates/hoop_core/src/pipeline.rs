//! # Match Analysis Pipeline
//!
//! Runs every analysis stage over one frame-aligned track sequence.
//!
//! Two independent branches run side by side:
//! - events: ball cleanup -> possession -> passes / interceptions -> ball control
//! - tactical: keypoint validation -> player projection

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analysis::{
    control_codes, team_ball_control, BallControlStats, BallPossessionEstimator, EventTimeline,
    MatchSummary, PassInterceptionClassifier,
};
use crate::config::AnalysisConfig;
use crate::error::{ensure_frame_count, Result};
use crate::models::{
    BallTrackFrame, KeypointFrame, PlayerTrackFrame, Possession, TacticalFrame, TeamAssignmentFrame,
};
use crate::tactical::TacticalViewConverter;
use crate::tracks::clean_ball_tracks;

/// Frame-aligned detector output for one video.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchTracks {
    pub player_tracks: Vec<PlayerTrackFrame>,
    pub ball_tracks: Vec<BallTrackFrame>,
    pub team_assignments: Vec<TeamAssignmentFrame>,
    pub court_keypoints: Vec<KeypointFrame>,
}

impl MatchTracks {
    pub fn frame_count(&self) -> usize {
        self.player_tracks.len()
    }

    /// All sequences must have as many frames as `player_tracks`.
    pub fn check_alignment(&self) -> Result<()> {
        let frames = self.frame_count();
        ensure_frame_count("ball_tracks", frames, self.ball_tracks.len())?;
        ensure_frame_count("team_assignments", frames, self.team_assignments.len())?;
        ensure_frame_count("court_keypoints", frames, self.court_keypoints.len())?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchAnalysis {
    pub possession: Vec<Possession>,
    pub passes: Vec<u8>,
    pub interceptions: Vec<u8>,
    /// `-1` (nobody), `1` or `2` per frame.
    pub team_ball_control: Vec<i8>,
    pub ball_control_stats: Vec<BallControlStats>,
    pub ball_tracks: Vec<BallTrackFrame>,
    pub tactical_positions: Vec<TacticalFrame>,
    pub validated_keypoints: Vec<KeypointFrame>,
    pub summary: MatchSummary,
}

struct EventBranch {
    ball_tracks: Vec<BallTrackFrame>,
    possession: Vec<Possession>,
    timeline: EventTimeline,
    control: Vec<i8>,
    control_stats: Vec<BallControlStats>,
}

struct TacticalBranch {
    validated_keypoints: Vec<KeypointFrame>,
    positions: Vec<TacticalFrame>,
}

#[derive(Debug, Clone, Default)]
pub struct MatchAnalyzer {
    config: AnalysisConfig,
    estimator: BallPossessionEstimator,
    classifier: PassInterceptionClassifier,
    converter: TacticalViewConverter,
}

impl MatchAnalyzer {
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            estimator: BallPossessionEstimator::new(config.possession.clone()),
            classifier: PassInterceptionClassifier::new(),
            converter: TacticalViewConverter::from_config(&config),
            config,
        }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn converter(&self) -> &TacticalViewConverter {
        &self.converter
    }

    pub fn analyze(&self, tracks: &MatchTracks) -> Result<MatchAnalysis> {
        self.config.validate()?;
        tracks.check_alignment()?;

        let (events, tactical) = rayon::join(|| self.run_events(tracks), || self.run_tactical(tracks));
        let events = events?;
        let tactical = tactical?;

        let summary = MatchSummary::new(&events.timeline.events, &events.control_stats, &tactical.positions);
        info!(
            frames = summary.frame_count,
            team_one_passes = summary.events.team_one_passes,
            team_two_passes = summary.events.team_two_passes,
            team_one_interceptions = summary.events.team_one_interceptions,
            team_two_interceptions = summary.events.team_two_interceptions,
            projected_frames = summary.projected_frames,
            "match analysis complete"
        );

        Ok(MatchAnalysis {
            possession: events.possession,
            passes: events.timeline.passes(),
            interceptions: events.timeline.interceptions(),
            team_ball_control: events.control,
            ball_control_stats: events.control_stats,
            ball_tracks: events.ball_tracks,
            tactical_positions: tactical.positions,
            validated_keypoints: tactical.validated_keypoints,
            summary,
        })
    }

    fn run_events(&self, tracks: &MatchTracks) -> Result<EventBranch> {
        let ball_tracks = clean_ball_tracks(&tracks.ball_tracks, &self.config.ball_track);
        let possession = self.estimator.estimate(&tracks.player_tracks, &ball_tracks)?;
        let timeline = self.classifier.classify(&possession, &tracks.team_assignments)?;
        let control = team_ball_control(&possession, &tracks.team_assignments)?;

        Ok(EventBranch {
            control_stats: BallControlStats::cumulative(&control),
            control: control_codes(&control),
            ball_tracks,
            possession,
            timeline,
        })
    }

    fn run_tactical(&self, tracks: &MatchTracks) -> Result<TacticalBranch> {
        let validated_keypoints = self.converter.validate(&tracks.court_keypoints);
        let positions = self.converter.project(&validated_keypoints, &tracks.player_tracks)?;
        Ok(TacticalBranch {
            validated_keypoints,
            positions,
        })
    }
}
