//! JSON entry points for callers that do not link against the typed API
//! (scripts, the CLI, other-language front ends).

use serde::{Deserialize, Serialize};

use crate::config::AnalysisConfig;
use crate::error::{AnalysisError, Result};
use crate::models::{BallTrackFrame, KeypointFrame, PlayerTrackFrame, TeamAssignmentFrame};
use crate::pipeline::{MatchAnalysis, MatchAnalyzer, MatchTracks};
use crate::tactical::CourtLayout;

/// Version of the request/response layout below.
pub const SCHEMA_VERSION: u8 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub schema_version: u8,
    pub player_tracks: Vec<PlayerTrackFrame>,
    pub ball_tracks: Vec<BallTrackFrame>,
    pub team_assignments: Vec<TeamAssignmentFrame>,
    #[serde(default)]
    pub court_keypoints: Vec<KeypointFrame>,
    /// Falls back to `AnalysisConfig::from_env_or_default()` when absent.
    #[serde(default)]
    pub config: Option<AnalysisConfig>,
}

impl AnalysisRequest {
    pub fn new(tracks: MatchTracks) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            player_tracks: tracks.player_tracks,
            ball_tracks: tracks.ball_tracks,
            team_assignments: tracks.team_assignments,
            court_keypoints: tracks.court_keypoints,
            config: None,
        }
    }

    /// Split into tracks and config. Missing keypoints mean "none detected".
    pub fn into_parts(self) -> (MatchTracks, Option<AnalysisConfig>) {
        let court_keypoints = if self.court_keypoints.is_empty() {
            vec![KeypointFrame::new(); self.player_tracks.len()]
        } else {
            self.court_keypoints
        };
        let tracks = MatchTracks {
            player_tracks: self.player_tracks,
            ball_tracks: self.ball_tracks,
            team_assignments: self.team_assignments,
            court_keypoints,
        };
        (tracks, self.config)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub schema_version: u8,
    pub analysis: MatchAnalysis,
}

pub fn parse_request(request_json: &str) -> Result<AnalysisRequest> {
    let request: AnalysisRequest = serde_json::from_str(request_json)?;
    if request.schema_version != SCHEMA_VERSION {
        return Err(AnalysisError::UnsupportedSchema {
            found: request.schema_version,
            expected: SCHEMA_VERSION,
        });
    }
    Ok(request)
}

/// Typed entry: run the analysis for a parsed request.
pub fn analyze_request(request: AnalysisRequest) -> Result<AnalysisResponse> {
    let (tracks, config) = request.into_parts();
    let config = config.unwrap_or_else(AnalysisConfig::from_env_or_default);
    let analysis = MatchAnalyzer::new(config).analyze(&tracks)?;
    Ok(AnalysisResponse {
        schema_version: SCHEMA_VERSION,
        analysis,
    })
}

/// Analyze a JSON request and return the JSON response.
pub fn analyze_tracks_json(request_json: &str) -> Result<String> {
    let response = analyze_request(parse_request(request_json)?)?;
    Ok(serde_json::to_string(&response)?)
}

/// Canonical court landmarks for `config`, as JSON.
pub fn court_layout_json(config: &AnalysisConfig) -> Result<String> {
    config.validate()?;
    Ok(serde_json::to_string(&CourtLayout::from_config(&config.court))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn request(schema_version: u8) -> Value {
        json!({
            "schema_version": schema_version,
            "player_tracks": [
                { "5": [80.0, 300.0, 120.0, 400.0], "3": [280.0, 300.0, 320.0, 400.0] },
                { "5": [80.0, 300.0, 120.0, 400.0], "3": [280.0, 300.0, 320.0, 400.0] },
                { "5": [80.0, 300.0, 120.0, 400.0], "3": [280.0, 300.0, 320.0, 400.0] }
            ],
            "ball_tracks": [
                { "1": [95.0, 390.0, 105.0, 400.0] },
                {},
                { "1": [295.0, 390.0, 305.0, 400.0] }
            ],
            "team_assignments": [
                { "5": 1, "3": 1 },
                { "5": 1, "3": 1 },
                { "5": 1, "3": 1 }
            ],
            "config": { "ball_track": { "remove_outliers": false, "interpolate": false } }
        })
    }

    #[test]
    fn test_analyze_tracks_json() {
        let output = analyze_tracks_json(&request(1).to_string()).unwrap();
        let response: Value = serde_json::from_str(&output).unwrap();

        assert_eq!(response["schema_version"], 1);
        let analysis = &response["analysis"];
        assert_eq!(analysis["possession"], json!([5, -1, 3]));
        assert_eq!(analysis["passes"], json!([0, 0, 1]));
        assert_eq!(analysis["interceptions"], json!([0, 0, 0]));
        assert_eq!(analysis["team_ball_control"], json!([1, -1, 1]));
        assert_eq!(analysis["summary"]["events"]["team_one_passes"], 1);
        assert_eq!(analysis["tactical_positions"], json!([{}, {}, {}]));
    }

    #[test]
    fn test_response_round_trips_typed() {
        let output = analyze_tracks_json(&request(1).to_string()).unwrap();
        let response: AnalysisResponse = serde_json::from_str(&output).unwrap();
        assert_eq!(response.analysis.possession.len(), 3);
    }

    #[test]
    fn test_unsupported_schema() {
        let result = analyze_tracks_json(&request(2).to_string());
        assert!(matches!(
            result,
            Err(AnalysisError::UnsupportedSchema { found: 2, expected: 1 })
        ));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(analyze_tracks_json("{ not json"), Err(AnalysisError::Json(_))));
    }

    #[test]
    fn test_court_layout_json() {
        let layout: Value = serde_json::from_str(&court_layout_json(&AnalysisConfig::default()).unwrap()).unwrap();
        assert_eq!(layout["width_px"], 300);
        assert_eq!(layout["keypoints"].as_array().unwrap().len(), 18);
        assert_eq!(layout["names"][0], "left_top_corner");
        assert_eq!(layout["names"][17], "right_free_throw_bottom");
    }
}
