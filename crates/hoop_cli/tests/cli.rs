use std::fs;
use std::process::Command;

use serde_json::{json, Value};
use tempfile::TempDir;

fn write_request(dir: &TempDir) -> std::path::PathBuf {
    let frame_players = json!({ "5": [80.0, 300.0, 120.0, 400.0], "9": [280.0, 300.0, 320.0, 400.0] });
    let frame_teams = json!({ "5": 1, "9": 2 });
    let request = json!({
        "schema_version": 1,
        "player_tracks": [frame_players, frame_players, frame_players],
        "ball_tracks": [
            { "1": [95.0, 390.0, 105.0, 400.0] },
            { "1": [95.0, 390.0, 105.0, 400.0] },
            { "1": [295.0, 390.0, 305.0, 400.0] }
        ],
        "team_assignments": [frame_teams, frame_teams, frame_teams]
    });
    let path = dir.path().join("tracks.json");
    fs::write(&path, request.to_string()).unwrap();
    path
}

#[test]
fn test_run_analysis_writes_report() {
    let dir = TempDir::new().unwrap();
    let input = write_request(&dir);
    let output = dir.path().join("out").join("analysis.json");

    let config = hoop_cli::load_config(None, Some("lenient")).unwrap();
    let report = hoop_cli::run_analysis(&input, &output, config, true).unwrap();
    assert_eq!(report.metadata.frame_count, 3);
    assert!(chrono::DateTime::parse_from_rfc3339(&report.metadata.generated_at).is_ok());

    let written: Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(written["schema_version"], 1);
    assert_eq!(written["analysis"]["possession"], json!([5, 5, 9]));
    assert_eq!(written["analysis"]["interceptions"], json!([0, 0, 2]));
}

#[test]
fn test_missing_input_fails_with_context() {
    let dir = TempDir::new().unwrap();
    let err = hoop_cli::run_analysis(&dir.path().join("missing.json"), &dir.path().join("o.json"), None, false)
        .unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to read track file"));
}

#[cfg(feature = "cli")]
#[test]
fn test_binary_analyze_and_court() {
    let dir = TempDir::new().unwrap();
    let input = write_request(&dir);
    let output = dir.path().join("analysis.json");

    let status = Command::new(env!("CARGO_BIN_EXE_hoop"))
        .args(["analyze", "--in"])
        .arg(&input)
        .arg("--out")
        .arg(&output)
        .args(["--profile", "strict"])
        .status()
        .unwrap();
    assert!(status.success());
    assert!(output.exists());

    let court = Command::new(env!("CARGO_BIN_EXE_hoop")).arg("court").output().unwrap();
    assert!(court.status.success());
    let layout: Value = serde_json::from_slice(&court.stdout).unwrap();
    assert_eq!(layout["keypoints"].as_array().unwrap().len(), 18);
    assert_eq!(layout["names"][7], "half_court_top");
}
