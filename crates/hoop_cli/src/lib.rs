//! Analysis runner behind the `hoop` binary.
//!
//! Reads a track request from disk, resolves the analysis configuration,
//! runs the analysis and writes a report with run metadata.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

use hoop_core::api::{analyze_request, parse_request};
use hoop_core::{AnalysisConfig, MatchAnalysis, MatchSummary};

/// Run metadata written next to the analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// hoop_core version that produced the report
    pub core_version: String,
    /// Generation time (RFC3339)
    pub generated_at: String,
    pub input: String,
    pub frame_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub metadata: ReportMetadata,
    pub schema_version: u8,
    pub analysis: MatchAnalysis,
}

impl AnalysisReport {
    pub fn summary(&self) -> &MatchSummary {
        &self.analysis.summary
    }
}

/// Resolve the configuration override: a YAML file wins over a named profile.
///
/// `None` means "use whatever the request carries".
pub fn load_config(config_path: Option<&Path>, profile: Option<&str>) -> Result<Option<AnalysisConfig>> {
    if let Some(path) = config_path {
        let config = AnalysisConfig::from_yaml_file(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?;
        return Ok(Some(config));
    }
    Ok(profile.map(AnalysisConfig::from_profile))
}

/// Analyze `input` and write the report to `output`.
pub fn run_analysis(
    input: &Path,
    output: &Path,
    config: Option<AnalysisConfig>,
    pretty: bool,
) -> Result<AnalysisReport> {
    info!(input = %input.display(), "reading track file");
    let request_json = fs::read_to_string(input)
        .with_context(|| format!("Failed to read track file: {}", input.display()))?;

    let mut request = parse_request(&request_json)
        .with_context(|| format!("Failed to parse track file: {}", input.display()))?;
    if config.is_some() {
        request.config = config;
    }

    let response = analyze_request(request).context("Analysis failed")?;

    let report = AnalysisReport {
        metadata: ReportMetadata {
            core_version: hoop_core::VERSION.to_string(),
            generated_at: chrono::Utc::now().to_rfc3339(),
            input: input.display().to_string(),
            frame_count: response.analysis.summary.frame_count,
        },
        schema_version: response.schema_version,
        analysis: response.analysis,
    };

    let report_json = if pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }
    fs::write(output, report_json)
        .with_context(|| format!("Failed to write output file: {}", output.display()))?;
    info!(
        frames = report.metadata.frame_count,
        output = %output.display(),
        "analysis report written"
    );

    Ok(report)
}

/// Canonical court layout for the resolved configuration, pretty JSON.
pub fn court_layout(config: Option<AnalysisConfig>) -> Result<String> {
    let config = config.unwrap_or_else(AnalysisConfig::from_env_or_default);
    let compact = hoop_core::court_layout_json(&config).context("Invalid court configuration")?;
    let value: serde_json::Value = serde_json::from_str(&compact)?;
    Ok(serde_json::to_string_pretty(&value)?)
}
