//! hoop CLI
//!
//! Basketball track analysis: possession, passes, interceptions and
//! tactical projection from detector output.

#[cfg(feature = "cli")]
use anyhow::Result;
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand, ValueEnum};
#[cfg(feature = "cli")]
use std::path::PathBuf;
#[cfg(feature = "cli")]
use tracing_subscriber::EnvFilter;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "hoop")]
#[command(about = "Analyze basketball tracking data", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Clone, Copy, ValueEnum)]
enum Profile {
    Default,
    Strict,
    Lenient,
}

#[cfg(feature = "cli")]
impl Profile {
    fn name(self) -> &'static str {
        match self {
            Profile::Default => "default",
            Profile::Strict => "strict",
            Profile::Lenient => "lenient",
        }
    }
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Run the full analysis on a track file
    Analyze {
        /// Input track JSON file path
        #[arg(long)]
        r#in: PathBuf,

        /// Output report JSON file path
        #[arg(long)]
        out: PathBuf,

        /// YAML configuration file (overrides --profile)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Named configuration preset
        #[arg(long, value_enum)]
        profile: Option<Profile>,

        /// Pretty-print the report
        #[arg(long, default_value = "false")]
        pretty: bool,
    },

    /// Print the canonical court keypoint layout
    Court {
        /// YAML configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            r#in,
            out,
            config,
            profile,
            pretty,
        } => {
            let config = hoop_cli::load_config(config.as_deref(), profile.map(Profile::name))?;
            let report = hoop_cli::run_analysis(&r#in, &out, config, pretty)?;
            print_summary(&report);
        }

        Commands::Court { config } => {
            let config = hoop_cli::load_config(config.as_deref(), None)?;
            println!("{}", hoop_cli::court_layout(config)?);
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn print_summary(report: &hoop_cli::AnalysisReport) {
    let summary = report.summary();
    println!("\nAnalysis complete");
    println!("   Frames:           {}", summary.frame_count);
    println!(
        "   Passes:           team 1: {}, team 2: {}",
        summary.events.team_one_passes, summary.events.team_two_passes
    );
    println!(
        "   Interceptions:    team 1: {}, team 2: {}",
        summary.events.team_one_interceptions, summary.events.team_two_interceptions
    );
    println!(
        "   Ball control:     team 1: {:.1}%, team 2: {:.1}%",
        summary.ball_control.team_one_pct, summary.ball_control.team_two_pct
    );
    println!("   Projected frames: {}", summary.projected_frames);
    println!("   Generated:        {}", report.metadata.generated_at);
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("hoop CLI is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
