//! Athlete Screen
//!
//! Command-line front end over the preprocessing and risk crates. Reads a
//! batch of raw readings paired with probabilities produced by the external
//! anomaly model, and writes one JSON assessment per line to stdout.
//! Logs go to stderr.

mod screener;
mod settings;

pub use screener::{Sample, ScreenReport, ScreenSummary, Screener};
pub use settings::load_vitals;

use anyhow::Context;
use clap::Parser;
use data_validator::VitalsChecker;
use feature_engine::FeaturePreprocessor;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing::subscriber::SetGlobalDefaultError;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "athlete-screen")]
#[command(about = "Screen athlete readings against anomaly model probabilities")]
#[command(version)]
pub struct Args {
    /// JSON array of samples (`-` reads stdin)
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Versioned scaler/activity artifact; defaults to the built-in v1 tables
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Vital-sign threshold overrides (JSON)
    #[arg(long, value_name = "FILE")]
    pub vitals: Option<PathBuf>,

    /// Abort on unknown activities or invalid readings instead of skipping them
    #[arg(long)]
    pub strict: bool,

    /// Emit logs as JSON
    #[arg(long)]
    pub json_logs: bool,
}

/// Initialize logging on stderr; `RUST_LOG` overrides the default `info` level
pub fn init_logging(json: bool) -> Result<(), SetGlobalDefaultError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr);

    if json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    }
}

/// Load tables, screen every sample in the input, write reports to stdout
pub fn run(args: &Args) -> anyhow::Result<ScreenSummary> {
    let preprocessor = match &args.config {
        Some(path) => FeaturePreprocessor::from_path(path)
            .with_context(|| format!("loading preprocessor config {}", path.display()))?,
        None => FeaturePreprocessor::builtin(),
    };
    info!(
        version = preprocessor.version(),
        activities = ?preprocessor.activities().names(),
        "preprocessor ready"
    );

    let vitals = load_vitals(args.vitals.as_deref())?;
    let screener = Screener::new(preprocessor, VitalsChecker::new(vitals), args.strict);

    let input = open_input(&args.input)?;
    let stdout = io::stdout();
    screener.screen_all(input, stdout.lock())
}

fn open_input(path: &Path) -> anyhow::Result<Box<dyn Read>> {
    if path == Path::new("-") {
        return Ok(Box::new(io::stdin().lock()));
    }
    let file = File::open(path).with_context(|| format!("opening input {}", path.display()))?;
    Ok(Box::new(BufReader::new(file)))
}
