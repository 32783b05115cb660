//! Athlete Screen - Main Entry Point

use athlete_screen::{init_logging, run, Args};
use clap::Parser;
use tracing::info;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.json_logs)?;

    info!("=== Athlete Screen v{} ===", env!("CARGO_PKG_VERSION"));

    let summary = run(&args)?;
    info!(
        screened = summary.screened,
        anomalies = summary.anomalies,
        unknown_activities = summary.unknown_activities,
        skipped = summary.skipped,
        "screening finished"
    );

    Ok(())
}
