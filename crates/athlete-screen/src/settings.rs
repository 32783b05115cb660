//! Vital-Sign Threshold Settings
//!
//! Layered: built-in defaults, then an optional JSON file, then
//! `ATHLETE_VITALS_*` environment variables (e.g. `ATHLETE_VITALS_OXYGEN_LOW=92`).

use anyhow::Context;
use config::{Config, Environment, File, FileFormat};
use data_validator::VitalsConfig;
use std::path::Path;
use tracing::info;

pub fn load_vitals(path: Option<&Path>) -> anyhow::Result<VitalsConfig> {
    let mut builder = Config::builder().add_source(Config::try_from(&VitalsConfig::default())?);

    if let Some(path) = path {
        builder = builder.add_source(File::from(path).format(FileFormat::Json));
    }

    let vitals: VitalsConfig = builder
        .add_source(Environment::with_prefix("ATHLETE_VITALS").try_parsing(true))
        .build()
        .and_then(|cfg| cfg.try_deserialize())
        .context("loading vital-sign thresholds")?;

    info!(?vitals, "vital-sign thresholds loaded");
    Ok(vitals)
}
