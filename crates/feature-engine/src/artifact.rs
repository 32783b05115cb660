//! Versioned Preprocessor Artifact
//!
//! Scaler tables and the activity encoding are shipped next to the model as a
//! JSON artifact so they stay in sync with the weights they were fitted for.
//! Everything is validated once here; the hot path never re-checks.

use crate::activity::{ActivityMapping, BUILTIN_ACTIVITIES};
use crate::error::PreprocessError;
use crate::features::{FeaturePreprocessor, BUILTIN_VERSION, FEATURE_NAMES};
use crate::scaler::{ScalerParameters, BUILTIN_MEAN, BUILTIN_SCALE};
use config::{Config, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

/// Artifact bundled with the crate for the v1 model
pub const BUILTIN_CONFIG_JSON: &str = include_str!("../assets/scaler_v1.json");

/// One row of the activity encoding table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub name: String,
    pub code: u32,
}

/// On-disk form of the preprocessing tables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreprocessorConfig {
    /// Model version the tables were fitted for
    pub version: String,
    /// Feature names in input order; must match the model's order
    pub features: Vec<String>,
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
    pub activities: Vec<ActivityEntry>,
}

impl PreprocessorConfig {
    /// Parse an artifact from JSON text
    pub fn from_json_str(json: &str) -> Result<Self, PreprocessError> {
        let cfg = Config::builder()
            .add_source(File::from_str(json, FileFormat::Json))
            .build()?
            .try_deserialize()?;
        Ok(cfg)
    }

    /// Read an artifact from a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, PreprocessError> {
        let path = path.as_ref();
        let cfg: Self = Config::builder()
            .add_source(File::from(path).format(FileFormat::Json))
            .build()?
            .try_deserialize()?;
        info!(path = %path.display(), version = %cfg.version, "loaded preprocessor config");
        Ok(cfg)
    }

    /// Pretty-printed JSON, the form shipped next to the model
    pub fn to_json(&self) -> Result<String, PreprocessError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Artifact describing the v1 model's tables
    pub fn builtin() -> Self {
        Self {
            version: BUILTIN_VERSION.to_string(),
            features: FEATURE_NAMES.iter().map(ToString::to_string).collect(),
            mean: BUILTIN_MEAN.to_vec(),
            scale: BUILTIN_SCALE.to_vec(),
            activities: BUILTIN_ACTIVITIES
                .iter()
                .map(|&(name, code)| ActivityEntry {
                    name: name.to_string(),
                    code,
                })
                .collect(),
        }
    }

    fn check_feature_order(&self) -> Result<(), PreprocessError> {
        if self.features.iter().map(String::as_str).ne(FEATURE_NAMES) {
            return Err(PreprocessError::FeatureOrderMismatch {
                expected: FEATURE_NAMES.iter().map(ToString::to_string).collect(),
                actual: self.features.clone(),
            });
        }
        Ok(())
    }

    fn activity_mapping(&self) -> Result<ActivityMapping, PreprocessError> {
        let mut seen = HashSet::new();
        for entry in &self.activities {
            if !seen.insert(entry.name.as_str()) {
                return Err(PreprocessError::DuplicateActivity(entry.name.clone()));
            }
        }
        Ok(ActivityMapping::new(
            self.activities.iter().map(|e| (e.name.clone(), e.code)),
        ))
    }
}

impl Default for PreprocessorConfig {
    fn default() -> Self {
        Self::builtin()
    }
}

impl TryFrom<PreprocessorConfig> for FeaturePreprocessor {
    type Error = PreprocessError;

    fn try_from(cfg: PreprocessorConfig) -> Result<Self, Self::Error> {
        cfg.check_feature_order()?;
        let scaler = ScalerParameters::from_slices(&cfg.mean, &cfg.scale)?;
        let activities = cfg.activity_mapping()?;
        Ok(FeaturePreprocessor::new(cfg.version, scaler, activities))
    }
}

impl FeaturePreprocessor {
    /// Validate an artifact and build a preprocessor from it
    pub fn from_config(cfg: PreprocessorConfig) -> Result<Self, PreprocessError> {
        Self::try_from(cfg)
    }

    pub fn from_json_str(json: &str) -> Result<Self, PreprocessError> {
        Self::from_config(PreprocessorConfig::from_json_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, PreprocessError> {
        Self::from_config(PreprocessorConfig::from_path(path)?)
    }
}
