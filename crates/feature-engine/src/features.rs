//! Feature Vector Assembly

use crate::activity::{ActivityLookup, ActivityMapping};
use crate::error::PreprocessError;
use crate::scaler::ScalerParameters;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use tracing::debug;

/// Number of features consumed by the anomaly model
pub const FEATURE_DIMENSION: usize = 5;

/// Feature names in model input order
pub const FEATURE_NAMES: [&str; FEATURE_DIMENSION] = [
    "heart_rate",
    "oxygen_level",
    "fatigue_score",
    "temperature",
    "activity",
];

/// Position of the encoded activity in the feature vector
pub const ACTIVITY_INDEX: usize = 4;

/// Model version label of the built-in tables
pub const BUILTIN_VERSION: &str = "athlete-anomaly-v1";

/// Standardized model input, in [`FEATURE_NAMES`] order
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureVector {
    values: [f64; FEATURE_DIMENSION],
}

impl FeatureVector {
    pub fn values(&self) -> &[f64; FEATURE_DIMENSION] {
        &self.values
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    /// Narrow to `f32`, the input dtype of the exported TFLite model
    #[allow(clippy::cast_possible_truncation)]
    pub fn to_f32(&self) -> [f32; FEATURE_DIMENSION] {
        self.values.map(|v| v as f32)
    }
}

impl From<FeatureVector> for [f64; FEATURE_DIMENSION] {
    fn from(vector: FeatureVector) -> Self {
        vector.values
    }
}

/// One raw biometric sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    /// Beats per minute
    pub heart_rate: f64,
    /// SpO2 percentage
    pub oxygen_level: f64,
    /// Self-reported fatigue, 1-10
    pub fatigue_score: f64,
    /// Body temperature (°C)
    pub temperature: f64,
    pub activity: String,
}

/// Feature vector together with how the activity was resolved
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Preprocessed {
    pub features: FeatureVector,
    pub activity: ActivityLookup,
}

/// Turns raw readings into standardized model input
#[derive(Debug, Clone, PartialEq)]
pub struct FeaturePreprocessor {
    version: String,
    scaler: ScalerParameters,
    activities: ActivityMapping,
}

impl FeaturePreprocessor {
    /// Assemble a preprocessor from already-validated tables
    pub fn new(
        version: impl Into<String>,
        scaler: ScalerParameters,
        activities: ActivityMapping,
    ) -> Self {
        Self {
            version: version.into(),
            scaler,
            activities,
        }
    }

    /// Preprocessor using the v1 model's tables
    pub fn builtin() -> Self {
        Self::new(
            BUILTIN_VERSION,
            ScalerParameters::builtin(),
            ActivityMapping::builtin(),
        )
    }

    /// Version label of the loaded tables
    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn scaler(&self) -> &ScalerParameters {
        &self.scaler
    }

    pub fn activities(&self) -> &ActivityMapping {
        &self.activities
    }

    /// Unscaled vector `[heart_rate, oxygen_level, fatigue_score, temperature, activity_code]`
    pub fn raw_features(
        &self,
        heart_rate: f64,
        oxygen_level: f64,
        fatigue_score: f64,
        temperature: f64,
        activity: &str,
    ) -> [f64; FEATURE_DIMENSION] {
        let code = self.activities.code(activity);
        [
            heart_rate,
            oxygen_level,
            fatigue_score,
            temperature,
            f64::from(code),
        ]
    }

    /// Standardize one reading. Unknown activities are encoded as code 0.
    pub fn preprocess(
        &self,
        heart_rate: f64,
        oxygen_level: f64,
        fatigue_score: f64,
        temperature: f64,
        activity: &str,
    ) -> FeatureVector {
        self.preprocess_checked(heart_rate, oxygen_level, fatigue_score, temperature, activity)
            .features
    }

    /// Same as [`preprocess`](Self::preprocess), also reporting whether the activity was known
    pub fn preprocess_checked(
        &self,
        heart_rate: f64,
        oxygen_level: f64,
        fatigue_score: f64,
        temperature: f64,
        activity: &str,
    ) -> Preprocessed {
        let lookup = self.activities.lookup(activity);
        if !lookup.is_known() {
            debug!(activity, "unknown activity, encoding as default code");
        }

        let raw = [
            heart_rate,
            oxygen_level,
            fatigue_score,
            temperature,
            f64::from(lookup.code()),
        ];

        Preprocessed {
            features: FeatureVector {
                values: self.scaler.transform(&raw),
            },
            activity: lookup,
        }
    }

    /// Like [`preprocess`](Self::preprocess) but rejects activities missing from the table
    pub fn preprocess_strict(
        &self,
        heart_rate: f64,
        oxygen_level: f64,
        fatigue_score: f64,
        temperature: f64,
        activity: &str,
    ) -> Result<FeatureVector, PreprocessError> {
        let out =
            self.preprocess_checked(heart_rate, oxygen_level, fatigue_score, temperature, activity);
        if out.activity.is_known() {
            Ok(out.features)
        } else {
            Err(PreprocessError::UnknownActivity(activity.to_string()))
        }
    }

    pub fn preprocess_reading(&self, reading: &SensorReading) -> Preprocessed {
        self.preprocess_checked(
            reading.heart_rate,
            reading.oxygen_level,
            reading.fatigue_score,
            reading.temperature,
            &reading.activity,
        )
    }
}

impl Default for FeaturePreprocessor {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Standardize one reading with the built-in v1 tables
pub fn preprocess(
    heart_rate: f64,
    oxygen_level: f64,
    fatigue_score: f64,
    temperature: f64,
    activity: &str,
) -> FeatureVector {
    static BUILTIN: OnceLock<FeaturePreprocessor> = OnceLock::new();
    BUILTIN
        .get_or_init(FeaturePreprocessor::builtin)
        .preprocess(heart_rate, oxygen_level, fatigue_score, temperature, activity)
}
