//! Athlete Feature Engine
//!
//! Maps raw biometric readings (heart rate, oxygen level, fatigue score,
//! temperature, activity) onto the standardized feature vector expected by
//! the athlete anomaly model.
//!
//! All operations are pure; a [`FeaturePreprocessor`] is immutable once built
//! and can be shared across threads.

mod activity;
mod artifact;
mod error;
mod features;
mod scaler;

pub use activity::{ActivityLookup, ActivityMapping, BUILTIN_ACTIVITIES, DEFAULT_ACTIVITY_CODE};
pub use artifact::{ActivityEntry, PreprocessorConfig, BUILTIN_CONFIG_JSON};
pub use error::PreprocessError;
pub use features::{
    preprocess, FeaturePreprocessor, FeatureVector, Preprocessed, SensorReading, ACTIVITY_INDEX,
    BUILTIN_VERSION, FEATURE_DIMENSION, FEATURE_NAMES,
};
pub use scaler::{ScalerParameters, BUILTIN_MEAN, BUILTIN_SCALE};
