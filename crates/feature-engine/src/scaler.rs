//! Standard Scaler Parameters
//!
//! Per-feature mean and scale fitted when the anomaly model was trained.
//! Standardization is `(x - mean) / scale`, applied positionally.

use crate::error::PreprocessError;
use crate::features::{FEATURE_DIMENSION, FEATURE_NAMES};
use serde::{Deserialize, Serialize};

/// Feature means of the v1 athlete anomaly model
pub const BUILTIN_MEAN: [f64; FEATURE_DIMENSION] = [
    130.102_569_919_879_98,
    95.099_563_833_82,
    4.976_967_278_282_001,
    37.822_34,
    1.522,
];

/// Feature scales of the v1 athlete anomaly model
pub const BUILTIN_SCALE: [f64; FEATURE_DIMENSION] = [
    14.704_072_545_919_214,
    2.949_244_702_250_52,
    1.917_212_207_336_193_2,
    0.335_668_771_857_019_9,
    1.117_817_516_413_121_9,
];

/// Validated mean/scale tables, one entry per feature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawScaler")]
pub struct ScalerParameters {
    mean: [f64; FEATURE_DIMENSION],
    scale: [f64; FEATURE_DIMENSION],
}

#[derive(Deserialize)]
struct RawScaler {
    mean: Vec<f64>,
    scale: Vec<f64>,
}

impl TryFrom<RawScaler> for ScalerParameters {
    type Error = PreprocessError;

    fn try_from(raw: RawScaler) -> Result<Self, Self::Error> {
        Self::from_slices(&raw.mean, &raw.scale)
    }
}

impl ScalerParameters {
    /// Build scaler tables, rejecting non-finite means and zero or non-finite scales
    pub fn new(
        mean: [f64; FEATURE_DIMENSION],
        scale: [f64; FEATURE_DIMENSION],
    ) -> Result<Self, PreprocessError> {
        for (index, (&m, &s)) in mean.iter().zip(scale.iter()).enumerate() {
            if !m.is_finite() {
                return Err(PreprocessError::NonFiniteMean {
                    index,
                    feature: FEATURE_NAMES[index],
                    value: m,
                });
            }
            if s == 0.0 || !s.is_finite() {
                return Err(PreprocessError::InvalidScale {
                    index,
                    feature: FEATURE_NAMES[index],
                    value: s,
                });
            }
        }

        Ok(Self { mean, scale })
    }

    /// Build scaler tables from loosely-sized sequences (as read from an artifact)
    pub fn from_slices(mean: &[f64], scale: &[f64]) -> Result<Self, PreprocessError> {
        let mean: [f64; FEATURE_DIMENSION] =
            mean.try_into().map_err(|_| PreprocessError::LengthMismatch {
                field: "mean",
                expected: FEATURE_DIMENSION,
                actual: mean.len(),
            })?;
        let scale: [f64; FEATURE_DIMENSION] =
            scale.try_into().map_err(|_| PreprocessError::LengthMismatch {
                field: "scale",
                expected: FEATURE_DIMENSION,
                actual: scale.len(),
            })?;

        Self::new(mean, scale)
    }

    /// Scaler tables of the v1 model
    pub const fn builtin() -> Self {
        Self {
            mean: BUILTIN_MEAN,
            scale: BUILTIN_SCALE,
        }
    }

    pub fn mean(&self) -> &[f64; FEATURE_DIMENSION] {
        &self.mean
    }

    pub fn scale(&self) -> &[f64; FEATURE_DIMENSION] {
        &self.scale
    }

    /// Standardize a raw feature vector
    pub fn transform(&self, raw: &[f64; FEATURE_DIMENSION]) -> [f64; FEATURE_DIMENSION] {
        let mut out = [0.0; FEATURE_DIMENSION];
        for (i, value) in out.iter_mut().enumerate() {
            *value = (raw[i] - self.mean[i]) / self.scale[i];
        }
        out
    }

    /// Undo standardization, recovering the raw feature vector
    pub fn inverse_transform(
        &self,
        standardized: &[f64; FEATURE_DIMENSION],
    ) -> [f64; FEATURE_DIMENSION] {
        let mut out = [0.0; FEATURE_DIMENSION];
        for (i, value) in out.iter_mut().enumerate() {
            *value = standardized[i].mul_add(self.scale[i], self.mean[i]);
        }
        out
    }
}

impl Default for ScalerParameters {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_builtin_tables_are_valid() {
        let checked = ScalerParameters::new(BUILTIN_MEAN, BUILTIN_SCALE).unwrap();
        assert_eq!(checked, ScalerParameters::builtin());
    }

    #[test]
    fn test_transform_at_mean_is_zero() {
        let scaler = ScalerParameters::builtin();
        let out = scaler.transform(&BUILTIN_MEAN);
        assert!(out.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_one_scale_above_mean() {
        let scaler = ScalerParameters::builtin();
        let mut raw = BUILTIN_MEAN;
        raw[0] += BUILTIN_SCALE[0];
        let out = scaler.transform(&raw);
        assert!((out[0] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_scale_rejected() {
        let mut scale = BUILTIN_SCALE;
        scale[3] = 0.0;
        let err = ScalerParameters::new(BUILTIN_MEAN, scale).unwrap_err();
        assert!(matches!(
            err,
            PreprocessError::InvalidScale { index: 3, feature: "temperature", .. }
        ));
    }

    #[test]
    fn test_nan_scale_and_mean_rejected() {
        let mut scale = BUILTIN_SCALE;
        scale[0] = f64::NAN;
        assert!(ScalerParameters::new(BUILTIN_MEAN, scale).is_err());

        let mut mean = BUILTIN_MEAN;
        mean[4] = f64::INFINITY;
        assert!(matches!(
            ScalerParameters::new(mean, BUILTIN_SCALE),
            Err(PreprocessError::NonFiniteMean { index: 4, .. })
        ));
    }

    #[test]
    fn test_length_mismatch() {
        let err = ScalerParameters::from_slices(&[1.0; 4], &BUILTIN_SCALE).unwrap_err();
        assert!(matches!(
            err,
            PreprocessError::LengthMismatch { field: "mean", expected: 5, actual: 4 }
        ));

        let err = ScalerParameters::from_slices(&BUILTIN_MEAN, &[1.0; 6]).unwrap_err();
        assert!(matches!(
            err,
            PreprocessError::LengthMismatch { field: "scale", actual: 6, .. }
        ));
    }

    #[test]
    fn test_deserialize_validates() {
        let bad = r#"{"mean": [0, 0, 0, 0, 0], "scale": [1, 1, 0, 1, 1]}"#;
        assert!(serde_json::from_str::<ScalerParameters>(bad).is_err());

        let good = r#"{"mean": [0, 0, 0, 0, 0], "scale": [1, 1, 2, 1, 1]}"#;
        let scaler: ScalerParameters = serde_json::from_str(good).unwrap();
        assert_eq!(scaler.scale()[2], 2.0);
    }

    proptest! {
        #[test]
        fn prop_inverse_reconstructs_raw(
            raw in prop::array::uniform5(-1.0e4f64..1.0e4),
        ) {
            let scaler = ScalerParameters::builtin();
            let back = scaler.inverse_transform(&scaler.transform(&raw));
            for i in 0..FEATURE_DIMENSION {
                let tolerance = 1e-9 * raw[i].abs().max(1.0);
                prop_assert!((back[i] - raw[i]).abs() <= tolerance);
            }
        }
    }
}
