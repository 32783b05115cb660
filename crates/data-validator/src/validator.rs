//! Vital-Sign Checks

use crate::error::ValidationError;
use feature_engine::SensorReading;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Alert thresholds. All comparisons are strict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VitalsConfig {
    /// Heart rate above this is flagged (bpm)
    pub heart_rate_high: f64,
    /// Heart rate below this is flagged (bpm)
    pub heart_rate_low: f64,
    /// SpO2 below this is flagged (%)
    pub oxygen_low: f64,
    /// Fatigue score above this is flagged
    pub fatigue_high: f64,
    /// Body temperature above this is flagged (°C)
    pub temperature_high: f64,
    /// Body temperature below this is flagged (°C)
    pub temperature_low: f64,
}

impl Default for VitalsConfig {
    fn default() -> Self {
        Self {
            heart_rate_high: 180.0,
            heart_rate_low: 50.0,
            oxygen_low: 90.0,
            fatigue_high: 8.0,
            temperature_high: 38.5,
            temperature_low: 36.0,
        }
    }
}

/// Vital-sign alert raised on a raw reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VitalAlert {
    VeryHighHeartRate,
    VeryLowHeartRate,
    LowOxygenSaturation,
    HighFatigue,
    HighBodyTemperature,
    LowBodyTemperature,
}

impl VitalAlert {
    /// Human-readable message
    pub fn message(&self) -> &'static str {
        match self {
            VitalAlert::VeryHighHeartRate => "Very high heart rate",
            VitalAlert::VeryLowHeartRate => "Very low heart rate",
            VitalAlert::LowOxygenSaturation => "Low oxygen saturation",
            VitalAlert::HighFatigue => "High fatigue level",
            VitalAlert::HighBodyTemperature => "High body temperature",
            VitalAlert::LowBodyTemperature => "Low body temperature",
        }
    }
}

impl std::fmt::Display for VitalAlert {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Threshold checker for raw readings
#[derive(Debug, Clone, Default)]
pub struct VitalsChecker {
    config: VitalsConfig,
}

impl VitalsChecker {
    pub fn new(config: VitalsConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &VitalsConfig {
        &self.config
    }

    /// Alerts for one reading, in heart rate, oxygen, fatigue, temperature order
    pub fn check(
        &self,
        heart_rate: f64,
        oxygen_level: f64,
        fatigue_score: f64,
        temperature: f64,
    ) -> Vec<VitalAlert> {
        let cfg = &self.config;
        let mut alerts = Vec::new();

        if heart_rate > cfg.heart_rate_high {
            alerts.push(VitalAlert::VeryHighHeartRate);
        } else if heart_rate < cfg.heart_rate_low {
            alerts.push(VitalAlert::VeryLowHeartRate);
        }

        if oxygen_level < cfg.oxygen_low {
            alerts.push(VitalAlert::LowOxygenSaturation);
        }

        if fatigue_score > cfg.fatigue_high {
            alerts.push(VitalAlert::HighFatigue);
        }

        if temperature > cfg.temperature_high {
            alerts.push(VitalAlert::HighBodyTemperature);
        } else if temperature < cfg.temperature_low {
            alerts.push(VitalAlert::LowBodyTemperature);
        }

        if !alerts.is_empty() {
            debug!(?alerts, "vital-sign alerts raised");
        }
        alerts
    }

    pub fn check_reading(&self, reading: &SensorReading) -> Vec<VitalAlert> {
        self.check(
            reading.heart_rate,
            reading.oxygen_level,
            reading.fatigue_score,
            reading.temperature,
        )
    }
}

/// Reject readings carrying NaN or infinite values
pub fn validate_finite(reading: &SensorReading) -> Result<(), ValidationError> {
    let fields = [
        ("heart_rate", reading.heart_rate),
        ("oxygen_level", reading.oxygen_level),
        ("fatigue_score", reading.fatigue_score),
        ("temperature", reading.temperature),
    ];

    match fields.iter().find(|(_, value)| !value.is_finite()) {
        Some(&(field, value)) => Err(ValidationError::NonFinite { field, value }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn reading(
        heart_rate: f64,
        oxygen_level: f64,
        fatigue_score: f64,
        temperature: f64,
    ) -> SensorReading {
        SensorReading {
            heart_rate,
            oxygen_level,
            fatigue_score,
            temperature,
            activity: "Running".to_string(),
        }
    }

    #[test]
    fn test_normal_reading_has_no_alerts() {
        let checker = VitalsChecker::default();
        assert!(checker.check(140.0, 96.0, 4.0, 37.2).is_empty());
    }

    #[test]
    fn test_extreme_reading() {
        let checker = VitalsChecker::default();
        let alerts = checker.check(195.0, 88.0, 9.5, 39.2);
        assert_eq!(
            alerts,
            vec![
                VitalAlert::VeryHighHeartRate,
                VitalAlert::LowOxygenSaturation,
                VitalAlert::HighFatigue,
                VitalAlert::HighBodyTemperature,
            ]
        );
    }

    #[test]
    fn test_low_side_alerts() {
        let checker = VitalsChecker::default();
        let alerts = checker.check(45.0, 95.0, 3.0, 35.5);
        assert_eq!(
            alerts,
            vec![VitalAlert::VeryLowHeartRate, VitalAlert::LowBodyTemperature]
        );
    }

    #[test]
    fn test_thresholds_are_strict() {
        let checker = VitalsChecker::default();
        assert!(checker.check(180.0, 90.0, 8.0, 38.5).is_empty());
        assert!(checker.check(50.0, 90.0, 8.0, 36.0).is_empty());
    }

    #[test]
    fn test_custom_config() {
        let checker = VitalsChecker::new(VitalsConfig {
            heart_rate_high: 170.0,
            ..Default::default()
        });
        assert_eq!(
            checker.check_reading(&reading(175.0, 93.0, 7.5, 38.2)),
            vec![VitalAlert::VeryHighHeartRate]
        );
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let cfg: VitalsConfig = serde_json::from_str(r#"{"oxygen_low": 92.0}"#).unwrap();
        assert_eq!(cfg.oxygen_low, 92.0);
        assert_eq!(cfg.heart_rate_high, 180.0);
    }

    #[test]
    fn test_alert_messages() {
        assert_eq!(VitalAlert::LowOxygenSaturation.to_string(), "Low oxygen saturation");
        assert_eq!(VitalAlert::HighFatigue.message(), "High fatigue level");
    }

    #[test]
    fn test_validate_finite() {
        assert!(validate_finite(&reading(140.0, 96.0, 4.0, 37.2)).is_ok());

        let err = validate_finite(&reading(140.0, f64::NAN, 4.0, 37.2)).unwrap_err();
        assert!(matches!(err, ValidationError::NonFinite { field: "oxygen_level", .. }));

        let err = validate_finite(&reading(140.0, 96.0, 4.0, f64::NEG_INFINITY)).unwrap_err();
        assert!(matches!(err, ValidationError::NonFinite { field: "temperature", .. }));
    }

    proptest! {
        #[test]
        fn prop_heart_rate_alerts_exclusive(hr in -500.0f64..500.0) {
            let alerts = VitalsChecker::default().check(hr, 96.0, 4.0, 37.2);
            prop_assert!(alerts.len() <= 1);
        }
    }
}
