//! Probability Thresholds

use crate::RiskError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Probabilities strictly above this are anomalies
pub const ANOMALY_THRESHOLD: f64 = 0.5;

const VERY_LOW_BELOW: f64 = 0.1;
const LOW_BELOW: f64 = 0.3;
const MODERATE_BELOW: f64 = 0.5;

/// Risk tier, ordered from least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    #[serde(rename = "Very Low")]
    VeryLow,
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    /// Display label
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::VeryLow => "Very Low",
            RiskLevel::Low => "Low",
            RiskLevel::Moderate => "Moderate",
            RiskLevel::High => "High",
        }
    }

    pub fn from_probability(probability: f64) -> Self {
        risk_level(probability)
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = RiskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Very Low" => Ok(RiskLevel::VeryLow),
            "Low" => Ok(RiskLevel::Low),
            "Moderate" => Ok(RiskLevel::Moderate),
            "High" => Ok(RiskLevel::High),
            other => Err(RiskError::UnknownLevel(other.to_string())),
        }
    }
}

/// Binary anomaly decision. Input is not range-checked.
pub fn is_anomaly(probability: f64) -> bool {
    probability > ANOMALY_THRESHOLD
}

/// Map a probability to its risk tier; the first matching bound wins, so a
/// probability sitting exactly on a bound lands in the tier above it.
/// NaN matches no bound and maps to [`RiskLevel::High`].
pub fn risk_level(probability: f64) -> RiskLevel {
    if probability < VERY_LOW_BELOW {
        RiskLevel::VeryLow
    } else if probability < LOW_BELOW {
        RiskLevel::Low
    } else if probability < MODERATE_BELOW {
        RiskLevel::Moderate
    } else {
        RiskLevel::High
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_risk_boundaries() {
        assert_eq!(risk_level(0.099_999), RiskLevel::VeryLow);
        assert_eq!(risk_level(0.1), RiskLevel::Low);
        assert_eq!(risk_level(0.299_99), RiskLevel::Low);
        assert_eq!(risk_level(0.3), RiskLevel::Moderate);
        assert_eq!(risk_level(0.499_99), RiskLevel::Moderate);
        assert_eq!(risk_level(0.5), RiskLevel::High);
        assert_eq!(risk_level(1.0), RiskLevel::High);
    }

    #[test]
    fn test_risk_out_of_range_inputs() {
        assert_eq!(risk_level(-3.0), RiskLevel::VeryLow);
        assert_eq!(risk_level(7.0), RiskLevel::High);
        assert_eq!(risk_level(f64::NAN), RiskLevel::High);
    }

    #[test]
    fn test_anomaly_threshold() {
        assert!(!is_anomaly(0.5));
        assert!(is_anomaly(0.500_01));
        assert!(!is_anomaly(0.0));
        assert!(is_anomaly(1.5));
        assert!(!is_anomaly(f64::NAN));
    }

    #[test]
    fn test_labels() {
        assert_eq!(RiskLevel::VeryLow.to_string(), "Very Low");
        assert_eq!(RiskLevel::Moderate.as_str(), "Moderate");
        assert_eq!("Very Low".parse::<RiskLevel>(), Ok(RiskLevel::VeryLow));
        assert_eq!("High".parse::<RiskLevel>(), Ok(RiskLevel::High));
        assert!("very low".parse::<RiskLevel>().is_err());
    }

    #[test]
    fn test_serde_uses_labels() {
        let json = serde_json::to_string(&RiskLevel::VeryLow).unwrap();
        assert_eq!(json, "\"Very Low\"");
        let level: RiskLevel = serde_json::from_str("\"Moderate\"").unwrap();
        assert_eq!(level, RiskLevel::Moderate);
    }

    #[test]
    fn test_ordering() {
        assert!(RiskLevel::VeryLow < RiskLevel::Low);
        assert!(RiskLevel::Low < RiskLevel::Moderate);
        assert!(RiskLevel::Moderate < RiskLevel::High);
    }

    proptest! {
        #[test]
        fn prop_risk_is_monotonic(a in -1.0f64..2.0, b in -1.0f64..2.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(risk_level(lo) <= risk_level(hi));
        }

        #[test]
        fn prop_anomaly_implies_high_risk(p in -1.0f64..2.0) {
            if is_anomaly(p) {
                prop_assert_eq!(risk_level(p), RiskLevel::High);
            }
        }
    }
}
