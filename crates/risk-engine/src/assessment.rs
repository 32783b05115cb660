//! Combined Risk Assessment

use crate::level::{is_anomaly, risk_level, RiskLevel};
use data_validator::VitalAlert;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Binary model decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnomalyStatus {
    Normal,
    Anomaly,
}

impl AnomalyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnomalyStatus::Normal => "NORMAL",
            AnomalyStatus::Anomaly => "ANOMALY",
        }
    }
}

impl std::fmt::Display for AnomalyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Model decision, risk tier and vital-sign alerts for one reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub status: AnomalyStatus,
    pub risk: RiskLevel,
    /// Model output probability, as given
    pub probability: f64,
    /// Probability of the decided class
    pub confidence: f64,
    pub alerts: Vec<VitalAlert>,
}

impl RiskAssessment {
    pub fn is_anomaly(&self) -> bool {
        self.status == AnomalyStatus::Anomaly
    }
}

/// Combine a model probability with the vital-sign alerts of the same reading
pub fn assess(probability: f64, alerts: Vec<VitalAlert>) -> RiskAssessment {
    let (status, confidence) = if is_anomaly(probability) {
        (AnomalyStatus::Anomaly, probability)
    } else {
        (AnomalyStatus::Normal, 1.0 - probability)
    };
    let risk = risk_level(probability);

    if status == AnomalyStatus::Anomaly {
        info!(probability, %risk, alerts = alerts.len(), "anomaly detected");
    } else {
        debug!(probability, %risk, "reading normal");
    }

    RiskAssessment {
        status,
        risk,
        probability,
        confidence,
        alerts,
    }
}
