//! Risk Engine
//!
//! Turns the anomaly model's output probability into a binary decision, a
//! four-tier risk level, and a combined assessment with vital-sign alerts.

mod assessment;
mod level;

pub use assessment::{assess, AnomalyStatus, RiskAssessment};
pub use level::{is_anomaly, risk_level, RiskLevel, ANOMALY_THRESHOLD};

use thiserror::Error;

/// Errors from the risk engine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RiskError {
    #[error("unknown risk level: {0:?}")]
    UnknownLevel(String),
}
