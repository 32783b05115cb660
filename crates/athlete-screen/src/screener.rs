//! Batch Screening

use anyhow::{bail, Context};
use data_validator::{validate_finite, VitalsChecker};
use feature_engine::{ActivityLookup, FeaturePreprocessor, FeatureVector, SensorReading};
use risk_engine::{assess, RiskAssessment};
use serde::{Deserialize, Serialize};
use std::io::{BufWriter, Read, Write};
use tracing::{debug, warn};

/// One input record: a raw reading and the probability the model gave it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub reading: SensorReading,
    pub probability: f64,
}

/// One output record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScreenReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub model_version: String,
    pub features: FeatureVector,
    pub activity: ActivityLookup,
    pub assessment: RiskAssessment,
}

/// Counters for one batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScreenSummary {
    pub screened: usize,
    pub anomalies: usize,
    pub unknown_activities: usize,
    pub skipped: usize,
}

pub struct Screener {
    preprocessor: FeaturePreprocessor,
    checker: VitalsChecker,
    strict: bool,
}

impl Screener {
    pub fn new(preprocessor: FeaturePreprocessor, checker: VitalsChecker, strict: bool) -> Self {
        Self {
            preprocessor,
            checker,
            strict,
        }
    }

    /// Preprocess, check vitals and assess a single sample
    pub fn screen(&self, sample: &Sample) -> anyhow::Result<ScreenReport> {
        let reading = &sample.reading;
        validate_finite(reading)?;

        let preprocessed = self.preprocessor.preprocess_reading(reading);
        if !preprocessed.activity.is_known() {
            if self.strict {
                bail!("unknown activity {:?}", reading.activity);
            }
            warn!(activity = %reading.activity, "unknown activity, encoded as default code");
        }

        let alerts = self.checker.check_reading(reading);
        let assessment = assess(sample.probability, alerts);

        Ok(ScreenReport {
            name: sample.name.clone(),
            model_version: self.preprocessor.version().to_string(),
            features: preprocessed.features,
            activity: preprocessed.activity,
            assessment,
        })
    }

    /// Screen a JSON array of samples, writing one JSON report per line
    pub fn screen_all<R: Read, W: Write>(&self, input: R, out: W) -> anyhow::Result<ScreenSummary> {
        let samples: Vec<Sample> = serde_json::from_reader(input).context("parsing samples")?;
        debug!(count = samples.len(), "samples loaded");

        let mut out = BufWriter::new(out);
        let mut summary = ScreenSummary::default();

        for (index, sample) in samples.iter().enumerate() {
            let report = match self.screen(sample) {
                Ok(report) => report,
                Err(e) if self.strict => return Err(e.context(format!("sample {index}"))),
                Err(e) => {
                    warn!(index, error = %e, "skipping sample");
                    summary.skipped += 1;
                    continue;
                }
            };

            summary.screened += 1;
            if report.assessment.is_anomaly() {
                summary.anomalies += 1;
            }
            if !report.activity.is_known() {
                summary.unknown_activities += 1;
            }

            serde_json::to_writer(&mut out, &report)?;
            writeln!(out)?;
        }

        out.flush()?;
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_validator::VitalAlert;
    use risk_engine::{AnomalyStatus, RiskLevel};

    fn sample(activity: &str, probability: f64) -> Sample {
        Sample {
            name: None,
            reading: SensorReading {
                heart_rate: 195.0,
                oxygen_level: 88.0,
                fatigue_score: 9.5,
                temperature: 39.2,
                activity: activity.to_string(),
            },
            probability,
        }
    }

    fn screener(strict: bool) -> Screener {
        Screener::new(
            FeaturePreprocessor::builtin(),
            VitalsChecker::default(),
            strict,
        )
    }

    #[test]
    fn test_screen_extreme_reading() {
        let report = screener(false).screen(&sample("Running", 0.97)).unwrap();
        assert_eq!(report.activity, ActivityLookup::Known(1));
        assert_eq!(report.assessment.status, AnomalyStatus::Anomaly);
        assert_eq!(report.assessment.risk, RiskLevel::High);
        assert_eq!(report.assessment.alerts.len(), 4);
        assert!(report.assessment.alerts.contains(&VitalAlert::HighBodyTemperature));
        assert_eq!(report.model_version, "athlete-anomaly-v1");
    }

    #[test]
    fn test_unknown_activity_lenient_and_strict() {
        let report = screener(false).screen(&sample("Swimming", 0.2)).unwrap();
        assert_eq!(report.activity, ActivityLookup::Unknown);

        let err = screener(true).screen(&sample("Swimming", 0.2)).unwrap_err();
        assert!(err.to_string().contains("Swimming"));
    }

    #[test]
    fn test_non_finite_rejected() {
        let mut bad = sample("Running", 0.2);
        bad.reading.heart_rate = f64::NAN;
        assert!(screener(false).screen(&bad).is_err());
    }
}
