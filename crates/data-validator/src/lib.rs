//! Reading Validation
//!
//! Model-independent checks on raw athlete readings: finiteness, and
//! threshold alerts on heart rate, oxygen saturation, fatigue and temperature.

mod error;
mod validator;

pub use error::ValidationError;
pub use validator::{validate_finite, VitalAlert, VitalsChecker, VitalsConfig};
