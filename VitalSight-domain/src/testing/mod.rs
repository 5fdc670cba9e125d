//! Testing utilities for the VitalSight domain layer.
//!
//! Only compiled with the `mock` feature. The mock service runs the real
//! blood-pressure resolver so provenance tags stay truthful, and stubs
//! only the model invocation.

use crate::entities::reading::VitalsReading;
use crate::services::blood_pressure::resolve_blood_pressure;
use crate::services::glucose::{GlucoseServiceError, GlucoseServiceTrait, PredictionOutcome};

/// Mock glucose service with configurable behavior
#[derive(Debug, Clone)]
pub struct MockGlucoseService {
    estimate: f64,
    failure: Option<String>,
}

impl Default for MockGlucoseService {
    fn default() -> Self {
        Self::new()
    }
}

impl MockGlucoseService {
    /// Create a mock returning a fixed default estimate
    pub fn new() -> Self {
        Self {
            estimate: 100.0,
            failure: None,
        }
    }

    /// Configure the estimate the mock returns
    pub fn with_estimate(mut self, estimate: f64) -> Self {
        self.estimate = estimate;
        self
    }

    /// Configure the mock to fail every prediction
    pub fn with_failure(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }
}

impl GlucoseServiceTrait for MockGlucoseService {
    fn predict(&self, reading: &VitalsReading) -> Result<PredictionOutcome, GlucoseServiceError> {
        if let Some(message) = &self.failure {
            return Err(GlucoseServiceError::Prediction(message.clone()));
        }
        let bp = resolve_blood_pressure(reading);
        Ok(PredictionOutcome {
            glucose_range: self.estimate,
            bp_source: bp.source,
        })
    }
}
