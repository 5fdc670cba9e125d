//! Feature assembly and glucose prediction.
//!
//! Combines the resolved blood pressure with the remaining telemetry
//! fields and the fixed demographic profile into the single-row feature
//! table the regression model consumes.

use thiserror::Error;
use tracing::debug;

use crate::entities::reading::VitalsReading;
use crate::services::blood_pressure::{resolve_blood_pressure, BpSource, ResolvedBloodPressure};
use vital_sight_data::model::{FeatureRow, GlucoseModel, LinearGlucoseModel};

/// Column names the regression model was trained on
pub mod columns {
    pub const PPG_SIGNAL: &str = "PPG_Signal";
    pub const HEART_RATE: &str = "Heart_Rate";
    pub const SYSTOLIC_PEAK: &str = "Systolic_Peak";
    pub const DIASTOLIC_PEAK: &str = "Diastolic_Peak";
    pub const PULSE_AREA: &str = "Pulse_Area";
    pub const AGE: &str = "Age";
    pub const GENDER: &str = "Gender";
    pub const HEIGHT: &str = "Height";
    pub const WEIGHT: &str = "Weight";
    pub const PL: &str = "pl";
}

// Fixed stand-in profile. Per-user demographics are not modeled yet, and
// changing any of these values changes model output.
pub const PROFILE_AGE: f64 = 22.0;
pub const PROFILE_GENDER: f64 = 1.0;
pub const PROFILE_HEIGHT_CM: f64 = 170.0;
pub const PROFILE_WEIGHT_KG: f64 = 65.0;
pub const PROFILE_PL: f64 = 1.0;

/// Glucose service errors
#[derive(Debug, Error)]
pub enum GlucoseServiceError {
    /// The model rejected the feature row or failed internally
    #[error("Prediction failed: {0}")]
    Prediction(String),
}

/// Result of predicting one reading
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictionOutcome {
    /// Scalar glucose-range estimate from the model
    pub glucose_range: f64,
    /// Which blood-pressure source fed the feature row
    pub bp_source: BpSource,
}

/// Trait for glucose prediction operations
pub trait GlucoseServiceTrait: Send + Sync {
    /// Predict the glucose range for one reading
    fn predict(&self, reading: &VitalsReading) -> Result<PredictionOutcome, GlucoseServiceError>;
}

/// Assemble the model's feature row from a reading and its resolved blood
/// pressure. Missing telemetry fields become 0; demographic columns are
/// the fixed profile constants.
pub fn build_feature_row(reading: &VitalsReading, bp: &ResolvedBloodPressure) -> FeatureRow {
    let mut row = FeatureRow::new();
    row.insert(columns::PPG_SIGNAL, reading.ppg_signal.unwrap_or(0.0));
    row.insert(columns::HEART_RATE, reading.bpm.unwrap_or(0.0));
    row.insert(columns::SYSTOLIC_PEAK, bp.systolic);
    row.insert(columns::DIASTOLIC_PEAK, bp.diastolic);
    row.insert(columns::PULSE_AREA, reading.pulse_area.unwrap_or(0.0));
    row.insert(columns::AGE, PROFILE_AGE);
    row.insert(columns::GENDER, PROFILE_GENDER);
    row.insert(columns::HEIGHT, PROFILE_HEIGHT_CM);
    row.insert(columns::WEIGHT, PROFILE_WEIGHT_KG);
    row.insert(columns::PL, PROFILE_PL);
    row
}

/// Glucose prediction service backed by a regression model
pub struct GlucoseService<M: GlucoseModel> {
    model: M,
}

impl<M: GlucoseModel> GlucoseService<M> {
    /// Create a new glucose service around a loaded model
    pub fn new(model: M) -> Self {
        Self { model }
    }
}

impl<M: GlucoseModel> GlucoseServiceTrait for GlucoseService<M> {
    fn predict(&self, reading: &VitalsReading) -> Result<PredictionOutcome, GlucoseServiceError> {
        let bp = resolve_blood_pressure(reading);
        let row = build_feature_row(reading, &bp);

        let glucose_range = self
            .model
            .predict_one(&row)
            .map_err(|e| GlucoseServiceError::Prediction(e.to_string()))?;

        debug!(
            user_id = reading.user_id_or_unknown(),
            glucose_range,
            bp_source = bp.source.as_str(),
            "Prediction completed"
        );

        Ok(PredictionOutcome {
            glucose_range,
            bp_source: bp.source,
        })
    }
}

/// Create a glucose service from a model loaded off disk
pub fn create_glucose_service(model: LinearGlucoseModel) -> impl GlucoseServiceTrait {
    GlucoseService::new(model)
}
