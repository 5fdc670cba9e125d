use serde::Serialize;
use utoipa::ToSchema;

use vital_sight_domain::services::blood_pressure::BpSource;
use vital_sight_domain::services::glucose::PredictionOutcome;

/// Successful upload response
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UploadOkResponse {
    /// Always "ok"
    pub status: String,

    /// Scalar glucose-range estimate for the uploaded reading
    pub glucose_range: f64,

    /// Which blood-pressure source fed the model
    pub bp_source: BpSource,
}

impl UploadOkResponse {
    /// Build the response for one prediction outcome
    pub fn new(outcome: &PredictionOutcome) -> Self {
        Self {
            status: "ok".to_string(),
            glucose_range: outcome.glucose_range,
            bp_source: outcome.bp_source,
        }
    }
}

/// Error response shape shared by the upload endpoint's failure paths
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StatusErrorResponse {
    /// Always "error"
    pub status: String,

    /// Human-readable error message
    pub msg: String,
}

impl StatusErrorResponse {
    /// Body rejected before any core logic ran
    pub fn invalid_json() -> Self {
        Self::from_message("Invalid JSON")
    }

    /// Wrap an error message in the wire shape
    pub fn from_message(msg: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            msg: msg.into(),
        }
    }
}
