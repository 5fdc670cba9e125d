// Domain services for the VitalSight server

// Blood-pressure source resolution
pub mod blood_pressure;

// Feature assembly and glucose prediction
pub mod glucose;

pub use blood_pressure::{
    parse_cuff_bp, resolve_blood_pressure, BpSource, ResolvedBloodPressure,
};
pub use glucose::{
    create_glucose_service, GlucoseService, GlucoseServiceError, GlucoseServiceTrait,
    PredictionOutcome,
};
