// Domain entities for the VitalSight server

// Inbound telemetry reading
pub mod reading;

pub use reading::{VitalsReading, UNKNOWN_USER};
