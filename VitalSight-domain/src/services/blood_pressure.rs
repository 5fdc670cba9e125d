//! Blood-pressure source resolution.
//!
//! A reading can carry blood pressure from two places: an operator-entered
//! cuff string (`bp`) and waveform-derived peaks (`sys_peak`/`dia_peak`).
//! The resolver decides which one feeds the model and tags the choice so
//! the caller can log provenance.

use std::fmt;

use serde::Serialize;
use utoipa::ToSchema;

use crate::entities::reading::VitalsReading;

/// Which source supplied the resolved blood pressure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum BpSource {
    /// Operator-entered cuff reading
    Cuff,
    /// Peaks derived from the PPG waveform
    Ppg,
}

impl BpSource {
    /// Wire/log representation of the source tag
    pub fn as_str(&self) -> &'static str {
        match self {
            BpSource::Cuff => "CUFF",
            BpSource::Ppg => "PPG",
        }
    }
}

impl fmt::Display for BpSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Blood pressure chosen for one reading, with its provenance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedBloodPressure {
    pub systolic: f64,
    pub diastolic: f64,
    pub source: BpSource,
}

/// Parse an operator-entered cuff string of the shape `"<int>/<int>"`.
///
/// Returns `None` for every other shape: missing separator, more than one
/// separator, or parts that are not integers. Malformed input is an
/// expected condition here, not an error.
pub fn parse_cuff_bp(raw: &str) -> Option<(i64, i64)> {
    let (sys_text, dia_text) = raw.split_once('/')?;
    if dia_text.contains('/') {
        return None;
    }
    let systolic = sys_text.trim().parse::<i64>().ok()?;
    let diastolic = dia_text.trim().parse::<i64>().ok()?;
    Some((systolic, diastolic))
}

/// Select the authoritative blood pressure for a reading.
///
/// A parseable cuff string always wins over the waveform peaks, with no
/// plausibility bounds applied to the entered values. Otherwise the
/// waveform peaks are used, absent peaks counting as 0.
pub fn resolve_blood_pressure(reading: &VitalsReading) -> ResolvedBloodPressure {
    match reading.bp.as_deref().and_then(parse_cuff_bp) {
        Some((systolic, diastolic)) => ResolvedBloodPressure {
            systolic: systolic as f64,
            diastolic: diastolic as f64,
            source: BpSource::Cuff,
        },
        None => ResolvedBloodPressure {
            systolic: reading.sys_peak.unwrap_or(0.0),
            diastolic: reading.dia_peak.unwrap_or(0.0),
            source: BpSource::Ppg,
        },
    }
}
