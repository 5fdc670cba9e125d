//! The inbound telemetry reading.
//!
//! The sensing device fires-and-forgets one JSON upload per reading and
//! firmware revisions differ in which fields they send, so every field is
//! optional and wrongly-typed values are treated the same as absent ones
//! rather than rejecting the upload.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Sentinel used when the device did not identify its user
pub const UNKNOWN_USER: &str = "UNKNOWN";

/// One raw reading as uploaded by the sensing device.
///
/// Numeric telemetry fields default to `None` when absent or non-numeric;
/// the predictor substitutes 0 where it needs a value. `bp` is the
/// operator-entered cuff string (expected shape `"<int>/<int>"`) and is
/// kept raw here; parsing happens in the resolver.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct VitalsReading {
    /// Opaque identifier of the uploading user
    #[serde(default, deserialize_with = "lenient_string")]
    pub user_id: Option<String>,

    /// Raw photoplethysmography signal value
    #[serde(default, deserialize_with = "lenient_number")]
    pub ppg_signal: Option<f64>,

    /// Instantaneous heart rate in beats per minute
    #[serde(default, deserialize_with = "lenient_number")]
    pub bpm: Option<f64>,

    /// Rolling-average heart rate reported by the device
    #[serde(rename = "beatAvg", default, deserialize_with = "lenient_number")]
    pub beat_avg: Option<f64>,

    /// Systolic peak estimated from the PPG waveform
    #[serde(default, deserialize_with = "lenient_number")]
    pub sys_peak: Option<f64>,

    /// Diastolic peak estimated from the PPG waveform
    #[serde(default, deserialize_with = "lenient_number")]
    pub dia_peak: Option<f64>,

    /// Area under the pulse waveform
    #[serde(default, deserialize_with = "lenient_number")]
    pub pulse_area: Option<f64>,

    /// Infrared channel intensity (pass-through, logged only)
    #[serde(default, deserialize_with = "lenient_number")]
    pub ir: Option<f64>,

    /// Red channel intensity (pass-through, logged only)
    #[serde(default, deserialize_with = "lenient_number")]
    pub red: Option<f64>,

    /// Unfiltered SpO2 (pass-through, logged only)
    #[serde(default, deserialize_with = "lenient_number")]
    pub spo2_raw: Option<f64>,

    /// Filtered SpO2 (pass-through, logged only)
    #[serde(default, deserialize_with = "lenient_number")]
    pub spo2_filtered: Option<f64>,

    /// Operator-entered cuff blood pressure, e.g. "120/80"
    #[serde(default, deserialize_with = "lenient_string")]
    pub bp: Option<String>,
}

impl VitalsReading {
    /// The uploading user, or the `UNKNOWN` sentinel
    pub fn user_id_or_unknown(&self) -> &str {
        self.user_id.as_deref().unwrap_or(UNKNOWN_USER)
    }
}

/// Accept any JSON value, keeping it only when it is a number
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_f64())
}

/// Accept any JSON value, keeping it only when it is a string
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::String(text) => Ok(Some(text)),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_reading_deserializes() {
        let reading: VitalsReading = serde_json::from_value(json!({
            "user_id": "u1",
            "ppg_signal": 0.5,
            "bpm": 70,
            "beatAvg": 71.5,
            "sys_peak": 5,
            "dia_peak": 3,
            "pulse_area": 1.2,
            "ir": 10432,
            "red": 9821,
            "spo2_raw": 96,
            "spo2_filtered": 97.5,
            "bp": "120/80"
        }))
        .unwrap();

        assert_eq!(reading.user_id.as_deref(), Some("u1"));
        assert_eq!(reading.bpm, Some(70.0));
        assert_eq!(reading.beat_avg, Some(71.5));
        assert_eq!(reading.bp.as_deref(), Some("120/80"));
    }

    #[test]
    fn test_empty_object_deserializes_to_all_absent() {
        let reading: VitalsReading = serde_json::from_value(json!({})).unwrap();

        assert!(reading.user_id.is_none());
        assert!(reading.ppg_signal.is_none());
        assert!(reading.bpm.is_none());
        assert!(reading.bp.is_none());
        assert_eq!(reading.user_id_or_unknown(), UNKNOWN_USER);
    }

    #[test]
    fn test_wrongly_typed_fields_treated_as_absent() {
        let reading: VitalsReading = serde_json::from_value(json!({
            "bpm": "seventy",
            "sys_peak": null,
            "dia_peak": true,
            "bp": 12080,
            "user_id": 42
        }))
        .unwrap();

        assert!(reading.bpm.is_none());
        assert!(reading.sys_peak.is_none());
        assert!(reading.dia_peak.is_none());
        assert!(reading.bp.is_none());
        assert_eq!(reading.user_id_or_unknown(), UNKNOWN_USER);
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let reading: VitalsReading = serde_json::from_value(json!({
            "bpm": 70,
            "firmware_rev": "2.1.3"
        }))
        .unwrap();

        assert_eq!(reading.bpm, Some(70.0));
    }

    #[test]
    fn test_scalar_body_is_rejected() {
        assert!(serde_json::from_value::<VitalsReading>(json!("reading")).is_err());
        assert!(serde_json::from_value::<VitalsReading>(json!(42)).is_err());
    }
}
