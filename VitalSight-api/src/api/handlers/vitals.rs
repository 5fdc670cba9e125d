use axum::{
    body::Bytes,
    extract::{Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Local;
use tracing::{error, info, instrument, warn};

use vital_sight_data::audit::VitalsLogRecord;
use vital_sight_domain::entities::reading::VitalsReading;
use vital_sight_domain::services::glucose::PredictionOutcome;

use crate::api::routes::AppState;
use crate::entities::vitals::{StatusErrorResponse, UploadOkResponse};

/// Ingest one telemetry reading and respond with the glucose estimate.
///
/// The body is taken as raw bytes rather than an extractor-parsed JSON
/// value so that an unparseable body produces this endpoint's own error
/// shape instead of the framework's default rejection.
#[utoipa::path(
    post,
    path = "/upload",
    request_body = VitalsReading,
    responses(
        (status = 200, description = "Reading predicted and recorded", body = UploadOkResponse),
        (status = 400, description = "Body is not valid JSON", body = StatusErrorResponse),
        (status = 500, description = "Prediction failed", body = StatusErrorResponse),
    ),
    tag = "vitals"
)]
#[instrument(skip(state, body))]
pub async fn upload_vitals(State(state): State<AppState>, body: Bytes) -> Response {
    let reading = match parse_reading(&body) {
        Some(reading) => reading,
        None => {
            warn!("Rejected upload, body is not a JSON reading");
            return (
                StatusCode::BAD_REQUEST,
                Json(StatusErrorResponse::invalid_json()),
            )
                .into_response();
        }
    };

    let outcome = match state.glucose.predict(&reading) {
        Ok(outcome) => outcome,
        Err(e) => {
            error!("Prediction failed: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(StatusErrorResponse::from_message(e.to_string())),
            )
                .into_response();
        }
    };

    // Publish before logging: the dashboard cell must reflect the reading
    // even when the log write fails.
    state.latest.publish(outcome.glucose_range);

    let record = build_log_record(&reading, &outcome);
    if let Err(e) = state.audit.append(&record) {
        // Log failures never fail the upload; the response is already computed
        error!("Log write error: {}", e);
    }

    info!(
        user_id = reading.user_id_or_unknown(),
        glucose_range = outcome.glucose_range,
        bp_source = outcome.bp_source.as_str(),
        "Upload processed"
    );

    (StatusCode::OK, Json(UploadOkResponse::new(&outcome))).into_response()
}

/// Return the most recent estimate for the dashboard.
///
/// The value is a bare JSON scalar: a number once any reading has
/// succeeded, the string sentinel "UNKNOWN" before that.
#[utoipa::path(
    get,
    path = "/latest_glucose",
    responses(
        (status = 200, description = "Latest glucose estimate as a bare JSON number, or \"UNKNOWN\""),
    ),
    tag = "vitals"
)]
#[instrument(skip(state))]
pub async fn latest_glucose(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(state.latest.snapshot().to_json())
}

/// Parse the upload body, accepting only a JSON object.
///
/// Field-level leniency lives in the reading's deserializers; this guard
/// keeps arrays and bare scalars out, which serde would otherwise try to
/// interpret as a sequence of struct fields.
fn parse_reading(body: &[u8]) -> Option<VitalsReading> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    if !value.is_object() {
        return None;
    }
    serde_json::from_value(value).ok()
}

/// Assemble the audit row for a successfully predicted reading
fn build_log_record(reading: &VitalsReading, outcome: &PredictionOutcome) -> VitalsLogRecord {
    VitalsLogRecord {
        timestamp: Local::now().to_rfc3339(),
        user_id: reading.user_id_or_unknown().to_string(),
        ir: reading.ir,
        red: reading.red,
        spo2_raw: reading.spo2_raw,
        spo2_filtered: reading.spo2_filtered,
        bpm: reading.bpm,
        beat_avg: reading.beat_avg,
        bp: reading.bp.clone(),
        sys_peak: reading.sys_peak,
        dia_peak: reading.dia_peak,
        pulse_area: reading.pulse_area,
        glucose_range: outcome.glucose_range,
        bp_source: outcome.bp_source.to_string(),
    }
}
