//! Append-only daily CSV audit log.
//!
//! Every successfully predicted reading is appended to
//! `<dir>/vitals_<YYYY-MM-DD>.csv`. The header row is written only when a
//! day's file is created (or found empty); appends are serialized behind a
//! mutex so concurrent requests cannot interleave rows or race the header
//! check.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use chrono::{Local, NaiveDate};
use thiserror::Error;

/// Fixed column order of every daily log file
pub const LOG_FILE_HEADER: [&str; 14] = [
    "timestamp",
    "user_id",
    "ir",
    "red",
    "spo2_raw",
    "spo2_filtered",
    "bpm",
    "beatAvg",
    "bp",
    "sys_peak",
    "dia_peak",
    "pulse_area",
    "glucose_range",
    "bp_source",
];

/// Error type for audit log operations
#[derive(Error, Debug)]
pub enum AuditLogError {
    /// Filesystem error while creating the log directory or opening a file
    #[error("Audit log I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialization error
    #[error("Audit log CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// One row of the audit log.
///
/// Optional fields mirror the inbound reading: a field the device did not
/// send is written as an empty cell, exactly as received.
#[derive(Debug, Clone, PartialEq)]
pub struct VitalsLogRecord {
    /// ISO-8601 local timestamp of the write
    pub timestamp: String,
    /// Uploading user, or the `UNKNOWN` sentinel
    pub user_id: String,
    pub ir: Option<f64>,
    pub red: Option<f64>,
    pub spo2_raw: Option<f64>,
    pub spo2_filtered: Option<f64>,
    pub bpm: Option<f64>,
    pub beat_avg: Option<f64>,
    /// Raw cuff string as uploaded, not the parsed values
    pub bp: Option<String>,
    pub sys_peak: Option<f64>,
    pub dia_peak: Option<f64>,
    pub pulse_area: Option<f64>,
    /// Model output for this reading
    pub glucose_range: f64,
    /// Which blood-pressure source fed the model ("CUFF" or "PPG")
    pub bp_source: String,
}

impl VitalsLogRecord {
    /// Render the record as CSV cells in [`LOG_FILE_HEADER`] order
    fn to_fields(&self) -> Vec<String> {
        vec![
            self.timestamp.clone(),
            self.user_id.clone(),
            opt_number(self.ir),
            opt_number(self.red),
            opt_number(self.spo2_raw),
            opt_number(self.spo2_filtered),
            opt_number(self.bpm),
            opt_number(self.beat_avg),
            self.bp.clone().unwrap_or_default(),
            opt_number(self.sys_peak),
            opt_number(self.dia_peak),
            opt_number(self.pulse_area),
            self.glucose_range.to_string(),
            self.bp_source.clone(),
        ]
    }
}

fn opt_number(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Writer for the daily vitals log files
#[derive(Debug)]
pub struct VitalsLogWriter {
    dir: PathBuf,
    write_guard: Mutex<()>,
}

impl VitalsLogWriter {
    /// Create a writer rooted at `dir`, creating the directory if needed
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, AuditLogError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            write_guard: Mutex::new(()),
        })
    }

    /// Directory the daily files are written into
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File name for a given calendar day
    pub fn file_name_for(date: NaiveDate) -> String {
        format!("vitals_{}.csv", date.format("%Y-%m-%d"))
    }

    /// Path of the file the next append would target
    pub fn path_for_today(&self) -> PathBuf {
        self.dir.join(Self::file_name_for(Local::now().date_naive()))
    }

    /// Append one record to today's file, writing the header first when the
    /// file is new. Serialized across threads.
    pub fn append(&self, record: &VitalsLogRecord) -> Result<(), AuditLogError> {
        let _guard = self
            .write_guard
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let path = self.path_for_today();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let needs_header = file.metadata()?.len() == 0;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        if needs_header {
            writer.write_record(LOG_FILE_HEADER)?;
        }
        writer.write_record(record.to_fields())?;
        writer.flush()?;
        Ok(())
    }

    /// Quick writability probe used by the health endpoint
    pub fn is_writable(&self) -> bool {
        self.dir.is_dir()
            && std::fs::metadata(&self.dir)
                .map(|m| !m.permissions().readonly())
                .unwrap_or(false)
    }
}
