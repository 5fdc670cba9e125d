//! Process-wide shared state.
//!
//! The only piece of state the server keeps between requests is the most
//! recent glucose estimate, held in a single atomically-replaceable cell.

use std::sync::{Arc, PoisonError, RwLock};

use serde_json::{json, Value};

/// Sentinel rendered before any reading has been predicted
pub const UNKNOWN_GLUCOSE: &str = "UNKNOWN";

/// Value held by the latest-estimate cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LatestGlucose {
    /// No reading has succeeded since process start
    Unknown,
    /// Most recent successful estimate
    Known(f64),
}

impl LatestGlucose {
    /// JSON rendering used by the dashboard endpoint: a bare number, or the
    /// `UNKNOWN` sentinel string
    pub fn to_json(&self) -> Value {
        match self {
            LatestGlucose::Unknown => json!(UNKNOWN_GLUCOSE),
            LatestGlucose::Known(value) => json!(value),
        }
    }
}

/// Shared single-slot cell holding the most recent estimate.
///
/// Writers replace the whole value (last writer wins); readers may observe
/// a stale or immediately-superseded value.
#[derive(Debug, Clone)]
pub struct LatestGlucoseCell {
    inner: Arc<RwLock<LatestGlucose>>,
}

impl Default for LatestGlucoseCell {
    fn default() -> Self {
        Self::new()
    }
}

impl LatestGlucoseCell {
    /// Create a cell in the initial `Unknown` state
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(LatestGlucose::Unknown)),
        }
    }

    /// Replace the cell's value with a new estimate
    pub fn publish(&self, estimate: f64) {
        let mut slot = self
            .inner
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *slot = LatestGlucose::Known(estimate);
    }

    /// Read the current value
    pub fn snapshot(&self) -> LatestGlucose {
        *self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }
}
