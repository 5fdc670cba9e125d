//! Regression model loading and evaluation.
//!
//! The model is an opaque collaborator: the domain layer hands it a
//! single-row feature table and takes back one scalar. The concrete
//! artifact format lives in [`artifact`].

use indexmap::IndexMap;
use thiserror::Error;

pub mod artifact;

pub use artifact::{LinearGlucoseModel, ModelArtifact};

/// Error type for model loading and evaluation
#[derive(Error, Debug)]
pub enum ModelError {
    /// The artifact file could not be read
    #[error("Failed to read model artifact {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    /// The artifact file was not valid JSON for the expected shape
    #[error("Failed to deserialize model artifact {path}: {source}")]
    Deserialize {
        path: String,
        source: serde_json::Error,
    },

    /// The artifact declared a model type this build cannot evaluate
    #[error("Unsupported model type: {0}")]
    UnsupportedType(String),

    /// The artifact is internally inconsistent
    #[error("Malformed model artifact: {0}")]
    Malformed(String),

    /// The feature row is missing a column the model requires
    #[error("Feature row is missing required column '{0}'")]
    MissingFeature(String),
}

/// A single-row feature table keyed by column name.
///
/// Insertion order is preserved for display purposes but evaluation looks
/// columns up by name, so callers may assemble the row in any order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureRow {
    columns: IndexMap<String, f64>,
}

impl FeatureRow {
    /// Create an empty feature row
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the value of a named column, replacing any previous value
    pub fn insert(&mut self, name: impl Into<String>, value: f64) {
        self.columns.insert(name.into(), value);
    }

    /// Look up a column by name
    pub fn get(&self, name: &str) -> Option<f64> {
        self.columns.get(name).copied()
    }

    /// Number of columns in the row
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether the row has no columns
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Iterate over the columns in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.columns.iter().map(|(name, value)| (name.as_str(), *value))
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for FeatureRow {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        let mut row = Self::new();
        for (name, value) in iter {
            row.insert(name, value);
        }
        row
    }
}

/// Trait for regression models that map one feature row to one scalar
pub trait GlucoseModel: Send + Sync {
    /// Evaluate the model for a single row
    fn predict_one(&self, row: &FeatureRow) -> Result<f64, ModelError>;
}
