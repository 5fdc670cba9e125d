//! On-disk model artifact format.
//!
//! The artifact is a JSON document exported by the training pipeline:
//!
//! ```json
//! {
//!     "model_type": "linear_regression",
//!     "feature_names": ["PPG_Signal", "Heart_Rate", ...],
//!     "coefficients": [0.12, -0.4, ...],
//!     "intercept": 91.5
//! }
//! ```
//!
//! Loading is done once at process start and any problem with the file is
//! a fatal startup error for the server.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::{FeatureRow, GlucoseModel, ModelError};

/// The only model type this build knows how to evaluate
pub const LINEAR_REGRESSION_TYPE: &str = "linear_regression";

/// Serialized form of a trained regression model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    /// Identifies the evaluation strategy
    pub model_type: String,

    /// Column names the model was trained on
    pub feature_names: Vec<String>,

    /// One coefficient per feature name, in the same order
    pub coefficients: Vec<f64>,

    /// Constant term added to the weighted sum
    pub intercept: f64,
}

/// A loaded linear regression model
#[derive(Debug, Clone)]
pub struct LinearGlucoseModel {
    artifact: ModelArtifact,
}

impl LinearGlucoseModel {
    /// Load a model artifact from disk.
    ///
    /// Fails when the file is missing, unreadable, not valid JSON, of an
    /// unknown model type, or internally inconsistent.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let raw = fs::read(path).map_err(|source| ModelError::Read {
            path: path.display().to_string(),
            source,
        })?;

        let artifact: ModelArtifact =
            serde_json::from_slice(&raw).map_err(|source| ModelError::Deserialize {
                path: path.display().to_string(),
                source,
            })?;

        let model = Self::from_artifact(artifact)?;
        info!(
            path = %path.display(),
            features = model.artifact.feature_names.len(),
            "Model loaded successfully"
        );
        Ok(model)
    }

    /// Build a model from an already-deserialized artifact, validating it
    pub fn from_artifact(artifact: ModelArtifact) -> Result<Self, ModelError> {
        if artifact.model_type != LINEAR_REGRESSION_TYPE {
            return Err(ModelError::UnsupportedType(artifact.model_type));
        }
        if artifact.feature_names.is_empty() {
            return Err(ModelError::Malformed(
                "artifact declares no feature names".to_string(),
            ));
        }
        if artifact.feature_names.len() != artifact.coefficients.len() {
            return Err(ModelError::Malformed(format!(
                "{} feature names but {} coefficients",
                artifact.feature_names.len(),
                artifact.coefficients.len()
            )));
        }
        Ok(Self { artifact })
    }

    /// Column names this model requires in its input row
    pub fn feature_names(&self) -> &[String] {
        &self.artifact.feature_names
    }
}

impl GlucoseModel for LinearGlucoseModel {
    fn predict_one(&self, row: &FeatureRow) -> Result<f64, ModelError> {
        let mut total = self.artifact.intercept;
        for (name, coefficient) in self
            .artifact
            .feature_names
            .iter()
            .zip(&self.artifact.coefficients)
        {
            let value = row
                .get(name)
                .ok_or_else(|| ModelError::MissingFeature(name.clone()))?;
            total += coefficient * value;
        }
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_artifact() -> ModelArtifact {
        ModelArtifact {
            model_type: LINEAR_REGRESSION_TYPE.to_string(),
            feature_names: vec![
                "Heart_Rate".to_string(),
                "Systolic_Peak".to_string(),
                "Diastolic_Peak".to_string(),
            ],
            coefficients: vec![0.5, 0.25, -0.1],
            intercept: 80.0,
        }
    }

    #[test]
    fn test_predict_weighted_sum() {
        let model = LinearGlucoseModel::from_artifact(test_artifact()).unwrap();

        let row: FeatureRow = vec![
            ("Heart_Rate", 70.0),
            ("Systolic_Peak", 120.0),
            ("Diastolic_Peak", 80.0),
        ]
        .into_iter()
        .collect();

        let estimate = model.predict_one(&row).unwrap();
        assert!((estimate - (80.0 + 0.5 * 70.0 + 0.25 * 120.0 - 0.1 * 80.0)).abs() < 1e-9);
    }

    #[test]
    fn test_predict_is_column_order_independent() {
        let model = LinearGlucoseModel::from_artifact(test_artifact()).unwrap();

        let forward: FeatureRow = vec![
            ("Heart_Rate", 70.0),
            ("Systolic_Peak", 120.0),
            ("Diastolic_Peak", 80.0),
        ]
        .into_iter()
        .collect();

        let reversed: FeatureRow = vec![
            ("Diastolic_Peak", 80.0),
            ("Systolic_Peak", 120.0),
            ("Heart_Rate", 70.0),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            model.predict_one(&forward).unwrap(),
            model.predict_one(&reversed).unwrap()
        );
    }

    #[test]
    fn test_predict_missing_column_fails() {
        let model = LinearGlucoseModel::from_artifact(test_artifact()).unwrap();

        let row: FeatureRow = vec![("Heart_Rate", 70.0)].into_iter().collect();

        let err = model.predict_one(&row).unwrap_err();
        assert!(err.to_string().contains("Systolic_Peak"));
    }

    #[test]
    fn test_from_artifact_rejects_unknown_type() {
        let mut artifact = test_artifact();
        artifact.model_type = "gradient_boosting".to_string();

        let err = LinearGlucoseModel::from_artifact(artifact).unwrap_err();
        assert!(matches!(err, ModelError::UnsupportedType(_)));
    }

    #[test]
    fn test_from_artifact_rejects_length_mismatch() {
        let mut artifact = test_artifact();
        artifact.coefficients.pop();

        let err = LinearGlucoseModel::from_artifact(artifact).unwrap_err();
        assert!(matches!(err, ModelError::Malformed(_)));
    }

    #[test]
    fn test_from_artifact_rejects_empty_features() {
        let mut artifact = test_artifact();
        artifact.feature_names.clear();
        artifact.coefficients.clear();

        let err = LinearGlucoseModel::from_artifact(artifact).unwrap_err();
        assert!(matches!(err, ModelError::Malformed(_)));
    }

    #[test]
    fn test_load_round_trip() {
        let dir = std::env::temp_dir().join(format!("vitalsight-model-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("glucose_range_model.json");
        std::fs::write(&path, serde_json::to_vec(&test_artifact()).unwrap()).unwrap();

        let model = LinearGlucoseModel::load(&path).unwrap();
        assert_eq!(model.feature_names().len(), 3);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_missing_file_fails() {
        let err = LinearGlucoseModel::load("/nonexistent/glucose_range_model.json").unwrap_err();
        assert!(matches!(err, ModelError::Read { .. }));
    }
}
