//! Model artifact loading and validation
//!
//! An artifact is the frozen bundle produced by the offline training
//! pipeline: classifier, fit-time scaler, feature column order, per-feature
//! training statistics and a version tag. It is read once per predictor,
//! contract-checked before use, and immutable afterwards.

use crate::classifier::{Classifier, ClassifierSpec};
use crate::error::ArtifactError;
use crate::models::FeatureStats;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::info;

/// Smallest scale applied when standardizing, to avoid division by zero on
/// zero-variance training columns.
const MIN_SCALE: f64 = 1e-6;

/// Fit-time mean/scale standardization, applied identically at inference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl Scaler {
    /// Standardize one sample into a fresh vector
    pub fn transform(&self, x: &[f64]) -> Vec<f64> {
        x.iter()
            .zip(self.mean.iter().zip(self.scale.iter()))
            .map(|(v, (m, s))| (v - m) / s.max(MIN_SCALE))
            .collect()
    }

    /// Identity scaler for a given dimensionality
    pub fn identity(len: usize) -> Self {
        Self {
            mean: vec![0.0; len],
            scale: vec![1.0; len],
        }
    }
}

/// Frozen bundle of a trained classifier plus the metadata needed to run
/// it consistently at inference time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trained_at: Option<DateTime<Utc>>,
    pub feature_order: Vec<String>,
    pub scaler: Scaler,
    /// Per-feature training statistics; absent means OOD detection always
    /// reports "not detected".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub training_stats: Option<BTreeMap<String, FeatureStats>>,
    pub classifier: ClassifierSpec,
}

impl ModelArtifact {
    /// Load and contract-check an artifact from a JSON file.
    ///
    /// Any failure here is fatal to the predictor being constructed; the
    /// engine never substitutes a default model.
    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        if !path.exists() {
            return Err(ArtifactError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let raw = fs::read_to_string(path).map_err(|source| ArtifactError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let artifact: ModelArtifact =
            serde_json::from_str(&raw).map_err(|source| ArtifactError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        artifact.check_contract()?;

        info!(
            version = %artifact.version,
            model = artifact.classifier.name(),
            features = artifact.feature_order.len(),
            trained_at = ?artifact.trained_at,
            "Model artifact loaded"
        );

        Ok(artifact)
    }

    /// Verify internal consistency: the feature order defines the vector
    /// the classifier and scaler were fit on, so all three must agree on
    /// dimensionality before a single prediction runs.
    fn check_contract(&self) -> Result<(), ArtifactError> {
        let expected = self.classifier.num_features();

        if self.feature_order.len() != expected {
            return Err(ArtifactError::FeatureCountMismatch {
                features: self.feature_order.len(),
                expected,
            });
        }

        if self.scaler.mean.len() != expected || self.scaler.scale.len() != expected {
            return Err(ArtifactError::ScalerMismatch {
                scaler: self.scaler.mean.len().min(self.scaler.scale.len()),
                expected,
            });
        }

        if let ClassifierSpec::TreeEnsemble(ensemble) = &self.classifier {
            if let Some(max_idx) = ensemble.max_feature_index() {
                if max_idx >= expected {
                    return Err(ArtifactError::FeatureCountMismatch {
                        features: max_idx + 1,
                        expected,
                    });
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::LogisticModel;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn artifact_json(weights: usize, order: &[&str], scaler_len: usize) -> serde_json::Value {
        serde_json::json!({
            "version": "1.0.0",
            "feature_order": order,
            "scaler": {
                "mean": vec![0.0; scaler_len],
                "scale": vec![1.0; scaler_len],
            },
            "classifier": {
                "kind": "logistic",
                "weights": vec![0.1; weights],
                "bias": 0.0,
            }
        })
    }

    fn write_artifact(value: &serde_json::Value) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", value).unwrap();
        file
    }

    #[test]
    fn test_load_valid_artifact() {
        let file = write_artifact(&artifact_json(2, &["a", "b"], 2));
        let artifact = ModelArtifact::load(file.path()).unwrap();
        assert_eq!(artifact.version, "1.0.0");
        assert_eq!(artifact.feature_order, vec!["a", "b"]);
        assert!(artifact.training_stats.is_none());
    }

    #[test]
    fn test_missing_artifact() {
        let err = ModelArtifact::load(Path::new("/nonexistent/model.json")).unwrap_err();
        assert!(matches!(err, ArtifactError::NotFound { .. }));
    }

    #[test]
    fn test_corrupt_artifact() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();
        let err = ModelArtifact::load(file.path()).unwrap_err();
        assert!(matches!(err, ArtifactError::Parse { .. }));
    }

    #[test]
    fn test_feature_count_mismatch() {
        let file = write_artifact(&artifact_json(3, &["a", "b"], 2));
        let err = ModelArtifact::load(file.path()).unwrap_err();
        assert!(matches!(
            err,
            ArtifactError::FeatureCountMismatch {
                features: 2,
                expected: 3
            }
        ));
    }

    #[test]
    fn test_scaler_mismatch() {
        let file = write_artifact(&artifact_json(2, &["a", "b"], 3));
        let err = ModelArtifact::load(file.path()).unwrap_err();
        assert!(matches!(err, ArtifactError::ScalerMismatch { .. }));
    }

    #[test]
    fn test_tree_feature_index_out_of_range() {
        let value = serde_json::json!({
            "version": "1.0.0",
            "feature_order": ["a", "b"],
            "scaler": {"mean": [0.0, 0.0], "scale": [1.0, 1.0]},
            "classifier": {
                "kind": "tree_ensemble",
                "num_features": 2,
                "trees": [{"nodes": [
                    {"node": "split", "feature": 7, "threshold": 0.5, "left": 1, "right": 2},
                    {"node": "leaf", "value": -1.0},
                    {"node": "leaf", "value": 1.0}
                ]}]
            }
        });
        let file = write_artifact(&value);
        let err = ModelArtifact::load(file.path()).unwrap_err();
        assert!(matches!(err, ArtifactError::FeatureCountMismatch { .. }));
    }

    #[test]
    fn test_scaler_transform() {
        let scaler = Scaler {
            mean: vec![10.0, 0.0],
            scale: vec![2.0, 0.0],
        };
        let out = scaler.transform(&[14.0, 5.0]);
        assert!((out[0] - 2.0).abs() < 1e-12);
        // Zero scale falls back to the epsilon guard instead of dividing
        // by zero.
        assert!(out[1].is_finite());
    }

    #[test]
    fn test_identity_scaler() {
        let scaler = Scaler::identity(3);
        assert_eq!(scaler.transform(&[1.0, -2.0, 0.5]), vec![1.0, -2.0, 0.5]);
    }

    #[test]
    fn test_logistic_model_roundtrip() {
        let model = LogisticModel {
            weights: vec![0.5],
            bias: 0.1,
        };
        let json = serde_json::to_string(&model).unwrap();
        let back: LogisticModel = serde_json::from_str(&json).unwrap();
        assert_eq!(back.weights, model.weights);
    }
}
