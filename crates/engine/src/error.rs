//! Engine error taxonomy
//!
//! Three distinct failure classes with different blast radii:
//! - [`ArtifactError`]: the model bundle cannot be loaded; fatal to that
//!   predictor instance and retryable only by an operator.
//! - [`ValidationError`]: a single request carried bad input; local and
//!   recoverable, names the offending field and its bounds.
//! - [`PredictionError`]: a data-contract defect surfaced mid-computation;
//!   propagated, never masked by a fallback result.

use std::path::PathBuf;
use thiserror::Error;

/// Failure to locate, read or verify a model artifact.
///
/// Surfaced to callers as a service-unavailable condition; the engine never
/// falls back to a default model.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("model artifact not found at {path}")]
    NotFound { path: PathBuf },

    #[error("failed to read model artifact {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse model artifact {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("feature order lists {features} features but the classifier expects {expected}")]
    FeatureCountMismatch { features: usize, expected: usize },

    #[error("scaler covers {scaler} features but the classifier expects {expected}")]
    ScalerMismatch { scaler: usize, expected: usize },
}

/// A missing or out-of-range raw input feature.
///
/// Reported before any numeric work begins; values are never clamped.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("missing required field: {field}")]
    MissingField { field: String },

    #[error("{field} out of range ({min}-{max}): got {value}")]
    OutOfRange {
        field: String,
        value: f64,
        min: f64,
        max: f64,
    },
}

/// Failure during transform or scoring.
///
/// Apart from `InvalidInput`, every variant is a programming or data
/// contract defect: the computation is deterministic, so retrying changes
/// nothing and no partial result is ever returned.
#[derive(Debug, Error)]
pub enum PredictionError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] ValidationError),

    #[error("engineered features are missing '{feature}' required by the model")]
    MissingEngineeredFeature { feature: String },

    #[error("feature vector has {actual} values but the model expects {expected}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("classifier produced a non-finite probability")]
    NonFiniteScore,

    #[error("no predictor registered for disease '{disease}'")]
    UnsupportedDisease { disease: crate::models::DiseaseType },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_names_field_and_bounds() {
        let err = ValidationError::OutOfRange {
            field: "Glucose".to_string(),
            value: 1000.0,
            min: 40.0,
            max: 400.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("Glucose"));
        assert!(msg.contains("40"));
        assert!(msg.contains("400"));
        assert!(msg.contains("1000"));
    }

    #[test]
    fn test_validation_error_converts_to_prediction_error() {
        let err = ValidationError::MissingField {
            field: "BMI".to_string(),
        };
        let pred: PredictionError = err.into();
        assert!(matches!(pred, PredictionError::InvalidInput(_)));
    }

    #[test]
    fn test_artifact_error_display() {
        let err = ArtifactError::FeatureCountMismatch {
            features: 12,
            expected: 13,
        };
        assert!(err.to_string().contains("12"));
        assert!(err.to_string().contains("13"));
    }
}
