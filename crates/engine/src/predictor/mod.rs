//! Risk prediction engine
//!
//! [`RiskPredictor`] orchestrates the full pipeline for one disease:
//! validate raw input, reproduce the training-time feature engineering,
//! scan for out-of-distribution values, score through the frozen
//! classifier, derive confidence, extract contributing factors and apply
//! the consultation policy. All state is read-only after construction, so
//! one predictor serves any number of concurrent calls.

mod explain;
mod policy;
mod transform;
mod validate;

pub use explain::{contributing_factors, narrative, Direction, FactorRule, DISCLAIMER};
pub use policy::{
    should_consult, HIGH_RISK_THRESHOLD, LOW_CONFIDENCE_THRESHOLD,
    SUPPORTED_CONFIDENCE_THRESHOLD,
};
pub use transform::assemble_vector;
pub use validate::{validate_features, FieldSpec};

use crate::artifact::ModelArtifact;
use crate::classifier::Classifier;
use crate::error::{ArtifactError, PredictionError, ValidationError};
use crate::models::{round3, DiseaseType, FeatureMap, PredictionResult, RiskLevel};
use crate::ood::OodDetector;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, warn};

/// Confidence never drops below this floor.
///
/// The confidence value is the doubled margin from the 0.5 decision
/// boundary, floored here. This is a deliberate heuristic, not a
/// calibrated probability: a poorly calibrated classifier yields a
/// misleading confidence by construction.
pub const CONFIDENCE_FLOOR: f64 = 0.5;

/// Everything that distinguishes one disease predictor from another,
/// supplied as data rather than duplicated code.
#[derive(Debug)]
pub struct DiseaseProfile {
    pub disease: DiseaseType,
    /// Name used in narratives ("diabetes", "heart disease", ...)
    pub display_name: &'static str,
    /// Raw input fields with physiological bounds
    pub fields: &'static [FieldSpec],
    /// Reproduces the training pipeline's feature engineering
    pub engineer: fn(&FeatureMap) -> FeatureMap,
    /// Clinical threshold rules for contributing factors
    pub rules: &'static [FactorRule],
    /// Personalized recommendations over the engineered features
    pub advice: fn(&FeatureMap, RiskLevel) -> Vec<String>,
    /// Cap on the recommendation list
    pub max_recommendations: usize,
}

/// Predictor facade for one disease.
///
/// Construction is the `Loaded` transition: it fails terminally with
/// [`ArtifactError`] when the artifact cannot be read or fails its
/// contract checks. Afterwards the predictor is `Ready`; `predict` never
/// mutates shared state and per-call failures stay local to that call.
#[derive(Debug)]
pub struct RiskPredictor {
    profile: &'static DiseaseProfile,
    artifact: ModelArtifact,
    ood: OodDetector,
}

impl RiskPredictor {
    /// Load the model artifact and construct a ready predictor.
    pub fn load(profile: &'static DiseaseProfile, path: &Path) -> Result<Self, ArtifactError> {
        let artifact = ModelArtifact::load(path)?;
        Ok(Self::from_artifact(profile, artifact))
    }

    /// Construct from an already-loaded artifact.
    pub fn from_artifact(profile: &'static DiseaseProfile, artifact: ModelArtifact) -> Self {
        Self {
            profile,
            artifact,
            ood: OodDetector::default(),
        }
    }

    pub fn disease(&self) -> DiseaseType {
        self.profile.disease
    }

    pub fn model_version(&self) -> &str {
        &self.artifact.version
    }

    /// Check presence and physiological range of every raw input field.
    pub fn validate(&self, features: &FeatureMap) -> Result<(), ValidationError> {
        validate_features(self.profile.fields, features)
    }

    /// Run the full prediction pipeline for one sample.
    ///
    /// Validates first and fails fast on bad input; OOD detection is
    /// advisory and never blocks scoring.
    pub fn predict(&self, features: &FeatureMap) -> Result<PredictionResult, PredictionError> {
        let start = Instant::now();

        self.validate(features)?;

        let engineered = (self.profile.engineer)(features);

        let ood_flag = self
            .ood
            .scan(&engineered, self.artifact.training_stats.as_ref());
        if let Some(flag) = &ood_flag {
            warn!(
                disease = %self.profile.disease,
                feature = %flag.feature,
                value = flag.value,
                z_score = flag.z_score,
                "Input feature far from training distribution"
            );
        }
        let ood_detected = ood_flag.is_some();

        let vector = assemble_vector(&engineered, &self.artifact.feature_order)?;
        let scaled = self.artifact.scaler.transform(&vector);

        let expected = self.artifact.classifier.num_features();
        if scaled.len() != expected {
            return Err(PredictionError::DimensionMismatch {
                expected,
                actual: scaled.len(),
            });
        }

        let proba = self.artifact.classifier.predict_proba(&scaled);
        if !proba[0].is_finite() || !proba[1].is_finite() {
            return Err(PredictionError::NonFiniteScore);
        }

        let risk_score = round3(proba[1]);
        let risk_level = RiskLevel::from_score(risk_score);
        let confidence = confidence_from_proba(proba);

        let factors = contributing_factors(self.profile.rules, &engineered);
        let explanation = narrative(self.profile.display_name, risk_score, risk_level, &factors);

        let mut recommendations = (self.profile.advice)(&engineered, risk_level);
        recommendations.truncate(self.profile.max_recommendations);

        let should_consult = should_consult(risk_score, confidence, ood_detected);

        debug!(
            disease = %self.profile.disease,
            risk_score,
            confidence,
            ood_detected,
            elapsed_us = start.elapsed().as_micros() as u64,
            "Prediction completed"
        );

        Ok(PredictionResult {
            disease_type: self.profile.disease,
            risk_score,
            risk_level,
            confidence,
            explanation,
            contributing_factors: factors,
            recommendations,
            should_consult,
            ood_detected,
            model_version: self.artifact.version.clone(),
        })
    }
}

/// Doubled distance from the decision boundary, floored at
/// [`CONFIDENCE_FLOOR`] so the engine never reports below-coin-flip
/// confidence.
pub fn confidence_from_proba(proba: [f64; 2]) -> f64 {
    let max_proba = proba[0].max(proba[1]);
    round3(((max_proba - 0.5) * 2.0).max(CONFIDENCE_FLOOR))
}
