//! Predictor registry
//!
//! Loads one predictor per supported disease at startup and routes
//! prediction requests to the right one. Construction is fail-fast: a
//! missing or malformed artifact aborts startup rather than surfacing
//! as a runtime error on the first request.

use std::collections::HashMap;

use tracing::info;

use crate::artifact::ModelArtifact;
use crate::config::EngineConfig;
use crate::diseases;
use crate::error::{ArtifactError, PredictionError};
use crate::models::{DiseaseType, FeatureMap, PredictionResult};
use crate::predictor::RiskPredictor;

#[derive(Debug)]
pub struct PredictorRegistry {
    predictors: HashMap<DiseaseType, RiskPredictor>,
}

impl PredictorRegistry {
    /// Load every supported disease's artifact from the configured model
    /// directory.
    pub fn from_config(config: &EngineConfig) -> Result<Self, ArtifactError> {
        let mut predictors = HashMap::new();
        for disease in DiseaseType::ALL {
            let path = config.artifact_path(disease);
            let predictor = RiskPredictor::load(diseases::profile(disease), &path)?;
            info!(
                disease = disease.as_str(),
                version = predictor.model_version(),
                "predictor ready"
            );
            predictors.insert(disease, predictor);
        }
        Ok(Self { predictors })
    }

    /// Build a registry from artifacts already in memory. Useful for tests
    /// and embedders that manage artifact storage themselves.
    pub fn from_artifacts(artifacts: impl IntoIterator<Item = (DiseaseType, ModelArtifact)>) -> Self {
        let mut predictors = HashMap::new();
        for (disease, artifact) in artifacts {
            let predictor = RiskPredictor::from_artifact(diseases::profile(disease), artifact);
            predictors.insert(disease, predictor);
        }
        Self { predictors }
    }

    pub fn get(&self, disease: DiseaseType) -> Option<&RiskPredictor> {
        self.predictors.get(&disease)
    }

    /// Diseases this registry can score, in declaration order.
    pub fn diseases(&self) -> Vec<DiseaseType> {
        DiseaseType::ALL
            .into_iter()
            .filter(|d| self.predictors.contains_key(d))
            .collect()
    }

    pub fn predict(
        &self,
        disease: DiseaseType,
        features: &FeatureMap,
    ) -> Result<PredictionResult, PredictionError> {
        match self.predictors.get(&disease) {
            Some(predictor) => predictor.predict(features),
            None => Err(PredictionError::UnsupportedDisease { disease }),
        }
    }
}
