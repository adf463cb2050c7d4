//! Engine configuration
//!
//! Artifact locations are a deployment concern, not part of the prediction
//! contract. The embedding application loads this once and hands it to
//! [`crate::registry::PredictorRegistry::from_config`].

use crate::models::DiseaseType;
use serde::Deserialize;
use std::path::PathBuf;

/// Engine configuration
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Directory holding the per-disease model artifacts
    #[serde(default = "default_model_dir")]
    pub model_dir: PathBuf,

    /// Diabetes artifact file name
    #[serde(default = "default_diabetes_artifact")]
    pub diabetes_artifact: String,

    /// Heart disease artifact file name
    #[serde(default = "default_heart_artifact")]
    pub heart_artifact: String,

    /// PCOS artifact file name
    #[serde(default = "default_pcos_artifact")]
    pub pcos_artifact: String,
}

fn default_model_dir() -> PathBuf {
    PathBuf::from("models")
}

fn default_diabetes_artifact() -> String {
    "diabetes_model.json".to_string()
}

fn default_heart_artifact() -> String {
    "heart_model.json".to_string()
}

fn default_pcos_artifact() -> String {
    "pcos_model.json".to_string()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            model_dir: default_model_dir(),
            diabetes_artifact: default_diabetes_artifact(),
            heart_artifact: default_heart_artifact(),
            pcos_artifact: default_pcos_artifact(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from the environment (`RISK_ENGINE_*` variables),
    /// falling back to defaults.
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::Environment::with_prefix("RISK_ENGINE"))
            .build()?;

        Ok(config.try_deserialize().unwrap_or_default())
    }

    /// Full path of the artifact for a disease
    pub fn artifact_path(&self, disease: DiseaseType) -> PathBuf {
        let file = match disease {
            DiseaseType::Diabetes => &self.diabetes_artifact,
            DiseaseType::Heart => &self.heart_artifact,
            DiseaseType::Pcos => &self.pcos_artifact,
        };
        self.model_dir.join(file)
    }
}
