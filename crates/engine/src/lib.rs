//! Risk scoring and explanation engine for clinical screening models
//!
//! This crate provides the core functionality for:
//! - Loading frozen classifier artifacts (model + scaler + training stats)
//! - Input validation against physiological bounds
//! - Deterministic feature engineering mirroring training-time transforms
//! - Out-of-distribution detection via z-scores
//! - Risk scoring, confidence estimation and rule-driven explanations
//! - A consult/no-consult recommendation policy

pub mod artifact;
pub mod classifier;
pub mod config;
pub mod diseases;
pub mod error;
pub mod models;
pub mod ood;
pub mod predictor;
pub mod registry;

pub use artifact::{ModelArtifact, Scaler};
pub use classifier::{Classifier, ClassifierSpec, LogisticModel, TreeEnsemble};
pub use config::EngineConfig;
pub use error::{ArtifactError, PredictionError, ValidationError};
pub use models::*;
pub use predictor::RiskPredictor;
pub use registry::PredictorRegistry;
