//! Core data models for the risk engine

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Raw and engineered features, keyed by feature name.
///
/// A `BTreeMap` keeps iteration order stable so repeated predictions over
/// identical input produce identical results.
pub type FeatureMap = BTreeMap<String, f64>;

/// Disease supported by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiseaseType {
    Diabetes,
    Heart,
    Pcos,
}

impl DiseaseType {
    pub const ALL: [DiseaseType; 3] = [DiseaseType::Diabetes, DiseaseType::Heart, DiseaseType::Pcos];

    pub fn as_str(&self) -> &'static str {
        match self {
            DiseaseType::Diabetes => "diabetes",
            DiseaseType::Heart => "heart",
            DiseaseType::Pcos => "pcos",
        }
    }
}

impl fmt::Display for DiseaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Risk band derived from the scored probability
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

/// Score below which risk is considered low
pub const LOW_RISK_THRESHOLD: f64 = 0.3;

/// Score below which risk is considered moderate
pub const MODERATE_RISK_THRESHOLD: f64 = 0.6;

impl RiskLevel {
    /// Map a risk score to its band. The thresholds are fixed and shared
    /// across all diseases.
    pub fn from_score(score: f64) -> Self {
        if score < LOW_RISK_THRESHOLD {
            RiskLevel::Low
        } else if score < MODERATE_RISK_THRESHOLD {
            RiskLevel::Moderate
        } else {
            RiskLevel::High
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Moderate => "moderate",
            RiskLevel::High => "high",
        }
    }
}

/// Severity of a contributing factor
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    High,
    Medium,
    Low,
}

/// Per-feature statistics captured at training time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureStats {
    pub mean: f64,
    pub std: f64,
}

/// One input feature identified as materially influencing the assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContributingFactor {
    pub name: String,
    pub value: f64,
    pub impact: Impact,
    pub modifiable: bool,
    pub description: String,
}

/// Standardized prediction output
///
/// Created fresh on every `predict` call; immutable once constructed and
/// safe to hand to any number of consumers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub disease_type: DiseaseType,
    pub risk_score: f64,
    pub risk_level: RiskLevel,
    pub confidence: f64,
    pub explanation: String,
    pub contributing_factors: Vec<ContributingFactor>,
    pub recommendations: Vec<String>,
    pub should_consult: bool,
    pub ood_detected: bool,
    pub model_version: String,
}

/// Round to three decimals, matching the precision the training pipeline
/// reports scores at.
pub(crate) fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
