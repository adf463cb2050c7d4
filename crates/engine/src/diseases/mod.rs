//! Per-disease predictor profiles
//!
//! Each disease contributes data, not code: its raw field bounds, the
//! feature engineering mirroring its training pipeline, its clinical rule
//! table and its advice generator. The shared pipeline in
//! [`crate::predictor`] does the rest.

pub mod diabetes;
pub mod heart;
pub mod pcos;

pub use diabetes::{DiabetesRequest, DIABETES};
pub use heart::{HeartRequest, HEART};
pub use pcos::{PcosRequest, PCOS};

use crate::models::{DiseaseType, FeatureMap};
use crate::predictor::DiseaseProfile;

/// Profile for a disease type
pub fn profile(disease: DiseaseType) -> &'static DiseaseProfile {
    match disease {
        DiseaseType::Diabetes => &DIABETES,
        DiseaseType::Heart => &HEART,
        DiseaseType::Pcos => &PCOS,
    }
}

/// Fetch a feature that validation has already guaranteed to exist.
///
/// Engineering functions run strictly after validation, so a miss can only
/// mean an optional field; it falls back to zero rather than panicking.
pub(crate) fn feature(map: &FeatureMap, name: &str) -> f64 {
    map.get(name).copied().unwrap_or_default()
}

/// Feature with an explicit default for optional inputs
pub(crate) fn feature_or(map: &FeatureMap, name: &str, default: f64) -> f64 {
    map.get(name).copied().unwrap_or(default)
}
