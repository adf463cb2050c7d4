//! Feature vector assembly
//!
//! The engineered named map is flattened into the exact column order the
//! classifier was fit on. A name the map cannot supply is a data-contract
//! defect, never a silent default.

use crate::error::PredictionError;
use crate::models::FeatureMap;

/// Build the ordered numeric vector matching `feature_order`.
pub fn assemble_vector(
    engineered: &FeatureMap,
    feature_order: &[String],
) -> Result<Vec<f64>, PredictionError> {
    let mut vector = Vec::with_capacity(feature_order.len());
    for name in feature_order {
        match engineered.get(name) {
            Some(value) => vector.push(*value),
            None => {
                return Err(PredictionError::MissingEngineeredFeature {
                    feature: name.clone(),
                })
            }
        }
    }
    Ok(vector)
}
