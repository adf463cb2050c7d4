//! Out-of-distribution detection
//!
//! Flags inputs statistically far from the training distribution by
//! scanning per-feature z-scores against the artifact's stored training
//! statistics. Advisory only: an OOD flag feeds the consultation policy
//! but never blocks a prediction.

use crate::models::{FeatureMap, FeatureStats};
use std::collections::BTreeMap;

/// Guard against zero-variance training columns
const EPSILON: f64 = 1e-6;

/// Detects feature values exceeding a z-score threshold
#[derive(Debug, Clone)]
pub struct OodDetector {
    /// Number of standard deviations from the training mean considered
    /// out of distribution
    pub z_threshold: f64,
}

impl Default for OodDetector {
    fn default() -> Self {
        Self { z_threshold: 3.0 }
    }
}

/// Details of the first feature that tripped the detector
#[derive(Debug, Clone, PartialEq)]
pub struct OodFlag {
    pub feature: String,
    pub value: f64,
    pub z_score: f64,
}

impl OodDetector {
    pub fn new(z_threshold: f64) -> Self {
        Self { z_threshold }
    }

    /// Scan features against training statistics.
    ///
    /// Features without stored statistics are skipped: "cannot evaluate"
    /// is treated as in-distribution, never as a failure. Returns the
    /// first offending feature so callers can log it.
    pub fn scan(
        &self,
        features: &FeatureMap,
        stats: Option<&BTreeMap<String, FeatureStats>>,
    ) -> Option<OodFlag> {
        let stats = stats?;

        for (name, value) in features {
            let Some(feature_stats) = stats.get(name) else {
                continue;
            };

            let z = (value - feature_stats.mean).abs() / (feature_stats.std + EPSILON);
            if z > self.z_threshold {
                return Some(OodFlag {
                    feature: name.clone(),
                    value: *value,
                    z_score: z,
                });
            }
        }

        None
    }
}
