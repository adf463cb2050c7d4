//! Raw input validation
//!
//! Table-driven presence and range checks over the raw feature mapping.
//! Every required field is checked before any numeric transform runs; the
//! first violation found is reported and values are never clamped.

use crate::error::ValidationError;
use crate::models::FeatureMap;

/// Physiological bounds for one raw input field
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub min: f64,
    pub max: f64,
    /// Optional fields are validated only when present; the transformer
    /// fills in their training-time defaults when absent.
    pub required: bool,
}

impl FieldSpec {
    pub const fn required(name: &'static str, min: f64, max: f64) -> Self {
        Self {
            name,
            min,
            max,
            required: true,
        }
    }

    pub const fn optional(name: &'static str, min: f64, max: f64) -> Self {
        Self {
            name,
            min,
            max,
            required: false,
        }
    }
}

/// Check presence of all required fields, then bounds of every field that
/// is present.
pub fn validate_features(fields: &[FieldSpec], features: &FeatureMap) -> Result<(), ValidationError> {
    for spec in fields.iter().filter(|f| f.required) {
        if !features.contains_key(spec.name) {
            return Err(ValidationError::MissingField {
                field: spec.name.to_string(),
            });
        }
    }

    for spec in fields {
        let Some(value) = features.get(spec.name) else {
            continue;
        };
        if !value.is_finite() || *value < spec.min || *value > spec.max {
            return Err(ValidationError::OutOfRange {
                field: spec.name.to_string(),
                value: *value,
                min: spec.min,
                max: spec.max,
            });
        }
    }

    Ok(())
}
