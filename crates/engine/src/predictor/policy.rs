//! Consultation policy
//!
//! Pure boolean combinator over risk, confidence and the OOD flag. Three
//! independent triggers, any one suffices: well-supported high risk, model
//! uncertainty, or an input the model should not be trusted to extrapolate
//! from.

/// Risk score above which a well-supported prediction recommends a visit
pub const HIGH_RISK_THRESHOLD: f64 = 0.7;

/// Confidence above which a high-risk prediction counts as well-supported
pub const SUPPORTED_CONFIDENCE_THRESHOLD: f64 = 0.7;

/// Confidence below which a consultation is always recommended
pub const LOW_CONFIDENCE_THRESHOLD: f64 = 0.6;

/// Decide whether the result should recommend professional follow-up.
pub fn should_consult(risk_score: f64, confidence: f64, ood_detected: bool) -> bool {
    if risk_score > HIGH_RISK_THRESHOLD && confidence > SUPPORTED_CONFIDENCE_THRESHOLD {
        return true;
    }

    if confidence < LOW_CONFIDENCE_THRESHOLD {
        return true;
    }

    ood_detected
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_high_risk_high_confidence() {
        assert!(should_consult(0.8, 0.9, false));
    }

    #[test]
    fn test_high_risk_unsupported() {
        // High risk alone is not enough when confidence sits between the
        // low and supported thresholds.
        assert!(!should_consult(0.8, 0.65, false));
    }

    #[test]
    fn test_low_confidence_forces_consultation() {
        assert!(should_consult(0.1, 0.55, false));
        assert!(should_consult(0.0, 0.5, false));
    }

    #[test]
    fn test_ood_forces_consultation() {
        assert!(should_consult(0.1, 0.95, true));
    }

    #[test]
    fn test_healthy_confident_prediction() {
        assert!(!should_consult(0.2, 0.9, false));
    }

    #[test]
    fn test_thresholds_are_strict() {
        // Exactly at the boundaries: no trigger fires.
        assert!(!should_consult(0.7, 0.9, false));
        assert!(!should_consult(0.8, 0.7, false));
        assert!(!should_consult(0.2, 0.6, false));
    }
}
