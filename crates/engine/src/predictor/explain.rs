//! Rule-driven explanations
//!
//! Each disease owns a fixed table of clinical threshold rules. Rules are
//! evaluated independently per feature, matched factors are ordered most
//! severe first, and the narrative template varies with the risk band.
//! Fully deterministic: no randomness, no external calls.

use crate::models::{ContributingFactor, FeatureMap, Impact, RiskLevel};

/// Fixed sentence appended to every explanation
pub const DISCLAIMER: &str = "This is a risk assessment, not a medical diagnosis.";

/// Whether risk grows with larger or smaller values of a feature
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    HigherIsWorse,
    LowerIsWorse,
}

/// One clinical threshold rule
///
/// Thresholds are inclusive and checked from the most severe band down;
/// `HigherIsWorse` compares with `>=`, `LowerIsWorse` with `<=`.
#[derive(Debug)]
pub struct FactorRule {
    /// Key into the engineered feature map
    pub feature: &'static str,
    /// Display name shown to the user
    pub label: &'static str,
    /// Whether the user can change this factor through behavior
    pub modifiable: bool,
    pub direction: Direction,
    pub high: Option<f64>,
    pub medium: Option<f64>,
    pub low: Option<f64>,
    /// Renders the human-readable rationale for a matched value
    pub describe: fn(f64) -> String,
}

impl FactorRule {
    fn band_matches(&self, value: f64, threshold: f64) -> bool {
        match self.direction {
            Direction::HigherIsWorse => value >= threshold,
            Direction::LowerIsWorse => value <= threshold,
        }
    }

    /// Impact band for a value, if any
    pub fn evaluate(&self, value: f64) -> Option<Impact> {
        if let Some(t) = self.high {
            if self.band_matches(value, t) {
                return Some(Impact::High);
            }
        }
        if let Some(t) = self.medium {
            if self.band_matches(value, t) {
                return Some(Impact::Medium);
            }
        }
        if let Some(t) = self.low {
            if self.band_matches(value, t) {
                return Some(Impact::Low);
            }
        }
        None
    }
}

/// Evaluate the rule table over the engineered features.
///
/// The returned list is stable-sorted by severity, so equally severe
/// factors keep their rule-table order.
pub fn contributing_factors(rules: &[FactorRule], features: &FeatureMap) -> Vec<ContributingFactor> {
    let mut factors: Vec<ContributingFactor> = rules
        .iter()
        .filter_map(|rule| {
            let value = *features.get(rule.feature)?;
            let impact = rule.evaluate(value)?;
            Some(ContributingFactor {
                name: rule.label.to_string(),
                value,
                impact,
                modifiable: rule.modifiable,
                description: (rule.describe)(value),
            })
        })
        .collect();

    factors.sort_by_key(|f| f.impact);
    factors
}

/// Render the narrative explanation for a scored prediction.
pub fn narrative(
    display_name: &str,
    risk_score: f64,
    risk_level: RiskLevel,
    factors: &[ContributingFactor],
) -> String {
    let pct = risk_score * 100.0;
    let mut text = match risk_level {
        RiskLevel::Low => format!(
            "Your {display_name} risk is LOW ({pct:.1}%). \
             Your current health metrics are within healthy ranges. \
             Continue maintaining a healthy lifestyle with regular exercise and a balanced diet."
        ),
        RiskLevel::Moderate => {
            let mut text = format!("Your {display_name} risk is MODERATE ({pct:.1}%). ");
            if !factors.is_empty() {
                text.push_str(&format!("Key factors: {}. ", top_factor_names(factors, 2)));
            }
            text.push_str(
                "Consider lifestyle changes such as weight management and regular exercise, \
                 and discuss screening with a healthcare provider.",
            );
            text
        }
        RiskLevel::High => {
            let mut text = format!("Your {display_name} risk is HIGH ({pct:.1}%). ");
            if !factors.is_empty() {
                text.push_str(&format!(
                    "Significant factors: {}. ",
                    top_factor_names(factors, 3)
                ));
            }
            text.push_str(
                "We strongly recommend consulting a healthcare professional for proper \
                 screening and personalized guidance. Early intervention can make a \
                 significant difference.",
            );
            text
        }
    };

    text.push(' ');
    text.push_str(DISCLAIMER);
    text
}

fn top_factor_names(factors: &[ContributingFactor], count: usize) -> String {
    factors
        .iter()
        .take(count)
        .map(|f| f.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
