//! PCOS risk profile
//!
//! Clinical lab values (follicle counts, AMH, LH, FSH) are often not
//! available at intake, so they are optional inputs backed by
//! population-typical defaults.

use super::{feature, feature_or};
use crate::models::{DiseaseType, FeatureMap, RiskLevel};
use crate::predictor::{Direction, DiseaseProfile, FactorRule, FieldSpec};
use serde::Deserialize;

pub static PCOS: DiseaseProfile = DiseaseProfile {
    disease: DiseaseType::Pcos,
    display_name: "PCOS",
    fields: FIELDS,
    engineer,
    rules: RULES,
    advice,
    max_recommendations: 5,
};

const FIELDS: &[FieldSpec] = &[
    FieldSpec::required("age", 15.0, 50.0),
    FieldSpec::required("bmi", 15.0, 50.0),
    FieldSpec::required("weight", 30.0, 150.0),
    FieldSpec::required("cycle_length", 1.0, 4.0),
    FieldSpec::optional("cycle_regularity", 0.0, 1.0),
    FieldSpec::optional("weight_gain", 0.0, 1.0),
    FieldSpec::optional("hair_growth", 0.0, 1.0),
    FieldSpec::optional("skin_darkening", 0.0, 1.0),
    FieldSpec::optional("pimples", 0.0, 1.0),
    FieldSpec::optional("fast_food", 0.0, 1.0),
    FieldSpec::optional("regular_exercise", 0.0, 1.0),
    FieldSpec::optional("follicle_count_l", 0.0, 50.0),
    FieldSpec::optional("follicle_count_r", 0.0, 50.0),
    FieldSpec::optional("amh", 0.0, 30.0),
    // zero rejected so the FSH/LH ratio stays finite
    FieldSpec::optional("lh", 0.5, 50.0),
    FieldSpec::optional("fsh", 0.5, 50.0),
];

/// Map intake field names onto the column names the model was trained on,
/// filling absent labs with population-typical defaults and deriving the
/// FSH/LH ratio.
fn engineer(raw: &FeatureMap) -> FeatureMap {
    let lh = feature_or(raw, "lh", 8.0);
    let fsh = feature_or(raw, "fsh", 6.0);

    FeatureMap::from([
        ("Age".to_string(), feature(raw, "age")),
        ("BMI".to_string(), feature(raw, "bmi")),
        ("Weight".to_string(), feature(raw, "weight")),
        ("Cycle_length".to_string(), feature(raw, "cycle_length")),
        ("Cycle_RI".to_string(), feature_or(raw, "cycle_regularity", 0.0)),
        ("Weight_gain".to_string(), feature_or(raw, "weight_gain", 0.0)),
        ("Hair_growth".to_string(), feature_or(raw, "hair_growth", 0.0)),
        (
            "Skin_darkening".to_string(),
            feature_or(raw, "skin_darkening", 0.0),
        ),
        ("Pimples".to_string(), feature_or(raw, "pimples", 0.0)),
        ("Fast_food".to_string(), feature_or(raw, "fast_food", 0.0)),
        (
            "Regular_Exercise".to_string(),
            feature_or(raw, "regular_exercise", 1.0),
        ),
        (
            "Follicle_L".to_string(),
            feature_or(raw, "follicle_count_l", 6.0),
        ),
        (
            "Follicle_R".to_string(),
            feature_or(raw, "follicle_count_r", 6.0),
        ),
        ("AMH".to_string(), feature_or(raw, "amh", 3.0)),
        ("LH".to_string(), lh),
        ("FSH".to_string(), fsh),
        ("FSH_LH".to_string(), fsh / lh),
        ("Waist_Hip_Ratio".to_string(), 0.85),
    ])
}

fn describe_cycle(_: f64) -> String {
    "Long or irregular menstrual cycles".to_string()
}

fn describe_bmi(value: f64) -> String {
    if value >= 30.0 {
        format!("BMI of {value:.1} is in the obese range (30 or above)")
    } else {
        format!("BMI of {value:.1} is in the overweight range (25-30)")
    }
}

fn describe_hair_growth(_: f64) -> String {
    "Excess hair growth (hirsutism) is a hyperandrogenism sign".to_string()
}

fn describe_skin_darkening(_: f64) -> String {
    "Skin darkening (acanthosis nigricans) can indicate insulin resistance".to_string()
}

fn describe_pimples(_: f64) -> String {
    "Persistent acne".to_string()
}

fn describe_weight_gain(_: f64) -> String {
    "Recent unexplained weight gain".to_string()
}

fn describe_fast_food(_: f64) -> String {
    "Frequent fast food consumption".to_string()
}

fn describe_exercise(_: f64) -> String {
    "No regular exercise".to_string()
}

fn describe_follicles(value: f64) -> String {
    format!("Follicle count of {value:.0} is above the polycystic threshold (12)")
}

fn describe_amh(value: f64) -> String {
    format!("AMH of {value:.1} ng/mL is elevated (above 5)")
}

const RULES: &[FactorRule] = &[
    FactorRule {
        feature: "Cycle_length",
        label: "Cycle Length",
        modifiable: false,
        direction: Direction::HigherIsWorse,
        high: Some(3.0),
        medium: None,
        low: None,
        describe: describe_cycle,
    },
    FactorRule {
        feature: "BMI",
        label: "BMI",
        modifiable: true,
        direction: Direction::HigherIsWorse,
        high: Some(30.0),
        medium: Some(25.0),
        low: None,
        describe: describe_bmi,
    },
    FactorRule {
        feature: "Hair_growth",
        label: "Hair Growth",
        modifiable: false,
        direction: Direction::HigherIsWorse,
        high: Some(1.0),
        medium: None,
        low: None,
        describe: describe_hair_growth,
    },
    FactorRule {
        feature: "Skin_darkening",
        label: "Skin Darkening",
        modifiable: false,
        direction: Direction::HigherIsWorse,
        high: None,
        medium: Some(1.0),
        low: None,
        describe: describe_skin_darkening,
    },
    FactorRule {
        feature: "Pimples",
        label: "Acne",
        modifiable: false,
        direction: Direction::HigherIsWorse,
        high: None,
        medium: None,
        low: Some(1.0),
        describe: describe_pimples,
    },
    FactorRule {
        feature: "Weight_gain",
        label: "Weight Gain",
        modifiable: true,
        direction: Direction::HigherIsWorse,
        high: None,
        medium: Some(1.0),
        low: None,
        describe: describe_weight_gain,
    },
    FactorRule {
        feature: "Fast_food",
        label: "Fast Food",
        modifiable: true,
        direction: Direction::HigherIsWorse,
        high: None,
        medium: None,
        low: Some(1.0),
        describe: describe_fast_food,
    },
    FactorRule {
        feature: "Regular_Exercise",
        label: "Exercise",
        modifiable: true,
        direction: Direction::LowerIsWorse,
        high: None,
        medium: Some(0.0),
        low: None,
        describe: describe_exercise,
    },
    FactorRule {
        feature: "Follicle_L",
        label: "Left Follicle Count",
        modifiable: false,
        direction: Direction::HigherIsWorse,
        high: Some(12.0),
        medium: None,
        low: None,
        describe: describe_follicles,
    },
    FactorRule {
        feature: "Follicle_R",
        label: "Right Follicle Count",
        modifiable: false,
        direction: Direction::HigherIsWorse,
        high: Some(12.0),
        medium: None,
        low: None,
        describe: describe_follicles,
    },
    FactorRule {
        feature: "AMH",
        label: "AMH",
        modifiable: false,
        direction: Direction::HigherIsWorse,
        high: None,
        medium: Some(5.0),
        low: None,
        describe: describe_amh,
    },
];

fn advice(features: &FeatureMap, risk_level: RiskLevel) -> Vec<String> {
    let mut recommendations =
        vec!["Consult a gynecologist or endocrinologist for evaluation".to_string()];

    if feature(features, "BMI") >= 25.0 {
        recommendations.push(
            "Even modest weight loss can improve hormonal balance and cycle regularity"
                .to_string(),
        );
    }

    if feature(features, "Regular_Exercise") == 0.0 {
        recommendations
            .push("Regular physical activity helps manage insulin resistance".to_string());
    }

    if feature(features, "Fast_food") == 1.0 {
        recommendations
            .push("Reduce processed and fast food in favor of whole foods".to_string());
    }

    if risk_level != RiskLevel::Low {
        recommendations.push(
            "Track your menstrual cycles and symptoms to share with your doctor".to_string(),
        );
    }

    if risk_level == RiskLevel::High {
        recommendations
            .push("A pelvic ultrasound and hormone panel can confirm the diagnosis".to_string());
    }

    recommendations
}

/// Strongly-typed PCOS prediction request. Lab values may be omitted.
#[derive(Debug, Clone, Deserialize)]
pub struct PcosRequest {
    pub age: f64,
    pub bmi: f64,
    pub weight: f64,
    pub cycle_length: f64,
    pub cycle_regularity: Option<f64>,
    pub weight_gain: Option<f64>,
    pub hair_growth: Option<f64>,
    pub skin_darkening: Option<f64>,
    pub pimples: Option<f64>,
    pub fast_food: Option<f64>,
    pub regular_exercise: Option<f64>,
    pub follicle_count_l: Option<f64>,
    pub follicle_count_r: Option<f64>,
    pub amh: Option<f64>,
    pub lh: Option<f64>,
    pub fsh: Option<f64>,
}

impl PcosRequest {
    /// Convert to the named mapping, omitting labs that were not supplied
    /// so the profile can apply its defaults.
    pub fn into_features(self) -> FeatureMap {
        let mut map = FeatureMap::from([
            ("age".to_string(), self.age),
            ("bmi".to_string(), self.bmi),
            ("weight".to_string(), self.weight),
            ("cycle_length".to_string(), self.cycle_length),
        ]);

        let optional = [
            ("cycle_regularity", self.cycle_regularity),
            ("weight_gain", self.weight_gain),
            ("hair_growth", self.hair_growth),
            ("skin_darkening", self.skin_darkening),
            ("pimples", self.pimples),
            ("fast_food", self.fast_food),
            ("regular_exercise", self.regular_exercise),
            ("follicle_count_l", self.follicle_count_l),
            ("follicle_count_r", self.follicle_count_r),
            ("amh", self.amh),
            ("lh", self.lh),
            ("fsh", self.fsh),
        ];
        for (name, value) in optional {
            if let Some(v) = value {
                map.insert(name.to_string(), v);
            }
        }

        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Impact;
    use crate::predictor::contributing_factors;

    fn minimal_request() -> PcosRequest {
        PcosRequest {
            age: 26.0,
            bmi: 24.0,
            weight: 62.0,
            cycle_length: 2.0,
            cycle_regularity: None,
            weight_gain: None,
            hair_growth: None,
            skin_darkening: None,
            pimples: None,
            fast_food: None,
            regular_exercise: None,
            follicle_count_l: None,
            follicle_count_r: None,
            amh: None,
            lh: None,
            fsh: None,
        }
    }

    #[test]
    fn test_defaults_fill_missing_labs() {
        let engineered = engineer(&minimal_request().into_features());
        assert_eq!(engineered["Follicle_L"], 6.0);
        assert_eq!(engineered["Follicle_R"], 6.0);
        assert_eq!(engineered["AMH"], 3.0);
        assert_eq!(engineered["LH"], 8.0);
        assert_eq!(engineered["FSH"], 6.0);
        assert_eq!(engineered["Regular_Exercise"], 1.0);
        assert_eq!(engineered["Waist_Hip_Ratio"], 0.85);
    }

    #[test]
    fn test_fsh_lh_ratio() {
        let mut request = minimal_request();
        request.lh = Some(10.0);
        request.fsh = Some(5.0);
        let engineered = engineer(&request.into_features());
        assert!((engineered["FSH_LH"] - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_fsh_lh_ratio_from_defaults() {
        let engineered = engineer(&minimal_request().into_features());
        assert!((engineered["FSH_LH"] - 6.0 / 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_supplied_labs_override_defaults() {
        let mut request = minimal_request();
        request.follicle_count_l = Some(15.0);
        request.amh = Some(7.5);
        let engineered = engineer(&request.into_features());
        assert_eq!(engineered["Follicle_L"], 15.0);
        assert_eq!(engineered["AMH"], 7.5);
    }

    #[test]
    fn test_symptomatic_factors() {
        let mut request = minimal_request();
        request.cycle_length = 4.0;
        request.hair_growth = Some(1.0);
        request.skin_darkening = Some(1.0);
        request.follicle_count_l = Some(14.0);
        let factors = contributing_factors(RULES, &engineer(&request.into_features()));

        let cycle = factors.iter().find(|f| f.name == "Cycle Length").unwrap();
        assert_eq!(cycle.impact, Impact::High);

        let hair = factors.iter().find(|f| f.name == "Hair Growth").unwrap();
        assert_eq!(hair.impact, Impact::High);

        let skin = factors.iter().find(|f| f.name == "Skin Darkening").unwrap();
        assert_eq!(skin.impact, Impact::Medium);

        let follicles = factors
            .iter()
            .find(|f| f.name == "Left Follicle Count")
            .unwrap();
        assert_eq!(follicles.impact, Impact::High);
    }

    #[test]
    fn test_asymptomatic_has_no_factors() {
        let factors =
            contributing_factors(RULES, &engineer(&minimal_request().into_features()));
        assert!(factors.is_empty());
    }

    #[test]
    fn test_advice_high_risk_mentions_ultrasound() {
        let engineered = engineer(&minimal_request().into_features());
        let recommendations = advice(&engineered, RiskLevel::High);
        assert!(recommendations[0].contains("gynecologist"));
        assert!(recommendations.iter().any(|r| r.contains("ultrasound")));
    }
}
