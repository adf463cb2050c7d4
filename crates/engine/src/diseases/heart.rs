//! Heart disease risk profile (UCI Cleveland feature set)

use super::feature;
use crate::models::{DiseaseType, FeatureMap, RiskLevel};
use crate::predictor::{Direction, DiseaseProfile, FactorRule, FieldSpec};
use serde::Deserialize;

pub static HEART: DiseaseProfile = DiseaseProfile {
    disease: DiseaseType::Heart,
    display_name: "heart disease",
    fields: FIELDS,
    engineer,
    rules: RULES,
    advice,
    max_recommendations: 6,
};

const FIELDS: &[FieldSpec] = &[
    FieldSpec::required("age", 18.0, 120.0),
    FieldSpec::required("sex", 0.0, 1.0),
    FieldSpec::required("cp", 0.0, 3.0),
    FieldSpec::required("trestbps", 60.0, 250.0),
    FieldSpec::required("chol", 100.0, 700.0),
    FieldSpec::required("fbs", 0.0, 1.0),
    FieldSpec::required("restecg", 0.0, 2.0),
    FieldSpec::required("thalach", 50.0, 250.0),
    FieldSpec::required("exang", 0.0, 1.0),
    FieldSpec::required("oldpeak", 0.0, 10.0),
    FieldSpec::required("slope", 0.0, 2.0),
    FieldSpec::required("ca", 0.0, 4.0),
    FieldSpec::required("thal", 0.0, 3.0),
];

// The heart model was trained on the raw columns, no derived features.
fn engineer(raw: &FeatureMap) -> FeatureMap {
    raw.clone()
}

fn describe_trestbps(value: f64) -> String {
    if value >= 160.0 {
        format!("Resting blood pressure of {value:.0} mmHg is in the stage 2 hypertension range")
    } else {
        format!("Resting blood pressure of {value:.0} mmHg is elevated (140 or above)")
    }
}

fn describe_chol(value: f64) -> String {
    if value >= 240.0 {
        format!("Total cholesterol of {value:.0} mg/dL is high (240 or above)")
    } else {
        format!("Total cholesterol of {value:.0} mg/dL is borderline high (200-239)")
    }
}

fn describe_thalach(value: f64) -> String {
    format!("Maximum heart rate of {value:.0} bpm is lower than expected for exertion")
}

fn describe_oldpeak(value: f64) -> String {
    format!("ST depression of {value:.1} suggests reduced blood flow under exercise")
}

fn describe_exang(_: f64) -> String {
    "Chest pain during exercise (exercise-induced angina)".to_string()
}

fn describe_cp(_: f64) -> String {
    "Reported chest pain symptoms".to_string()
}

fn describe_age(value: f64) -> String {
    format!("Age {value:.0} increases cardiovascular risk")
}

fn describe_fbs(_: f64) -> String {
    "Fasting blood sugar above 120 mg/dL".to_string()
}

const RULES: &[FactorRule] = &[
    FactorRule {
        feature: "trestbps",
        label: "Resting Blood Pressure",
        modifiable: true,
        direction: Direction::HigherIsWorse,
        high: Some(160.0),
        medium: Some(140.0),
        low: None,
        describe: describe_trestbps,
    },
    FactorRule {
        feature: "chol",
        label: "Cholesterol",
        modifiable: true,
        direction: Direction::HigherIsWorse,
        high: Some(240.0),
        medium: Some(200.0),
        low: None,
        describe: describe_chol,
    },
    FactorRule {
        feature: "thalach",
        label: "Max Heart Rate",
        modifiable: true,
        direction: Direction::LowerIsWorse,
        high: Some(100.0),
        medium: Some(120.0),
        low: None,
        describe: describe_thalach,
    },
    FactorRule {
        feature: "oldpeak",
        label: "ST Depression",
        modifiable: false,
        direction: Direction::HigherIsWorse,
        high: Some(2.0),
        medium: Some(1.0),
        low: None,
        describe: describe_oldpeak,
    },
    FactorRule {
        feature: "exang",
        label: "Exercise Angina",
        modifiable: false,
        direction: Direction::HigherIsWorse,
        high: Some(1.0),
        medium: None,
        low: None,
        describe: describe_exang,
    },
    FactorRule {
        feature: "cp",
        label: "Chest Pain",
        modifiable: false,
        direction: Direction::HigherIsWorse,
        high: None,
        medium: Some(1.0),
        low: None,
        describe: describe_cp,
    },
    FactorRule {
        feature: "age",
        label: "Age",
        modifiable: false,
        direction: Direction::HigherIsWorse,
        high: None,
        medium: Some(55.0),
        low: None,
        describe: describe_age,
    },
    FactorRule {
        feature: "fbs",
        label: "Fasting Blood Sugar",
        modifiable: true,
        direction: Direction::HigherIsWorse,
        high: None,
        medium: Some(1.0),
        low: None,
        describe: describe_fbs,
    },
];

fn advice(features: &FeatureMap, risk_level: RiskLevel) -> Vec<String> {
    let mut recommendations =
        vec!["Discuss these results with a cardiologist".to_string()];

    if feature(features, "trestbps") > 140.0 {
        recommendations
            .push("Monitor your blood pressure regularly and discuss management options".to_string());
    }

    if feature(features, "chol") > 240.0 {
        recommendations
            .push("Consider dietary changes and a lipid panel to address high cholesterol".to_string());
    }

    if feature(features, "thalach") < 120.0 {
        recommendations
            .push("A supervised stress test can clarify your exercise capacity".to_string());
    }

    if feature(features, "exang") == 1.0 {
        recommendations
            .push("Report exercise-induced chest pain to your doctor promptly".to_string());
    }

    if risk_level != RiskLevel::Low {
        recommendations
            .push("Adopt a heart-healthy diet low in saturated fat and sodium".to_string());
        recommendations
            .push("Build up to regular moderate aerobic activity as tolerated".to_string());
    }

    if feature(features, "fbs") == 1.0 {
        recommendations
            .push("Elevated fasting blood sugar warrants diabetes screening".to_string());
    }

    recommendations
}

/// Strongly-typed heart disease prediction request
#[derive(Debug, Clone, Deserialize)]
pub struct HeartRequest {
    pub age: f64,
    pub sex: f64,
    pub cp: f64,
    pub trestbps: f64,
    pub chol: f64,
    pub fbs: f64,
    pub restecg: f64,
    pub thalach: f64,
    pub exang: f64,
    pub oldpeak: f64,
    pub slope: f64,
    pub ca: f64,
    pub thal: f64,
}

impl HeartRequest {
    pub fn into_features(self) -> FeatureMap {
        FeatureMap::from([
            ("age".to_string(), self.age),
            ("sex".to_string(), self.sex),
            ("cp".to_string(), self.cp),
            ("trestbps".to_string(), self.trestbps),
            ("chol".to_string(), self.chol),
            ("fbs".to_string(), self.fbs),
            ("restecg".to_string(), self.restecg),
            ("thalach".to_string(), self.thalach),
            ("exang".to_string(), self.exang),
            ("oldpeak".to_string(), self.oldpeak),
            ("slope".to_string(), self.slope),
            ("ca".to_string(), self.ca),
            ("thal".to_string(), self.thal),
        ])
    }
}
