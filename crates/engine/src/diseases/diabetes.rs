//! Diabetes risk profile (PIMA feature set)

use super::feature;
use crate::models::{DiseaseType, FeatureMap, RiskLevel};
use crate::predictor::{Direction, DiseaseProfile, FactorRule, FieldSpec};
use serde::Deserialize;

pub static DIABETES: DiseaseProfile = DiseaseProfile {
    disease: DiseaseType::Diabetes,
    display_name: "diabetes",
    fields: FIELDS,
    engineer,
    rules: RULES,
    advice,
    max_recommendations: 5,
};

const FIELDS: &[FieldSpec] = &[
    FieldSpec::required("Pregnancies", 0.0, 20.0),
    FieldSpec::required("Glucose", 40.0, 400.0),
    FieldSpec::required("BloodPressure", 40.0, 200.0),
    FieldSpec::required("SkinThickness", 0.0, 100.0),
    FieldSpec::required("Insulin", 0.0, 1000.0),
    FieldSpec::required("BMI", 10.0, 60.0),
    FieldSpec::required("DiabetesPedigreeFunction", 0.0, 3.0),
    FieldSpec::required("Age", 18.0, 120.0),
];

/// Reproduce the training pipeline's engineered columns: ordinal buckets
/// for age, BMI and glucose plus two interaction terms. Any drift between
/// this function and the training-time transform silently corrupts every
/// prediction, so the bucket edges below are frozen with the model.
fn engineer(raw: &FeatureMap) -> FeatureMap {
    let mut out = raw.clone();

    let age = feature(raw, "Age");
    let bmi = feature(raw, "BMI");
    let glucose = feature(raw, "Glucose");

    let age_group = if age <= 30.0 {
        0.0
    } else if age <= 45.0 {
        1.0
    } else if age <= 60.0 {
        2.0
    } else {
        3.0
    };

    let bmi_category = if bmi < 18.5 {
        0.0
    } else if bmi < 25.0 {
        1.0
    } else if bmi < 30.0 {
        2.0
    } else {
        3.0
    };

    let glucose_category = if glucose < 100.0 {
        0.0
    } else if glucose < 125.0 {
        1.0
    } else {
        2.0
    };

    out.insert("AgeGroup".to_string(), age_group);
    out.insert("BMI_Category".to_string(), bmi_category);
    out.insert("Glucose_Category".to_string(), glucose_category);
    out.insert("BMI_Age".to_string(), bmi * age);
    out.insert("Glucose_BMI".to_string(), glucose * bmi);

    out
}

fn describe_bmi(value: f64) -> String {
    if value >= 30.0 {
        format!("BMI of {value:.1} is in the obese range (30 or above)")
    } else {
        format!("BMI of {value:.1} is in the overweight range (25-30)")
    }
}

fn describe_glucose(value: f64) -> String {
    if value >= 126.0 {
        format!("Fasting glucose of {value:.0} mg/dL is in the diabetic range (126 or above)")
    } else {
        format!("Fasting glucose of {value:.0} mg/dL is in the prediabetic range (100-125)")
    }
}

fn describe_age(value: f64) -> String {
    format!("Age {value:.0} increases diabetes risk")
}

fn describe_blood_pressure(value: f64) -> String {
    format!("Blood pressure of {value:.0} mmHg is elevated (140 or above)")
}

fn describe_pedigree(_: f64) -> String {
    "Strong family history of diabetes".to_string()
}

const RULES: &[FactorRule] = &[
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
        feature: "Glucose",
        label: "Glucose",
        modifiable: true,
        direction: Direction::HigherIsWorse,
        high: Some(126.0),
        medium: Some(100.0),
        low: None,
        describe: describe_glucose,
    },
    FactorRule {
        feature: "Age",
        label: "Age",
        modifiable: false,
        direction: Direction::HigherIsWorse,
        high: None,
        medium: Some(45.0),
        low: None,
        describe: describe_age,
    },
    FactorRule {
        feature: "BloodPressure",
        label: "Blood Pressure",
        modifiable: true,
        direction: Direction::HigherIsWorse,
        high: None,
        medium: Some(140.0),
        low: None,
        describe: describe_blood_pressure,
    },
    FactorRule {
        feature: "DiabetesPedigreeFunction",
        label: "Family History",
        modifiable: false,
        direction: Direction::HigherIsWorse,
        high: None,
        medium: Some(0.5),
        low: None,
        describe: describe_pedigree,
    },
];

fn advice(features: &FeatureMap, risk_level: RiskLevel) -> Vec<String> {
    let mut recommendations = Vec::new();

    if feature(features, "Glucose") >= 100.0 {
        recommendations.push("Monitor fasting blood glucose levels regularly".to_string());
    }

    if feature(features, "BMI") >= 25.0 {
        recommendations
            .push("Weight management through balanced diet and exercise lowers diabetes risk".to_string());
    }

    if feature(features, "BloodPressure") >= 140.0 {
        recommendations
            .push("Have your blood pressure checked and discussed with your doctor".to_string());
    }

    if risk_level != RiskLevel::Low {
        recommendations
            .push("Aim for at least 150 minutes of moderate exercise per week".to_string());
    }

    if risk_level == RiskLevel::High {
        recommendations
            .push("Ask a healthcare provider about an HbA1c test for proper screening".to_string());
    }

    recommendations
}

/// Strongly-typed diabetes prediction request
#[derive(Debug, Clone, Deserialize)]
pub struct DiabetesRequest {
    pub pregnancies: f64,
    pub glucose: f64,
    pub blood_pressure: f64,
    pub skin_thickness: f64,
    pub insulin: f64,
    pub bmi: f64,
    pub diabetes_pedigree_function: f64,
    pub age: f64,
}

impl DiabetesRequest {
    /// Convert to the named mapping the engine validates and transforms.
    pub fn into_features(self) -> FeatureMap {
        FeatureMap::from([
            ("Pregnancies".to_string(), self.pregnancies),
            ("Glucose".to_string(), self.glucose),
            ("BloodPressure".to_string(), self.blood_pressure),
            ("SkinThickness".to_string(), self.skin_thickness),
            ("Insulin".to_string(), self.insulin),
            ("BMI".to_string(), self.bmi),
            (
                "DiabetesPedigreeFunction".to_string(),
                self.diabetes_pedigree_function,
            ),
            ("Age".to_string(), self.age),
        ])
    }
}
