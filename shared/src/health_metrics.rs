//! Health metrics calculations module
//!
//! Provides calculations for BMI, body fat, muscle mass, ideal weight range
//! and BMR/TDEE.
//!
//! # Design Principles
//!
//! 1. **Pure Functions**: All calculations are pure, no side effects
//! 2. **Checked Entry Points**: `calculate_*` functions range-check their
//!    inputs first and report the first offending field
//! 3. **Explicit Dependencies**: Muscle mass takes a prior body-fat figure as a
//!    parameter instead of reading it from somewhere else

use crate::categorize::{
    bmi_gauge, body_fat_gauge, classify_bmi, classify_body_fat, BmiCategory, BodyFatCategory,
    Gauge,
};
use crate::errors::{FieldError, MetricError};
use crate::labels::Locale;
use crate::validation::{ensure_in_range, validate_field, Field};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Input Types
// ============================================================================

/// Biological sex for health calculations
/// Note: This is used for physiological calculations only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BiologicalSex {
    #[default]
    Male,
    Female,
}

impl BiologicalSex {
    pub fn label(&self, locale: Locale) -> &'static str {
        match (locale, self) {
            (Locale::Zh, BiologicalSex::Male) => "男",
            (Locale::Zh, BiologicalSex::Female) => "女",
            (Locale::En, BiologicalSex::Male) => "male",
            (Locale::En, BiologicalSex::Female) => "female",
        }
    }
}

impl fmt::Display for BiologicalSex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label(Locale::En))
    }
}

impl std::str::FromStr for BiologicalSex {
    type Err = MetricError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" | "男" => Ok(BiologicalSex::Male),
            "female" | "f" | "女" => Ok(BiologicalSex::Female),
            _ => Err(MetricError::UnknownSex(s.to_string())),
        }
    }
}

/// Activity level for TDEE calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Little or no exercise
    Sedentary,
    /// Light exercise 1-3 days/week
    #[default]
    LightlyActive,
    /// Moderate exercise 3-5 days/week
    ModeratelyActive,
    /// Hard exercise 6-7 days/week
    VeryActive,
    /// Very hard exercise, physical job
    ExtraActive,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::LightlyActive,
        ActivityLevel::ModeratelyActive,
        ActivityLevel::VeryActive,
        ActivityLevel::ExtraActive,
    ];

    /// Get the activity multiplier for TDEE calculation
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::LightlyActive => 1.375,
            ActivityLevel::ModeratelyActive => 1.55,
            ActivityLevel::VeryActive => 1.725,
            ActivityLevel::ExtraActive => 1.9,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::LightlyActive => "lightly_active",
            ActivityLevel::ModeratelyActive => "moderately_active",
            ActivityLevel::VeryActive => "very_active",
            ActivityLevel::ExtraActive => "extra_active",
        }
    }

    /// Get a human-readable description
    pub fn description(&self, locale: Locale) -> &'static str {
        match (locale, self) {
            (Locale::Zh, ActivityLevel::Sedentary) => "久坐不动",
            (Locale::Zh, ActivityLevel::LightlyActive) => "轻度活动（每周1-3天）",
            (Locale::Zh, ActivityLevel::ModeratelyActive) => "中度活动（每周3-5天）",
            (Locale::Zh, ActivityLevel::VeryActive) => "高度活动（每周6-7天）",
            (Locale::Zh, ActivityLevel::ExtraActive) => "极高活动（体力工作）",
            (Locale::En, ActivityLevel::Sedentary) => "Little or no exercise",
            (Locale::En, ActivityLevel::LightlyActive) => "Light exercise 1-3 days/week",
            (Locale::En, ActivityLevel::ModeratelyActive) => "Moderate exercise 3-5 days/week",
            (Locale::En, ActivityLevel::VeryActive) => "Hard exercise 6-7 days/week",
            (Locale::En, ActivityLevel::ExtraActive) => "Very hard exercise or physical job",
        }
    }
}

impl std::str::FromStr for ActivityLevel {
    type Err = MetricError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        ActivityLevel::ALL
            .into_iter()
            .find(|level| level.key() == normalized)
            .ok_or_else(|| MetricError::UnknownActivityLevel(s.to_string()))
    }
}

/// Read the activity field: a level name, a multiplier, or blank for `default`
///
/// Numeric input must lie within the activity range (1.2 to 1.9).
pub fn resolve_activity_multiplier(raw: &str, default: ActivityLevel) -> Result<f64, FieldError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(default.multiplier());
    }
    match raw.parse::<ActivityLevel>() {
        Ok(level) => Ok(level.multiplier()),
        Err(_) => validate_field(Field::ActivityLevel, raw),
    }
}

/// Measurements collected by the body-composition form
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyMeasurements {
    pub height_cm: f64,
    pub weight_kg: f64,
    pub age_years: f64,
    pub sex: BiologicalSex,
    #[serde(default)]
    pub waist_cm: Option<f64>,
    #[serde(default)]
    pub neck_cm: Option<f64>,
    #[serde(default)]
    pub hip_cm: Option<f64>,
}

// ============================================================================
// BMI Calculations
// ============================================================================

/// BMI calculation result
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BmiResult {
    /// BMI value
    pub value: f64,
    /// BMI category
    pub category: BmiCategory,
    /// Gauge fill for display
    pub gauge: Gauge,
}

/// Calculate BMI from weight and height
///
/// Formula: BMI = weight(kg) / height(m)²
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> f64 {
    let height_m = height_cm / 100.0;
    weight_kg / (height_m * height_m)
}

/// Calculate complete BMI result
pub fn calculate_bmi_result(weight_kg: f64, height_cm: f64) -> Result<BmiResult, FieldError> {
    let height_cm = ensure_in_range(Field::Height, height_cm)?;
    let weight_kg = ensure_in_range(Field::Weight, weight_kg)?;

    let bmi = calculate_bmi(weight_kg, height_cm);
    Ok(BmiResult {
        value: bmi,
        category: classify_bmi(bmi),
        gauge: bmi_gauge(bmi),
    })
}

// ============================================================================
// Body Fat Estimation
// ============================================================================

/// Lower bound of any reported body fat estimate
pub const BODY_FAT_MIN_PERCENT: f64 = 5.0;
/// Upper bound of any reported body fat estimate
pub const BODY_FAT_MAX_PERCENT: f64 = 50.0;

/// Which formula produced a body fat estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyFatMethod {
    /// US Navy circumference formula, male variant
    NavyMale,
    /// US Navy circumference formula, female variant
    NavyFemale,
    /// Female with waist and neck but no hip measurement
    SimplifiedFemale,
    /// BMI and age based estimate
    Simplified,
}

impl BodyFatMethod {
    pub fn label(&self, locale: Locale) -> &'static str {
        match (locale, self) {
            (Locale::Zh, BodyFatMethod::NavyMale) => "使用海军公式（男性）",
            (Locale::Zh, BodyFatMethod::NavyFemale) => "使用海军公式（女性）",
            (Locale::Zh, BodyFatMethod::SimplifiedFemale) => "使用简化公式（女性）",
            (Locale::Zh, BodyFatMethod::Simplified) => "使用简化公式",
            (Locale::En, BodyFatMethod::NavyMale) => "Navy formula (male)",
            (Locale::En, BodyFatMethod::NavyFemale) => "Navy formula (female)",
            (Locale::En, BodyFatMethod::SimplifiedFemale) => "Simplified formula (female)",
            (Locale::En, BodyFatMethod::Simplified) => "Simplified formula",
        }
    }
}

/// Body fat estimation result
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyFatResult {
    /// Body fat percentage, clamped to [5, 50]
    pub percent: f64,
    pub method: BodyFatMethod,
    pub category: BodyFatCategory,
    pub gauge: Gauge,
    /// Sex the estimate was made for
    pub sex: BiologicalSex,
}

/// US Navy body fat formula for men (circumferences and height in cm)
pub fn navy_body_fat_male(height_cm: f64, waist_cm: f64, neck_cm: f64) -> f64 {
    495.0 / (1.0324 - 0.19077 * (waist_cm - neck_cm).log10() + 0.15456 * height_cm.log10())
        - 450.0
}

/// US Navy body fat formula for women (circumferences and height in cm)
pub fn navy_body_fat_female(height_cm: f64, waist_cm: f64, neck_cm: f64, hip_cm: f64) -> f64 {
    495.0
        / (1.29579 - 0.35004 * (waist_cm + hip_cm - neck_cm).log10()
            + 0.22100 * height_cm.log10())
        - 450.0
}

/// Estimate body fat percentage from BMI and age
///
/// Men: BF% = 1.20 × BMI + 0.23 × age - 16.2
/// Women: BF% = 1.20 × BMI + 0.23 × age - 5.4
pub fn estimate_body_fat_from_bmi(bmi: f64, age_years: f64, sex: BiologicalSex) -> f64 {
    let offset = match sex {
        BiologicalSex::Male => 16.2,
        BiologicalSex::Female => 5.4,
    };
    1.20 * bmi + 0.23 * age_years - offset
}

/// Pick a formula and estimate body fat, without range checks
pub fn estimate_body_fat(m: &BodyMeasurements) -> (f64, BodyFatMethod) {
    let navy = match (m.sex, m.waist_cm, m.neck_cm, m.hip_cm) {
        (BiologicalSex::Male, Some(waist), Some(neck), _) => Some((
            navy_body_fat_male(m.height_cm, waist, neck),
            BodyFatMethod::NavyMale,
        )),
        (BiologicalSex::Female, Some(waist), Some(neck), Some(hip)) => Some((
            navy_body_fat_female(m.height_cm, waist, neck, hip),
            BodyFatMethod::NavyFemale,
        )),
        _ => None,
    };

    if let Some((percent, method)) = navy {
        if percent.is_finite() {
            return (percent, method);
        }
    }

    // Circumferences given but unusable: no hip, or Navy undefined (waist not larger than neck)
    let method = match (m.sex, m.waist_cm, m.neck_cm) {
        (BiologicalSex::Female, Some(_), Some(_)) => BodyFatMethod::SimplifiedFemale,
        _ => BodyFatMethod::Simplified,
    };
    (simplified(m), method)
}

fn simplified(m: &BodyMeasurements) -> f64 {
    let bmi = calculate_bmi(m.weight_kg, m.height_cm);
    estimate_body_fat_from_bmi(bmi, m.age_years, m.sex)
}

/// Calculate complete body fat result
///
/// Height, weight and age are checked in that order. Circumferences are
/// optional; see [`estimate_body_fat`] for how they select the formula.
pub fn calculate_body_fat_result(m: &BodyMeasurements) -> Result<BodyFatResult, FieldError> {
    ensure_in_range(Field::Height, m.height_cm)?;
    ensure_in_range(Field::Weight, m.weight_kg)?;
    ensure_in_range(Field::Age, m.age_years)?;

    let (raw, method) = estimate_body_fat(m);
    let percent = raw.clamp(BODY_FAT_MIN_PERCENT, BODY_FAT_MAX_PERCENT);

    Ok(BodyFatResult {
        percent,
        method,
        category: classify_body_fat(percent, m.sex),
        gauge: body_fat_gauge(percent, m.sex),
        sex: m.sex,
    })
}

// ============================================================================
// Muscle Mass
// ============================================================================

/// Where the body fat figure used for muscle mass came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyFatSource {
    /// Passed in from an earlier estimate or measurement
    Provided,
    /// Per-sex default
    SexDefault,
}

/// Muscle mass estimation result
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MuscleMassResult {
    pub muscle_mass_kg: f64,
    /// Muscle mass as a percentage of body weight
    pub share_percent: f64,
    pub body_fat_percent: f64,
    pub body_fat_source: BodyFatSource,
}

/// Default body fat percentage when no estimate is available
pub fn default_body_fat_percent(sex: BiologicalSex) -> f64 {
    match sex {
        BiologicalSex::Male => 18.0,
        BiologicalSex::Female => 25.0,
    }
}

/// Estimate muscle mass
///
/// Formula: muscle = weight × (1 - body_fat% / 100)
pub fn calculate_muscle_mass_result(
    weight_kg: f64,
    sex: BiologicalSex,
    body_fat_percent: Option<f64>,
) -> Result<MuscleMassResult, FieldError> {
    let weight_kg = ensure_in_range(Field::Weight, weight_kg)?;

    let (body_fat_percent, body_fat_source) = match body_fat_percent {
        Some(percent) => (
            ensure_in_range(Field::BodyFat, percent)?,
            BodyFatSource::Provided,
        ),
        None => (default_body_fat_percent(sex), BodyFatSource::SexDefault),
    };

    let muscle_mass_kg = weight_kg * (1.0 - body_fat_percent / 100.0);
    Ok(MuscleMassResult {
        muscle_mass_kg,
        share_percent: muscle_mass_kg / weight_kg * 100.0,
        body_fat_percent,
        body_fat_source,
    })
}

// ============================================================================
// Ideal Weight Calculations
// ============================================================================

/// BMI at the bottom of the healthy range
pub const HEALTHY_BMI_MIN: f64 = 18.5;
/// BMI at the top of the healthy range
pub const HEALTHY_BMI_MAX: f64 = 24.9;

/// Ideal weight range in kilograms
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IdealWeightRange {
    pub min_kg: f64,
    pub max_kg: f64,
}

impl IdealWeightRange {
    pub fn contains(&self, weight_kg: f64) -> bool {
        weight_kg >= self.min_kg && weight_kg <= self.max_kg
    }
}

/// Calculate healthy weight range for a given height
///
/// Based on BMI 18.5-24.9 (WHO normal range)
pub fn healthy_weight_range_kg(height_cm: f64) -> (f64, f64) {
    let height_m = height_cm / 100.0;
    let height_m_sq = height_m * height_m;
    (HEALTHY_BMI_MIN * height_m_sq, HEALTHY_BMI_MAX * height_m_sq)
}

/// Calculate ideal weight range
pub fn calculate_ideal_weight_range(height_cm: f64) -> Result<IdealWeightRange, FieldError> {
    let height_cm = ensure_in_range(Field::Height, height_cm)?;
    let (min_kg, max_kg) = healthy_weight_range_kg(height_cm);
    Ok(IdealWeightRange { min_kg, max_kg })
}

// ============================================================================
// BMR and TDEE Calculations
// ============================================================================

/// Calculate BMR using Harris-Benedict equation (revised)
///
/// Men: BMR = 88.362 + 13.397 × weight(kg) + 4.799 × height(cm) - 5.677 × age(y)
/// Women: BMR = 447.593 + 9.247 × weight(kg) + 3.098 × height(cm) - 4.330 × age(y)
pub fn calculate_bmr_harris_benedict(
    weight_kg: f64,
    height_cm: f64,
    age_years: f64,
    sex: BiologicalSex,
) -> f64 {
    match sex {
        BiologicalSex::Male => 88.362 + 13.397 * weight_kg + 4.799 * height_cm - 5.677 * age_years,
        BiologicalSex::Female => {
            447.593 + 9.247 * weight_kg + 3.098 * height_cm - 4.330 * age_years
        }
    }
}

/// Calculate Total Daily Energy Expenditure
///
/// TDEE = BMR × Activity Multiplier
pub fn calculate_tdee(bmr: f64, activity_multiplier: f64) -> f64 {
    bmr * activity_multiplier
}

/// Input for the metabolism calculation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetabolismInput {
    pub height_cm: f64,
    pub weight_kg: f64,
    pub age_years: f64,
    pub sex: BiologicalSex,
    pub activity_multiplier: f64,
}

/// BMR/TDEE result
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetabolismResult {
    /// Basal Metabolic Rate (kcal/day)
    pub bmr: f64,
    /// Total Daily Energy Expenditure (kcal/day)
    pub tdee: f64,
    /// Activity multiplier used
    pub activity_multiplier: f64,
}

/// Calculate complete BMR/TDEE result
pub fn calculate_metabolism_result(input: &MetabolismInput) -> Result<MetabolismResult, FieldError> {
    ensure_in_range(Field::Height, input.height_cm)?;
    ensure_in_range(Field::Weight, input.weight_kg)?;
    ensure_in_range(Field::Age, input.age_years)?;
    ensure_in_range(Field::ActivityLevel, input.activity_multiplier)?;

    let bmr = calculate_bmr_harris_benedict(
        input.weight_kg,
        input.height_cm,
        input.age_years,
        input.sex,
    );
    Ok(MetabolismResult {
        bmr,
        tdee: calculate_tdee(bmr, input.activity_multiplier),
        activity_multiplier: input.activity_multiplier,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::FieldErrorKind;
    use proptest::prelude::*;
    use rstest::rstest;

    fn measurements(sex: BiologicalSex) -> BodyMeasurements {
        BodyMeasurements {
            height_cm: 175.0,
            weight_kg: 70.0,
            age_years: 30.0,
            sex,
            waist_cm: None,
            neck_cm: None,
            hip_cm: None,
        }
    }

    // =========================================================================
    // BMI Tests
    // =========================================================================

    #[test]
    fn test_bmi_calculation() {
        // 70kg, 175cm -> BMI ~22.86
        let bmi = calculate_bmi(70.0, 175.0);
        assert!((bmi - 22.86).abs() < 0.01);
    }

    #[test]
    fn test_bmi_result_overweight_boundary() {
        // 70kg, 170cm -> BMI ~24.22, just past the 24 threshold
        let result = calculate_bmi_result(70.0, 170.0).unwrap();
        assert!((result.value - 24.22).abs() < 0.01);
        assert_eq!(result.category, BmiCategory::Overweight);
        assert_eq!(result.gauge.percent, 75);
    }

    #[test]
    fn test_bmi_result_rejects_out_of_range() {
        let err = calculate_bmi_result(70.0, 90.0).unwrap_err();
        assert_eq!(err.field, Field::Height);

        let err = calculate_bmi_result(250.0, 170.0).unwrap_err();
        assert_eq!(err.field, Field::Weight);
        assert_eq!(err.kind, FieldErrorKind::OutOfRange { min: 20.0, max: 200.0 });
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: BMI matches the closed form over the accepted domain
        #[test]
        fn prop_bmi_formula(height in 100.0f64..=250.0, weight in 20.0f64..=200.0) {
            let result = calculate_bmi_result(weight, height).unwrap();
            let expected = weight / ((height / 100.0) * (height / 100.0));
            prop_assert!((result.value - expected).abs() < 1e-9);
        }

        /// Property: Heavier weight = higher BMI (same height)
        #[test]
        fn prop_bmi_increases_with_weight(
            weight1 in 50.0f64..100.0,
            weight2 in 100.0f64..150.0,
            height in 150.0f64..200.0
        ) {
            prop_assert!(calculate_bmi(weight2, height) > calculate_bmi(weight1, height));
        }
    }

    // =========================================================================
    // Body Fat Tests
    // =========================================================================

    #[test]
    fn test_navy_male() {
        let m = BodyMeasurements {
            height_cm: 180.0,
            waist_cm: Some(85.0),
            neck_cm: Some(38.0),
            ..measurements(BiologicalSex::Male)
        };
        let result = calculate_body_fat_result(&m).unwrap();
        assert_eq!(result.method, BodyFatMethod::NavyMale);
        assert!(result.percent > 14.0 && result.percent < 18.0, "got {}", result.percent);
    }

    #[test]
    fn test_navy_female() {
        let m = BodyMeasurements {
            height_cm: 165.0,
            weight_kg: 60.0,
            waist_cm: Some(70.0),
            neck_cm: Some(32.0),
            hip_cm: Some(95.0),
            ..measurements(BiologicalSex::Female)
        };
        let result = calculate_body_fat_result(&m).unwrap();
        assert_eq!(result.method, BodyFatMethod::NavyFemale);
        assert!(result.percent > 22.0 && result.percent < 28.0, "got {}", result.percent);
    }

    #[test]
    fn test_female_without_hip_degrades_to_simplified() {
        let m = BodyMeasurements {
            waist_cm: Some(70.0),
            neck_cm: Some(32.0),
            ..measurements(BiologicalSex::Female)
        };
        let result = calculate_body_fat_result(&m).unwrap();
        assert_eq!(result.method, BodyFatMethod::SimplifiedFemale);

        let bmi = calculate_bmi(70.0, 175.0);
        let expected = 1.20 * bmi + 0.23 * 30.0 - 5.4;
        assert!((result.percent - expected).abs() < 1e-9);
    }

    #[test]
    fn test_simplified_without_circumferences() {
        let result = calculate_body_fat_result(&measurements(BiologicalSex::Male)).unwrap();
        assert_eq!(result.method, BodyFatMethod::Simplified);

        let bmi = calculate_bmi(70.0, 175.0);
        let expected = 1.20 * bmi + 0.23 * 30.0 - 16.2;
        assert!((result.percent - expected).abs() < 1e-9);
    }

    #[test]
    fn test_navy_undefined_falls_back() {
        let m = BodyMeasurements {
            waist_cm: Some(35.0),
            neck_cm: Some(40.0),
            ..measurements(BiologicalSex::Male)
        };
        let result = calculate_body_fat_result(&m).unwrap();
        assert_eq!(result.method, BodyFatMethod::Simplified);
        assert!(result.percent.is_finite());
    }

    #[test]
    fn test_female_navy_undefined_keeps_female_label() {
        let m = BodyMeasurements {
            waist_cm: Some(20.0),
            neck_cm: Some(40.0),
            hip_cm: Some(10.0),
            ..measurements(BiologicalSex::Female)
        };
        let result = calculate_body_fat_result(&m).unwrap();
        assert_eq!(result.method, BodyFatMethod::SimplifiedFemale);
        assert!((BODY_FAT_MIN_PERCENT..=BODY_FAT_MAX_PERCENT).contains(&result.percent));
    }

    #[test]
    fn test_body_fat_checks_age() {
        let m = BodyMeasurements {
            age_years: 5.0,
            ..measurements(BiologicalSex::Male)
        };
        assert_eq!(calculate_body_fat_result(&m).unwrap_err().field, Field::Age);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Property: Body fat is clamped to [5, 50] for any accepted input
        #[test]
        fn prop_body_fat_clamped(
            height in 100.0f64..=250.0,
            weight in 20.0f64..=200.0,
            age in 10.0f64..=100.0,
            female in any::<bool>(),
            waist in proptest::option::of(1.0f64..300.0),
            neck in proptest::option::of(1.0f64..100.0),
            hip in proptest::option::of(1.0f64..300.0)
        ) {
            let m = BodyMeasurements {
                height_cm: height,
                weight_kg: weight,
                age_years: age,
                sex: if female { BiologicalSex::Female } else { BiologicalSex::Male },
                waist_cm: waist,
                neck_cm: neck,
                hip_cm: hip,
            };
            let result = calculate_body_fat_result(&m).unwrap();
            prop_assert!(result.percent >= BODY_FAT_MIN_PERCENT);
            prop_assert!(result.percent <= BODY_FAT_MAX_PERCENT);
        }
    }

    // =========================================================================
    // Muscle Mass Tests
    // =========================================================================

    #[test]
    fn test_muscle_mass_defaults_by_sex() {
        let male = calculate_muscle_mass_result(70.0, BiologicalSex::Male, None).unwrap();
        assert!((male.muscle_mass_kg - 57.4).abs() < 1e-9);
        assert!((male.share_percent - 82.0).abs() < 1e-9);
        assert_eq!(male.body_fat_source, BodyFatSource::SexDefault);

        let female = calculate_muscle_mass_result(60.0, BiologicalSex::Female, None).unwrap();
        assert!((female.muscle_mass_kg - 45.0).abs() < 1e-9);
        assert_eq!(female.body_fat_percent, 25.0);
    }

    #[test]
    fn test_muscle_mass_uses_prior_body_fat() {
        let result = calculate_muscle_mass_result(80.0, BiologicalSex::Male, Some(20.0)).unwrap();
        assert!((result.muscle_mass_kg - 64.0).abs() < 1e-9);
        assert_eq!(result.body_fat_source, BodyFatSource::Provided);
    }

    #[test]
    fn test_muscle_mass_rejects_bad_input() {
        let err = calculate_muscle_mass_result(10.0, BiologicalSex::Male, None).unwrap_err();
        assert_eq!(err.field, Field::Weight);

        let err = calculate_muscle_mass_result(70.0, BiologicalSex::Male, Some(80.0)).unwrap_err();
        assert_eq!(err.field, Field::BodyFat);
    }

    // =========================================================================
    // Ideal Weight Tests
    // =========================================================================

    #[test]
    fn test_ideal_weight_range() {
        // 175cm -> ~56.7 - 76.3 kg
        let range = calculate_ideal_weight_range(175.0).unwrap();
        assert!((range.min_kg - 56.66).abs() < 0.01);
        assert!((range.max_kg - 76.26).abs() < 0.01);
        assert!(range.contains(70.0));
        assert!(!range.contains(80.0));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: Ideal weight bounds are ordered for any positive height
        #[test]
        fn prop_ideal_range_ordered(height in 0.1f64..1000.0) {
            let (min, max) = healthy_weight_range_kg(height);
            prop_assert!(min < max);
        }

        /// Property: Midpoint of the range lands in the healthy BMI band
        #[test]
        fn prop_ideal_midpoint_is_healthy(height in 100.0f64..=250.0) {
            let range = calculate_ideal_weight_range(height).unwrap();
            let bmi = calculate_bmi((range.min_kg + range.max_kg) / 2.0, height);
            prop_assert!(bmi > HEALTHY_BMI_MIN && bmi < HEALTHY_BMI_MAX);
        }
    }

    // =========================================================================
    // BMR/TDEE Tests
    // =========================================================================

    #[test]
    fn test_bmr_harris_benedict() {
        let bmr = calculate_bmr_harris_benedict(70.0, 175.0, 30.0, BiologicalSex::Male);
        assert!((bmr - 1695.667).abs() < 0.01);

        let bmr = calculate_bmr_harris_benedict(60.0, 165.0, 30.0, BiologicalSex::Female);
        let expected = 447.593 + 9.247 * 60.0 + 3.098 * 165.0 - 4.330 * 30.0;
        assert!((bmr - expected).abs() < 1e-9);
    }

    #[test]
    fn test_metabolism_result() {
        let input = MetabolismInput {
            height_cm: 175.0,
            weight_kg: 70.0,
            age_years: 30.0,
            sex: BiologicalSex::Male,
            activity_multiplier: ActivityLevel::ModeratelyActive.multiplier(),
        };
        let result = calculate_metabolism_result(&input).unwrap();
        assert!((result.tdee - result.bmr * 1.55).abs() < 1e-9);
        assert_eq!(result.activity_multiplier, 1.55);
    }

    #[test]
    fn test_metabolism_rejects_multiplier() {
        let input = MetabolismInput {
            height_cm: 175.0,
            weight_kg: 70.0,
            age_years: 30.0,
            sex: BiologicalSex::Female,
            activity_multiplier: 3.0,
        };
        let err = calculate_metabolism_result(&input).unwrap_err();
        assert_eq!(err.field, Field::ActivityLevel);
    }

    #[test]
    fn test_parse_enums() {
        assert_eq!("Female".parse::<BiologicalSex>(), Ok(BiologicalSex::Female));
        assert_eq!("男".parse::<BiologicalSex>(), Ok(BiologicalSex::Male));
        assert!("x".parse::<BiologicalSex>().is_err());
        assert_eq!("very-active".parse::<ActivityLevel>(), Ok(ActivityLevel::VeryActive));
        assert!("couch".parse::<ActivityLevel>().is_err());
    }

    #[rstest]
    #[case("", 1.55)]
    #[case("sedentary", 1.2)]
    #[case(" Extra-Active ", 1.9)]
    #[case("1.4", 1.4)]
    fn test_resolve_activity_multiplier(#[case] raw: &str, #[case] expected: f64) {
        let multiplier = resolve_activity_multiplier(raw, ActivityLevel::ModeratelyActive).unwrap();
        assert_eq!(multiplier, expected);
    }

    #[test]
    fn test_resolve_activity_multiplier_rejects() {
        let err = resolve_activity_multiplier("3", ActivityLevel::Sedentary).unwrap_err();
        assert_eq!(err.field, Field::ActivityLevel);
        assert!(matches!(err.kind, FieldErrorKind::OutOfRange { .. }));

        let err = resolve_activity_multiplier("couch", ActivityLevel::Sedentary).unwrap_err();
        assert_eq!(err.kind, FieldErrorKind::NotANumber);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: TDEE > BMR (activity multiplier > 1)
        #[test]
        fn prop_tdee_greater_than_bmr(
            weight in 50.0f64..100.0,
            height in 160.0f64..190.0,
            age in 20.0f64..60.0
        ) {
            for level in ActivityLevel::ALL {
                let input = MetabolismInput {
                    height_cm: height,
                    weight_kg: weight,
                    age_years: age,
                    sex: BiologicalSex::Male,
                    activity_multiplier: level.multiplier(),
                };
                let result = calculate_metabolism_result(&input).unwrap();
                prop_assert!(result.tdee > result.bmr);
            }
        }
    }
}
