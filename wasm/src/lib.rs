//! Health Calculator WASM Module
//!
//! Browser bindings over the shared formulas. Functions take the raw text of
//! the form fields and return a JSON document, either
//! `{"ok":true,"result":{...}}` or `{"ok":false,"field":..,"message":..}`.

use health_calculator_shared::calculator::parse_keys;
use health_calculator_shared::health_metrics::{
    calculate_bmi_result, calculate_body_fat_result, calculate_ideal_weight_range,
    calculate_metabolism_result, calculate_muscle_mass_result, resolve_activity_multiplier,
    ActivityLevel, BmiResult, BodyMeasurements, MetabolismInput, MetabolismResult,
    MuscleMassResult,
};
use health_calculator_shared::validation::optional_measurement;
use health_calculator_shared::{
    validate, validate_field, BiologicalSex, Field, Locale, MetricError,
};
use serde::Serialize;
use serde_json::json;
use wasm_bindgen::prelude::*;

fn locale(code: &str) -> Locale {
    code.parse().unwrap_or_default()
}

fn respond<T: Serialize>(outcome: Result<T, MetricError>, locale: Locale) -> String {
    let doc = match outcome {
        Ok(result) => json!({ "ok": true, "result": result }),
        Err(MetricError::Validation(err)) => json!({
            "ok": false,
            "field": err.field,
            "message": err.user_message(locale),
        }),
        Err(err) => json!({ "ok": false, "field": null, "message": err.to_string() }),
    };
    doc.to_string()
}

// Field checks run in form order and stop at the first failure

fn bmi_result(height: &str, weight: &str) -> Result<BmiResult, MetricError> {
    let height_cm = validate_field(Field::Height, height)?;
    let weight_kg = validate_field(Field::Weight, weight)?;
    Ok(calculate_bmi_result(weight_kg, height_cm)?)
}

fn body_measurements(
    height: &str,
    weight: &str,
    age: &str,
    sex: &str,
    [waist, neck, hip]: [&str; 3],
) -> Result<BodyMeasurements, MetricError> {
    Ok(BodyMeasurements {
        height_cm: validate_field(Field::Height, height)?,
        weight_kg: validate_field(Field::Weight, weight)?,
        age_years: validate_field(Field::Age, age)?,
        sex: sex.parse()?,
        waist_cm: optional_measurement(waist),
        neck_cm: optional_measurement(neck),
        hip_cm: optional_measurement(hip),
    })
}

fn muscle_mass_result(
    weight: &str,
    sex: &str,
    body_fat_percent: Option<f64>,
) -> Result<MuscleMassResult, MetricError> {
    let weight_kg = validate_field(Field::Weight, weight)?;
    let sex: BiologicalSex = sex.parse()?;
    Ok(calculate_muscle_mass_result(weight_kg, sex, body_fat_percent)?)
}

fn metabolism_result(
    height: &str,
    weight: &str,
    age: &str,
    sex: &str,
    activity: &str,
) -> Result<MetabolismResult, MetricError> {
    let input = MetabolismInput {
        height_cm: validate_field(Field::Height, height)?,
        weight_kg: validate_field(Field::Weight, weight)?,
        age_years: validate_field(Field::Age, age)?,
        sex: sex.parse()?,
        activity_multiplier: resolve_activity_multiplier(activity, ActivityLevel::default())?,
    };
    Ok(calculate_metabolism_result(&input)?)
}

/// Validate one raw input against `[min, max]`
#[wasm_bindgen]
pub fn validate_input(raw: &str, min: f64, max: f64, locale_code: &str) -> String {
    json!(validate(raw, min, max, locale(locale_code))).to_string()
}

#[wasm_bindgen]
pub fn bmi(height: &str, weight: &str, locale_code: &str) -> String {
    respond(bmi_result(height, weight), locale(locale_code))
}

/// Body fat; blank circumferences fall back to the BMI estimate
#[wasm_bindgen]
#[allow(clippy::too_many_arguments)]
pub fn body_fat(
    height: &str,
    weight: &str,
    age: &str,
    sex: &str,
    waist: &str,
    neck: &str,
    hip: &str,
    locale_code: &str,
) -> String {
    let outcome = body_measurements(height, weight, age, sex, [waist, neck, hip])
        .and_then(|m| Ok(calculate_body_fat_result(&m)?));
    respond(outcome, locale(locale_code))
}

/// Muscle mass; pass the last body fat percentage, if any
#[wasm_bindgen]
pub fn muscle_mass(weight: &str, sex: &str, body_fat_percent: Option<f64>, locale_code: &str) -> String {
    respond(muscle_mass_result(weight, sex, body_fat_percent), locale(locale_code))
}

#[wasm_bindgen]
pub fn ideal_weight(height: &str, locale_code: &str) -> String {
    let outcome = validate_field(Field::Height, height)
        .and_then(calculate_ideal_weight_range)
        .map_err(MetricError::from);
    respond(outcome, locale(locale_code))
}

/// BMR (Harris-Benedict) and TDEE; `activity` is a level name or a multiplier
#[wasm_bindgen]
pub fn metabolism(
    height: &str,
    weight: &str,
    age: &str,
    sex: &str,
    activity: &str,
    locale_code: &str,
) -> String {
    respond(
        metabolism_result(height, weight, age, sex, activity),
        locale(locale_code),
    )
}

/// Calculator widget state
#[wasm_bindgen]
#[derive(Debug, Default)]
pub struct Calculator {
    inner: health_calculator_shared::Calculator,
}

#[wasm_bindgen]
impl Calculator {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Press one or more keys; returns false and changes nothing on an unknown key
    pub fn press(&mut self, keys: &str) -> bool {
        match parse_keys(keys) {
            Ok(keys) => {
                for key in keys {
                    self.inner.press(key);
                }
                true
            }
            Err(_) => false,
        }
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }

    /// Entry buffer shown on the main display line
    pub fn current(&self) -> String {
        self.inner.current().to_string()
    }

    /// Pending operand and operator, e.g. `12 +`
    pub fn previous(&self) -> String {
        self.inner.history_line()
    }
}
