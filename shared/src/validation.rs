//! Input validation functions
//!
//! Validation is a pure predicate over the raw text of a form field. Marking
//! the field invalid and showing the message is left to the caller.

use crate::errors::{FieldError, FieldErrorKind};
use crate::labels::Locale;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Ranges
// ============================================================================

/// Inclusive range a numeric field must fall in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldRange {
    pub min: f64,
    pub max: f64,
}

impl FieldRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Height in centimeters
pub const HEIGHT_CM: FieldRange = FieldRange::new(100.0, 250.0);
/// Weight in kilograms
pub const WEIGHT_KG: FieldRange = FieldRange::new(20.0, 200.0);
/// Age in years
pub const AGE_YEARS: FieldRange = FieldRange::new(10.0, 100.0);
/// Activity multiplier applied to BMR
pub const ACTIVITY_MULTIPLIER: FieldRange = FieldRange::new(1.2, 1.9);
/// Body-fat percentage supplied by the caller; matches the estimator's clamp
pub const BODY_FAT_PERCENT: FieldRange = FieldRange::new(5.0, 50.0);

// ============================================================================
// Fields
// ============================================================================

/// Named form fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Height,
    Weight,
    Age,
    Sex,
    Waist,
    Neck,
    Hip,
    ActivityLevel,
    BodyFat,
}

impl Field {
    pub const ALL: [Field; 9] = [
        Field::Height,
        Field::Weight,
        Field::Age,
        Field::Sex,
        Field::Waist,
        Field::Neck,
        Field::Hip,
        Field::ActivityLevel,
        Field::BodyFat,
    ];

    /// Technical key used on the command line and in JSON
    pub fn key(&self) -> &'static str {
        match self {
            Field::Height => "height",
            Field::Weight => "weight",
            Field::Age => "age",
            Field::Sex => "sex",
            Field::Waist => "waist",
            Field::Neck => "neck",
            Field::Hip => "hip",
            Field::ActivityLevel => "activity_level",
            Field::BodyFat => "body_fat",
        }
    }

    /// Range enforced for this field, if it is a bounded number
    pub fn range(&self) -> Option<FieldRange> {
        match self {
            Field::Height => Some(HEIGHT_CM),
            Field::Weight => Some(WEIGHT_KG),
            Field::Age => Some(AGE_YEARS),
            Field::ActivityLevel => Some(ACTIVITY_MULTIPLIER),
            Field::BodyFat => Some(BODY_FAT_PERCENT),
            Field::Sex | Field::Waist | Field::Neck | Field::Hip => None,
        }
    }

    /// User-friendly display label
    pub fn label(&self, locale: Locale) -> &'static str {
        match (locale, self) {
            (Locale::Zh, Field::Height) => "身高",
            (Locale::Zh, Field::Weight) => "体重",
            (Locale::Zh, Field::Age) => "年龄",
            (Locale::Zh, Field::Sex) => "性别",
            (Locale::Zh, Field::Waist) => "腰围",
            (Locale::Zh, Field::Neck) => "颈围",
            (Locale::Zh, Field::Hip) => "臀围",
            (Locale::Zh, Field::ActivityLevel) => "活动水平",
            (Locale::Zh, Field::BodyFat) => "体脂率",
            (Locale::En, Field::Height) => "Height",
            (Locale::En, Field::Weight) => "Weight",
            (Locale::En, Field::Age) => "Age",
            (Locale::En, Field::Sex) => "Sex",
            (Locale::En, Field::Waist) => "Waist",
            (Locale::En, Field::Neck) => "Neck",
            (Locale::En, Field::Hip) => "Hip",
            (Locale::En, Field::ActivityLevel) => "Activity Level",
            (Locale::En, Field::BodyFat) => "Body Fat",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl std::str::FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        match normalized.as_str() {
            "height" => Ok(Field::Height),
            "weight" => Ok(Field::Weight),
            "age" => Ok(Field::Age),
            "sex" | "gender" => Ok(Field::Sex),
            "waist" => Ok(Field::Waist),
            "neck" => Ok(Field::Neck),
            "hip" => Ok(Field::Hip),
            "activity" | "activity_level" => Ok(Field::ActivityLevel),
            "body_fat" | "bodyfat" => Ok(Field::BodyFat),
            _ => Err(format!("Unknown field: {}", s)),
        }
    }
}

// ============================================================================
// Validation
// ============================================================================

/// Outcome of validating one raw input
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Validation {
    pub ok: bool,
    pub message: Option<String>,
}

/// Parse field text as a finite number
///
/// Surrounding whitespace is ignored. `NaN` and infinities are rejected.
pub fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Check a raw value against an inclusive range
pub fn check(raw: &str, range: FieldRange) -> Result<f64, FieldErrorKind> {
    let value = parse_number(raw).ok_or(FieldErrorKind::NotANumber)?;
    check_value(value, range)
}

/// Check an already-parsed value against an inclusive range
pub fn check_value(value: f64, range: FieldRange) -> Result<f64, FieldErrorKind> {
    if !value.is_finite() {
        return Err(FieldErrorKind::NotANumber);
    }
    if !range.contains(value) {
        return Err(FieldErrorKind::OutOfRange {
            min: range.min,
            max: range.max,
        });
    }
    Ok(value)
}

/// Validate a raw value against `[min, max]` and report a display message
pub fn validate(raw: &str, min: f64, max: f64, locale: Locale) -> Validation {
    match check(raw, FieldRange::new(min, max)) {
        Ok(_) => Validation {
            ok: true,
            message: None,
        },
        Err(kind) => Validation {
            ok: false,
            message: Some(locale.validation_message(&kind)),
        },
    }
}

/// Parse and range-check the raw text of a bounded field
pub fn validate_field(field: Field, raw: &str) -> Result<f64, FieldError> {
    match field.range() {
        Some(range) => check(raw, range).map_err(|kind| FieldError::new(field, kind)),
        None => parse_number(raw).ok_or(FieldError::new(field, FieldErrorKind::NotANumber)),
    }
}

/// Range-check a numeric value for a bounded field
pub fn ensure_in_range(field: Field, value: f64) -> Result<f64, FieldError> {
    match field.range() {
        Some(range) => check_value(value, range).map_err(|kind| FieldError::new(field, kind)),
        None if value.is_finite() => Ok(value),
        None => Err(FieldError::new(field, FieldErrorKind::NotANumber)),
    }
}

/// Read an optional circumference measurement
///
/// Blank, unparseable, zero and negative input all mean "not provided".
pub fn optional_measurement(raw: &str) -> Option<f64> {
    parse_number(raw).filter(|v| *v > 0.0)
}
