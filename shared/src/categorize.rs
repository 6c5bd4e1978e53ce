//! Metric categorization
//!
//! Every table is a list of ascending upper bounds. A value falls in the first
//! band whose bound it is strictly below; anything past the last bound lands in
//! the catch-all.

use crate::health_metrics::BiologicalSex;
use crate::labels::Locale;
use serde::{Deserialize, Serialize};

/// Look up `value` in an ascending table of `(upper_bound, entry)` pairs
pub fn lookup<T: Copy>(value: f64, bands: &[(f64, T)], catch_all: T) -> T {
    bands
        .iter()
        .find(|(upper, _)| value < *upper)
        .map(|(_, entry)| *entry)
        .unwrap_or(catch_all)
}

/// Fill level of a result gauge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gauge {
    /// Fill in percent (0-100)
    pub percent: u8,
}

impl Gauge {
    pub const fn new(percent: u8) -> Self {
        Self { percent }
    }

    /// Fill normalized to 0.0-1.0
    pub fn ratio(&self) -> f64 {
        f64::from(self.percent) / 100.0
    }
}

// ============================================================================
// BMI
// ============================================================================

/// BMI category classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn label(&self, locale: Locale) -> &'static str {
        match (locale, self) {
            (Locale::Zh, BmiCategory::Underweight) => "偏瘦",
            (Locale::Zh, BmiCategory::Normal) => "正常",
            (Locale::Zh, BmiCategory::Overweight) => "超重",
            (Locale::Zh, BmiCategory::Obese) => "肥胖",
            (Locale::En, BmiCategory::Underweight) => "Underweight",
            (Locale::En, BmiCategory::Normal) => "Normal",
            (Locale::En, BmiCategory::Overweight) => "Overweight",
            (Locale::En, BmiCategory::Obese) => "Obese",
        }
    }
}

const BMI_CATEGORIES: [(f64, BmiCategory); 3] = [
    (18.5, BmiCategory::Underweight),
    (24.0, BmiCategory::Normal),
    (28.0, BmiCategory::Overweight),
];

const BMI_GAUGE: [(f64, u8); 3] = [(18.5, 20), (24.0, 50), (28.0, 75)];

/// Classify BMI into category
pub fn classify_bmi(bmi: f64) -> BmiCategory {
    lookup(bmi, &BMI_CATEGORIES, BmiCategory::Obese)
}

/// Gauge fill for a BMI value
pub fn bmi_gauge(bmi: f64) -> Gauge {
    Gauge::new(lookup(bmi, &BMI_GAUGE, 90))
}

// ============================================================================
// Body Fat
// ============================================================================

/// Body fat category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyFatCategory {
    VeryLow,
    Healthy,
    SlightlyHigh,
    High,
    Obese,
}

impl BodyFatCategory {
    pub fn label(&self, locale: Locale) -> &'static str {
        match (locale, self) {
            (Locale::Zh, BodyFatCategory::VeryLow) => "极低体脂",
            (Locale::Zh, BodyFatCategory::Healthy) => "健康范围",
            (Locale::Zh, BodyFatCategory::SlightlyHigh) => "轻度偏高",
            (Locale::Zh, BodyFatCategory::High) => "偏高",
            (Locale::Zh, BodyFatCategory::Obese) => "肥胖",
            (Locale::En, BodyFatCategory::VeryLow) => "Very low",
            (Locale::En, BodyFatCategory::Healthy) => "Healthy",
            (Locale::En, BodyFatCategory::SlightlyHigh) => "Slightly high",
            (Locale::En, BodyFatCategory::High) => "High",
            (Locale::En, BodyFatCategory::Obese) => "Obese",
        }
    }
}

const MALE_BODY_FAT_CATEGORIES: [(f64, BodyFatCategory); 4] = [
    (6.0, BodyFatCategory::VeryLow),
    (14.0, BodyFatCategory::Healthy),
    (18.0, BodyFatCategory::SlightlyHigh),
    (25.0, BodyFatCategory::High),
];

const FEMALE_BODY_FAT_CATEGORIES: [(f64, BodyFatCategory); 4] = [
    (16.0, BodyFatCategory::VeryLow),
    (24.0, BodyFatCategory::Healthy),
    (28.0, BodyFatCategory::SlightlyHigh),
    (32.0, BodyFatCategory::High),
];

const MALE_BODY_FAT_GAUGE: [(f64, u8); 4] = [(10.0, 20), (15.0, 40), (20.0, 60), (25.0, 80)];

const FEMALE_BODY_FAT_GAUGE: [(f64, u8); 4] = [(15.0, 20), (22.0, 40), (26.0, 60), (30.0, 80)];

/// Classify body fat percentage
pub fn classify_body_fat(body_fat_percent: f64, sex: BiologicalSex) -> BodyFatCategory {
    let bands = match sex {
        BiologicalSex::Male => &MALE_BODY_FAT_CATEGORIES,
        BiologicalSex::Female => &FEMALE_BODY_FAT_CATEGORIES,
    };
    lookup(body_fat_percent, bands, BodyFatCategory::Obese)
}

/// Gauge fill for a body fat percentage
pub fn body_fat_gauge(body_fat_percent: f64, sex: BiologicalSex) -> Gauge {
    let bands = match sex {
        BiologicalSex::Male => &MALE_BODY_FAT_GAUGE,
        BiologicalSex::Female => &FEMALE_BODY_FAT_GAUGE,
    };
    Gauge::new(lookup(body_fat_percent, bands, 95))
}
