//! Display labels
//!
//! The calculator ships with a fixed set of labels in two locales. Chinese is
//! the default; English is provided for terminals and logs.

use crate::errors::FieldErrorKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Display locale for labels and messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Zh,
    En,
}

impl Locale {
    /// Short language code
    pub fn code(&self) -> &'static str {
        match self {
            Locale::Zh => "zh",
            Locale::En => "en",
        }
    }

    /// Inline message for a rejected field
    pub fn validation_message(&self, kind: &FieldErrorKind) -> String {
        match (self, kind) {
            (Locale::Zh, FieldErrorKind::NotANumber) => "请输入有效的数值".to_string(),
            (Locale::En, FieldErrorKind::NotANumber) => "Please enter a valid number".to_string(),
            (Locale::Zh, FieldErrorKind::OutOfRange { min, max }) => {
                format!("数值应在{}到{}之间", min, max)
            }
            (Locale::En, FieldErrorKind::OutOfRange { min, max }) => {
                format!("Value must be between {} and {}", min, max)
            }
        }
    }

    /// Caption text for a result line
    pub fn caption(&self, caption: Caption) -> &'static str {
        match self {
            Locale::Zh => caption.zh(),
            Locale::En => caption.en(),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::str::FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "zh" | "zh-cn" | "zh_cn" | "cn" | "chinese" => Ok(Locale::Zh),
            "en" | "en-us" | "en_us" | "english" => Ok(Locale::En),
            _ => Err(format!("Unknown locale: {}", s)),
        }
    }
}

/// Captions of the result lines rendered for each computation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Caption {
    Bmi,
    Category,
    BodyFat,
    Method,
    MuscleMass,
    MuscleShare,
    IdealWeightRange,
    Bmr,
    Tdee,
    KcalPerDay,
}

impl Caption {
    fn zh(self) -> &'static str {
        match self {
            Caption::Bmi => "BMI",
            Caption::Category => "分类",
            Caption::BodyFat => "体脂率",
            Caption::Method => "计算方法",
            Caption::MuscleMass => "肌肉量",
            Caption::MuscleShare => "占体重比例",
            Caption::IdealWeightRange => "理想体重范围",
            Caption::Bmr => "基础代谢率(BMR)",
            Caption::Tdee => "每日总能量消耗(TDEE)",
            Caption::KcalPerDay => "千卡/天",
        }
    }

    fn en(self) -> &'static str {
        match self {
            Caption::Bmi => "BMI",
            Caption::Category => "Category",
            Caption::BodyFat => "Body fat",
            Caption::Method => "Method",
            Caption::MuscleMass => "Muscle mass",
            Caption::MuscleShare => "Share of body weight",
            Caption::IdealWeightRange => "Ideal weight range",
            Caption::Bmr => "Basal metabolic rate (BMR)",
            Caption::Tdee => "Total daily energy expenditure (TDEE)",
            Caption::KcalPerDay => "kcal/day",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages() {
        assert_eq!(
            Locale::Zh.validation_message(&FieldErrorKind::NotANumber),
            "请输入有效的数值"
        );
        assert_eq!(
            Locale::Zh.validation_message(&FieldErrorKind::OutOfRange { min: 100.0, max: 250.0 }),
            "数值应在100到250之间"
        );
        assert_eq!(
            Locale::En.validation_message(&FieldErrorKind::OutOfRange { min: 20.0, max: 200.0 }),
            "Value must be between 20 and 200"
        );
    }

    #[test]
    fn test_locale_parsing() {
        assert_eq!("zh".parse::<Locale>(), Ok(Locale::Zh));
        assert_eq!("EN".parse::<Locale>(), Ok(Locale::En));
        assert_eq!(" en-US ".parse::<Locale>(), Ok(Locale::En));
        assert!("fr".parse::<Locale>().is_err());
        assert_eq!(Locale::default(), Locale::Zh);
    }

    #[test]
    fn test_captions() {
        assert_eq!(Locale::Zh.caption(Caption::BodyFat), "体脂率");
        assert_eq!(Locale::En.caption(Caption::KcalPerDay), "kcal/day");
    }
}
