//! Error types for the health calculator

use crate::labels::Locale;
use crate::validation::Field;
use serde::Serialize;
use thiserror::Error;

/// Why a single form field was rejected
#[derive(Error, Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldErrorKind {
    #[error("not a valid number")]
    NotANumber,

    #[error("must be between {min} and {max}")]
    OutOfRange { min: f64, max: f64 },
}

/// A validation failure tied to the field that caused it
#[derive(Error, Debug, Clone, Copy, PartialEq, Serialize)]
#[error("{field}: {kind}")]
pub struct FieldError {
    pub field: Field,
    #[serde(flatten)]
    pub kind: FieldErrorKind,
}

impl FieldError {
    pub fn new(field: Field, kind: FieldErrorKind) -> Self {
        Self { field, kind }
    }

    /// Inline message shown next to the field, without the field label
    pub fn message(&self, locale: Locale) -> String {
        locale.validation_message(&self.kind)
    }

    /// Message prefixed with the field's display label
    pub fn user_message(&self, locale: Locale) -> String {
        format!("{}: {}", self.field.label(locale), self.message(locale))
    }
}

/// Errors raised while turning form input into metrics
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MetricError {
    #[error("Validation error: {0}")]
    Validation(#[from] FieldError),

    #[error("Unknown sex: {0} (expected male or female)")]
    UnknownSex(String),

    #[error("Unknown activity level: {0}")]
    UnknownActivityLevel(String),

    #[error("Unknown calculator key: {0}")]
    UnknownKey(String),
}
