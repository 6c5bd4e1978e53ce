//! Health Calculator Shared Library
//!
//! This crate contains the formulas, validation rules, categorization tables
//! and calculator state machine used by the CLI and WASM front ends.

pub mod calculator;
pub mod categorize;
pub mod errors;
pub mod health_metrics;
pub mod labels;
pub mod validation;

// Re-export commonly used items
pub use calculator::{Calculator, Key, Operator};
pub use categorize::{BmiCategory, BodyFatCategory, Gauge};
pub use errors::*;
pub use health_metrics::*;
pub use labels::{Caption, Locale};
pub use validation::{validate, validate_field, Field, FieldRange, Validation};
