//! CLI error handling

use crate::controller::Tab;
use health_calculator_shared::{Field, FieldError, MetricError};
use std::process::ExitCode;
use thiserror::Error;

/// Exit status for rejected input
pub const EXIT_INVALID_INPUT: u8 = 2;

/// Errors surfaced by commands and the interactive session
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Validation error: {0}")]
    Validation(#[from] FieldError),

    #[error(transparent)]
    Metric(#[from] MetricError),

    #[error("Unknown tab: {0}")]
    UnknownTab(String),

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Field {field} is not on the {tab} tab")]
    FieldNotOnTab { field: Field, tab: Tab },

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Missing argument: {0}")]
    MissingArgument(&'static str),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Process exit status for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            CliError::Validation(_) | CliError::Metric(_) => ExitCode::from(EXIT_INVALID_INPUT),
            _ => ExitCode::FAILURE,
        }
    }

    /// Whether the session can report this and keep going
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, CliError::Io(_) | CliError::Json(_))
    }
}
