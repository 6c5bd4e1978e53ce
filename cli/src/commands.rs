//! One-shot subcommands
//!
//! Each subcommand fills a fresh form, runs one action and prints the result.
//! Rejected input is reported the same way the interactive session does.

use crate::cli::Command;
use crate::controller::{Action, Controller, Tab};
use crate::error::{CliError, EXIT_INVALID_INPUT};
use crate::render;
use health_calculator_shared::calculator::parse_keys;
use health_calculator_shared::{Field, FieldError, Key, Locale};
use serde_json::json;
use std::io::Write;
use std::process::ExitCode;
use tracing::info;

/// How results are printed
#[derive(Debug, Clone, Copy)]
pub struct Output {
    pub locale: Locale,
    pub json: bool,
    pub gauge_width: usize,
}

/// Parse calculator tokens: whole-token keys (`C`, `clear`) or runs like `5+3=`
pub fn parse_key_tokens<S: AsRef<str>>(tokens: &[S]) -> Result<Vec<Key>, CliError> {
    let mut keys = Vec::new();
    for token in tokens {
        let token = token.as_ref();
        match token.parse::<Key>() {
            Ok(key) => keys.push(key),
            Err(_) => keys.extend(parse_keys(token)?),
        }
    }
    Ok(keys)
}

/// Run a one-shot command
pub fn execute<W: Write, E: Write>(
    command: Command,
    controller: &mut Controller,
    output: &Output,
    out: &mut W,
    err: &mut E,
) -> Result<ExitCode, CliError> {
    let action = match command {
        Command::Bmi { height, weight } => {
            fill(controller, Tab::Body, &[(Field::Height, Some(height)), (Field::Weight, Some(weight))])?;
            Action::Bmi
        }
        Command::BodyFat {
            height,
            weight,
            age,
            sex,
            waist,
            neck,
            hip,
        } => {
            fill(
                controller,
                Tab::Body,
                &[
                    (Field::Height, Some(height)),
                    (Field::Weight, Some(weight)),
                    (Field::Age, Some(age)),
                    (Field::Sex, sex),
                    (Field::Waist, waist),
                    (Field::Neck, neck),
                    (Field::Hip, hip),
                ],
            )?;
            Action::BodyFat
        }
        Command::Muscle {
            weight,
            sex,
            body_fat,
        } => {
            fill(controller, Tab::Body, &[(Field::Weight, Some(weight)), (Field::Sex, sex)])?;
            controller.set_known_body_fat(body_fat.as_deref());
            Action::MuscleMass
        }
        Command::IdealWeight { height } => {
            fill(controller, Tab::Body, &[(Field::Height, Some(height))])?;
            Action::IdealWeight
        }
        Command::Metabolism {
            height,
            weight,
            age,
            sex,
            activity,
        } => {
            fill(
                controller,
                Tab::Metabolism,
                &[
                    (Field::Height, Some(height)),
                    (Field::Weight, Some(weight)),
                    (Field::Age, Some(age)),
                    (Field::Sex, sex),
                    (Field::ActivityLevel, activity),
                ],
            )?;
            Action::Metabolism
        }
        Command::Calc { keys } => {
            let keys = parse_key_tokens(&keys)?;
            controller.press_keys(&keys);
            print_calculator(controller, output, out)?;
            return Ok(ExitCode::SUCCESS);
        }
        Command::Interactive => return Err(CliError::UnknownCommand("interactive".to_string())),
    };

    controller.switch_tab(action.tab());
    match controller.run(action) {
        Ok(()) => {
            info!(?action, "Computed");
            print_result(action, controller, output, out)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(field_error) => {
            print_errors(&[field_error], output, out, err)?;
            Ok(ExitCode::from(EXIT_INVALID_INPUT))
        }
    }
}

/// Copy provided values into a tab's form
fn fill(
    controller: &mut Controller,
    tab: Tab,
    values: &[(Field, Option<String>)],
) -> Result<(), CliError> {
    for (field, value) in values {
        if let Some(value) = value {
            controller.set_field_on(tab, *field, value)?;
        }
    }
    Ok(())
}

pub fn print_result<W: Write>(
    action: Action,
    controller: &Controller,
    output: &Output,
    out: &mut W,
) -> Result<(), CliError> {
    if output.json {
        let doc = render::result_json(action, controller.results(), output.locale, output.gauge_width);
        writeln!(out, "{}", serde_json::to_string(&doc)?)?;
    } else {
        for line in render::result_lines(action, controller.results(), output.locale, output.gauge_width) {
            writeln!(out, "{}", line)?;
        }
    }
    Ok(())
}

/// Rejected input goes to stdout as JSON, or to stderr as text
pub fn print_errors<W: Write, E: Write>(
    errors: &[FieldError],
    output: &Output,
    out: &mut W,
    err: &mut E,
) -> Result<(), CliError> {
    if output.json {
        writeln!(out, "{}", serde_json::to_string(&render::errors_json(errors, output.locale))?)?;
    } else {
        for line in render::error_lines(errors, output.locale) {
            writeln!(err, "{}", line)?;
        }
    }
    Ok(())
}

/// A failed command: a JSON document on stdout, or a line on stderr
pub fn print_failure<W: Write, E: Write>(
    error: &CliError,
    output: &Output,
    out: &mut W,
    err: &mut E,
) -> Result<(), CliError> {
    if output.json {
        let doc = json!({ "ok": false, "error": error.to_string() });
        writeln!(out, "{}", serde_json::to_string(&doc)?)?;
    } else {
        writeln!(err, "{}", error)?;
    }
    Ok(())
}

pub fn print_calculator<W: Write>(
    controller: &Controller,
    output: &Output,
    out: &mut W,
) -> Result<(), CliError> {
    let calculator = controller.calculator();
    if output.json {
        writeln!(out, "{}", serde_json::to_string(&render::calculator_json(calculator))?)?;
    } else {
        for line in render::calculator_lines(calculator) {
            if !line.is_empty() {
                writeln!(out, "{}", line)?;
            }
        }
    }
    Ok(())
}
