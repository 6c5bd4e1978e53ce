//! Interactive tabbed session
//!
//! Reads one command per line and drives a [`Controller`]. Mistyped commands
//! and rejected input are reported and the session keeps going; only I/O
//! failures end it early.

use crate::commands::{
    parse_key_tokens, print_calculator, print_errors, print_failure, print_result, Output,
};
use crate::controller::{Action, Controller, Tab};
use crate::error::CliError;
use crate::render;
use health_calculator_shared::{ActivityLevel, Field};
use serde_json::json;
use std::io::{BufRead, Write};
use tracing::{debug, info};

const HELP: &str = "\
Commands:
  tab <name>                         switch the active tab
  set <field> <value>                fill a field on the active tab
  set body_fat <percent>             use a measured body fat for muscle mass
  show                               print the active tab
  bmi | body-fat | muscle | ideal-weight | metabolism
                                     run a computation
  calc <keys...>                     press calculator keys, e.g. calc 5+3=
  help                               print this help
  quit                               leave the session
On the calculator tab, keys can be typed without `calc`.";

/// Whether the loop should keep reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

pub struct Session<'a, W: Write, E: Write> {
    controller: &'a mut Controller,
    output: Output,
    out: W,
    err: E,
}

impl<'a, W: Write, E: Write> Session<'a, W, E> {
    pub fn new(controller: &'a mut Controller, output: Output, out: W, err: E) -> Self {
        Self {
            controller,
            output,
            out,
            err,
        }
    }

    /// Read commands until `quit` or end of input
    pub fn run<R: BufRead>(&mut self, input: R) -> Result<(), CliError> {
        info!(tab = %self.controller.active_tab(), "Interactive session started");
        self.prompt()?;

        for line in input.lines() {
            let line = line?;
            match self.handle_line(&line) {
                Ok(Flow::Quit) => break,
                Ok(Flow::Continue) => {}
                Err(e) if e.is_recoverable() => self.report(&e)?,
                Err(e) => return Err(e),
            }
            self.prompt()?;
        }

        debug!("Interactive session ended");
        Ok(())
    }

    fn prompt(&mut self) -> Result<(), CliError> {
        // Prompts would break line-delimited JSON
        if !self.output.json {
            write!(self.out, "{}> ", self.controller.active_tab())?;
            self.out.flush()?;
        }
        Ok(())
    }

    /// Handle one input line
    fn handle_line(&mut self, line: &str) -> Result<Flow, CliError> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some(command) = parts.first() else {
            return Ok(Flow::Continue);
        };
        let args = &parts[1..];

        match command.to_lowercase().as_str() {
            "quit" | "exit" | "q" => return Ok(Flow::Quit),
            "help" | "?" => self.help()?,
            "tab" => {
                let name = args.first().ok_or(CliError::MissingArgument("tab name"))?;
                self.controller.switch_tab(name.parse::<Tab>()?);
                self.show()?;
            }
            "set" => {
                let name = args.first().ok_or(CliError::MissingArgument("field"))?;
                let field: Field = name.parse().map_err(|_| CliError::UnknownField(name.to_string()))?;
                self.set(field, &args[1..].join(" "))?;
            }
            "show" => self.show()?,
            "calc" => {
                if args.is_empty() {
                    return Err(CliError::MissingArgument("keys"));
                }
                self.press(args)?;
            }
            other => match other.parse::<Action>() {
                Ok(action) => self.run_action(action)?,
                Err(_) if self.controller.active_tab() == Tab::Calculator => self.press(&parts)?,
                Err(e) => return Err(e),
            },
        }
        Ok(Flow::Continue)
    }

    fn help(&mut self) -> Result<(), CliError> {
        writeln!(self.out, "{}", HELP)?;
        writeln!(self.out, "Tabs: {}", Tab::ALL.map(|tab| tab.key()).join(", "))?;
        writeln!(self.out, "Activity levels:")?;
        for level in ActivityLevel::ALL {
            writeln!(
                self.out,
                "  {:<18} {:<6} {}",
                level.key(),
                level.multiplier(),
                level.description(self.output.locale)
            )?;
        }
        Ok(())
    }

    fn set(&mut self, field: Field, value: &str) -> Result<(), CliError> {
        if field == Field::BodyFat {
            let value = value.trim();
            self.controller
                .set_known_body_fat((!value.is_empty()).then_some(value));
            return Ok(());
        }
        self.controller.set_field(field, value)
    }

    fn run_action(&mut self, action: Action) -> Result<(), CliError> {
        if self.controller.active_tab() != action.tab() {
            self.controller.switch_tab(action.tab());
        }
        match self.controller.run(action) {
            Ok(()) => print_result(action, self.controller, &self.output, &mut self.out),
            Err(field_error) => {
                print_errors(&[field_error], &self.output, &mut self.out, &mut self.err)
            }
        }
    }

    fn press(&mut self, tokens: &[&str]) -> Result<(), CliError> {
        let keys = parse_key_tokens(tokens)?;
        self.controller.switch_tab(Tab::Calculator);
        self.controller.press_keys(&keys);
        print_calculator(self.controller, &self.output, &mut self.out)
    }

    fn show(&mut self) -> Result<(), CliError> {
        let tab = self.controller.active_tab();
        let lines = render::form_lines(self.controller, tab, self.output.locale);
        if self.output.json {
            let doc = json!({ "ok": true, "tab": tab, "lines": lines });
            writeln!(self.out, "{}", serde_json::to_string(&doc)?)?;
        } else {
            writeln!(self.out, "[{}]", tab)?;
            for line in lines {
                writeln!(self.out, "  {}", line)?;
            }
        }
        Ok(())
    }

    fn report(&mut self, error: &CliError) -> Result<(), CliError> {
        debug!(%error, "Session command rejected");
        print_failure(error, &self.output, &mut self.out, &mut self.err)
    }
}
