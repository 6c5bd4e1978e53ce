//! Four-function calculator
//!
//! A chained two-operand state machine. Input goes through [`Calculator::press`]
//! or the individual transition methods; nothing here knows about displays.

use crate::errors::MetricError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Arithmetic operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    /// Symbol shown on the button
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "×",
            Operator::Divide => "÷",
        }
    }

    /// Apply with IEEE-754 semantics; division by zero is not special-cased
    pub fn apply(&self, lhs: f64, rhs: f64) -> f64 {
        match self {
            Operator::Add => lhs + rhs,
            Operator::Subtract => lhs - rhs,
            Operator::Multiply => lhs * rhs,
            Operator::Divide => lhs / rhs,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A calculator button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Digit(u8),
    Point,
    Operator(Operator),
    Equals,
    Clear,
}

impl std::str::FromStr for Key {
    type Err = MetricError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = match s.trim() {
            "." => Key::Point,
            "+" => Key::Operator(Operator::Add),
            "-" | "−" => Key::Operator(Operator::Subtract),
            "*" | "x" | "×" => Key::Operator(Operator::Multiply),
            "/" | "÷" => Key::Operator(Operator::Divide),
            "=" => Key::Equals,
            "c" | "C" | "AC" | "clear" => Key::Clear,
            other => match other.as_bytes() {
                [d @ b'0'..=b'9'] => Key::Digit(*d - b'0'),
                _ => return Err(MetricError::UnknownKey(s.to_string())),
            },
        };
        Ok(key)
    }
}

/// Parse a run of keys such as `"12.5+3="` one character at a time
pub fn parse_keys(input: &str) -> Result<Vec<Key>, MetricError> {
    input
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_string().parse::<Key>())
        .collect()
}

/// Calculator state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Calculator {
    current: String,
    previous: String,
    operator: Option<Operator>,
}

impl Default for Calculator {
    fn default() -> Self {
        Self {
            current: "0".to_string(),
            previous: String::new(),
            operator: None,
        }
    }
}

impl Calculator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entry buffer (main display line)
    pub fn current(&self) -> &str {
        &self.current
    }

    pub fn previous(&self) -> &str {
        &self.previous
    }

    pub fn operator(&self) -> Option<Operator> {
        self.operator
    }

    /// Secondary display line: the stored operand and pending operator
    pub fn history_line(&self) -> String {
        match self.operator {
            Some(op) => format!("{} {}", self.previous, op),
            None => self.previous.clone(),
        }
    }

    /// Dispatch one key press
    pub fn press(&mut self, key: Key) {
        match key {
            Key::Digit(d) => self.append(char::from(b'0' + d.min(9))),
            Key::Point => self.append('.'),
            Key::Operator(op) => self.choose_operator(op),
            Key::Equals => self.compute(),
            Key::Clear => self.clear(),
        }
    }

    /// Append a digit or decimal point to the entry buffer
    ///
    /// A second point is ignored and a lone `0` is replaced by a digit.
    pub fn append(&mut self, c: char) {
        if c == '.' && self.current.contains('.') {
            return;
        }
        if self.current == "0" && c != '.' {
            self.current = c.to_string();
        } else {
            self.current.push(c);
        }
    }

    /// Store an operator, first settling any pending one
    ///
    /// Ignored while the entry buffer is empty.
    pub fn choose_operator(&mut self, op: Operator) {
        if self.current.is_empty() {
            return;
        }
        if !self.previous.is_empty() {
            self.compute();
        }
        self.operator = Some(op);
        self.previous = std::mem::take(&mut self.current);
    }

    /// Evaluate the pending operation
    ///
    /// A no-op when no operator is pending or either operand does not parse.
    pub fn compute(&mut self) {
        let Some(op) = self.operator else {
            return;
        };
        let (Some(lhs), Some(rhs)) = (parse_operand(&self.previous), parse_operand(&self.current))
        else {
            return;
        };

        self.current = format_number(op.apply(lhs, rhs));
        self.operator = None;
        self.previous.clear();
    }

    /// Reset to the initial state
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Parse an operand buffer; `NaN` counts as unparseable
fn parse_operand(buffer: &str) -> Option<f64> {
    buffer.parse::<f64>().ok().filter(|v| !v.is_nan())
}

/// Shortest round-trip decimal form, with non-finite values spelled out
///
/// Magnitudes of 1e21 and above or below 1e-6 use exponent notation (`1.5e+21`).
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        let sign = if value > 0.0 { "" } else { "-" };
        format!("{}Infinity", sign)
    } else if value == 0.0 {
        // drop the sign of negative zero
        "0".to_string()
    } else if value.abs() >= 1e21 || value.abs() < 1e-6 {
        // exponent form keeps the display bounded; the exponent sign is always written
        let formatted = format!("{:e}", value);
        match formatted.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{}e+{}", mantissa, exponent)
            }
            _ => formatted,
        }
    } else {
        value.to_string()
    }
}
