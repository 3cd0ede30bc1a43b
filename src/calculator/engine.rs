//! The calculator state machine.
//!
//! All arithmetic state lives in [`EngineState`], owned by one [`Engine`] and
//! mutated only through [`Engine::apply`] and [`Engine::apply_text`]. The UI
//! reads a [`Snapshot`] and never touches the state directly.

use crate::calculator::evaluation::evaluate_expression;
use crate::calculator::format::{
    ResultFormat, format_numeral, format_result, is_non_finite, parse_display,
};
use crate::calculator::normalize::{Normalized, normalize};
use crate::calculator::token::{Operator, Token};
use crate::error::CalcError;
use serde::Serialize;
use tracing::{debug, warn};

/// The calculator's mutable state.
#[derive(Clone, Debug, PartialEq)]
pub struct EngineState {
    /// Text currently shown. Never empty; `"0"` is the initial value.
    pub display: String,
    /// Operator awaiting a second operand. Set and cleared together with
    /// `first_operand`.
    pub pending_operator: Option<Operator>,
    /// Left-hand value captured when the operator was chosen.
    pub first_operand: Option<f64>,
    /// The next digit replaces the display instead of appending to it.
    pub awaiting_new_entry: bool,
}

impl Default for EngineState {
    fn default() -> Self {
        Self {
            display: "0".to_string(),
            pending_operator: None,
            first_operand: None,
            awaiting_new_entry: true,
        }
    }
}

/// Read-only projection handed to the UI.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub display: String,
    /// Operator to highlight on the keypad, if one is pending.
    pub pending_operator: Option<Operator>,
    /// Whether pressing `.` would change the display.
    pub decimal_enabled: bool,
}

/// Calculator engine.
#[derive(Clone, Debug, Default)]
pub struct Engine {
    state: EngineState,
    result_format: ResultFormat,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine rendering computed results with the given format.
    pub fn with_result_format(result_format: ResultFormat) -> Self {
        Self {
            state: EngineState::default(),
            result_format,
        }
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    pub fn display(&self) -> &str {
        &self.state.display
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            display: self.state.display.clone(),
            pending_operator: self.state.pending_operator,
            decimal_enabled: !self.state.display.contains('.'),
        }
    }

    /// Apply one token and return the new display.
    pub fn apply(&mut self, token: Token) -> &str {
        debug!(%token, display = %self.state.display, "applying token");

        match token {
            Token::Clear => self.state = EngineState::default(),
            Token::Negate => self.negate(),
            Token::Percent => self.map_display(|v| v / 100.0),
            Token::Operator(op) => self.choose_operator(op),
            Token::Decimal => self.push_decimal(),
            Token::Digit(d) => self.push_digit(d),
            Token::Equals => self.evaluate(),
        }

        &self.state.display
    }

    /// Apply a piece of recognized text.
    ///
    /// Plain numbers start a new entry, or extend the current one when they
    /// are unsigned integers. Lone operator glyphs are applied as tokens and
    /// flat expressions are evaluated in one shot.
    pub fn apply_text(&mut self, raw: &str) -> Result<&str, CalcError> {
        match normalize(raw) {
            Normalized::Token(token) => {
                self.apply(token);
            }
            Normalized::Number { digits, negative } => self.enter_number(&digits, negative),
            Normalized::Expression(expr) => {
                let Some(value) = evaluate_expression(&expr) else {
                    warn!(input = raw, "expression matched but did not evaluate");
                    return Err(CalcError::NotRecognized {
                        input: raw.to_string(),
                    });
                };
                debug!(%expr, value, "evaluated recognized expression");
                self.state.display = format_result(value, self.result_format);
                self.state.awaiting_new_entry = true;
            }
            Normalized::Unrecognized => {
                warn!(input = raw, "recognized text not understood");
                return Err(CalcError::NotRecognized {
                    input: raw.to_string(),
                });
            }
        }

        Ok(&self.state.display)
    }

    /// Mid-entry the sign is toggled on the typed text so a trailing `.` or
    /// zeros survive; otherwise the value is reformatted.
    fn negate(&mut self) {
        if self.state.awaiting_new_entry {
            self.map_display(|v| -v);
            return;
        }
        if parse_display(&self.state.display).is_none() {
            return;
        }
        if self.state.display.starts_with('-') {
            self.state.display.remove(0);
        } else {
            self.state.display.insert(0, '-');
        }
    }

    fn map_display(&mut self, f: impl FnOnce(f64) -> f64) {
        if let Some(value) = parse_display(&self.state.display) {
            self.state.display = format_numeral(f(value));
        }
    }

    fn choose_operator(&mut self, op: Operator) {
        // A second operator overwrites the first; nothing is chained.
        if let Some(value) = parse_display(&self.state.display) {
            self.state.first_operand = Some(value);
            self.state.pending_operator = Some(op);
            self.state.awaiting_new_entry = true;
        }
    }

    fn push_decimal(&mut self) {
        if is_non_finite(&self.state.display) {
            self.state.display = "0.".to_string();
            self.state.awaiting_new_entry = false;
        } else if !self.state.display.contains('.') {
            self.state.display.push('.');
        }
    }

    fn push_digit(&mut self, d: u8) {
        let Some(digit) = char::from_digit(u32::from(d), 10) else {
            return;
        };

        if self.state.awaiting_new_entry {
            self.state.display = digit.to_string();
            self.state.awaiting_new_entry = false;
        } else if matches!(self.state.display.as_str(), "0" | "-0") {
            self.state.display.pop();
            self.state.display.push(digit);
        } else {
            self.state.display.push(digit);
        }
    }

    fn evaluate(&mut self) {
        let (Some(op), Some(first)) = (self.state.pending_operator, self.state.first_operand)
        else {
            return;
        };
        let Some(second) = parse_display(&self.state.display) else {
            return;
        };

        let result = op.apply(first, second);
        debug!(first, op = %op.symbol(), second, result, "evaluated");

        self.state.display = format_result(result, self.result_format);
        self.state.pending_operator = None;
        self.state.first_operand = None;
        self.state.awaiting_new_entry = true;
    }

    fn enter_number(&mut self, digits: &str, negative: bool) {
        let extends_entry = !self.state.awaiting_new_entry
            && !negative
            && !digits.contains('.')
            && parse_display(&self.state.display).is_some();

        if extends_entry {
            for d in digits.chars().filter_map(|c| c.to_digit(10)) {
                self.push_digit(d as u8);
            }
        } else {
            self.state.display = entered_numeral(digits, negative);
            self.state.awaiting_new_entry = false;
        }
    }
}

/// Render recognized digits the way the keypad would have built them:
/// no leading zeros, `0` before a bare `.`.
fn entered_numeral(digits: &str, negative: bool) -> String {
    let (int, frac) = match digits.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (digits, None),
    };
    let int = int.trim_start_matches('0');

    let mut numeral = String::new();
    if negative {
        numeral.push('-');
    }
    numeral.push_str(if int.is_empty() { "0" } else { int });
    if let Some(frac) = frac {
        numeral.push('.');
        numeral.push_str(frac);
    }
    numeral
}
