//! Calculator input tokens.
//!
//! A token is one discrete unit of input: a button press, or one piece of
//! recognized text after normalization.

use serde::Serialize;
use std::fmt;

/// A binary arithmetic operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    /// Canonical display glyph for this operator.
    pub fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '×',
            Self::Divide => '÷',
        }
    }

    /// Look up an operator by its canonical glyph.
    pub fn from_symbol(c: char) -> Option<Self> {
        match c {
            '+' => Some(Self::Add),
            '-' => Some(Self::Subtract),
            '×' => Some(Self::Multiply),
            '÷' => Some(Self::Divide),
            _ => None,
        }
    }

    /// Apply the operator with IEEE 754 semantics.
    pub fn apply(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            Self::Add => lhs + rhs,
            Self::Subtract => lhs - rhs,
            Self::Multiply => lhs * rhs,
            Self::Divide => lhs / rhs,
        }
    }
}

/// A single calculator input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Token {
    /// A digit in `0..=9`. The engine ignores anything larger.
    Digit(u8),
    Decimal,
    Operator(Operator),
    Clear,
    Negate,
    Percent,
    Equals,
}

impl Token {
    /// Build a digit token, rejecting anything outside `0..=9`.
    pub fn digit(d: u8) -> Option<Self> {
        (d <= 9).then_some(Self::Digit(d))
    }

    /// Parse a button label as shown on the keypad.
    ///
    /// Accepts `"AC"`, `"±"`, `"%"`, `"="`, `"."`, the digits and the four
    /// operator glyphs. Returns `None` for anything else.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "AC" | "C" => return Some(Self::Clear),
            "±" | "+/-" => return Some(Self::Negate),
            "%" => return Some(Self::Percent),
            "=" => return Some(Self::Equals),
            "." => return Some(Self::Decimal),
            _ => {}
        }

        let mut chars = label.chars();
        let c = chars.next()?;
        if chars.next().is_some() {
            return None;
        }

        if let Some(d) = c.to_digit(10) {
            return Self::digit(d as u8);
        }
        Operator::from_symbol(c).map(Self::Operator)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Digit(d) => write!(f, "{d}"),
            Self::Decimal => f.write_str("."),
            Self::Operator(op) => write!(f, "{}", op.symbol()),
            Self::Clear => f.write_str("AC"),
            Self::Negate => f.write_str("±"),
            Self::Percent => f.write_str("%"),
            Self::Equals => f.write_str("="),
        }
    }
}

impl From<Operator> for Token {
    fn from(op: Operator) -> Self {
        Self::Operator(op)
    }
}
