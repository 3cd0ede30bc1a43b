//! Flat expression evaluation.
//!
//! Recognized expressions are evaluated strictly left to right with no
//! operator precedence: `2+3×4` is `20`, the same answer the keypad gives
//! when the keys are pressed in that order with `=` in between.

use crate::calculator::token::Operator;

/// Evaluate a canonicalized flat expression such as `3×4` or `-2+50%=`.
///
/// Operands may carry a leading `-` and a postfix `%` (divide by 100). A
/// single trailing `=` is ignored. Returns `None` if the input is not a
/// well-formed flat expression. The result may be non-finite.
pub fn evaluate_expression(input: &str) -> Option<f64> {
    let body = input.strip_suffix('=').unwrap_or(input);
    let mut scanner = Scanner::new(body);

    let mut acc = scanner.operand()?;
    while !scanner.is_done() {
        let op = scanner.operator()?;
        let rhs = scanner.operand()?;
        acc = op.apply(acc, rhs);
    }

    Some(acc)
}

struct Scanner<'a> {
    rest: &'a str,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str) -> Self {
        Self { rest: input }
    }

    fn is_done(&self) -> bool {
        self.rest.is_empty()
    }

    fn operator(&mut self) -> Option<Operator> {
        let c = self.rest.chars().next()?;
        let op = Operator::from_symbol(c)?;
        self.rest = &self.rest[c.len_utf8()..];
        Some(op)
    }

    /// `-?` digits with at most one `.`, then an optional `%`.
    fn operand(&mut self) -> Option<f64> {
        let negative = match self.rest.strip_prefix('-') {
            Some(rest) => {
                self.rest = rest;
                true
            }
            None => false,
        };

        let end = self
            .rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(self.rest.len());
        let numeral = &self.rest[..end];
        if numeral.is_empty() || numeral == "." || numeral.matches('.').count() > 1 {
            return None;
        }
        let mut value: f64 = numeral.parse().ok()?;
        self.rest = &self.rest[end..];

        if let Some(rest) = self.rest.strip_prefix('%') {
            self.rest = rest;
            value /= 100.0;
        }

        Some(if negative { -value } else { value })
    }
}
