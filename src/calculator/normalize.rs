//! Normalization of recognized text.
//!
//! Handwriting recognition hands back loose strings: spaces between strokes,
//! `x` for multiply, `/` for divide. This module folds them into the
//! calculator's canonical glyphs and decides what kind of input they are.

use crate::calculator::token::{Operator, Token};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// An unsigned-or-negative decimal numeral: `12`, `-3.5`, `4.`, `.25`.
    static ref PLAIN_NUMBER: Regex = Regex::new(
        r"^-?([0-9]+\.?[0-9]*|\.[0-9]+)$"
    ).unwrap();

    /// A flat expression over canonical glyphs, with optional postfix `%`
    /// on each operand and an optional trailing `=`.
    static ref FLAT_EXPRESSION: Regex = Regex::new(
        r"^-?([0-9]+\.?[0-9]*|\.[0-9]+)%?([+\-×÷]-?([0-9]+\.?[0-9]*|\.[0-9]+)%?)*=?$"
    ).unwrap();
}

/// What a piece of recognized text turned out to be.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Normalized {
    /// A lone operator, equals or percent glyph.
    Token(Token),
    /// A plain numeral, digits and at most one `.`, sign split off.
    Number { digits: String, negative: bool },
    /// A flat arithmetic expression in canonical glyphs.
    Expression(String),
    /// Nothing the calculator understands.
    Unrecognized,
}

/// Map operator aliases to canonical glyphs and drop all whitespace.
pub fn canonicalize(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| match c {
            'x' | 'X' | '*' | '×' => '×',
            '/' | '÷' | ':' => '÷',
            '−' | '–' => '-',
            other => other,
        })
        .collect()
}

/// Classify recognized text after canonicalization.
pub fn normalize(raw: &str) -> Normalized {
    let cleaned = canonicalize(raw);

    if let Some(token) = single_glyph(&cleaned) {
        return Normalized::Token(token);
    }

    if PLAIN_NUMBER.is_match(&cleaned) {
        let (negative, digits) = match cleaned.strip_prefix('-') {
            Some(rest) => (true, rest.to_string()),
            None => (false, cleaned),
        };
        return Normalized::Number { digits, negative };
    }

    if FLAT_EXPRESSION.is_match(&cleaned) {
        return Normalized::Expression(cleaned);
    }

    Normalized::Unrecognized
}

fn single_glyph(cleaned: &str) -> Option<Token> {
    let mut chars = cleaned.chars();
    let c = chars.next()?;
    if chars.next().is_some() {
        return None;
    }

    match c {
        '%' => Some(Token::Percent),
        '=' => Some(Token::Equals),
        _ => Operator::from_symbol(c).map(Token::Operator),
    }
}
