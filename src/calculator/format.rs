//! Number formatting and parsing for the calculator display.

use serde::{Deserialize, Serialize};

/// Rendered form of positive infinity.
pub const INFINITY: &str = "∞";
/// Rendered form of negative infinity.
pub const NEG_INFINITY: &str = "-∞";
/// Rendered form of an undefined result.
pub const NAN: &str = "NaN";

/// How computed results (equals, expressions) are rendered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResultFormat {
    /// Integral values with no decimals, everything else with exactly two.
    #[default]
    Fixed,
    /// Shortest string that round-trips, e.g. `0.30000000000000004`.
    Shortest,
}

/// Format a computed result for display.
pub fn format_result(value: f64, format: ResultFormat) -> String {
    if let Some(token) = non_finite_token(value) {
        return token.to_string();
    }

    match format {
        ResultFormat::Fixed if value.fract() == 0.0 => strip_negative_zero(format!("{value:.0}")),
        ResultFormat::Fixed => strip_negative_zero(format!("{value:.2}")),
        ResultFormat::Shortest => format_numeral(value),
    }
}

/// Format a value as the shortest decimal numeral, used for negate and percent.
pub fn format_numeral(value: f64) -> String {
    if let Some(token) = non_finite_token(value) {
        return token.to_string();
    }
    if value == 0.0 {
        // covers -0.0
        return "0".to_string();
    }
    format!("{value}")
}

/// Parse the display as a finite operand.
///
/// Non-finite tokens and anything malformed yield `None`.
pub fn parse_display(display: &str) -> Option<f64> {
    display.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Whether the display holds one of the non-finite result tokens.
pub fn is_non_finite(display: &str) -> bool {
    matches!(display, INFINITY | NEG_INFINITY | NAN)
}

fn non_finite_token(value: f64) -> Option<&'static str> {
    if value.is_nan() {
        Some(NAN)
    } else if value.is_infinite() {
        Some(if value.is_sign_positive() {
            INFINITY
        } else {
            NEG_INFINITY
        })
    } else {
        None
    }
}

/// Rounding can leave `-0` or `-0.00`; render those unsigned.
fn strip_negative_zero(formatted: String) -> String {
    match formatted.strip_prefix('-') {
        Some(rest) if rest.chars().all(|c| c == '0' || c == '.') => rest.to_string(),
        _ => formatted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_integral() {
        assert_eq!(format_result(15.0, ResultFormat::Fixed), "15");
        assert_eq!(format_result(-4.0, ResultFormat::Fixed), "-4");
        assert_eq!(format_result(0.0, ResultFormat::Fixed), "0");
        assert_eq!(format_result(-0.0, ResultFormat::Fixed), "0");
    }

    #[test]
    fn test_fixed_two_decimals() {
        assert_eq!(format_result(2.5, ResultFormat::Fixed), "2.50");
        assert_eq!(format_result(1.0 / 3.0, ResultFormat::Fixed), "0.33");
        assert_eq!(format_result(0.1 + 0.2, ResultFormat::Fixed), "0.30");
        assert_eq!(format_result(-0.001, ResultFormat::Fixed), "0.00");
    }

    #[test]
    fn test_shortest() {
        assert_eq!(
            format_result(0.1 + 0.2, ResultFormat::Shortest),
            "0.30000000000000004"
        );
        assert_eq!(format_result(2.5, ResultFormat::Shortest), "2.5");
        assert_eq!(format_result(15.0, ResultFormat::Shortest), "15");
    }

    #[test]
    fn test_non_finite_tokens() {
        for format in [ResultFormat::Fixed, ResultFormat::Shortest] {
            assert_eq!(format_result(f64::INFINITY, format), INFINITY);
            assert_eq!(format_result(f64::NEG_INFINITY, format), NEG_INFINITY);
            assert_eq!(format_result(f64::NAN, format), NAN);
        }
    }

    #[test]
    fn test_numeral() {
        assert_eq!(format_numeral(-5.0), "-5");
        assert_eq!(format_numeral(0.09), "0.09");
        assert_eq!(format_numeral(-0.0), "0");
        assert_eq!(format_numeral(1e-7), "0.0000001");
    }

    #[test]
    fn test_parse_display() {
        assert_eq!(parse_display("0"), Some(0.0));
        assert_eq!(parse_display("-12.5"), Some(-12.5));
        assert_eq!(parse_display("3."), Some(3.0));
        assert_eq!(parse_display(INFINITY), None);
        assert_eq!(parse_display(NAN), None);
        assert_eq!(parse_display("inf"), None);
        assert_eq!(parse_display(""), None);
    }
}
