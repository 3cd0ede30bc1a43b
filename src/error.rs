//! Library error type.

use thiserror::Error;

/// Errors surfaced by the calculator engine.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CalcError {
    /// Text that is neither a number, an operator nor a flat expression.
    /// The engine state is left untouched.
    #[error("input not recognized: {input:?}")]
    NotRecognized { input: String },
}
