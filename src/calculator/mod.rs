//! Calculator module.
//!
//! This module provides functionality to:
//! - Fold keypad tokens into a running arithmetic state
//! - Normalize recognized handwriting into tokens or flat expressions
//! - Format results for the display

mod engine;
mod evaluation;
mod format;
mod normalize;
mod token;

pub use engine::{Engine, EngineState, Snapshot};
pub use evaluation::evaluate_expression;
pub use format::{INFINITY, NAN, NEG_INFINITY, ResultFormat, format_result};
pub use normalize::{Normalized, canonicalize, normalize};
pub use token::{Operator, Token};
