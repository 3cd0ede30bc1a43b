//! A pocket calculator engine driven by keypad tokens and recognized
//! handwriting.

pub mod calculator;
pub mod config;
pub mod error;
pub mod recognition;
pub mod session;

pub use calculator::{Engine, EngineState, Operator, ResultFormat, Snapshot, Token};
pub use config::Config;
pub use error::CalcError;
pub use recognition::{Candidate, InputImage, RecognitionJoin, Recognizer, TextRegion};
pub use session::{Event, Outcome, Session};
