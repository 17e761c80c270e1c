//! Calculator core: everything that runs without a rendering surface
//!
//! The buffer state machine, the bounded undo/history collections, the
//! constrained arithmetic evaluator and the number formatter live here.

pub mod bounded;
pub mod buffer;
pub mod evaluator;
pub mod format;
pub mod history;
mod operations;
pub mod parser;
pub mod undo;

pub use operations::Operation;

use thiserror::Error;

/// Result type for expression evaluation
pub type CalcResult<T> = Result<T, CalcError>;

/// Reasons an expression failed to produce a value
///
/// The widget treats every variant the same way (no preview), the
/// distinction only shows up in logs and tests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    /// Division by zero attempted
    #[error("Division by zero")]
    DivisionByZero,
    /// Result overflowed (infinity)
    #[error("Overflow: result exceeds maximum value")]
    Overflow,
    /// Invalid expression syntax
    #[error("Invalid expression: {0}")]
    ParseError(String),
    /// Nothing left to evaluate
    #[error("Empty expression")]
    EmptyExpression,
    /// Invalid result (NaN)
    #[error("Invalid result: {0}")]
    InvalidResult(String),
}

impl CalcError {
    /// Creates a parse error
    #[must_use]
    pub fn parse(message: impl Into<String>) -> Self {
        Self::ParseError(message.into())
    }
}
