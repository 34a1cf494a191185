//! Formula error types.

use thiserror::Error;

/// Errors raised while expanding or evaluating a formula.
///
/// These never escape the recompute pass: a failing formula evaluates to `0`
/// and the error is kept on the cell as a diagnostic.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormulaError {
    #[error("Invalid reference: {0}")]
    InvalidReference(String),

    #[error("Invalid range: {0}")]
    InvalidRange(String),

    #[error("Unexpected character '{ch}' at position {pos}")]
    UnexpectedChar { ch: char, pos: usize },

    #[error("Unexpected end of expression")]
    UnexpectedEnd,

    #[error("Unexpected token at position {0}")]
    UnexpectedToken(usize),

    #[error("Unbalanced parentheses")]
    UnbalancedParens,

    #[error("Invalid number: {0}")]
    InvalidNumber(String),

    /// Any `/` by zero in the arithmetic, not only the AVERAGE guard.
    /// Plain float division would give Infinity; the cell gets 0 and this
    /// diagnostic instead.
    #[error("Division by zero")]
    DivisionByZero,

    #[error("Result is not a finite number")]
    NonFinite,
}

pub type Result<T> = std::result::Result<T, FormulaError>;
