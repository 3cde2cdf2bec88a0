//! The module contains the errors the engine can return.
//!
//! The errors are:
//!
//! - [`InvalidExpense`] returned when an expense cannot be split (non-positive
//!   amount, no participants, bad weights).
//! - [`InconsistentWeights`] returned when a weighted split names members that
//!   do not take part in the expense.
//! - [`InvalidAmount`] returned for unparsable money or arithmetic overflow.
//!
//!  [`InvalidExpense`]: EngineError::InvalidExpense
//!  [`InconsistentWeights`]: EngineError::InconsistentWeights
//!  [`InvalidAmount`]: EngineError::InvalidAmount
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid expense: {0}")]
    InvalidExpense(String),
    #[error("Inconsistent weights: {0}")]
    InconsistentWeights(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
}
