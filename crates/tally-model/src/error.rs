//! Error types for constraint handling.

use thiserror::Error;

use crate::constraint::Operator;

/// Errors raised when a constraint is built or evaluated.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConstraintError {
    /// Operator string is not one of the supported comparisons.
    #[error("unsupported constraint operator '{operator}'")]
    UnknownOperator { operator: String },

    /// Ordering operator used with a text operand.
    #[error("operator '{operator}' on column '{column}' requires a numeric operand, got '{operand}'")]
    OrderingOnText {
        column: String,
        operator: Operator,
        operand: String,
    },

    /// Numeric comparison against a value that does not parse as a number.
    #[error("column '{column}' value '{value}' is not numeric (operator '{operator}')")]
    NonNumericValue {
        column: String,
        operator: Operator,
        value: String,
    },
}
