//! Constraints that gate counting on a column value.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConstraintError;

/// Comparison operator of a [`Constraint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum Operator {
    Equals,
    NotEquals,
    GreaterThan,
    LessThan,
    GreaterOrEqual,
    LessOrEqual,
}

impl Operator {
    /// Symbol used in profiles and messages.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Equals => "==",
            Self::NotEquals => "!=",
            Self::GreaterThan => ">",
            Self::LessThan => "<",
            Self::GreaterOrEqual => ">=",
            Self::LessOrEqual => "<=",
        }
    }

    /// Returns true for `>`, `<`, `>=` and `<=`.
    #[must_use]
    pub const fn is_ordering(self) -> bool {
        !matches!(self, Self::Equals | Self::NotEquals)
    }

    fn compare<T: PartialOrd + ?Sized>(self, left: &T, right: &T) -> bool {
        match self {
            Self::Equals => left == right,
            Self::NotEquals => left != right,
            Self::GreaterThan => left > right,
            Self::LessThan => left < right,
            Self::GreaterOrEqual => left >= right,
            Self::LessOrEqual => left <= right,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Operator {
    type Err = ConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "==" | "=" | "eq" => Ok(Self::Equals),
            "!=" | "<>" | "ne" => Ok(Self::NotEquals),
            ">" | "gt" => Ok(Self::GreaterThan),
            "<" | "lt" => Ok(Self::LessThan),
            ">=" | "ge" => Ok(Self::GreaterOrEqual),
            "<=" | "le" => Ok(Self::LessOrEqual),
            _ => Err(ConstraintError::UnknownOperator {
                operator: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for Operator {
    type Error = ConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Operator> for &'static str {
    fn from(value: Operator) -> Self {
        value.symbol()
    }
}

/// Right-hand side of a [`Constraint`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Operand {
    Number(f64),
    Text(String),
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

impl From<f64> for Operand {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for Operand {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<&str> for Operand {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Operand {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// A predicate `column <operator> operand` over one logical column.
///
/// Text operands support only `==` and `!=`; numeric operands parse the
/// cell value as `f64` and support every operator.
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    column: String,
    operator: Operator,
    operand: Operand,
}

impl Constraint {
    /// Builds a constraint, rejecting ordering operators on text operands.
    pub fn new(
        column: impl Into<String>,
        operator: Operator,
        operand: Operand,
    ) -> Result<Self, ConstraintError> {
        let column = column.into();
        if let Operand::Text(text) = &operand
            && operator.is_ordering()
        {
            return Err(ConstraintError::OrderingOnText {
                column,
                operator,
                operand: text.clone(),
            });
        }
        Ok(Self {
            column,
            operator,
            operand,
        })
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn operand(&self) -> &Operand {
        &self.operand
    }

    /// Evaluates the constraint against a cleaned cell value.
    pub fn evaluate(&self, value: &str) -> Result<bool, ConstraintError> {
        match &self.operand {
            Operand::Text(expected) => Ok(self.operator.compare(value, expected.as_str())),
            Operand::Number(expected) => {
                let parsed =
                    value
                        .parse::<f64>()
                        .map_err(|_| ConstraintError::NonNumericValue {
                            column: self.column.clone(),
                            operator: self.operator,
                            value: value.to_string(),
                        })?;
                Ok(self.operator.compare(&parsed, expected))
            }
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.column, self.operator, self.operand)
    }
}
