//! Result types

use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of value an evaluator node produces
///
/// Every node declares exactly one of these at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResultType {
    String,
    Boolean,
    /// Integral refinement of [`ResultType::Number`]
    WholeNumber,
    /// Whole or fractional number
    Number,
    /// Calendar date without time of day
    Date,
    /// Absolute point in time with an offset
    Instant,
}

impl ResultType {
    pub const ALL: [ResultType; 6] = [
        Self::String,
        Self::Boolean,
        Self::WholeNumber,
        Self::Number,
        Self::Date,
        Self::Instant,
    ];

    pub const fn name(&self) -> &'static str {
        match self {
            Self::String => "STRING",
            Self::Boolean => "BOOLEAN",
            Self::WholeNumber => "WHOLE_NUMBER",
            Self::Number => "NUMBER",
            Self::Date => "DATE",
            Self::Instant => "INSTANT",
        }
    }

    /// Whether a value of this type may be coerced to `target`.
    ///
    /// A `true` answer for STRING sources only means the conversion is attempted
    /// at evaluation time, where the text itself decides whether it succeeds.
    pub const fn can_coerce_to(self, target: ResultType) -> bool {
        match (self, target) {
            (Self::String, _) | (_, Self::String) => true,
            (Self::WholeNumber | Self::Number, Self::WholeNumber | Self::Number) => true,
            (Self::Boolean, Self::Boolean) | (Self::Date, Self::Date) | (Self::Instant, Self::Instant) => true,
            _ => false,
        }
    }
}

impl fmt::Display for ResultType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
