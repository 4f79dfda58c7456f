//! Literal argument values

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    String(String),
    /// Integral literal that fits in 64 bits
    WholeNumber(i64),
    /// Literal with a fraction or exponent, or an integral literal too large for i64
    Decimal(f64),
    Boolean(bool),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::String(s) => write!(f, "'{}'", s.replace('\'', "\\'")),
            Literal::WholeNumber(n) => write!(f, "{n}"),
            Literal::Decimal(d) => write!(f, "{d}"),
            Literal::Boolean(b) => write!(f, "{b}"),
        }
    }
}
