//! Runtime values
//!
//! [`Value`] is what an evaluator node produces for one evaluation. Numbers keep
//! an integral representation for as long as arithmetic allows and fall back to
//! IEEE-754 doubles otherwise.

use crate::ResultType;
use chrono::{DateTime, FixedOffset, NaiveDate, SecondsFormat};
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use thiserror::Error;

/// Canonical pattern for rendering dates as text
pub const CANONICAL_DATE_FORMAT: &str = "%Y-%m-%d";

/// A numeric value, whole or fractional
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(untagged)]
pub enum Number {
    Whole(i64),
    Decimal(f64),
}

impl Number {
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Whole(n) => n as f64,
            Self::Decimal(d) => d,
        }
    }

    /// The value as an i64 when it is integral and in range
    pub fn as_whole(self) -> Option<i64> {
        match self {
            Self::Whole(n) => Some(n),
            Self::Decimal(d) if d.fract() == 0.0 && d >= i64::MIN as f64 && d < i64::MAX as f64 => {
                Some(d as i64)
            }
            Self::Decimal(_) => None,
        }
    }

    pub fn is_whole(self) -> bool {
        matches!(self, Self::Whole(_))
    }

    pub fn is_zero(self) -> bool {
        match self {
            Self::Whole(n) => n == 0,
            Self::Decimal(d) => d == 0.0,
        }
    }

    pub fn result_type(self) -> ResultType {
        match self {
            Self::Whole(_) => ResultType::WholeNumber,
            Self::Decimal(_) => ResultType::Number,
        }
    }

    pub fn to_decimal(self) -> Self {
        Self::Decimal(self.as_f64())
    }

    pub fn plus(self, rhs: Self) -> ArithmeticResult<Self> {
        self.combine(rhs, i64::checked_add, |a, b| a + b)
    }

    pub fn minus(self, rhs: Self) -> ArithmeticResult<Self> {
        self.combine(rhs, i64::checked_sub, |a, b| a - b)
    }

    pub fn times(self, rhs: Self) -> ArithmeticResult<Self> {
        self.combine(rhs, i64::checked_mul, |a, b| a * b)
    }

    /// Division; whole operands stay whole only when the division is exact
    pub fn divide(self, rhs: Self) -> ArithmeticResult<Self> {
        if rhs.is_zero() {
            return Err(ArithmeticError::DivisionByZero);
        }
        match (self, rhs) {
            (Self::Whole(a), Self::Whole(b)) if a.wrapping_rem(b) == 0 => {
                Ok(a.checked_div(b).map_or(Self::Decimal(a as f64 / b as f64), Self::Whole))
            }
            _ => finite(self.as_f64() / rhs.as_f64()),
        }
    }

    /// Remainder with the sign of the dividend
    pub fn modulo(self, rhs: Self) -> ArithmeticResult<Self> {
        if rhs.is_zero() {
            return Err(ArithmeticError::DivisionByZero);
        }
        match (self, rhs) {
            // i64::MIN % -1 overflows but is mathematically zero
            (Self::Whole(a), Self::Whole(b)) => Ok(Self::Whole(a.checked_rem(b).unwrap_or(0))),
            _ => finite(self.as_f64() % rhs.as_f64()),
        }
    }

    pub fn abs(self) -> Self {
        match self {
            Self::Whole(n) => n.checked_abs().map_or(Self::Decimal((n as f64).abs()), Self::Whole),
            Self::Decimal(d) => Self::Decimal(d.abs()),
        }
    }

    fn combine(
        self,
        rhs: Self,
        whole: fn(i64, i64) -> Option<i64>,
        decimal: fn(f64, f64) -> f64,
    ) -> ArithmeticResult<Self> {
        match (self, rhs) {
            (Self::Whole(a), Self::Whole(b)) => match whole(a, b) {
                Some(n) => Ok(Self::Whole(n)),
                None => finite(decimal(a as f64, b as f64)),
            },
            _ => finite(decimal(self.as_f64(), rhs.as_f64())),
        }
    }
}

/// Failure of a numeric operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ArithmeticError {
    #[error("division by zero")]
    DivisionByZero,

    /// The result is infinite or NaN, which has no numeric text form
    #[error("result is out of the representable range")]
    OutOfRange,
}

pub type ArithmeticResult<T> = Result<T, ArithmeticError>;

fn finite(d: f64) -> ArithmeticResult<Number> {
    if d.is_finite() {
        Ok(Number::Decimal(d))
    } else {
        Err(ArithmeticError::OutOfRange)
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Whole(a), Self::Whole(b)) => a == b,
            _ => self.as_f64() == other.as_f64(),
        }
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Whole(a), Self::Whole(b)) => Some(a.cmp(b)),
            _ => self.as_f64().partial_cmp(&other.as_f64()),
        }
    }
}

impl From<i64> for Number {
    fn from(n: i64) -> Self {
        Self::Whole(n)
    }
}

impl From<f64> for Number {
    fn from(d: f64) -> Self {
        Self::Decimal(d)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Whole(n) => write!(f, "{n}"),
            // Rust's float Display is the shortest text that parses back to the same value
            Self::Decimal(d) => write!(f, "{d}"),
        }
    }
}

/// A value produced by one evaluation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// A reference to an attribute the record does not have
    Unset,
    String(String),
    Boolean(bool),
    Number(Number),
    Date(NaiveDate),
    Instant(DateTime<FixedOffset>),
}

impl Value {
    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }

    /// The runtime kind, `None` for unset
    pub fn result_type(&self) -> Option<ResultType> {
        match self {
            Self::Unset => None,
            Self::String(_) => Some(ResultType::String),
            Self::Boolean(_) => Some(ResultType::Boolean),
            Self::Number(n) => Some(n.result_type()),
            Self::Date(_) => Some(ResultType::Date),
            Self::Instant(_) => Some(ResultType::Instant),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<Number> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Text form; unset renders as the empty string
    pub fn into_string(self) -> String {
        match self {
            Self::String(s) => s,
            Self::Unset => String::new(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unset => Ok(()),
            Self::String(s) => f.write_str(s),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Date(d) => write!(f, "{}", d.format(CANONICAL_DATE_FORMAT)),
            Self::Instant(i) => f.write_str(&i.to_rfc3339_opts(SecondsFormat::Millis, true)),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Self::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Number(Number::Whole(n))
    }
}

impl From<f64> for Value {
    fn from(d: f64) -> Self {
        Self::Number(Number::Decimal(d))
    }
}
