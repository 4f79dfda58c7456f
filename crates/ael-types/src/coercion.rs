//! Runtime coercion between result types
//!
//! The compiler only admits pairs for which [`ResultType::can_coerce_to`] holds;
//! this module performs the conversion on actual values and fails when the
//! value itself cannot be converted (e.g. the text `"abc"` to a number).

use crate::{Number, ResultType, TemporalFormats, Value};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoercionError {
    #[error("cannot coerce {from} value '{value}' to {to}")]
    Incompatible {
        from: ResultType,
        to: ResultType,
        value: String,
    },

    #[error("attribute is not set but a {to} value is required")]
    Unset { to: ResultType },

    #[error("'{value}' does not match the {to} pattern '{pattern}'")]
    MalformedTemporal {
        to: ResultType,
        value: String,
        pattern: String,
    },
}

pub type CoercionResult<T> = Result<T, CoercionError>;

/// Convert `value` to `target`
pub fn coerce(value: Value, target: ResultType, formats: &TemporalFormats) -> CoercionResult<Value> {
    let Some(from) = value.result_type() else {
        return match target {
            ResultType::String => Ok(Value::String(String::new())),
            to => Err(CoercionError::Unset { to }),
        };
    };

    match (value, target) {
        (value, ResultType::String) => Ok(Value::String(value.into_string())),
        (Value::Number(n), ResultType::Number) => Ok(Value::Number(n)),
        (Value::Number(n), ResultType::WholeNumber) => whole(n, from),
        (value @ (Value::Boolean(_) | Value::Date(_) | Value::Instant(_)), to) if from == to => Ok(value),

        (Value::String(text), ResultType::Boolean) => {
            if text.eq_ignore_ascii_case("true") {
                Ok(Value::Boolean(true))
            } else if text.eq_ignore_ascii_case("false") {
                Ok(Value::Boolean(false))
            } else {
                Err(incompatible(from, target, text))
            }
        }
        (Value::String(text), ResultType::Number) => parse_number(&text)
            .map(Value::Number)
            .ok_or_else(|| incompatible(from, target, text)),
        (Value::String(text), ResultType::WholeNumber) => match parse_number(&text) {
            Some(n) => whole(n, from),
            None => Err(incompatible(from, target, text)),
        },
        (Value::String(text), ResultType::Date) => match formats.parse_date(&text, None) {
            Some(date) => Ok(Value::Date(date)),
            None => Err(CoercionError::MalformedTemporal {
                to: target,
                pattern: formats.date.clone(),
                value: text,
            }),
        },
        (Value::String(text), ResultType::Instant) => match formats.parse_instant(&text, None) {
            Some(instant) => Ok(Value::Instant(instant)),
            None => Err(CoercionError::MalformedTemporal {
                to: target,
                pattern: formats.instant_pattern(None).to_owned(),
                value: text,
            }),
        },

        (value, to) => Err(incompatible(from, to, value.to_string())),
    }
}

/// Parse text that is entirely a decimal integer or floating literal.
///
/// Surrounding whitespace is ignored. Integral text that fits in i64 stays whole;
/// `inf`, `NaN` and hexadecimal forms are rejected.
pub fn parse_number(text: &str) -> Option<Number> {
    let text = text.trim();
    let numeric_chars = text
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'));
    if !numeric_chars || !text.contains(|c: char| c.is_ascii_digit()) {
        return None;
    }

    if let Ok(n) = text.parse::<i64>() {
        return Some(Number::Whole(n));
    }
    text.parse::<f64>().ok().filter(|d| d.is_finite()).map(Number::Decimal)
}

fn whole(n: Number, from: ResultType) -> CoercionResult<Value> {
    n.as_whole()
        .map(|w| Value::Number(Number::Whole(w)))
        .ok_or_else(|| incompatible(from, ResultType::WholeNumber, n.to_string()))
}

fn incompatible(from: ResultType, to: ResultType, value: impl Into<String>) -> CoercionError {
    CoercionError::Incompatible {
        from,
        to,
        value: value.into(),
    }
}
