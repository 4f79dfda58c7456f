//! Functions that observe unset attributes
//!
//! Implements: isNull, notNull, isEmpty, replaceNull, replaceEmpty, equals,
//! equalsIgnoreCase
//!
//! These receive the subject without coercion, so an unset attribute is
//! distinguishable from an empty string.

use super::{Call, Function};
use crate::context::EvaluationContext;
use crate::error::{EvalError, EvalResult};
use ael_types::Value;

impl Call {
    pub(super) fn eval_nullity(&self, token: &str, ctx: &mut EvaluationContext<'_>) -> EvalResult<Value> {
        use Function as F;

        let subject = self.raw_subject(token, ctx)?;

        Ok(match self.function {
            F::IsNull => Value::Boolean(subject.is_unset()),
            F::NotNull => Value::Boolean(!subject.is_unset()),
            F::IsEmpty => Value::Boolean(is_empty(&subject)),
            F::ReplaceNull => {
                if subject.is_unset() {
                    Value::String(self.string_arg(0, ctx)?)
                } else {
                    Value::String(subject.into_string())
                }
            }
            F::ReplaceEmpty => {
                if is_empty(&subject) {
                    Value::String(self.string_arg(0, ctx)?)
                } else {
                    Value::String(subject.into_string())
                }
            }
            F::Equals => Value::Boolean(values_equal(&subject, &self.arg(0, ctx)?)),
            F::EqualsIgnoreCase => {
                let other = self.arg(0, ctx)?;
                let equal = match (subject.is_unset(), other.is_unset()) {
                    (true, true) => true,
                    (false, false) => subject.to_string().to_lowercase() == other.to_string().to_lowercase(),
                    _ => false,
                };
                Value::Boolean(equal)
            }
            other => {
                return Err(EvalError::internal(format!("'{other}' is not a null-aware function"), token));
            }
        })
    }
}

/// Unset, or text that is blank
fn is_empty(value: &Value) -> bool {
    match value {
        Value::Unset => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// Numbers compare numerically, other values of the same kind by value, and
/// values of different kinds by their text.
pub(crate) fn values_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Unset, Value::Unset) => true,
        (Value::Unset, _) | (_, Value::Unset) => false,
        (Value::Number(a), Value::Number(b)) => a == b,
        (Value::Boolean(_), Value::Boolean(_))
        | (Value::String(_), Value::String(_))
        | (Value::Date(_), Value::Date(_))
        | (Value::Instant(_), Value::Instant(_)) => left == right,
        _ => left.to_string() == right.to_string(),
    }
}
