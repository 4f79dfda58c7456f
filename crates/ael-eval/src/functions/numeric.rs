//! Numeric functions
//!
//! Implements: plus, minus, multiply, divide, mod, gt, ge, lt, le, toNumber,
//! toDecimal, abs
//!
//! Whole-number arithmetic that overflows continues in floating point.
//! Division or modulo by zero, and any result that would be infinite or NaN,
//! is an error.

use super::{Call, Function};
use crate::context::EvaluationContext;
use crate::error::{EvalError, EvalResult};
use ael_types::{Number, Value};
use std::cmp::Ordering;

impl Call {
    pub(super) fn eval_numeric(&self, token: &str, ctx: &mut EvaluationContext<'_>) -> EvalResult<Value> {
        use Function as F;

        let subject = self.number_subject(token, ctx)?;

        let value = match self.function {
            F::ToNumber => Value::Number(subject),
            F::ToDecimal => Value::Number(subject.to_decimal()),
            F::Abs => Value::Number(subject.abs()),

            F::Plus | F::Minus | F::Multiply | F::Divide | F::Mod => {
                let other = self.number_arg(token, ctx)?;
                let (result, symbol) = match self.function {
                    F::Plus => (subject.plus(other), '+'),
                    F::Minus => (subject.minus(other), '-'),
                    F::Multiply => (subject.times(other), '*'),
                    F::Divide => (subject.divide(other), '/'),
                    _ => (subject.modulo(other), '%'),
                };
                let number = result
                    .map_err(|e| EvalError::arithmetic(format!("{e}: {subject} {symbol} {other}"), token))?;
                Value::Number(number)
            }

            F::Gt | F::Ge | F::Lt | F::Le => {
                let other = self.number_arg(token, ctx)?;
                let holds = match (self.function, subject.partial_cmp(&other)) {
                    (_, None) => false,
                    (F::Gt, Some(order)) => order == Ordering::Greater,
                    (F::Ge, Some(order)) => order != Ordering::Less,
                    (F::Lt, Some(order)) => order == Ordering::Less,
                    (_, Some(order)) => order != Ordering::Greater,
                };
                Value::Boolean(holds)
            }

            other => {
                return Err(EvalError::internal(format!("'{other}' is not a numeric function"), token));
            }
        };
        Ok(value)
    }

    fn number_subject(&self, token: &str, ctx: &mut EvaluationContext<'_>) -> EvalResult<Number> {
        let value = self.subject(token, ctx)?;
        expect_number(value, token)
    }

    fn number_arg(&self, token: &str, ctx: &mut EvaluationContext<'_>) -> EvalResult<Number> {
        let value = self.arg(0, ctx)?;
        expect_number(value, token)
    }
}

fn expect_number(value: Value, token: &str) -> EvalResult<Number> {
    match value {
        Value::Number(n) => Ok(n),
        other => Err(EvalError::internal(format!("expected a number, found {other:?}"), token)),
    }
}
