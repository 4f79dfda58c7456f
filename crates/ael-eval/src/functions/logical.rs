//! Boolean functions
//!
//! Implements: and, or, not, ifElse
//!
//! `and` and `or` only evaluate their argument when the subject does not
//! already decide the result; `ifElse` only evaluates the branch it returns.

use super::{Call, Function};
use crate::context::EvaluationContext;
use crate::error::{EvalError, EvalResult};
use ael_types::Value;

impl Call {
    pub(super) fn eval_logical(&self, token: &str, ctx: &mut EvaluationContext<'_>) -> EvalResult<Value> {
        use Function as F;

        let subject = self.bool_subject(token, ctx)?;

        let value = match self.function {
            F::Not => !subject,
            F::And if !subject => false,
            F::Or if subject => true,
            F::And | F::Or => self.bool_arg(0, token, ctx)?,
            F::IfElse => {
                let branch = if subject { 0 } else { 1 };
                return Ok(Value::String(self.string_arg(branch, ctx)?));
            }
            other => {
                return Err(EvalError::internal(format!("'{other}' is not a boolean function"), token));
            }
        };
        Ok(Value::Boolean(value))
    }

    fn bool_subject(&self, token: &str, ctx: &mut EvaluationContext<'_>) -> EvalResult<bool> {
        let value = self.subject(token, ctx)?;
        value
            .as_bool()
            .ok_or_else(|| EvalError::internal(format!("expected a boolean, found {value:?}"), token))
    }

    fn bool_arg(&self, index: usize, token: &str, ctx: &mut EvaluationContext<'_>) -> EvalResult<bool> {
        let value = self.arg(index, ctx)?;
        value
            .as_bool()
            .ok_or_else(|| EvalError::internal(format!("expected a boolean, found {value:?}"), token))
    }
}
