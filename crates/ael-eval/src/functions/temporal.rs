//! Date and instant functions
//!
//! Implements: toDate, toInstant, format
//!
//! Parsing without an explicit pattern uses the engine's configured formats.
//! Text that does not match the pattern is an error, never a guess.

use super::{Call, Function};
use crate::context::EvaluationContext;
use crate::error::{EvalError, EvalResult};
use ael_types::temporal::format_with;
use ael_types::{ResultType, Value};

impl Call {
    pub(super) fn eval_temporal(&self, token: &str, ctx: &mut EvaluationContext<'_>) -> EvalResult<Value> {
        use Function as F;

        match self.function {
            F::ToDate => {
                let text = self.temporal_text(ResultType::Date, ctx, token)?;
                let pattern = self.optional_string_arg(0, ctx)?;
                let formats = ctx.formats();
                formats
                    .parse_date(&text, pattern.as_deref())
                    .map(Value::Date)
                    .ok_or_else(|| {
                        let pattern = pattern.as_deref().unwrap_or(&formats.date);
                        EvalError::malformed_literal(format!("'{text}' does not match the date pattern '{pattern}'"), token)
                    })
            }
            F::ToInstant => {
                let text = self.temporal_text(ResultType::Instant, ctx, token)?;
                let pattern = self.optional_string_arg(0, ctx)?;
                let formats = ctx.formats();
                formats
                    .parse_instant(&text, pattern.as_deref())
                    .map(Value::Instant)
                    .ok_or_else(|| {
                        let pattern = formats.instant_pattern(pattern.as_deref());
                        EvalError::malformed_literal(format!("'{text}' does not match the instant pattern '{pattern}'"), token)
                    })
            }
            F::Format => {
                let subject = self.subject(token, ctx)?;
                let pattern = self.string_arg(0, ctx)?;
                let rendered = match &subject {
                    Value::Date(date) => format_with(date.format(&pattern)),
                    Value::Instant(instant) => format_with(instant.format(&pattern)),
                    other => {
                        return Err(EvalError::internal(format!("expected a date or instant, found {other:?}"), token));
                    }
                };
                rendered.map(Value::String).ok_or_else(|| {
                    EvalError::malformed_literal(format!("invalid format pattern '{pattern}' for {subject}"), token)
                })
            }
            other => Err(EvalError::internal(format!("'{other}' is not a temporal function"), token)),
        }
    }

    /// Subject text to parse; an unset subject cannot become a date
    fn temporal_text(&self, target: ResultType, ctx: &mut EvaluationContext<'_>, token: &str) -> EvalResult<String> {
        let subject = self.raw_subject(token, ctx)?;
        if subject.is_unset() {
            let token = self.subject.as_ref().map_or(token, |s| s.token());
            return Err(EvalError::UnsetValue {
                expected: target,
                token: token.to_owned(),
            });
        }
        Ok(self.coerce_subject(subject, ctx)?.into_string())
    }
}
