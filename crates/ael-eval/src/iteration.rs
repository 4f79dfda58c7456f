//! Quantifiers: folding one expression over a dynamic set of bindings
//!
//! A quantifier binds its slot to the first candidate, evaluates the body,
//! folds the value and then asks the body how many evaluations it still has
//! pending. While that count is non-zero the cursor is advanced and the body
//! re-evaluated. `any` stops at the first `true`, `all` at the first `false`.

use crate::context::{Candidate, EvaluationContext, IterationCursor, SlotId};
use crate::error::{EvalError, EvalResult};
use crate::evaluator::Evaluator;
use ael_types::{Number, Value};
use regex::Regex;
use std::ops::ControlFlow;

#[derive(Debug)]
pub struct Quantifier {
    pub slot: SlotId,
    pub source: CandidateSource,
    pub fold: Fold,
    /// Evaluated once per candidate with the slot bound
    pub body: Evaluator,
}

#[derive(Debug)]
pub enum CandidateSource {
    /// Attribute names, in the order written
    Named(Vec<String>),
    /// Attributes whose names fully match any pattern, in name order
    Matching(Vec<Regex>),
    /// Pieces of a value split on a delimiter
    Delineated { value: Evaluator, delimiter: Evaluator },
}

#[derive(Debug)]
pub enum Fold {
    Any,
    All,
    /// Concatenate the text of every set body value
    Join(Evaluator),
    /// Count `true` bodies, or set values for non-boolean bodies
    Count,
}

impl Quantifier {
    pub(crate) fn evaluate(&self, token: &str, ctx: &mut EvaluationContext<'_>) -> EvalResult<Value> {
        let candidates = self.candidates(ctx)?;
        let mut acc = self.accumulator(ctx)?;

        let Some(cursor) = IterationCursor::start(candidates) else {
            log::trace!("{token}: no candidates");
            return Ok(acc.finish());
        };
        ctx.bind(self.slot, cursor);

        let result = self.drive(&mut acc, token, ctx);
        ctx.release(self.slot);
        result
    }

    fn drive(&self, acc: &mut Accumulator, token: &str, ctx: &mut EvaluationContext<'_>) -> EvalResult<Value> {
        loop {
            let value = self.body.evaluate(ctx)?;
            ctx.record_iteration();
            log::trace!("{token}: slot {} -> {value:?}", self.slot);

            if let ControlFlow::Break(result) = acc.push(value, token)? {
                log::trace!("{token}: early exit with {result:?}");
                return Ok(result);
            }
            if self.body.evaluations_remaining(ctx) == 0 || !ctx.advance(self.slot) {
                return Ok(acc.finish());
            }
        }
    }

    fn candidates(&self, ctx: &mut EvaluationContext<'_>) -> EvalResult<Vec<Candidate>> {
        Ok(match &self.source {
            CandidateSource::Named(names) => names.iter().cloned().map(Candidate::Attribute).collect(),
            CandidateSource::Matching(patterns) => {
                let attributes = ctx.attributes();
                let mut names: Vec<String> = patterns.iter().flat_map(|p| attributes.names_matching(p)).collect();
                names.sort_unstable();
                names.dedup();
                names.into_iter().map(Candidate::Attribute).collect()
            }
            CandidateSource::Delineated { value, delimiter } => {
                let text = value.evaluate(ctx)?.into_string();
                let delimiter = delimiter.evaluate(ctx)?.into_string();
                if text.is_empty() {
                    Vec::new()
                } else if delimiter.is_empty() {
                    vec![Candidate::Value(text)]
                } else {
                    text.split(delimiter.as_str()).map(|piece| Candidate::Value(piece.to_owned())).collect()
                }
            }
        })
    }

    fn accumulator(&self, ctx: &mut EvaluationContext<'_>) -> EvalResult<Accumulator> {
        Ok(match &self.fold {
            Fold::Any => Accumulator::Any,
            Fold::All => Accumulator::All,
            Fold::Join(separator) => Accumulator::Join {
                separator: separator.evaluate(ctx)?.into_string(),
                out: String::new(),
                empty: true,
            },
            Fold::Count => Accumulator::Count(0),
        })
    }

    pub(crate) fn children(&self) -> impl Iterator<Item = &Evaluator> {
        let (value, delimiter) = match &self.source {
            CandidateSource::Delineated { value, delimiter } => (Some(value), Some(delimiter)),
            _ => (None, None),
        };
        let separator = match &self.fold {
            Fold::Join(separator) => Some(separator),
            _ => None,
        };
        value.into_iter().chain(delimiter).chain(separator).chain(std::iter::once(&self.body))
    }
}

enum Accumulator {
    Any,
    All,
    Join { separator: String, out: String, empty: bool },
    Count(i64),
}

impl Accumulator {
    fn push(&mut self, value: Value, token: &str) -> EvalResult<ControlFlow<Value>> {
        match self {
            Self::Any | Self::All => {
                let Some(b) = value.as_bool() else {
                    return Err(EvalError::internal(format!("predicate produced {value:?}"), token));
                };
                let stop_on = matches!(self, Self::Any);
                if b == stop_on {
                    return Ok(ControlFlow::Break(Value::Boolean(stop_on)));
                }
            }
            Self::Join { separator, out, empty } => {
                if !value.is_unset() {
                    if !*empty {
                        out.push_str(separator);
                    }
                    out.push_str(&value.into_string());
                    *empty = false;
                }
            }
            Self::Count(n) => {
                let counted = match value {
                    Value::Boolean(b) => b,
                    Value::Unset => false,
                    _ => true,
                };
                if counted {
                    *n += 1;
                }
            }
        }
        Ok(ControlFlow::Continue(()))
    }

    fn finish(&mut self) -> Value {
        match self {
            Self::Any => Value::Boolean(false),
            Self::All => Value::Boolean(true),
            Self::Join { out, .. } => Value::String(std::mem::take(out)),
            Self::Count(n) => Value::Number(Number::Whole(*n)),
        }
    }
}
