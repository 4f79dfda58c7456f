//! The compiled evaluator tree
//!
//! Each [`Evaluator`] has a fixed [`ResultType`], exclusively owns its children
//! and remembers the source token it was compiled from. Evaluation is a plain
//! recursive walk; the only state it touches lives in the [`EvaluationContext`].

use crate::context::{Candidate, EvaluationContext, SlotId};
use crate::error::{EvalError, EvalResult};
use crate::functions::Call;
use crate::iteration::Quantifier;
use ael_diagnostics::Span;
use ael_types::{ResultType, Value};

#[derive(Debug)]
pub struct Evaluator {
    kind: EvaluatorKind,
    result_type: ResultType,
    token: String,
    span: Span,
}

#[derive(Debug)]
pub enum EvaluatorKind {
    Literal(Value),
    /// Attribute reference; yields [`Value::Unset`] when the record lacks it
    Attribute(String),
    /// Text and expressions concatenated as strings
    Template(Vec<Evaluator>),
    /// The candidate currently bound to a quantifier slot
    LoopVariable(SlotId),
    Call(Box<Call>),
    Quantifier(Box<Quantifier>),
}

impl Evaluator {
    pub fn new(kind: EvaluatorKind, result_type: ResultType, token: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            result_type,
            token: token.into(),
            span,
        }
    }

    pub fn kind(&self) -> &EvaluatorKind {
        &self.kind
    }

    pub fn result_type(&self) -> ResultType {
        self.result_type
    }

    /// Source text this node was compiled from
    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn evaluate(&self, ctx: &mut EvaluationContext<'_>) -> EvalResult<Value> {
        match &self.kind {
            EvaluatorKind::Literal(value) => Ok(value.clone()),
            EvaluatorKind::Attribute(name) => Ok(ctx.lookup(name)),
            EvaluatorKind::Template(parts) => {
                let mut out = String::new();
                for part in parts {
                    out.push_str(&part.evaluate(ctx)?.into_string());
                }
                Ok(Value::String(out))
            }
            EvaluatorKind::LoopVariable(slot) => match ctx.cursor(*slot).and_then(|c| c.current()) {
                Some(Candidate::Attribute(name)) => {
                    let name = name.clone();
                    Ok(ctx.lookup(&name))
                }
                Some(Candidate::Value(value)) => Ok(Value::String(value.clone())),
                None => Err(EvalError::internal(format!("loop variable {slot} is not bound"), &self.token)),
            },
            EvaluatorKind::Call(call) => call.evaluate(&self.token, ctx),
            EvaluatorKind::Quantifier(quantifier) => quantifier.evaluate(&self.token, ctx),
        }
    }

    /// How many more evaluations this subtree needs before it has seen every
    /// binding of the loop variables it reads.
    ///
    /// Only loop variables report a non-zero count; a quantifier node folds all
    /// of its own bindings within a single evaluation and so reports zero.
    pub fn evaluations_remaining(&self, ctx: &EvaluationContext<'_>) -> usize {
        match &self.kind {
            EvaluatorKind::Literal(_) | EvaluatorKind::Attribute(_) | EvaluatorKind::Quantifier(_) => 0,
            EvaluatorKind::LoopVariable(slot) => ctx.cursor(*slot).map_or(0, |c| c.remaining()),
            EvaluatorKind::Template(parts) => parts.iter().map(|p| p.evaluations_remaining(ctx)).max().unwrap_or(0),
            EvaluatorKind::Call(call) => call
                .subject
                .iter()
                .chain(call.args.iter())
                .map(|child| child.evaluations_remaining(ctx))
                .max()
                .unwrap_or(0),
        }
    }

    /// Visit this node and all of its descendants, parents first
    pub fn walk(&self, visit: &mut impl FnMut(&Evaluator)) {
        visit(self);
        match &self.kind {
            EvaluatorKind::Literal(_) | EvaluatorKind::Attribute(_) | EvaluatorKind::LoopVariable(_) => {}
            EvaluatorKind::Template(parts) => parts.iter().for_each(|p| p.walk(visit)),
            EvaluatorKind::Call(call) => {
                call.subject.iter().chain(call.args.iter()).for_each(|c| c.walk(visit));
            }
            EvaluatorKind::Quantifier(quantifier) => quantifier.children().for_each(|c| c.walk(visit)),
        }
    }
}
