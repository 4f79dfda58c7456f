//! Compiled expressions, ready to be evaluated against records

use crate::context::EvaluationContext;
use crate::error::{EvalError, EvalResult};
use crate::evaluator::Evaluator;
use crate::record::AttributeLookup;
use ael_types::{ResultType, TemporalFormats, Value, coerce};

/// An immutable, type-checked expression.
///
/// Evaluation only reads the tree; all per-evaluation state lives in a fresh
/// [`EvaluationContext`], so one compiled expression can be shared across
/// threads and evaluated concurrently.
#[derive(Debug)]
pub struct CompiledExpression {
    source: String,
    root: Evaluator,
    formats: TemporalFormats,
    slots: usize,
    referenced: Vec<String>,
}

impl CompiledExpression {
    pub(crate) fn new(
        source: &str,
        root: Evaluator,
        formats: TemporalFormats,
        slots: usize,
        referenced: Vec<String>,
    ) -> Self {
        Self {
            source: source.to_owned(),
            root,
            formats,
            slots,
            referenced,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn result_type(&self) -> ResultType {
        self.root.result_type()
    }

    /// Whether the result can be read as a boolean (BOOLEAN, or STRING parsed as one)
    pub fn is_valid_for_boolean(&self) -> bool {
        matches!(self.result_type(), ResultType::Boolean | ResultType::String)
    }

    /// Attribute names the expression reads directly, sorted.
    ///
    /// Attributes reached through `anyMatchingAttribute`-style patterns are not
    /// known until evaluation and are not listed.
    pub fn referenced_attributes(&self) -> &[String] {
        &self.referenced
    }

    pub fn root(&self) -> &Evaluator {
        &self.root
    }

    pub fn formats(&self) -> &TemporalFormats {
        &self.formats
    }

    /// A fresh context for evaluating this expression against `record`
    pub fn context<'a>(&'a self, record: &'a dyn AttributeLookup) -> EvaluationContext<'a> {
        let mut ctx = EvaluationContext::new(record, &self.formats);
        ctx.ensure_slots(self.slots);
        ctx
    }

    /// Evaluate against one record.
    ///
    /// An unset result is returned as the empty string.
    pub fn evaluate(&self, record: &dyn AttributeLookup) -> EvalResult<Value> {
        let mut ctx = self.context(record);
        self.evaluate_in(&mut ctx)
    }

    /// Evaluate with a caller-supplied context, e.g. one with a pinned clock
    pub fn evaluate_in(&self, ctx: &mut EvaluationContext<'_>) -> EvalResult<Value> {
        ctx.ensure_slots(self.slots);
        let value = self.root.evaluate(ctx)?;

        let pending = self.root.evaluations_remaining(ctx);
        if pending != 0 {
            return Err(EvalError::internal(
                format!("{pending} loop binding(s) left unevaluated at the root"),
                &self.source,
            ));
        }

        log::trace!("{:?} -> {value:?} after {} iteration(s)", self.source, ctx.iterations());
        Ok(match value {
            Value::Unset => Value::String(String::new()),
            value => value,
        })
    }

    /// Evaluate and read the result as a boolean
    pub fn evaluate_boolean(&self, record: &dyn AttributeLookup) -> EvalResult<bool> {
        if !self.is_valid_for_boolean() {
            return Err(EvalError::type_coercion(
                format!("a {} expression cannot be read as a boolean", self.result_type()),
                &self.source,
            ));
        }
        let value = self.evaluate(record)?;
        let value = coerce(value, ResultType::Boolean, &self.formats)
            .map_err(|e| EvalError::from_coercion(e, &self.source))?;
        value
            .as_bool()
            .ok_or_else(|| EvalError::internal(format!("{value:?} is not a boolean"), &self.source))
    }

    /// Evaluate and render the result as text
    pub fn evaluate_string(&self, record: &dyn AttributeLookup) -> EvalResult<String> {
        Ok(self.evaluate(record)?.into_string())
    }
}
