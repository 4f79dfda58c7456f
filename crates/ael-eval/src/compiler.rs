//! Lowering of parse trees into typed evaluator trees
//!
//! Lowering type-checks every node as it is built: a child whose type cannot be
//! coerced to what its parent needs is rejected here, so an evaluator tree that
//! exists is always well-typed.

use crate::compiled::CompiledExpression;
use crate::config::EngineConfig;
use crate::error::{CompileError, CompileResult, Site};
use crate::evaluator::{Evaluator, EvaluatorKind};
use crate::functions::{Call, Function, QuantifierKind, compile_pattern};
use crate::iteration::{CandidateSource, Fold, Quantifier};
use ael_ast::{Argument, Expression, FunctionCall, Identifier, Literal, Segment, Span, Spanned, Subject, Template};
use ael_types::{ResultType, TemporalFormats, Value};
use regex::Regex;
use smallvec::SmallVec;
use std::collections::BTreeSet;

/// Builds [`CompiledExpression`]s
///
/// ```ignore
/// let compiler = Compiler::with_config(&EngineConfig::from_env())?
///     .declare_attributes(["filename", "size"]);
/// let expr = compiler.compile("${size:gt(1024)}")?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct Compiler {
    formats: TemporalFormats,
    declared: Option<BTreeSet<String>>,
}

impl Compiler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: &EngineConfig) -> CompileResult<Self> {
        Ok(Self {
            formats: config.temporal_formats()?,
            declared: None,
        })
    }

    /// Restrict attribute references to these names
    pub fn declare_attributes<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.declared = Some(names.into_iter().map(Into::into).collect());
        self
    }

    pub fn formats(&self) -> &TemporalFormats {
        &self.formats
    }

    pub fn compile(&self, source: &str) -> CompileResult<CompiledExpression> {
        let template = ael_parser::parse(source)?;

        let mut lowering = Lowering {
            source,
            declared: self.declared.as_ref(),
            slots: 0,
            referenced: BTreeSet::new(),
        };
        let root = lowering.template(&template)?;

        log::debug!(
            "compiled {:?}: {} with {} iteration slot(s)",
            source,
            root.result_type(),
            lowering.slots
        );

        Ok(CompiledExpression::new(
            source,
            root,
            self.formats.clone(),
            lowering.slots,
            lowering.referenced.into_iter().collect(),
        ))
    }
}

struct Lowering<'c> {
    source: &'c str,
    declared: Option<&'c BTreeSet<String>>,
    slots: usize,
    referenced: BTreeSet<String>,
}

impl<'c> Lowering<'c> {
    fn site(&self, span: Span) -> Site {
        Site::new(self.source, span)
    }

    fn token(&self, span: Span) -> &'c str {
        span.slice(self.source)
    }

    fn template(&mut self, template: &Template) -> CompileResult<Evaluator> {
        if let [only] = template.segments.as_slice() {
            if let Segment::Expression(expr) = &only.inner {
                return self.expression(expr);
            }
        }

        let mut parts = Vec::with_capacity(template.segments.len());
        for segment in &template.segments {
            let part = match &segment.inner {
                Segment::Text(text) => Evaluator::new(
                    EvaluatorKind::Literal(Value::String(text.clone())),
                    ResultType::String,
                    self.token(segment.span),
                    segment.span,
                ),
                Segment::Expression(expr) => self.expression(expr)?,
            };
            parts.push(part);
        }

        let span = Span::new(0, self.source.len());
        Ok(Evaluator::new(EvaluatorKind::Template(parts), ResultType::String, self.source, span))
    }

    fn expression(&mut self, expr: &Expression) -> CompileResult<Evaluator> {
        let span = expr.subject.span;
        let subject = match &expr.subject.inner {
            Subject::Attribute(name) => {
                self.reference(name, span)?;
                Evaluator::new(EvaluatorKind::Attribute(name.clone()), ResultType::String, self.token(span), span)
            }
            Subject::Function(call) => {
                let function = self.resolve(&call.name)?;
                if let Some((kind, all)) = function.quantifier() {
                    return self.quantifier(function, kind, all, call, expr);
                }
                if function.is_reducer() {
                    return Err(CompileError::invalid_quantifier(
                        format!("'{function}' must follow allAttributes, allMatchingAttributes or allDelineatedValues"),
                        self.site(span),
                    ));
                }
                if function.signature().subject.is_some() {
                    return Err(CompileError::MissingSubject {
                        function: function.name(),
                        site: self.site(span),
                    });
                }
                self.call(function, None, call, span)?
            }
        };

        self.chain(subject, &expr.chain)
    }

    fn chain(&mut self, mut current: Evaluator, calls: &[Spanned<FunctionCall>]) -> CompileResult<Evaluator> {
        for call in calls {
            let function = self.resolve(&call.name)?;
            if function.is_reducer() {
                return Err(CompileError::invalid_quantifier(
                    format!("'{function}' can only reduce a multi-attribute subject"),
                    self.site(call.span),
                ));
            }
            if function.signature().subject.is_none() {
                return Err(CompileError::UnexpectedSubject {
                    function: function.name(),
                    site: self.site(call.span),
                });
            }
            current = self.call(function, Some(current), call, call.span)?;
        }
        Ok(current)
    }

    /// Record an attribute reference, rejecting undeclared names
    fn reference(&mut self, name: &str, span: Span) -> CompileResult<()> {
        if let Some(declared) = self.declared {
            if !declared.contains(name) {
                return Err(CompileError::UndeclaredAttribute {
                    name: name.to_owned(),
                    site: self.site(span),
                });
            }
        }
        self.referenced.insert(name.to_owned());
        Ok(())
    }

    fn resolve(&self, name: &Spanned<Identifier>) -> CompileResult<Function> {
        Function::from_name(name.as_str()).ok_or_else(|| CompileError::UnknownFunction {
            name: name.name.clone(),
            site: self.site(name.span),
        })
    }

    fn check_arity(&self, function: Function, call: &FunctionCall, span: Span) -> CompileResult<()> {
        let signature = function.signature();
        if signature.accepts_arity(call.args.len()) {
            return Ok(());
        }
        Err(CompileError::ArityMismatch {
            function: function.name(),
            expected: signature.describe_arity(),
            found: call.args.len(),
            site: self.site(span),
        })
    }

    fn call(
        &mut self,
        function: Function,
        subject: Option<Evaluator>,
        call: &FunctionCall,
        span: Span,
    ) -> CompileResult<Evaluator> {
        self.check_arity(function, call, span)?;
        let signature = function.signature();

        let subject_target = match (&subject, signature.subject) {
            (Some(subject), Some(expect)) => expect.resolve(subject.result_type()).ok_or_else(|| {
                CompileError::type_mismatch(
                    format!("{expect} as the subject of {function}()"),
                    subject.result_type(),
                    self.site(subject.span()),
                )
            })?,
            _ => None,
        };

        let mut args = SmallVec::new();
        let mut arg_targets = SmallVec::new();
        for (index, arg) in call.args.iter().enumerate() {
            let evaluator = self.argument(arg)?;
            let expect = signature.param(index);
            let target = expect.resolve(evaluator.result_type()).ok_or_else(|| {
                CompileError::type_mismatch(
                    format!("{expect} for argument {} of {function}()", index + 1),
                    evaluator.result_type(),
                    self.site(arg.span),
                )
            })?;
            args.push(evaluator);
            arg_targets.push(target);
        }

        let pattern = self.literal_pattern(function, call)?;
        let result_type = signature
            .returns
            .or_else(|| args.first().map(Evaluator::result_type))
            .unwrap_or(ResultType::String);

        let call = Call {
            function,
            subject,
            subject_target,
            args,
            arg_targets,
            pattern,
        };
        Ok(Evaluator::new(EvaluatorKind::Call(Box::new(call)), result_type, self.token(span), span))
    }

    fn argument(&mut self, arg: &Spanned<Argument>) -> CompileResult<Evaluator> {
        match &arg.inner {
            Argument::Literal(literal) => Ok(self.literal(literal, arg.span)),
            Argument::Expression(expr) => self.expression(expr),
        }
    }

    fn literal(&self, literal: &Literal, span: Span) -> Evaluator {
        let (value, result_type) = match literal {
            Literal::String(s) => (Value::String(s.clone()), ResultType::String),
            Literal::WholeNumber(n) => (Value::from(*n), ResultType::WholeNumber),
            Literal::Decimal(d) => (Value::from(*d), ResultType::Number),
            Literal::Boolean(b) => (Value::Boolean(*b), ResultType::Boolean),
        };
        Evaluator::new(EvaluatorKind::Literal(value), result_type, self.token(span), span)
    }

    /// Precompile the regex argument when it is a string literal
    fn literal_pattern(&self, function: Function, call: &FunctionCall) -> CompileResult<Option<Regex>> {
        let Some(anchored) = function.pattern_argument() else {
            return Ok(None);
        };
        let Some(arg) = call.args.first() else {
            return Ok(None);
        };
        let Argument::Literal(Literal::String(pattern)) = &arg.inner else {
            return Ok(None);
        };
        compile_pattern(pattern, anchored)
            .map(Some)
            .map_err(|e| self.invalid_pattern(pattern, &e, arg.span))
    }

    fn invalid_pattern(&self, pattern: &str, err: &regex::Error, span: Span) -> CompileError {
        CompileError::InvalidPattern {
            pattern: pattern.to_owned(),
            message: err.to_string(),
            site: self.site(span),
        }
    }

    /// Lower `anyX(...)`/`allX(...)` together with the chain that follows it.
    ///
    /// Calls up to the first reducer form the per-candidate body; calls after it
    /// apply to the reduced value.
    fn quantifier(
        &mut self,
        function: Function,
        kind: QuantifierKind,
        all: bool,
        call: &FunctionCall,
        expr: &Expression,
    ) -> CompileResult<Evaluator> {
        let subject_span = expr.subject.span;
        self.check_arity(function, call, subject_span)?;

        let source = match kind {
            QuantifierKind::Named => {
                let mut names = Vec::with_capacity(call.args.len());
                for (name, span) in self.literal_strings(function, call)? {
                    self.reference(&name, span)?;
                    names.push(name);
                }
                CandidateSource::Named(names)
            }
            QuantifierKind::Matching => {
                let mut patterns = Vec::with_capacity(call.args.len());
                for (pattern, span) in self.literal_strings(function, call)? {
                    let regex = compile_pattern(&pattern, true).map_err(|e| self.invalid_pattern(&pattern, &e, span))?;
                    patterns.push(regex);
                }
                CandidateSource::Matching(patterns)
            }
            QuantifierKind::Delineated => CandidateSource::Delineated {
                value: self.argument(&call.args[0])?,
                delimiter: self.argument(&call.args[1])?,
            },
        };

        let slot = self.slots;
        self.slots += 1;

        let reducer_at = expr
            .chain
            .iter()
            .position(|c| Function::from_name(c.name.as_str()).is_some_and(Function::is_reducer));
        let body_calls = &expr.chain[..reducer_at.unwrap_or(expr.chain.len())];

        let variable = Evaluator::new(
            EvaluatorKind::LoopVariable(slot),
            ResultType::String,
            self.token(subject_span),
            subject_span,
        );
        let body = self.chain(variable, body_calls)?;
        let body_end = body_calls.last().map_or(subject_span, |c| c.span);

        let (fold, result_type, span) = match reducer_at {
            None => {
                if body.result_type() != ResultType::Boolean {
                    let message = if body_calls.is_empty() {
                        format!("'{function}' needs a boolean predicate such as :equals(...) or a reducer such as :join(...)")
                    } else {
                        format!("the predicate applied by '{function}' must be BOOLEAN, found {}", body.result_type())
                    };
                    return Err(CompileError::invalid_quantifier(message, self.site(subject_span.merge(body_end))));
                }
                let fold = if all { Fold::All } else { Fold::Any };
                (fold, ResultType::Boolean, subject_span.merge(body_end))
            }
            Some(index) => {
                let reducer_call = &expr.chain[index];
                let reducer = self.resolve(&reducer_call.name)?;
                if !all {
                    return Err(CompileError::invalid_quantifier(
                        format!("'{reducer}' cannot reduce '{function}'; use an all* subject"),
                        self.site(reducer_call.span),
                    ));
                }
                self.check_arity(reducer, reducer_call, reducer_call.span)?;
                let span = subject_span.merge(reducer_call.span);
                if reducer == Function::Join {
                    let separator = self.argument(&reducer_call.args[0])?;
                    (Fold::Join(separator), ResultType::String, span)
                } else {
                    (Fold::Count, ResultType::WholeNumber, span)
                }
            }
        };

        let quantifier = Quantifier {
            slot,
            source,
            fold,
            body,
        };
        let node = Evaluator::new(
            EvaluatorKind::Quantifier(Box::new(quantifier)),
            result_type,
            self.token(span),
            span,
        );

        match reducer_at {
            Some(index) => self.chain(node, &expr.chain[index + 1..]),
            None => Ok(node),
        }
    }

    /// Arguments that must be string literals, e.g. attribute names
    fn literal_strings(&self, function: Function, call: &FunctionCall) -> CompileResult<Vec<(String, Span)>> {
        call.args
            .iter()
            .map(|arg| match &arg.inner {
                Argument::Literal(Literal::String(s)) => Ok((s.clone(), arg.span)),
                _ => Err(CompileError::invalid_quantifier(
                    format!("arguments of '{function}' must be string literals"),
                    self.site(arg.span),
                )),
            })
            .collect()
    }
}
