//! Built-in function catalogue
//!
//! Every function has a fixed [`Signature`] the compiler checks calls against.
//! Evaluation is split by category:
//!
//! - `string`: text manipulation, searching and regex matching
//! - `nullity`: functions that see unset attributes directly
//! - `numeric`: arithmetic and comparisons
//! - `logical`: short-circuit boolean operators
//! - `temporal`: date/instant conversion and formatting
//!
//! The quantifier subjects and the `join`/`count` reducers are not evaluated
//! here; the compiler lowers them into quantifier nodes.

mod logical;
mod nullity;
mod numeric;
mod string;
mod temporal;

use crate::context::EvaluationContext;
use crate::error::{EvalError, EvalResult};
use crate::evaluator::Evaluator;
use ael_types::{ResultType, Value, coerce};
use regex::Regex;
use smallvec::SmallVec;
use std::borrow::Cow;
use std::fmt;

/// What a function accepts in one position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expect {
    /// Any type, passed through without coercion
    Any,
    Type(ResultType),
    /// The first listed type the actual type can be coerced to
    OneOf(&'static [ResultType]),
}

impl Expect {
    /// The type a value of `actual` is coerced to, `None` when it cannot be
    pub fn resolve(self, actual: ResultType) -> Option<Option<ResultType>> {
        match self {
            Self::Any => Some(None),
            Self::Type(target) => actual.can_coerce_to(target).then_some(Some(target)),
            Self::OneOf(targets) => {
                if targets.contains(&actual) {
                    return Some(Some(actual));
                }
                targets.iter().find(|t| actual.can_coerce_to(**t)).map(|t| Some(*t))
            }
        }
    }
}

impl fmt::Display for Expect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("any type"),
            Self::Type(ty) => write!(f, "{ty}"),
            Self::OneOf(types) => {
                let names: Vec<_> = types.iter().map(ResultType::name).collect();
                f.write_str(&names.join(" or "))
            }
        }
    }
}

/// Fixed shape of a function call
#[derive(Debug, Clone, Copy)]
pub struct Signature {
    /// `None` for functions that start an expression instead of following a subject
    pub subject: Option<Expect>,
    pub params: &'static [Expect],
    /// How many trailing params may be omitted
    pub optional: usize,
    /// Whether the last param repeats
    pub variadic: bool,
    /// `None` when the result takes the type of the first argument
    pub returns: Option<ResultType>,
}

impl Signature {
    const fn new(subject: Option<Expect>, params: &'static [Expect], returns: ResultType) -> Self {
        Self {
            subject,
            params,
            optional: 0,
            variadic: false,
            returns: Some(returns),
        }
    }

    const fn optional(mut self, optional: usize) -> Self {
        self.optional = optional;
        self
    }

    const fn variadic(mut self) -> Self {
        self.variadic = true;
        self
    }

    pub fn min_args(&self) -> usize {
        self.params.len() - self.optional
    }

    pub fn max_args(&self) -> Option<usize> {
        (!self.variadic).then_some(self.params.len())
    }

    pub fn accepts_arity(&self, count: usize) -> bool {
        count >= self.min_args() && self.max_args().is_none_or(|max| count <= max)
    }

    pub fn describe_arity(&self) -> String {
        match (self.min_args(), self.max_args()) {
            (min, None) => format!("at least {min}"),
            (min, Some(max)) if min == max => min.to_string(),
            (min, Some(max)) => format!("{min} to {max}"),
        }
    }

    /// Expectation for the argument at `index`
    pub fn param(&self, index: usize) -> Expect {
        self.params
            .get(index)
            .or(self.params.last())
            .copied()
            .unwrap_or(Expect::Any)
    }
}

const STRING: Expect = Expect::Type(ResultType::String);
const BOOLEAN: Expect = Expect::Type(ResultType::Boolean);
const WHOLE: Expect = Expect::Type(ResultType::WholeNumber);
const NUMBER: Expect = Expect::Type(ResultType::Number);
const TEMPORAL: Expect = Expect::OneOf(&[ResultType::Instant, ResultType::Date]);

macro_rules! functions {
    ($($variant:ident => $name:literal,)*) => {
        /// Every built-in function
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Function {
            $($variant,)*
        }

        impl Function {
            pub const ALL: &'static [Function] = &[$(Function::$variant,)*];

            pub const fn name(self) -> &'static str {
                match self {
                    $(Function::$variant => $name,)*
                }
            }

            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $($name => Some(Function::$variant),)*
                    _ => None,
                }
            }
        }
    };
}

functions! {
    Literal => "literal",
    Now => "now",
    AnyAttribute => "anyAttribute",
    AllAttributes => "allAttributes",
    AnyMatchingAttribute => "anyMatchingAttribute",
    AllMatchingAttributes => "allMatchingAttributes",
    AnyDelineatedValue => "anyDelineatedValue",
    AllDelineatedValues => "allDelineatedValues",

    ToUpper => "toUpper",
    ToLower => "toLower",
    Trim => "trim",
    Length => "length",
    Substring => "substring",
    SubstringBefore => "substringBefore",
    SubstringBeforeLast => "substringBeforeLast",
    SubstringAfter => "substringAfter",
    SubstringAfterLast => "substringAfterLast",
    Prepend => "prepend",
    Append => "append",
    Replace => "replace",
    ReplaceFirst => "replaceFirst",
    ReplaceAll => "replaceAll",
    PadLeft => "padLeft",
    PadRight => "padRight",
    IndexOf => "indexOf",
    LastIndexOf => "lastIndexOf",
    StartsWith => "startsWith",
    EndsWith => "endsWith",
    Contains => "contains",
    Matches => "matches",
    Find => "find",
    In => "in",
    EqualsIgnoreCase => "equalsIgnoreCase",

    IsNull => "isNull",
    NotNull => "notNull",
    IsEmpty => "isEmpty",
    ReplaceNull => "replaceNull",
    ReplaceEmpty => "replaceEmpty",
    Equals => "equals",

    Plus => "plus",
    Minus => "minus",
    Multiply => "multiply",
    Divide => "divide",
    Mod => "mod",
    Gt => "gt",
    Ge => "ge",
    Lt => "lt",
    Le => "le",
    ToNumber => "toNumber",
    ToDecimal => "toDecimal",
    Abs => "abs",

    And => "and",
    Or => "or",
    Not => "not",
    IfElse => "ifElse",

    ToDate => "toDate",
    ToInstant => "toInstant",
    Format => "format",

    Join => "join",
    Count => "count",
}

/// The multi-valued subject functions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantifierKind {
    Named,
    Matching,
    Delineated,
}

impl Function {
    pub const fn signature(self) -> Signature {
        use Function as F;
        use ResultType as T;

        let s = Some(STRING);
        match self {
            F::Literal => Signature {
                subject: None,
                params: &[Expect::Any],
                optional: 0,
                variadic: false,
                returns: None,
            },
            F::Now => Signature::new(None, &[], T::Instant),
            F::AnyAttribute | F::AnyMatchingAttribute => Signature::new(None, &[STRING], T::Boolean).variadic(),
            F::AllAttributes | F::AllMatchingAttributes => Signature::new(None, &[STRING], T::Boolean).variadic(),
            F::AnyDelineatedValue | F::AllDelineatedValues => Signature::new(None, &[STRING, STRING], T::Boolean),

            F::ToUpper | F::ToLower | F::Trim => Signature::new(s, &[], T::String),
            F::Length => Signature::new(s, &[], T::WholeNumber),
            F::Substring => Signature::new(s, &[WHOLE, WHOLE], T::String).optional(1),
            F::SubstringBefore | F::SubstringBeforeLast | F::SubstringAfter | F::SubstringAfterLast => {
                Signature::new(s, &[STRING], T::String)
            }
            F::Prepend | F::Append => Signature::new(s, &[STRING], T::String),
            F::Replace | F::ReplaceFirst | F::ReplaceAll => Signature::new(s, &[STRING, STRING], T::String),
            F::PadLeft | F::PadRight => Signature::new(s, &[WHOLE, STRING], T::String).optional(1),
            F::IndexOf | F::LastIndexOf => Signature::new(s, &[STRING], T::WholeNumber),
            F::StartsWith | F::EndsWith | F::Contains | F::Matches | F::Find | F::EqualsIgnoreCase => {
                Signature::new(s, &[STRING], T::Boolean)
            }
            F::In => Signature::new(s, &[STRING], T::Boolean).variadic(),

            F::IsNull | F::NotNull | F::IsEmpty => Signature::new(Some(Expect::Any), &[], T::Boolean),
            F::ReplaceNull | F::ReplaceEmpty => Signature::new(Some(Expect::Any), &[STRING], T::String),
            F::Equals => Signature::new(Some(Expect::Any), &[Expect::Any], T::Boolean),

            F::Plus | F::Minus | F::Multiply | F::Divide | F::Mod => Signature::new(Some(NUMBER), &[NUMBER], T::Number),
            F::Gt | F::Ge | F::Lt | F::Le => Signature::new(Some(NUMBER), &[NUMBER], T::Boolean),
            F::ToNumber | F::ToDecimal | F::Abs => Signature::new(Some(NUMBER), &[], T::Number),

            F::And | F::Or => Signature::new(Some(BOOLEAN), &[BOOLEAN], T::Boolean),
            F::Not => Signature::new(Some(BOOLEAN), &[], T::Boolean),
            F::IfElse => Signature::new(Some(BOOLEAN), &[STRING, STRING], T::String),

            F::ToDate => Signature::new(s, &[STRING], T::Date).optional(1),
            F::ToInstant => Signature::new(s, &[STRING], T::Instant).optional(1),
            F::Format => Signature::new(Some(TEMPORAL), &[STRING], T::String),

            F::Join => Signature::new(Some(Expect::Any), &[STRING], T::String),
            F::Count => Signature::new(Some(Expect::Any), &[], T::WholeNumber),
        }
    }

    pub const fn quantifier(self) -> Option<(QuantifierKind, bool)> {
        match self {
            Self::AnyAttribute => Some((QuantifierKind::Named, false)),
            Self::AllAttributes => Some((QuantifierKind::Named, true)),
            Self::AnyMatchingAttribute => Some((QuantifierKind::Matching, false)),
            Self::AllMatchingAttributes => Some((QuantifierKind::Matching, true)),
            Self::AnyDelineatedValue => Some((QuantifierKind::Delineated, false)),
            Self::AllDelineatedValues => Some((QuantifierKind::Delineated, true)),
            _ => None,
        }
    }

    pub const fn is_reducer(self) -> bool {
        matches!(self, Self::Join | Self::Count)
    }

    /// Functions whose first argument is a regular expression, and whether it must match the whole subject
    pub const fn pattern_argument(self) -> Option<bool> {
        match self {
            Self::Matches => Some(true),
            Self::Find | Self::ReplaceFirst | Self::ReplaceAll => Some(false),
            _ => None,
        }
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A compiled function application
#[derive(Debug)]
pub struct Call {
    pub function: Function,
    pub subject: Option<Evaluator>,
    /// Type the subject is coerced to before use; `None` passes it through
    pub subject_target: Option<ResultType>,
    pub args: SmallVec<[Evaluator; 2]>,
    pub arg_targets: SmallVec<[Option<ResultType>; 2]>,
    /// Pattern compiled ahead of time when the regex argument is a literal
    pub pattern: Option<Regex>,
}

impl Call {
    pub(crate) fn evaluate(&self, token: &str, ctx: &mut EvaluationContext<'_>) -> EvalResult<Value> {
        use Function as F;

        match self.function {
            F::Literal => self.arg(0, ctx),
            F::Now => Ok(Value::Instant(ctx.now())),

            F::ToUpper
            | F::ToLower
            | F::Trim
            | F::Length
            | F::Substring
            | F::SubstringBefore
            | F::SubstringBeforeLast
            | F::SubstringAfter
            | F::SubstringAfterLast
            | F::Prepend
            | F::Append
            | F::Replace
            | F::ReplaceFirst
            | F::ReplaceAll
            | F::PadLeft
            | F::PadRight
            | F::IndexOf
            | F::LastIndexOf
            | F::StartsWith
            | F::EndsWith
            | F::Contains
            | F::Matches
            | F::Find
            | F::In => self.eval_string(token, ctx),

            F::IsNull | F::NotNull | F::IsEmpty | F::ReplaceNull | F::ReplaceEmpty | F::Equals | F::EqualsIgnoreCase => {
                self.eval_nullity(token, ctx)
            }

            F::Plus
            | F::Minus
            | F::Multiply
            | F::Divide
            | F::Mod
            | F::Gt
            | F::Ge
            | F::Lt
            | F::Le
            | F::ToNumber
            | F::ToDecimal
            | F::Abs => self.eval_numeric(token, ctx),

            F::And | F::Or | F::Not | F::IfElse => self.eval_logical(token, ctx),

            F::ToDate | F::ToInstant | F::Format => self.eval_temporal(token, ctx),

            F::AnyAttribute
            | F::AllAttributes
            | F::AnyMatchingAttribute
            | F::AllMatchingAttributes
            | F::AnyDelineatedValue
            | F::AllDelineatedValues
            | F::Join
            | F::Count => Err(EvalError::internal(
                format!("'{}' must be lowered to a quantifier", self.function),
                token,
            )),
        }
    }

    /// The subject value before coercion
    pub(crate) fn raw_subject(&self, token: &str, ctx: &mut EvaluationContext<'_>) -> EvalResult<Value> {
        match &self.subject {
            Some(subject) => subject.evaluate(ctx),
            None => Err(EvalError::internal(format!("'{}' has no subject", self.function), token)),
        }
    }

    /// The subject value coerced to the type the function works on
    pub(crate) fn subject(&self, token: &str, ctx: &mut EvaluationContext<'_>) -> EvalResult<Value> {
        let value = self.raw_subject(token, ctx)?;
        self.coerce_subject(value, ctx)
    }

    pub(crate) fn coerce_subject(&self, value: Value, ctx: &EvaluationContext<'_>) -> EvalResult<Value> {
        match (self.subject_target, &self.subject) {
            (Some(target), Some(subject)) => {
                coerce(value, target, ctx.formats()).map_err(|e| EvalError::from_coercion(e, subject.token()))
            }
            _ => Ok(value),
        }
    }

    /// Argument `index`, evaluated now and coerced to its declared type
    pub(crate) fn arg(&self, index: usize, ctx: &mut EvaluationContext<'_>) -> EvalResult<Value> {
        let Some(arg) = self.args.get(index) else {
            return Ok(Value::Unset);
        };
        let value = arg.evaluate(ctx)?;
        match self.arg_targets.get(index).copied().flatten() {
            Some(target) => coerce(value, target, ctx.formats()).map_err(|e| EvalError::from_coercion(e, arg.token())),
            None => Ok(value),
        }
    }

    pub(crate) fn string_arg(&self, index: usize, ctx: &mut EvaluationContext<'_>) -> EvalResult<String> {
        Ok(self.arg(index, ctx)?.into_string())
    }

    pub(crate) fn optional_string_arg(&self, index: usize, ctx: &mut EvaluationContext<'_>) -> EvalResult<Option<String>> {
        if index >= self.args.len() {
            return Ok(None);
        }
        self.string_arg(index, ctx).map(Some)
    }

    /// The regex argument, precompiled or compiled from this evaluation's value
    pub(crate) fn pattern(&self, token: &str, ctx: &mut EvaluationContext<'_>) -> EvalResult<Cow<'_, Regex>> {
        if let Some(pattern) = &self.pattern {
            return Ok(Cow::Borrowed(pattern));
        }
        let source = self.string_arg(0, ctx)?;
        let anchored = self.function.pattern_argument().unwrap_or(false);
        compile_pattern(&source, anchored)
            .map(Cow::Owned)
            .map_err(|e| EvalError::invalid_pattern(&source, &e, token))
    }
}

/// Compile a regex, anchoring it when it has to match the whole input
pub(crate) fn compile_pattern(pattern: &str, anchored: bool) -> Result<Regex, regex::Error> {
    if anchored {
        Regex::new(&format!("^(?:{pattern})$"))
    } else {
        Regex::new(pattern)
    }
}
