//! Compile and evaluation errors

use ael_diagnostics::{
    AEL0100, AEL0101, AEL0102, AEL0103, AEL0104, AEL0105, AEL0106, AEL0107, AEL0201, AEL0202,
    AEL0203, AEL0204, AEL0205, AEL0400, AEL0402, AelError, ErrorCode, SourceLocation, Span,
};
use ael_types::{CoercionError, ResultType};
use std::fmt;
use thiserror::Error;

/// Result type for compilation
pub type CompileResult<T> = Result<T, CompileError>;

/// Result type for evaluation
pub type EvalResult<T> = Result<T, EvalError>;

/// The source token a compile error is about, with its position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Site {
    pub token: String,
    pub location: SourceLocation,
}

impl Site {
    pub fn new(source: &str, span: Span) -> Self {
        Self {
            token: span.slice(source).to_owned(),
            location: SourceLocation::from_span(span, source),
        }
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' at {}", self.token, self.location)
    }
}

/// Errors raised while turning source text into an evaluator tree.
///
/// Compilation never starts evaluating; every one of these is reported before
/// any record is seen.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CompileError {
    #[error("Type mismatch: {site} is {found}, expected {expected}")]
    TypeMismatch {
        expected: String,
        found: ResultType,
        site: Site,
    },

    #[error("Unknown function '{name}' at {}", .site.location)]
    UnknownFunction { name: String, site: Site },

    #[error("Function '{function}' expects {expected} argument(s), found {found} in {site}")]
    ArityMismatch {
        function: &'static str,
        expected: String,
        found: usize,
        site: Site,
    },

    #[error("Function '{function}' must be applied to a subject, e.g. ${{attr:{function}(...)}} ({site})")]
    MissingSubject { function: &'static str, site: Site },

    #[error("Function '{function}' cannot follow a subject ({site})")]
    UnexpectedSubject { function: &'static str, site: Site },

    #[error("Invalid multi-attribute expression {site}: {message}")]
    InvalidQuantifier { message: String, site: Site },

    #[error("Invalid regular expression '{pattern}' in {site}: {message}")]
    InvalidPattern {
        pattern: String,
        message: String,
        site: Site,
    },

    #[error("Attribute '{name}' is not declared ({})", .site.location)]
    UndeclaredAttribute { name: String, site: Site },

    #[error("Invalid engine configuration: {message}")]
    Configuration { message: String },

    #[error(transparent)]
    Syntax(#[from] AelError),
}

impl CompileError {
    pub fn type_mismatch(expected: impl Into<String>, found: ResultType, site: Site) -> Self {
        Self::TypeMismatch {
            expected: expected.into(),
            found,
            site,
        }
    }

    pub fn invalid_quantifier(message: impl Into<String>, site: Site) -> Self {
        Self::InvalidQuantifier {
            message: message.into(),
            site,
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::TypeMismatch { .. } => AEL0100,
            Self::UnknownFunction { .. } => AEL0101,
            Self::ArityMismatch { .. } => AEL0102,
            Self::MissingSubject { .. } => AEL0103,
            Self::UnexpectedSubject { .. } => AEL0104,
            Self::InvalidQuantifier { .. } => AEL0105,
            Self::InvalidPattern { .. } => AEL0106,
            Self::UndeclaredAttribute { .. } => AEL0107,
            Self::Configuration { .. } => AEL0402,
            Self::Syntax(e) => e.code(),
        }
    }

    pub fn site(&self) -> Option<&Site> {
        match self {
            Self::TypeMismatch { site, .. }
            | Self::UnknownFunction { site, .. }
            | Self::ArityMismatch { site, .. }
            | Self::MissingSubject { site, .. }
            | Self::UnexpectedSubject { site, .. }
            | Self::InvalidQuantifier { site, .. }
            | Self::InvalidPattern { site, .. }
            | Self::UndeclaredAttribute { site, .. } => Some(site),
            Self::Configuration { .. } | Self::Syntax(_) => None,
        }
    }
}

impl From<CompileError> for AelError {
    fn from(err: CompileError) -> Self {
        let code = err.code();
        match err {
            CompileError::Syntax(inner) => inner,
            CompileError::Configuration { message } => AelError::system(code, message),
            other => {
                let message = other.to_string();
                let site = other.site().cloned();
                AelError::Compile {
                    code,
                    message,
                    token: site.as_ref().map(|s| s.token.clone()).unwrap_or_default(),
                    location: site.map(|s| s.location),
                }
            }
        }
    }
}

/// Errors raised by one evaluation.
///
/// An evaluation error aborts the evaluation with no partial result; the token
/// names the smallest subtree that failed.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EvalError {
    #[error("{message} (in '{token}')")]
    TypeCoercion { message: String, token: String },

    #[error("{message} (in '{token}')")]
    Arithmetic { message: String, token: String },

    #[error("{message} (in '{token}')")]
    MalformedLiteral { message: String, token: String },

    #[error("Attribute is not set but a {expected} value is required (in '{token}')")]
    UnsetValue { expected: ResultType, token: String },

    #[error("Invalid regular expression '{pattern}': {message} (in '{token}')")]
    InvalidPattern {
        pattern: String,
        message: String,
        token: String,
    },

    /// Broken engine invariant
    #[error("Internal evaluation error: {message} (in '{token}')")]
    Internal { message: String, token: String },
}

impl EvalError {
    pub fn arithmetic(message: impl Into<String>, token: &str) -> Self {
        Self::Arithmetic {
            message: message.into(),
            token: token.to_owned(),
        }
    }

    pub fn malformed_literal(message: impl Into<String>, token: &str) -> Self {
        Self::MalformedLiteral {
            message: message.into(),
            token: token.to_owned(),
        }
    }

    pub fn type_coercion(message: impl Into<String>, token: &str) -> Self {
        Self::TypeCoercion {
            message: message.into(),
            token: token.to_owned(),
        }
    }

    pub fn internal(message: impl Into<String>, token: &str) -> Self {
        Self::Internal {
            message: message.into(),
            token: token.to_owned(),
        }
    }

    pub fn invalid_pattern(pattern: &str, err: &regex::Error, token: &str) -> Self {
        Self::InvalidPattern {
            pattern: pattern.to_owned(),
            message: err.to_string(),
            token: token.to_owned(),
        }
    }

    /// Attribute a coercion failure to the node that produced the value
    pub fn from_coercion(err: CoercionError, token: &str) -> Self {
        match err {
            CoercionError::Unset { to } => Self::UnsetValue {
                expected: to,
                token: token.to_owned(),
            },
            malformed @ CoercionError::MalformedTemporal { .. } => Self::malformed_literal(malformed.to_string(), token),
            incompatible @ CoercionError::Incompatible { .. } => Self::type_coercion(incompatible.to_string(), token),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::TypeCoercion { .. } => AEL0201,
            Self::Arithmetic { .. } => AEL0202,
            Self::MalformedLiteral { .. } => AEL0203,
            Self::UnsetValue { .. } => AEL0204,
            Self::InvalidPattern { .. } => AEL0205,
            Self::Internal { .. } => AEL0400,
        }
    }

    pub fn token(&self) -> &str {
        match self {
            Self::TypeCoercion { token, .. }
            | Self::Arithmetic { token, .. }
            | Self::MalformedLiteral { token, .. }
            | Self::UnsetValue { token, .. }
            | Self::InvalidPattern { token, .. }
            | Self::Internal { token, .. } => token,
        }
    }
}

impl From<EvalError> for AelError {
    fn from(err: EvalError) -> Self {
        match err {
            EvalError::Internal { message, .. } => AelError::system(AEL0400, message),
            other => AelError::Evaluation {
                code: other.code(),
                message: other.to_string(),
                token: other.token().to_owned(),
            },
        }
    }
}
