//! AEL error types

use crate::{ErrorCode, SourceLocation, Span};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// An error diagnostic with location and context
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    pub code: ErrorCode,
    pub message: String,
    pub location: Option<SourceLocation>,
    /// Source text of the node the diagnostic is about
    pub token: Option<String>,
    pub help: Option<String>,
}

impl Diagnostic {
    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            location: None,
            token: None,
            help: code.info().help.map(str::to_owned),
        }
    }

    pub fn with_location(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }

    pub fn with_span(mut self, span: Span, source: &str) -> Self {
        self.location = Some(SourceLocation::from_span(span, source));
        self
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Render the diagnostic with the offending source line and a caret marker.
    pub fn render(&self, source: &str) -> String {
        let mut out = self.headline();
        if let Some(loc) = &self.location {
            if let Some(line) = source.lines().nth(loc.line.saturating_sub(1)) {
                let width = loc.length.clamp(1, line.len().saturating_sub(loc.column - 1).max(1));
                out.push_str(&format!("\n  --> {}\n   | {}\n   | {}{}", loc, line, " ".repeat(loc.column - 1), "^".repeat(width)));
            }
        }
        if let Some(help) = &self.help {
            out.push_str(&format!("\n   = help: {help}"));
        }
        out
    }

    #[cfg(feature = "colored")]
    fn headline(&self) -> String {
        use colored::Colorize;
        let label = format!("error[{}]", self.code);
        format!("{}: {}", label.red().bold(), self.message.bold())
    }

    #[cfg(not(feature = "colored"))]
    fn headline(&self) -> String {
        format!("error[{}]: {}", self.code, self.message)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error: {} - {}", self.code, self.message)?;
        if let Some(loc) = &self.location {
            write!(f, " at {}", loc)?;
        }
        Ok(())
    }
}

/// Umbrella error for every stage: parse, compile and evaluate
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AelError {
    /// Malformed source text, raised by the parser front end
    #[error("{code}: {message}")]
    Parse {
        code: ErrorCode,
        message: String,
        source_text: String,
        location: Option<SourceLocation>,
    },

    /// Type check or arity failure
    #[error("{code}: {message}")]
    Compile {
        code: ErrorCode,
        message: String,
        token: String,
        location: Option<SourceLocation>,
    },

    /// Runtime failure of one evaluation
    #[error("{code}: {message}")]
    Evaluation {
        code: ErrorCode,
        message: String,
        token: String,
    },

    /// Internal or configuration failure
    #[error("{code}: {message}")]
    System { code: ErrorCode, message: String },
}

impl AelError {
    pub fn parse(code: ErrorCode, message: impl Into<String>, source_text: impl Into<String>) -> Self {
        Self::Parse {
            code,
            message: message.into(),
            source_text: source_text.into(),
            location: None,
        }
    }

    pub fn parse_at(
        code: ErrorCode,
        message: impl Into<String>,
        source_text: &str,
        span: Span,
    ) -> Self {
        Self::Parse {
            code,
            message: message.into(),
            source_text: source_text.to_owned(),
            location: Some(SourceLocation::from_span(span, source_text)),
        }
    }

    pub fn system(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::System {
            code,
            message: message.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Parse { code, .. }
            | Self::Compile { code, .. }
            | Self::Evaluation { code, .. }
            | Self::System { code, .. } => *code,
        }
    }

    pub fn location(&self) -> Option<&SourceLocation> {
        match self {
            Self::Parse { location, .. } | Self::Compile { location, .. } => location.as_ref(),
            _ => None,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            Self::Parse { code, message, location, .. } => {
                let mut diag = Diagnostic::error(*code, message.clone());
                if let Some(loc) = location {
                    diag = diag.with_location(loc.clone());
                }
                diag
            }
            Self::Compile { code, message, token, location } => {
                let mut diag = Diagnostic::error(*code, message.clone()).with_token(token.clone());
                if let Some(loc) = location {
                    diag = diag.with_location(loc.clone());
                }
                diag
            }
            Self::Evaluation { code, message, token } => {
                Diagnostic::error(*code, message.clone()).with_token(token.clone())
            }
            Self::System { code, message } => Diagnostic::error(*code, message.clone()),
        }
    }
}
