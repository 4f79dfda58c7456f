//! AEL error codes following a structured numbering system
//!
//! Error code ranges:
//! - AEL0001-AEL0099: Syntax errors (parser front end)
//! - AEL0100-AEL0199: Compile errors (lowering, type checking, arity)
//! - AEL0200-AEL0299: Evaluation errors (runtime)
//! - AEL0400-AEL0499: System errors (internal, configuration)

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

/// Error code identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ErrorCode(u16);

impl ErrorCode {
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    pub const fn code(&self) -> u16 {
        self.0
    }

    /// Description and help text for this code
    pub fn info(&self) -> &'static ErrorInfo {
        ERROR_INFO.get(&self.0).unwrap_or(&UNKNOWN_ERROR)
    }

    pub const fn is_syntax_error(&self) -> bool {
        self.0 >= 1 && self.0 < 100
    }

    pub const fn is_compile_error(&self) -> bool {
        self.0 >= 100 && self.0 < 200
    }

    pub const fn is_evaluation_error(&self) -> bool {
        self.0 >= 200 && self.0 < 300
    }

    pub const fn is_system_error(&self) -> bool {
        self.0 >= 400 && self.0 < 500
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AEL{:04}", self.0)
    }
}

/// Information about an error code
#[derive(Debug, Clone)]
pub struct ErrorInfo {
    pub description: &'static str,
    pub help: Option<&'static str>,
}

impl ErrorInfo {
    const fn new(description: &'static str) -> Self {
        Self {
            description,
            help: None,
        }
    }

    const fn with_help(mut self, help: &'static str) -> Self {
        self.help = Some(help);
        self
    }
}

static UNKNOWN_ERROR: ErrorInfo = ErrorInfo::new("Unknown error");

static ERROR_INFO: LazyLock<HashMap<u16, ErrorInfo>> = LazyLock::new(|| {
    let mut map = HashMap::new();

    // Syntax errors (0001-0099)
    map.insert(1, ErrorInfo::new("Unexpected token"));
    map.insert(2, ErrorInfo::new("Unexpected end of input"));
    map.insert(3, ErrorInfo::new("Unterminated expression")
        .with_help("Every '${' must be closed by a matching '}'"));
    map.insert(4, ErrorInfo::new("Unterminated string literal"));
    map.insert(5, ErrorInfo::new("Invalid number literal"));
    map.insert(6, ErrorInfo::new("Expected function call"));
    map.insert(7, ErrorInfo::new("Expected attribute name or function"));

    // Compile errors (0100-0199)
    map.insert(100, ErrorInfo::new("Type mismatch"));
    map.insert(101, ErrorInfo::new("Unknown function")
        .with_help("Run `ael functions` to list the available functions"));
    map.insert(102, ErrorInfo::new("Invalid argument count"));
    map.insert(103, ErrorInfo::new("Function requires a subject"));
    map.insert(104, ErrorInfo::new("Function cannot be applied to a subject"));
    map.insert(105, ErrorInfo::new("Invalid multi-attribute expression")
        .with_help("Multi-attribute subjects need a boolean predicate or a reducing function such as join() or count()"));
    map.insert(106, ErrorInfo::new("Invalid regular expression"));
    map.insert(107, ErrorInfo::new("Undeclared attribute"));

    // Evaluation errors (0200-0299)
    map.insert(200, ErrorInfo::new("Evaluation failed"));
    map.insert(201, ErrorInfo::new("Type coercion failed"));
    map.insert(202, ErrorInfo::new("Arithmetic error"));
    map.insert(203, ErrorInfo::new("Malformed date/instant literal"));
    map.insert(204, ErrorInfo::new("Unset attribute where a value is required")
        .with_help("Use replaceNull() to supply a default for missing attributes"));
    map.insert(205, ErrorInfo::new("Invalid regular expression"));

    // System errors (0400-0499)
    map.insert(400, ErrorInfo::new("Internal error"));
    map.insert(402, ErrorInfo::new("Configuration error"));

    map
});

// Syntax errors
pub const AEL0001: ErrorCode = ErrorCode::new(1);
pub const AEL0002: ErrorCode = ErrorCode::new(2);
pub const AEL0003: ErrorCode = ErrorCode::new(3);
pub const AEL0004: ErrorCode = ErrorCode::new(4);
pub const AEL0005: ErrorCode = ErrorCode::new(5);
pub const AEL0006: ErrorCode = ErrorCode::new(6);
pub const AEL0007: ErrorCode = ErrorCode::new(7);

// Compile errors
pub const AEL0100: ErrorCode = ErrorCode::new(100);
pub const AEL0101: ErrorCode = ErrorCode::new(101);
pub const AEL0102: ErrorCode = ErrorCode::new(102);
pub const AEL0103: ErrorCode = ErrorCode::new(103);
pub const AEL0104: ErrorCode = ErrorCode::new(104);
pub const AEL0105: ErrorCode = ErrorCode::new(105);
pub const AEL0106: ErrorCode = ErrorCode::new(106);
pub const AEL0107: ErrorCode = ErrorCode::new(107);

// Evaluation errors
pub const AEL0200: ErrorCode = ErrorCode::new(200);
pub const AEL0201: ErrorCode = ErrorCode::new(201);
pub const AEL0202: ErrorCode = ErrorCode::new(202);
pub const AEL0203: ErrorCode = ErrorCode::new(203);
pub const AEL0204: ErrorCode = ErrorCode::new(204);
pub const AEL0205: ErrorCode = ErrorCode::new(205);

// System errors
pub const AEL0400: ErrorCode = ErrorCode::new(400);
pub const AEL0402: ErrorCode = ErrorCode::new(402);
