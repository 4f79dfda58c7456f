//! Attribute Expression Language diagnostics
//!
//! This crate provides the error handling infrastructure shared by the parser,
//! the compiler and the evaluator: error codes, source spans and locations, and
//! diagnostic reporting.

mod error;
mod error_code;
mod span;

pub use error::*;
pub use error_code::*;
pub use span::*;

/// Result type for AEL operations
pub type Result<T> = std::result::Result<T, AelError>;
