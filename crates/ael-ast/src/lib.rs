//! Attribute Expression Language parse tree
//!
//! The parse tree mirrors the surface syntax: a [`Template`] of literal text and
//! embedded `${...}` expressions, each expression a subject followed by a chain of
//! function calls. Every node carries the [`Span`] it was parsed from so later
//! stages can report the exact source token.

mod expression;
mod literal;
mod template;

pub use expression::*;
pub use literal::*;
pub use template::*;

pub use ael_diagnostics::Span;

/// A node with source span information
pub type Spanned<T> = ael_diagnostics::Spanned<T>;

/// A function name as written in the source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    pub name: String,
}

impl Identifier {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.name
    }
}

impl From<&str> for Identifier {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
