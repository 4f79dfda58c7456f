//! Top-level template: literal text interleaved with embedded expressions

use crate::{Expression, Spanned};

/// One piece of a template
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Literal text, with `$$` escapes already collapsed
    Text(String),
    /// An embedded `${...}` expression
    Expression(Expression),
}

/// A parsed source text
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Template {
    pub segments: Vec<Spanned<Segment>>,
}

impl Template {
    pub fn new(segments: Vec<Spanned<Segment>>) -> Self {
        Self { segments }
    }

    /// True when the template is exactly one embedded expression with no surrounding text
    pub fn is_single_expression(&self) -> bool {
        matches!(self.segments.as_slice(), [only] if matches!(only.inner, Segment::Expression(_)))
    }

    /// Iterate over the embedded expressions, skipping literal text
    pub fn expressions(&self) -> impl Iterator<Item = &Expression> {
        self.segments.iter().filter_map(|segment| match &segment.inner {
            Segment::Expression(expr) => Some(expr),
            Segment::Text(_) => None,
        })
    }
}
