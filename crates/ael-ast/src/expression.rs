//! Expression nodes: `subject(:call)*`

use crate::{Identifier, Literal, Spanned};

/// The body of one `${...}` block
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    pub subject: Spanned<Subject>,
    /// Functions applied left to right, each to the result of the previous one
    pub chain: Vec<Spanned<FunctionCall>>,
}

impl Expression {
    pub fn new(subject: Spanned<Subject>, chain: Vec<Spanned<FunctionCall>>) -> Self {
        Self { subject, chain }
    }
}

/// What a chain starts from
#[derive(Debug, Clone, PartialEq)]
pub enum Subject {
    /// A named attribute of the record, bare (`filename`) or quoted (`'my attr'`)
    Attribute(String),
    /// A function that needs no subject, e.g. `literal(3)` or `anyAttribute('a', 'b')`
    Function(FunctionCall),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    pub name: Spanned<Identifier>,
    pub args: Vec<Spanned<Argument>>,
}

impl FunctionCall {
    pub fn new(name: Spanned<Identifier>, args: Vec<Spanned<Argument>>) -> Self {
        Self { name, args }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Argument {
    Literal(Literal),
    /// A nested `${...}` expression
    Expression(Box<Expression>),
}
