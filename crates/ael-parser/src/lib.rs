//! Attribute Expression Language parser using winnow
//!
//! Turns source text into an [`ael_ast::Template`]. The grammar is small:
//!
//! ```text
//! template   := (text | '$$' | '${' expression '}')*
//! expression := subject (':' call)*
//! subject    := attribute | quoted-attribute | call
//! call       := name '(' (argument (',' argument)*)? ')'
//! argument   := string | number | 'true' | 'false' | '${' expression '}'
//! ```
//!
//! Parsing stops at the first error; the error carries a code in the
//! `AEL0001..AEL0099` range and the line/column where parsing failed.

mod combinators;
mod expression;
mod template;

pub use template::{parse, parse_expression};
