//! Template scanning: literal text, `$$` escapes and `${...}` blocks

use crate::combinators::{Input, PResult, spanned, syntax_error, ws};
use crate::expression::{embedded, expression};
use ael_ast::{Expression, Segment, Spanned, Template};
use ael_diagnostics::Result;
use winnow::LocatingSlice;
use winnow::combinator::{alt, delimited, repeat};
use winnow::prelude::*;
use winnow::token::take_till;

/// Parse source text into a template
pub fn parse(source: &str) -> Result<Template> {
    repeat(0.., spanned(piece))
        .fold(Vec::new, push_piece)
        .map(Template::new)
        .parse(LocatingSlice::new(source))
        .map_err(|e| syntax_error(&e, source))
}

/// Parse a bare expression (no `${` `}` delimiters), e.g. `name:toUpper()`
pub fn parse_expression(source: &str) -> Result<Expression> {
    delimited(ws, expression, ws)
        .parse(LocatingSlice::new(source))
        .map_err(|e| syntax_error(&e, source))
}

enum Piece<'s> {
    Text(&'s str),
    Expression(Expression),
}

fn piece<'s>(input: &mut Input<'s>) -> PResult<Piece<'s>> {
    alt((
        "$$".map(|_| Piece::Text("$")),
        embedded.map(Piece::Expression),
        // a `$` that starts neither `$$` nor `${`
        "$".map(Piece::Text),
        take_till(1.., '$').map(Piece::Text),
    ))
    .parse_next(input)
}

/// Adjacent text pieces merge into one segment
fn push_piece(mut segments: Vec<Spanned<Segment>>, piece: Spanned<Piece<'_>>) -> Vec<Spanned<Segment>> {
    match piece.inner {
        Piece::Expression(expr) => segments.push(Spanned::new(Segment::Expression(expr), piece.span)),
        Piece::Text(text) => {
            if let Some(Spanned {
                inner: Segment::Text(run),
                span,
            }) = segments.last_mut()
            {
                run.push_str(text);
                *span = span.merge(piece.span);
            } else {
                segments.push(Spanned::new(Segment::Text(text.to_owned()), piece.span));
            }
        }
    }
    segments
}
