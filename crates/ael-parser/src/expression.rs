//! `subject(:call)*` expressions and their arguments
//!
//! Every parser here runs over a [`LocatingSlice`](winnow::LocatingSlice), so
//! nodes carry byte spans into the original source. Once a construct has been
//! recognised (`${`, an opening quote, a `:`), failures are cut and carry the
//! error code for that construct.

use crate::combinators::{
    Expected, Input, PResult, attribute_name, boolean_keyword, cut, function_name, is_attribute_char,
    number_token, quoted_string, spanned, ws,
};
use ael_ast::{Argument, Expression, FunctionCall, Identifier, Literal, Spanned, Subject};
use ael_diagnostics::{AEL0001, AEL0002, AEL0003, AEL0005, AEL0006, AEL0007};
use winnow::combinator::{alt, cut_err, delimited, opt, peek, preceded, repeat, separated};
use winnow::prelude::*;
use winnow::stream::Location;

/// `${ expression }`, including the delimiters
pub(crate) fn embedded(input: &mut Input<'_>) -> PResult<Expression> {
    let open = input.current_token_start();
    "${".parse_next(input)?;
    let expr = preceded(ws, expression).parse_next(input)?;
    ws.parse_next(input)?;

    if input.is_empty() {
        return cut(AEL0003, "unterminated expression, expected '}'", open);
    }
    let at = input.current_token_start();
    cut_err('}')
        .context(Expected::new(AEL0001, "expected ':' or '}'", at))
        .parse_next(input)?;
    Ok(expr)
}

/// A subject followed by any number of `:call` links
pub(crate) fn expression(input: &mut Input<'_>) -> PResult<Expression> {
    let subject = subject.parse_next(input)?;
    let chain: Vec<_> = repeat(0.., preceded((ws, ':', ws), function_call)).parse_next(input)?;
    Ok(Expression::new(subject, chain))
}

fn subject(input: &mut Input<'_>) -> PResult<Spanned<Subject>> {
    if let Some(quoted) = opt(spanned(quoted_string)).parse_next(input)? {
        return Ok(Spanned::new(Subject::Attribute(quoted.inner), quoted.span));
    }

    let start = input.checkpoint();
    let at = input.current_token_start();
    let name = cut_err(spanned(attribute_name))
        .context(Expected::new(AEL0007, "expected attribute name or function", at))
        .parse_next(input)?;

    // `name(` starts a subject-less function instead
    if opt(peek((ws, '('))).parse_next(input)?.is_some() {
        input.reset(&start);
        let call = function_call(input)?;
        return Ok(Spanned::new(Subject::Function(call.inner), call.span));
    }

    Ok(Spanned::new(Subject::Attribute(name.inner.to_owned()), name.span))
}

fn function_call(input: &mut Input<'_>) -> PResult<Spanned<FunctionCall>> {
    spanned(call_body).parse_next(input)
}

fn call_body(input: &mut Input<'_>) -> PResult<FunctionCall> {
    let at = input.current_token_start();
    let name = cut_err(spanned(function_name))
        .context(Expected::new(AEL0006, "expected function name", at))
        .parse_next(input)?;
    if input.starts_with(is_attribute_char) {
        return cut(
            AEL0006,
            format!("invalid character in function name '{}'", name.inner),
            input.current_token_start(),
        );
    }
    let name = Spanned::new(Identifier::new(name.inner), name.span);

    ws.parse_next(input)?;
    let args = arguments(input)?;
    Ok(FunctionCall::new(name, args))
}

/// `( argument, ... )`
fn arguments(input: &mut Input<'_>) -> PResult<Vec<Spanned<Argument>>> {
    let at = input.current_token_start();
    cut_err('(')
        .context(Expected::new(AEL0006, "expected '(' after function name", at))
        .parse_next(input)?;

    let args = preceded(
        ws,
        alt((
            peek(')').map(|_| Vec::new()),
            separated(1.., delimited(ws, argument, ws), ','),
        )),
    )
    .parse_next(input)?;
    closing_paren(input)?;
    Ok(args)
}

fn closing_paren(input: &mut Input<'_>) -> PResult<()> {
    ws.parse_next(input)?;
    let at = input.current_token_start();
    if input.is_empty() {
        return cut(AEL0002, "unexpected end of input in argument list", at);
    }
    cut_err(')')
        .void()
        .context(Expected::new(AEL0001, "expected ',' or ')'", at))
        .parse_next(input)
}

fn argument(input: &mut Input<'_>) -> PResult<Spanned<Argument>> {
    let at = input.current_token_start();
    if input.is_empty() {
        return cut(AEL0002, "unexpected end of input, expected an argument", at);
    }

    cut_err(spanned(alt((
        embedded.map(|expr| Argument::Expression(Box::new(expr))),
        quoted_string.map(|s| Argument::Literal(Literal::String(s))),
        number_literal.map(Argument::Literal),
        boolean_keyword.map(|b| Argument::Literal(Literal::Boolean(b))),
    ))))
    .context(Expected::new(
        AEL0001,
        "expected a string, number, boolean or ${...} argument",
        at,
    ))
    .parse_next(input)
}

/// Integral literals become whole numbers, falling back to decimal beyond the
/// `i64` range. Literals that do not fit a finite `f64` are rejected.
fn number_literal(input: &mut Input<'_>) -> PResult<Literal> {
    let (token, range) = number_token.with_span().parse_next(input)?;

    let whole = if token.contains(['.', 'e', 'E']) {
        None
    } else {
        token.parse::<i64>().ok()
    };
    if let Some(n) = whole {
        return Ok(Literal::WholeNumber(n));
    }

    match token.parse::<f64>() {
        Ok(d) if d.is_finite() => Ok(Literal::Decimal(d)),
        _ => cut(AEL0005, format!("invalid number literal '{token}'"), range.start),
    }
}
