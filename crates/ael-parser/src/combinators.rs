//! Token-level parsers and the error plumbing shared by the expression and
//! template parsers

use std::borrow::Cow;

use ael_diagnostics::{AEL0001, AEL0004, AelError, ErrorCode, Span, Spanned};
use winnow::ascii::{digit1, multispace0};
use winnow::combinator::{alt, cut_err, opt, preceded, repeat, terminated};
use winnow::error::{ContextError, ErrMode, ParseError};
use winnow::prelude::*;
use winnow::stream::Location;
use winnow::token::{any, none_of, one_of, take_while};
use winnow::LocatingSlice;

pub(crate) type Input<'s> = LocatingSlice<&'s str>;
pub(crate) type PError = ErrMode<ContextError<Expected>>;
pub(crate) type PResult<T> = Result<T, PError>;

/// What the parser was looking for when it stopped, and the byte offset to
/// report
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Expected {
    pub(crate) code: ErrorCode,
    pub(crate) message: Cow<'static, str>,
    pub(crate) at: usize,
}

impl Expected {
    pub(crate) fn new(code: ErrorCode, message: impl Into<Cow<'static, str>>, at: usize) -> Self {
        Self {
            code,
            message: message.into(),
            at,
        }
    }
}

/// Fail without backtracking
pub(crate) fn cut<T>(code: ErrorCode, message: impl Into<Cow<'static, str>>, at: usize) -> PResult<T> {
    let mut err = ContextError::new();
    err.push(Expected::new(code, message, at));
    Err(ErrMode::Cut(err))
}

/// Run `parser` and attach the span of the input it consumed
pub(crate) fn spanned<'s, O>(
    parser: impl Parser<Input<'s>, O, PError>,
) -> impl Parser<Input<'s>, Spanned<O>, PError> {
    parser
        .with_span()
        .map(|(inner, range)| Spanned::new(inner, Span::from(range)))
}

/// Convert a failed parse into a located syntax error.
///
/// The innermost context wins. A failure with no context can only be input
/// left over after a complete expression.
pub(crate) fn syntax_error(error: &ParseError<Input<'_>, ContextError<Expected>>, source: &str) -> AelError {
    let (code, what, at) = match error.inner().context().next() {
        Some(expected) => (expected.code, expected.message.clone(), expected.at),
        None => (AEL0001, Cow::Borrowed("expected end of expression"), error.offset()),
    };

    let found = source.get(at..).and_then(|rest| rest.chars().next());
    let message = match found {
        Some(c) if code == AEL0001 => format!("unexpected '{c}', {what}"),
        None if code == AEL0001 => format!("unexpected end of input, {what}"),
        _ => what.into_owned(),
    };
    let width = found.map_or(0, char::len_utf8);
    AelError::parse_at(code, message, source, Span::new(at, at + width))
}

/// Skip optional whitespace
pub(crate) fn ws(input: &mut Input<'_>) -> PResult<()> {
    multispace0.void().parse_next(input)
}

/// Characters allowed in an unquoted attribute name
pub(crate) fn is_attribute_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '.' | '-')
}

/// Characters allowed in a function name
pub(crate) fn is_function_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

pub(crate) fn attribute_name<'s>(input: &mut Input<'s>) -> PResult<&'s str> {
    take_while(1.., is_attribute_char).parse_next(input)
}

pub(crate) fn function_name<'s>(input: &mut Input<'s>) -> PResult<&'s str> {
    take_while(1.., is_function_char).parse_next(input)
}

/// `-?digits(.digits)?([eE][+-]?digits)?`, returned as the matched slice
pub(crate) fn number_token<'s>(input: &mut Input<'s>) -> PResult<&'s str> {
    (
        opt('-'),
        digit1,
        opt(('.', digit1)),
        opt((one_of(['e', 'E']), opt(one_of(['+', '-'])), digit1)),
    )
        .take()
        .parse_next(input)
}

/// `true` or `false` not followed by another name character
pub(crate) fn boolean_keyword(input: &mut Input<'_>) -> PResult<bool> {
    function_name
        .verify_map(|word| match word {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        })
        .parse_next(input)
}

/// Single- or double-quoted string. A backslash escapes the next character;
/// `\n`, `\r` and `\t` name control characters.
pub(crate) fn quoted_string(input: &mut Input<'_>) -> PResult<String> {
    let open = input.current_token_start();
    let quote = one_of(['\'', '"']).parse_next(input)?;

    cut_err(terminated(
        repeat(0.., alt((escaped_char, none_of([quote, '\\'])))).fold(String::new, |mut text, c| {
            text.push(c);
            text
        }),
        quote,
    ))
    .context(Expected::new(AEL0004, "unterminated string literal", open))
    .parse_next(input)
}

fn escaped_char(input: &mut Input<'_>) -> PResult<char> {
    preceded(
        '\\',
        any.map(|c| match c {
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            other => other,
        }),
    )
    .parse_next(input)
}
