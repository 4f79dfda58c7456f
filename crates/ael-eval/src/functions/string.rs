//! String functions
//!
//! Implements: toUpper, toLower, trim, length, substring, substringBefore,
//! substringBeforeLast, substringAfter, substringAfterLast, prepend, append,
//! replace, replaceFirst, replaceAll, padLeft, padRight, indexOf, lastIndexOf,
//! startsWith, endsWith, contains, matches, find, in
//!
//! Positions and lengths count characters, not bytes.

use super::{Call, Function};
use crate::context::EvaluationContext;
use crate::error::{EvalError, EvalResult};
use ael_types::{Number, Value};

impl Call {
    pub(super) fn eval_string(&self, token: &str, ctx: &mut EvaluationContext<'_>) -> EvalResult<Value> {
        use Function as F;

        let subject = self.subject(token, ctx)?.into_string();

        let value = match self.function {
            F::ToUpper => Value::String(subject.to_uppercase()),
            F::ToLower => Value::String(subject.to_lowercase()),
            F::Trim => Value::String(subject.trim().to_owned()),
            F::Length => whole(subject.chars().count()),

            F::Substring => {
                let start = self.whole_arg(0, token, ctx)?;
                let end = match self.args.get(1) {
                    Some(_) => Some(self.whole_arg(1, token, ctx)?),
                    None => None,
                };
                Value::String(substring(&subject, start, end).map_err(|e| EvalError::arithmetic(e, token))?)
            }
            F::SubstringBefore => {
                let needle = self.string_arg(0, ctx)?;
                Value::String(split_at(&subject, subject.find(&needle), |i| &subject[..i]))
            }
            F::SubstringBeforeLast => {
                let needle = self.string_arg(0, ctx)?;
                Value::String(split_at(&subject, subject.rfind(&needle), |i| &subject[..i]))
            }
            F::SubstringAfter => {
                let needle = self.string_arg(0, ctx)?;
                Value::String(split_at(&subject, subject.find(&needle), |i| &subject[i + needle.len()..]))
            }
            F::SubstringAfterLast => {
                let needle = self.string_arg(0, ctx)?;
                Value::String(split_at(&subject, subject.rfind(&needle), |i| &subject[i + needle.len()..]))
            }

            F::Prepend => Value::String(self.string_arg(0, ctx)? + &subject),
            F::Append => Value::String(subject + &self.string_arg(0, ctx)?),
            F::Replace => {
                let search = self.string_arg(0, ctx)?;
                let replacement = self.string_arg(1, ctx)?;
                if search.is_empty() {
                    Value::String(subject)
                } else {
                    Value::String(subject.replace(&search, &replacement))
                }
            }
            F::ReplaceFirst => {
                let pattern = self.pattern(token, ctx)?;
                let replacement = self.string_arg(1, ctx)?;
                Value::String(pattern.replacen(&subject, 1, replacement.as_str()).into_owned())
            }
            F::ReplaceAll => {
                let pattern = self.pattern(token, ctx)?;
                let replacement = self.string_arg(1, ctx)?;
                Value::String(pattern.replace_all(&subject, replacement.as_str()).into_owned())
            }

            F::PadLeft | F::PadRight => {
                let width = self.whole_arg(0, token, ctx)?;
                let pad = self.optional_string_arg(1, ctx)?.filter(|p| !p.is_empty());
                let fill = padding(&subject, width, pad.as_deref().unwrap_or(" "))
                    .map_err(|e| EvalError::arithmetic(e, token))?;
                if self.function == F::PadLeft {
                    Value::String(fill + &subject)
                } else {
                    Value::String(subject + &fill)
                }
            }

            F::IndexOf => {
                let needle = self.string_arg(0, ctx)?;
                char_position(&subject, subject.find(&needle))
            }
            F::LastIndexOf => {
                let needle = self.string_arg(0, ctx)?;
                char_position(&subject, subject.rfind(&needle))
            }

            F::StartsWith => Value::Boolean(subject.starts_with(&self.string_arg(0, ctx)?)),
            F::EndsWith => Value::Boolean(subject.ends_with(&self.string_arg(0, ctx)?)),
            F::Contains => Value::Boolean(subject.contains(&self.string_arg(0, ctx)?)),
            F::Matches | F::Find => Value::Boolean(self.pattern(token, ctx)?.is_match(&subject)),
            F::In => {
                // every candidate is evaluated, so a failing one is reported even after a match
                let candidates = (0..self.args.len())
                    .map(|index| self.string_arg(index, ctx))
                    .collect::<EvalResult<Vec<_>>>()?;
                Value::Boolean(candidates.contains(&subject))
            }

            other => {
                return Err(EvalError::internal(format!("'{other}' is not a string function"), token));
            }
        };
        Ok(value)
    }

    fn whole_arg(&self, index: usize, token: &str, ctx: &mut EvaluationContext<'_>) -> EvalResult<i64> {
        let value = self.arg(index, ctx)?;
        value
            .as_number()
            .and_then(Number::as_whole)
            .ok_or_else(|| EvalError::type_coercion(format!("expected a whole number, found '{value}'"), token))
    }
}

fn whole(n: usize) -> Value {
    Value::Number(Number::Whole(i64::try_from(n).unwrap_or(i64::MAX)))
}

/// Characters `[start, end)`. Both bounds must fall inside the string and
/// `end` may not precede `start`.
fn substring(s: &str, start: i64, end: Option<i64>) -> Result<String, String> {
    let len = s.chars().count();
    let bound = |i: i64| usize::try_from(i).ok().filter(|&i| i <= len);

    let from = bound(start).ok_or_else(|| format!("substring start {start} is outside 0..={len}"))?;
    let to = match end {
        None => len,
        Some(end) => bound(end)
            .filter(|&to| to >= from)
            .ok_or_else(|| format!("substring end {end} is outside {start}..={len}"))?,
    };
    Ok(s.chars().skip(from).take(to - from).collect())
}

/// The part picked by `pick`, or the whole subject when the needle is absent
fn split_at<'s>(subject: &'s str, index: Option<usize>, pick: impl FnOnce(usize) -> &'s str) -> String {
    index.map_or(subject, pick).to_owned()
}

fn char_position(s: &str, byte_index: Option<usize>) -> Value {
    match byte_index {
        Some(i) => whole(s[..i].chars().count()),
        None => Value::Number(Number::Whole(-1)),
    }
}

/// Repeats of `pad` needed to bring `s` up to `width` characters
fn padding(s: &str, width: i64, pad: &str) -> Result<String, String> {
    let width = usize::try_from(width).map_err(|_| format!("padding width {width} is negative"))?;
    let len = s.chars().count();
    Ok(pad.chars().cycle().take(width.saturating_sub(len)).collect())
}
