//! Null-aware Function Tests
//!
//! Tests for: isNull, notNull, isEmpty, replaceNull, replaceEmpty, equals

use crate::{eval_bool, eval_str};
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
#[case("${a:isNull()}", &[], true)]
#[case("${a:isNull()}", &[("a", "")], false)]
#[case("${a:notNull()}", &[("a", "")], true)]
#[case("${a:notNull()}", &[], false)]
#[case("${a:isEmpty()}", &[], true)]
#[case("${a:isEmpty()}", &[("a", "   ")], true)]
#[case("${a:isEmpty()}", &[("a", " x ")], false)]
fn test_presence(#[case] source: &str, #[case] attrs: &[(&str, &str)], #[case] expected: bool) {
    assert_eq!(eval_bool(source, attrs), expected);
}

#[test]
fn test_replace_null() {
    assert_eq!(eval_str("${a:replaceNull('default')}", &[]), "default");
    assert_eq!(eval_str("${a:replaceNull('default')}", &[("a", "")]), "");
    assert_eq!(eval_str("${a:replaceNull('default')}", &[("a", "set")]), "set");
}

#[test]
fn test_replace_empty() {
    assert_eq!(eval_str("${a:replaceEmpty('default')}", &[]), "default");
    assert_eq!(eval_str("${a:replaceEmpty('default')}", &[("a", " ")]), "default");
    assert_eq!(eval_str("${a:replaceEmpty('default')}", &[("a", "set")]), "set");
}

#[test]
fn test_replace_null_feeds_numeric_functions() {
    assert_eq!(eval_str("${count:replaceNull(0):plus(1)}", &[]), "1");
    assert_eq!(eval_str("${count:replaceNull(0):plus(1)}", &[("count", "41")]), "42");
}

#[rstest]
#[case("${a:equals('x')}", &[("a", "x")], true)]
#[case("${a:equals('X')}", &[("a", "x")], false)]
#[case("${a:equals('')}", &[], false)]
#[case("${a:equals(${b})}", &[], true)]
#[case("${a:toNumber():equals(3)}", &[("a", "3.0")], true)]
#[case("${a:equals(3)}", &[("a", "3")], true)]
#[case("${a:equals(3)}", &[("a", "3.0")], false)]
#[case("${a:toNumber():equals(${b:toNumber()})}", &[("a", "0.5"), ("b", "5e-1")], true)]
fn test_equals(#[case] source: &str, #[case] attrs: &[(&str, &str)], #[case] expected: bool) {
    assert_eq!(eval_bool(source, attrs), expected);
}
