//! Boolean Function Tests
//!
//! Tests for: and, or, not, ifElse

use crate::{eval_bool, eval_err, eval_str};
use ael_diagnostics::AEL0201;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
#[case("true", "true", true)]
#[case("true", "false", false)]
#[case("false", "true", false)]
#[case("false", "false", false)]
fn test_and(#[case] a: &str, #[case] b: &str, #[case] expected: bool) {
    assert_eq!(eval_bool("${a:and(${b})}", &[("a", a), ("b", b)]), expected);
}

#[rstest]
#[case("true", "true", true)]
#[case("true", "false", true)]
#[case("false", "true", true)]
#[case("false", "false", false)]
fn test_or(#[case] a: &str, #[case] b: &str, #[case] expected: bool) {
    assert_eq!(eval_bool("${a:or(${b})}", &[("a", a), ("b", b)]), expected);
}

#[test]
fn test_boolean_text_is_case_insensitive() {
    assert!(eval_bool("${a:not()}", &[("a", "FALSE")]));
    assert!(!eval_bool("${a:not()}", &[("a", "True")]));
}

#[test]
fn test_and_skips_argument_when_subject_is_false() {
    // Evaluating the argument would fail: 'abc' is not a number
    let source = "${literal(false):and(${x:toNumber():gt(1)})}";
    assert!(!eval_bool(source, &[("x", "abc")]));
}

#[test]
fn test_or_skips_argument_when_subject_is_true() {
    let source = "${literal(true):or(${x:divide(0):gt(1)})}";
    assert!(eval_bool(source, &[("x", "1")]));
}

#[test]
fn test_argument_is_evaluated_when_needed() {
    let err = eval_err("${literal(true):and(${x:toNumber():gt(1)})}", &[("x", "abc")]);
    assert_eq!(err.code(), AEL0201);
}

#[test]
fn test_if_else_only_evaluates_chosen_branch() {
    let source = "${flag:ifElse('ok', ${x:divide(0)})}";
    assert_eq!(eval_str(source, &[("flag", "true"), ("x", "1")]), "ok");

    let source = "${flag:ifElse(${x:divide(0)}, 'fallback')}";
    assert_eq!(eval_str(source, &[("flag", "false"), ("x", "1")]), "fallback");
}

#[test]
fn test_if_else_on_predicate() {
    let source = "${size:gt(1024):ifElse('large', 'small')}";
    assert_eq!(eval_str(source, &[("size", "4096")]), "large");
    assert_eq!(eval_str(source, &[("size", "12")]), "small");
}

#[test]
fn test_non_boolean_text_fails_coercion() {
    let err = eval_err("${flag:not()}", &[("flag", "maybe")]);
    assert_eq!(err.code(), AEL0201);
    assert_eq!(err.token(), "flag");
}
