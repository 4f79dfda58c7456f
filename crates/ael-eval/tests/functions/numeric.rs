//! Numeric Function Tests
//!
//! Tests for: plus, minus, multiply, divide, mod, gt, ge, lt, le, toNumber,
//! toDecimal, abs

use crate::{eval, eval_bool, eval_err};
use ael_diagnostics::{AEL0201, AEL0202, AEL0204};
use ael_eval::{Number, Value};
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
#[case("${n:plus(5)}", Value::from(15i64))]
#[case("${n:minus(15)}", Value::from(-5i64))]
#[case("${n:multiply(2.5)}", Value::from(25.0))]
#[case("${n:divide(4)}", Value::from(2.5))]
#[case("${n:divide(5)}", Value::from(2i64))]
#[case("${n:mod(3)}", Value::from(1i64))]
#[case("${n:minus(12):abs()}", Value::from(2i64))]
#[case("${n:toNumber()}", Value::from(10i64))]
fn test_arithmetic(#[case] source: &str, #[case] expected: Value) {
    assert_eq!(eval(source, &[("n", "10")]), expected);
}

#[test]
fn test_exact_division_stays_whole() {
    assert_eq!(
        eval("${literal(6):divide(2)}", &[]),
        Value::Number(Number::Whole(3))
    );
    assert_eq!(eval("${literal(5):divide(2)}", &[]), Value::Number(Number::Decimal(2.5)));
}

#[test]
fn test_to_decimal() {
    let value = eval("${n:toDecimal()}", &[("n", "2")]);
    assert!(matches!(value, Value::Number(Number::Decimal(d)) if d == 2.0));
}

#[test]
fn test_decimal_text_is_parsed() {
    assert_eq!(eval("${n:plus(0.5)}", &[("n", " 1.25 ")]), Value::from(1.75));
    assert_eq!(eval("${n:plus(1)}", &[("n", "-3")]), Value::from(-2i64));
}

#[test]
fn test_division_by_zero_is_an_error() {
    let err = eval_err("${literal(5):divide(0)}", &[]);
    assert_eq!(err.code(), AEL0202);
    assert_eq!(err.token(), "divide(0)");

    assert_eq!(eval_err("${n:mod(0)}", &[("n", "7")]).code(), AEL0202);
}

#[test]
fn test_overflow_continues_in_floating_point() {
    let value = eval("${literal(9223372036854775807):plus(1)}", &[]);
    let Value::Number(n) = value else {
        panic!("expected a number, got {value:?}");
    };
    assert!(!n.is_whole());
    assert!((n.as_f64() - 9.223_372_036_854_776e18).abs() < 1e4);
}

#[rstest]
#[case("${literal(1e308):multiply(10)}", "multiply(10)")]
#[case("${literal(-1e308):minus(1e308)}", "minus(1e308)")]
#[case("${n:divide(1e-300)}", "divide(1e-300)")]
fn test_out_of_range_result_is_an_error(#[case] source: &str, #[case] token: &str) {
    let err = eval_err(source, &[("n", "1e300")]);
    assert_eq!(err.code(), AEL0202);
    assert_eq!(err.token(), token);
}

#[test]
fn test_large_results_round_trip_through_text() {
    let value = eval("${literal(1e307):multiply(10)}", &[]);
    let text = value.to_string();
    assert_eq!(eval("${n:toNumber()}", &[("n", text.as_str())]), value);
}

#[rstest]
#[case("${n:gt(3)}", true)]
#[case("${n:gt(10)}", false)]
#[case("${n:ge(10)}", true)]
#[case("${n:lt(10.5)}", true)]
#[case("${n:le(9.99)}", false)]
fn test_comparisons(#[case] source: &str, #[case] expected: bool) {
    assert_eq!(eval_bool(source, &[("n", "10")]), expected);
}

#[test]
fn test_non_numeric_text_fails_coercion() {
    let err = eval_err("${n:plus(1)}", &[("n", "ten")]);
    assert_eq!(err.code(), AEL0201);
    assert_eq!(err.token(), "n");

    assert_eq!(eval_err("${n:toNumber()}", &[("n", "1e")]).code(), AEL0201);
}

#[test]
fn test_unset_operand_is_an_error() {
    let err = eval_err("${missing:plus(1)}", &[]);
    assert_eq!(err.code(), AEL0204);
    assert_eq!(err.token(), "missing");

    let err = eval_err("${n:plus(${missing})}", &[("n", "1")]);
    assert_eq!(err.code(), AEL0204);
}

#[test]
fn test_numbers_render_as_text() {
    let expr = ael_eval::Compiler::new().compile("Total: ${n:multiply(2)}").unwrap();
    let record = crate::record(&[("n", "21")]);
    assert_eq!(expr.evaluate_string(&record).unwrap(), "Total: 42");
}
