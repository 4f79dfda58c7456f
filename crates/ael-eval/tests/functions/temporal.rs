//! Date and Instant Function Tests
//!
//! Tests for: toDate, toInstant, format, now, and the configured patterns

use crate::{eval, eval_err, eval_str, record};
use ael_diagnostics::{AEL0100, AEL0203, AEL0204};
use ael_eval::{Compiler, EngineConfig, ResultType, Value};
use chrono::{DateTime, NaiveDate};
use pretty_assertions::assert_eq;

#[test]
fn test_to_date_with_default_pattern() {
    let value = eval("${d:toDate()}", &[("d", "2024-03-15")]);
    assert_eq!(value, Value::Date(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()));
}

#[test]
fn test_to_date_with_explicit_pattern() {
    let value = eval("${d:toDate('%d.%m.%Y')}", &[("d", "15.03.2024")]);
    assert_eq!(value, Value::Date(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()));
}

#[test]
fn test_format_date() {
    assert_eq!(eval_str("${d:toDate():format('%d/%m/%Y')}", &[("d", "2024-03-15")]), "15/03/2024");
}

#[test]
fn test_date_renders_canonically() {
    assert_eq!(eval_str("${d:toDate('%d.%m.%Y')}", &[("d", "01.02.2025")]), "2025-02-01");
}

#[test]
fn test_to_instant_keeps_offset() {
    let attrs = &[("t", "2024-03-15T10:30:00+02:00")];
    assert_eq!(eval_str("${t:toInstant():format('%H:%M %z')}", attrs), "10:30 +0200");

    let value = eval("${t:toInstant()}", attrs);
    let expected = DateTime::parse_from_rfc3339("2024-03-15T08:30:00Z").unwrap();
    assert_eq!(value, Value::Instant(expected));
}

#[test]
fn test_to_instant_with_pattern() {
    let source = "${t:toInstant('%Y/%m/%d %H:%M'):format('%Y-%m-%dT%H:%M')}";
    assert_eq!(eval_str(source, &[("t", "2024/03/15 07:05")]), "2024-03-15T07:05");
}

#[test]
fn test_format_text_subject_as_instant() {
    assert_eq!(eval_str("${t:format('%Y')}", &[("t", "2024-03-15T10:30:00Z")]), "2024");
}

#[test]
fn test_malformed_text_is_an_error() {
    let err = eval_err("${d:toDate()}", &[("d", "15/03/2024")]);
    assert_eq!(err.code(), AEL0203);

    let err = eval_err("${t:toInstant()}", &[("t", "yesterday")]);
    assert_eq!(err.code(), AEL0203);

    let err = eval_err("${t:format('%Y')}", &[("t", "2024-03-15")]);
    assert_eq!(err.code(), AEL0203);
}

#[test]
fn test_date_cannot_render_time_fields() {
    let err = eval_err("${d:toDate():format('%H:%M')}", &[("d", "2024-03-15")]);
    assert_eq!(err.code(), AEL0203);
}

#[test]
fn test_unset_subject_is_an_error() {
    let err = eval_err("${d:toDate()}", &[]);
    assert_eq!(err.code(), AEL0204);
    assert_eq!(err.token(), "d");
}

#[test]
fn test_now_uses_pinned_clock() {
    let expr = Compiler::new().compile("${now():format('%Y-%m-%d')}").unwrap();
    assert_eq!(expr.result_type(), ResultType::String);

    let record = record(&[]);
    let clock = DateTime::parse_from_rfc3339("2030-01-02T03:04:05Z").unwrap();
    let mut ctx = expr.context(&record).with_clock(clock);
    assert_eq!(expr.evaluate_in(&mut ctx).unwrap(), Value::String("2030-01-02".into()));
}

#[test]
fn test_configured_date_pattern() {
    let config = EngineConfig {
        date_format: "%d/%m/%Y".into(),
        ..EngineConfig::default()
    };
    let compiler = Compiler::with_config(&config).unwrap();
    let expr = compiler.compile("${d:toDate():format('%Y-%m-%d')}").unwrap();
    assert_eq!(expr.evaluate_string(&record(&[("d", "15/03/2024")])).unwrap(), "2024-03-15");
}

#[test]
fn test_configured_instant_pattern_and_offset() {
    let config = EngineConfig {
        instant_format: Some("%Y-%m-%d %H:%M".into()),
        default_offset: "+01:00".into(),
        ..EngineConfig::default()
    };
    let compiler = Compiler::with_config(&config).unwrap();
    let expr = compiler.compile("${t:toInstant():format('%H:%M%:z')}").unwrap();
    assert_eq!(expr.evaluate_string(&record(&[("t", "2024-03-15 09:00")])).unwrap(), "09:00+01:00");
}

#[test]
fn test_dates_are_not_numbers() {
    let err = Compiler::new().compile("${d:toDate():plus(1)}").unwrap_err();
    assert_eq!(err.code(), AEL0100);
}
