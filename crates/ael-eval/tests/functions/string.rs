//! String Function Tests
//!
//! Tests for: toUpper, toLower, trim, length, substring, substringBefore,
//! substringBeforeLast, substringAfter, substringAfterLast, prepend, append,
//! replace, replaceFirst, replaceAll, padLeft, padRight, indexOf, lastIndexOf,
//! startsWith, endsWith, contains, matches, find, in, equalsIgnoreCase

use crate::{eval, eval_bool, eval_err, eval_str};
use ael_diagnostics::{AEL0201, AEL0202, AEL0205};
use ael_eval::Value;
use pretty_assertions::assert_eq;
use rstest::rstest;

const FILE: &[(&str, &str)] = &[("filename", "report.tar.gz")];

#[rstest]
#[case("${filename:toUpper()}", "REPORT.TAR.GZ")]
#[case("${filename:toLower()}", "report.tar.gz")]
#[case("${filename:substringBefore('.')}", "report")]
#[case("${filename:substringBeforeLast('.')}", "report.tar")]
#[case("${filename:substringAfter('.')}", "tar.gz")]
#[case("${filename:substringAfterLast('.')}", "gz")]
#[case("${filename:substringBefore('#')}", "report.tar.gz")]
#[case("${filename:substringAfter('#')}", "report.tar.gz")]
#[case("${filename:substring(0, 6)}", "report")]
#[case("${filename:substring(7)}", "tar.gz")]
#[case("${filename:substring(10, 13)}", ".gz")]
#[case("${filename:prepend('/data/')}", "/data/report.tar.gz")]
#[case("${filename:append('.bak')}", "report.tar.gz.bak")]
#[case("${filename:replace('.', '_')}", "report_tar_gz")]
#[case("${filename:replace('', '_')}", "report.tar.gz")]
fn test_string_functions(#[case] source: &str, #[case] expected: &str) {
    assert_eq!(eval_str(source, FILE), expected);
}

#[test]
fn test_trim_and_length() {
    let attrs = &[("name", "  padded  ")];
    assert_eq!(eval_str("${name:trim()}", attrs), "padded");
    assert_eq!(eval("${name:length()}", attrs), Value::from(10i64));
    assert_eq!(eval("${name:trim():length()}", attrs), Value::from(6i64));
}

#[test]
fn test_length_counts_characters() {
    assert_eq!(eval("${word:length()}", &[("word", "größe")]), Value::from(5i64));
}

#[test]
fn test_unset_subject_reads_as_empty_text() {
    assert_eq!(eval_str("${missing:toUpper()}", &[]), "");
    assert_eq!(eval("${missing:length()}", &[]), Value::from(0i64));
    assert_eq!(eval_str("${missing:append('x')}", &[]), "x");
}

#[rstest]
#[case(r"${id:replaceFirst('\\d', '#')}", "a#2b3")]
#[case(r"${id:replaceAll('\\d', '#')}", "a##b#")]
#[case(r"${id:replaceAll('([a-z])', '<$1>')}", "<a>12<b>3")]
fn test_regex_replacement(#[case] source: &str, #[case] expected: &str) {
    assert_eq!(eval_str(source, &[("id", "a12b3")]), expected);
}

#[rstest]
#[case("${n:padLeft(5, '0')}", "00042")]
#[case("${n:padRight(4)}", "42  ")]
#[case("${n:padLeft(6, 'ab')}", "abab42")]
#[case("${n:padLeft(1, '0')}", "42")]
#[case("${n:padLeft(4, '')}", "  42")]
fn test_padding(#[case] source: &str, #[case] expected: &str) {
    assert_eq!(eval_str(source, &[("n", "42")]), expected);
}

#[test]
fn test_index_of() {
    assert_eq!(eval("${filename:indexOf('.')}", FILE), Value::from(6i64));
    assert_eq!(eval("${filename:lastIndexOf('.')}", FILE), Value::from(10i64));
    assert_eq!(eval("${filename:indexOf('zip')}", FILE), Value::from(-1i64));
}

#[test]
fn test_predicates() {
    assert!(eval_bool("${filename:startsWith('report')}", FILE));
    assert!(eval_bool("${filename:endsWith('.gz')}", FILE));
    assert!(eval_bool("${filename:contains('tar')}", FILE));
    assert!(!eval_bool("${filename:contains('zip')}", FILE));
}

#[test]
fn test_matches_is_anchored_and_find_is_not() {
    let attrs = &[("code", "abc1")];
    assert!(!eval_bool("${code:matches('[a-z]+')}", attrs));
    assert!(eval_bool("${code:matches('[a-z]+[0-9]')}", attrs));
    assert!(eval_bool(r"${code:find('\\d')}", attrs));
    assert!(!eval_bool("${code:find('x')}", attrs));
}

#[test]
fn test_pattern_from_attribute() {
    let attrs = &[("code", "abc1"), ("pattern", "[a-c]+1")];
    assert!(eval_bool("${code:matches(${pattern})}", attrs));

    let err = eval_err("${code:matches(${pattern})}", &[("code", "abc1"), ("pattern", "(")]);
    assert_eq!(err.code(), AEL0205);
}

#[test]
fn test_in() {
    assert!(eval_bool("${ext:in('csv', 'tsv', 'txt')}", &[("ext", "tsv")]));
    assert!(!eval_bool("${ext:in('csv', 'tsv')}", &[("ext", "json")]));
}

#[test]
fn test_equals_ignore_case() {
    assert!(eval_bool("${a:equalsIgnoreCase('HELLO')}", &[("a", "hello")]));
    assert!(!eval_bool("${a:equalsIgnoreCase('hello')}", &[]));
}

#[test]
fn test_substring_index_must_be_whole() {
    let err = eval_err("${s:substring(${i})}", &[("s", "hello"), ("i", "one")]);
    assert_eq!(err.code(), AEL0201);
    assert_eq!(err.token(), "i");
}

#[rstest]
#[case("${filename:substring(10, 99)}", "substring(10, 99)")]
#[case("${filename:substring(4, 1)}", "substring(4, 1)")]
#[case("${filename:substring(-1)}", "substring(-1)")]
#[case("${filename:padLeft(-3, '0')}", "padLeft(-3, '0')")]
fn test_out_of_range_positions_fail(#[case] source: &str, #[case] token: &str) {
    let err = eval_err(source, FILE);
    assert_eq!(err.code(), AEL0202);
    assert_eq!(err.token(), token);
}

#[test]
fn test_replace_with_empty_search_returns_subject() {
    assert_eq!(eval_str("${filename:replace('', '_')}", FILE), "report.tar.gz");
    assert_eq!(eval_str("${e:replace('', 'x')}", &[("e", "")]), "");
}

#[test]
fn test_in_evaluates_every_candidate() {
    let err = eval_err("${ext:in('csv', ${n:divide(0)})}", &[("ext", "csv"), ("n", "1")]);
    assert_eq!(err.code(), AEL0202);
    assert_eq!(err.token(), "divide(0)");
}
