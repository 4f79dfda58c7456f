//! Multi-attribute subject tests
//!
//! Tests for: anyAttribute, allAttributes, anyMatchingAttribute,
//! allMatchingAttributes, anyDelineatedValue, allDelineatedValues and the
//! join/count reducers, including early exit and nesting.

use ael_diagnostics::AEL0105;
use ael_eval::{AttributeLookup, Compiler, Value};
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::borrow::Cow;
use std::cell::RefCell;
use std::collections::BTreeMap;

// ============================================================================
// Test Helpers
// ============================================================================

/// A record that remembers which attributes were read
struct RecordingLookup {
    attributes: BTreeMap<String, String>,
    reads: RefCell<Vec<String>>,
}

impl RecordingLookup {
    fn new(pairs: &[(&str, &str)]) -> Self {
        Self {
            attributes: pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect(),
            reads: RefCell::new(Vec::new()),
        }
    }

    fn reads(&self) -> Vec<String> {
        self.reads.borrow().clone()
    }
}

impl AttributeLookup for RecordingLookup {
    fn lookup(&self, name: &str) -> Option<Cow<'_, str>> {
        self.reads.borrow_mut().push(name.to_owned());
        self.attributes.get(name).map(|v| Cow::Borrowed(v.as_str()))
    }

    fn attribute_names(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        Box::new(self.attributes.keys().map(String::as_str))
    }
}

fn eval(source: &str, attrs: &[(&str, &str)]) -> Value {
    let expr = Compiler::new()
        .compile(source)
        .unwrap_or_else(|e| panic!("{source} failed to compile: {e}"));
    expr.evaluate(&RecordingLookup::new(attrs))
        .unwrap_or_else(|e| panic!("{source} failed to evaluate: {e}"))
}

// ============================================================================
// Early exit
// ============================================================================

#[test]
fn test_any_stops_at_first_true() {
    let expr = Compiler::new().compile("${anyAttribute('a1', 'a2', 'a3'):equals('x')}").unwrap();
    let record = RecordingLookup::new(&[("a1", "x"), ("a2", "y"), ("a3", "z")]);

    let mut ctx = expr.context(&record);
    assert_eq!(expr.evaluate_in(&mut ctx).unwrap(), Value::Boolean(true));
    assert_eq!(ctx.iterations(), 1);
    assert_eq!(record.reads(), ["a1"]);
}

#[test]
fn test_all_stops_at_first_false() {
    let expr = Compiler::new().compile("${allAttributes('a1', 'a2', 'a3'):equals('x')}").unwrap();
    let record = RecordingLookup::new(&[("a1", "x"), ("a2", "y"), ("a3", "x")]);

    let mut ctx = expr.context(&record);
    assert_eq!(expr.evaluate_in(&mut ctx).unwrap(), Value::Boolean(false));
    assert_eq!(ctx.iterations(), 2);
    assert_eq!(record.reads(), ["a1", "a2"]);
}

#[test]
fn test_any_visits_every_candidate_when_none_match() {
    let expr = Compiler::new().compile("${anyAttribute('a1', 'a2', 'a3'):equals('x')}").unwrap();
    let record = RecordingLookup::new(&[("a1", "p"), ("a2", "q"), ("a3", "r")]);

    let mut ctx = expr.context(&record);
    assert_eq!(expr.evaluate_in(&mut ctx).unwrap(), Value::Boolean(false));
    assert_eq!(ctx.iterations(), 3);
    assert_eq!(record.reads(), ["a1", "a2", "a3"]);
}

// ============================================================================
// Candidate sources
// ============================================================================

#[rstest]
#[case("${anyAttribute('a', 'b'):isNull()}", true)]
#[case("${allAttributes('a', 'c'):notNull()}", true)]
#[case("${allAttributes('a', 'b'):notNull()}", false)]
#[case("${anyAttribute('a', 'c'):startsWith('ba')}", true)]
fn test_named_attributes(#[case] source: &str, #[case] expected: bool) {
    let attrs = &[("a", "foo"), ("c", "bar")];
    assert_eq!(eval(source, attrs), Value::Boolean(expected));
}

#[test]
fn test_matching_attributes_in_name_order() {
    let attrs = &[("attr_b", "2"), ("other", "x"), ("attr_a", "1"), ("attr_c", "3")];
    assert_eq!(
        eval("${allMatchingAttributes('attr_.*'):join(',')}", attrs),
        Value::String("1,2,3".into())
    );
    assert_eq!(
        eval("${anyMatchingAttribute('attr_.*'):equals('x')}", attrs),
        Value::Boolean(false)
    );
}

#[test]
fn test_matching_patterns_are_anchored_and_deduplicated() {
    let attrs = &[("ab", "1"), ("abc", "2"), ("xab", "3")];
    assert_eq!(
        eval("${allMatchingAttributes('ab', 'a.*'):join(',')}", attrs),
        Value::String("1,2".into())
    );
}

#[test]
fn test_alternation_pattern_matches_whole_names() {
    let attrs = &[("a", "1"), ("ab", "2"), ("abc", "3")];
    assert_eq!(
        eval("${allMatchingAttributes('a|ab'):join(',')}", attrs),
        Value::String("1,2".into())
    );
}

#[test]
fn test_delineated_value_fails_before_join_separator() {
    let expr = Compiler::new()
        .compile("${allDelineatedValues(${n:divide(0)}, ','):join(${n:mod(0)})}")
        .unwrap();
    let err = expr.evaluate(&RecordingLookup::new(&[("n", "1")])).unwrap_err();
    assert_eq!(err.token(), "divide(0)");
}

#[test]
fn test_delineated_values() {
    let attrs = &[("tags", "red,green,blue")];
    assert_eq!(eval("${anyDelineatedValue(${tags}, ','):equals('green')}", attrs), Value::Boolean(true));
    assert_eq!(eval("${allDelineatedValues(${tags}, ','):length():gt(2)}", attrs), Value::Boolean(true));
    assert_eq!(eval("${allDelineatedValues(${tags}, ','):count()}", attrs), Value::from(3i64));
    assert_eq!(
        eval("${allDelineatedValues(${tags}, ','):toUpper():join(' | ')}", attrs),
        Value::String("RED | GREEN | BLUE".into())
    );
}

#[test]
fn test_delineated_values_keep_empty_pieces() {
    let attrs = &[("list", "a,,b")];
    assert_eq!(eval("${allDelineatedValues(${list}, ','):count()}", attrs), Value::from(3i64));
    assert_eq!(eval("${anyDelineatedValue(${list}, ','):isEmpty()}", attrs), Value::Boolean(true));
}

#[test]
fn test_empty_delimiter_yields_whole_value() {
    let attrs = &[("list", "a,b")];
    assert_eq!(eval("${allDelineatedValues(${list}, ''):count()}", attrs), Value::from(1i64));
}

// ============================================================================
// Empty candidate sets
// ============================================================================

#[rstest]
#[case("${anyMatchingAttribute('nope.*'):equals('x')}", Value::Boolean(false))]
#[case("${allMatchingAttributes('nope.*'):equals('x')}", Value::Boolean(true))]
#[case("${allMatchingAttributes('nope.*'):join(',')}", Value::String(String::new()))]
#[case("${allMatchingAttributes('nope.*'):count()}", Value::from(0i64))]
#[case("${allDelineatedValues(${missing}, ','):count()}", Value::from(0i64))]
#[case("${anyDelineatedValue(${missing}, ','):isEmpty()}", Value::Boolean(false))]
fn test_empty_candidate_sets(#[case] source: &str, #[case] expected: Value) {
    assert_eq!(eval(source, &[("present", "1")]), expected);
}

// ============================================================================
// Reducers
// ============================================================================

#[test]
fn test_join_skips_unset_values() {
    let attrs = &[("a", "1"), ("c", "3")];
    assert_eq!(
        eval("${allAttributes('a', 'b', 'c'):join(', ')}", attrs),
        Value::String("1, 3".into())
    );
}

#[test]
fn test_count_boolean_bodies_counts_true() {
    let attrs = &[("a", ""), ("b", "x"), ("c", " ")];
    assert_eq!(eval("${allAttributes('a', 'b', 'c', 'd'):isEmpty():count()}", attrs), Value::from(3i64));
}

#[test]
fn test_count_value_bodies_counts_set_values() {
    let attrs = &[("a", "1"), ("c", "3")];
    assert_eq!(eval("${allAttributes('a', 'b', 'c'):count()}", attrs), Value::from(2i64));
}

#[test]
fn test_calls_after_reducer_apply_to_result() {
    let attrs = &[("a", "1"), ("b", "2")];
    assert_eq!(eval("${allAttributes('a', 'b'):count():plus(10)}", attrs), Value::from(12i64));
    assert_eq!(
        eval("${allAttributes('a', 'b'):join('-'):prepend('[')}", attrs),
        Value::String("[1-2".into())
    );
}

#[test]
fn test_join_separator_from_attribute() {
    let attrs = &[("a", "1"), ("b", "2"), ("sep", "/")];
    assert_eq!(eval("${allAttributes('a', 'b'):join(${sep})}", attrs), Value::String("1/2".into()));
}

// ============================================================================
// Composition
// ============================================================================

#[test]
fn test_quantifier_inside_template() {
    let attrs = &[("a", "x"), ("b", "y")];
    assert_eq!(
        eval("Found: ${allAttributes('a', 'b'):join('+')}!", attrs),
        Value::String("Found: x+y!".into())
    );
}

#[test]
fn test_nested_quantifier_in_argument() {
    let source = "${allAttributes('a', 'b'):equals(${anyAttribute('c', 'd'):equals('z')})}";
    let attrs = &[("a", "true"), ("b", "true"), ("c", "q"), ("d", "z")];
    assert_eq!(eval(source, attrs), Value::Boolean(true));

    let attrs = &[("a", "true"), ("b", "true"), ("c", "q"), ("d", "q")];
    assert_eq!(eval(source, attrs), Value::Boolean(false));
}

#[test]
fn test_predicate_may_chain_boolean_functions() {
    let source = "${anyAttribute('a', 'b'):isNull():not():and(${c:equals('on')})}";
    assert_eq!(eval(source, &[("b", "2"), ("c", "on")]), Value::Boolean(true));
    assert_eq!(eval(source, &[("a", "1"), ("c", "off")]), Value::Boolean(false));
    assert_eq!(eval(source, &[("c", "on")]), Value::Boolean(false));
}

#[test]
fn test_predicate_must_stay_boolean() {
    let source = "${allAttributes('a', 'b'):isNull():not():toUpper()}";
    let err = Compiler::new().compile(source).unwrap_err();
    assert_eq!(err.code(), AEL0105);
}

#[test]
fn test_quantifier_predicate_uses_other_attributes() {
    let source = "${anyAttribute('a', 'b'):equals(${target})}";
    assert_eq!(eval(source, &[("a", "1"), ("b", "2"), ("target", "2")]), Value::Boolean(true));
}

// ============================================================================
// Compile-time validation
// ============================================================================

#[rstest]
#[case("${allAttributes('a', 'b')}")]
#[case("${anyAttribute('a'):join(',')}")]
#[case("${allAttributes('a'):toUpper()}")]
#[case("${allAttributes('a'):join(','):count()}")]
#[case("${count()}")]
fn test_invalid_quantifier_shapes(#[case] source: &str) {
    let err = Compiler::new().compile(source).unwrap_err();
    assert_eq!(err.code(), AEL0105, "{source}: {err}");
}
