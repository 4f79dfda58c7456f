//! Built-in function integration tests
//!
//! Every test compiles a real expression and evaluates it against a small
//! record, covering:
//! - Correct results for each function category
//! - Coercion of subjects and arguments
//! - Unset attribute handling
//! - Runtime error kinds and the tokens they point at

mod logical;
mod nullity;
mod numeric;
mod string;
mod temporal;

use ael_eval::{Compiler, EvalError, Value};
use std::collections::HashMap;

// ============================================================================
// Test Helpers
// ============================================================================

pub(crate) fn record(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect()
}

pub(crate) fn eval(source: &str, attrs: &[(&str, &str)]) -> Value {
    let expr = Compiler::new()
        .compile(source)
        .unwrap_or_else(|e| panic!("{source} failed to compile: {e}"));
    expr.evaluate(&record(attrs))
        .unwrap_or_else(|e| panic!("{source} failed to evaluate: {e}"))
}

pub(crate) fn eval_str(source: &str, attrs: &[(&str, &str)]) -> String {
    eval(source, attrs).into_string()
}

pub(crate) fn eval_bool(source: &str, attrs: &[(&str, &str)]) -> bool {
    match eval(source, attrs) {
        Value::Boolean(b) => b,
        other => panic!("{source}: expected a boolean, got {other:?}"),
    }
}

pub(crate) fn eval_err(source: &str, attrs: &[(&str, &str)]) -> EvalError {
    let expr = Compiler::new()
        .compile(source)
        .unwrap_or_else(|e| panic!("{source} failed to compile: {e}"));
    match expr.evaluate(&record(attrs)) {
        Ok(value) => panic!("{source}: expected an error, got {value:?}"),
        Err(e) => e,
    }
}
