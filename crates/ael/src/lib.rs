//! Attribute Expression Language (AEL) for Rust
//!
//! This crate provides a complete AEL engine including:
//! - Parsing `${...}` templates and expressions
//! - Static type checking against a fixed function catalogue
//! - A compiled, immutable evaluator tree that is cheap to evaluate repeatedly
//! - Quantifiers over dynamic attribute sets (`anyAttribute`, `allMatchingAttributes`, ...)
//!
//! # Example
//!
//! ```ignore
//! use std::collections::HashMap;
//!
//! let expr = ael::compile("${filename:endsWith('.csv'):and(${size:gt(0)})}")?;
//! let record = HashMap::from([
//!     ("filename".to_string(), "orders.csv".to_string()),
//!     ("size".to_string(), "1024".to_string()),
//! ]);
//! assert!(expr.evaluate_boolean(&record)?);
//! ```

// Re-export all public APIs from internal crates
pub use ael_ast as ast;
pub use ael_diagnostics as diagnostics;
pub use ael_eval as eval;
pub use ael_parser as parser;
pub use ael_types as types;

// Convenience re-exports
pub use ael_diagnostics::{AelError, Diagnostic, Result};
pub use ael_eval::{
    AttributeLookup, CompileError, CompiledExpression, Compiler, EngineConfig, EvalError,
    EvaluationContext, Function,
};
pub use ael_parser::parse;
pub use ael_types::{Number, ResultType, Value};

/// Compile with the default engine configuration
pub fn compile(source: &str) -> Result<CompiledExpression> {
    Ok(Compiler::new().compile(source)?)
}

/// Compile with an explicit configuration, optionally restricting the
/// attributes the expression may reference
pub fn compile_with(source: &str, config: &EngineConfig, declared: Option<&[&str]>) -> Result<CompiledExpression> {
    let mut compiler = Compiler::with_config(config)?;
    if let Some(names) = declared {
        compiler = compiler.declare_attributes(names.iter().copied());
    }
    Ok(compiler.compile(source)?)
}

/// Compile and evaluate once
pub fn evaluate(source: &str, record: &dyn AttributeLookup) -> Result<Value> {
    Ok(compile(source)?.evaluate(record)?)
}

/// Whether `source` compiles, without keeping the result
pub fn is_valid(source: &str) -> bool {
    Compiler::new().compile(source).is_ok()
}
