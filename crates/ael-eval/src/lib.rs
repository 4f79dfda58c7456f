//! Attribute Expression Language compiler and evaluator
//!
//! Source text is parsed by `ael-parser`, then lowered by the [`Compiler`] into
//! a tree of typed [`Evaluator`] nodes. Type errors, unknown functions and bad
//! arity are all reported at compile time; the resulting
//! [`CompiledExpression`] is immutable and can be evaluated against any number
//! of records, from any number of threads.
//!
//! ```ignore
//! use ael_eval::Compiler;
//! use std::collections::HashMap;
//!
//! let expr = Compiler::new().compile("${filename:substringBefore('.'):toUpper()}")?;
//! let record = HashMap::from([("filename".to_string(), "report.csv".to_string())]);
//! assert_eq!(expr.evaluate_string(&record)?, "REPORT");
//! ```

mod compiled;
mod compiler;
pub mod config;
pub mod context;
pub mod error;
pub mod evaluator;
pub mod functions;
pub mod iteration;
pub mod record;

pub use compiled::CompiledExpression;
pub use compiler::Compiler;
pub use config::EngineConfig;
pub use context::{Candidate, EvaluationContext, IterationCursor, SlotId};
pub use error::{CompileError, CompileResult, EvalError, EvalResult, Site};
pub use evaluator::{Evaluator, EvaluatorKind};
pub use functions::{Function, Signature};
pub use record::AttributeLookup;

pub use ael_types::{Number, ResultType, TemporalFormats, Value};
