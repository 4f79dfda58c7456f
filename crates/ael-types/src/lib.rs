//! Attribute Expression Language type system
//!
//! This crate defines:
//! - [`ResultType`], the closed set of value kinds a compiled node can produce
//! - [`Value`] and [`Number`], the runtime representation of those kinds
//! - Coercion between kinds, both the static check used by the compiler and
//!   the runtime conversion used by the evaluator
//! - [`TemporalFormats`], the date/instant patterns shared by conversions

pub mod coercion;
pub mod result_type;
pub mod temporal;
pub mod value;

pub use coercion::{CoercionError, CoercionResult, coerce, parse_number};
pub use result_type::ResultType;
pub use temporal::TemporalFormats;
pub use value::{ArithmeticError, ArithmeticResult, Number, Value};
