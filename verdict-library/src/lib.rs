//! Verdict library
//!
//! Registered library functions with typed overloads, evaluated directly or
//! emitted as inline fragments.
//!
//! - [`Registry`]: built once through a [`RegistryBuilder`], immutable after
//! - [`LibraryFunction`]: overload set, evaluator and optional [`InlineForm`]
//! - [`coercion`]: narrowing of wide results to the resolved return type
//! - [`math`]: the standard library installed by [`Registry::standard`]
//! - [`FragmentInterpreter`]: evaluates emitted fragments and command-line
//!   expressions

#![allow(clippy::uninlined_format_args)]
#![allow(clippy::result_large_err)]

pub mod coercion;
pub mod config;
pub mod error;
pub mod function;
pub mod interpreter;
pub mod math;
pub mod primitives;
pub mod registry;
pub mod value;

#[cfg(test)]
#[path = "tests/mod.rs"]
mod tests;

pub use coercion::{check_for_overflow, Wide};
pub use config::LibraryConfig;
pub use error::{LibraryError, RuntimeError};
pub use function::{Evaluator, InlineForm, InlineTemplate, LibraryFunction};
pub use interpreter::{Environment, FragmentInterpreter};
pub use registry::{Registry, RegistryBuilder};
pub use value::Value;

/// Parse and evaluate `source` against the standard registry
pub fn evaluate_from_string(source: &str, environment: &Environment) -> Result<Value, LibraryError> {
    let registry = Registry::standard()?;
    FragmentInterpreter::new(&registry).evaluate_source(source, environment)
}
