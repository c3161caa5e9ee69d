//! Error types for signature registration and overload resolution
//!
//! Following the miette patterns used across Verdict for consistent error reporting.

use crate::types::{render_type_list, ConcreteType};
use miette::Diagnostic;
use thiserror::Error;

/// A malformed signature or function declaration.
///
/// These are raised while the registry is being built and must halt
/// initialization.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum RegistrationError {
    #[error("Wildcard {symbol} in signature {signature} of {function} has no allowed types")]
    #[diagnostic(
        code(verdict::registration::empty_wildcard),
        help("Declare the allowed types on the first occurrence of {symbol}")
    )]
    EmptyWildcard {
        function: String,
        signature: usize,
        symbol: String,
    },

    #[error("Return wildcard {symbol} in signature {signature} of {function} is never bound by a parameter")]
    #[diagnostic(
        code(verdict::registration::unbound_return_wildcard),
        help("A wildcard return type must share its symbol with at least one parameter")
    )]
    UnboundReturnWildcard {
        function: String,
        signature: usize,
        symbol: String,
    },

    #[error("Wildcard {symbol} in signature {signature} of {function} is declared as both {first} and {second}")]
    #[diagnostic(
        code(verdict::registration::conflicting_wildcard),
        help("Declare the allowed set once and refer to {symbol} elsewhere")
    )]
    ConflictingWildcard {
        function: String,
        signature: usize,
        symbol: String,
        first: String,
        second: String,
    },

    #[error("Parameter {parameter} appears twice in signature {signature} of {function}")]
    #[diagnostic(
        code(verdict::registration::duplicate_parameter),
        help("Parameter names must be unique within a signature")
    )]
    DuplicateParameter {
        function: String,
        signature: usize,
        parameter: String,
    },

    #[error("Function {function} declares no signatures")]
    #[diagnostic(code(verdict::registration::empty_overload_set))]
    EmptyOverloadSet { function: String },

    #[error("Function {function} is already registered")]
    #[diagnostic(
        code(verdict::registration::duplicate_function),
        help("Each function name may only be registered once")
    )]
    DuplicateFunction { function: String },
}

/// Call-site resolution failures
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum ResolveError {
    #[error("Unknown function: {name}")]
    #[diagnostic(
        code(verdict::resolve::unknown_function),
        help("Run `verdict list` to see the registered functions")
    )]
    UnknownFunction { name: String },

    #[error("No signature of {function} accepts {rendered_arguments}")]
    #[diagnostic(
        code(verdict::resolve::type_mismatch),
        help("Available signatures: {candidates}")
    )]
    TypeMismatch {
        function: String,
        argument_types: Vec<ConcreteType>,
        rendered_arguments: String,
        candidates: String,
    },
}

impl ResolveError {
    pub fn type_mismatch(function: &str, argument_types: &[ConcreteType], candidates: String) -> Self {
        Self::TypeMismatch {
            function: function.to_string(),
            argument_types: argument_types.to_vec(),
            rendered_arguments: render_type_list(argument_types),
            candidates,
        }
    }
}

/// A type name that does not name any concrete type
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
#[error("Unknown type name: {name}")]
#[diagnostic(
    code(verdict::types::unknown_name),
    help("Expected one of null, boolean, int, long, float, double, string, bytes, array<T>, map<T>")
)]
pub struct TypeNameError {
    pub name: String,
}
