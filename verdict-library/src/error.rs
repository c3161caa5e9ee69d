//! Runtime error types for Verdict library calls.
//!
//! Domain edge cases such as `ln(0.0)` are results, not errors. Everything
//! here is a hard failure reported to the caller with the function, types
//! and offending value needed to reconstruct it.

use miette::Diagnostic;
use thiserror::Error;
use verdict_fragment::ParseError;
use verdict_signature::{ConcreteType, RegistrationError, ResolveError, TypeNameError};

/// Errors raised while evaluating a resolved call or a fragment
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum RuntimeError {
    #[error("Invalid argument to {function}: {message}")]
    #[diagnostic(
        code(verdict::runtime::invalid_argument),
        help("Check the preconditions of {function}")
    )]
    InvalidArgument { function: String, message: String },

    #[error("Overflow in {function}: {value} is not representable as {target}")]
    #[diagnostic(
        code(verdict::runtime::overflow),
        help("The result does not fit the resolved return type and is never truncated")
    )]
    Overflow {
        function: String,
        target: ConcreteType,
        value: String,
    },

    #[error("Argument {position} of {function} expects {expected}, found {found}")]
    #[diagnostic(
        code(verdict::runtime::argument_type),
        help("Arguments must match the types the call was resolved with")
    )]
    ArgumentType {
        function: String,
        position: usize,
        expected: ConcreteType,
        found: ConcreteType,
    },

    #[error("Wrong arity: {function} expects {expected} arguments, got {found}")]
    #[diagnostic(code(verdict::runtime::wrong_arity))]
    WrongArity {
        function: String,
        expected: usize,
        found: usize,
    },

    #[error("Resolution for {function} (signature {signature_index}) does not belong to this function")]
    #[diagnostic(
        code(verdict::runtime::stale_resolution),
        help("Resolve the call against the same registry that evaluates it")
    )]
    StaleResolution {
        function: String,
        signature_index: usize,
    },

    #[error("Cannot narrow a number to non-numeric type {target} in {function}")]
    #[diagnostic(code(verdict::runtime::non_numeric_target))]
    NonNumericTarget {
        function: String,
        target: ConcreteType,
    },

    #[error("Undefined variable: {name}")]
    #[diagnostic(
        code(verdict::runtime::undefined_variable),
        help("Bind the variable before evaluating the fragment")
    )]
    UndefinedVariable { name: String },

    #[error("Unknown primitive: {name}")]
    #[diagnostic(
        code(verdict::runtime::unknown_primitive),
        help("Library functions must be called by their qualified name")
    )]
    UnknownPrimitive { name: String },

    #[error("Invalid operation: {operation} cannot be applied to types [{operand_types}]")]
    #[diagnostic(
        code(verdict::runtime::invalid_operation),
        help("Operands must share one numeric type; there is no implicit widening")
    )]
    InvalidOperation {
        operation: String,
        operand_types: String,
    },

    #[error("Division by zero")]
    #[diagnostic(code(verdict::runtime::division_by_zero))]
    DivisionByZero,

    #[error(transparent)]
    #[diagnostic(transparent)]
    Resolve(#[from] ResolveError),
}

impl RuntimeError {
    pub fn invalid_argument(function: &str, message: &str) -> Self {
        Self::InvalidArgument {
            function: function.to_string(),
            message: message.to_string(),
        }
    }

    pub fn invalid_operation(operation: &str, operand_types: &[ConcreteType]) -> Self {
        let names: Vec<String> = operand_types.iter().map(|t| t.to_string()).collect();
        Self::InvalidOperation {
            operation: operation.to_string(),
            operand_types: names.join(", "),
        }
    }
}

/// Unified error for front ends that register, parse, resolve and evaluate
#[derive(Error, Diagnostic, Debug)]
pub enum LibraryError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Registration(#[from] RegistrationError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Runtime(#[from] RuntimeError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    TypeName(#[from] TypeNameError),
}
