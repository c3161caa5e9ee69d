//! The library function contract
//!
//! A [`LibraryFunction`] is a name, a validated overload set, an evaluator and
//! an optional inline form. Evaluators and inline templates are plain function
//! pointers: they hold no state, so identical inputs always give identical
//! outputs.

use crate::coercion::Wide;
use crate::error::RuntimeError;
use crate::value::Value;
use std::fmt;
use verdict_signature::{
    ConcreteType, OverloadSet, RegistrationError, ResolveError, ResolvedCall, Signature,
};

/// Computes a result from a resolved call and its (already type-checked) arguments
pub type Evaluator = fn(&ResolvedCall, &[Value]) -> Result<Value, RuntimeError>;

/// Renders an inline fragment from argument placeholders
pub type InlineTemplate = fn(&ResolvedCall, &[&str]) -> String;

/// An alternate, semantically identical form for code generation
#[derive(Clone, Copy)]
pub enum InlineForm {
    /// A direct call of the named host primitive with the arguments in order
    Primitive(&'static str),
    Template(InlineTemplate),
}

impl InlineForm {
    pub fn render(&self, resolved: &ResolvedCall, args: &[&str]) -> String {
        match self {
            InlineForm::Primitive(name) => format!("{}({})", name, args.join(", ")),
            InlineForm::Template(template) => template(resolved, args),
        }
    }
}

impl fmt::Debug for InlineForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InlineForm::Primitive(name) => f.debug_tuple("Primitive").field(name).finish(),
            InlineForm::Template(_) => f.write_str("Template"),
        }
    }
}

#[derive(Clone)]
pub struct LibraryFunction {
    name: String,
    overloads: OverloadSet,
    evaluator: Evaluator,
    inline: Option<InlineForm>,
}

impl LibraryFunction {
    /// Validate `signatures` and build a function without an inline form
    pub fn new(
        name: impl Into<String>,
        signatures: Vec<Signature>,
        evaluator: Evaluator,
    ) -> Result<Self, RegistrationError> {
        let name = name.into();
        let overloads = OverloadSet::new(&name, signatures)?;
        Ok(Self {
            name,
            overloads,
            evaluator,
            inline: None,
        })
    }

    pub fn with_inline(mut self, inline: InlineForm) -> Self {
        self.inline = Some(inline);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn overloads(&self) -> &OverloadSet {
        &self.overloads
    }

    pub fn inline_form(&self) -> Option<&InlineForm> {
        self.inline.as_ref()
    }

    pub fn has_inline(&self) -> bool {
        self.inline.is_some()
    }

    pub fn resolve(&self, argument_types: &[ConcreteType]) -> Result<ResolvedCall, ResolveError> {
        self.overloads.resolve(&self.name, argument_types)
    }

    /// Run the evaluator after checking the resolution and argument types
    pub fn evaluate(&self, resolved: &ResolvedCall, args: &[Value]) -> Result<Value, RuntimeError> {
        self.check_resolution(resolved)?;
        self.check_arity(resolved, args.len())?;

        for (position, (value, expected)) in args.iter().zip(&resolved.parameter_types).enumerate() {
            let found = value.concrete_type();
            if &found != expected {
                return Err(RuntimeError::ArgumentType {
                    function: self.name.clone(),
                    position,
                    expected: expected.clone(),
                    found,
                });
            }
        }

        let result = (self.evaluator)(resolved, args)?;
        debug_assert_eq!(result.concrete_type(), resolved.return_type);
        Ok(result)
    }

    /// Render the inline form, if this function has one
    pub fn emit(&self, resolved: &ResolvedCall, args: &[&str]) -> Result<Option<String>, RuntimeError> {
        self.check_resolution(resolved)?;
        self.check_arity(resolved, args.len())?;
        Ok(self.inline.map(|inline| inline.render(resolved, args)))
    }

    /// A resolution is accepted only if re-resolving its parameter types
    /// against this function reproduces it exactly.
    fn check_resolution(&self, resolved: &ResolvedCall) -> Result<(), RuntimeError> {
        let stale = || RuntimeError::StaleResolution {
            function: resolved.function.clone(),
            signature_index: resolved.signature_index,
        };

        if resolved.function != self.name {
            return Err(stale());
        }
        match self.resolve(&resolved.parameter_types) {
            Ok(expected) if &expected == resolved => Ok(()),
            _ => Err(stale()),
        }
    }

    fn check_arity(&self, resolved: &ResolvedCall, found: usize) -> Result<(), RuntimeError> {
        if resolved.arity() != found {
            return Err(RuntimeError::WrongArity {
                function: self.name.clone(),
                expected: resolved.arity(),
                found,
            });
        }
        Ok(())
    }
}

impl fmt::Debug for LibraryFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LibraryFunction")
            .field("name", &self.name)
            .field("overloads", &self.overloads)
            .field("inline", &self.inline)
            .finish()
    }
}

// Argument accessors for evaluators. The registry has already checked types,
// so a mismatch here means the evaluator disagrees with its own signatures.

fn argument<'a>(call: &ResolvedCall, args: &'a [Value], position: usize) -> Result<&'a Value, RuntimeError> {
    args.get(position).ok_or_else(|| RuntimeError::WrongArity {
        function: call.function.clone(),
        expected: call.arity(),
        found: args.len(),
    })
}

fn mismatch(call: &ResolvedCall, position: usize, expected: ConcreteType, found: &Value) -> RuntimeError {
    RuntimeError::ArgumentType {
        function: call.function.clone(),
        position,
        expected,
        found: found.concrete_type(),
    }
}

pub fn double_arg(call: &ResolvedCall, args: &[Value], position: usize) -> Result<f64, RuntimeError> {
    match argument(call, args, position)? {
        Value::Double(x) => Ok(*x),
        other => Err(mismatch(call, position, ConcreteType::Double, other)),
    }
}

pub fn int_arg(call: &ResolvedCall, args: &[Value], position: usize) -> Result<i32, RuntimeError> {
    match argument(call, args, position)? {
        Value::Int(n) => Ok(*n),
        other => Err(mismatch(call, position, ConcreteType::Int, other)),
    }
}

/// Any numeric argument widened to the working representation
pub fn numeric_arg(call: &ResolvedCall, args: &[Value], position: usize) -> Result<Wide, RuntimeError> {
    let value = argument(call, args, position)?;
    Wide::from_value(value).ok_or_else(|| {
        let expected = call
            .parameter_types
            .get(position)
            .cloned()
            .unwrap_or(ConcreteType::Double);
        mismatch(call, position, expected, value)
    })
}
