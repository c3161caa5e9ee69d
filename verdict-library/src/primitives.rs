//! Host primitives callable from inline fragments
//!
//! Inline forms may only call these. Library evaluators that have an inline
//! form look their operation up here too, which is what keeps the two paths
//! bit-identical.

use crate::error::RuntimeError;
use std::f64::consts;

/// Names of every primitive, in listing order
pub const PRIMITIVE_NAMES: &[&str] = &[
    "pi", "e", "abs", "sqrt", "exp", "ceil", "floor", "sin", "cos", "tan", "asin",
    "acos", "atan", "atan2", "sinh", "cosh", "tanh", "hypot",
];

/// A double-precision host operation
#[derive(Debug, Clone, Copy)]
pub enum Primitive {
    Constant(f64),
    Unary(fn(f64) -> f64),
    Binary(fn(f64, f64) -> f64),
}

impl Primitive {
    pub fn arity(&self) -> usize {
        match self {
            Primitive::Constant(_) => 0,
            Primitive::Unary(_) => 1,
            Primitive::Binary(_) => 2,
        }
    }

    pub fn apply(&self, name: &str, args: &[f64]) -> Result<f64, RuntimeError> {
        match (self, args) {
            (Primitive::Constant(value), []) => Ok(*value),
            (Primitive::Unary(op), [x]) => Ok(op(*x)),
            (Primitive::Binary(op), [x, y]) => Ok(op(*x, *y)),
            _ => Err(RuntimeError::WrongArity {
                function: name.to_string(),
                expected: self.arity(),
                found: args.len(),
            }),
        }
    }
}

pub fn lookup(name: &str) -> Option<Primitive> {
    let primitive = match name {
        "pi" => Primitive::Constant(consts::PI),
        "e" => Primitive::Constant(consts::E),
        "abs" => Primitive::Unary(f64::abs),
        "sqrt" => Primitive::Unary(f64::sqrt),
        "exp" => Primitive::Unary(f64::exp),
        "ceil" => Primitive::Unary(f64::ceil),
        "floor" => Primitive::Unary(f64::floor),
        "sin" => Primitive::Unary(f64::sin),
        "cos" => Primitive::Unary(f64::cos),
        "tan" => Primitive::Unary(f64::tan),
        "asin" => Primitive::Unary(f64::asin),
        "acos" => Primitive::Unary(f64::acos),
        "atan" => Primitive::Unary(f64::atan),
        "atan2" => Primitive::Binary(f64::atan2),
        "sinh" => Primitive::Unary(f64::sinh),
        "cosh" => Primitive::Unary(f64::cosh),
        "tanh" => Primitive::Unary(f64::tanh),
        "hypot" => Primitive::Binary(f64::hypot),
        _ => return None,
    };
    Some(primitive)
}
