//! Numeric coercion checking
//!
//! Evaluators compute in a wide working representation ([`Wide`]) and narrow
//! to the resolved return type here. A value that does not fit is an
//! [`RuntimeError::Overflow`]; it is never truncated or wrapped.

use crate::error::RuntimeError;
use crate::value::Value;
use std::fmt;
use tracing::debug;
use verdict_signature::ConcreteType;

/// Working representation for numeric results
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Wide {
    Integer(i128),
    Real(f64),
}

impl Wide {
    /// Widen a numeric value; `None` for non-numeric values
    pub fn from_value(value: &Value) -> Option<Wide> {
        match value {
            Value::Int(n) => Some(Wide::Integer(*n as i128)),
            Value::Long(n) => Some(Wide::Integer(*n as i128)),
            Value::Float(x) => Some(Wide::Real(*x as f64)),
            Value::Double(x) => Some(Wide::Real(*x)),
            _ => None,
        }
    }
}

impl fmt::Display for Wide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Wide::Integer(n) => write!(f, "{}", n),
            Wide::Real(x) => write!(f, "{:?}", x),
        }
    }
}

/// An integral real inside the signed range of `bits` bits
fn real_to_integer(x: f64, bits: i32) -> Option<i128> {
    if !x.is_finite() || x.fract() != 0.0 {
        return None;
    }
    // 2^(bits-1) is exact in f64; the upper bound is exclusive.
    let limit = 2f64.powi(bits - 1);
    if x >= -limit && x < limit {
        Some(x as i128)
    } else {
        None
    }
}

/// Narrow `value` to `target`, failing if it is not representable there
pub fn check_for_overflow(
    function: &str,
    target: &ConcreteType,
    value: Wide,
) -> Result<Value, RuntimeError> {
    let overflow = || {
        debug!(function, target = %target, value = %value, "numeric overflow");
        RuntimeError::Overflow {
            function: function.to_string(),
            target: target.clone(),
            value: value.to_string(),
        }
    };

    match target {
        ConcreteType::Int => {
            let wide = match value {
                Wide::Integer(n) => Some(n),
                Wide::Real(x) => real_to_integer(x, 32),
            };
            wide.and_then(|n| i32::try_from(n).ok())
                .map(Value::Int)
                .ok_or_else(overflow)
        }
        ConcreteType::Long => {
            let wide = match value {
                Wide::Integer(n) => Some(n),
                Wide::Real(x) => real_to_integer(x, 64),
            };
            wide.and_then(|n| i64::try_from(n).ok())
                .map(Value::Long)
                .ok_or_else(overflow)
        }
        ConcreteType::Float => match value {
            Wide::Integer(n) => Ok(Value::Float(n as f32)),
            Wide::Real(x) if x.is_finite() && x.abs() > f32::MAX as f64 => Err(overflow()),
            Wide::Real(x) => Ok(Value::Float(x as f32)),
        },
        ConcreteType::Double => match value {
            Wide::Integer(n) => Ok(Value::Double(n as f64)),
            Wide::Real(x) => Ok(Value::Double(x)),
        },
        other => Err(RuntimeError::NonNumericTarget {
            function: function.to_string(),
            target: other.clone(),
        }),
    }
}
