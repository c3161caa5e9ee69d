//! Runtime value representation for Verdict library calls.
//!
//! Every value knows its own [`ConcreteType`], so a call can be resolved
//! straight from its arguments.

use indexmap::IndexMap;
use std::fmt;
use verdict_signature::ConcreteType;

/// Runtime values passed to and returned from library functions
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Boolean(bool),
    /// 32-bit signed integer
    Int(i32),
    /// 64-bit signed integer
    Long(i64),
    /// 32-bit floating point number
    Float(f32),
    /// 64-bit floating point number
    Double(f64),
    String(String),
    Bytes(Vec<u8>),
    /// Homogeneous array; the element type is carried so empty arrays stay typed
    Array {
        items: ConcreteType,
        values: Vec<Value>,
    },
    /// String-keyed map, insertion ordered
    Map {
        values: ConcreteType,
        entries: IndexMap<String, Value>,
    },
}

impl Value {
    pub fn concrete_type(&self) -> ConcreteType {
        match self {
            Value::Null => ConcreteType::Null,
            Value::Boolean(_) => ConcreteType::Boolean,
            Value::Int(_) => ConcreteType::Int,
            Value::Long(_) => ConcreteType::Long,
            Value::Float(_) => ConcreteType::Float,
            Value::Double(_) => ConcreteType::Double,
            Value::String(_) => ConcreteType::String,
            Value::Bytes(_) => ConcreteType::Bytes,
            Value::Array { items, .. } => ConcreteType::array(items.clone()),
            Value::Map { values, .. } => ConcreteType::map(values.clone()),
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Value::Int(_) | Value::Long(_) | Value::Float(_) | Value::Double(_)
        )
    }

    /// Equality that compares floating values by bit pattern.
    ///
    /// `NaN` is identical to a `NaN` with the same bits, and `0.0` is not
    /// identical to `-0.0`.
    pub fn identical(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
            (Value::Double(a), Value::Double(b)) => a.to_bits() == b.to_bits(),
            (
                Value::Array { items: a, values: xs },
                Value::Array { items: b, values: ys },
            ) => a == b && xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| x.identical(y)),
            (
                Value::Map { values: a, entries: xs },
                Value::Map { values: b, entries: ys },
            ) => {
                a == b
                    && xs.len() == ys.len()
                    && xs
                        .iter()
                        .zip(ys)
                        .all(|((kx, x), (ky, y))| kx == ky && x.identical(y))
            }
            _ => self == other,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            Value::Long(n) => write!(f, "{}L", n),
            Value::Float(x) => write!(f, "{:?}f", x),
            Value::Double(x) => write!(f, "{:?}", x),
            Value::String(s) => write!(f, "{:?}", s),
            Value::Bytes(bytes) => write!(f, "bytes[{}]", bytes.len()),
            Value::Array { values, .. } => {
                let items: Vec<String> = values.iter().map(|v| v.to_string()).collect();
                write!(f, "[{}]", items.join(", "))
            }
            Value::Map { entries, .. } => {
                let items: Vec<String> = entries
                    .iter()
                    .map(|(k, v)| format!("{:?}: {}", k, v))
                    .collect();
                write!(f, "{{{}}}", items.join(", "))
            }
        }
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Long(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Double(value)
    }
}
