//! Concrete types and the constraints a signature places on them
//!
//! A [`ConcreteType`] is what an argument actually is at a call site. A
//! [`TypeConstraint`] is what a parameter will accept: either exactly one
//! concrete type, or a named wildcard drawn from a finite allowed set.
//! Constraints hold no binding state; wildcard bindings live in
//! [`crate::ResolvedCall`].

use crate::error::TypeNameError;
use indexmap::IndexSet;
use lazy_static::lazy_static;
use std::fmt;
use std::str::FromStr;

lazy_static! {
    static ref ANY_NUMBER: IndexSet<ConcreteType> = [
        ConcreteType::Int,
        ConcreteType::Long,
        ConcreteType::Float,
        ConcreteType::Double,
    ]
    .into_iter()
    .collect();
}

/// The set of every numeric concrete type, narrowest first
pub fn any_number() -> IndexSet<ConcreteType> {
    ANY_NUMBER.clone()
}

/// A fully known type of a value
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ConcreteType {
    Null,
    Boolean,
    /// 32-bit signed integer
    Int,
    /// 64-bit signed integer
    Long,
    /// 32-bit IEEE float
    Float,
    /// 64-bit IEEE float
    Double,
    String,
    Bytes,
    /// Homogeneous array of the element type
    Array(Box<ConcreteType>),
    /// String-keyed map of the value type
    Map(Box<ConcreteType>),
}

impl ConcreteType {
    pub fn array(items: ConcreteType) -> Self {
        ConcreteType::Array(Box::new(items))
    }

    pub fn map(values: ConcreteType) -> Self {
        ConcreteType::Map(Box::new(values))
    }

    pub fn is_numeric(&self) -> bool {
        ANY_NUMBER.contains(self)
    }

    pub fn is_integral(&self) -> bool {
        matches!(self, ConcreteType::Int | ConcreteType::Long)
    }
}

impl fmt::Display for ConcreteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConcreteType::Null => write!(f, "null"),
            ConcreteType::Boolean => write!(f, "boolean"),
            ConcreteType::Int => write!(f, "int"),
            ConcreteType::Long => write!(f, "long"),
            ConcreteType::Float => write!(f, "float"),
            ConcreteType::Double => write!(f, "double"),
            ConcreteType::String => write!(f, "string"),
            ConcreteType::Bytes => write!(f, "bytes"),
            ConcreteType::Array(items) => write!(f, "array<{}>", items),
            ConcreteType::Map(values) => write!(f, "map<{}>", values),
        }
    }
}

impl FromStr for ConcreteType {
    type Err = TypeNameError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let name = input.trim();
        let simple = match name {
            "null" => Some(ConcreteType::Null),
            "boolean" => Some(ConcreteType::Boolean),
            "int" => Some(ConcreteType::Int),
            "long" => Some(ConcreteType::Long),
            "float" => Some(ConcreteType::Float),
            "double" => Some(ConcreteType::Double),
            "string" => Some(ConcreteType::String),
            "bytes" => Some(ConcreteType::Bytes),
            _ => None,
        };
        if let Some(simple) = simple {
            return Ok(simple);
        }

        let generic = |prefix: &str| {
            name.strip_prefix(prefix)
                .and_then(|rest| rest.strip_suffix('>'))
                .map(str::parse::<ConcreteType>)
        };

        if let Some(items) = generic("array<") {
            return items.map(ConcreteType::array);
        }
        if let Some(values) = generic("map<") {
            return values.map(ConcreteType::map);
        }

        Err(TypeNameError {
            name: input.to_string(),
        })
    }
}

/// What a single parameter (or a return position) accepts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeConstraint {
    /// Exactly this type, no implicit widening or narrowing
    Concrete(ConcreteType),
    /// Any type in `allowed`, bound to one type per call
    Wildcard {
        symbol: String,
        allowed: IndexSet<ConcreteType>,
    },
}

impl TypeConstraint {
    pub fn concrete(ty: ConcreteType) -> Self {
        TypeConstraint::Concrete(ty)
    }

    pub fn wildcard(symbol: &str, allowed: impl IntoIterator<Item = ConcreteType>) -> Self {
        TypeConstraint::Wildcard {
            symbol: symbol.to_string(),
            allowed: allowed.into_iter().collect(),
        }
    }

    /// Another occurrence of a wildcard declared elsewhere in the same signature.
    ///
    /// The allowed set is filled in when the signature is registered.
    pub fn wildcard_ref(symbol: &str) -> Self {
        TypeConstraint::Wildcard {
            symbol: symbol.to_string(),
            allowed: IndexSet::new(),
        }
    }

    pub fn accepts(&self, ty: &ConcreteType) -> bool {
        match self {
            TypeConstraint::Concrete(expected) => expected == ty,
            TypeConstraint::Wildcard { allowed, .. } => allowed.contains(ty),
        }
    }

    pub fn symbol(&self) -> Option<&str> {
        match self {
            TypeConstraint::Concrete(_) => None,
            TypeConstraint::Wildcard { symbol, .. } => Some(symbol),
        }
    }
}

impl fmt::Display for TypeConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeConstraint::Concrete(ty) => write!(f, "{}", ty),
            TypeConstraint::Wildcard { symbol, .. } => write!(f, "{}", symbol),
        }
    }
}

/// Render an allowed set as `{int, long}`
pub fn render_type_set(types: &IndexSet<ConcreteType>) -> String {
    let names: Vec<String> = types.iter().map(|ty| ty.to_string()).collect();
    format!("{{{}}}", names.join(", "))
}

/// Render an argument type list as `(int, double)`
pub fn render_type_list(types: &[ConcreteType]) -> String {
    let names: Vec<String> = types.iter().map(|ty| ty.to_string()).collect();
    format!("({})", names.join(", "))
}
