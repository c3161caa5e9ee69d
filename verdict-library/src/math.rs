//! The standard math library
//!
//! Each function applies its domain policy explicitly: inputs outside the
//! mathematical domain produce NaN or infinity where the return type can hold
//! them, and a hard error only where it cannot or where a precondition is
//! violated. Results that may be narrower than the working precision go
//! through [`check_for_overflow`].

use crate::coercion::{check_for_overflow, Wide};
use crate::error::RuntimeError;
use crate::function::{double_arg, int_arg, numeric_arg, InlineForm, LibraryFunction};
use crate::primitives;
use crate::registry::RegistryBuilder;
use crate::value::Value;
use verdict_signature::{
    any_number, param, ConcreteType, RegistrationError, ResolvedCall, Signature, TypeConstraint,
};

fn double() -> TypeConstraint {
    TypeConstraint::concrete(ConcreteType::Double)
}

fn constant() -> Vec<Signature> {
    vec![Signature::new(vec![], double())]
}

fn unary_double() -> Vec<Signature> {
    vec![Signature::new(vec![param("x", double())], double())]
}

fn binary_double(first: &str, second: &str) -> Vec<Signature> {
    vec![Signature::new(
        vec![param(first, double()), param(second, double())],
        double(),
    )]
}

/// Register every standard function under the builder's prefix
pub fn install(builder: &mut RegistryBuilder) -> Result<(), RegistrationError> {
    let config = builder.config().clone();
    let name = |short: &str| config.qualify(short);

    // Constants
    builder.register(
        LibraryFunction::new(name("pi"), constant(), |call, args| host(call, args, "pi"))?
            .with_inline(InlineForm::Primitive("pi")),
    )?;
    builder.register(
        LibraryFunction::new(name("e"), constant(), |call, args| host(call, args, "e"))?
            .with_inline(InlineForm::Primitive("e")),
    )?;

    // Functions, alphabetical
    builder.register(LibraryFunction::new(
        name("abs"),
        vec![Signature::new(
            vec![param("x", TypeConstraint::wildcard("A", any_number()))],
            TypeConstraint::wildcard_ref("A"),
        )],
        abs,
    )?)?;
    builder.register(LibraryFunction::new(name("acos"), unary_double(), acos)?)?;
    builder.register(LibraryFunction::new(name("asin"), unary_double(), asin)?)?;
    builder.register(
        LibraryFunction::new(name("atan"), unary_double(), |call, args| {
            host(call, args, "atan")
        })?
        .with_inline(InlineForm::Primitive("atan")),
    )?;
    builder.register(
        LibraryFunction::new(name("atan2"), binary_double("y", "x"), |call, args| {
            host(call, args, "atan2")
        })?
        .with_inline(InlineForm::Primitive("atan2")),
    )?;
    builder.register(
        LibraryFunction::new(name("ceil"), unary_double(), |call, args| {
            host(call, args, "ceil")
        })?
        .with_inline(InlineForm::Primitive("ceil")),
    )?;
    builder.register(LibraryFunction::new(
        name("copysign"),
        vec![Signature::new(
            vec![
                param("mag", TypeConstraint::wildcard("A", any_number())),
                param("sign", TypeConstraint::wildcard_ref("A")),
            ],
            TypeConstraint::wildcard_ref("A"),
        )],
        copysign,
    )?)?;
    builder.register(
        LibraryFunction::new(name("cos"), unary_double(), |call, args| {
            host(call, args, "cos")
        })?
        .with_inline(InlineForm::Primitive("cos")),
    )?;
    builder.register(
        LibraryFunction::new(name("cosh"), unary_double(), |call, args| {
            host(call, args, "cosh")
        })?
        .with_inline(InlineForm::Primitive("cosh")),
    )?;
    builder.register(
        LibraryFunction::new(name("exp"), unary_double(), |call, args| {
            host(call, args, "exp")
        })?
        .with_inline(InlineForm::Primitive("exp")),
    )?;
    builder.register(
        LibraryFunction::new(name("expm1"), unary_double(), expm1)?
        .with_inline(InlineForm::Template(|_, args| {
            format!("(exp({}) - 1.0)", args.join(", "))
        })),
    )?;
    builder.register(
        LibraryFunction::new(name("floor"), unary_double(), |call, args| {
            host(call, args, "floor")
        })?
        .with_inline(InlineForm::Primitive("floor")),
    )?;
    builder.register(LibraryFunction::new(
        name("hypot"),
        binary_double("x", "y"),
        |call, args| binary(call, args, f64::hypot),
    )?)?;
    builder.register(LibraryFunction::new(name("ln"), unary_double(), |call, args| {
        unary(call, args, |x| logarithm(x, f64::ln))
    })?)?;
    builder.register(LibraryFunction::new(name("log10"), unary_double(), |call, args| {
        unary(call, args, |x| logarithm(x, f64::log10))
    })?)?;
    builder.register(LibraryFunction::new(
        name("log"),
        vec![Signature::new(
            vec![
                param("x", double()),
                param("base", TypeConstraint::concrete(ConcreteType::Int)),
            ],
            double(),
        )],
        log,
    )?)?;
    builder.register(LibraryFunction::new(name("ln1p"), unary_double(), |call, args| {
        unary(call, args, ln1p)
    })?)?;
    builder.register(LibraryFunction::new(
        name("round"),
        vec![
            Signature::new(
                vec![param("x", TypeConstraint::concrete(ConcreteType::Float))],
                TypeConstraint::concrete(ConcreteType::Int),
            ),
            Signature::new(
                vec![param("x", double())],
                TypeConstraint::concrete(ConcreteType::Long),
            ),
        ],
        round,
    )?)?;
    builder.register(LibraryFunction::new(name("rint"), unary_double(), |call, args| {
        unary(call, args, rint)
    })?)?;
    builder.register(LibraryFunction::new(
        name("signum"),
        vec![Signature::new(
            vec![param("x", double())],
            TypeConstraint::concrete(ConcreteType::Int),
        )],
        signum,
    )?)?;
    builder.register(
        LibraryFunction::new(name("sin"), unary_double(), |call, args| {
            host(call, args, "sin")
        })?
        .with_inline(InlineForm::Primitive("sin")),
    )?;
    builder.register(
        LibraryFunction::new(name("sinh"), unary_double(), |call, args| {
            host(call, args, "sinh")
        })?
        .with_inline(InlineForm::Primitive("sinh")),
    )?;
    builder.register(LibraryFunction::new(name("sqrt"), unary_double(), |call, args| {
        unary(call, args, |x| if x < 0.0 { f64::NAN } else { x.sqrt() })
    })?)?;
    builder.register(
        LibraryFunction::new(name("tan"), unary_double(), |call, args| {
            host(call, args, "tan")
        })?
        .with_inline(InlineForm::Primitive("tan")),
    )?;
    builder.register(
        LibraryFunction::new(name("tanh"), unary_double(), |call, args| {
            host(call, args, "tanh")
        })?
        .with_inline(InlineForm::Primitive("tanh")),
    )?;

    Ok(())
}

fn unary(call: &ResolvedCall, args: &[Value], op: fn(f64) -> f64) -> Result<Value, RuntimeError> {
    Ok(Value::Double(op(double_arg(call, args, 0)?)))
}

fn binary(
    call: &ResolvedCall,
    args: &[Value],
    op: fn(f64, f64) -> f64,
) -> Result<Value, RuntimeError> {
    let first = double_arg(call, args, 0)?;
    let second = double_arg(call, args, 1)?;
    Ok(Value::Double(op(first, second)))
}

/// Evaluate through the host primitive an inline form would call, so both
/// paths run the same function
fn host(call: &ResolvedCall, args: &[Value], primitive: &str) -> Result<Value, RuntimeError> {
    host_f64(call, args, primitive).map(Value::Double)
}

fn host_f64(call: &ResolvedCall, args: &[Value], primitive: &str) -> Result<f64, RuntimeError> {
    let op = primitives::lookup(primitive).ok_or_else(|| RuntimeError::UnknownPrimitive {
        name: primitive.to_string(),
    })?;
    let operands = (0..op.arity())
        .map(|position| double_arg(call, args, position))
        .collect::<Result<Vec<_>, _>>()?;
    op.apply(primitive, &operands)
}

/// `exp(x) - 1.0`, operation for operation as its inline template
fn expm1(call: &ResolvedCall, args: &[Value]) -> Result<Value, RuntimeError> {
    Ok(Value::Double(host_f64(call, args, "exp")? - 1.0))
}

fn abs(call: &ResolvedCall, args: &[Value]) -> Result<Value, RuntimeError> {
    let magnitude = match numeric_arg(call, args, 0)? {
        Wide::Integer(n) => Wide::Integer(n.abs()),
        Wide::Real(x) => Wide::Real(x.abs()),
    };
    check_for_overflow(&call.function, &call.return_type, magnitude)
}

fn acos(call: &ResolvedCall, args: &[Value]) -> Result<Value, RuntimeError> {
    unary(call, args, |x| {
        if (-1.0..=1.0).contains(&x) {
            x.acos()
        } else {
            f64::NAN
        }
    })
}

fn asin(call: &ResolvedCall, args: &[Value]) -> Result<Value, RuntimeError> {
    unary(call, args, |x| {
        if (-1.0..=1.0).contains(&x) {
            x.asin()
        } else {
            f64::NAN
        }
    })
}

/// `|mag|`, negated when `sign` is below zero (so `-0.0` counts as positive)
fn copysign(call: &ResolvedCall, args: &[Value]) -> Result<Value, RuntimeError> {
    let negative = match numeric_arg(call, args, 1)? {
        Wide::Integer(n) => n < 0,
        Wide::Real(x) => x < 0.0,
    };
    let result = match numeric_arg(call, args, 0)? {
        Wide::Integer(n) if negative => Wide::Integer(-n.abs()),
        Wide::Integer(n) => Wide::Integer(n.abs()),
        Wide::Real(x) if negative => Wide::Real(-x.abs()),
        Wide::Real(x) => Wide::Real(x.abs()),
    };
    check_for_overflow(&call.function, &call.return_type, result)
}

/// Shared domain policy of the logarithms: NaN below zero, -inf at zero
fn logarithm(x: f64, log: fn(f64) -> f64) -> f64 {
    if x < 0.0 {
        f64::NAN
    } else if x == 0.0 {
        f64::NEG_INFINITY
    } else {
        log(x)
    }
}

fn log(call: &ResolvedCall, args: &[Value]) -> Result<Value, RuntimeError> {
    let x = double_arg(call, args, 0)?;
    let base = int_arg(call, args, 1)?;

    if base <= 0 {
        return Err(RuntimeError::invalid_argument(
            &call.function,
            &format!("base must be positive, got {}", base),
        ));
    }
    if base == 1 {
        return Err(RuntimeError::invalid_argument(
            &call.function,
            "base 1 has no logarithm",
        ));
    }

    let base = base as f64;
    Ok(Value::Double(logarithm(x, |x| x.ln()) / base.ln()))
}

fn ln1p(x: f64) -> f64 {
    if x < -1.0 {
        f64::NAN
    } else if x == -1.0 {
        f64::NEG_INFINITY
    } else {
        x.ln_1p()
    }
}

/// Half-up rounding, narrowed to the resolved integer type
fn round(call: &ResolvedCall, args: &[Value]) -> Result<Value, RuntimeError> {
    let x = match numeric_arg(call, args, 0)? {
        Wide::Real(x) => x,
        Wide::Integer(n) => n as f64,
    };
    check_for_overflow(&call.function, &call.return_type, Wide::Real((x + 0.5).floor()))
}

/// Nearest integer, ties to the even neighbour
fn rint(x: f64) -> f64 {
    let up = x.ceil();
    let down = x.floor();
    let above = up - x;
    let below = x - down;

    if above < below {
        up
    } else if above > below {
        down
    } else if up % 2.0 == 0.0 {
        up
    } else {
        down
    }
}

fn signum(call: &ResolvedCall, args: &[Value]) -> Result<Value, RuntimeError> {
    let x = double_arg(call, args, 0)?;

    if x.is_nan() {
        Err(RuntimeError::invalid_argument(
            &call.function,
            "sign of NaN is undefined",
        ))
    } else if x == 0.0 {
        Ok(Value::Int(0))
    } else if x > 0.0 {
        Ok(Value::Int(1))
    } else {
        Ok(Value::Int(-1))
    }
}
