use crate::error::RuntimeError;
use crate::registry::Registry;
use crate::value::Value;
use pretty_assertions::assert_eq;
use verdict_signature::{ConcreteType, ResolveError};

fn call(name: &str, args: &[Value]) -> Result<Value, RuntimeError> {
    let registry = Registry::standard().expect("standard registry must build");
    registry.call(name, args)
}

fn double(name: &str, args: &[Value]) -> f64 {
    match call(name, args) {
        Ok(Value::Double(x)) => x,
        other => panic!("{} should return a double, got {:?}", name, other),
    }
}

fn is_invalid_argument(result: Result<Value, RuntimeError>) -> bool {
    matches!(result, Err(RuntimeError::InvalidArgument { .. }))
}

fn is_overflow(result: Result<Value, RuntimeError>) -> bool {
    matches!(result, Err(RuntimeError::Overflow { .. }))
}

#[test]
fn test_constants() {
    assert_eq!(double("m.pi", &[]), std::f64::consts::PI);
    assert_eq!(double("m.e", &[]), std::f64::consts::E);
}

#[test]
fn test_logarithm_edges() {
    assert_eq!(double("m.ln", &[Value::Double(0.0)]), f64::NEG_INFINITY);
    assert!(double("m.ln", &[Value::Double(-1.0)]).is_nan());
    assert_eq!(double("m.ln", &[Value::Double(1.0)]), 0.0);
    assert!((double("m.ln", &[Value::Double(std::f64::consts::E)]) - 1.0).abs() < 1e-15);

    assert_eq!(double("m.log10", &[Value::Double(0.0)]), f64::NEG_INFINITY);
    assert!(double("m.log10", &[Value::Double(-0.5)]).is_nan());
    assert_eq!(double("m.log10", &[Value::Double(1000.0)]), 3.0);

    assert_eq!(double("m.ln1p", &[Value::Double(-1.0)]), f64::NEG_INFINITY);
    assert!(double("m.ln1p", &[Value::Double(-2.0)]).is_nan());
    assert_eq!(double("m.ln1p", &[Value::Double(0.0)]), 0.0);
}

#[test]
fn test_log_with_base() {
    let result = double("m.log", &[Value::Double(8.0), Value::Int(2)]);
    assert!((result - 3.0).abs() < 1e-12, "log2(8) = {}", result);

    assert_eq!(
        double("m.log", &[Value::Double(0.0), Value::Int(10)]),
        f64::NEG_INFINITY
    );
    assert!(double("m.log", &[Value::Double(-1.0), Value::Int(10)]).is_nan());
}

#[test]
fn test_log_rejects_bad_bases() {
    assert!(is_invalid_argument(call(
        "m.log",
        &[Value::Double(8.0), Value::Int(0)]
    )));
    assert!(is_invalid_argument(call(
        "m.log",
        &[Value::Double(8.0), Value::Int(-3)]
    )));
    assert!(is_invalid_argument(call(
        "m.log",
        &[Value::Double(8.0), Value::Int(1)]
    )));
}

#[test]
fn test_log_base_must_be_int() {
    assert!(matches!(
        call("m.log", &[Value::Double(8.0), Value::Double(2.0)]),
        Err(RuntimeError::Resolve(ResolveError::TypeMismatch { .. }))
    ));
}

#[test]
fn test_rint_ties_to_even() {
    assert_eq!(double("m.rint", &[Value::Double(2.5)]), 2.0);
    assert_eq!(double("m.rint", &[Value::Double(3.5)]), 4.0);
    assert_eq!(double("m.rint", &[Value::Double(2.4)]), 2.0);
    assert_eq!(double("m.rint", &[Value::Double(2.6)]), 3.0);
    assert_eq!(double("m.rint", &[Value::Double(-2.5)]), -2.0);
    assert_eq!(double("m.rint", &[Value::Double(7.0)]), 7.0);
}

#[test]
fn test_round_follows_resolved_return_type() {
    assert_eq!(call("m.round", &[Value::Double(2.5)]), Ok(Value::Long(3)));
    assert_eq!(call("m.round", &[Value::Double(-2.5)]), Ok(Value::Long(-2)));
    assert_eq!(call("m.round", &[Value::Float(2.5)]), Ok(Value::Int(3)));
    assert_eq!(call("m.round", &[Value::Float(-0.4)]), Ok(Value::Int(0)));
}

#[test]
fn test_round_overflow() {
    assert!(is_overflow(call("m.round", &[Value::Double(1e19)])));
    assert!(is_overflow(call("m.round", &[Value::Float(3e9)])));
    assert!(is_overflow(call("m.round", &[Value::Double(f64::NAN)])));
    assert!(is_overflow(call("m.round", &[Value::Double(f64::INFINITY)])));
}

#[test]
fn test_abs_overflow_at_minimum() {
    assert_eq!(
        call("m.abs", &[Value::Int(i32::MIN)]),
        Err(RuntimeError::Overflow {
            function: "m.abs".to_string(),
            target: ConcreteType::Int,
            value: "2147483648".to_string(),
        })
    );
    assert!(is_overflow(call("m.abs", &[Value::Long(i64::MIN)])));
}

#[test]
fn test_abs_preserves_type() {
    assert_eq!(call("m.abs", &[Value::Int(-5)]), Ok(Value::Int(5)));
    assert_eq!(call("m.abs", &[Value::Long(-5)]), Ok(Value::Long(5)));
    assert_eq!(call("m.abs", &[Value::Float(-1.5)]), Ok(Value::Float(1.5)));
    assert_eq!(call("m.abs", &[Value::Double(-2.5)]), Ok(Value::Double(2.5)));
}

#[test]
fn test_abs_rejects_non_numbers() {
    assert!(matches!(
        call("m.abs", &[Value::String("x".to_string())]),
        Err(RuntimeError::Resolve(ResolveError::TypeMismatch { .. }))
    ));
}

#[test]
fn test_inverse_trig_outside_domain() {
    assert!(double("m.asin", &[Value::Double(2.0)]).is_nan());
    assert!(double("m.acos", &[Value::Double(-2.0)]).is_nan());
    assert_eq!(
        double("m.asin", &[Value::Double(1.0)]),
        std::f64::consts::FRAC_PI_2
    );
    assert_eq!(double("m.acos", &[Value::Double(1.0)]), 0.0);
}

#[test]
fn test_signum() {
    assert_eq!(call("m.signum", &[Value::Double(0.0)]), Ok(Value::Int(0)));
    assert_eq!(call("m.signum", &[Value::Double(-0.0)]), Ok(Value::Int(0)));
    assert_eq!(call("m.signum", &[Value::Double(1e-300)]), Ok(Value::Int(1)));
    assert_eq!(call("m.signum", &[Value::Double(0.5)]), Ok(Value::Int(1)));
    assert_eq!(call("m.signum", &[Value::Double(-3.0)]), Ok(Value::Int(-1)));
    assert_eq!(
        call("m.signum", &[Value::Double(f64::INFINITY)]),
        Ok(Value::Int(1))
    );
    assert!(is_invalid_argument(call(
        "m.signum",
        &[Value::Double(f64::NAN)]
    )));
}

#[test]
fn test_sqrt() {
    assert!(double("m.sqrt", &[Value::Double(-1.0)]).is_nan());
    assert_eq!(double("m.sqrt", &[Value::Double(4.0)]), 2.0);
    assert_eq!(double("m.sqrt", &[Value::Double(0.0)]), 0.0);
}

#[test]
fn test_copysign() {
    assert_eq!(
        call("m.copysign", &[Value::Int(3), Value::Int(-1)]),
        Ok(Value::Int(-3))
    );
    assert_eq!(
        call("m.copysign", &[Value::Int(-3), Value::Int(0)]),
        Ok(Value::Int(3))
    );
    assert_eq!(
        call("m.copysign", &[Value::Double(2.0), Value::Double(-0.0)]),
        Ok(Value::Double(2.0))
    );
    assert_eq!(
        call("m.copysign", &[Value::Float(2.0), Value::Float(-7.0)]),
        Ok(Value::Float(-2.0))
    );
    assert_eq!(
        call("m.copysign", &[Value::Long(i64::MIN), Value::Long(-1)]),
        Ok(Value::Long(i64::MIN))
    );
    assert!(is_overflow(call(
        "m.copysign",
        &[Value::Int(i32::MIN), Value::Int(1)]
    )));
}

#[test]
fn test_copysign_requires_one_type() {
    match call("m.copysign", &[Value::Int(1), Value::Double(1.0)]) {
        Err(RuntimeError::Resolve(ResolveError::TypeMismatch {
            function,
            argument_types,
            ..
        })) => {
            assert_eq!(function, "m.copysign");
            assert_eq!(argument_types, vec![ConcreteType::Int, ConcreteType::Double]);
        }
        other => panic!("expected type mismatch, got {:?}", other),
    }
    assert!(matches!(
        call("m.copysign", &[Value::Float(1.0), Value::Double(-1.0)]),
        Err(RuntimeError::Resolve(ResolveError::TypeMismatch { .. }))
    ));
}

#[test]
fn test_plain_double_functions() {
    assert_eq!(
        double("m.hypot", &[Value::Double(3.0), Value::Double(4.0)]),
        5.0
    );
    assert_eq!(
        double("m.atan2", &[Value::Double(0.0), Value::Double(1.0)]),
        0.0
    );
    assert_eq!(double("m.ceil", &[Value::Double(1.2)]), 2.0);
    assert_eq!(double("m.floor", &[Value::Double(-1.2)]), -2.0);
    assert_eq!(double("m.exp", &[Value::Double(0.0)]), 1.0);
    assert_eq!(double("m.expm1", &[Value::Double(0.0)]), 0.0);
    assert_eq!(double("m.cos", &[Value::Double(0.0)]), 1.0);
    assert_eq!(double("m.tanh", &[Value::Double(0.0)]), 0.0);
}
