use crate::coercion::{check_for_overflow, Wide};
use crate::error::RuntimeError;
use crate::value::Value;
use pretty_assertions::assert_eq;
use verdict_signature::ConcreteType;

fn narrow(target: ConcreteType, value: Wide) -> Result<Value, RuntimeError> {
    check_for_overflow("test", &target, value)
}

#[test]
fn test_int_bounds() {
    assert_eq!(
        narrow(ConcreteType::Int, Wide::Integer(i32::MAX as i128)),
        Ok(Value::Int(i32::MAX))
    );
    assert_eq!(
        narrow(ConcreteType::Int, Wide::Integer(i32::MIN as i128)),
        Ok(Value::Int(i32::MIN))
    );
    assert_eq!(
        narrow(ConcreteType::Int, Wide::Integer(i32::MAX as i128 + 1)),
        Err(RuntimeError::Overflow {
            function: "test".to_string(),
            target: ConcreteType::Int,
            value: "2147483648".to_string(),
        })
    );
}

#[test]
fn test_real_to_int_requires_integral_value_in_range() {
    assert_eq!(
        narrow(ConcreteType::Int, Wide::Real(-2147483648.0)),
        Ok(Value::Int(i32::MIN))
    );
    assert!(matches!(
        narrow(ConcreteType::Int, Wide::Real(2147483648.0)),
        Err(RuntimeError::Overflow { .. })
    ));
    assert!(matches!(
        narrow(ConcreteType::Int, Wide::Real(2.5)),
        Err(RuntimeError::Overflow { .. })
    ));
    assert!(matches!(
        narrow(ConcreteType::Int, Wide::Real(f64::INFINITY)),
        Err(RuntimeError::Overflow { .. })
    ));
}

#[test]
fn test_real_to_long_bounds() {
    // 2^63 is exactly representable and one past the largest long
    let limit = 9223372036854775808.0;

    assert_eq!(
        narrow(ConcreteType::Long, Wide::Real(-limit)),
        Ok(Value::Long(i64::MIN))
    );
    assert!(matches!(
        narrow(ConcreteType::Long, Wide::Real(limit)),
        Err(RuntimeError::Overflow { .. })
    ));
    assert!(matches!(
        narrow(ConcreteType::Long, Wide::Real(f64::NAN)),
        Err(RuntimeError::Overflow { .. })
    ));
    assert_eq!(
        narrow(ConcreteType::Long, Wide::Integer(i64::MIN as i128)),
        Ok(Value::Long(i64::MIN))
    );
}

#[test]
fn test_float_rejects_finite_values_beyond_range() {
    assert!(matches!(
        narrow(ConcreteType::Float, Wide::Real(1e39)),
        Err(RuntimeError::Overflow { .. })
    ));
    assert_eq!(
        narrow(ConcreteType::Float, Wide::Real(1.5)),
        Ok(Value::Float(1.5))
    );
    assert_eq!(
        narrow(ConcreteType::Float, Wide::Real(f64::NEG_INFINITY)),
        Ok(Value::Float(f32::NEG_INFINITY))
    );
    match narrow(ConcreteType::Float, Wide::Real(f64::NAN)) {
        Ok(Value::Float(x)) => assert!(x.is_nan()),
        other => panic!("expected NaN float, got {:?}", other),
    }
}

#[test]
fn test_double_accepts_everything_numeric() {
    assert_eq!(
        narrow(ConcreteType::Double, Wide::Integer(3)),
        Ok(Value::Double(3.0))
    );
    assert_eq!(
        narrow(ConcreteType::Double, Wide::Real(f64::MAX)),
        Ok(Value::Double(f64::MAX))
    );
}

#[test]
fn test_non_numeric_target() {
    assert_eq!(
        narrow(ConcreteType::String, Wide::Integer(1)),
        Err(RuntimeError::NonNumericTarget {
            function: "test".to_string(),
            target: ConcreteType::String,
        })
    );
}

#[test]
fn test_wide_from_value() {
    assert_eq!(Wide::from_value(&Value::Int(-4)), Some(Wide::Integer(-4)));
    assert_eq!(Wide::from_value(&Value::Long(7)), Some(Wide::Integer(7)));
    assert_eq!(Wide::from_value(&Value::Float(0.5)), Some(Wide::Real(0.5)));
    assert_eq!(Wide::from_value(&Value::Boolean(true)), None);
}
