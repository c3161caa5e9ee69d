use crate::{ast::*, parse_fragment};
use pretty_assertions::assert_eq;

fn integer(input: &str) -> IntegerLiteral {
    match parse_fragment(input).unwrap().kind {
        ExpressionKind::Integer(literal) => literal,
        other => panic!("Expected integer literal, got {:?}", other),
    }
}

fn float(input: &str) -> FloatLiteral {
    match parse_fragment(input).unwrap().kind {
        ExpressionKind::Float(literal) => literal,
        other => panic!("Expected float literal, got {:?}", other),
    }
}

#[test]
fn test_parse_int_and_long_literals() {
    assert_eq!(integer("42"), IntegerLiteral { value: 42, long: false });
    assert_eq!(integer("42L"), IntegerLiteral { value: 42, long: true });
}

#[test]
fn test_negative_literals_fold() {
    assert_eq!(
        integer("-2147483648"),
        IntegerLiteral {
            value: -2147483648,
            long: false
        }
    );
    assert_eq!(integer("- 7L"), IntegerLiteral { value: -7, long: true });
    assert_eq!(float("-2.5").value, -2.5);
}

#[test]
fn test_parse_double_literals() {
    let literal = float("2.5");
    assert_eq!(literal.value, 2.5);
    assert!(!literal.single);

    assert_eq!(float("1e-3").value, 1e-3);
    assert_eq!(float("6.02E23").value, 6.02e23);
}

#[test]
fn test_parse_single_precision_literal_is_rounded() {
    let literal = float("0.1f");
    assert!(literal.single);
    assert_eq!(literal.value, 0.1f32 as f64);
    assert_ne!(literal.value, 0.1);
}

#[test]
fn test_parse_variable() {
    let expression = parse_fragment("a0").unwrap();
    assert_eq!(expression.kind, ExpressionKind::Variable("a0".to_string()));
    assert_eq!(expression.span, Span::new(0, 2));
}

#[test]
fn test_oversized_integer_is_rejected() {
    let error = parse_fragment("1000000000000000000000000000000000000000000").unwrap_err();
    assert!(matches!(error, crate::ParseError::InvalidInteger { .. }));
}

#[test]
fn test_non_finite_float_is_rejected() {
    let error = parse_fragment("1e400").unwrap_err();
    assert!(matches!(error, crate::ParseError::InvalidFloat { .. }));

    let error = parse_fragment("2.0 * 1e999f").unwrap_err();
    assert!(matches!(error, crate::ParseError::InvalidFloat { .. }));
}

#[test]
fn test_single_literal_beyond_f32_keeps_wide_value() {
    let literal = float("1e39f");
    assert!(literal.single);
    assert_eq!(literal.value, 1e39);
}

#[test]
fn test_float_literals_render_back_to_themselves() {
    for source in ["1e39f", "3.4e38f", "1e300", "-2.5f", "5e-324"] {
        let expression = parse_fragment(source).unwrap();
        let rendered = expression.to_string();
        assert_eq!(parse_fragment(&rendered).unwrap().kind, expression.kind, "{}", source);
    }
}
