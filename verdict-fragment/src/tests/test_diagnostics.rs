use crate::{parse_fragment, ParseError};

#[test]
fn test_trailing_input_is_rejected() {
    let error = parse_fragment("1 + 2 )").unwrap_err();
    match error {
        ParseError::PestError { span, src, .. } => {
            assert_eq!(src, "1 + 2 )");
            assert_eq!(span.offset(), 6);
        }
        other => panic!("Expected pest error, got {:?}", other),
    }
}

#[test]
fn test_missing_operand_is_rejected() {
    assert!(parse_fragment("1 +").is_err());
    assert!(parse_fragment("").is_err());
    assert!(parse_fragment("sin(").is_err());
}

#[test]
fn test_error_message_names_expectation() {
    match parse_fragment("*").unwrap_err() {
        ParseError::PestError { message, .. } => assert!(message.starts_with("expected")),
        other => panic!("Expected pest error, got {:?}", other),
    }
}
