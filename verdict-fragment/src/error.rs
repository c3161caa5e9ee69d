// Verdict Fragment Error Handling
// miette diagnostics pointing into the fragment source

use crate::parser::Rule;
use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

pub type ParseResult<T> = Result<T, ParseError>;

#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Parse error: {message}")]
    #[diagnostic(
        code(verdict::fragment::pest_error),
        help("Check the syntax near the highlighted location")
    )]
    PestError {
        #[source_code]
        src: String,
        #[label("error occurred here")]
        span: SourceSpan,
        message: String,
    },

    #[error("Invalid integer literal")]
    #[diagnostic(
        code(verdict::fragment::invalid_integer),
        help("Integer literals are decimal digits with an optional L suffix")
    )]
    InvalidInteger {
        #[source_code]
        src: String,
        #[label("invalid integer")]
        span: SourceSpan,
        found: String,
    },

    #[error("Invalid float literal")]
    #[diagnostic(
        code(verdict::fragment::invalid_float),
        help("Float literals need a decimal point or exponent (e.g., 2.5, 1e-3, 2.5f) and must be finite")
    )]
    InvalidFloat {
        #[source_code]
        src: String,
        #[label("invalid float")]
        span: SourceSpan,
        found: String,
    },

    #[error("Unexpected grammar rule")]
    #[diagnostic(
        code(verdict::fragment::unexpected_rule),
        help("Expected rule: {expected}")
    )]
    UnexpectedRule { expected: String, found: Rule },
}

impl ParseError {
    pub fn from_pest_error(error: pest::error::Error<Rule>, src: String) -> Self {
        let span = match error.location {
            pest::error::InputLocation::Pos(pos) => SourceSpan::new(pos.into(), 1),
            pest::error::InputLocation::Span((start, end)) => {
                SourceSpan::new(start.into(), end - start)
            }
        };

        let message = match &error.variant {
            pest::error::ErrorVariant::ParsingError { positives, .. } if !positives.is_empty() => {
                let expected: Vec<String> = positives.iter().map(describe_rule).collect();
                format!("expected {}", expected.join(" or "))
            }
            pest::error::ErrorVariant::ParsingError { .. } => "unexpected input".to_string(),
            pest::error::ErrorVariant::CustomError { message } => message.clone(),
        };

        Self::PestError { src, span, message }
    }
}

fn describe_rule(rule: &Rule) -> String {
    match rule {
        Rule::EOI => "end of input".to_string(),
        Rule::expression => "an expression".to_string(),
        Rule::call => "a function call".to_string(),
        Rule::float | Rule::integer => "a number".to_string(),
        Rule::variable | Rule::qualified_name => "a name".to_string(),
        Rule::op_add | Rule::op_subtract | Rule::op_multiply | Rule::op_divide => {
            "an operator".to_string()
        }
        other => format!("{:?}", other),
    }
}

/// Convert a pest span to a miette span
pub(crate) fn source_span(span: pest::Span<'_>) -> SourceSpan {
    SourceSpan::new(span.start().into(), span.end() - span.start())
}
