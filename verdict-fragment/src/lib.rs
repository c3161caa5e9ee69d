// Verdict Fragment Library
// Pest-based parser for inline expression fragments

pub mod ast;
pub mod error;
pub mod parser;

pub use ast::*;
pub use error::*;
pub use parser::{FragmentParser, Rule};

/// Parse a fragment into an expression tree
pub fn parse_fragment(input: &str) -> Result<Expression, ParseError> {
    parser::FragmentParser::parse_fragment(input)
}

#[cfg(test)]
mod tests;
