// Verdict Fragment Parser
// Pest grammar plus a Pratt parser for operator precedence

use crate::ast::*;
use crate::error::*;
use pest::iterators::{Pair, Pairs};
use pest::pratt_parser::{Assoc, Op, PrattParser};
use pest::Parser;
use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "grammar.pest"]
pub struct FragmentParser;

impl FragmentParser {
    /// Parse a complete fragment (the whole input must be one expression)
    pub fn parse_fragment(input: &str) -> ParseResult<Expression> {
        let mut pairs = Self::parse(Rule::fragment, input)
            .map_err(|e| ParseError::from_pest_error(e, input.to_string()))?;

        let fragment = pairs.next().ok_or_else(|| ParseError::UnexpectedRule {
            expected: "fragment".to_string(),
            found: Rule::EOI,
        })?;

        let expression = fragment
            .into_inner()
            .find(|pair| pair.as_rule() == Rule::expression)
            .ok_or_else(|| ParseError::UnexpectedRule {
                expected: "expression".to_string(),
                found: Rule::fragment,
            })?;

        Self::parse_expression(expression, input)
    }

    /// Operator precedence from lowest to highest
    fn pratt_parser() -> PrattParser<Rule> {
        PrattParser::new()
            // Additive
            .op(Op::infix(Rule::op_add, Assoc::Left) | Op::infix(Rule::op_subtract, Assoc::Left))
            // Multiplicative
            .op(Op::infix(Rule::op_multiply, Assoc::Left)
                | Op::infix(Rule::op_divide, Assoc::Left))
            // Unary minus binds tightest
            .op(Op::prefix(Rule::op_negate))
    }

    fn parse_expression(pair: Pair<Rule>, src: &str) -> ParseResult<Expression> {
        Self::parse_operations(pair.into_inner(), src)
    }

    fn parse_operations(pairs: Pairs<Rule>, src: &str) -> ParseResult<Expression> {
        Self::pratt_parser()
            .map_primary(|primary| Self::parse_primary(primary, src))
            .map_prefix(|op, operand| {
                let operand = operand?;
                match op.as_rule() {
                    Rule::op_negate => Ok(Self::negate(op.as_span().start(), operand)),
                    found => Err(ParseError::UnexpectedRule {
                        expected: "prefix operator".to_string(),
                        found,
                    }),
                }
            })
            .map_infix(|left, op, right| {
                let left = left?;
                let right = right?;

                let operator = match op.as_rule() {
                    Rule::op_add => BinaryOperator::Add,
                    Rule::op_subtract => BinaryOperator::Subtract,
                    Rule::op_multiply => BinaryOperator::Multiply,
                    Rule::op_divide => BinaryOperator::Divide,
                    found => {
                        return Err(ParseError::UnexpectedRule {
                            expected: "binary operator".to_string(),
                            found,
                        })
                    }
                };

                let span = Span::new(left.span.start, right.span.end);
                Ok(Expression {
                    kind: ExpressionKind::BinaryOp(BinaryOperation {
                        left: Box::new(left),
                        operator,
                        right: Box::new(right),
                    }),
                    span,
                })
            })
            .parse(pairs)
    }

    /// Negation folds into numeric literals so `-2147483648` is a valid int
    fn negate(start: usize, operand: Expression) -> Expression {
        let span = Span::new(start, operand.span.end);
        let kind = match operand.kind {
            ExpressionKind::Integer(literal) => ExpressionKind::Integer(IntegerLiteral {
                value: -literal.value,
                long: literal.long,
            }),
            ExpressionKind::Float(literal) => ExpressionKind::Float(FloatLiteral {
                value: -literal.value,
                single: literal.single,
            }),
            kind => ExpressionKind::Negate(Box::new(Expression {
                kind,
                span: operand.span,
            })),
        };
        Expression { kind, span }
    }

    fn parse_primary(pair: Pair<Rule>, src: &str) -> ParseResult<Expression> {
        let span = Span::new(pair.as_span().start(), pair.as_span().end());

        let kind = match pair.as_rule() {
            Rule::expression => return Self::parse_expression(pair, src),
            Rule::integer => ExpressionKind::Integer(Self::parse_integer(&pair, src)?),
            Rule::float => ExpressionKind::Float(Self::parse_float(&pair, src)?),
            Rule::variable => ExpressionKind::Variable(pair.as_str().to_string()),
            Rule::call => ExpressionKind::Call(Self::parse_call(pair, src)?),
            found => {
                return Err(ParseError::UnexpectedRule {
                    expected: "operand".to_string(),
                    found,
                })
            }
        };

        Ok(Expression { kind, span })
    }

    fn parse_integer(pair: &Pair<Rule>, src: &str) -> ParseResult<IntegerLiteral> {
        let text = pair.as_str();
        let (digits, long) = match text.strip_suffix('L') {
            Some(digits) => (digits, true),
            None => (text, false),
        };

        let value = digits
            .parse::<i128>()
            .map_err(|_| ParseError::InvalidInteger {
                src: src.to_string(),
                span: source_span(pair.as_span()),
                found: text.to_string(),
            })?;

        Ok(IntegerLiteral { value, long })
    }

    fn parse_float(pair: &Pair<Rule>, src: &str) -> ParseResult<FloatLiteral> {
        let text = pair.as_str();
        let invalid = || ParseError::InvalidFloat {
            src: src.to_string(),
            span: source_span(pair.as_span()),
            found: text.to_string(),
        };

        let (digits, single) = match text.strip_suffix('f') {
            Some(digits) => (digits, true),
            None => (text, false),
        };

        let wide = digits.parse::<f64>().map_err(|_| invalid())?;
        if !wide.is_finite() {
            return Err(invalid());
        }

        // Single literals hold the correctly rounded f32 when it is in range;
        // otherwise the wide value is kept so narrowing reports the overflow.
        let value = match digits.parse::<f32>() {
            Ok(narrow) if single && narrow.is_finite() => narrow as f64,
            _ => wide,
        };

        Ok(FloatLiteral { value, single })
    }

    fn parse_call(pair: Pair<Rule>, src: &str) -> ParseResult<FunctionCall> {
        let mut inner = pair.into_inner();

        let name = inner
            .next()
            .filter(|p| p.as_rule() == Rule::qualified_name)
            .ok_or_else(|| ParseError::UnexpectedRule {
                expected: "qualified_name".to_string(),
                found: Rule::call,
            })?
            .as_str()
            .to_string();

        let arguments = inner
            .map(|argument| Self::parse_expression(argument, src))
            .collect::<ParseResult<Vec<_>>>()?;

        Ok(FunctionCall { name, arguments })
    }
}
