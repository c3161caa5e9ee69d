// Verdict Fragment AST
// Expression tree for inline fragments, with source spans

use std::fmt;

/// Byte range of a node in the fragment source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    pub kind: ExpressionKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExpressionKind {
    Integer(IntegerLiteral),
    Float(FloatLiteral),
    Variable(String),
    Call(FunctionCall),
    Negate(Box<Expression>),
    BinaryOp(BinaryOperation),
}

/// Integer literal. The value is kept wide; range is checked on evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntegerLiteral {
    pub value: i128,
    /// `L` suffix: a 64-bit literal
    pub long: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatLiteral {
    /// Always finite. For single-precision literals this holds the rounded
    /// `f32` value, or the unrounded value when it is beyond `f32` range.
    pub value: f64,
    /// `f` suffix: a 32-bit literal
    pub single: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    /// Dotted names (`m.round`) are library functions, bare names are primitives
    pub name: String,
    pub arguments: Vec<Expression>,
}

impl FunctionCall {
    pub fn is_qualified(&self) -> bool {
        self.name.contains('.')
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryOperation {
    pub left: Box<Expression>,
    pub operator: BinaryOperator,
    pub right: Box<Expression>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl BinaryOperator {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
        }
    }
}

// Rendering is fully parenthesized so it re-parses to the same tree.
impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExpressionKind::Integer(literal) => {
                write!(f, "{}", literal.value)?;
                if literal.long {
                    write!(f, "L")?;
                }
                Ok(())
            }
            ExpressionKind::Float(literal) => {
                if literal.single && literal.value.abs() <= f32::MAX as f64 {
                    write!(f, "{:?}f", literal.value as f32)
                } else if literal.single {
                    write!(f, "{:?}f", literal.value)
                } else {
                    write!(f, "{:?}", literal.value)
                }
            }
            ExpressionKind::Variable(name) => write!(f, "{}", name),
            ExpressionKind::Call(call) => {
                let arguments: Vec<String> =
                    call.arguments.iter().map(|arg| arg.to_string()).collect();
                write!(f, "{}({})", call.name, arguments.join(", "))
            }
            ExpressionKind::Negate(operand) => write!(f, "-({})", operand),
            ExpressionKind::BinaryOp(operation) => write!(
                f,
                "({} {} {})",
                operation.left,
                operation.operator.symbol(),
                operation.right
            ),
        }
    }
}
