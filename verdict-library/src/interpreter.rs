//! Fragment interpreter
//!
//! Evaluates parsed fragments against bound values. Dotted calls dispatch
//! through a [`Registry`]; bare calls go to the host [`primitives`]. There is
//! no implicit widening: both operands of an arithmetic operator must have the
//! same numeric type.

use crate::coercion::{check_for_overflow, Wide};
use crate::error::{LibraryError, RuntimeError};
use crate::primitives;
use crate::registry::Registry;
use crate::value::Value;
use indexmap::IndexMap;
use tracing::trace;
use verdict_fragment::{
    parse_fragment, BinaryOperation, BinaryOperator, Expression, ExpressionKind, FunctionCall,
};
use verdict_signature::ConcreteType;

/// Variable bindings visible to a fragment
#[derive(Debug, Clone, Default)]
pub struct Environment {
    variables: IndexMap<String, Value>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name`, replacing any earlier binding
    pub fn define(&mut self, name: impl Into<String>, value: Value) {
        self.variables.insert(name.into(), value);
    }

    /// Builder-style [`Environment::define`]
    pub fn with(mut self, name: impl Into<String>, value: Value) -> Self {
        self.define(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Result<&Value, RuntimeError> {
        self.variables
            .get(name)
            .ok_or_else(|| RuntimeError::UndefinedVariable {
                name: name.to_string(),
            })
    }

    /// Bindings in definition order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.variables.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

pub struct FragmentInterpreter<'r> {
    registry: &'r Registry,
}

impl<'r> FragmentInterpreter<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    /// Parse and evaluate `source` in one step
    pub fn evaluate_source(
        &self,
        source: &str,
        environment: &Environment,
    ) -> Result<Value, LibraryError> {
        let expression = parse_fragment(source)?;
        Ok(self.evaluate(&expression, environment)?)
    }

    pub fn evaluate(
        &self,
        expression: &Expression,
        environment: &Environment,
    ) -> Result<Value, RuntimeError> {
        match &expression.kind {
            ExpressionKind::Integer(literal) => {
                let target = if literal.long {
                    ConcreteType::Long
                } else {
                    ConcreteType::Int
                };
                check_for_overflow("literal", &target, Wide::Integer(literal.value))
            }
            ExpressionKind::Float(literal) => {
                let target = if literal.single {
                    ConcreteType::Float
                } else {
                    ConcreteType::Double
                };
                check_for_overflow("literal", &target, Wide::Real(literal.value))
            }
            ExpressionKind::Variable(name) => environment.get(name).cloned(),
            ExpressionKind::Negate(operand) => {
                let value = self.evaluate(operand, environment)?;
                negate(value)
            }
            ExpressionKind::BinaryOp(operation) => self.evaluate_binary(operation, environment),
            ExpressionKind::Call(call) if call.is_qualified() => {
                let arguments = self.evaluate_arguments(call, environment)?;
                trace!(function = %call.name, arguments = arguments.len(), "library call");
                self.registry.call(&call.name, &arguments)
            }
            ExpressionKind::Call(call) => self.evaluate_primitive(call, environment),
        }
    }

    fn evaluate_arguments(
        &self,
        call: &FunctionCall,
        environment: &Environment,
    ) -> Result<Vec<Value>, RuntimeError> {
        call.arguments
            .iter()
            .map(|argument| self.evaluate(argument, environment))
            .collect()
    }

    fn evaluate_primitive(
        &self,
        call: &FunctionCall,
        environment: &Environment,
    ) -> Result<Value, RuntimeError> {
        let primitive =
            primitives::lookup(&call.name).ok_or_else(|| RuntimeError::UnknownPrimitive {
                name: call.name.clone(),
            })?;

        if primitive.arity() != call.arguments.len() {
            return Err(RuntimeError::WrongArity {
                function: call.name.clone(),
                expected: primitive.arity(),
                found: call.arguments.len(),
            });
        }

        let mut operands = Vec::with_capacity(call.arguments.len());
        for (position, argument) in call.arguments.iter().enumerate() {
            match self.evaluate(argument, environment)? {
                Value::Double(x) => operands.push(x),
                other => {
                    return Err(RuntimeError::ArgumentType {
                        function: call.name.clone(),
                        position,
                        expected: ConcreteType::Double,
                        found: other.concrete_type(),
                    });
                }
            }
        }

        trace!(primitive = %call.name, "primitive call");
        primitive.apply(&call.name, &operands).map(Value::Double)
    }

    fn evaluate_binary(
        &self,
        operation: &BinaryOperation,
        environment: &Environment,
    ) -> Result<Value, RuntimeError> {
        let left = self.evaluate(&operation.left, environment)?;
        let right = self.evaluate(&operation.right, environment)?;
        arithmetic(operation.operator, left, right)
    }
}

fn negate(value: Value) -> Result<Value, RuntimeError> {
    match value {
        Value::Int(n) => check_for_overflow("-", &ConcreteType::Int, Wide::Integer(-(n as i128))),
        Value::Long(n) => check_for_overflow("-", &ConcreteType::Long, Wide::Integer(-(n as i128))),
        Value::Float(x) => Ok(Value::Float(-x)),
        Value::Double(x) => Ok(Value::Double(-x)),
        other => Err(RuntimeError::invalid_operation("-", &[other.concrete_type()])),
    }
}

fn integer_arithmetic(operator: BinaryOperator, a: i128, b: i128) -> Result<i128, RuntimeError> {
    match operator {
        BinaryOperator::Add => Ok(a + b),
        BinaryOperator::Subtract => Ok(a - b),
        BinaryOperator::Multiply => Ok(a * b),
        BinaryOperator::Divide if b == 0 => Err(RuntimeError::DivisionByZero),
        BinaryOperator::Divide => Ok(a / b),
    }
}

fn arithmetic(operator: BinaryOperator, left: Value, right: Value) -> Result<Value, RuntimeError> {
    let symbol = operator.symbol();

    match (left, right) {
        (Value::Int(a), Value::Int(b)) => {
            let result = integer_arithmetic(operator, a as i128, b as i128)?;
            check_for_overflow(symbol, &ConcreteType::Int, Wide::Integer(result))
        }
        (Value::Long(a), Value::Long(b)) => {
            let result = integer_arithmetic(operator, a as i128, b as i128)?;
            check_for_overflow(symbol, &ConcreteType::Long, Wide::Integer(result))
        }
        (Value::Float(a), Value::Float(b)) => Ok(Value::Float(match operator {
            BinaryOperator::Add => a + b,
            BinaryOperator::Subtract => a - b,
            BinaryOperator::Multiply => a * b,
            BinaryOperator::Divide => a / b,
        })),
        (Value::Double(a), Value::Double(b)) => Ok(Value::Double(match operator {
            BinaryOperator::Add => a + b,
            BinaryOperator::Subtract => a - b,
            BinaryOperator::Multiply => a * b,
            BinaryOperator::Divide => a / b,
        })),
        (left, right) => Err(RuntimeError::invalid_operation(
            symbol,
            &[left.concrete_type(), right.concrete_type()],
        )),
    }
}
