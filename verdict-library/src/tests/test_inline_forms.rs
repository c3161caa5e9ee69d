use crate::function::InlineForm;
use crate::primitives::{self, PRIMITIVE_NAMES};
use crate::registry::Registry;
use crate::value::Value;
use std::collections::HashSet;
use verdict_fragment::{parse_fragment, Expression, ExpressionKind};
use verdict_signature::ConcreteType;

fn placeholders(arity: usize) -> Vec<String> {
    (0..arity).map(|n| format!("a{}", n)).collect()
}

fn called_names(expression: &Expression, names: &mut Vec<String>) {
    match &expression.kind {
        ExpressionKind::Call(call) => {
            names.push(call.name.clone());
            for argument in &call.arguments {
                called_names(argument, names);
            }
        }
        ExpressionKind::Negate(operand) => called_names(operand, names),
        ExpressionKind::BinaryOp(operation) => {
            called_names(&operation.left, names);
            called_names(&operation.right, names);
        }
        _ => {}
    }
}

#[test]
fn test_primitive_table_is_complete() {
    let listed: HashSet<&str> = PRIMITIVE_NAMES.iter().copied().collect();
    assert_eq!(listed.len(), PRIMITIVE_NAMES.len(), "duplicate primitive name");

    for name in PRIMITIVE_NAMES {
        assert!(
            primitives::lookup(name).is_some(),
            "primitive {} is listed but cannot be looked up",
            name
        );
    }
    assert!(primitives::lookup("m.sin").is_none());
}

#[test]
fn test_inline_forms_only_call_primitives() {
    let registry = Registry::standard().expect("standard registry must build");

    for function in registry.functions() {
        let Some(inline) = function.inline_form() else {
            continue;
        };
        if let InlineForm::Primitive(name) = inline {
            assert!(
                PRIMITIVE_NAMES.contains(name),
                "{} inlines to unknown primitive {}",
                function.name(),
                name
            );
        }

        for signature in function.overloads() {
            let argument_types: Vec<_> = signature
                .parameters()
                .iter()
                .map(|_| ConcreteType::Double)
                .collect();
            let resolved = function
                .resolve(&argument_types)
                .expect("inline functions take doubles");
            let args = placeholders(resolved.arity());
            let args: Vec<&str> = args.iter().map(String::as_str).collect();

            let fragment = function
                .emit(&resolved, &args)
                .expect("emit succeeds")
                .expect("function has an inline form");
            let expression = parse_fragment(&fragment)
                .unwrap_or_else(|e| panic!("{} emitted unparsable {:?}: {}", function.name(), fragment, e));

            let mut names = Vec::new();
            called_names(&expression, &mut names);
            for name in names {
                assert!(
                    PRIMITIVE_NAMES.contains(&name.as_str()),
                    "{} emits a call to {}",
                    function.name(),
                    name
                );
            }
        }
    }
}

#[test]
fn test_evaluators_agree_with_their_primitive() {
    let registry = Registry::standard().expect("standard registry must build");
    let sample = [-2.5, -1e-10, -0.0, 0.0, 1e-10, 0.5, 3.0, f64::INFINITY];

    for function in registry.functions() {
        let Some(InlineForm::Primitive(name)) = function.inline_form() else {
            continue;
        };
        let primitive = primitives::lookup(name).expect("inline primitive exists");

        for &x in &sample {
            let operands = vec![x; primitive.arity()];
            let values: Vec<Value> = operands.iter().copied().map(Value::Double).collect();
            let expected = primitive.apply(name, &operands).expect("arity matches");
            let actual = registry
                .call(function.name(), &values)
                .expect("double arguments evaluate");

            assert!(
                actual.identical(&Value::Double(expected)),
                "{}({:?}) gave {} but {} gives {:?}",
                function.name(),
                x,
                actual,
                name,
                expected
            );
        }
    }
}

#[test]
fn test_expm1_is_exp_minus_one_on_both_paths() {
    assert!(primitives::lookup("expm1").is_none());

    let registry = Registry::standard().expect("standard registry must build");
    let x = 1e-10;
    let evaluated = registry
        .call("m.expm1", &[Value::Double(x)])
        .expect("expm1 evaluates");

    assert!(evaluated.identical(&Value::Double(x.exp() - 1.0)));
}
