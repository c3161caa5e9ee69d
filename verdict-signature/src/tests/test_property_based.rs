//! Property-based tests for overload resolution
//!
//! Resolution must be deterministic and must bind a repeated wildcard to a
//! single type.

use crate::resolution::resolve_overload;
use crate::signature::{param, OverloadSet, Signature};
use crate::types::{any_number, ConcreteType, TypeConstraint};
use proptest::prelude::*;

fn proptest_config() -> ProptestConfig {
    if std::env::var("CI").is_ok() {
        ProptestConfig::default()
    } else {
        ProptestConfig {
            cases: 64,
            max_shrink_iters: 100,
            ..ProptestConfig::default()
        }
    }
}

fn any_concrete() -> impl Strategy<Value = ConcreteType> {
    let leaf = prop_oneof![
        Just(ConcreteType::Null),
        Just(ConcreteType::Boolean),
        Just(ConcreteType::Int),
        Just(ConcreteType::Long),
        Just(ConcreteType::Float),
        Just(ConcreteType::Double),
        Just(ConcreteType::String),
        Just(ConcreteType::Bytes),
    ];
    leaf.prop_recursive(2, 4, 1, |inner| {
        prop_oneof![
            inner.clone().prop_map(ConcreteType::array),
            inner.prop_map(ConcreteType::map),
        ]
    })
}

fn mixed_overloads() -> OverloadSet {
    OverloadSet::new(
        "mixed",
        vec![
            Signature::new(
                vec![
                    param("a", TypeConstraint::wildcard("A", any_number())),
                    param("b", TypeConstraint::wildcard_ref("A")),
                ],
                TypeConstraint::wildcard_ref("A"),
            ),
            Signature::new(
                vec![
                    param("a", TypeConstraint::concrete(ConcreteType::Double)),
                    param("b", TypeConstraint::wildcard("B", any_number())),
                ],
                TypeConstraint::wildcard_ref("B"),
            ),
            Signature::new(
                vec![param("a", TypeConstraint::concrete(ConcreteType::String))],
                TypeConstraint::concrete(ConcreteType::Boolean),
            ),
        ],
    )
    .unwrap()
}

proptest! {
    #![proptest_config(proptest_config())]
    #[test]
    fn test_resolution_is_deterministic(args in prop::collection::vec(any_concrete(), 0..4)) {
        let overloads = mixed_overloads();
        let first = resolve_overload("mixed", &overloads, &args);
        let second = resolve_overload("mixed", &overloads, &args);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn test_repeated_wildcard_binds_one_type(a in any_concrete(), b in any_concrete()) {
        let overloads = mixed_overloads();
        if let Ok(resolved) = resolve_overload("mixed", &overloads, &[a.clone(), b.clone()]) {
            if resolved.signature_index == 0 {
                prop_assert_eq!(&a, &b);
                prop_assert_eq!(&resolved.return_type, &a);
            } else {
                prop_assert_eq!(resolved.signature_index, 1);
                prop_assert_eq!(&a, &ConcreteType::Double);
                prop_assert_eq!(&resolved.return_type, &b);
            }
        }
    }

    #[test]
    fn test_resolved_parameters_satisfy_constraints(args in prop::collection::vec(any_concrete(), 0..4)) {
        let overloads = mixed_overloads();
        if let Ok(resolved) = resolve_overload("mixed", &overloads, &args) {
            let signature = overloads.get(resolved.signature_index).unwrap();
            for (parameter, ty) in signature.parameters().iter().zip(&resolved.parameter_types) {
                prop_assert!(parameter.constraint.accepts(ty));
            }
        }
    }
}
