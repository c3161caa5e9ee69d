//! Overload resolution
//!
//! Candidates are tried in declaration order and the first one whose
//! parameters unify with the actual argument types wins. There is no
//! "most specific" ranking. A wildcard binds to exactly one concrete type per
//! call, consistently across every occurrence including the return position.

use crate::error::ResolveError;
use crate::signature::{OverloadSet, Signature};
use crate::types::{ConcreteType, TypeConstraint};
use indexmap::IndexMap;
use tracing::trace;

/// Wildcard symbol to the concrete type it was bound to for one call
pub type Bindings = IndexMap<String, ConcreteType>;

/// The outcome of resolving one call site
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCall {
    pub function: String,
    /// Index of the chosen signature within the function's overload set
    pub signature_index: usize,
    pub bindings: Bindings,
    pub parameter_types: Vec<ConcreteType>,
    pub return_type: ConcreteType,
}

impl ResolvedCall {
    pub fn binding(&self, symbol: &str) -> Option<&ConcreteType> {
        self.bindings.get(symbol)
    }

    pub fn arity(&self) -> usize {
        self.parameter_types.len()
    }
}

/// Unify actual argument types against one signature.
///
/// Returns the wildcard bindings on success, `None` if the signature does not
/// accept these arguments.
pub fn unify_signature(signature: &Signature, actual: &[ConcreteType]) -> Option<Bindings> {
    if signature.arity() != actual.len() {
        return None;
    }

    let mut bindings = Bindings::new();
    for (parameter, actual_type) in signature.parameters().iter().zip(actual) {
        match &parameter.constraint {
            TypeConstraint::Concrete(expected) => {
                if expected != actual_type {
                    return None;
                }
            }
            TypeConstraint::Wildcard { symbol, allowed } => {
                if !allowed.contains(actual_type) {
                    return None;
                }
                match bindings.get(symbol) {
                    Some(bound) if bound != actual_type => return None,
                    Some(_) => {}
                    None => {
                        bindings.insert(symbol.clone(), actual_type.clone());
                    }
                }
            }
        }
    }

    Some(bindings)
}

/// Resolve the return constraint of a unified signature
fn resolve_return(signature: &Signature, bindings: &Bindings) -> Option<ConcreteType> {
    match signature.return_constraint() {
        TypeConstraint::Concrete(ty) => Some(ty.clone()),
        TypeConstraint::Wildcard { symbol, .. } => bindings.get(symbol).cloned(),
    }
}

/// Select the first signature of `overloads` that accepts `actual`
pub fn resolve_overload(
    function: &str,
    overloads: &OverloadSet,
    actual: &[ConcreteType],
) -> Result<ResolvedCall, ResolveError> {
    for (signature_index, signature) in overloads.iter().enumerate() {
        let Some(bindings) = unify_signature(signature, actual) else {
            continue;
        };
        // Registration guarantees a wildcard return is bound by some parameter.
        let Some(return_type) = resolve_return(signature, &bindings) else {
            continue;
        };

        trace!(
            function,
            signature_index,
            return_type = %return_type,
            "resolved overload"
        );

        return Ok(ResolvedCall {
            function: function.to_string(),
            signature_index,
            bindings,
            parameter_types: actual.to_vec(),
            return_type,
        });
    }

    Err(ResolveError::type_mismatch(
        function,
        actual,
        overloads.to_string(),
    ))
}

impl OverloadSet {
    /// See [`resolve_overload`]
    pub fn resolve(
        &self,
        function: &str,
        actual: &[ConcreteType],
    ) -> Result<ResolvedCall, ResolveError> {
        resolve_overload(function, self, actual)
    }
}
