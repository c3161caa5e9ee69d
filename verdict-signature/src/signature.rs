//! Signatures and overload sets
//!
//! A [`Signature`] is written freely, then validated when it joins an
//! [`OverloadSet`]. Validation rejects duplicate parameter names, wildcards
//! with no allowed types, conflicting wildcard declarations and return
//! wildcards that no parameter binds. It also fills in the allowed set of
//! every wildcard reference, so a validated signature never carries an empty
//! wildcard.

use crate::error::RegistrationError;
use crate::types::{render_type_set, ConcreteType, TypeConstraint};
use indexmap::{IndexMap, IndexSet};
use std::fmt;

/// A named parameter and the constraint it places on its argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    pub constraint: TypeConstraint,
}

impl Parameter {
    pub fn new(name: &str, constraint: TypeConstraint) -> Self {
        Self {
            name: name.to_string(),
            constraint,
        }
    }
}

/// Shorthand for [`Parameter::new`]
pub fn param(name: &str, constraint: TypeConstraint) -> Parameter {
    Parameter::new(name, constraint)
}

/// One callable shape of a function
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    parameters: Vec<Parameter>,
    return_constraint: TypeConstraint,
}

impl Signature {
    pub fn new(parameters: Vec<Parameter>, return_constraint: TypeConstraint) -> Self {
        Self {
            parameters,
            return_constraint,
        }
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    pub fn return_constraint(&self) -> &TypeConstraint {
        &self.return_constraint
    }

    pub fn arity(&self) -> usize {
        self.parameters.len()
    }

    /// Every wildcard symbol with its allowed set, in order of first appearance
    pub fn wildcards(&self) -> IndexMap<&str, &IndexSet<ConcreteType>> {
        let mut wildcards = IndexMap::new();
        let constraints = self
            .parameters
            .iter()
            .map(|p| &p.constraint)
            .chain(std::iter::once(&self.return_constraint));

        for constraint in constraints {
            if let TypeConstraint::Wildcard { symbol, allowed } = constraint {
                wildcards.entry(symbol.as_str()).or_insert(allowed);
            }
        }
        wildcards
    }

    fn validate(self, function: &str, index: usize) -> Result<Signature, RegistrationError> {
        let mut names = IndexSet::new();
        for parameter in &self.parameters {
            if !names.insert(parameter.name.as_str()) {
                return Err(RegistrationError::DuplicateParameter {
                    function: function.to_string(),
                    signature: index,
                    parameter: parameter.name.clone(),
                });
            }
        }

        if let Some(symbol) = self.return_constraint.symbol() {
            let bound = self
                .parameters
                .iter()
                .any(|p| p.constraint.symbol() == Some(symbol));
            if !bound {
                return Err(RegistrationError::UnboundReturnWildcard {
                    function: function.to_string(),
                    signature: index,
                    symbol: symbol.to_string(),
                });
            }
        }

        // First pass: collect the declaring occurrence of every symbol.
        let mut declared: IndexMap<String, IndexSet<ConcreteType>> = IndexMap::new();
        let constraints = self
            .parameters
            .iter()
            .map(|p| &p.constraint)
            .chain(std::iter::once(&self.return_constraint));
        for constraint in constraints {
            let TypeConstraint::Wildcard { symbol, allowed } = constraint else {
                continue;
            };
            if allowed.is_empty() {
                continue;
            }
            match declared.get(symbol) {
                Some(first) if first != allowed => {
                    return Err(RegistrationError::ConflictingWildcard {
                        function: function.to_string(),
                        signature: index,
                        symbol: symbol.clone(),
                        first: render_type_set(first),
                        second: render_type_set(allowed),
                    });
                }
                Some(_) => {}
                None => {
                    declared.insert(symbol.clone(), allowed.clone());
                }
            }
        }

        // Second pass: fill references from their declarations.
        let fill = |constraint: TypeConstraint| -> Result<TypeConstraint, RegistrationError> {
            match constraint {
                TypeConstraint::Wildcard { symbol, allowed } if allowed.is_empty() => {
                    match declared.get(&symbol) {
                        Some(allowed) => Ok(TypeConstraint::Wildcard {
                            symbol,
                            allowed: allowed.clone(),
                        }),
                        None => Err(RegistrationError::EmptyWildcard {
                            function: function.to_string(),
                            signature: index,
                            symbol,
                        }),
                    }
                }
                other => Ok(other),
            }
        };

        let parameters = self
            .parameters
            .into_iter()
            .map(|p| {
                Ok(Parameter {
                    name: p.name,
                    constraint: fill(p.constraint)?,
                })
            })
            .collect::<Result<Vec<_>, RegistrationError>>()?;
        let return_constraint = fill(self.return_constraint)?;

        Ok(Signature {
            parameters,
            return_constraint,
        })
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params: Vec<String> = self
            .parameters
            .iter()
            .map(|p| format!("{}: {}", p.name, p.constraint))
            .collect();
        write!(f, "({}) -> {}", params.join(", "), self.return_constraint)?;

        let wildcards = self.wildcards();
        if !wildcards.is_empty() {
            let bounds: Vec<String> = wildcards
                .iter()
                .map(|(symbol, allowed)| format!("{} in {}", symbol, render_type_set(allowed)))
                .collect();
            write!(f, " where {}", bounds.join(", "))?;
        }
        Ok(())
    }
}

/// The ordered, non-empty list of signatures sharing one function name.
///
/// Declaration order is the resolution order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverloadSet {
    signatures: Vec<Signature>,
}

impl OverloadSet {
    /// Validate every signature for `function` and collect them in order
    pub fn new(function: &str, signatures: Vec<Signature>) -> Result<Self, RegistrationError> {
        if signatures.is_empty() {
            return Err(RegistrationError::EmptyOverloadSet {
                function: function.to_string(),
            });
        }

        let signatures = signatures
            .into_iter()
            .enumerate()
            .map(|(index, signature)| signature.validate(function, index))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { signatures })
    }

    /// A single-signature overload set
    pub fn single(function: &str, signature: Signature) -> Result<Self, RegistrationError> {
        Self::new(function, vec![signature])
    }

    pub fn get(&self, index: usize) -> Option<&Signature> {
        self.signatures.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Signature> {
        self.signatures.iter()
    }

    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    /// Always false for a constructed set; present for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }
}

impl<'a> IntoIterator for &'a OverloadSet {
    type Item = &'a Signature;
    type IntoIter = std::slice::Iter<'a, Signature>;

    fn into_iter(self) -> Self::IntoIter {
        self.signatures.iter()
    }
}

impl fmt::Display for OverloadSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.signatures.iter().map(|s| s.to_string()).collect();
        write!(f, "{}", rendered.join(" | "))
    }
}
