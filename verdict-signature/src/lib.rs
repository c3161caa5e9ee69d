//! Verdict signatures
//!
//! Typed signatures for library functions and the overload resolution that
//! picks one of them at a call site.
//!
//! ## Architecture
//!
//! - **Types**: [`ConcreteType`] tags and the [`TypeConstraint`] a parameter
//!   places on its argument, including constrained wildcards
//! - **Signatures**: ordered, named parameters plus a return constraint,
//!   validated as they join an [`OverloadSet`]
//! - **Resolution**: first-match unification producing a [`ResolvedCall`]
//!
//! Everything here is immutable once built and free of shared state, so one
//! overload set can be resolved from many threads at once.

#![allow(clippy::uninlined_format_args)]

pub mod error;
pub mod resolution;
pub mod signature;
pub mod types;

pub use error::{RegistrationError, ResolveError, TypeNameError};
pub use resolution::{resolve_overload, unify_signature, Bindings, ResolvedCall};
pub use signature::{param, OverloadSet, Parameter, Signature};
pub use types::{any_number, render_type_list, render_type_set, ConcreteType, TypeConstraint};

#[cfg(test)]
mod tests;
