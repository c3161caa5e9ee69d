//! Function registry
//!
//! Registration happens once, through a [`RegistryBuilder`]. Building freezes
//! the entries into a [`Registry`] that is never mutated again, so it can be
//! shared by reference across any number of evaluation threads. Registries
//! are ordinary values: tests build several side by side.

use crate::config::LibraryConfig;
use crate::error::RuntimeError;
use crate::function::LibraryFunction;
use crate::math;
use crate::value::Value;
use indexmap::IndexMap;
use indexmap::map::Entry;
use tracing::debug;
use verdict_signature::{ConcreteType, RegistrationError, ResolveError, ResolvedCall};

/// The mutable registration phase
#[derive(Debug)]
pub struct RegistryBuilder {
    config: LibraryConfig,
    functions: IndexMap<String, LibraryFunction>,
}

impl RegistryBuilder {
    pub fn new(config: LibraryConfig) -> Self {
        Self {
            config,
            functions: IndexMap::new(),
        }
    }

    pub fn config(&self) -> &LibraryConfig {
        &self.config
    }

    /// Add a function; names must be unique
    pub fn register(&mut self, function: LibraryFunction) -> Result<(), RegistrationError> {
        match self.functions.entry(function.name().to_string()) {
            Entry::Occupied(entry) => Err(RegistrationError::DuplicateFunction {
                function: entry.key().clone(),
            }),
            Entry::Vacant(entry) => {
                debug!(
                    function = function.name(),
                    signatures = function.overloads().len(),
                    inline = function.has_inline(),
                    "registered library function"
                );
                entry.insert(function);
                Ok(())
            }
        }
    }

    pub fn build(self) -> Registry {
        debug!(functions = self.functions.len(), "registry frozen");
        Registry {
            config: self.config,
            functions: self.functions,
        }
    }
}

/// Immutable mapping from qualified names to library functions
#[derive(Debug, Clone)]
pub struct Registry {
    config: LibraryConfig,
    functions: IndexMap<String, LibraryFunction>,
}

impl Registry {
    /// The standard math library under the default configuration
    pub fn standard() -> Result<Self, RegistrationError> {
        Self::with_config(LibraryConfig::default())
    }

    /// The standard math library under `config`
    pub fn with_config(config: LibraryConfig) -> Result<Self, RegistrationError> {
        let mut builder = RegistryBuilder::new(config);
        math::install(&mut builder)?;
        Ok(builder.build())
    }

    /// An empty registry, for callers that register their own functions
    pub fn builder(config: LibraryConfig) -> RegistryBuilder {
        RegistryBuilder::new(config)
    }

    pub fn config(&self) -> &LibraryConfig {
        &self.config
    }

    pub fn get(&self, name: &str) -> Option<&LibraryFunction> {
        self.functions.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Functions in registration order
    pub fn functions(&self) -> impl Iterator<Item = &LibraryFunction> {
        self.functions.values()
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    fn lookup(&self, name: &str) -> Result<&LibraryFunction, ResolveError> {
        self.functions
            .get(name)
            .ok_or_else(|| ResolveError::UnknownFunction {
                name: name.to_string(),
            })
    }

    /// Pick the overload of `name` that accepts `argument_types`
    pub fn resolve(
        &self,
        name: &str,
        argument_types: &[ConcreteType],
    ) -> Result<ResolvedCall, ResolveError> {
        self.lookup(name)?.resolve(argument_types)
    }

    /// Evaluate a previously resolved call
    pub fn evaluate(&self, resolved: &ResolvedCall, args: &[Value]) -> Result<Value, RuntimeError> {
        let result = self.lookup(&resolved.function)?.evaluate(resolved, args);
        if let Err(error) = &result {
            debug!(function = %resolved.function, %error, "evaluation failed");
        }
        result
    }

    /// The inline form of a resolved call, or `None` when the function has
    /// none or inlining is disabled
    pub fn emit(&self, resolved: &ResolvedCall, args: &[&str]) -> Result<Option<String>, RuntimeError> {
        let fragment = self.lookup(&resolved.function)?.emit(resolved, args)?;
        Ok(fragment.filter(|_| self.config.inline))
    }

    /// Resolve from the argument values' own types, then evaluate
    pub fn call(&self, name: &str, args: &[Value]) -> Result<Value, RuntimeError> {
        let argument_types: Vec<ConcreteType> = args.iter().map(Value::concrete_type).collect();
        let resolved = self.resolve(name, &argument_types)?;
        self.evaluate(&resolved, args)
    }
}
