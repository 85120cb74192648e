//! Definition registry
//!
//! Keeps definitions in registration order. Registering a name that is
//! already present replaces the earlier definition in its original slot,
//! unless overriding has been disallowed.

use std::collections::HashMap;

use crate::definition::Definition;
use crate::{Error, Result};

/// Insertion-ordered map of definitions by name.
#[derive(Debug, Clone)]
pub struct DefinitionRegistry {
    definitions: Vec<Definition>,
    index: HashMap<String, usize>,
    allow_overriding: bool,
}

impl DefinitionRegistry {
    /// Create an empty registry that allows overriding.
    pub fn new() -> Self {
        Self {
            definitions: Vec::new(),
            index: HashMap::new(),
            allow_overriding: true,
        }
    }

    pub fn set_allow_overriding(&mut self, allow: bool) {
        self.allow_overriding = allow;
    }

    pub fn allows_overriding(&self) -> bool {
        self.allow_overriding
    }

    /// Register a definition.
    ///
    /// An existing definition with the same name is replaced in place. With
    /// overriding disallowed this is a resolution error naming both origins.
    pub fn register(&mut self, definition: Definition) -> Result<()> {
        match self.index.get(definition.name()) {
            Some(&slot) => {
                let existing = &self.definitions[slot];
                if !self.allow_overriding {
                    return Err(Error::resolution(
                        definition.origin().to_string(),
                        format!(
                            "definition '{}' is already registered by {} and overriding is disabled",
                            definition.name(),
                            existing.origin()
                        ),
                    ));
                }
                tracing::debug!(
                    name = definition.name(),
                    previous = %existing.origin(),
                    replacement = %definition.origin(),
                    "Overriding definition"
                );
                self.definitions[slot] = definition;
            }
            None => {
                self.index
                    .insert(definition.name().to_string(), self.definitions.len());
                self.definitions.push(definition);
            }
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Definition> {
        self.index.get(name).map(|&slot| &self.definitions[slot])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Definition names in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.definitions.iter().map(Definition::name).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Definition> {
        self.definitions.iter()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Keep only the definitions for which `keep` returns true.
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&Definition) -> bool,
    {
        self.definitions.retain(|definition| keep(definition));
        self.reindex();
    }

    fn reindex(&mut self) {
        self.index = self
            .definitions
            .iter()
            .enumerate()
            .map(|(slot, definition)| (definition.name().to_string(), slot))
            .collect();
    }
}

impl Default for DefinitionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
