//! Class-style configuration units

use std::fmt;
use std::sync::Arc;

use crate::Result;
use crate::definition::Definition;
use crate::environment::Environment;

type DefineFn = dyn Fn(&Environment) -> Result<Vec<Definition>> + Send + Sync;

/// A named unit of programmatic configuration.
///
/// The `define` closure receives the environment the context is being built
/// with and returns the definitions the unit contributes. A class-level
/// profile condition skips the whole unit when it does not hold.
#[derive(Clone)]
pub struct ConfigClass {
    name: String,
    profiles: Vec<String>,
    define: Arc<DefineFn>,
}

impl ConfigClass {
    pub fn new<F>(name: impl Into<String>, define: F) -> Self
    where
        F: Fn(&Environment) -> Result<Vec<Definition>> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            profiles: Vec::new(),
            define: Arc::new(define),
        }
    }

    /// A unit that always contributes the same definitions.
    pub fn of(name: impl Into<String>, definitions: Vec<Definition>) -> Self {
        Self::new(name, move |_env: &Environment| Ok(definitions.clone()))
    }

    pub fn with_profiles<I, S>(mut self, profiles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.profiles = profiles.into_iter().map(Into::into).collect();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn profiles(&self) -> &[String] {
        &self.profiles
    }

    /// Run the unit against an environment.
    pub fn definitions(&self, environment: &Environment) -> Result<Vec<Definition>> {
        (self.define)(environment)
    }
}

impl fmt::Debug for ConfigClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigClass")
            .field("name", &self.name)
            .field("profiles", &self.profiles)
            .finish_non_exhaustive()
    }
}
