//! Context initializers
//!
//! Initializers receive the instantiated, not yet refreshed context and may
//! register definitions, adjust the environment or set attributes. They run
//! in registration order and the first failure aborts the build.

use crate::Result;
use crate::context::WebContext;

pub trait ContextInitializer {
    fn initialize(&self, context: &mut WebContext) -> Result<()>;

    /// Name used in logs and initializer errors.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

impl<F> ContextInitializer for F
where
    F: Fn(&mut WebContext) -> Result<()>,
{
    fn initialize(&self, context: &mut WebContext) -> Result<()> {
        self(context)
    }
}

/// Wraps an initializer with an explicit name.
pub struct NamedInitializer<I> {
    name: String,
    inner: I,
}

impl<I: ContextInitializer> NamedInitializer<I> {
    pub fn new(name: impl Into<String>, inner: I) -> Self {
        Self {
            name: name.into(),
            inner,
        }
    }
}

impl<I: ContextInitializer> ContextInitializer for NamedInitializer<I> {
    fn initialize(&self, context: &mut WebContext) -> Result<()> {
        self.inner.initialize(context)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
