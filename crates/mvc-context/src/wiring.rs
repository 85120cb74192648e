//! Wiring engine seam
//!
//! The builder never reads sources or instantiates contexts itself; it goes
//! through a [`WiringEngine`]. [`DefaultWiringEngine`] wires the bundled
//! readers and [`WebContext`].

use mvc_env::{ResourceLoader, SyntheticServingEnvironment};

use crate::Result;
use crate::config::ConfigClass;
use crate::context::WebContext;
use crate::environment::Environment;
use crate::reader::{ClassDefinitionReader, LocationDefinitionReader};
use crate::registry::DefinitionRegistry;

/// Turns configuration sources into a finalized handling context.
pub trait WiringEngine: Send + Sync {
    /// Register definitions contributed by configuration classes.
    fn resolve_from_classes(
        &self,
        classes: &[ConfigClass],
        environment: &Environment,
        registry: &mut DefinitionRegistry,
    ) -> Result<usize>;

    /// Register definitions read from document locations.
    fn resolve_from_locations(
        &self,
        locations: &[String],
        environment: &Environment,
        loader: &ResourceLoader,
        registry: &mut DefinitionRegistry,
    ) -> Result<usize>;

    /// Create an inactive context from resolved definitions.
    fn instantiate(
        &self,
        registry: DefinitionRegistry,
        environment: Environment,
        serving: SyntheticServingEnvironment,
    ) -> Result<WebContext>;

    /// Refresh the context.
    fn finalize(&self, context: &mut WebContext) -> Result<()>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultWiringEngine;

impl WiringEngine for DefaultWiringEngine {
    fn resolve_from_classes(
        &self,
        classes: &[ConfigClass],
        environment: &Environment,
        registry: &mut DefinitionRegistry,
    ) -> Result<usize> {
        ClassDefinitionReader::new(environment).read(classes, registry)
    }

    fn resolve_from_locations(
        &self,
        locations: &[String],
        environment: &Environment,
        loader: &ResourceLoader,
        registry: &mut DefinitionRegistry,
    ) -> Result<usize> {
        LocationDefinitionReader::new(environment, loader).read(locations, registry)
    }

    fn instantiate(
        &self,
        registry: DefinitionRegistry,
        environment: Environment,
        serving: SyntheticServingEnvironment,
    ) -> Result<WebContext> {
        Ok(WebContext::from_parts(registry, environment, serving))
    }

    fn finalize(&self, context: &mut WebContext) -> Result<()> {
        context.refresh()
    }
}
