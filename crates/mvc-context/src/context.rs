//! The handling context
//!
//! A [`WebContext`] owns the definitions, the environment and the serving
//! environment it was built with. It stays mutable until [`refresh`] compiles
//! its handler routes and marks it active, after which definitions and the
//! environment are read-only.
//!
//! [`refresh`]: WebContext::refresh

use std::collections::BTreeMap;

use mvc_env::{Method, SyntheticServingEnvironment};

use crate::definition::{Definition, DefinitionKind, HandlerDefinition};
use crate::environment::Environment;
use crate::registry::DefinitionRegistry;
use crate::route::{RouteMatch, RouteTable};
use crate::{Error, Result};

#[derive(Debug, Clone, Default)]
pub struct WebContext {
    registry: DefinitionRegistry,
    environment: Environment,
    serving: SyntheticServingEnvironment,
    attributes: BTreeMap<String, String>,
    routes: RouteTable,
    default_servlet_handling: bool,
    active: bool,
}

impl WebContext {
    /// An empty, inactive context with a default environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Instantiate a context from resolved definitions.
    pub fn from_parts(
        registry: DefinitionRegistry,
        environment: Environment,
        serving: SyntheticServingEnvironment,
    ) -> Self {
        Self {
            registry,
            environment,
            serving,
            ..Self::default()
        }
    }

    /// Register a definition before refresh.
    pub fn register(&mut self, definition: Definition) -> Result<()> {
        self.ensure_inactive("register definitions")?;
        self.registry.register(definition)
    }

    pub fn register_value(
        &mut self,
        name: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Result<()> {
        self.register(Definition::value(name, value))
    }

    pub fn register_handler(&mut self, name: impl Into<String>, handler: HandlerDefinition) -> Result<()> {
        self.register(Definition::handler(name, handler))
    }

    pub fn set_allow_definition_overriding(&mut self, allow: bool) {
        self.registry.set_allow_overriding(allow);
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Mutable environment access before refresh.
    pub fn environment_mut(&mut self) -> Result<&mut Environment> {
        self.ensure_inactive("modify the environment")?;
        Ok(&mut self.environment)
    }

    pub fn serving_environment(&self) -> &SyntheticServingEnvironment {
        &self.serving
    }

    /// Attach the serving environment before refresh.
    pub fn set_serving_environment(&mut self, serving: SyntheticServingEnvironment) -> Result<()> {
        self.ensure_inactive("replace the serving environment")?;
        self.serving = serving;
        Ok(())
    }

    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    /// Validate and freeze the context.
    ///
    /// Drops definitions whose profile condition does not hold, compiles
    /// handler routes and enables default-servlet handling when its marker
    /// is present. Fails on ambiguous route mappings, leaving the context
    /// inactive with its definitions untouched.
    pub fn refresh(&mut self) -> Result<()> {
        self.ensure_inactive("refresh")?;

        let environment = &self.environment;
        let mut routes = RouteTable::new();
        let mut default_servlet_handling = false;
        for definition in self
            .registry
            .iter()
            .filter(|definition| environment.accepts_profiles(definition.profiles()))
        {
            match definition.kind() {
                DefinitionKind::Handler(handler) => {
                    routes.insert(handler.method(), handler.path(), definition.name())?;
                }
                DefinitionKind::DefaultServletHandler => default_servlet_handling = true,
                DefinitionKind::Value(_) => {}
            }
        }

        self.registry
            .retain(|definition| environment.accepts_profiles(definition.profiles()));
        self.routes = routes;
        self.default_servlet_handling = default_servlet_handling;
        self.active = true;

        tracing::info!(
            definitions = self.registry.len(),
            routes = self.routes.len(),
            profiles = ?self.environment.active_profiles(),
            default_servlet_handling,
            "Refreshed web context"
        );
        Ok(())
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn contains_definition(&self, name: &str) -> bool {
        self.registry.contains(name)
    }

    /// Definition names in registration order.
    pub fn definition_names(&self) -> Vec<&str> {
        self.registry.names()
    }

    pub fn definition(&self, name: &str) -> Option<&Definition> {
        self.registry.get(name)
    }

    pub fn value(&self, name: &str) -> Option<&serde_json::Value> {
        self.registry.get(name).and_then(Definition::as_value)
    }

    pub fn handler_definition(&self, name: &str) -> Option<&HandlerDefinition> {
        self.registry.get(name).and_then(Definition::as_handler)
    }

    /// Route lookup. Always `None` before refresh.
    pub fn resolve(&self, method: Method, path: &str) -> Option<RouteMatch> {
        self.routes.resolve(method, path)
    }

    pub fn default_servlet_handling(&self) -> bool {
        self.default_servlet_handling
    }

    fn ensure_inactive(&self, action: &str) -> Result<()> {
        if self.active {
            return Err(Error::configuration(format!(
                "cannot {action}: context is already active"
            )));
        }
        Ok(())
    }
}
