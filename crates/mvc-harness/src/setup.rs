//! `MockMvc` setup entry points
//!
//! - [`annotation_config_setup`]: configuration classes
//! - [`xml_config_setup`]: definition document locations
//! - [`standalone_setup`]: programmatic definitions, no configuration source
//!
//! The first two return a [`ContextMockMvcBuilder`] that forwards every
//! [`ContextBuilder`] option. All of them refresh the context on `build()`.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use mvc_context::{
    ConfigClass, ContextBuilder, ContextInitializer, Definition, WebContext, WiringEngine,
};

use crate::Result;
use crate::dispatch::{DispatchEngine, RouteDispatcher};
use crate::mock_mvc::MockMvc;

/// Start from configuration classes.
pub fn annotation_config_setup<I>(classes: I) -> Result<ContextMockMvcBuilder>
where
    I: IntoIterator<Item = ConfigClass>,
{
    ContextMockMvcBuilder::new().classes(classes)
}

/// Start from definition document locations (`classpath:`, `file:` or
/// classpath-relative).
pub fn xml_config_setup<I, S>(locations: I) -> Result<ContextMockMvcBuilder>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    ContextMockMvcBuilder::new().locations(locations)
}

/// Start from programmatic definitions.
pub fn standalone_setup<I>(definitions: I) -> StandaloneMockMvcBuilder
where
    I: IntoIterator<Item = Definition>,
{
    StandaloneMockMvcBuilder {
        definitions: definitions.into_iter().collect(),
        default_servlet_handler: false,
        profiles: Vec::new(),
        web_app_root: None,
        classpath_roots: Vec::new(),
        initializers: Vec::new(),
        engine: Arc::new(RouteDispatcher),
    }
}

/// Builds a [`MockMvc`] from configuration sources.
pub struct ContextMockMvcBuilder {
    builder: ContextBuilder,
    engine: Arc<dyn DispatchEngine>,
}

impl ContextMockMvcBuilder {
    fn new() -> Self {
        Self {
            builder: ContextBuilder::new(),
            engine: Arc::new(RouteDispatcher),
        }
    }

    pub fn classes<I>(mut self, classes: I) -> Result<Self>
    where
        I: IntoIterator<Item = ConfigClass>,
    {
        self.builder.classes(classes)?;
        Ok(self)
    }

    pub fn locations<I, S>(mut self, locations: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.builder.locations(locations)?;
        Ok(self)
    }

    pub fn profiles<I, S>(mut self, names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.builder.profiles(names)?;
        Ok(self)
    }

    /// Serve resources from `path`, resolved against the classpath roots when
    /// `is_classpath_relative` and against the filesystem otherwise.
    pub fn configure_web_app_root_dir(
        mut self,
        path: impl Into<String>,
        is_classpath_relative: bool,
    ) -> Result<Self> {
        self.builder.web_app_root_dir(path, is_classpath_relative)?;
        Ok(self)
    }

    pub fn classpath_roots<I, P>(mut self, roots: I) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.builder.classpath_roots(roots)?;
        Ok(self)
    }

    pub fn initializer(mut self, initializer: impl ContextInitializer + 'static) -> Result<Self> {
        self.builder.initializer(initializer)?;
        Ok(self)
    }

    pub fn initializers<I>(mut self, initializers: I) -> Result<Self>
    where
        I: IntoIterator<Item = Box<dyn ContextInitializer>>,
    {
        self.builder.initializers(initializers)?;
        Ok(self)
    }

    pub fn allow_definition_overriding(mut self, allow: bool) -> Result<Self> {
        self.builder.allow_definition_overriding(allow)?;
        Ok(self)
    }

    pub fn wiring_engine(self, engine: impl WiringEngine + 'static) -> Self {
        Self {
            builder: self.builder.wiring_engine(engine),
            ..self
        }
    }

    pub fn dispatch_engine(mut self, engine: impl DispatchEngine + 'static) -> Self {
        self.engine = Arc::new(engine);
        self
    }

    /// Build the context and wrap it.
    pub fn build(mut self) -> Result<MockMvc> {
        let context = self.builder.build()?;
        Ok(MockMvc::with_engine(context, self.engine))
    }
}

impl fmt::Debug for ContextMockMvcBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextMockMvcBuilder")
            .field("builder", &self.builder)
            .finish_non_exhaustive()
    }
}

/// Builds a [`MockMvc`] around programmatically registered definitions.
pub struct StandaloneMockMvcBuilder {
    definitions: Vec<Definition>,
    default_servlet_handler: bool,
    profiles: Vec<String>,
    web_app_root: Option<(String, bool)>,
    classpath_roots: Vec<PathBuf>,
    initializers: Vec<Box<dyn ContextInitializer>>,
    engine: Arc<dyn DispatchEngine>,
}

impl StandaloneMockMvcBuilder {
    /// Forward unmatched requests to the `"default"` dispatcher.
    pub fn default_servlet_handler(mut self, enabled: bool) -> Self {
        self.default_servlet_handler = enabled;
        self
    }

    pub fn profiles<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.profiles.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn configure_web_app_root_dir(
        mut self,
        path: impl Into<String>,
        is_classpath_relative: bool,
    ) -> Self {
        self.web_app_root = Some((path.into(), is_classpath_relative));
        self
    }

    pub fn classpath_roots<I, P>(mut self, roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.classpath_roots.extend(roots.into_iter().map(Into::into));
        self
    }

    pub fn initializer(mut self, initializer: impl ContextInitializer + 'static) -> Self {
        self.initializers.push(Box::new(initializer));
        self
    }

    pub fn dispatch_engine(mut self, engine: impl DispatchEngine + 'static) -> Self {
        self.engine = Arc::new(engine);
        self
    }

    /// Register the definitions on a fresh context and refresh it.
    pub fn build(self) -> Result<MockMvc> {
        let mut context = WebContext::new();
        for definition in self.definitions {
            context.register(definition)?;
        }
        if self.default_servlet_handler {
            context.register(Definition::default_servlet_handler())?;
        }
        tracing::debug!(
            definitions = context.definition_names().len(),
            "Building standalone context"
        );

        let mut builder = ContextBuilder::with_context(context);
        if !self.profiles.is_empty() {
            builder.profiles(self.profiles)?;
        }
        if let Some((path, is_classpath_relative)) = self.web_app_root {
            builder.web_app_root_dir(path, is_classpath_relative)?;
        }
        builder
            .classpath_roots(self.classpath_roots)?
            .initializers(self.initializers)?;

        let context = builder.build()?;
        Ok(MockMvc::with_engine(context, self.engine))
    }
}

impl fmt::Debug for StandaloneMockMvcBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StandaloneMockMvcBuilder")
            .field("definitions", &self.definitions.len())
            .field("default_servlet_handler", &self.default_servlet_handler)
            .field("profiles", &self.profiles)
            .finish_non_exhaustive()
    }
}
