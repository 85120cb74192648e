//! Context builder state machine
//!
//! A [`ContextBuilder`] accumulates configuration sources, profiles, the web
//! application root and initializers, then builds a refreshed [`WebContext`]
//! exactly once.
//!
//! ```text
//! Unconfigured --classes/locations--> Configured --build--> Built
//! ```
//!
//! A builder created with [`ContextBuilder::with_context`] skips source
//! resolution and may build straight from `Unconfigured`. Every call made in
//! `Built` is a configuration error.

use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;

use mvc_env::{ResourceLoader, SyntheticServingEnvironment};

use crate::config::ConfigClass;
use crate::context::WebContext;
use crate::environment::{Environment, validate_profile};
use crate::initializer::ContextInitializer;
use crate::registry::DefinitionRegistry;
use crate::wiring::{DefaultWiringEngine, WiringEngine};
use crate::{Error, Result};

/// Web application root used until one is configured.
pub const DEFAULT_WEB_APP_ROOT: &str = "src/main/webapp";

/// Lifecycle of a [`ContextBuilder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuilderState {
    /// No configuration source registered yet
    Unconfigured,
    /// At least one configuration source registered
    Configured,
    /// `build()` has been attempted; terminal
    Built,
}

pub struct ContextBuilder {
    state: BuilderState,
    classes: Vec<ConfigClass>,
    locations: Vec<String>,
    profiles: BTreeSet<String>,
    web_app_root: String,
    web_app_root_classpath_relative: bool,
    classpath_roots: Vec<PathBuf>,
    initializers: Vec<Box<dyn ContextInitializer>>,
    allow_definition_overriding: Option<bool>,
    context: Option<WebContext>,
    engine: Box<dyn WiringEngine>,
}

impl ContextBuilder {
    /// Builder that resolves configuration sources with the default engine.
    pub fn new() -> Self {
        Self {
            state: BuilderState::Unconfigured,
            classes: Vec::new(),
            locations: Vec::new(),
            profiles: BTreeSet::new(),
            web_app_root: DEFAULT_WEB_APP_ROOT.to_string(),
            web_app_root_classpath_relative: false,
            classpath_roots: Vec::new(),
            initializers: Vec::new(),
            allow_definition_overriding: None,
            context: None,
            engine: Box::new(DefaultWiringEngine),
        }
    }

    /// Builder that finalizes an existing, inactive context instead of
    /// resolving configuration sources.
    pub fn with_context(context: WebContext) -> Self {
        Self {
            context: Some(context),
            ..Self::new()
        }
    }

    /// Replace the wiring engine.
    pub fn wiring_engine(mut self, engine: impl WiringEngine + 'static) -> Self {
        self.engine = Box::new(engine);
        self
    }

    pub fn state(&self) -> BuilderState {
        self.state
    }

    /// Append configuration classes. An empty batch is rejected.
    pub fn classes<I>(&mut self, classes: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = ConfigClass>,
    {
        self.ensure_not_built()?;
        let classes: Vec<ConfigClass> = classes.into_iter().collect();
        if classes.is_empty() {
            return Err(Error::configuration(
                "at least one configuration class must be supplied",
            ));
        }
        tracing::debug!(
            classes = ?classes.iter().map(ConfigClass::name).collect::<Vec<_>>(),
            "Registering configuration classes"
        );
        self.classes.extend(classes);
        self.state = BuilderState::Configured;
        Ok(self)
    }

    /// Append definition document locations. An empty batch is rejected.
    pub fn locations<I, S>(&mut self, locations: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ensure_not_built()?;
        let locations: Vec<String> = locations.into_iter().map(Into::into).collect();
        if locations.is_empty() {
            return Err(Error::configuration(
                "at least one definition location must be supplied",
            ));
        }
        tracing::debug!(?locations, "Registering definition locations");
        self.locations.extend(locations);
        self.state = BuilderState::Configured;
        Ok(self)
    }

    /// Merge profile names into the set activated at build.
    pub fn profiles<I, S>(&mut self, names: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ensure_not_built()?;
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        for name in &names {
            validate_profile(name)?;
        }
        self.profiles.extend(names);
        Ok(self)
    }

    /// Set the web application root and how it is resolved.
    pub fn web_app_root_dir(
        &mut self,
        path: impl Into<String>,
        is_classpath_relative: bool,
    ) -> Result<&mut Self> {
        self.ensure_not_built()?;
        self.web_app_root = path.into();
        self.web_app_root_classpath_relative = is_classpath_relative;
        Ok(self)
    }

    /// Roots searched by classpath-relative resolution.
    pub fn classpath_roots<I, P>(&mut self, roots: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.ensure_not_built()?;
        self.classpath_roots
            .extend(roots.into_iter().map(Into::into));
        Ok(self)
    }

    pub fn initializer(&mut self, initializer: impl ContextInitializer + 'static) -> Result<&mut Self> {
        self.ensure_not_built()?;
        self.initializers.push(Box::new(initializer));
        Ok(self)
    }

    pub fn initializers<I>(&mut self, initializers: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = Box<dyn ContextInitializer>>,
    {
        self.ensure_not_built()?;
        self.initializers.extend(initializers);
        Ok(self)
    }

    pub fn allow_definition_overriding(&mut self, allow: bool) -> Result<&mut Self> {
        self.ensure_not_built()?;
        self.allow_definition_overriding = Some(allow);
        Ok(self)
    }

    /// Build and refresh the context. Single-shot.
    ///
    /// Without a pre-supplied context at least one configuration source is
    /// required; that check leaves the builder usable. Any attempt past it
    /// moves the builder to `Built`, whether or not it succeeds.
    pub fn build(&mut self) -> Result<WebContext> {
        self.ensure_not_built()?;

        match &self.context {
            None if self.classes.is_empty() && self.locations.is_empty() => {
                return Err(Error::configuration(
                    "At least one configuration class or definition location is required",
                ));
            }
            Some(context) if context.is_active() => {
                return Err(Error::configuration(
                    "the supplied context has already been refreshed",
                ));
            }
            _ => {}
        }

        tracing::debug!(previous = ?self.state, "Building web context");
        self.state = BuilderState::Built;

        let serving = self.serving_environment();
        let mut context = match self.context.take() {
            Some(context) => self.prepare_supplied(context, serving)?,
            None => self.instantiate_from_sources(serving)?,
        };

        for initializer in std::mem::take(&mut self.initializers) {
            tracing::debug!(initializer = initializer.name(), "Applying initializer");
            initializer
                .initialize(&mut context)
                .map_err(|e| Error::Initializer {
                    name: initializer.name().to_string(),
                    message: e.to_string(),
                })?;
        }

        self.engine.finalize(&mut context)?;
        Ok(context)
    }

    fn instantiate_from_sources(&self, serving: SyntheticServingEnvironment) -> Result<WebContext> {
        let mut environment = Environment::new();
        if !self.profiles.is_empty() {
            environment.activate_profiles(self.profiles.iter().cloned())?;
        }

        let mut registry = DefinitionRegistry::new();
        if let Some(allow) = self.allow_definition_overriding {
            registry.set_allow_overriding(allow);
        }

        let mut count = 0;
        if !self.classes.is_empty() {
            count += self
                .engine
                .resolve_from_classes(&self.classes, &environment, &mut registry)?;
        }
        if !self.locations.is_empty() {
            let loader = self.definition_loader();
            count += self.engine.resolve_from_locations(
                &self.locations,
                &environment,
                &loader,
                &mut registry,
            )?;
        }
        tracing::debug!(
            definitions = count,
            classes = self.classes.len(),
            locations = self.locations.len(),
            "Resolved configuration sources"
        );

        self.engine.instantiate(registry, environment, serving)
    }

    fn prepare_supplied(
        &self,
        mut context: WebContext,
        serving: SyntheticServingEnvironment,
    ) -> Result<WebContext> {
        if !self.classes.is_empty() || !self.locations.is_empty() {
            tracing::warn!(
                classes = self.classes.len(),
                locations = self.locations.len(),
                "Ignoring configuration sources, a context was supplied"
            );
        }
        if !self.profiles.is_empty() {
            context
                .environment_mut()?
                .activate_profiles(self.profiles.iter().cloned())?;
        }
        if let Some(allow) = self.allow_definition_overriding {
            context.set_allow_definition_overriding(allow);
        }
        context.set_serving_environment(serving)?;
        Ok(context)
    }

    /// Loader for definition documents. Plain locations are classpath-relative.
    fn definition_loader(&self) -> ResourceLoader {
        ResourceLoader::classpath().with_classpath_roots(self.classpath_roots.clone())
    }

    fn serving_environment(&self) -> SyntheticServingEnvironment {
        let loader = if self.web_app_root_classpath_relative {
            ResourceLoader::classpath()
        } else {
            ResourceLoader::file_system()
        };
        let loader = loader.with_classpath_roots(self.classpath_roots.clone());
        SyntheticServingEnvironment::new(&self.web_app_root, loader)
    }

    fn ensure_not_built(&self) -> Result<()> {
        if self.state == BuilderState::Built {
            return Err(Error::configuration("context builder has already been built"));
        }
        Ok(())
    }
}

impl Default for ContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ContextBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextBuilder")
            .field("state", &self.state)
            .field("classes", &self.classes)
            .field("locations", &self.locations)
            .field("profiles", &self.profiles)
            .field("web_app_root", &self.web_app_root)
            .field(
                "web_app_root_classpath_relative",
                &self.web_app_root_classpath_relative,
            )
            .field("initializers", &self.initializers.len())
            .field("has_context", &self.context.is_some())
            .finish_non_exhaustive()
    }
}
