//! Handling context assembly
//!
//! This crate turns configuration sources into a refreshed [`WebContext`]:
//!
//! - **Environment**: active and default profiles, `!name` conditions
//! - **Definitions**: values, route handlers and the default-servlet marker,
//!   kept in an insertion-ordered [`DefinitionRegistry`]
//! - **Readers**: [`ConfigClass`] units and TOML/JSON/YAML definition
//!   documents
//! - **Builder**: the single-shot [`ContextBuilder`] state machine, which
//!   applies profiles, runs [`ContextInitializer`]s and refreshes the context
//!   through a [`WiringEngine`]

pub mod builder;
pub mod config;
pub mod context;
pub mod definition;
pub mod environment;
pub mod error;
pub mod initializer;
pub mod reader;
pub mod registry;
pub mod route;
pub mod wiring;

pub use builder::{BuilderState, ContextBuilder, DEFAULT_WEB_APP_ROOT};
pub use config::ConfigClass;
pub use context::WebContext;
pub use definition::{
    DEFAULT_SERVLET_HANDLER_NAME, Definition, DefinitionKind, Handler, HandlerDefinition, Origin,
    StaticHandler,
};
pub use environment::{DEFAULT_PROFILE, Environment};
pub use error::{Error, HandlerError, Result};
pub use initializer::{ContextInitializer, NamedInitializer};
pub use reader::{
    ClassDefinitionReader, ComponentEntry, DefinitionDocument, LocationDefinitionReader,
    RouteEntry,
};
pub use registry::DefinitionRegistry;
pub use route::{RouteMatch, RoutePattern, RouteTable};
pub use wiring::{DefaultWiringEngine, WiringEngine};
