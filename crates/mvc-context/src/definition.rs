//! Component definitions
//!
//! A [`Definition`] is one named contribution to a handling context: a plain
//! value, a request handler bound to a route, or the marker that enables
//! default-servlet handling. Definitions carry an optional profile condition
//! and remember where they came from.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use mvc_env::{Method, MockRequest, MockResponse};

use crate::context::WebContext;
use crate::error::HandlerError;

/// Name under which the default-servlet marker is registered.
pub const DEFAULT_SERVLET_HANDLER_NAME: &str = "defaultServletHandler";

/// Where a definition was declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    /// Contributed by a configuration class
    Class(String),
    /// Read from a definition document
    Location(String),
    /// Registered directly on a context
    Programmatic,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Class(name) => write!(f, "class {name}"),
            Self::Location(location) => write!(f, "location {location}"),
            Self::Programmatic => write!(f, "programmatic registration"),
        }
    }
}

/// Handles a dispatched request.
pub trait Handler: Send + Sync {
    fn handle(
        &self,
        request: &MockRequest,
        context: &WebContext,
    ) -> std::result::Result<MockResponse, HandlerError>;
}

impl<F> Handler for F
where
    F: Fn(&MockRequest, &WebContext) -> std::result::Result<MockResponse, HandlerError>
        + Send
        + Sync,
{
    fn handle(
        &self,
        request: &MockRequest,
        context: &WebContext,
    ) -> std::result::Result<MockResponse, HandlerError> {
        self(request, context)
    }
}

/// Handler that always answers with the same response.
#[derive(Debug, Clone)]
pub struct StaticHandler {
    response: MockResponse,
}

impl StaticHandler {
    pub fn new(response: MockResponse) -> Self {
        Self { response }
    }
}

impl Handler for StaticHandler {
    fn handle(
        &self,
        _request: &MockRequest,
        _context: &WebContext,
    ) -> std::result::Result<MockResponse, HandlerError> {
        Ok(self.response.clone())
    }
}

/// A handler bound to a method and path pattern.
///
/// `method` of `None` accepts any method. Path patterns may contain
/// `{name}` variables.
#[derive(Clone)]
pub struct HandlerDefinition {
    method: Option<Method>,
    path: String,
    handler: Arc<dyn Handler>,
}

impl HandlerDefinition {
    pub fn new(method: Option<Method>, path: impl Into<String>, handler: impl Handler + 'static) -> Self {
        Self {
            method,
            path: path.into(),
            handler: Arc::new(handler),
        }
    }

    /// Bind a closure as handler.
    pub fn from_fn<F>(method: Option<Method>, path: impl Into<String>, f: F) -> Self
    where
        F: Fn(&MockRequest, &WebContext) -> std::result::Result<MockResponse, HandlerError>
            + Send
            + Sync
            + 'static,
    {
        Self::new(method, path, f)
    }

    pub fn method(&self) -> Option<Method> {
        self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn handler(&self) -> &dyn Handler {
        self.handler.as_ref()
    }
}

impl fmt::Debug for HandlerDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerDefinition")
            .field("method", &self.method)
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

/// What a definition contributes.
#[derive(Debug, Clone)]
pub enum DefinitionKind {
    Value(serde_json::Value),
    Handler(HandlerDefinition),
    DefaultServletHandler,
}

/// A named contribution to a handling context.
#[derive(Debug, Clone)]
pub struct Definition {
    name: String,
    profiles: Vec<String>,
    origin: Origin,
    kind: DefinitionKind,
}

impl Definition {
    pub fn new(name: impl Into<String>, kind: DefinitionKind) -> Self {
        Self {
            name: name.into(),
            profiles: Vec::new(),
            origin: Origin::Programmatic,
            kind,
        }
    }

    /// A plain value component.
    pub fn value(name: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        Self::new(name, DefinitionKind::Value(value.into()))
    }

    /// A request handler component.
    pub fn handler(name: impl Into<String>, handler: HandlerDefinition) -> Self {
        Self::new(name, DefinitionKind::Handler(handler))
    }

    /// The marker enabling forwarding of unmatched requests to the
    /// container's `"default"` dispatcher.
    pub fn default_servlet_handler() -> Self {
        Self::new(DEFAULT_SERVLET_HANDLER_NAME, DefinitionKind::DefaultServletHandler)
    }

    /// Restrict this definition to a profile condition.
    pub fn with_profiles<I, S>(mut self, profiles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.profiles = profiles.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_origin(mut self, origin: Origin) -> Self {
        self.origin = origin;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn profiles(&self) -> &[String] {
        &self.profiles
    }

    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    pub fn kind(&self) -> &DefinitionKind {
        &self.kind
    }

    pub fn as_value(&self) -> Option<&serde_json::Value> {
        match &self.kind {
            DefinitionKind::Value(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_handler(&self) -> Option<&HandlerDefinition> {
        match &self.kind {
            DefinitionKind::Handler(handler) => Some(handler),
            _ => None,
        }
    }
}

/// Static response shape declared in a definition document.
pub(crate) fn static_response(
    status: u16,
    content_type: Option<&str>,
    headers: &BTreeMap<String, String>,
    body: &str,
) -> MockResponse {
    let mut response = MockResponse::with_status(status).body(body);
    if let Some(content_type) = content_type {
        response.set_header("content-type", content_type);
    }
    for (name, value) in headers {
        response.set_header(name, value.clone());
    }
    response
}
