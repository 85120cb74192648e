//! Synthetic serving environment
//!
//! An in-memory stand-in for the container that would normally host the
//! application: it knows the web resource base path, how to load resources
//! below it, and which named dispatchers exist.
//!
//! Named dispatcher lookup consults a small override table before the base
//! table. The override table always maps [`DEFAULT_DISPATCHER_NAME`] to a
//! fixed synthetic dispatcher, so static-resource fallbacks that forward to
//! `"default"` work without a real container.

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

use crate::loader::{Resource, ResourceLoader};
use crate::path::ResourcePath;
use crate::request::MockRequest;
use crate::response::MockResponse;

/// Name of the container's static-resource dispatcher.
pub const DEFAULT_DISPATCHER_NAME: &str = "default";

/// A dispatcher that records where a request was sent instead of rendering it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDispatcher {
    resource: String,
}

impl RequestDispatcher {
    pub fn new(resource: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
        }
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// Record a forward to this dispatcher's resource on the response.
    pub fn forward(&self, request: &MockRequest, response: &mut MockResponse) {
        tracing::debug!(
            path = request.path(),
            target = %self.resource,
            "Forwarding request"
        );
        response.set_forwarded_url(self.resource.clone());
    }

    /// Record an include of this dispatcher's resource on the response.
    pub fn include(&self, request: &MockRequest, response: &mut MockResponse) {
        tracing::debug!(
            path = request.path(),
            target = %self.resource,
            "Including resource"
        );
        response.add_included_url(self.resource.clone());
    }
}

/// In-memory stand-in for the serving container.
#[derive(Debug, Clone)]
pub struct SyntheticServingEnvironment {
    base_path: ResourcePath,
    loader: ResourceLoader,
    attributes: BTreeMap<String, String>,
    overrides: HashMap<String, RequestDispatcher>,
    named_dispatchers: HashMap<String, RequestDispatcher>,
}

impl SyntheticServingEnvironment {
    /// Create an environment rooted at `base_path`, resolved through `loader`.
    ///
    /// An empty base path is legal and resolves against the loader's own root.
    pub fn new(base_path: impl AsRef<str>, loader: ResourceLoader) -> Self {
        let mut overrides = HashMap::new();
        overrides.insert(
            DEFAULT_DISPATCHER_NAME.to_string(),
            RequestDispatcher::new(DEFAULT_DISPATCHER_NAME),
        );

        Self {
            base_path: ResourcePath::new(base_path),
            loader,
            attributes: BTreeMap::new(),
            overrides,
            named_dispatchers: HashMap::new(),
        }
    }

    pub fn base_path(&self) -> &ResourcePath {
        &self.base_path
    }

    pub fn loader(&self) -> &ResourceLoader {
        &self.loader
    }

    /// Look up a named dispatcher.
    ///
    /// Overrides are checked first; any other name goes to the base table,
    /// which yields `None` for unknown names.
    pub fn named_dispatcher(&self, name: &str) -> Option<RequestDispatcher> {
        if let Some(dispatcher) = self.overrides.get(name) {
            return Some(dispatcher.clone());
        }
        self.named_dispatchers.get(name).cloned()
    }

    /// Register a dispatcher in the base table.
    pub fn register_named_dispatcher(&mut self, name: impl Into<String>, dispatcher: RequestDispatcher) {
        self.named_dispatchers.insert(name.into(), dispatcher);
    }

    /// Location of a web resource below the base path.
    pub fn resource_location(&self, path: &str) -> String {
        self.base_path.join(path).as_location()
    }

    /// Resolve a web resource below the base path.
    pub fn resource(&self, path: &str) -> Resource {
        self.loader.resource(&self.resource_location(path))
    }

    /// Canonical filesystem path of an existing web resource.
    pub fn real_path(&self, path: &str) -> Option<PathBuf> {
        self.resource(path).real_path()
    }

    /// Media type for a resource path, by extension.
    pub fn mime_type(&self, path: &str) -> Option<&'static str> {
        let extension = ResourcePath::new(path).extension()?.to_ascii_lowercase();
        let media_type = match extension.as_str() {
            "html" | "htm" => "text/html",
            "css" => "text/css",
            "js" => "text/javascript",
            "json" => "application/json",
            "xml" => "application/xml",
            "txt" => "text/plain",
            "png" => "image/png",
            "jpg" | "jpeg" => "image/jpeg",
            "gif" => "image/gif",
            "svg" => "image/svg+xml",
            _ => return None,
        };
        Some(media_type)
    }

    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

impl Default for SyntheticServingEnvironment {
    fn default() -> Self {
        Self::new("", ResourceLoader::file_system())
    }
}
