//! Synthetic requests

use std::collections::BTreeMap;
use std::fmt;

/// HTTP request method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Method {
    Get,
    Head,
    Post,
    Put,
    Patch,
    Delete,
    Options,
    Trace,
}

impl Method {
    /// Parse a method name, case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Some(Self::Get),
            "HEAD" => Some(Self::Head),
            "POST" => Some(Self::Post),
            "PUT" => Some(Self::Put),
            "PATCH" => Some(Self::Patch),
            "DELETE" => Some(Self::Delete),
            "OPTIONS" => Some(Self::Options),
            "TRACE" => Some(Self::Trace),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Head => "HEAD",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Options => "OPTIONS",
            Self::Trace => "TRACE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An in-memory request handed to the dispatch engine.
///
/// Header names are stored lowercased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockRequest {
    method: Method,
    path: String,
    params: Vec<(String, String)>,
    headers: BTreeMap<String, String>,
    body: Vec<u8>,
    path_variables: BTreeMap<String, String>,
}

impl MockRequest {
    pub fn method(&self) -> Method {
        self.method
    }

    /// Request path without the query string.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// First value of a query or form parameter.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Body decoded as UTF-8, lossily.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Variables captured from the matched route pattern.
    pub fn path_variable(&self, name: &str) -> Option<&str> {
        self.path_variables.get(name).map(String::as_str)
    }

    pub fn path_variables(&self) -> &BTreeMap<String, String> {
        &self.path_variables
    }

    /// Set by the dispatch engine once a route pattern matched.
    pub fn set_path_variables(&mut self, variables: BTreeMap<String, String>) {
        self.path_variables = variables;
    }
}

/// Fluent builder for [`MockRequest`].
#[derive(Debug, Clone)]
pub struct MockRequestBuilder {
    request: MockRequest,
}

impl MockRequestBuilder {
    /// Start a request. A query string in `uri` is split into parameters.
    pub fn new(method: Method, uri: &str) -> Self {
        let (path, query) = match uri.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (uri, None),
        };
        let path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{path}")
        };
        let params = query.map(parse_query).unwrap_or_default();

        Self {
            request: MockRequest {
                method,
                path,
                params,
                headers: BTreeMap::new(),
                body: Vec::new(),
                path_variables: BTreeMap::new(),
            },
        }
    }

    pub fn header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.request
            .headers
            .insert(name.to_ascii_lowercase(), value.into());
        self
    }

    pub fn accept(self, media_type: &str) -> Self {
        self.header("accept", media_type)
    }

    pub fn content_type(self, media_type: &str) -> Self {
        self.header("content-type", media_type)
    }

    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.request.params.push((name.into(), value.into()));
        self
    }

    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.request.body = body.into();
        self
    }

    pub fn build(self) -> MockRequest {
        self.request
    }
}

impl From<MockRequestBuilder> for MockRequest {
    fn from(builder: MockRequestBuilder) -> Self {
        builder.build()
    }
}

pub fn request(method: Method, uri: &str) -> MockRequestBuilder {
    MockRequestBuilder::new(method, uri)
}

pub fn get(uri: &str) -> MockRequestBuilder {
    MockRequestBuilder::new(Method::Get, uri)
}

pub fn post(uri: &str) -> MockRequestBuilder {
    MockRequestBuilder::new(Method::Post, uri)
}

pub fn put(uri: &str) -> MockRequestBuilder {
    MockRequestBuilder::new(Method::Put, uri)
}

pub fn delete(uri: &str) -> MockRequestBuilder {
    MockRequestBuilder::new(Method::Delete, uri)
}

fn parse_query(query: &str) -> Vec<(String, String)> {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((key, value)) => (key.to_string(), value.to_string()),
            None => (pair.to_string(), String::new()),
        })
        .collect()
}
