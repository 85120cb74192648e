//! Captured responses

use std::collections::BTreeMap;

/// An in-memory response produced by a handler or the dispatch engine.
///
/// Header names are stored lowercased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockResponse {
    status: u16,
    headers: BTreeMap<String, String>,
    body: Vec<u8>,
    forwarded_url: Option<String>,
    included_urls: Vec<String>,
}

impl MockResponse {
    /// A `200 OK` response with an empty body.
    pub fn ok() -> Self {
        Self::with_status(200)
    }

    pub fn with_status(status: u16) -> Self {
        Self {
            status,
            headers: BTreeMap::new(),
            body: Vec::new(),
            forwarded_url: None,
            included_urls: Vec::new(),
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn set_status(&mut self, status: u16) {
        self.status = status;
    }

    /// Builder-style header setter.
    pub fn header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set_header(name, value);
        self
    }

    pub fn set_header(&mut self, name: &str, value: impl Into<String>) {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
    }

    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    /// Builder-style `Content-Type` setter.
    pub fn content_type(self, media_type: &str) -> Self {
        self.header("content-type", media_type)
    }

    pub fn content_type_value(&self) -> Option<&str> {
        self.header_value("content-type")
    }

    /// Builder-style body setter.
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    pub fn set_body(&mut self, body: impl Into<Vec<u8>>) {
        self.body = body.into();
    }

    pub fn body_bytes(&self) -> &[u8] {
        &self.body
    }

    /// Body decoded as UTF-8, lossily.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Target recorded by a named dispatcher forward.
    pub fn forwarded_url(&self) -> Option<&str> {
        self.forwarded_url.as_deref()
    }

    pub fn set_forwarded_url(&mut self, url: impl Into<String>) {
        self.forwarded_url = Some(url.into());
    }

    pub fn included_urls(&self) -> &[String] {
        &self.included_urls
    }

    pub fn add_included_url(&mut self, url: impl Into<String>) {
        self.included_urls.push(url.into());
    }
}

impl Default for MockResponse {
    fn default() -> Self {
        Self::ok()
    }
}
