//! Captured outcome of a dispatched request

use mvc_context::HandlerError;
use mvc_env::{MockRequest, MockResponse};

/// Request, response and handling metadata of one exchange.
#[derive(Debug, Clone)]
pub struct MvcResult {
    request: MockRequest,
    response: MockResponse,
    handler: Option<String>,
    resolved_exception: Option<HandlerError>,
}

impl MvcResult {
    pub fn new(request: MockRequest, response: MockResponse) -> Self {
        Self {
            request,
            response,
            handler: None,
            resolved_exception: None,
        }
    }

    pub fn with_handler(mut self, handler: impl Into<String>) -> Self {
        self.handler = Some(handler.into());
        self
    }

    pub fn with_resolved_exception(mut self, error: HandlerError) -> Self {
        self.resolved_exception = Some(error);
        self
    }

    pub fn request(&self) -> &MockRequest {
        &self.request
    }

    pub fn response(&self) -> &MockResponse {
        &self.response
    }

    /// Name of the handler definition that served the request.
    pub fn handler(&self) -> Option<&str> {
        self.handler.as_deref()
    }

    /// Error a handler returned and the engine turned into a response.
    pub fn resolved_exception(&self) -> Option<&HandlerError> {
        self.resolved_exception.as_ref()
    }

    pub fn status(&self) -> u16 {
        self.response.status()
    }

    pub fn body(&self) -> &[u8] {
        self.response.body_bytes()
    }

    pub fn text(&self) -> String {
        self.response.text()
    }
}
