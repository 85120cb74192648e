//! Result matchers
//!
//! A [`ResultMatcher`] inspects an [`MvcResult`] and either passes or reports
//! a [`MatchError`]. Two failure kinds are kept apart:
//!
//! - [`MatchError::Setup`]: the expectation could not be evaluated
//!   (malformed query, unparsable body, failed coercion)
//! - [`MatchError::Failure`]: it was evaluated and did not hold
//!
//! Entry points mirror the usual vocabulary: [`xpath`], [`status`],
//! [`content`], [`header`], [`handler`] and [`forwarded_url`].

mod content;
mod header;
mod status;
pub mod template;
pub mod xpath;

use std::fmt;

use crate::result::MvcResult;

pub use content::ContentResultMatchers;
pub use header::HeaderResultMatchers;
pub use status::StatusResultMatchers;
pub use xpath::{MatchedNode, NodeKind, XpathExpectations, XpathMatcher, xpath};

/// An expectation on a dispatched result.
pub trait ResultMatcher {
    fn matches(&self, result: &MvcResult) -> Result<(), MatchError>;
}

impl<F> ResultMatcher for F
where
    F: Fn(&MvcResult) -> Result<(), MatchError>,
{
    fn matches(&self, result: &MvcResult) -> Result<(), MatchError> {
        self(result)
    }
}

/// An expectation that did not hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssertionFailure {
    pub description: String,
    pub expected: String,
    pub actual: String,
}

impl AssertionFailure {
    pub fn new(
        description: impl Into<String>,
        expected: impl fmt::Display,
        actual: impl fmt::Display,
    ) -> Self {
        Self {
            description: description.into(),
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }
}

impl fmt::Display for AssertionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: expected <{}> but was <{}>",
            self.description, self.expected, self.actual
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatchError {
    /// The expectation could not be evaluated
    #[error("Assertion setup failed for {query}: {message}")]
    Setup { query: String, message: String },

    /// The evaluated value did not match
    #[error("{0}")]
    Failure(AssertionFailure),
}

impl MatchError {
    pub fn setup(query: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Setup {
            query: query.into(),
            message: message.into(),
        }
    }

    pub fn failure(
        description: impl Into<String>,
        expected: impl fmt::Display,
        actual: impl fmt::Display,
    ) -> Self {
        Self::Failure(AssertionFailure::new(description, expected, actual))
    }

    pub fn is_setup(&self) -> bool {
        matches!(self, Self::Setup { .. })
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }
}

/// Fail with `description` unless `expected == actual`.
pub(crate) fn assert_equals<T>(description: &str, expected: T, actual: T) -> Result<(), MatchError>
where
    T: PartialEq + fmt::Display,
{
    if expected == actual {
        Ok(())
    } else {
        Err(MatchError::failure(description, expected, actual))
    }
}

/// Expectations on the response status.
pub fn status() -> StatusResultMatchers {
    StatusResultMatchers
}

/// Expectations on the response body and content type.
pub fn content() -> ContentResultMatchers {
    ContentResultMatchers
}

/// Expectations on response headers.
pub fn header() -> HeaderResultMatchers {
    HeaderResultMatchers
}

/// Expectations on the handler that served the request.
pub fn handler() -> HandlerResultMatchers {
    HandlerResultMatchers
}

/// Expect the request to have been forwarded to `url`.
pub fn forwarded_url(url: impl Into<String>) -> impl ResultMatcher {
    let expected = url.into();
    move |result: &MvcResult| {
        let actual = result.response().forwarded_url().unwrap_or("null");
        assert_equals("Forwarded URL", expected.as_str(), actual)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct HandlerResultMatchers;

impl HandlerResultMatchers {
    /// Expect the named handler definition to have served the request.
    pub fn name(self, expected: impl Into<String>) -> impl ResultMatcher {
        let expected = expected.into();
        move |result: &MvcResult| {
            let actual = result.handler().unwrap_or("null");
            assert_equals("Handler", expected.as_str(), actual)
        }
    }
}
