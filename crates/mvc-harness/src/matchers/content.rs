use predicates::Predicate;

use crate::matchers::{MatchError, ResultMatcher, assert_equals};
use crate::result::MvcResult;

#[derive(Debug, Clone, Copy)]
pub struct ContentResultMatchers;

impl ContentResultMatchers {
    /// Expect the body, decoded as UTF-8, to equal `expected`.
    pub fn string(self, expected: impl Into<String>) -> impl ResultMatcher {
        let expected = expected.into();
        move |result: &MvcResult| {
            assert_equals("Response content", expected.as_str(), result.text().as_str())
        }
    }

    /// Expect the body, decoded as UTF-8, to satisfy `predicate`.
    pub fn string_matching<P>(self, predicate: P) -> impl ResultMatcher
    where
        P: Predicate<str>,
    {
        move |result: &MvcResult| {
            let actual = result.text();
            if predicate.eval(&actual) {
                Ok(())
            } else {
                Err(MatchError::failure("Response content", &predicate, actual))
            }
        }
    }

    /// Expect the `Content-Type` header to equal `expected`.
    pub fn content_type(self, expected: impl Into<String>) -> impl ResultMatcher {
        let expected = expected.into();
        move |result: &MvcResult| {
            let actual = result.response().content_type_value().unwrap_or("null");
            assert_equals("Content type", expected.as_str(), actual)
        }
    }
}
