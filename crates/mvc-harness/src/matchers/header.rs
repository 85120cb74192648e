use crate::matchers::{MatchError, ResultMatcher, assert_equals};
use crate::result::MvcResult;

#[derive(Debug, Clone, Copy)]
pub struct HeaderResultMatchers;

impl HeaderResultMatchers {
    /// Expect header `name` to be present with `expected` as value.
    pub fn string(self, name: impl Into<String>, expected: impl Into<String>) -> impl ResultMatcher {
        let name = name.into();
        let expected = expected.into();
        move |result: &MvcResult| {
            let actual = result.response().header_value(&name).unwrap_or("null");
            assert_equals(&format!("Response header {name}"), expected.as_str(), actual)
        }
    }

    /// Expect header `name` to be absent.
    pub fn does_not_exist(self, name: impl Into<String>) -> impl ResultMatcher {
        let name = name.into();
        move |result: &MvcResult| match result.response().header_value(&name) {
            Some(value) => Err(MatchError::failure(
                format!("Response header {name}"),
                "no header",
                value,
            )),
            None => Ok(()),
        }
    }
}
