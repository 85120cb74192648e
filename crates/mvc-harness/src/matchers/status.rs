use crate::matchers::{ResultMatcher, assert_equals};
use crate::result::MvcResult;

#[derive(Debug, Clone, Copy)]
pub struct StatusResultMatchers;

impl StatusResultMatchers {
    pub fn is(self, expected: u16) -> impl ResultMatcher {
        move |result: &MvcResult| assert_equals("Status", expected, result.status())
    }

    pub fn is_ok(self) -> impl ResultMatcher {
        self.is(200)
    }

    pub fn is_not_found(self) -> impl ResultMatcher {
        self.is(404)
    }

    pub fn is_internal_server_error(self) -> impl ResultMatcher {
        self.is(500)
    }
}
