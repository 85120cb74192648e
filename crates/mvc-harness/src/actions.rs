//! Chained expectations on a performed request

use crate::matchers::ResultMatcher;
use crate::print::ResultHandler;
use crate::result::MvcResult;
use crate::Result;

/// Outcome of [`MockMvc::perform`](crate::MockMvc::perform).
///
/// Expectations short-circuit: the first matcher that reports an error stops
/// the chain through `?`.
#[derive(Debug, Clone)]
pub struct ResultActions {
    result: MvcResult,
}

impl ResultActions {
    pub(crate) fn new(result: MvcResult) -> Self {
        Self { result }
    }

    /// Apply `matcher` to the result.
    pub fn and_expect(&self, matcher: impl ResultMatcher) -> Result<&Self> {
        if let Err(error) = matcher.matches(&self.result) {
            tracing::debug!(%error, path = self.result.request().path(), "Expectation not met");
            return Err(error.into());
        }
        Ok(self)
    }

    /// Run `handler` against the result, e.g. [`print`](crate::print()).
    pub fn and_do(&self, handler: impl ResultHandler) -> Result<&Self> {
        handler.handle(&self.result)?;
        Ok(self)
    }

    pub fn result(&self) -> &MvcResult {
        &self.result
    }

    /// Give up the chain and keep the result.
    pub fn and_return(self) -> MvcResult {
        self.result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use crate::matchers::{content, status};
    use mvc_env::MockResponse;
    use mvc_env::request::get;
    use std::cell::Cell;

    fn actions() -> ResultActions {
        ResultActions::new(MvcResult::new(
            get("/test").build(),
            MockResponse::ok().content_type("text/plain").body("success"),
        ))
    }

    #[test]
    fn expectations_chain() {
        let actions = actions();
        actions
            .and_expect(status().is_ok())
            .unwrap()
            .and_expect(content().string("success"))
            .unwrap()
            .and_expect(content().content_type("text/plain"))
            .unwrap();
    }

    #[test]
    fn first_unmet_expectation_stops_the_chain() {
        let actions = actions();
        let err = actions
            .and_expect(status().is_not_found())
            .and_then(|a| a.and_expect(content().string("never checked")))
            .unwrap_err();

        assert_eq!(err.to_string(), "Status: expected <404> but was <200>");
        assert!(matches!(err, Error::Match(_)));
    }

    #[test]
    fn and_do_runs_handler_and_and_return_yields_result() {
        let seen = Cell::new(0u16);
        let actions = actions();
        actions
            .and_do(|result: &MvcResult| -> crate::Result<()> {
                seen.set(result.status());
                Ok(())
            })
            .unwrap();

        assert_eq!(seen.get(), 200);
        assert_eq!(actions.and_return().text(), "success");
    }
}
