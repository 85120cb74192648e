//! In-process request dispatch and result matching
//!
//! Builds a refreshed handling context, performs synthetic requests against
//! it and asserts on the outcome without a network or container.
//!
//! # Architecture
//!
//! 1. **Setup** - [`annotation_config_setup`], [`xml_config_setup`] and
//!    [`standalone_setup`] produce a [`MockMvc`].
//! 2. **Dispatch** - [`MockMvc::perform`] hands the request to a
//!    [`DispatchEngine`] and wraps the [`MvcResult`] in [`ResultActions`].
//! 3. **Matching** - [`ResultActions::and_expect`] applies [`ResultMatcher`]s
//!    such as [`xpath`], [`status`] or [`content`].
//!
//! ```ignore
//! use mvc_harness::{content, request::get, standalone_setup, status};
//!
//! let mvc = standalone_setup(definitions).build()?;
//! mvc.perform(get("/test"))?
//!     .and_expect(status().is_ok())?
//!     .and_expect(content().string("success"))?;
//! ```

pub mod actions;
pub mod dispatch;
pub mod error;
pub mod logging;
pub mod matchers;
pub mod mock_mvc;
pub mod print;
pub mod result;
pub mod setup;

pub use actions::ResultActions;
pub use dispatch::{DispatchEngine, RouteDispatcher};
pub use error::{Error, Result};
pub use matchers::{
    AssertionFailure, MatchError, MatchedNode, NodeKind, ResultMatcher, XpathExpectations,
    XpathMatcher, content, forwarded_url, handler, header, status, xpath,
};
pub use mock_mvc::MockMvc;
pub use print::{ResultHandler, log, print};
pub use result::MvcResult;
pub use setup::{
    ContextMockMvcBuilder, StandaloneMockMvcBuilder, annotation_config_setup, standalone_setup,
    xml_config_setup,
};

/// Request builders: `get`, `post`, `put`, `delete` and `request`.
pub use mvc_env::request;
