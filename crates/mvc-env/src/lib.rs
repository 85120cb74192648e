//! Synthetic serving environment for in-process web handling tests
//!
//! Provides the container-side pieces a handling context needs without a
//! real server:
//!
//! - **Resource paths and loaders**: filesystem- or classpath-relative
//!   resolution of web resources and definition documents
//! - **Serving environment**: base path, attributes and named dispatchers,
//!   with a built-in `"default"` dispatcher
//! - **Mock exchange**: in-memory requests and responses

pub mod error;
pub mod loader;
pub mod path;
pub mod request;
pub mod response;
pub mod serving;

pub use error::{Error, Result};
pub use loader::{LoaderKind, Resource, ResourceLoader};
pub use path::ResourcePath;
pub use request::{Method, MockRequest, MockRequestBuilder};
pub use response::MockResponse;
pub use serving::{DEFAULT_DISPATCHER_NAME, RequestDispatcher, SyntheticServingEnvironment};
