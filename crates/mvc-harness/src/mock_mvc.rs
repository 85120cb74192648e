//! Dispatcher façade

use std::fmt;
use std::sync::Arc;

use mvc_context::WebContext;
use mvc_env::MockRequest;

use crate::Result;
use crate::actions::ResultActions;
use crate::dispatch::{DispatchEngine, RouteDispatcher};

/// Performs synthetic requests against a refreshed [`WebContext`].
///
/// Cloning is cheap; clones share the context and the engine.
#[derive(Clone)]
pub struct MockMvc {
    context: Arc<WebContext>,
    engine: Arc<dyn DispatchEngine>,
}

impl MockMvc {
    /// Facade over `context` using the [`RouteDispatcher`].
    pub fn new(context: WebContext) -> Self {
        Self::with_engine(context, Arc::new(RouteDispatcher))
    }

    pub fn with_engine(context: WebContext, engine: Arc<dyn DispatchEngine>) -> Self {
        Self {
            context: Arc::new(context),
            engine,
        }
    }

    /// Dispatch `request` and return the chainable result.
    pub fn perform(&self, request: impl Into<MockRequest>) -> Result<ResultActions> {
        let request = request.into();
        tracing::debug!(
            method = %request.method(),
            path = request.path(),
            "Performing request"
        );
        let result = self.engine.dispatch(&self.context, request)?;
        Ok(ResultActions::new(result))
    }

    pub fn context(&self) -> &WebContext {
        &self.context
    }
}

impl fmt::Debug for MockMvc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockMvc")
            .field("definitions", &self.context.definition_names())
            .finish_non_exhaustive()
    }
}
