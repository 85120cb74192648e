//! Dispatch engine seam
//!
//! [`RouteDispatcher`] resolves the request against the context's route
//! table first and only falls back to the serving environment's `"default"`
//! dispatcher when default-servlet handling is enabled.

use mvc_context::WebContext;
use mvc_env::{DEFAULT_DISPATCHER_NAME, MockRequest, MockResponse};

use crate::result::MvcResult;
use crate::{Error, Result};

/// Turns a request into a result against an active context.
pub trait DispatchEngine: Send + Sync {
    fn dispatch(&self, context: &WebContext, request: MockRequest) -> Result<MvcResult>;
}

/// Status of a handler error turned into a response.
const INTERNAL_SERVER_ERROR: u16 = 500;

/// Status when nothing handles the request.
const NOT_FOUND: u16 = 404;

#[derive(Debug, Clone, Copy, Default)]
pub struct RouteDispatcher;

impl DispatchEngine for RouteDispatcher {
    fn dispatch(&self, context: &WebContext, mut request: MockRequest) -> Result<MvcResult> {
        if !context.is_active() {
            return Err(Error::Dispatch {
                message: "context has not been refreshed".into(),
            });
        }

        if let Some(route) = context.resolve(request.method(), request.path()) {
            let definition = context.handler_definition(&route.definition_name).ok_or_else(|| {
                Error::Dispatch {
                    message: format!("route target '{}' is not a handler", route.definition_name),
                }
            })?;
            tracing::debug!(
                method = %request.method(),
                path = request.path(),
                handler = %route.definition_name,
                pattern = %route.pattern,
                "Dispatching to handler"
            );

            request.set_path_variables(route.variables);
            let result = match definition.handler().handle(&request, context) {
                Ok(response) => MvcResult::new(request, response),
                Err(error) => {
                    tracing::debug!(%error, "Handler failed, resolving to error response");
                    let response =
                        MockResponse::with_status(INTERNAL_SERVER_ERROR).body(error.message());
                    MvcResult::new(request, response).with_resolved_exception(error)
                }
            };
            return Ok(result.with_handler(route.definition_name));
        }

        if context.default_servlet_handling() {
            let dispatcher = context
                .serving_environment()
                .named_dispatcher(DEFAULT_DISPATCHER_NAME)
                .ok_or_else(|| Error::Dispatch {
                    message: format!("no '{DEFAULT_DISPATCHER_NAME}' dispatcher available"),
                })?;
            let mut response = MockResponse::ok();
            dispatcher.forward(&request, &mut response);
            return Ok(MvcResult::new(request, response));
        }

        tracing::debug!(
            method = %request.method(),
            path = request.path(),
            "No handler found"
        );
        Ok(MvcResult::new(request, MockResponse::with_status(NOT_FOUND)))
    }
}
