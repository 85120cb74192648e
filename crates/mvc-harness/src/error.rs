//! Error types for mvc-harness

use crate::matchers::MatchError;

/// Result type for mvc-harness operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building a [`MockMvc`](crate::MockMvc),
/// dispatching or asserting
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Context assembly error from mvc-context
    #[error(transparent)]
    Context(#[from] mvc_context::Error),

    /// The dispatch engine could not produce a result
    #[error("Dispatch failed: {message}")]
    Dispatch { message: String },

    /// An expectation could not be evaluated or did not hold
    #[error(transparent)]
    Match(#[from] MatchError),
}
