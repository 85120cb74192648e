//! Error types for mvc-context

/// Result type for mvc-context operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while assembling or refreshing a handling context
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Builder or context misuse
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// A configuration source could not be turned into definitions
    #[error("Failed to resolve {source_name}: {message}")]
    Resolution {
        source_name: String,
        message: String,
    },

    /// A context initializer failed before refresh
    #[error("Initializer {name} failed: {message}")]
    Initializer { name: String, message: String },

    /// Resource or serving environment error from mvc-env
    #[error(transparent)]
    Env(#[from] mvc_env::Error),
}

impl Error {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn resolution(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Resolution {
            source_name: source_name.into(),
            message: message.into(),
        }
    }
}

/// Error returned by a handler invocation.
///
/// The dispatch engine records it as the resolved exception of the exchange.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct HandlerError {
    message: String,
}

impl HandlerError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
