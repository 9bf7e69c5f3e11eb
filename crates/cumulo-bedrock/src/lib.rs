#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

// Tracing target constants for consistent logging
pub const TRACING_TARGET_CLIENT: &str = "cumulo_bedrock::client";
pub const TRACING_TARGET_INVOKE: &str = "cumulo_bedrock::invoke";

pub mod client;

// Re-export for convenience
pub use cumulo_batch::{Dispatcher, Outcome};

pub use crate::client::{
    BedrockClient, BedrockConfig, Completion, InvokeConfig, TokenEstimate,
};

/// Error type for generative inference operations.
///
/// The inference wrapper absorbs no provider conditions: every request
/// failure is unexpected and aborts an enclosing batch. A response body
/// that fails to decode gets its own variant, since it signals a shape
/// mismatch rather than a rejected request.
#[derive(Debug, thiserror::Error)]
#[must_use = "errors should be handled appropriately"]
pub enum Error {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The response body could not be decoded into the expected shape.
    #[error("Invalid response: {message}")]
    InvalidResponse {
        /// Description of what's missing or malformed.
        message: String,
    },

    /// Request body serialization failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An invocation request failed.
    #[error("Operation failed: {operation} - {details}")]
    Operation {
        /// Name of the operation that failed.
        operation: String,
        /// Error details reported by the SDK.
        details: String,
    },
}

impl Error {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an invalid-response error.
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            message: message.into(),
        }
    }

    /// Creates an operation error.
    pub fn operation(operation: impl Into<String>, details: impl Into<String>) -> Self {
        Self::Operation {
            operation: operation.into(),
            details: details.into(),
        }
    }

    /// Returns the error category for logging and metrics.
    pub fn category(&self) -> &'static str {
        match self {
            Error::Config(_) => "config",
            Error::InvalidResponse { .. } => "invalid_response",
            Error::Serialization(_) => "serialization",
            Error::Operation { .. } => "operation",
        }
    }
}

/// Specialized [`Result`] type for inference operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_categories() {
        assert_eq!(Error::config("no region").category(), "config");
        assert_eq!(
            Error::invalid_response("missing completion").category(),
            "invalid_response"
        );
        assert_eq!(
            Error::operation("invoke_model", "throttled").category(),
            "operation"
        );
    }
}
