#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

// Tracing target constants for consistent logging
pub const TRACING_TARGET_CLIENT: &str = "cumulo_rekognition::client";
pub const TRACING_TARGET_DETECTION: &str = "cumulo_rekognition::detection";

pub mod client;
pub mod types;

// Re-export for convenience
pub use cumulo_batch::{Dispatcher, Outcome};

pub use crate::client::{RekognitionClient, RekognitionConfig};
pub use crate::types::{BoundingBox, WordDetection};

/// Error type for text-detection operations.
///
/// The text-detection wrapper absorbs no provider conditions: every
/// request failure is unexpected and aborts an enclosing batch. Only
/// response decoding gets its own variant, since a malformed response
/// shape is a distinct failure from a rejected request.
#[derive(Debug, thiserror::Error)]
#[must_use = "errors should be handled appropriately"]
pub enum Error {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The provider response did not have the expected shape.
    #[error("Invalid response: {message}")]
    InvalidResponse {
        /// Description of what's missing or malformed.
        message: String,
    },

    /// A detection request failed.
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
            Error::Operation { .. } => "operation",
        }
    }
}

/// Specialized [`Result`] type for text-detection operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_categories() {
        assert_eq!(Error::config("no bucket").category(), "config");
        assert_eq!(
            Error::invalid_response("missing geometry").category(),
            "invalid_response"
        );
        assert_eq!(
            Error::operation("detect_text", "denied").category(),
            "operation"
        );
    }
}
