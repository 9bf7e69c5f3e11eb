#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

// Tracing target constants for consistent logging
pub const TRACING_TARGET_CLIENT: &str = "cumulo_s3::client";
pub const TRACING_TARGET_BUCKETS: &str = "cumulo_s3::buckets";
pub const TRACING_TARGET_OBJECTS: &str = "cumulo_s3::objects";

pub mod client;
pub mod operations;
pub mod types;

// Re-export for convenience
pub use cumulo_batch::{BatchSummary, Dispatcher, Outcome};

pub use crate::client::{S3Client, S3Config};
pub use crate::operations::{BucketOperations, MAX_DELETE_BATCH, ObjectOperations};
pub use crate::types::{BucketInfo, ChunkDeletion, DeleteSummary, TransferPair};

/// Error type for S3 storage operations.
///
/// Errors fall into three policy classes:
///
/// - `NotFound` and `BucketNotEmpty` are *expected* conditions with
///   dedicated handling at their call sites (a missing object turns an
///   upload probe into "proceed", a non-empty bucket aborts deletion for
///   that bucket only);
/// - `Io` covers local filesystem failures during transfers;
/// - everything else surfaces as `Operation` and is treated as
///   unexpected, aborting the enclosing batch.
#[derive(Debug, thiserror::Error)]
#[must_use = "errors should be handled appropriately"]
pub enum Error {
    /// Configuration error.
    ///
    /// Invalid or missing configuration parameters, such as an empty
    /// profile or region name.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A bucket or object does not exist.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Bucket deletion was requested for a non-empty bucket without the
    /// auto-empty flag.
    #[error("Bucket '{bucket}' is not empty")]
    BucketNotEmpty {
        /// Name of the bucket that still holds objects.
        bucket: String,
    },

    /// Local I/O failed while reading or writing transfer files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An S3 request failed for a reason no call site handles explicitly.
    #[error("Operation failed: {operation} - {details}")]
    Operation {
        /// Name of the S3 operation that failed.
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

    /// Creates a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Creates an operation error.
    pub fn operation(operation: impl Into<String>, details: impl Into<String>) -> Self {
        Self::Operation {
            operation: operation.into(),
            details: details.into(),
        }
    }

    /// Returns whether this error indicates a missing resource.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }

    /// Returns whether this error indicates a non-empty bucket.
    pub fn is_not_empty(&self) -> bool {
        matches!(self, Error::BucketNotEmpty { .. })
    }

    /// Returns the error category for logging and metrics.
    pub fn category(&self) -> &'static str {
        match self {
            Error::Config(_) => "config",
            Error::NotFound(_) => "not_found",
            Error::BucketNotEmpty { .. } => "bucket_not_empty",
            Error::Io(_) => "io",
            Error::Operation { .. } => "operation",
        }
    }
}

/// Specialized [`Result`] type for S3 operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        let not_found = Error::not_found("bucket 'missing'");
        assert!(not_found.is_not_found());
        assert!(!not_found.is_not_empty());
        assert_eq!(not_found.category(), "not_found");

        let not_empty = Error::BucketNotEmpty {
            bucket: "archive".to_string(),
        };
        assert!(not_empty.is_not_empty());
        assert_eq!(not_empty.category(), "bucket_not_empty");

        let operation = Error::operation("head_object", "access denied");
        assert!(!operation.is_not_found());
        assert_eq!(operation.category(), "operation");
    }

    #[test]
    fn test_error_display() {
        let err = Error::BucketNotEmpty {
            bucket: "archive".to_string(),
        };
        assert_eq!(err.to_string(), "Bucket 'archive' is not empty");

        let err = Error::operation("delete_objects", "throttled");
        assert_eq!(
            err.to_string(),
            "Operation failed: delete_objects - throttled"
        );
    }
}
