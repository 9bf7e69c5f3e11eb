//! S3 operations for buckets and objects.
//!
//! This module provides high-level interfaces for performing operations
//! on S3 buckets and objects: creation, deletion with auto-empty,
//! listing with pagination, and idempotent batch uploads and downloads
//! driven through the `cumulo-batch` dispatcher.

mod bucket_operations;
mod object_operations;

pub use bucket_operations::BucketOperations;
pub use object_operations::{MAX_DELETE_BATCH, ObjectOperations};

use aws_sdk_s3::error::DisplayErrorContext;

use crate::Error;

/// Maps an SDK error no call site handles explicitly into an
/// [`Error::Operation`], keeping the SDK's full error context in the
/// details.
pub(crate) fn sdk_error(operation: &str, err: impl std::error::Error) -> Error {
    Error::operation(operation, DisplayErrorContext(&err).to_string())
}
