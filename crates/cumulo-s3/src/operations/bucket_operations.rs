//! Bucket operations for S3 storage.

use time::OffsetDateTime;
use tracing::{debug, error, info, instrument};

use super::sdk_error;
use crate::types::BucketInfo;
use crate::{Error, Result, S3Client, TRACING_TARGET_BUCKETS};

/// Bucket operations with a required S3 client.
#[derive(Debug, Clone)]
pub struct BucketOperations {
    client: S3Client,
}

impl BucketOperations {
    /// Creates new BucketOperations with an S3 client.
    pub fn new(client: S3Client) -> Self {
        Self { client }
    }

    /// Lists all buckets visible to the configured credentials.
    ///
    /// # Errors
    ///
    /// Returns an error if the bucket listing fails.
    #[instrument(skip(self), target = TRACING_TARGET_BUCKETS)]
    pub async fn list_buckets(&self) -> Result<Vec<BucketInfo>> {
        debug!(target: TRACING_TARGET_BUCKETS, "Listing buckets");

        let start = std::time::Instant::now();
        let response = self
            .client
            .as_inner()
            .list_buckets()
            .send()
            .await
            .map_err(|e| {
                error!(target: TRACING_TARGET_BUCKETS, error = %e, "Failed to list buckets");
                sdk_error("list_buckets", e)
            })?;

        let buckets: Vec<BucketInfo> = response
            .buckets()
            .iter()
            .filter_map(|bucket| {
                let name = bucket.name()?;
                let mut info = BucketInfo::new(name);
                if let Some(created) = bucket.creation_date() {
                    if let Ok(created) = OffsetDateTime::from_unix_timestamp(created.secs()) {
                        info = info.with_creation_date(created);
                    }
                }
                Some(info)
            })
            .collect();

        info!(
            target: TRACING_TARGET_BUCKETS,
            count = buckets.len(),
            elapsed = ?start.elapsed(),
            "Buckets listed successfully"
        );

        Ok(buckets)
    }

    /// Creates a new bucket.
    ///
    /// # Errors
    ///
    /// Returns an error if the bucket creation fails.
    #[instrument(skip(self), target = TRACING_TARGET_BUCKETS, fields(bucket = %bucket))]
    pub async fn create_bucket(&self, bucket: &str) -> Result<()> {
        debug!(target: TRACING_TARGET_BUCKETS, bucket = %bucket, "Creating bucket");

        let start = std::time::Instant::now();
        self.client
            .as_inner()
            .create_bucket()
            .bucket(bucket)
            .send()
            .await
            .map_err(|e| {
                error!(
                    target: TRACING_TARGET_BUCKETS,
                    bucket = %bucket,
                    error = %e,
                    "Failed to create bucket"
                );
                sdk_error("create_bucket", e)
            })?;

        info!(
            target: TRACING_TARGET_BUCKETS,
            bucket = %bucket,
            elapsed = ?start.elapsed(),
            "Bucket created successfully"
        );

        Ok(())
    }

    /// Checks if a bucket exists.
    ///
    /// A missing bucket is an expected condition and is absorbed into
    /// `false`; any other failure propagates.
    ///
    /// # Errors
    ///
    /// Returns an error if the existence check fails for a reason other
    /// than the bucket not existing.
    #[instrument(skip(self), target = TRACING_TARGET_BUCKETS, fields(bucket = %bucket))]
    pub async fn bucket_exists(&self, bucket: &str) -> Result<bool> {
        debug!(target: TRACING_TARGET_BUCKETS, bucket = %bucket, "Checking if bucket exists");

        let result = self
            .client
            .as_inner()
            .head_bucket()
            .bucket(bucket)
            .send()
            .await;

        match result {
            Ok(_) => Ok(true),
            Err(err) => {
                let service_err = err.into_service_error();
                if service_err.is_not_found() {
                    Ok(false)
                } else {
                    error!(
                        target: TRACING_TARGET_BUCKETS,
                        bucket = %bucket,
                        error = %service_err,
                        "Failed to check bucket existence"
                    );
                    Err(sdk_error("head_bucket", service_err))
                }
            }
        }
    }

    /// Deletes a bucket, optionally emptying it first.
    ///
    /// With `auto_empty` disabled, a non-empty bucket fails with
    /// [`Error::BucketNotEmpty`] and both the bucket and its contents
    /// are left untouched. With `auto_empty` enabled, every contained
    /// object is removed through the chunked batch-delete path before
    /// the bucket itself is deleted.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BucketNotEmpty`] for a non-empty bucket without
    /// `auto_empty`, or an operation error if listing, emptying, or the
    /// final deletion fails.
    #[instrument(skip(self), target = TRACING_TARGET_BUCKETS, fields(bucket = %bucket, auto_empty = %auto_empty))]
    pub async fn delete_bucket(&self, bucket: &str, auto_empty: bool) -> Result<()> {
        debug!(target: TRACING_TARGET_BUCKETS, bucket = %bucket, "Deleting bucket");

        let object_ops = self.client.object_operations();
        let is_empty = object_ops.is_bucket_empty(bucket).await?;

        if plan_bucket_delete(bucket, is_empty, auto_empty)? == DeletePlan::EmptyThenDelete {
            let keys = object_ops.list_all_objects(bucket).await?;
            let summary = object_ops
                .delete_objects(bucket, &keys, &crate::Dispatcher::new())
                .await?;

            info!(
                target: TRACING_TARGET_BUCKETS,
                bucket = %bucket,
                deleted = summary.deleted,
                errors = summary.errors,
                "Bucket emptied before deletion"
            );
        }

        let start = std::time::Instant::now();
        self.client
            .as_inner()
            .delete_bucket()
            .bucket(bucket)
            .send()
            .await
            .map_err(|e| {
                error!(
                    target: TRACING_TARGET_BUCKETS,
                    bucket = %bucket,
                    error = %e,
                    "Failed to delete bucket"
                );
                sdk_error("delete_bucket", e)
            })?;

        info!(
            target: TRACING_TARGET_BUCKETS,
            bucket = %bucket,
            elapsed = ?start.elapsed(),
            "Bucket deleted successfully"
        );

        Ok(())
    }
}

/// How a bucket deletion proceeds given its emptiness and the
/// `auto_empty` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DeletePlan {
    /// Delete the bucket directly.
    Delete,
    /// Remove every contained object through the chunked batch-delete
    /// path, then delete the bucket.
    EmptyThenDelete,
}

/// Decides the deletion plan.
///
/// A non-empty bucket without `auto_empty` is refused before any delete
/// request is issued, leaving the bucket and its contents untouched.
fn plan_bucket_delete(bucket: &str, is_empty: bool, auto_empty: bool) -> Result<DeletePlan> {
    match (is_empty, auto_empty) {
        (true, _) => Ok(DeletePlan::Delete),
        (false, true) => Ok(DeletePlan::EmptyThenDelete),
        (false, false) => Err(Error::BucketNotEmpty {
            bucket: bucket.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_bucket_deletes_directly() {
        let plan = plan_bucket_delete("archive", true, false).unwrap();
        assert_eq!(plan, DeletePlan::Delete);

        // The flag is irrelevant when there is nothing to empty.
        let plan = plan_bucket_delete("archive", true, true).unwrap();
        assert_eq!(plan, DeletePlan::Delete);
    }

    #[test]
    fn test_non_empty_bucket_without_flag_is_refused() {
        let err = plan_bucket_delete("archive", false, false).unwrap_err();
        assert!(err.is_not_empty());
        assert!(matches!(err, Error::BucketNotEmpty { ref bucket } if bucket == "archive"));
    }

    #[test]
    fn test_non_empty_bucket_with_flag_is_emptied_first() {
        let plan = plan_bucket_delete("archive", false, true).unwrap();
        assert_eq!(plan, DeletePlan::EmptyThenDelete);
    }
}
