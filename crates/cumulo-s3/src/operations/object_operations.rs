//! Object operations for S3 storage.
//!
//! Uploads and downloads are idempotent: each transfer probes the
//! destination first and classifies already-present items as skipped.
//! The probe and the transfer are not transactional, so two concurrent
//! batches racing on the same key can both transfer it; that duplicate
//! work is benign and accepted.

use aws_sdk_s3::operation::head_object::HeadObjectError;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{Delete, ObjectIdentifier};
use cumulo_batch::{BatchSummary, Dispatcher, Outcome, chunked};
use tracing::{debug, error, info, instrument};

use super::sdk_error;
use crate::types::{ChunkDeletion, DeleteSummary, TransferPair};
use crate::{Error, Result, S3Client, TRACING_TARGET_OBJECTS};

/// Maximum number of keys accepted by one batch-delete call, imposed by
/// the provider.
pub const MAX_DELETE_BATCH: usize = 1000;

/// Object operations with a required S3 client.
#[derive(Debug, Clone)]
pub struct ObjectOperations {
    client: S3Client,
}

impl ObjectOperations {
    /// Creates new ObjectOperations with an S3 client.
    pub fn new(client: S3Client) -> Self {
        Self { client }
    }

    /// Uploads a local file to the bucket unless the key already exists
    /// remotely.
    ///
    /// The existence probe treats the provider's not-found code as
    /// "proceed with the upload"; any other probe failure is unexpected
    /// and propagates, aborting an enclosing batch.
    ///
    /// # Errors
    ///
    /// Returns an error if the existence probe fails for a reason other
    /// than the key being absent, or if reading the local file or the
    /// upload itself fails.
    #[instrument(skip(self, pair), target = TRACING_TARGET_OBJECTS, fields(bucket = %bucket, key = %pair.key()))]
    pub async fn upload_object(&self, bucket: &str, pair: &TransferPair) -> Result<Outcome<()>> {
        let probe = self
            .client
            .as_inner()
            .head_object()
            .bucket(bucket)
            .key(pair.key())
            .send()
            .await
            .map(|_| ())
            .map_err(|err| err.into_service_error());

        match plan_upload(probe)? {
            UploadPlan::Skip => {
                debug!(
                    target: TRACING_TARGET_OBJECTS,
                    bucket = %bucket,
                    key = %pair.key(),
                    "Object already exists, skipping upload"
                );
                Ok(Outcome::skipped(format!(
                    "object '{}' already exists in bucket '{}'",
                    pair.key(),
                    bucket
                )))
            }
            UploadPlan::Transfer => {
                let body = ByteStream::from_path(pair.local_path())
                    .await
                    .map_err(local_read_error)?;

                self.client
                    .as_inner()
                    .put_object()
                    .bucket(bucket)
                    .key(pair.key())
                    .body(body)
                    .send()
                    .await
                    .map_err(|e| {
                        error!(
                            target: TRACING_TARGET_OBJECTS,
                            bucket = %bucket,
                            key = %pair.key(),
                            error = %e,
                            "Failed to upload object"
                        );
                        sdk_error("put_object", e)
                    })?;

                debug!(
                    target: TRACING_TARGET_OBJECTS,
                    bucket = %bucket,
                    key = %pair.key(),
                    "Object uploaded"
                );
                Ok(Outcome::Success(()))
            }
        }
    }

    /// Downloads an object to a local path unless the file is already
    /// present locally.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the remote key does not exist, or
    /// an error if the download or the local write fails.
    #[instrument(skip(self, pair), target = TRACING_TARGET_OBJECTS, fields(bucket = %bucket, key = %pair.key()))]
    pub async fn download_object(&self, bucket: &str, pair: &TransferPair) -> Result<Outcome<()>> {
        if tokio::fs::try_exists(pair.local_path()).await? {
            debug!(
                target: TRACING_TARGET_OBJECTS,
                bucket = %bucket,
                key = %pair.key(),
                "Local file already exists, skipping download"
            );
            return Ok(Outcome::skipped(format!(
                "file '{}' already exists locally",
                pair.local_path().display()
            )));
        }

        let response = self
            .client
            .as_inner()
            .get_object()
            .bucket(bucket)
            .key(pair.key())
            .send()
            .await
            .map_err(|err| {
                let service_err = err.into_service_error();
                if service_err.is_no_such_key() {
                    Error::not_found(format!(
                        "Object '{}' does not exist in bucket '{}'",
                        pair.key(),
                        bucket
                    ))
                } else {
                    sdk_error("get_object", service_err)
                }
            })?;

        let data = response
            .body
            .collect()
            .await
            .map_err(|e| sdk_error("get_object_body", e))?;

        tokio::fs::write(pair.local_path(), data.into_bytes()).await?;

        debug!(
            target: TRACING_TARGET_OBJECTS,
            bucket = %bucket,
            key = %pair.key(),
            "Object downloaded"
        );
        Ok(Outcome::Success(()))
    }

    /// Uploads a batch of files through the dispatcher, skipping keys
    /// that already exist remotely.
    ///
    /// Outcomes are index-aligned with `pairs`.
    ///
    /// # Errors
    ///
    /// Propagates the first unexpected per-item error, aborting the
    /// batch.
    #[instrument(skip(self, pairs, dispatcher), target = TRACING_TARGET_OBJECTS, fields(bucket = %bucket, items = pairs.len()))]
    pub async fn upload_objects(
        &self,
        bucket: &str,
        pairs: Vec<TransferPair>,
        dispatcher: &Dispatcher,
    ) -> Result<Vec<Outcome<()>>> {
        let outcomes = dispatcher
            .run(pairs, |pair| async move {
                self.upload_object(bucket, &pair).await
            })
            .await?;

        let summary = BatchSummary::of(&outcomes);
        info!(
            target: TRACING_TARGET_OBJECTS,
            bucket = %bucket,
            uploaded = summary.succeeded,
            skipped = summary.skipped,
            "Upload batch finished"
        );

        Ok(outcomes)
    }

    /// Downloads a batch of objects through the dispatcher, skipping
    /// files that already exist locally.
    ///
    /// Outcomes are index-aligned with `pairs`.
    ///
    /// # Errors
    ///
    /// Propagates the first unexpected per-item error, aborting the
    /// batch.
    #[instrument(skip(self, pairs, dispatcher), target = TRACING_TARGET_OBJECTS, fields(bucket = %bucket, items = pairs.len()))]
    pub async fn download_objects(
        &self,
        bucket: &str,
        pairs: Vec<TransferPair>,
        dispatcher: &Dispatcher,
    ) -> Result<Vec<Outcome<()>>> {
        let outcomes = dispatcher
            .run(pairs, |pair| async move {
                self.download_object(bucket, &pair).await
            })
            .await?;

        let summary = BatchSummary::of(&outcomes);
        info!(
            target: TRACING_TARGET_OBJECTS,
            bucket = %bucket,
            downloaded = summary.succeeded,
            skipped = summary.skipped,
            "Download batch finished"
        );

        Ok(outcomes)
    }

    /// Deletes a single object.
    ///
    /// The provider gives no per-key confirmation for single deletes, so
    /// a successful response only means the request was accepted.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete request fails.
    #[instrument(skip(self), target = TRACING_TARGET_OBJECTS, fields(bucket = %bucket, key = %key))]
    pub async fn delete_object(&self, bucket: &str, key: &str) -> Result<()> {
        self.client
            .as_inner()
            .delete_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                error!(
                    target: TRACING_TARGET_OBJECTS,
                    bucket = %bucket,
                    key = %key,
                    error = %e,
                    "Failed to delete object"
                );
                sdk_error("delete_object", e)
            })?;

        debug!(target: TRACING_TARGET_OBJECTS, bucket = %bucket, key = %key, "Object deleted");
        Ok(())
    }

    /// Deletes a list of keys, partitioned into provider-sized chunks
    /// dispatched concurrently.
    ///
    /// Each chunk maps to one batch-delete call whose response carries
    /// aggregate deleted/error counts; per-key errors are counted into
    /// the summary, not surfaced individually.
    ///
    /// # Errors
    ///
    /// Propagates the first failed batch-delete call, aborting the
    /// remaining chunks.
    #[instrument(skip(self, keys, dispatcher), target = TRACING_TARGET_OBJECTS, fields(bucket = %bucket, keys = keys.len()))]
    pub async fn delete_objects(
        &self,
        bucket: &str,
        keys: &[String],
        dispatcher: &Dispatcher,
    ) -> Result<DeleteSummary> {
        let chunks = chunked(keys, MAX_DELETE_BATCH);

        let outcomes = dispatcher
            .run(chunks, |chunk| async move {
                self.delete_chunk(bucket, &chunk).await
            })
            .await?;

        let mut summary = DeleteSummary::default();
        for outcome in &outcomes {
            if let Outcome::Success(chunk) = outcome {
                summary.accumulate(*chunk);
            }
        }

        info!(
            target: TRACING_TARGET_OBJECTS,
            bucket = %bucket,
            deleted = summary.deleted,
            errors = summary.errors,
            "Delete batch finished"
        );

        Ok(summary)
    }

    /// Issues one batch-delete call for a chunk of at most
    /// [`MAX_DELETE_BATCH`] keys.
    async fn delete_chunk(&self, bucket: &str, keys: &[String]) -> Result<Outcome<ChunkDeletion>> {
        let objects: Vec<ObjectIdentifier> = keys
            .iter()
            .map(|key| {
                ObjectIdentifier::builder()
                    .key(key)
                    .build()
                    .map_err(|e| Error::operation("delete_objects", e.to_string()))
            })
            .collect::<Result<_>>()?;

        let delete = Delete::builder()
            .set_objects(Some(objects))
            .build()
            .map_err(|e| Error::operation("delete_objects", e.to_string()))?;

        let response = self
            .client
            .as_inner()
            .delete_objects()
            .bucket(bucket)
            .delete(delete)
            .send()
            .await
            .map_err(|e| {
                error!(
                    target: TRACING_TARGET_OBJECTS,
                    bucket = %bucket,
                    keys = keys.len(),
                    error = %e,
                    "Batch delete call failed"
                );
                sdk_error("delete_objects", e)
            })?;

        let deleted = response.deleted().len();
        let errors = response.errors().len();

        debug!(
            target: TRACING_TARGET_OBJECTS,
            bucket = %bucket,
            deleted = deleted,
            errors = errors,
            "Batch delete chunk completed"
        );

        Ok(Outcome::Success(ChunkDeletion::new(deleted, errors)))
    }

    /// Returns whether a bucket holds no objects.
    ///
    /// # Errors
    ///
    /// Returns an error if the listing probe fails.
    #[instrument(skip(self), target = TRACING_TARGET_OBJECTS, fields(bucket = %bucket))]
    pub async fn is_bucket_empty(&self, bucket: &str) -> Result<bool> {
        let response = self
            .client
            .as_inner()
            .list_objects_v2()
            .bucket(bucket)
            .max_keys(1)
            .send()
            .await
            .map_err(|e| sdk_error("list_objects_v2", e))?;

        Ok(response.contents().is_empty())
    }

    /// Lists every object key in a bucket, following pagination until
    /// exhaustion.
    ///
    /// # Errors
    ///
    /// Returns an error if any page of the listing fails.
    #[instrument(skip(self), target = TRACING_TARGET_OBJECTS, fields(bucket = %bucket))]
    pub async fn list_all_objects(&self, bucket: &str) -> Result<Vec<String>> {
        debug!(target: TRACING_TARGET_OBJECTS, bucket = %bucket, "Listing all objects");

        let start = std::time::Instant::now();
        let mut pages = self
            .client
            .as_inner()
            .list_objects_v2()
            .bucket(bucket)
            .into_paginator()
            .send();

        let mut keys = Vec::new();
        while let Some(page) = pages.next().await {
            let page = page.map_err(|e| {
                error!(
                    target: TRACING_TARGET_OBJECTS,
                    bucket = %bucket,
                    error = %e,
                    "Failed to list objects"
                );
                sdk_error("list_objects_v2", e)
            })?;

            for object in page.contents() {
                if let Some(key) = object.key() {
                    keys.push(key.to_string());
                }
            }
        }

        info!(
            target: TRACING_TARGET_OBJECTS,
            bucket = %bucket,
            count = keys.len(),
            elapsed = ?start.elapsed(),
            "Objects listed successfully"
        );

        Ok(keys)
    }
}

/// What to do with an upload after the remote existence probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UploadPlan {
    /// The key already exists remotely; report a skip.
    Skip,
    /// The key is absent; perform the transfer.
    Transfer,
}

/// Classifies the head-object probe result.
///
/// Only the provider's not-found code means "proceed with the upload";
/// any other probe failure is unexpected and propagates.
fn plan_upload(probe: std::result::Result<(), HeadObjectError>) -> Result<UploadPlan> {
    match probe {
        Ok(()) => Ok(UploadPlan::Skip),
        Err(err) if err.is_not_found() => Ok(UploadPlan::Transfer),
        Err(err) => Err(sdk_error("head_object", err)),
    }
}

/// Maps a local read failure during a transfer to [`Error::Io`].
fn local_read_error(err: impl std::error::Error + Send + Sync + 'static) -> Error {
    Error::Io(std::io::Error::other(err))
}

#[cfg(test)]
mod tests {
    use aws_sdk_s3::error::ErrorMetadata;
    use aws_sdk_s3::types::error::NotFound;

    use crate::S3Config;

    use super::*;

    #[test]
    fn test_upload_probe_skips_existing_key() {
        assert_eq!(plan_upload(Ok(())).unwrap(), UploadPlan::Skip);
    }

    #[test]
    fn test_upload_probe_transfers_on_missing_key() {
        let err = HeadObjectError::NotFound(NotFound::builder().build());
        assert_eq!(plan_upload(Err(err)).unwrap(), UploadPlan::Transfer);
    }

    #[test]
    fn test_upload_probe_propagates_other_errors() {
        let err = HeadObjectError::generic(
            ErrorMetadata::builder()
                .code("AccessDenied")
                .message("Access Denied")
                .build(),
        );

        let err = plan_upload(Err(err)).unwrap_err();
        assert_eq!(err.category(), "operation");
        assert!(err.to_string().contains("head_object"));
    }

    #[tokio::test]
    async fn test_missing_local_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.bin");

        let err = ByteStream::from_path(&missing).await.unwrap_err();
        let err = local_read_error(err);
        assert!(matches!(err, Error::Io(_)));
        assert_eq!(err.category(), "io");
    }

    #[tokio::test]
    async fn test_download_skips_existing_local_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cached.bin");
        std::fs::write(&path, b"data").unwrap();

        // Region is pinned so client construction stays offline; the
        // local-exists probe short-circuits before any request is made.
        let config = S3Config::new().with_region("us-east-1");
        let client = S3Client::new(config).await.unwrap();
        let ops = client.object_operations();

        let pair = TransferPair::new(&path, "cached.bin");
        let outcome = ops.download_object("any-bucket", &pair).await.unwrap();
        assert!(outcome.is_skipped());

        // Local contents are untouched by the skip.
        assert_eq!(std::fs::read(&path).unwrap(), b"data");
    }

    #[test]
    fn test_delete_chunking_respects_provider_limit() {
        let keys: Vec<String> = (0..2501).map(|i| format!("key-{i}")).collect();
        let chunks = chunked(&keys, MAX_DELETE_BATCH);

        assert_eq!(chunks.len(), 3);
        assert!(chunks.iter().all(|c| c.len() <= MAX_DELETE_BATCH));

        let flattened: Vec<String> = chunks.into_iter().flatten().collect();
        assert_eq!(flattened, keys);
    }
}
