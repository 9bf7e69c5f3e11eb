//! High-level S3 client implementation.

use std::sync::Arc;

use aws_sdk_s3::Client;
use aws_sdk_s3::error::DisplayErrorContext;
use tracing::{debug, error, info, instrument};

use crate::operations::{BucketOperations, ObjectOperations};
use crate::{Error, Result, S3Config, TRACING_TARGET_CLIENT};

/// High-level S3 client that manages connections and operations.
///
/// The underlying SDK client is built once from an immutable
/// [`S3Config`] and shared across all concurrent operations; cloning the
/// client is cheap.
#[derive(Clone)]
pub struct S3Client {
    inner: Client,
    config: Arc<S3Config>,
}

impl S3Client {
    /// Creates a new S3 client with the provided configuration.
    ///
    /// This resolves credentials and region via the SDK provider chain
    /// but does not test connectivity.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration validation fails.
    #[instrument(skip(config), target = TRACING_TARGET_CLIENT, fields(profile = config.profile(), region = config.region()))]
    pub async fn new(config: S3Config) -> Result<Self> {
        info!(target: TRACING_TARGET_CLIENT, "Initializing S3 client");

        config.validate().map_err(|e| {
            error!(target: TRACING_TARGET_CLIENT, error = %e, "Configuration validation failed");
            e
        })?;

        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
        if let Some(profile) = config.profile() {
            loader = loader.profile_name(profile);
        }
        if let Some(region) = config.region() {
            loader = loader.region(aws_config::Region::new(region.to_string()));
        }
        if let Some(endpoint) = config.endpoint() {
            loader = loader.endpoint_url(endpoint);
        }

        let sdk_config = loader.load().await;
        // S3-compatible endpoints (MinIO, LocalStack) expect path-style
        // addressing rather than bucket subdomains.
        let inner = if config.endpoint().is_some() {
            Client::from_conf(
                aws_sdk_s3::config::Builder::from(&sdk_config)
                    .force_path_style(true)
                    .build(),
            )
        } else {
            Client::new(&sdk_config)
        };

        info!(
            target: TRACING_TARGET_CLIENT,
            profile = config.profile(),
            region = config.region(),
            endpoint = config.endpoint(),
            "S3 client initialized successfully"
        );

        Ok(Self {
            inner,
            config: Arc::new(config),
        })
    }

    /// Creates a new S3 client and verifies that the given bucket can be
    /// accessed.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration validation fails or the bucket
    /// cannot be verified.
    #[instrument(skip(config), target = TRACING_TARGET_CLIENT, fields(bucket = %bucket))]
    pub async fn connect(config: S3Config, bucket: &str) -> Result<Self> {
        let client = Self::new(config).await?;
        client.verify_bucket(bucket).await?;
        Ok(client)
    }

    /// Verifies that a bucket exists and is accessible with the
    /// configured credentials.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the bucket does not exist, or an
    /// operation error for any other failure (missing permissions,
    /// network issues).
    #[instrument(skip(self), target = TRACING_TARGET_CLIENT, fields(bucket = %bucket))]
    pub async fn verify_bucket(&self, bucket: &str) -> Result<()> {
        debug!(target: TRACING_TARGET_CLIENT, bucket = %bucket, "Verifying bucket access");

        let start = std::time::Instant::now();
        let result = self.inner.head_bucket().bucket(bucket).send().await;
        let elapsed = start.elapsed();

        match result {
            Ok(_) => {
                info!(
                    target: TRACING_TARGET_CLIENT,
                    bucket = %bucket,
                    elapsed = ?elapsed,
                    "Bucket verified successfully"
                );
                Ok(())
            }
            Err(err) => {
                let service_err = err.into_service_error();
                let err = if service_err.is_not_found() {
                    Error::not_found(format!("Bucket '{}' does not exist", bucket))
                } else {
                    Error::operation(
                        "head_bucket",
                        DisplayErrorContext(&service_err).to_string(),
                    )
                };

                error!(
                    target: TRACING_TARGET_CLIENT,
                    bucket = %bucket,
                    error = %err,
                    elapsed = ?elapsed,
                    "Bucket verification failed"
                );
                Err(err)
            }
        }
    }

    /// Creates a new BucketOperations instance.
    pub fn bucket_operations(&self) -> BucketOperations {
        BucketOperations::new(self.clone())
    }

    /// Creates a new ObjectOperations instance.
    pub fn object_operations(&self) -> ObjectOperations {
        ObjectOperations::new(self.clone())
    }

    /// Returns a reference to the inner SDK client.
    #[inline]
    pub(crate) fn as_inner(&self) -> &Client {
        &self.inner
    }
}

impl std::fmt::Debug for S3Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("S3Client")
            .field("profile", &self.config.profile())
            .field("region", &self.config.region())
            .field("endpoint", &self.config.endpoint())
            .finish()
    }
}
