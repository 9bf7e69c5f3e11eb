//! Rekognition client configuration management.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Rekognition client configuration.
///
/// Detection operates on objects already stored in S3, so the
/// configuration names the bucket the stored-object references point
/// into. The value is immutable and shared read-only across concurrent
/// detection calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RekognitionConfig {
    /// Named credentials profile to resolve, if any.
    pub profile: Option<String>,

    /// Region override, if any.
    pub region: Option<String>,

    /// Bucket holding the images to run detection on.
    pub bucket: String,
}

impl RekognitionConfig {
    /// Creates a configuration for the given source bucket.
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            profile: None,
            region: None,
            bucket: bucket.into(),
        }
    }

    /// Sets the credentials profile name.
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Some(profile.into());
        self
    }

    /// Sets the region.
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Returns the profile name, if configured.
    #[inline]
    pub fn profile(&self) -> Option<&str> {
        self.profile.as_deref()
    }

    /// Returns the region, if configured.
    #[inline]
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// Returns the source bucket name.
    #[inline]
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the bucket name is empty, or if
    /// the profile or region is set to an empty string.
    pub fn validate(&self) -> Result<()> {
        if self.bucket.is_empty() {
            return Err(Error::config("Bucket name cannot be empty"));
        }

        if self.profile.as_deref() == Some("") {
            return Err(Error::config("Profile name cannot be empty"));
        }

        if self.region.as_deref() == Some("") {
            return Err(Error::config("Region cannot be empty"));
        }

        Ok(())
    }
}
