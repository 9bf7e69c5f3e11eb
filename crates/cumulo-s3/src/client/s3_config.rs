//! S3 client configuration management.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// S3 client configuration.
///
/// This is the single immutable value shared read-only across all
/// concurrent operation invocations; there is no process-wide mutable
/// session state. Credential material itself is resolved by the SDK's
/// provider chain from the named profile (or the environment when no
/// profile is given).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct S3Config {
    /// Named credentials profile to resolve, if any.
    ///
    /// When absent, the SDK's default provider chain is used
    /// (environment variables, shared config, instance metadata).
    pub profile: Option<String>,

    /// Region override, if any.
    ///
    /// When absent, the region is taken from the resolved profile or
    /// environment.
    pub region: Option<String>,

    /// Endpoint URL override, if any.
    ///
    /// Points the client at an S3-compatible server (MinIO, LocalStack)
    /// instead of the provider default. Path-style addressing is used
    /// when set.
    pub endpoint: Option<String>,
}

impl S3Config {
    /// Creates a configuration using the default provider chain.
    pub fn new() -> Self {
        Self::default()
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

    /// Sets the endpoint URL override.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
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

    /// Returns the endpoint URL override, if configured.
    #[inline]
    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the profile or region is set to
    /// an empty string.
    pub fn validate(&self) -> Result<()> {
        if self.profile.as_deref() == Some("") {
            return Err(Error::config("Profile name cannot be empty"));
        }

        if self.region.as_deref() == Some("") {
            return Err(Error::config("Region cannot be empty"));
        }

        if self.endpoint.as_deref() == Some("") {
            return Err(Error::config("Endpoint URL cannot be empty"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = S3Config::new();
        assert!(config.profile().is_none());
        assert!(config.region().is_none());
        assert!(config.endpoint().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder_methods() {
        let config = S3Config::new()
            .with_profile("staging")
            .with_region("eu-west-1")
            .with_endpoint("http://localhost:9000");

        assert_eq!(config.profile(), Some("staging"));
        assert_eq!(config.region(), Some("eu-west-1"));
        assert_eq!(config.endpoint(), Some("http://localhost:9000"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_rejects_empty_fields() {
        let config = S3Config::new().with_profile("");
        assert!(config.validate().is_err());

        let config = S3Config::new().with_region("");
        assert!(config.validate().is_err());

        let config = S3Config::new().with_endpoint("");
        assert!(config.validate().is_err());
    }
}
