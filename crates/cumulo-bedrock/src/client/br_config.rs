//! Bedrock client configuration management.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Bedrock client configuration.
///
/// Unlike the storage and detection clients, the region is required
/// here: model availability differs per region and the runtime endpoint
/// is region-scoped. The value is immutable and shared read-only across
/// concurrent invocations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BedrockConfig {
    /// Named credentials profile to resolve, if any.
    pub profile: Option<String>,

    /// Region hosting the model runtime.
    pub region: String,
}

impl BedrockConfig {
    /// Creates a configuration for the given region.
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            profile: None,
            region: region.into(),
        }
    }

    /// Sets the credentials profile name.
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Some(profile.into());
        self
    }

    /// Returns the profile name, if configured.
    #[inline]
    pub fn profile(&self) -> Option<&str> {
        self.profile.as_deref()
    }

    /// Returns the region.
    #[inline]
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the region is empty or the
    /// profile is set to an empty string.
    pub fn validate(&self) -> Result<()> {
        if self.region.is_empty() {
            return Err(Error::config("Region cannot be empty"));
        }

        if self.profile.as_deref() == Some("") {
            return Err(Error::config("Profile name cannot be empty"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder_methods() {
        let config = BedrockConfig::new("us-west-2").with_profile("ml");
        assert_eq!(config.region(), "us-west-2");
        assert_eq!(config.profile(), Some("ml"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_requires_region() {
        let config = BedrockConfig::new("");
        assert!(config.validate().is_err());
    }
}
