//! Bucket information structures.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Information about an S3 bucket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BucketInfo {
    /// Bucket name.
    pub name: String,
    /// Bucket creation date.
    pub creation_date: Option<OffsetDateTime>,
}

impl BucketInfo {
    /// Creates a new BucketInfo.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            creation_date: None,
        }
    }

    /// Sets the creation date.
    pub fn with_creation_date(mut self, creation_date: OffsetDateTime) -> Self {
        self.creation_date = Some(creation_date);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_info_builder() {
        let info = BucketInfo::new("archive");
        assert_eq!(info.name, "archive");
        assert!(info.creation_date.is_none());

        let created = OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap();
        let info = info.with_creation_date(created);
        assert_eq!(info.creation_date, Some(created));
    }
}
