//! Transfer descriptors for upload and download batches.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// One unit of transfer work: a local path paired with a remote object
/// key. Immutable once submitted to a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferPair {
    /// Local filesystem path (source for uploads, destination for
    /// downloads).
    pub local_path: PathBuf,
    /// Remote object key within the bucket.
    pub key: String,
}

impl TransferPair {
    /// Creates a new transfer pair.
    pub fn new(local_path: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        Self {
            local_path: local_path.into(),
            key: key.into(),
        }
    }

    /// Pairs up parallel lists of local paths and remote keys.
    ///
    /// Extra elements on either side are dropped, matching zip
    /// semantics.
    pub fn zip<I1, I2, P, K>(local_paths: I1, keys: I2) -> Vec<Self>
    where
        I1: IntoIterator<Item = P>,
        I2: IntoIterator<Item = K>,
        P: Into<PathBuf>,
        K: Into<String>,
    {
        local_paths
            .into_iter()
            .zip(keys)
            .map(|(path, key)| Self::new(path, key))
            .collect()
    }

    /// Returns the local path.
    #[inline]
    pub fn local_path(&self) -> &Path {
        &self.local_path
    }

    /// Returns the remote key.
    #[inline]
    pub fn key(&self) -> &str {
        &self.key
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zip_pairs_in_order() {
        let pairs = TransferPair::zip(
            vec!["/tmp/a.png", "/tmp/b.png"],
            vec!["images/a.png", "images/b.png"],
        );

        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].key(), "images/a.png");
        assert_eq!(pairs[1].local_path(), Path::new("/tmp/b.png"));
    }

    #[test]
    fn test_zip_truncates_to_shorter_list() {
        let pairs = TransferPair::zip(vec!["/tmp/a.png"], vec!["a", "b", "c"]);
        assert_eq!(pairs.len(), 1);
    }
}
