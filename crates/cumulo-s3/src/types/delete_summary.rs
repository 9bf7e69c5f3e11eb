//! Aggregate results for batch delete operations.

use serde::{Deserialize, Serialize};

/// Counts reported by one batch-delete call.
///
/// The provider's batch delete returns aggregate totals rather than a
/// per-key status, so a chunk's result is a pair of counts, not a list
/// of per-key outcomes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkDeletion {
    /// Number of keys the provider confirmed as deleted.
    pub deleted: usize,
    /// Number of keys the provider reported an error for.
    pub errors: usize,
}

impl ChunkDeletion {
    /// Creates a new chunk deletion result.
    pub fn new(deleted: usize, errors: usize) -> Self {
        Self { deleted, errors }
    }
}

/// Totals accumulated across all chunks of a batch delete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteSummary {
    /// Total keys confirmed as deleted.
    pub deleted: usize,
    /// Total keys the provider reported errors for.
    ///
    /// Per-key errors are counted, not individually surfaced.
    pub errors: usize,
}

impl DeleteSummary {
    /// Folds a chunk's counts into the running totals.
    pub fn accumulate(&mut self, chunk: ChunkDeletion) {
        self.deleted += chunk.deleted;
        self.errors += chunk.errors;
    }

    /// Total keys accounted for.
    pub fn total(&self) -> usize {
        self.deleted + self.errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulate_chunks() {
        let mut summary = DeleteSummary::default();
        summary.accumulate(ChunkDeletion::new(1000, 0));
        summary.accumulate(ChunkDeletion::new(997, 3));
        summary.accumulate(ChunkDeletion::new(250, 0));

        assert_eq!(summary.deleted, 2247);
        assert_eq!(summary.errors, 3);
        assert_eq!(summary.total(), 2250);
    }
}
