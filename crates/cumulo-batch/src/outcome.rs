//! Per-item outcome classification and batch summaries.

use serde::{Deserialize, Serialize};

/// Result of one unit of work within a batch.
///
/// Expected conditions are carried as [`Outcome::Skipped`] or
/// [`Outcome::Failure`]; they never abort the surrounding batch. Anything
/// the operation did not explicitly classify propagates as an error from
/// [`Dispatcher::run`](crate::Dispatcher::run) instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Outcome<T> {
    /// The operation performed its side effect.
    Success(T),
    /// The operation was a no-op, with a human-readable reason
    /// (e.g. the object already exists at the destination).
    Skipped(String),
    /// The operation failed for a reason the caller marked as expected.
    Failure(String),
}

impl<T> Outcome<T> {
    /// Creates a skipped outcome from any displayable reason.
    pub fn skipped(reason: impl Into<String>) -> Self {
        Self::Skipped(reason.into())
    }

    /// Creates a failure outcome from any displayable reason.
    pub fn failure(reason: impl Into<String>) -> Self {
        Self::Failure(reason.into())
    }

    /// Returns whether this outcome is a success.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Returns whether this outcome is a skip.
    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped(_))
    }

    /// Returns whether this outcome is a failure.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    /// Returns the success value, if any.
    pub fn success(&self) -> Option<&T> {
        match self {
            Self::Success(value) => Some(value),
            _ => None,
        }
    }

    /// Consumes the outcome and returns the success value, if any.
    pub fn into_success(self) -> Option<T> {
        match self {
            Self::Success(value) => Some(value),
            _ => None,
        }
    }
}

/// Aggregate counts over a batch of outcomes.
///
/// The dispatcher never computes this itself; callers derive it from the
/// returned outcomes when they want to report totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    /// Number of items whose operation performed its side effect.
    pub succeeded: usize,
    /// Number of items skipped as already satisfied.
    pub skipped: usize,
    /// Number of items that failed with an expected condition.
    pub failed: usize,
}

impl BatchSummary {
    /// Computes the summary of a slice of outcomes.
    pub fn of<T>(outcomes: &[Outcome<T>]) -> Self {
        let mut summary = Self::default();
        for outcome in outcomes {
            match outcome {
                Outcome::Success(_) => summary.succeeded += 1,
                Outcome::Skipped(_) => summary.skipped += 1,
                Outcome::Failure(_) => summary.failed += 1,
            }
        }
        summary
    }

    /// Total number of items accounted for.
    pub fn total(&self) -> usize {
        self.succeeded + self.skipped + self.failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_predicates() {
        let success: Outcome<u32> = Outcome::Success(7);
        assert!(success.is_success());
        assert_eq!(success.success(), Some(&7));

        let skipped: Outcome<u32> = Outcome::skipped("already present");
        assert!(skipped.is_skipped());
        assert_eq!(skipped.success(), None);

        let failure: Outcome<u32> = Outcome::failure("remote rejected");
        assert!(failure.is_failure());
        assert_eq!(failure.into_success(), None);
    }

    #[test]
    fn test_summary_counts() {
        let outcomes = vec![
            Outcome::Success(()),
            Outcome::Success(()),
            Outcome::skipped("present"),
            Outcome::failure("broken"),
        ];

        let summary = BatchSummary::of(&outcomes);
        assert_eq!(summary.succeeded, 2);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.total(), 4);
    }

    #[test]
    fn test_summary_empty() {
        let outcomes: Vec<Outcome<()>> = Vec::new();
        assert_eq!(BatchSummary::of(&outcomes), BatchSummary::default());
    }
}
