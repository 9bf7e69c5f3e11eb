//! Bounded-concurrency dispatch of independent work items.

use std::future::Future;

use futures::stream::{self, StreamExt, TryStreamExt};
use tracing::{debug, info};

use crate::{Outcome, TRACING_TARGET};

/// Dispatches a per-item operation across a batch of work items with
/// bounded concurrency, preserving submission order in the results.
///
/// A dispatcher is stateless and single-use: construct one per batch,
/// call [`run`](Self::run), and discard it. Nothing persists across
/// invocations.
///
/// The dispatcher never retries: retry policy, if any, belongs to the
/// operation itself. It also never classifies results; the operation must
/// translate expected conditions into [`Outcome::Skipped`] or
/// [`Outcome::Failure`] and reserve `Err` for unexpected conditions,
/// which abort the whole batch.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    concurrency: usize,
    progress_label: Option<String>,
}

impl Dispatcher {
    /// Creates a dispatcher with concurrency matching the available
    /// parallelism of the host.
    pub fn new() -> Self {
        let concurrency = std::thread::available_parallelism()
            .map(std::num::NonZeroUsize::get)
            .unwrap_or(1);

        Self {
            concurrency,
            progress_label: None,
        }
    }

    /// Sets the maximum number of in-flight operation calls.
    ///
    /// Values below one are clamped to one.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Sets a human-readable label attached to the batch's log records.
    ///
    /// The label is cosmetic: it never affects dispatch, ordering, or
    /// results.
    pub fn with_progress_label(mut self, label: impl Into<String>) -> Self {
        self.progress_label = Some(label.into());
        self
    }

    /// Returns the configured concurrency bound.
    #[inline]
    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Runs `operation` once per item, keeping at most
    /// [`concurrency`](Self::concurrency) calls in flight.
    ///
    /// Results are index-aligned with `items` regardless of completion
    /// order, and every submitted item yields exactly one outcome. An
    /// empty batch returns an empty result without invoking the
    /// operation.
    ///
    /// # Errors
    ///
    /// Propagates the first `Err` returned by `operation`, aborting the
    /// batch. Operations still in flight at that point are dropped.
    pub async fn run<I, T, E, F, Fut>(&self, items: Vec<I>, operation: F) -> Result<Vec<Outcome<T>>, E>
    where
        F: Fn(I) -> Fut,
        Fut: Future<Output = Result<Outcome<T>, E>>,
    {
        if items.is_empty() {
            debug!(
                target: TRACING_TARGET,
                label = self.progress_label.as_deref(),
                "Empty batch, nothing to dispatch"
            );
            return Ok(Vec::new());
        }

        info!(
            target: TRACING_TARGET,
            items = items.len(),
            concurrency = self.concurrency,
            label = self.progress_label.as_deref(),
            "Dispatching batch"
        );

        let start = std::time::Instant::now();

        // `buffered` (as opposed to `buffer_unordered`) yields completed
        // futures in submission order, which carries the index-alignment
        // invariant without any re-sorting on our side.
        let outcomes: Vec<Outcome<T>> = stream::iter(items)
            .map(|item| operation(item))
            .buffered(self.concurrency)
            .try_collect()
            .await?;

        info!(
            target: TRACING_TARGET,
            items = outcomes.len(),
            elapsed = ?start.elapsed(),
            label = self.progress_label.as_deref(),
            "Batch completed"
        );

        Ok(outcomes)
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_concurrency_clamped() {
        let dispatcher = Dispatcher::new().with_concurrency(0);
        assert_eq!(dispatcher.concurrency(), 1);

        let dispatcher = Dispatcher::new().with_concurrency(8);
        assert_eq!(dispatcher.concurrency(), 8);
    }

    #[tokio::test]
    async fn test_empty_batch_is_noop() {
        let dispatcher = Dispatcher::new().with_concurrency(4);
        let items: Vec<u32> = Vec::new();

        let outcomes = dispatcher
            .run(items, |_| async { Ok::<_, Infallible>(Outcome::Success(())) })
            .await
            .unwrap();

        assert!(outcomes.is_empty());
    }

    #[tokio::test]
    async fn test_results_preserve_submission_order() {
        let dispatcher = Dispatcher::new()
            .with_concurrency(4)
            .with_progress_label("ordering test");
        let items: Vec<usize> = (0..32).collect();

        // Earlier items sleep longer than later ones, so completion order
        // is roughly the reverse of submission order.
        let outcomes = dispatcher
            .run(items, |i| async move {
                tokio::time::sleep(Duration::from_millis((32 - i) as u64)).await;
                Ok::<_, Infallible>(Outcome::Success(i))
            })
            .await
            .unwrap();

        assert_eq!(outcomes.len(), 32);
        for (index, outcome) in outcomes.iter().enumerate() {
            assert_eq!(outcome.success(), Some(&index));
        }
    }

    #[tokio::test]
    async fn test_every_item_yields_one_outcome() {
        let dispatcher = Dispatcher::new().with_concurrency(3);
        let items = vec!["a", "b", "c", "d", "e"];

        let outcomes = dispatcher
            .run(items.clone(), |name| async move {
                if name == "c" {
                    Ok::<_, Infallible>(Outcome::skipped("already present"))
                } else {
                    Ok(Outcome::Success(name))
                }
            })
            .await
            .unwrap();

        assert_eq!(outcomes.len(), items.len());
        assert!(outcomes[2].is_skipped());
        assert_eq!(outcomes[4].success(), Some(&"e"));
    }

    #[tokio::test]
    async fn test_unexpected_error_aborts_batch() {
        let dispatcher = Dispatcher::new().with_concurrency(2);
        let items: Vec<u32> = (0..8).collect();

        let result = dispatcher
            .run(items, |i| async move {
                if i == 3 {
                    Err("access denied")
                } else {
                    Ok(Outcome::Success(i))
                }
            })
            .await;

        assert_eq!(result.unwrap_err(), "access denied");
    }
}
