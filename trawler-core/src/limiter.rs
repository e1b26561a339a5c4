//! Bounded concurrency over a list of work items.

use std::any::Any;
use std::future::Future;
use std::num::NonZeroUsize;
use std::panic::AssertUnwindSafe;

use futures::{FutureExt, StreamExt, stream};

use crate::errors::ScrapeError;

/// Outcome of one item run through the limiter.
#[derive(Debug)]
pub struct ItemOutcome<T> {
    /// Position of the item in the input list
    pub index: usize,
    pub result: Result<T, ScrapeError>,
}

/// Runs an async operation over items with at most `K` in flight.
///
/// A new item starts as soon as any running one finishes, so a stalled call
/// only occupies its own slot. Each item's outcome is captured on its own;
/// errors and panics never cancel siblings.
#[derive(Debug, Clone, Copy)]
pub struct ConcurrencyLimiter {
    max_in_flight: NonZeroUsize,
}

impl ConcurrencyLimiter {
    /// Creates a limiter with the given bound.
    ///
    /// # Errors
    /// - `ScrapeError::Configuration` - Bound is zero
    pub fn new(max_in_flight: usize) -> Result<Self, ScrapeError> {
        let max_in_flight =
            NonZeroUsize::new(max_in_flight).ok_or_else(|| ScrapeError::Configuration {
                reason: "concurrency bound must be greater than zero".to_string(),
            })?;
        Ok(Self { max_in_flight })
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.get()
    }

    /// Applies `operation` to every item.
    ///
    /// Outcomes arrive in completion order; `index` maps each back to its item.
    pub async fn run<I, T, F, Fut>(&self, items: Vec<I>, operation: F) -> Vec<ItemOutcome<T>>
    where
        F: Fn(I) -> Fut,
        Fut: Future<Output = Result<T, ScrapeError>>,
    {
        stream::iter(items.into_iter().enumerate())
            .map(|(index, item)| {
                let task = AssertUnwindSafe(operation(item)).catch_unwind();
                async move {
                    let result = task.await.unwrap_or_else(|payload| {
                        Err(ScrapeError::TaskPanicked {
                            reason: panic_reason(payload.as_ref()),
                        })
                    });
                    ItemOutcome { index, result }
                }
            })
            .buffer_unordered(self.max_in_flight.get())
            .collect()
            .await
    }
}

fn panic_reason(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "non-string panic payload".to_string())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_zero_bound_is_rejected() {
        assert!(matches!(
            ConcurrencyLimiter::new(0),
            Err(ScrapeError::Configuration { .. })
        ));
        assert_eq!(ConcurrencyLimiter::new(3).unwrap().max_in_flight(), 3);
    }

    #[tokio::test]
    async fn test_peak_concurrency_respects_bound() {
        let limiter = ConcurrencyLimiter::new(2).unwrap();
        let in_flight = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let outcomes = limiter
            .run((0..10).collect(), |n: u32| {
                let in_flight = in_flight.clone();
                let peak = peak.clone();
                async move {
                    let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                    peak.fetch_max(now, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_millis(10)).await;
                    in_flight.fetch_sub(1, Ordering::SeqCst);
                    Ok(n * 2)
                }
            })
            .await;

        assert_eq!(outcomes.len(), 10);
        assert!(peak.load(Ordering::SeqCst) <= 2);
        for outcome in outcomes {
            assert_eq!(outcome.result.unwrap(), outcome.index as u32 * 2);
        }
    }

    #[tokio::test]
    async fn test_failures_are_isolated() {
        let limiter = ConcurrencyLimiter::new(2).unwrap();

        let mut outcomes = limiter
            .run(vec![1, 2, 3, 4], |n: i32| async move {
                match n {
                    2 => Err(ScrapeError::ProviderError {
                        reason: "bad item".to_string(),
                    }),
                    3 => panic!("item {n} exploded"),
                    _ => Ok(n),
                }
            })
            .await;
        outcomes.sort_by_key(|outcome| outcome.index);

        assert_eq!(outcomes.len(), 4);
        assert_eq!(*outcomes[0].result.as_ref().unwrap(), 1);
        assert!(matches!(
            outcomes[1].result,
            Err(ScrapeError::ProviderError { .. })
        ));
        assert!(matches!(
            &outcomes[2].result,
            Err(ScrapeError::TaskPanicked { reason }) if reason == "item 3 exploded"
        ));
        assert_eq!(*outcomes[3].result.as_ref().unwrap(), 4);
    }

    #[tokio::test]
    async fn test_stalled_item_does_not_block_others() {
        let limiter = ConcurrencyLimiter::new(2).unwrap();
        let order = Arc::new(std::sync::Mutex::new(Vec::new()));

        let outcomes = limiter
            .run(vec![200u64, 5, 5, 5], |delay| {
                let order = order.clone();
                async move {
                    tokio::time::sleep(Duration::from_millis(delay)).await;
                    order.lock().unwrap().push(delay);
                    Ok(delay)
                }
            })
            .await;

        assert_eq!(outcomes.len(), 4);
        // The three short items finish through the second slot while the first stalls.
        assert_eq!(*order.lock().unwrap(), vec![5, 5, 5, 200]);
        assert_eq!(outcomes.last().map(|o| o.index), Some(0));
    }

    #[test]
    fn test_empty_input() {
        let limiter = ConcurrencyLimiter::new(2).unwrap();
        let outcomes =
            tokio_test::block_on(limiter.run(Vec::<u8>::new(), |n| async move { Ok(n) }));
        assert!(outcomes.is_empty());
    }
}
