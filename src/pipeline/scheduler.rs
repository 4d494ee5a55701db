//! Bounded fan-out over a batch
//!
//! Every item gets its own task, and a semaphore caps how many of them run their
//! work at once. Results are collected in input order.

use std::future::Future;
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Runs `work` on every item with at most `limit` in flight
///
/// The returned vector has one entry per item, in input order. An entry is `None`
/// when its task panicked or was cancelled.
///
/// # Example
///
/// ```
/// use company_enricher::pipeline::run_bounded;
///
/// # #[tokio::main]
/// # async fn main() {
/// let doubled = run_bounded(vec![1, 2, 3], 2, |n| async move { n * 2 }).await;
/// assert_eq!(doubled, vec![Some(2), Some(4), Some(6)]);
/// # }
/// ```
pub async fn run_bounded<T, R, F, Fut>(items: Vec<T>, limit: usize, work: F) -> Vec<Option<R>>
where
    T: Send + 'static,
    R: Send + 'static,
    F: Fn(T) -> Fut,
    Fut: Future<Output = R> + Send + 'static,
{
    let semaphore = Arc::new(Semaphore::new(limit.max(1)));

    let handles: Vec<_> = items
        .into_iter()
        .map(|item| {
            let semaphore = semaphore.clone();
            let task = work(item);
            tokio::spawn(async move {
                let _permit = semaphore.acquire_owned().await.ok()?;
                Some(task.await)
            })
        })
        .collect();

    let mut results = Vec::with_capacity(handles.len());
    for (index, handle) in handles.into_iter().enumerate() {
        match handle.await {
            Ok(result) => results.push(result),
            Err(e) => {
                tracing::warn!("Task {} failed: {}", index, e);
                results.push(None);
            }
        }
    }

    results
}
