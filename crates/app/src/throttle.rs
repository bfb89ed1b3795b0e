//! Rate-limited sequential iteration for bulk device operations.

use std::future::Future;
use std::time::Duration;

/// Runs one async step per item, strictly in order, pausing `interval`
/// between consecutive steps.
///
/// No pause happens before the first step or after the last one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Throttle {
    interval: Duration,
}

impl Throttle {
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Drive `step` over `items` one at a time, collecting results in order.
    pub async fn run<'a, T, F, Fut, R>(&self, items: &'a [T], mut step: F) -> Vec<R>
    where
        F: FnMut(&'a T) -> Fut,
        Fut: Future<Output = R>,
    {
        let mut results = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            if index > 0 && !self.interval.is_zero() {
                tokio::time::sleep(self.interval).await;
            }
            results.push(step(item).await);
        }
        results
    }
}

impl Default for Throttle {
    fn default() -> Self {
        Self::new(Duration::from_millis(250))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use tokio::time::Instant;

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn should_pause_between_consecutive_steps() {
        let throttle = Throttle::new(Duration::from_millis(250));
        let stamps = Mutex::new(Vec::new());

        throttle
            .run(&[1, 2, 3], |_| async {
                stamps.lock().unwrap().push(Instant::now());
            })
            .await;

        let stamps = stamps.into_inner().unwrap();
        assert_eq!(stamps.len(), 3);
        for pair in stamps.windows(2) {
            assert!(pair[1] - pair[0] >= Duration::from_millis(250));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn should_not_pause_before_first_or_after_last_step() {
        let throttle = Throttle::new(Duration::from_millis(250));
        let start = Instant::now();

        throttle.run(&["a", "b"], |_| async {}).await;

        assert_eq!(start.elapsed(), Duration::from_millis(250));
    }

    #[tokio::test(start_paused = true)]
    async fn should_keep_item_order_in_results() {
        let throttle = Throttle::default();
        let results = throttle.run(&[3, 1, 2], |n| async move { n * 10 }).await;
        assert_eq!(results, vec![30, 10, 20]);
    }

    #[tokio::test(start_paused = true)]
    async fn should_run_without_delay_when_interval_is_zero() {
        let throttle = Throttle::new(Duration::ZERO);
        let start = Instant::now();

        let results = throttle.run(&[1, 2, 3], |n| async move { *n }).await;

        assert_eq!(results.len(), 3);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[test]
    fn should_default_to_quarter_second() {
        assert_eq!(Throttle::default().interval(), Duration::from_millis(250));
    }
}
