//! Owned periodic task handle.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// A repeating task that runs until its callback returns `false` or the
/// handle is dropped. Dropping the handle aborts the task, so cancelling a
/// timer is just letting go of it.
pub struct Ticker {
    task: JoinHandle<()>,
}

impl Ticker {
    /// Spawn a task calling `on_tick(n)` immediately and then once per
    /// `period`. Ticks never overlap: the next one waits for the previous
    /// callback to finish.
    pub fn spawn<F, Fut>(period: Duration, mut on_tick: F) -> Self
    where
        F: FnMut(u64) -> Fut + Send + 'static,
        Fut: Future<Output = bool> + Send + 'static,
    {
        let period = period.max(Duration::from_millis(1));
        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut n = 0u64;
            loop {
                interval.tick().await;
                if !on_tick(n).await {
                    break;
                }
                n += 1;
            }
        });
        Self { task }
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[tokio::test(start_paused = true)]
    async fn test_ticks_immediately_then_on_period() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let _ticker = Ticker::spawn(Duration::from_secs(15), move |n| {
            let sent = tx.send(n).is_ok();
            std::future::ready(sent)
        });

        assert_eq!(rx.recv().await, Some(0));
        let before = tokio::time::Instant::now();
        assert_eq!(rx.recv().await, Some(1));
        assert!(before.elapsed() >= Duration::from_secs(15));
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_task() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let ticker = Ticker::spawn(Duration::from_secs(1), move |n| {
            let sent = tx.send(n).is_ok();
            std::future::ready(sent)
        });
        assert_eq!(rx.recv().await, Some(0));

        drop(ticker);
        // The aborted task drops its sender, closing the channel
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stops_when_callback_returns_false() {
        let ticker = Ticker::spawn(Duration::from_millis(10), |n| std::future::ready(n < 2));
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(ticker.is_finished());
    }
}
