//! Free-running tick counter.
//!
//! Counts elapsed periods (one second by default) on a background tokio
//! task. Observers read the latest value or subscribe through a `watch`
//! channel; there is no backlog of tick events.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Duration, Instant, MissedTickBehavior};
use tracing::{debug, info, instrument, trace};

/// Default tick period.
pub const DEFAULT_PERIOD: Duration = Duration::from_secs(1);

/// Generation value meaning "no ticker is active".
const IDLE: u64 = 0;

/// Identifies one run of a [`PeriodicCounter`], returned by `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CounterHandle {
    generation: u64,
}

/// Counter incremented once per period while running.
#[derive(Debug)]
pub struct PeriodicCounter {
    period: Duration,
    count: Arc<watch::Sender<u64>>,
    active: Arc<AtomicU64>,
    last_generation: u64,
    ticker: Option<(CounterHandle, JoinHandle<()>)>,
}

impl PeriodicCounter {
    /// Creates a stopped counter with the given tick period.
    ///
    /// A zero period is raised to one millisecond.
    #[instrument]
    pub fn new(period: Duration) -> Self {
        let (tx, _rx) = watch::channel(0);
        Self {
            period: period.max(Duration::from_millis(1)),
            count: Arc::new(tx),
            active: Arc::new(AtomicU64::new(IDLE)),
            last_generation: IDLE,
            ticker: None,
        }
    }

    /// Returns the tick period.
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Resets the count to zero and starts ticking.
    ///
    /// Must be called from within a tokio runtime. A ticker that is already
    /// running is stopped first, so its handle becomes inert.
    #[instrument(skip(self), fields(period = ?self.period))]
    pub fn start(&mut self) -> CounterHandle {
        if let Some(running) = self.ticker.as_ref().map(|(handle, _)| *handle) {
            self.stop(&running);
        }

        self.last_generation += 1;
        let handle = CounterHandle {
            generation: self.last_generation,
        };
        self.count.send_replace(0);
        self.active.store(handle.generation, Ordering::Release);

        let task = tokio::spawn(tick(
            handle.generation,
            self.period,
            Arc::clone(&self.count),
            Arc::clone(&self.active),
        ));
        self.ticker = Some((handle, task));

        info!(generation = handle.generation, "Counter started");
        handle
    }

    /// Stops the ticker identified by `handle`.
    ///
    /// Stopping a handle that is already stopped or was superseded by a
    /// later `start` does nothing.
    #[instrument(skip(self))]
    pub fn stop(&mut self, handle: &CounterHandle) {
        match self.ticker.take() {
            Some((current, task)) if current == *handle => {
                self.active.store(IDLE, Ordering::Release);
                task.abort();
                info!(value = self.current_value(), "Counter stopped");
            }
            other => {
                self.ticker = other;
                debug!("Stop on inactive handle ignored");
            }
        }
    }

    /// Returns true while a ticker is running.
    pub fn is_running(&self) -> bool {
        self.ticker.is_some()
    }

    /// Returns the latest count.
    pub fn current_value(&self) -> u64 {
        *self.count.borrow()
    }

    /// Subscribes to count changes. Receivers always see the latest value.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.count.subscribe()
    }
}

impl Default for PeriodicCounter {
    fn default() -> Self {
        Self::new(DEFAULT_PERIOD)
    }
}

impl Drop for PeriodicCounter {
    fn drop(&mut self) {
        if let Some((_, task)) = self.ticker.take() {
            self.active.store(IDLE, Ordering::Release);
            task.abort();
        }
    }
}

async fn tick(
    generation: u64,
    period: Duration,
    count: Arc<watch::Sender<u64>>,
    active: Arc<AtomicU64>,
) {
    let mut interval = time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Burst);

    loop {
        interval.tick().await;
        // A superseded ticker may still be polled once before its abort lands.
        if active.load(Ordering::Acquire) != generation {
            break;
        }
        count.send_modify(|value| *value += 1);
        trace!(generation, value = *count.borrow(), "Tick");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_counts_elapsed_periods() {
        let mut counter = PeriodicCounter::default();
        let handle = counter.start();
        assert_eq!(counter.current_value(), 0);

        time::sleep(Duration::from_millis(3500)).await;
        assert_eq!(counter.current_value(), 3);

        counter.stop(&handle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_freezes_value() {
        let mut counter = PeriodicCounter::default();
        let handle = counter.start();
        time::sleep(Duration::from_millis(2500)).await;
        counter.stop(&handle);
        assert!(!counter.is_running());

        time::sleep(Duration::from_secs(10)).await;
        assert_eq!(counter.current_value(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_is_idempotent() {
        let mut counter = PeriodicCounter::default();
        let handle = counter.start();
        counter.stop(&handle);
        counter.stop(&handle);
        assert!(!counter.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_resets_to_zero() {
        let mut counter = PeriodicCounter::default();
        let first = counter.start();
        time::sleep(Duration::from_millis(4500)).await;
        assert_eq!(counter.current_value(), 4);

        let second = counter.start();
        assert_eq!(counter.current_value(), 0);

        // The superseded handle no longer controls the counter.
        counter.stop(&first);
        assert!(counter.is_running());

        time::sleep(Duration::from_millis(1500)).await;
        assert_eq!(counter.current_value(), 1);
        counter.stop(&second);
    }

    #[tokio::test(start_paused = true)]
    async fn test_subscriber_sees_latest_value() {
        let mut counter = PeriodicCounter::new(Duration::from_millis(100));
        let mut rx = counter.subscribe();
        let handle = counter.start();

        rx.changed().await.unwrap();
        time::sleep(Duration::from_millis(450)).await;
        assert_eq!(*rx.borrow_and_update(), 4);

        counter.stop(&handle);
    }
}
