use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

/// Smallest period a timer will run at; zero would panic in tokio.
const MIN_PERIOD: Duration = Duration::from_secs(1);

/// A repeating timer backed by a spawned task. The period is fixed for
/// the lifetime of the timer; changing cadence means cancelling this one
/// and starting a fresh instance.
pub struct RepeatedTimer {
    handle: JoinHandle<()>,
}

impl RepeatedTimer {
    /// Starts the timer. With `run_first` the callback fires immediately,
    /// otherwise only after one full period has elapsed. Ticks are
    /// awaited sequentially, so a callback never overlaps itself.
    pub fn start<F, Fut>(period: Duration, run_first: bool, callback: F) -> Self
    where
        F: Fn() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send,
    {
        // interval_at panics on a zero period, and a panic inside the
        // spawned task would kill the timer with no trace.
        let period = if period.is_zero() {
            tracing::warn!("Zero timer period requested, clamping to {:?}", MIN_PERIOD);
            MIN_PERIOD
        } else {
            period
        };

        let handle = tokio::spawn(async move {
            let first_tick = if run_first {
                Instant::now()
            } else {
                Instant::now() + period
            };

            let mut ticker = time::interval_at(first_tick, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                callback().await;
            }
        });

        Self { handle }
    }

    /// Stops the timer. Idempotent; an in-flight callback may still run
    /// to completion, but no further ticks fire.
    pub fn cancel(&self) {
        self.handle.abort();
    }
}

impl Drop for RepeatedTimer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
