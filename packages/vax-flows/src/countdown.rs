//! OTP expiry countdown.
//!
//! A single tokio task ticks once per `tick` and publishes the remaining
//! seconds on a `watch` channel. The task stops at zero, or as soon as the
//! owning [`Countdown`] is dropped: the handle holds a drop guard on the
//! task's cancellation token, so no tick can land after the owner is gone.

use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{interval_at, Instant};
use tokio_util::sync::{CancellationToken, DropGuard};
use tracing::debug;

/// A running countdown. Dropping it cancels the timer.
#[derive(Debug)]
pub struct Countdown {
    total: u32,
    remaining: watch::Receiver<u32>,
    _cancel_on_drop: DropGuard,
}

impl Countdown {
    /// Start counting down from `total`, one unit per `tick`.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn start(total: u32, tick: Duration) -> Self {
        let (tx, rx) = watch::channel(total);
        let cancel = CancellationToken::new();
        let task_cancel = cancel.clone();

        tokio::spawn(async move {
            if total == 0 {
                return;
            }

            let mut interval = interval_at(Instant::now() + tick, tick);
            loop {
                tokio::select! {
                    biased;
                    _ = task_cancel.cancelled() => {
                        debug!(remaining = *tx.borrow(), "Countdown cancelled");
                        break;
                    }
                    _ = interval.tick() => {
                        let next = tx.borrow().saturating_sub(1);
                        tx.send_replace(next);
                        if next == 0 {
                            debug!("Countdown reached zero");
                            break;
                        }
                    }
                }
            }
        });

        Self {
            total,
            remaining: rx,
            _cancel_on_drop: cancel.drop_guard(),
        }
    }

    /// Seconds the countdown started from.
    pub fn total(&self) -> u32 {
        self.total
    }

    /// Seconds left. Never below zero.
    pub fn remaining(&self) -> u32 {
        *self.remaining.borrow()
    }

    pub fn is_expired(&self) -> bool {
        self.remaining() == 0
    }

    /// Watch the remaining seconds, e.g. to redraw a display on each tick.
    ///
    /// The channel closes when the countdown ends or is cancelled.
    pub fn subscribe(&self) -> watch::Receiver<u32> {
        self.remaining.clone()
    }

    /// `m:ss` rendering of the remaining time.
    pub fn display(&self) -> String {
        format_remaining(self.remaining())
    }
}

/// Render seconds as `m:ss` (`135` → `"2:15"`, `65` → `"1:05"`).
pub fn format_remaining(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    const TICK: Duration = Duration::from_secs(1);

    #[test]
    fn test_format_remaining() {
        assert_eq!(format_remaining(180), "3:00");
        assert_eq!(format_remaining(135), "2:15");
        assert_eq!(format_remaining(65), "1:05");
        assert_eq!(format_remaining(9), "0:09");
        assert_eq!(format_remaining(0), "0:00");
    }

    #[tokio::test(start_paused = true)]
    async fn test_counts_down_one_per_tick() {
        let countdown = Countdown::start(180, TICK);
        assert_eq!(countdown.remaining(), 180);

        sleep(Duration::from_millis(45_500)).await;
        assert_eq!(countdown.remaining(), 135);
        assert_eq!(countdown.display(), "2:15");
    }

    #[tokio::test(start_paused = true)]
    async fn test_stops_at_zero() {
        let countdown = Countdown::start(3, TICK);
        let mut rx = countdown.subscribe();

        sleep(Duration::from_secs(10)).await;
        assert_eq!(countdown.remaining(), 0);
        assert!(countdown.is_expired());

        // Task has exited, so the channel is closed with no pending value.
        rx.borrow_and_update();
        assert!(rx.changed().await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_ticks() {
        let countdown = Countdown::start(180, TICK);
        let mut rx = countdown.subscribe();

        sleep(Duration::from_millis(2_500)).await;
        drop(countdown);
        let frozen = *rx.borrow_and_update();
        assert_eq!(frozen, 178);

        sleep(Duration::from_secs(30)).await;
        assert_eq!(*rx.borrow(), frozen);
        assert!(rx.changed().await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_total_never_ticks() {
        let countdown = Countdown::start(0, TICK);
        sleep(Duration::from_secs(5)).await;
        assert_eq!(countdown.remaining(), 0);
    }
}
