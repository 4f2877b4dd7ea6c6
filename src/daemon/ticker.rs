//! Cancellable periodic ticker.
//!
//! Owns the interval handle explicitly so the scheduler can stop the tick
//! stream while a reset fires and restart it for the new cycle. While
//! stopped, `tick()` pends forever, which makes it safe to poll inside a
//! `select!` alongside shutdown signals.

use std::time::Duration;
use tokio::time::{Interval, MissedTickBehavior, interval};

/// Periodic tick source with explicit start/stop.
#[derive(Debug)]
pub struct Ticker {
    period: Duration,
    handle: Option<Interval>,
}

impl Ticker {
    /// Create a stopped ticker with the given period.
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            handle: None,
        }
    }

    /// The configured tick period.
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Start (or restart) ticking. The first tick completes immediately.
    pub fn start(&mut self) {
        let mut handle = interval(self.period);
        handle.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.handle = Some(handle);
    }

    /// Stop ticking and drop the interval handle.
    pub fn stop(&mut self) {
        self.handle = None;
    }

    /// Whether the ticker is currently running.
    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    /// Wait for the next tick; pends forever while stopped.
    pub async fn tick(&mut self) {
        match self.handle.as_mut() {
            Some(handle) => {
                handle.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::timeout;

    #[test]
    fn test_new_ticker_is_stopped() {
        let ticker = Ticker::new(Duration::from_secs(1));
        assert!(!ticker.is_running());
        assert_eq!(ticker.period(), Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_start_and_stop() {
        let mut ticker = Ticker::new(Duration::from_secs(1));
        ticker.start();
        assert!(ticker.is_running());
        ticker.stop();
        assert!(!ticker.is_running());
    }

    #[tokio::test]
    async fn test_first_tick_is_immediate() {
        let mut ticker = Ticker::new(Duration::from_secs(60));
        ticker.start();
        timeout(Duration::from_millis(50), ticker.tick())
            .await
            .expect("first tick should complete immediately");
    }

    #[tokio::test]
    async fn test_stopped_ticker_pends() {
        let mut ticker = Ticker::new(Duration::from_millis(10));
        let result = timeout(Duration::from_millis(50), ticker.tick()).await;
        assert!(result.is_err(), "stopped ticker must not tick");
    }

    #[tokio::test]
    async fn test_restart_produces_fresh_ticks() {
        let mut ticker = Ticker::new(Duration::from_millis(10));
        ticker.start();
        ticker.tick().await;
        ticker.stop();
        ticker.start();
        timeout(Duration::from_millis(100), ticker.tick())
            .await
            .expect("restarted ticker should tick again");
    }
}
