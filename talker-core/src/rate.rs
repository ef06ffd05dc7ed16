//! Fixed-frequency rate limiter.

use crate::{
    error::{Error, Result},
    shutdown::ShutdownToken,
};
use std::time::{Duration, Instant};

/// Sleeps for whatever is left of the current period so that successive
/// calls to [`Rate::sleep`] return at a fixed frequency.
///
/// Time spent between two sleeps is compensated. A caller that falls more
/// than two periods behind is rescheduled from the current instant instead
/// of bursting through the missed ticks.
#[derive(Debug, Clone)]
pub struct Rate {
    period: Duration,
    last: Instant,
}

impl Rate {
    /// Create a rate running at `hz` ticks per second.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRate`] if `hz` is not a positive finite number,
    /// or is so small that its period does not fit in a [`Duration`].
    pub fn new(hz: f64) -> Result<Self> {
        if !hz.is_finite() || hz <= 0.0 {
            return Err(Error::InvalidRate(hz));
        }
        let period = Duration::try_from_secs_f64(1.0 / hz).map_err(|_| Error::InvalidRate(hz))?;
        Ok(Self::from_period(period))
    }

    /// Create a rate with an explicit period.
    pub fn from_period(period: Duration) -> Self {
        Self {
            period,
            last: Instant::now(),
        }
    }

    /// Target time between two ticks.
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Restart the schedule from now.
    pub fn reset(&mut self) {
        self.last = Instant::now();
    }

    /// Time left until the next tick, as seen at `now`.
    pub fn remaining(&self, now: Instant) -> Duration {
        self.last
            .checked_add(self.period)
            .map_or(Duration::MAX, |deadline| deadline.saturating_duration_since(now))
    }

    /// Block until the next tick.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Interrupted`] if `shutdown` fires before the tick,
    /// or had already fired.
    pub fn sleep(&mut self, shutdown: &ShutdownToken) -> Result<()> {
        let now = Instant::now();
        let Some(deadline) = self.last.checked_add(self.period) else {
            // The next tick is past what `Instant` can represent.
            shutdown.wait();
            return Err(Error::Interrupted);
        };

        if shutdown.wait_until(deadline) {
            return Err(Error::Interrupted);
        }

        self.last = deadline;
        let lag = now.saturating_duration_since(self.last);
        if self.period.checked_mul(2).is_some_and(|limit| lag > limit) {
            tracing::trace!(period = ?self.period, "rate overrun, rescheduling");
            self.last = now;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_ten_hz_period() {
        let rate = Rate::new(10.0).unwrap();
        assert_eq!(rate.period(), Duration::from_millis(100));
    }

    #[test]
    fn test_invalid_rates() {
        for hz in [0.0, -1.0, f64::NAN, f64::INFINITY, 1e-20, f64::MIN_POSITIVE] {
            assert!(matches!(Rate::new(hz), Err(Error::InvalidRate(_))));
        }
    }

    #[test]
    fn test_remaining() {
        let rate = Rate::from_period(Duration::from_millis(100));
        let now = Instant::now();
        assert!(rate.remaining(now) <= Duration::from_millis(100));
        assert_eq!(
            rate.remaining(now + Duration::from_secs(1)),
            Duration::ZERO
        );
    }

    #[test]
    fn test_work_time_is_compensated() {
        let token = ShutdownToken::new();
        let mut rate = Rate::from_period(Duration::from_millis(40));

        let start = Instant::now();
        rate.reset();
        for _ in 0..5 {
            thread::sleep(Duration::from_millis(25));
            rate.sleep(&token).unwrap();
        }
        let elapsed = start.elapsed();

        // 5 * 40ms when compensated, 5 * 65ms when not
        assert!(elapsed >= Duration::from_millis(200), "{elapsed:?}");
        assert!(elapsed < Duration::from_millis(320), "{elapsed:?}");
    }

    #[test]
    fn test_overrun_reschedules() {
        let token = ShutdownToken::new();
        let mut rate = Rate::from_period(Duration::from_millis(10));

        thread::sleep(Duration::from_millis(60));
        let start = Instant::now();
        rate.sleep(&token).unwrap();
        assert!(start.elapsed() < Duration::from_millis(10));

        // Schedule restarted from the late call, so the next tick is a full period away.
        let start = Instant::now();
        rate.sleep(&token).unwrap();
        assert!(start.elapsed() >= Duration::from_millis(5));
    }

    #[test]
    fn test_interrupted_by_shutdown() {
        let token = ShutdownToken::new();
        let remote = token.clone();
        let mut rate = Rate::from_period(Duration::from_secs(30));

        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            remote.shutdown();
        });

        let start = Instant::now();
        assert!(matches!(rate.sleep(&token), Err(Error::Interrupted)));
        assert!(start.elapsed() < Duration::from_secs(10));
        handle.join().unwrap();
    }

    #[test]
    fn test_tiny_rate_does_not_overflow() {
        let token = ShutdownToken::new();
        let remote = token.clone();
        // Representable period whose deadline is not a representable instant.
        let mut rate = Rate::new(1e-19).unwrap();
        assert_eq!(rate.remaining(Instant::now()), Duration::MAX);

        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            remote.shutdown();
        });
        assert!(matches!(rate.sleep(&token), Err(Error::Interrupted)));
        handle.join().unwrap();

        let mut rate = Rate::from_period(Duration::MAX);
        assert!(matches!(rate.sleep(&token), Err(Error::Interrupted)));
    }

    #[test]
    fn test_already_shut_down() {
        let token = ShutdownToken::new();
        token.shutdown();
        let mut rate = Rate::from_period(Duration::ZERO);
        assert!(matches!(rate.sleep(&token), Err(Error::Interrupted)));
    }
}
