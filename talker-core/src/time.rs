//! Wall clock.

use crate::{
    api::RosClock,
    error::{Error, Result},
};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// System time clock that never goes backwards.
///
/// If the wall clock steps back, the last returned value is repeated until
/// the wall clock catches up.
#[derive(Debug, Default)]
pub struct SystemClock {
    last: Duration,
}

impl SystemClock {
    /// Create a clock.
    pub fn new() -> Self {
        Self::default()
    }

    fn clamp(&mut self, now: Duration) -> Duration {
        self.last = self.last.max(now);
        self.last
    }
}

impl RosClock for SystemClock {
    fn now(&mut self) -> Result<Duration> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| Error::Clock(format!("{e}")))?;
        Ok(self.clamp(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_is_after_epoch() {
        let mut clock = SystemClock::new();
        assert!(clock.now().unwrap() > Duration::ZERO);
    }

    #[test]
    fn test_never_goes_backwards() {
        let mut clock = SystemClock::new();
        assert_eq!(clock.clamp(Duration::from_secs(10)), Duration::from_secs(10));
        assert_eq!(clock.clamp(Duration::from_secs(9)), Duration::from_secs(10));
        assert_eq!(clock.clamp(Duration::from_secs(11)), Duration::from_secs(11));
    }

    #[test]
    fn test_successive_reads() {
        let mut clock = SystemClock::new();
        let mut previous = clock.now().unwrap();
        for _ in 0..100 {
            let now = clock.now().unwrap();
            assert!(now >= previous);
            previous = now;
        }
    }
}
