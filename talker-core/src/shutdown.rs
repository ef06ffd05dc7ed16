//! Cancellation token shared between a loop and whoever may stop it.

use parking_lot::{Condvar, Mutex};
use std::{
    sync::Arc,
    time::{Duration, Instant},
};

#[derive(Default)]
struct Inner {
    requested: Mutex<bool>,
    cond: Condvar,
}

/// Cloneable shutdown signal.
///
/// Every clone observes the same state. Once fired it stays fired.
///
/// # Example
///
/// ```
/// use talker_core::shutdown::ShutdownToken;
///
/// let token = ShutdownToken::new();
/// let remote = token.clone();
/// remote.shutdown();
/// assert!(token.is_shutdown());
/// ```
#[derive(Clone, Default)]
pub struct ShutdownToken {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for ShutdownToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShutdownToken")
            .field("requested", &self.is_shutdown())
            .finish()
    }
}

impl ShutdownToken {
    /// Create a token that has not been fired.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request shutdown and wake every waiter. Idempotent.
    pub fn shutdown(&self) {
        let mut requested = self.inner.requested.lock();
        if !*requested {
            *requested = true;
            tracing::debug!("shutdown requested");
        }
        self.inner.cond.notify_all();
    }

    /// Check whether shutdown was requested.
    pub fn is_shutdown(&self) -> bool {
        *self.inner.requested.lock()
    }

    /// Block until shutdown is requested.
    pub fn wait(&self) {
        let mut requested = self.inner.requested.lock();
        while !*requested {
            self.inner.cond.wait(&mut requested);
        }
    }

    /// Block until `deadline` or until shutdown is requested.
    ///
    /// Returns `true` if shutdown was requested.
    pub fn wait_until(&self, deadline: Instant) -> bool {
        let mut requested = self.inner.requested.lock();
        while !*requested {
            if self.inner.cond.wait_until(&mut requested, deadline).timed_out() {
                break;
            }
        }
        *requested
    }

    /// Block for at most `timeout` or until shutdown is requested.
    ///
    /// Returns `true` if shutdown was requested.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        self.wait_until(Instant::now() + timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_fresh_token() {
        let token = ShutdownToken::new();
        assert!(!token.is_shutdown());
        assert!(!token.wait_timeout(Duration::from_millis(10)));
    }

    #[test]
    fn test_shutdown_is_idempotent() {
        let token = ShutdownToken::new();
        token.shutdown();
        token.shutdown();
        assert!(token.is_shutdown());
        assert!(token.wait_timeout(Duration::from_secs(10)));
    }

    #[test]
    fn test_shutdown_wakes_waiter() {
        let token = ShutdownToken::new();
        let remote = token.clone();

        let start = Instant::now();
        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            remote.shutdown();
        });

        assert!(token.wait_timeout(Duration::from_secs(10)));
        assert!(start.elapsed() < Duration::from_secs(5));
        handle.join().unwrap();
    }

    #[test]
    fn test_wait_returns_after_shutdown() {
        let token = ShutdownToken::new();
        let remote = token.clone();
        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            remote.shutdown();
        });

        token.wait();
        assert!(token.is_shutdown());
        handle.join().unwrap();
    }
}
