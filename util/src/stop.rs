//! Cooperative stop signal
//!
//! A [`StopSignal`] is shared between the main control loop and whatever
//! requests the stop (usually the SIGINT handler). The loop polls it once per
//! cycle and sleeps on it between cycles, so a stop request wakes the loop
//! immediately rather than after the remainder of the cycle.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex};
use std::time::{Duration, Instant};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Cloneable handle to a single stop flag.
#[derive(Clone, Default, Debug)]
pub struct StopSignal {
    inner: Arc<Inner>,
}

#[derive(Default, Debug)]
struct Inner {
    stop: AtomicBool,

    /// Guards nothing, only pairs with the condvar
    lock: Mutex<()>,

    cvar: Condvar,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request that all holders of this signal stop, waking any waiters.
    pub fn request_stop(&self) {
        // Taking the lock orders the store against a waiter checking the flag
        // and going to sleep.
        let _guard = self.inner.lock.lock().unwrap_or_else(|e| e.into_inner());
        self.inner.stop.store(true, Ordering::SeqCst);
        self.inner.cvar.notify_all();
    }

    /// True once a stop has been requested.
    pub fn is_stop_requested(&self) -> bool {
        self.inner.stop.load(Ordering::SeqCst)
    }

    /// Wait for up to `timeout` or until a stop is requested.
    ///
    /// Returns `true` if a stop has been requested.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;

        let mut guard = self.inner.lock.lock().unwrap_or_else(|e| e.into_inner());

        // Loop to absorb spurious wakeups
        while !self.is_stop_requested() {
            let now = Instant::now();
            if now >= deadline {
                break;
            }

            guard = match self.inner.cvar.wait_timeout(guard, deadline - now) {
                Ok((g, _)) => g,
                Err(e) => e.into_inner().0,
            };
        }

        self.is_stop_requested()
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use std::thread;

    #[test]
    fn test_wait_times_out() {
        let stop = StopSignal::new();

        let start = Instant::now();
        assert_eq!(stop.wait_timeout(Duration::from_millis(50)), false);
        assert!(start.elapsed() >= Duration::from_millis(50));
        assert!(!stop.is_stop_requested());
    }

    #[test]
    fn test_stop_wakes_waiter() {
        let stop = StopSignal::new();
        let remote = stop.clone();

        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            remote.request_stop();
        });

        // Much longer than the stop delay, must return early
        let start = Instant::now();
        assert!(stop.wait_timeout(Duration::from_secs(10)));
        assert!(start.elapsed() < Duration::from_secs(5));

        handle.join().unwrap();
    }

    #[test]
    fn test_wait_after_stop_returns_immediately() {
        let stop = StopSignal::new();
        stop.request_stop();

        let start = Instant::now();
        assert!(stop.wait_timeout(Duration::from_secs(10)));
        assert!(start.elapsed() < Duration::from_secs(1));
    }
}
