//! Deadline-based debouncing of input events.
//!
//! A [`Debouncer`] holds at most one pending value. Every [`Debouncer::call`]
//! replaces the pending value and restarts the delay, so only the most recent input
//! within a burst takes effect. The owner drives time explicitly by passing
//! [`Instant`]s to [`Debouncer::poll`]; there are no threads or timers.
//!
//! # Example
//!
//! ```rust
//! use datatable::app::debounce::Debouncer;
//! use std::time::{Duration, Instant};
//!
//! let start = Instant::now();
//! let mut search = Debouncer::new(Duration::from_millis(300));
//!
//! search.call("a".to_string(), start);
//! search.call("ab".to_string(), start + Duration::from_millis(100));
//!
//! assert_eq!(search.poll(start + Duration::from_millis(350)), None);
//! assert_eq!(search.poll(start + Duration::from_millis(400)), Some("ab".to_string()));
//! assert!(!search.cancel());
//! ```

use std::time::{Duration, Instant};

/// A single-slot, last-writer-wins delayed value.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(Instant, T)>,
}

impl<T> Debouncer<T> {
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Replaces any pending value with `value`, due `delay` after `now`.
    pub fn call(&mut self, value: T, now: Instant) {
        self.pending = Some((now + self.delay, value));
    }

    /// Drops the pending value. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// Takes the pending value if its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((deadline, _)) if *deadline <= now => self.pending.take().map(|(_, v)| v),
            _ => None,
        }
    }

    /// Deadline of the pending value.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(deadline, _)| *deadline)
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
