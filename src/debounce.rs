//! Trailing-edge debounce for the search input.
//!
//! Holds at most one pending value; each `schedule` replaces the slot and
//! restarts the quiet period, so only the final value is ever delivered.
//! The owner polls `take_ready` from its event loop. There is no
//! free-running timer: dropping the debouncer drops the pending value with
//! it.

use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Replace any pending value and restart the quiet period.
    pub fn schedule(&mut self, value: T) {
        self.pending = Some((value, Instant::now()));
    }

    /// Drop the pending value without delivering it.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Deliver the pending value once the quiet period has elapsed.
    pub fn take_ready(&mut self) -> Option<T> {
        match &self.pending {
            Some((_, scheduled_at)) if scheduled_at.elapsed() >= self.delay => {
                self.pending.take().map(|(value, _)| value)
            }
            _ => None,
        }
    }

    /// Time left until the pending value becomes ready; `None` when idle.
    pub fn time_until_ready(&self) -> Option<Duration> {
        self.pending
            .as_ref()
            .map(|(_, scheduled_at)| self.delay.saturating_sub(scheduled_at.elapsed()))
    }
}
