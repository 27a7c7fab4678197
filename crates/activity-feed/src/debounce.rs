use std::time::{Duration, Instant};

/// Default delay before a search keystroke takes effect.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(250);

/// Cancellable, restartable timer holding at most one pending value.
///
/// Scheduling replaces whatever is pending and restarts the delay, so only the
/// most recently scheduled value can ever be delivered by [`Debouncer::poll`].
/// The owner drives it from its event loop; nothing runs on another thread.
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    generation: u64,
    pending: Option<Pending<T>>,
}

#[derive(Debug)]
struct Pending<T> {
    value: T,
    due: Instant,
    generation: u64,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: 0,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedules `value` to fire `delay` after `now`, superseding any pending
    /// value. Returns the generation of the new schedule.
    pub fn schedule(&mut self, value: T, now: Instant) -> u64 {
        self.generation += 1;
        self.pending = Some(Pending {
            value,
            due: now + self.delay,
            generation: self.generation,
        });
        self.generation
    }

    /// Drops the pending value, if any.
    pub fn cancel(&mut self) {
        self.generation += 1;
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Time left until the pending value is due, zero if overdue.
    pub fn time_left(&self, now: Instant) -> Option<Duration> {
        self.pending
            .as_ref()
            .map(|pending| pending.due.saturating_duration_since(now))
    }

    /// Delivers the pending value once it is due.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some(pending) if pending.due <= now && pending.generation == self.generation => {
                self.pending.take().map(|pending| pending.value)
            }
            _ => None,
        }
    }

    /// Delivers the pending value immediately, ignoring the delay.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|pending| pending.value)
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}
