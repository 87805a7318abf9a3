use std::time::{Duration, Instant};

/// Holds the latest value of a rapidly changing input until it has been left
/// alone for `delay`.
///
/// Time is passed in by the caller rather than read from the clock, so the
/// owner decides when to poll and tests can step time explicitly.
#[derive(Debug, Clone)]
pub struct Debounced<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debounced<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Replace the buffered value and restart the quiet period.
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now));
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn peek(&self) -> Option<&T> {
        self.pending.as_ref().map(|(value, _)| value)
    }

    /// The buffered value once `delay` has passed since the last push.
    pub fn take_ready(&mut self, now: Instant) -> Option<T> {
        let settled = matches!(
            &self.pending,
            Some((_, edited_at)) if now.saturating_duration_since(*edited_at) >= self.delay
        );
        if settled {
            self.flush()
        } else {
            None
        }
    }

    /// The buffered value regardless of timing.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }

    pub fn clear(&mut self) {
        self.pending = None;
    }
}
