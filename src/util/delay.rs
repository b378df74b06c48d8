use std::time::{Duration, Instant};

/// A single pending value with a deadline, polled from the event loop.
///
/// Scheduling a new value replaces (cancels) any pending one, so only
/// the last value within the window is ever delivered: this is the
/// debounce used for search input, and with `T = ()` the auto-clear
/// timer for notices.
#[derive(Debug)]
pub struct Delayed<T> {
    delay: Duration,
    pending: Option<(Instant, T)>,
}

impl<T> Delayed<T> {
    pub fn new(delay: Duration) -> Delayed<T> {
        Delayed {
            delay,
            pending: None,
        }
    }

    /// Schedule `value` for delivery after the configured delay,
    /// replacing any pending value.
    pub fn schedule(&mut self, value: T) {
        self.schedule_at(value, Instant::now());
    }

    /// Drop any pending value without delivering it.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Deliver the pending value if its deadline has passed.
    pub fn poll(&mut self) -> Option<T> {
        self.poll_at(Instant::now())
    }

    // Clock-injected variants, used directly in tests
    pub fn schedule_at(&mut self, value: T, now: Instant) {
        self.pending = Some((now + self.delay, value));
    }

    pub fn poll_at(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((deadline, _)) if now >= *deadline => self.pending.take().map(|(_, v)| v),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delivers_only_after_the_deadline() {
        let mut d: Delayed<&str> = Delayed::new(Duration::from_millis(150));
        let t0 = Instant::now();
        d.schedule_at("query", t0);

        assert_eq!(d.poll_at(t0 + Duration::from_millis(100)), None);
        assert_eq!(d.poll_at(t0 + Duration::from_millis(150)), Some("query"));
        // Delivered once
        assert_eq!(d.poll_at(t0 + Duration::from_millis(300)), None);
    }

    #[test]
    fn rescheduling_replaces_the_pending_value() {
        let mut d: Delayed<&str> = Delayed::new(Duration::from_millis(150));
        let t0 = Instant::now();
        d.schedule_at("mil", t0);
        d.schedule_at("mile", t0 + Duration::from_millis(100));

        // The first value's deadline has passed, but it was superseded
        assert_eq!(d.poll_at(t0 + Duration::from_millis(200)), None);
        assert_eq!(d.poll_at(t0 + Duration::from_millis(250)), Some("mile"));
    }

    #[test]
    fn cancel_drops_the_pending_value() {
        let mut d: Delayed<()> = Delayed::new(Duration::from_millis(500));
        let t0 = Instant::now();
        d.schedule_at((), t0);
        assert!(d.is_pending());
        d.cancel();
        assert!(!d.is_pending());
        assert_eq!(d.poll_at(t0 + Duration::from_secs(1)), None);
    }
}
