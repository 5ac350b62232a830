//!
//! Debounce timers.
//!
//! There is no event loop in here. The owner calls [Debounce::schedule]
//! when something happens and polls with [Debounce::read] whenever it
//! gets the chance. [Debounce::sleep_time] tells how long it can wait.
//!

use std::time::{Duration, Instant};

/// Delay for the coalesced change notification.
pub const CHANGE_DELAY: Duration = Duration::from_millis(300);
/// Delay for repositioning after a resize.
pub const RESIZE_DELAY: Duration = Duration::from_millis(50);

/// A single pending deadline.
///
/// Each schedule replaces the previous deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Debounce {
    delay: Duration,
    due: Option<Instant>,
}

impl Debounce {
    pub fn new(delay: Duration) -> Self {
        Self { delay, due: None }
    }

    /// (Re)start the timer.
    pub fn schedule(&mut self, now: Instant) {
        self.due = Some(now + self.delay);
    }

    /// Drop a pending deadline.
    pub fn cancel(&mut self) {
        self.due = None;
    }

    pub fn is_pending(&self) -> bool {
        self.due.is_some()
    }

    /// Time until the deadline.
    pub fn sleep_time(&self, now: Instant) -> Option<Duration> {
        self.due.map(|due| due.saturating_duration_since(now))
    }

    /// Deadline has passed. Resets the timer.
    pub fn read(&mut self, now: Instant) -> bool {
        match self.due {
            Some(due) if now >= due => {
                self.due = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debounce() {
        let start = Instant::now();
        let mut d = Debounce::new(CHANGE_DELAY);
        assert!(!d.read(start));

        d.schedule(start);
        assert!(!d.read(start + Duration::from_millis(200)));
        // restart
        d.schedule(start + Duration::from_millis(200));
        assert!(!d.read(start + Duration::from_millis(400)));
        assert!(d.read(start + Duration::from_millis(500)));
        assert!(!d.read(start + Duration::from_millis(900)));
        assert!(!d.is_pending());
    }

    #[test]
    fn test_cancel() {
        let start = Instant::now();
        let mut d = Debounce::new(RESIZE_DELAY);
        d.schedule(start);
        assert_eq!(d.sleep_time(start), Some(RESIZE_DELAY));
        d.cancel();
        assert!(!d.read(start + Duration::from_secs(1)));
    }
}
