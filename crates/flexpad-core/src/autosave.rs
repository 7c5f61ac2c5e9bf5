//! Debounced autosave deadline.
//!
//! There is no timer thread. The deadline is a plain value recomputed on every
//! edit; the event loop asks whether it has passed.

use std::time::{Duration, Instant};

/// One-shot, cancel-and-reschedule autosave deadline.
///
/// At most one deadline is pending. `reschedule` replaces it, so the pending
/// deadline always equals the last reschedule time plus the delay.
#[derive(Debug, Clone, Default)]
pub struct AutosaveTimer {
    /// `None` disables autosave entirely.
    delay: Option<Duration>,
    deadline: Option<Instant>,
}

impl AutosaveTimer {
    pub fn new(delay: Option<Duration>) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    pub fn delay(&self) -> Option<Duration> {
        self.delay
    }

    /// Returns the pending deadline, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Cancels any pending deadline and schedules a new one at `now + delay`.
    pub fn reschedule(&mut self, now: Instant) {
        self.deadline = self.delay.and_then(|delay| now.checked_add(delay));
    }

    /// Drops the pending deadline without firing it.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Returns true once the pending deadline has passed.
    pub fn is_due(&self, now: Instant) -> bool {
        self.deadline.is_some_and(|deadline| now >= deadline)
    }

    /// Consumes the deadline if it is due.
    ///
    /// Returns true exactly once per scheduled deadline.
    pub fn take_due(&mut self, now: Instant) -> bool {
        if self.is_due(now) {
            self.deadline = None;
            true
        } else {
            false
        }
    }

    /// Time left until the pending deadline (zero if already due).
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_secs(60);

    #[test]
    fn deadline_tracks_most_recent_edit() {
        let start = Instant::now();
        let mut timer = AutosaveTimer::new(Some(DELAY));

        let edits = [0u64, 3, 3, 17, 59, 61, 200];
        for offset in edits {
            let at = start + Duration::from_secs(offset);
            timer.reschedule(at);
            assert_eq!(timer.deadline(), Some(at + DELAY));
        }
    }

    #[test]
    fn fires_only_after_quiet_period() {
        let start = Instant::now();
        let mut timer = AutosaveTimer::new(Some(DELAY));
        timer.reschedule(start);

        // A later edit pushes the deadline out.
        timer.reschedule(start + Duration::from_secs(30));
        assert!(!timer.is_due(start + DELAY));
        assert!(timer.is_due(start + Duration::from_secs(90)));
    }

    #[test]
    fn take_due_fires_once() {
        let start = Instant::now();
        let mut timer = AutosaveTimer::new(Some(DELAY));
        timer.reschedule(start);

        let later = start + DELAY;
        assert!(timer.take_due(later));
        assert!(!timer.take_due(later));
        assert!(!timer.is_pending());
    }

    #[test]
    fn cancel_clears_pending_deadline() {
        let start = Instant::now();
        let mut timer = AutosaveTimer::new(Some(DELAY));
        timer.reschedule(start);
        timer.cancel();
        assert!(!timer.is_due(start + DELAY * 2));
        assert_eq!(timer.time_until_due(start), None);
    }

    #[test]
    fn disabled_timer_never_schedules() {
        let mut timer = AutosaveTimer::new(None);
        timer.reschedule(Instant::now());
        assert!(!timer.is_pending());
    }

    #[test]
    fn time_until_due_saturates() {
        let start = Instant::now();
        let mut timer = AutosaveTimer::new(Some(DELAY));
        timer.reschedule(start);

        assert_eq!(
            timer.time_until_due(start + Duration::from_secs(20)),
            Some(Duration::from_secs(40))
        );
        assert_eq!(
            timer.time_until_due(start + Duration::from_secs(120)),
            Some(Duration::ZERO)
        );
    }
}
