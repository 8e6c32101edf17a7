//! Cancellable repeating timer for a cooperative event loop
//!
//! There is no background thread. The owner polls with the current [`Instant`] and gets back
//! how many intervals have elapsed. A timer holds at most one schedule: `start` replaces
//! whatever was running, so two schedules can never be live at once.

use std::time::{Duration, Instant};

/// Identity of one `start` call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

#[derive(Debug, Clone, Default)]
pub struct RepeatingTimer {
    interval: Duration,
    next_due: Option<Instant>,
    generation: u64,
}

impl RepeatingTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule ticks every `interval` from `now`, replacing any existing schedule
    pub fn start(&mut self, interval: Duration, now: Instant) -> TimerHandle {
        self.generation += 1;
        self.interval = interval;
        self.next_due = Some(now + interval);
        TimerHandle(self.generation)
    }

    pub fn cancel(&mut self) {
        self.next_due = None;
    }

    pub fn is_active(&self) -> bool {
        self.next_due.is_some()
    }

    /// Handle of the live schedule
    pub fn handle(&self) -> Option<TimerHandle> {
        self.next_due.map(|_| TimerHandle(self.generation))
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Number of ticks due at `now`; advances the schedule past them.
    ///
    /// A zero interval yields one tick per poll.
    pub fn poll(&mut self, now: Instant) -> u32 {
        let Some(due) = self.next_due else {
            return 0;
        };
        if now < due {
            return 0;
        }
        if self.interval.is_zero() {
            return 1;
        }

        let overdue = now.duration_since(due).as_nanos() / self.interval.as_nanos();
        let ticks = u32::try_from(overdue + 1).unwrap_or(u32::MAX);
        self.next_due = Some(due + self.interval * ticks);
        ticks
    }

    /// Time until the next tick, for sizing an event-loop wait
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.next_due.map(|due| due.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poll_counts_elapsed_intervals() {
        let t0 = Instant::now();
        let mut timer = RepeatingTimer::new();
        timer.start(Duration::from_millis(10), t0);

        assert_eq!(timer.poll(t0 + Duration::from_millis(5)), 0);
        assert_eq!(timer.poll(t0 + Duration::from_millis(10)), 1);
        assert_eq!(timer.poll(t0 + Duration::from_millis(15)), 0);
        assert_eq!(timer.poll(t0 + Duration::from_millis(45)), 3);
        assert_eq!(timer.poll(t0 + Duration::from_millis(49)), 0);
        assert_eq!(timer.poll(t0 + Duration::from_millis(50)), 1);
    }

    #[test]
    fn test_restart_replaces_schedule() {
        let t0 = Instant::now();
        let mut timer = RepeatingTimer::new();
        let first = timer.start(Duration::from_millis(10), t0);
        let second = timer.start(Duration::from_millis(100), t0);

        assert_ne!(first, second);
        assert_eq!(timer.handle(), Some(second));
        assert_eq!(timer.poll(t0 + Duration::from_millis(50)), 0);
    }

    #[test]
    fn test_cancel() {
        let t0 = Instant::now();
        let mut timer = RepeatingTimer::new();
        timer.start(Duration::from_millis(1), t0);
        timer.cancel();
        assert!(!timer.is_active());
        assert_eq!(timer.handle(), None);
        assert_eq!(timer.poll(t0 + Duration::from_secs(1)), 0);
        assert_eq!(timer.time_until_due(t0), None);
    }

    #[test]
    fn test_zero_interval_ticks_once_per_poll() {
        let t0 = Instant::now();
        let mut timer = RepeatingTimer::new();
        timer.start(Duration::ZERO, t0);
        assert_eq!(timer.poll(t0), 1);
        assert_eq!(timer.poll(t0 + Duration::from_secs(3)), 1);
    }
}
