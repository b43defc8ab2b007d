use std::time::{Duration, Instant};

pub const DEFAULT_TICK: Duration = Duration::from_millis(2000);

/// Fixed-period tick deadline. The first tick is one period after `start`.
#[derive(Debug, Clone)]
pub struct TickScheduler {
    period: Duration,
    next: Instant,
}

impl TickScheduler {
    pub fn new(period: Duration, start: Instant) -> Self {
        let period = if period.is_zero() { DEFAULT_TICK } else { period };
        Self {
            period,
            next: start + period,
        }
    }

    /// Returns true and advances the deadline if a tick is due at `now`.
    ///
    /// Missed periods are collapsed into a single tick.
    pub fn poll(&mut self, now: Instant) -> bool {
        if now < self.next {
            return false;
        }
        while self.next <= now {
            self.next += self.period;
        }
        true
    }

    /// Time left until the next tick, for `request_repaint_after`.
    pub fn remaining(&self, now: Instant) -> Duration {
        self.next.saturating_duration_since(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tick_after_one_period() {
        let start = Instant::now();
        let mut ticks = TickScheduler::new(Duration::from_millis(2000), start);
        assert!(!ticks.poll(start));
        assert!(!ticks.poll(start + Duration::from_millis(1999)));
        assert!(ticks.poll(start + Duration::from_millis(2000)));
        assert!(!ticks.poll(start + Duration::from_millis(2001)));
        assert!(ticks.poll(start + Duration::from_millis(4000)));
    }

    #[test]
    fn missed_periods_collapse() {
        let start = Instant::now();
        let mut ticks = TickScheduler::new(Duration::from_millis(100), start);
        assert!(ticks.poll(start + Duration::from_millis(750)));
        assert!(!ticks.poll(start + Duration::from_millis(790)));
        assert_eq!(
            ticks.remaining(start + Duration::from_millis(790)),
            Duration::from_millis(10)
        );
    }

    #[test]
    fn zero_period_falls_back_to_default() {
        let start = Instant::now();
        let ticks = TickScheduler::new(Duration::ZERO, start);
        assert_eq!(ticks.remaining(start), DEFAULT_TICK);
    }
}
