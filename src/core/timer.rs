use std::time::Duration;

/// Delay and sound countdowns. Only `tick` decrements them.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timers {
    pub delay: u8,
    pub sound: u8,
}

impl Timers {
    pub fn tick(&mut self) {
        self.delay = self.delay.saturating_sub(1);
        self.sound = self.sound.saturating_sub(1);
    }

    pub fn sound_active(&self) -> bool {
        self.sound > 0
    }
}

/// Turns elapsed wall-clock time into a count of fixed-rate ticks, keeping the remainder.
#[derive(Debug, Clone)]
pub struct TickClock {
    period: Duration,
    pending: Duration,
}

impl TickClock {
    /// Rates above 1 GHz are clamped to a 1 ns period.
    pub fn new(hz: u32) -> Self {
        let period = (Duration::from_secs(1) / hz.max(1)).max(Duration::from_nanos(1));
        TickClock {
            period,
            pending: Duration::ZERO,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Saturates at `u32::MAX` ticks; the remainder below one period is carried over.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.pending = self.pending.saturating_add(elapsed);
        let period = self.period.as_nanos();
        let pending = self.pending.as_nanos();
        let remainder = pending % period;
        self.pending = Duration::from_nanos(remainder as u64);
        u32::try_from(pending / period).unwrap_or(u32::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts;

    #[test]
    fn test_tick_floors_at_zero() {
        let mut timers = Timers { delay: 2, sound: 1 };
        assert!(timers.sound_active());
        timers.tick();
        assert_eq!(timers, Timers { delay: 1, sound: 0 });
        assert!(!timers.sound_active());
        timers.tick();
        timers.tick();
        assert_eq!(timers, Timers { delay: 0, sound: 0 });
    }

    #[test]
    fn test_clock_accumulates_remainder() {
        let mut clock = TickClock::new(consts::TIMER_HZ);
        let period = clock.period();
        assert_eq!(clock.advance(period / 2), 0);
        assert_eq!(clock.advance(period / 2), 1);
        assert_eq!(clock.advance(period * 3), 3);
        assert_eq!(clock.advance(Duration::ZERO), 0);
    }

    #[test]
    fn test_clock_rate_above_nanosecond_resolution() {
        let mut clock = TickClock::new(2_000_000_000);
        assert_eq!(clock.period(), Duration::from_nanos(1));
        assert_eq!(clock.advance(Duration::from_millis(1)), 1_000_000);
        assert_eq!(clock.advance(Duration::ZERO), 0);
    }

    #[test]
    fn test_clock_saturates_after_long_stall() {
        let mut clock = TickClock::new(u32::MAX);
        assert_eq!(clock.advance(Duration::from_secs(3600)), u32::MAX);
    }

    #[test]
    fn test_clock_zero_rate_is_one_hertz() {
        let mut clock = TickClock::new(0);
        assert_eq!(clock.period(), Duration::from_secs(1));
        assert_eq!(clock.advance(Duration::from_millis(2500)), 2);
        assert_eq!(clock.advance(Duration::from_millis(500)), 1);
    }

    #[test]
    fn test_clock_one_second_is_sixty_ticks() {
        let mut clock = TickClock::new(consts::TIMER_HZ);
        let ticks: u32 = (0..100)
            .map(|_| clock.advance(Duration::from_millis(10)))
            .sum();
        assert!((59..=60).contains(&ticks));
    }
}
