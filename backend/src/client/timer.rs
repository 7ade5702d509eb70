use std::time::Duration;

/// Countdown that fires once per period when fed elapsed time.
///
/// On expiry the countdown restarts at the full period; any overshoot past
/// zero is discarded, so one oversized delta still fires only once.
#[derive(Debug, Clone)]
pub struct RepeatingTimer {
    period: Duration,
    remaining: Duration,
}

impl RepeatingTimer {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            remaining: period,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    /// Advance by `elapsed`. Returns true when the countdown reached zero.
    pub fn tick(&mut self, elapsed: Duration) -> bool {
        self.remaining = self.remaining.saturating_sub(elapsed);
        if !self.remaining.is_zero() {
            return false;
        }
        self.remaining = self.period;
        true
    }

    pub fn reset(&mut self) {
        self.remaining = self.period;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn fires_once_when_cumulative_time_reaches_period() {
        let mut timer = RepeatingTimer::new(ms(2000));

        let fired: Vec<bool> = [500, 500, 500, 600]
            .into_iter()
            .map(|d| timer.tick(ms(d)))
            .collect();

        assert_eq!(fired, vec![false, false, false, true]);
        assert_eq!(timer.remaining(), ms(2000));
    }

    #[test]
    fn fires_exactly_at_period() {
        let mut timer = RepeatingTimer::new(ms(2000));
        assert!(!timer.tick(ms(1000)));
        assert!(timer.tick(ms(1000)));
    }

    #[test]
    fn oversized_delta_fires_only_once() {
        let mut timer = RepeatingTimer::new(ms(2000));
        assert!(timer.tick(ms(10_000)));
        assert!(!timer.tick(ms(1)));
    }

    #[test]
    fn one_fire_per_period_over_many_small_deltas() {
        let mut timer = RepeatingTimer::new(ms(2000));
        let fires = (0..600).filter(|_| timer.tick(ms(16))).count();
        // 9600ms of frames at a 2000ms period, each period needing 125 frames
        assert_eq!(fires, 4);
    }

    #[test]
    fn reset_restores_full_period() {
        let mut timer = RepeatingTimer::new(ms(15_000));
        timer.tick(ms(14_000));
        timer.reset();
        assert_eq!(timer.remaining(), ms(15_000));
    }
}
