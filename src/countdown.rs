//! Tick countdown.

use crate::error::ConfigError;
use core::num::NonZeroU16;

/// Counts consumed ticks down to a period.
///
/// Decrement-then-test: with a period of N, [`tick`](Self::tick) returns
/// true on the Nth call and every Nth call after that.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DelayCounter {
    period: NonZeroU16,
    remaining: u16,
}

impl DelayCounter {
    /// Creates a counter that expires every `period` ticks.
    pub const fn new(period: NonZeroU16) -> Self {
        Self {
            period,
            remaining: period.get(),
        }
    }

    /// Creates a counter from a raw tick count.
    ///
    /// # Errors
    /// * `ZeroPeriod` - `ticks` is zero
    pub fn from_ticks(ticks: u16) -> Result<Self, ConfigError> {
        NonZeroU16::new(ticks)
            .map(Self::new)
            .ok_or(ConfigError::ZeroPeriod)
    }

    /// Counts one consumed tick.
    ///
    /// Returns true when the period has elapsed; the counter is reloaded
    /// before returning.
    pub fn tick(&mut self) -> bool {
        self.remaining -= 1;
        if self.remaining == 0 {
            self.remaining = self.period.get();
            true
        } else {
            false
        }
    }

    /// Ticks left until the next expiry.
    pub fn remaining(&self) -> u16 {
        self.remaining
    }

    /// Configured period in ticks.
    pub fn period(&self) -> NonZeroU16 {
        self.period
    }

    /// Restarts the current period from the beginning.
    pub fn reset(&mut self) {
        self.remaining = self.period.get();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_period_is_rejected() {
        assert_eq!(DelayCounter::from_ticks(0), Err(ConfigError::ZeroPeriod));
    }

    #[test]
    fn period_of_one_expires_every_tick() {
        let mut counter = DelayCounter::from_ticks(1).unwrap();
        for _ in 0..5 {
            assert!(counter.tick());
            assert_eq!(counter.remaining(), 1);
        }
    }

    #[test]
    fn expires_on_nth_tick_not_before_or_after() {
        let mut counter = DelayCounter::from_ticks(50).unwrap();
        for _ in 0..49 {
            assert!(!counter.tick());
        }
        assert_eq!(counter.remaining(), 1);
        assert!(counter.tick());
        assert_eq!(counter.remaining(), 50);
    }

    #[test]
    fn reset_restarts_period() {
        let mut counter = DelayCounter::from_ticks(3).unwrap();
        counter.tick();
        counter.tick();
        counter.reset();
        assert!(!counter.tick());
        assert!(!counter.tick());
        assert!(counter.tick());
    }

    #[test]
    fn max_period_does_not_overflow() {
        let mut counter = DelayCounter::from_ticks(u16::MAX).unwrap();
        let expiries = (0..u16::MAX as u32 * 2).filter(|_| counter.tick()).count();
        assert_eq!(expiries, 2);
    }
}
