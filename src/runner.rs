//! Tick-consuming main loop.
//!
//! Provides [`TickLoop`], the single authority that consumes ticks from a
//! [`TickFlag`], counts them down with a [`DelayCounter`] and drives an
//! [`Actuator`] on every period expiry. Also defines the [`Actuator`] trait.

use crate::countdown::DelayCounter;
use crate::tick::TickFlag;

/// Something driven once per elapsed period.
///
/// Implemented by the LED sequencer and the PWM ramp. Runs in the main loop,
/// never in interrupt context, and must not block.
pub trait Actuator {
    /// Called once each time the delay counter expires.
    fn on_period(&mut self);
}

impl<A: Actuator + ?Sized> Actuator for &mut A {
    fn on_period(&mut self) {
        (**self).on_period();
    }
}

/// Result of one [`TickLoop::poll`] iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Poll {
    /// No tick was pending.
    Idle,

    /// A tick was consumed; the period has not elapsed yet.
    Counting {
        /// Ticks left until the actuator runs.
        remaining: u16,
    },

    /// A tick was consumed, the period elapsed and the actuator ran.
    Advanced,
}

/// Cooperative tick-driven loop.
///
/// Owns its counter and actuator; borrows the shared flag that the timer
/// interrupt raises.
///
/// # Type Parameters
/// * `'f` - Lifetime of the tick flag reference (usually `'static`)
/// * `A` - Actuator driven on each period expiry
pub struct TickLoop<'f, A: Actuator> {
    flag: &'f TickFlag,
    counter: DelayCounter,
    actuator: A,
}

impl<'f, A: Actuator> TickLoop<'f, A> {
    /// Creates a loop that runs `actuator` every `counter.period()` ticks.
    pub fn new(flag: &'f TickFlag, counter: DelayCounter, actuator: A) -> Self {
        Self {
            flag,
            counter,
            actuator,
        }
    }

    /// Runs one iteration of the loop without blocking.
    pub fn poll(&mut self) -> Poll {
        if !self.flag.take() {
            return Poll::Idle;
        }
        self.consume()
    }

    /// Runs forever, spinning on the flag between ticks.
    pub fn run(mut self) -> ! {
        loop {
            self.flag.wait();
            self.consume();
        }
    }

    fn consume(&mut self) -> Poll {
        if self.counter.tick() {
            #[cfg(feature = "defmt")]
            defmt::trace!("tick: period elapsed");

            self.actuator.on_period();
            Poll::Advanced
        } else {
            Poll::Counting {
                remaining: self.counter.remaining(),
            }
        }
    }

    /// Returns the driven actuator.
    pub fn actuator(&self) -> &A {
        &self.actuator
    }

    /// Returns the driven actuator mutably.
    pub fn actuator_mut(&mut self) -> &mut A {
        &mut self.actuator
    }

    /// Returns the tick counter.
    pub fn counter(&self) -> &DelayCounter {
        &self.counter
    }

    /// Consumes the loop, returning counter and actuator.
    pub fn into_parts(self) -> (DelayCounter, A) {
        (self.counter, self.actuator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counter(u32);

    impl Actuator for Counter {
        fn on_period(&mut self) {
            self.0 += 1;
        }
    }

    #[test]
    fn poll_without_tick_is_idle() {
        let flag = TickFlag::new();
        let mut tick_loop = TickLoop::new(&flag, DelayCounter::from_ticks(2).unwrap(), Counter(0));
        assert_eq!(tick_loop.poll(), Poll::Idle);
        assert_eq!(tick_loop.actuator().0, 0);
    }

    #[test]
    fn poll_reports_counting_then_advanced() {
        let flag = TickFlag::new();
        let mut tick_loop = TickLoop::new(&flag, DelayCounter::from_ticks(2).unwrap(), Counter(0));

        flag.raise();
        assert_eq!(tick_loop.poll(), Poll::Counting { remaining: 1 });
        flag.raise();
        assert_eq!(tick_loop.poll(), Poll::Advanced);
        assert_eq!(tick_loop.actuator().0, 1);
    }

    #[test]
    fn borrowed_actuator_is_driven() {
        let flag = TickFlag::new();
        let mut counter = Counter(0);
        {
            let mut tick_loop =
                TickLoop::new(&flag, DelayCounter::from_ticks(1).unwrap(), &mut counter);
            flag.raise();
            tick_loop.poll();
        }
        assert_eq!(counter.0, 1);
    }
}
