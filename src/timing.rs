//! Periodic tick source configuration.
//!
//! A compare-match timer raises its interrupt every `compare + 1` prescaled
//! clock cycles. [`TimerConfig`] does that arithmetic once, at configuration
//! time, and reports how close the achieved period is to the requested one.

use crate::error::TimingError;

/// CPU clock of the reference board (16 MHz Arduino Uno).
pub const F_CPU: u32 = 16_000_000;

/// Tick rate of the cooperative loop: one tick every 10 ms.
pub const TICK_HZ: u32 = 100;

/// The reference 10 ms tick: `F_CPU / 1024 / 100 - 1 = 155`.
///
/// The division is not exact, the achieved period is 9.984 ms.
pub const TEN_MS: TimerConfig = TimerConfig {
    clock_hz: F_CPU,
    prescaler: Prescaler::Div1024,
    tick_hz: TICK_HZ,
    compare: 155,
};

/// Clock dividers available on an 8-bit timer/counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Prescaler {
    Div1,
    Div8,
    Div64,
    Div256,
    Div1024,
}

impl Prescaler {
    /// Numeric clock divider.
    pub const fn divisor(self) -> u32 {
        match self {
            Prescaler::Div1 => 1,
            Prescaler::Div8 => 8,
            Prescaler::Div64 => 64,
            Prescaler::Div256 => 256,
            Prescaler::Div1024 => 1024,
        }
    }
}

/// Waveform generation mode of a PWM timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PwmMode {
    /// Single-slope counting, 256 timer clocks per carrier period.
    #[default]
    Fast,

    /// Dual-slope counting, 510 timer clocks per carrier period.
    PhaseCorrect,
}

impl PwmMode {
    /// Timer clocks per carrier period for an 8-bit counter.
    pub const fn clocks_per_period(self) -> u32 {
        match self {
            PwmMode::Fast => 256,
            PwmMode::PhaseCorrect => 510,
        }
    }
}

/// PWM carrier frequency in Hz for an 8-bit timer.
///
/// 16 MHz without prescaling in fast mode gives 62 500 Hz.
pub const fn carrier_hz(clock_hz: u32, prescaler: Prescaler, mode: PwmMode) -> u32 {
    clock_hz / (prescaler.divisor() * mode.clocks_per_period())
}

/// Compare-match (CTC) configuration of a periodic interrupt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimerConfig {
    clock_hz: u32,
    prescaler: Prescaler,
    tick_hz: u32,
    compare: u8,
}

impl TimerConfig {
    /// Computes the compare value for `tick_hz` as
    /// `clock_hz / prescaler / tick_hz - 1`.
    ///
    /// An inexact division is accepted; check [`is_exact`](Self::is_exact)
    /// or use [`exact`](Self::exact) to reject it.
    ///
    /// # Errors
    /// * `ZeroClock`, `ZeroFrequency` - a zero input
    /// * `FrequencyTooHigh` - fewer than one prescaled cycle per tick
    /// * `CompareOutOfRange` - the compare value exceeds 255
    pub fn for_frequency(
        clock_hz: u32,
        prescaler: Prescaler,
        tick_hz: u32,
    ) -> Result<Self, TimingError> {
        if clock_hz == 0 {
            return Err(TimingError::ZeroClock);
        }
        if tick_hz == 0 {
            return Err(TimingError::ZeroFrequency);
        }

        let cycles = clock_hz / prescaler.divisor() / tick_hz;
        if cycles == 0 {
            return Err(TimingError::FrequencyTooHigh);
        }

        let compare = cycles - 1;
        let compare =
            u8::try_from(compare).map_err(|_| TimingError::CompareOutOfRange { compare })?;

        let config = Self {
            clock_hz,
            prescaler,
            tick_hz,
            compare,
        };

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "timer: clock={} prescaler={} compare={} exact={}",
            clock_hz,
            prescaler.divisor(),
            compare,
            config.is_exact()
        );

        Ok(config)
    }

    /// Like [`for_frequency`](Self::for_frequency), but refuses a period that
    /// would drift.
    ///
    /// # Errors
    /// Everything `for_frequency` returns, plus `InexactPeriod`.
    pub fn exact(clock_hz: u32, prescaler: Prescaler, tick_hz: u32) -> Result<Self, TimingError> {
        let config = Self::for_frequency(clock_hz, prescaler, tick_hz)?;
        let remainder = config.remainder();
        if remainder != 0 {
            return Err(TimingError::InexactPeriod { remainder });
        }
        Ok(config)
    }

    /// Input clock frequency in Hz.
    pub fn clock_hz(&self) -> u32 {
        self.clock_hz
    }

    /// Clock divider feeding the counter.
    pub fn prescaler(&self) -> Prescaler {
        self.prescaler
    }

    /// Requested interrupt frequency in Hz.
    pub fn tick_hz(&self) -> u32 {
        self.tick_hz
    }

    /// Value loaded into the compare register.
    pub fn compare(&self) -> u8 {
        self.compare
    }

    /// Prescaled clock cycles between two interrupts.
    pub fn cycles_per_tick(&self) -> u32 {
        self.compare as u32 + 1
    }

    /// Returns true when the achieved frequency equals the requested
    /// [`tick_hz`](Self::tick_hz).
    pub fn is_exact(&self) -> bool {
        self.remainder() == 0
    }

    /// Achieved interrupt frequency in millihertz.
    pub fn actual_tick_millihz(&self) -> u64 {
        self.clock_hz as u64 * 1000 / self.timer_clocks()
    }

    /// Achieved interrupt period in microseconds, rounded down.
    pub fn period_micros(&self) -> u64 {
        self.timer_clocks() * 1_000_000 / self.clock_hz as u64
    }

    fn timer_clocks(&self) -> u64 {
        self.prescaler.divisor() as u64 * self.cycles_per_tick() as u64
    }

    // Zero exactly when clock / prescaler / tick_hz divides evenly.
    fn remainder(&self) -> u32 {
        let divider = self.prescaler.divisor() as u64 * self.tick_hz as u64;
        (self.clock_hz as u64 % divider) as u32
    }
}

/// Hardware timer able to raise a periodic compare-match interrupt.
///
/// Implement this for your board's timer peripheral. The interrupt handler
/// itself is wired by the application and should do nothing but
/// [`TickFlag::raise`](crate::TickFlag::raise).
pub trait PeriodicTimer {
    /// Programs clock source, CTC mode and compare value, then enables the
    /// compare-match interrupt.
    fn configure_periodic_interrupt(&mut self, config: &TimerConfig);
}
