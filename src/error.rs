//! Configuration errors.
//!
//! Everything in the tick path is infallible once constructed. Errors only
//! surface while building a configuration.

/// Invalid tick-counting configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// A period of zero ticks can never expire.
    ZeroPeriod,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::ZeroPeriod => write!(f, "period must be at least one tick"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

/// Timer configuration errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimingError {
    /// Input clock frequency is zero.
    ZeroClock,

    /// Requested tick frequency is zero.
    ZeroFrequency,

    /// The prescaled clock is slower than the requested tick frequency.
    FrequencyTooHigh,

    /// The compare value does not fit the 8-bit compare register.
    CompareOutOfRange {
        /// Compare value the arithmetic produced.
        compare: u32,
    },

    /// The division leaves a remainder, so the achieved period would drift.
    InexactPeriod {
        /// Remainder of `clock / (prescaler * frequency)`.
        remainder: u32,
    },
}

impl core::fmt::Display for TimingError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            TimingError::ZeroClock => write!(f, "clock frequency must be non-zero"),
            TimingError::ZeroFrequency => write!(f, "tick frequency must be non-zero"),
            TimingError::FrequencyTooHigh => {
                write!(f, "tick frequency exceeds the prescaled timer clock")
            }
            TimingError::CompareOutOfRange { compare } => {
                write!(f, "compare value {} does not fit an 8-bit timer", compare)
            }
            TimingError::InexactPeriod { remainder } => {
                write!(
                    f,
                    "tick period is not exact (remainder {}), the timer would drift",
                    remainder
                )
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for TimingError {}
