#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`TickFlag`**: Single-slot tick notification raised by a timer interrupt and taken by the main loop
//! - **`TimerConfig`**: Compare-match arithmetic for the periodic interrupt (`clock / prescaler / hz - 1`)
//! - **`DelayCounter`**: Counts consumed ticks down to a period
//! - **`TickLoop`**: The main loop: takes ticks, counts them, drives an `Actuator` on each period
//! - **`LedSequencer`**: Seven-state charlieplexed LED sequence over three tri-state lines
//! - **`DutyRamp`**: Complementary PWM duty ramp with an explicit end-of-range `RampMode`
//! - **`WavePlayer`**: Plays a 256-sample table (e.g. `SINE_TABLE`) at the PWM carrier rate
//! - **`PeriodicTimer`**, **`LineBank`**, **`PwmOutput`**: Traits to implement for your hardware
//!
//! The interrupt handler only ever calls `TickFlag::raise`. Everything else runs
//! in the main loop, which is the sole owner of counters, state and outputs.

pub mod countdown;
pub mod error;
pub mod led;
pub mod pwm;
pub mod ramp;
pub mod runner;
pub mod tick;
pub mod timing;
pub mod wave;

pub use countdown::DelayCounter;
pub use error::{ConfigError, TimingError};
pub use led::{
    Direction, LedSequencer, LedState, Level, Line, LineBank, LineState, LineUpdate, Lines,
};
pub use pwm::{HalPwm, PwmChannel, PwmOutput};
pub use ramp::{Duty, DutyRamp, RampDirection, RampMode};
pub use runner::{Actuator, Poll, TickLoop};
pub use tick::{Raise, TickFlag};
pub use timing::{PeriodicTimer, Prescaler, PwmMode, TimerConfig, carrier_hz};
pub use wave::{SINE_TABLE, TABLE_LEN, WavePlayer, output_frequency_millihz};

/// Ticks between LED sequence steps in the blink program (50 x 10 ms).
pub const LED_BLINK_TICKS: u16 = 50;

/// Ticks between duty steps in the PWM ramp program (5 x 10 ms).
pub const PWM_CHANGE_TICKS: u16 = 5;
