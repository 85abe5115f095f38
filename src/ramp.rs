//! Complementary PWM duty ramp.
//!
//! Two channels start at 0% and 100% duty. Every elapsed period moves channel
//! A one step up and channel B one step down, so the pair always sums to 255.
//! What happens at the ends of the range is chosen with [`RampMode`].

use crate::pwm::{PwmChannel, PwmOutput};
use crate::runner::Actuator;

/// Behavior of the ramp when channel A reaches an end of the 8-bit range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RampMode {
    /// Free-running sawtooth: after 255 channel A restarts at 0 and
    /// channel B at 255.
    #[default]
    Wrap,

    /// Stops at the far end (A = 255, B = 0) and holds.
    Saturate,

    /// Reverses at both ends, producing a triangle.
    Reflect,
}

/// Direction channel A is currently moving in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RampDirection {
    Rising,
    Falling,
}

/// Compare values of both channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Duty {
    pub a: u8,
    pub b: u8,
}

impl Duty {
    /// Complementary pair for a channel A value.
    pub const fn from_a(a: u8) -> Self {
        Self { a, b: u8::MAX - a }
    }
}

/// Ramps two complementary PWM channels one step per elapsed period.
pub struct DutyRamp<P: PwmOutput> {
    output: P,
    mode: RampMode,
    direction: RampDirection,
    duty: Duty,
}

impl<P: PwmOutput> DutyRamp<P> {
    /// Creates a ramp at A = 0, B = 255 and writes both channels.
    pub fn new(output: P, mode: RampMode) -> Self {
        Self::starting_at(output, mode, 0)
    }

    /// Creates a ramp with channel A at `a` (B at `255 - a`), rising, and
    /// writes both channels.
    pub fn starting_at(mut output: P, mode: RampMode, a: u8) -> Self {
        let duty = Duty::from_a(a);
        output.set_pwm_duty(PwmChannel::A, duty.a);
        output.set_pwm_duty(PwmChannel::B, duty.b);

        Self {
            output,
            mode,
            direction: RampDirection::Rising,
            duty,
        }
    }

    /// Moves one step and writes the channels that changed.
    pub fn step(&mut self) -> Duty {
        let a = self.duty.a;
        let next = match (self.mode, self.direction) {
            (RampMode::Wrap, _) => a.wrapping_add(1),
            (RampMode::Saturate, _) => a.saturating_add(1),
            (RampMode::Reflect, RampDirection::Rising) if a == u8::MAX => {
                self.direction = RampDirection::Falling;
                a - 1
            }
            (RampMode::Reflect, RampDirection::Rising) => a + 1,
            (RampMode::Reflect, RampDirection::Falling) if a == 0 => {
                self.direction = RampDirection::Rising;
                a + 1
            }
            (RampMode::Reflect, RampDirection::Falling) => a - 1,
        };

        let duty = Duty::from_a(next);
        if duty != self.duty {
            self.output.set_pwm_duty(PwmChannel::A, duty.a);
            self.output.set_pwm_duty(PwmChannel::B, duty.b);
            self.duty = duty;

            #[cfg(feature = "defmt")]
            defmt::trace!("ramp: a={} b={}", duty.a, duty.b);
        }

        self.duty
    }

    /// Current compare values.
    pub fn duty(&self) -> Duty {
        self.duty
    }

    /// Configured end-of-range behavior.
    pub fn mode(&self) -> RampMode {
        self.mode
    }

    /// Direction channel A moves in on the next step.
    pub fn direction(&self) -> RampDirection {
        self.direction
    }

    /// Returns the PWM output.
    pub fn output(&self) -> &P {
        &self.output
    }

    /// Consumes the ramp, returning the PWM output.
    pub fn into_output(self) -> P {
        self.output
    }
}

impl<P: PwmOutput> Actuator for DutyRamp<P> {
    fn on_period(&mut self) {
        self.step();
    }
}
