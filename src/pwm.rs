//! PWM output abstraction.
//!
//! Defines the [`PwmOutput`] trait driven by the duty ramp and the waveform
//! player, and [`HalPwm`], an implementation over `embedded-hal` PWM channels.

use embedded_hal::pwm::SetDutyCycle;

/// One of the two compare outputs of a PWM timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PwmChannel {
    A,
    B,
}

/// Trait for abstracting an 8-bit PWM duty comparator.
///
/// Implement this for your timer's compare registers. A value of 0 is fully
/// off and 255 fully on (non-inverted output). Handle any hardware errors
/// internally - this method cannot fail.
pub trait PwmOutput {
    /// Writes the compare value of `channel`.
    fn set_pwm_duty(&mut self, channel: PwmChannel, value: u8);
}

impl<P: PwmOutput + ?Sized> PwmOutput for &mut P {
    fn set_pwm_duty(&mut self, channel: PwmChannel, value: u8) {
        (**self).set_pwm_duty(channel, value);
    }
}

/// [`PwmOutput`] over two `embedded-hal` PWM channels.
///
/// The 8-bit duty is scaled to each channel's `max_duty_cycle`. Channel
/// errors are dropped, as a failed duty write has no recovery path here.
pub struct HalPwm<A, B> {
    a: A,
    b: B,
}

impl<A: SetDutyCycle, B: SetDutyCycle> HalPwm<A, B> {
    pub fn new(a: A, b: B) -> Self {
        Self { a, b }
    }

    /// Consumes the adapter, returning both channels.
    pub fn release(self) -> (A, B) {
        (self.a, self.b)
    }
}

impl<A: SetDutyCycle, B: SetDutyCycle> PwmOutput for HalPwm<A, B> {
    fn set_pwm_duty(&mut self, channel: PwmChannel, value: u8) {
        let (num, denom) = (value as u16, u8::MAX as u16);
        match channel {
            PwmChannel::A => {
                let _ = self.a.set_duty_cycle_fraction(num, denom);
            }
            PwmChannel::B => {
                let _ = self.b.set_duty_cycle_fraction(num, denom);
            }
        }
    }
}
