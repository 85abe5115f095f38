//! Arduino Uno (ATmega328P) implementations of the tick-sequencer hardware traits.

#![no_std]

use avr_device::atmega328p::{PORTD, TC0, TC2};
use tick_sequencer::{
    Direction, Level, Line, LineBank, PeriodicTimer, Prescaler, PwmChannel, PwmOutput,
    TimerConfig,
};

/// LED lines A, B, C on PD2, PD3, PD4.
pub struct PortDLines {
    port: PORTD,
}

impl PortDLines {
    /// Takes PORTD, with all three lines driven low.
    pub fn new(port: PORTD) -> Self {
        port.portd.modify(|r, w| unsafe { w.bits(r.bits() & !LINE_MASK) });
        port.ddrd.modify(|r, w| unsafe { w.bits(r.bits() | LINE_MASK) });
        Self { port }
    }
}

const LINE_MASK: u8 = (1 << 2) | (1 << 3) | (1 << 4);

fn line_bit(line: Line) -> u8 {
    match line {
        Line::A => 1 << 2,
        Line::B => 1 << 3,
        Line::C => 1 << 4,
    }
}

impl LineBank for PortDLines {
    fn set_pin_direction(&mut self, line: Line, direction: Direction) {
        let bit = line_bit(line);
        self.port.ddrd.modify(|r, w| match direction {
            Direction::Output => unsafe { w.bits(r.bits() | bit) },
            Direction::HighZ => unsafe { w.bits(r.bits() & !bit) },
        });
    }

    fn set_pin_level(&mut self, line: Line, level: Level) {
        let bit = line_bit(line);
        self.port.portd.modify(|r, w| match level {
            Level::High => unsafe { w.bits(r.bits() | bit) },
            Level::Low => unsafe { w.bits(r.bits() & !bit) },
        });
    }
}

/// Timer/Counter 2 as the periodic tick source (TIMER2_COMPA).
pub struct Tc2Tick {
    timer: TC2,
}

impl Tc2Tick {
    pub fn new(timer: TC2) -> Self {
        Self { timer }
    }
}

impl PeriodicTimer for Tc2Tick {
    fn configure_periodic_interrupt(&mut self, config: &TimerConfig) {
        let tc2 = &self.timer;
        tc2.tccr2a.write(|w| w.wgm2().ctc());
        tc2.ocr2a.write(|w| w.bits(config.compare()));
        tc2.tccr2b.write(|w| match config.prescaler() {
            Prescaler::Div1 => w.cs2().direct(),
            Prescaler::Div8 => w.cs2().prescale_8(),
            Prescaler::Div64 => w.cs2().prescale_64(),
            Prescaler::Div256 => w.cs2().prescale_256(),
            Prescaler::Div1024 => w.cs2().prescale_1024(),
        });
        tc2.timsk2.write(|w| w.ocie2a().set_bit());
    }
}

/// Timer/Counter 0 in fast PWM mode, unprescaled, driving OC0A (PD6) and
/// OC0B (PD5).
pub struct Tc0Pwm {
    timer: TC0,
}

impl Tc0Pwm {
    /// Configures fast PWM with both outputs non-inverted. PD5 and PD6 must
    /// already be outputs.
    pub fn new(timer: TC0) -> Self {
        timer.tccr0a.write(|w| {
            w.wgm0()
                .pwm_fast()
                .com0a()
                .match_clear()
                .com0b()
                .match_clear()
        });
        timer.tccr0b.write(|w| w.cs0().direct());
        Self { timer }
    }

    /// Enables the compare-match A interrupt, raised once per carrier period.
    pub fn enable_carrier_interrupt(&mut self) {
        self.timer.timsk0.write(|w| w.ocie0a().set_bit());
    }
}

impl PwmOutput for Tc0Pwm {
    fn set_pwm_duty(&mut self, channel: PwmChannel, value: u8) {
        match channel {
            PwmChannel::A => self.timer.ocr0a.write(|w| w.bits(value)),
            PwmChannel::B => self.timer.ocr0b.write(|w| w.bits(value)),
        }
    }
}

/// Makes PD5 and PD6 outputs, driven low, for the TC0 compare outputs.
pub fn enable_pwm_pins(port: &PORTD) {
    const PWM_MASK: u8 = (1 << 5) | (1 << 6);
    port.portd.modify(|r, w| unsafe { w.bits(r.bits() & !PWM_MASK) });
    port.ddrd.modify(|r, w| unsafe { w.bits(r.bits() | PWM_MASK) });
}
