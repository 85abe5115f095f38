//! Complementary fast PWM ramp on OC0A/OC0B, one duty step every 50 ms.

#![no_std]
#![no_main]
#![feature(abi_avr_interrupt)]

use panic_halt as _;
use tick_sequencer::timing::TEN_MS;
use tick_sequencer::{
    DelayCounter, DutyRamp, PWM_CHANGE_TICKS, PeriodicTimer, RampMode, TickFlag, TickLoop,
};
use uno_demos::{Tc0Pwm, Tc2Tick, enable_pwm_pins};

static TICK: TickFlag = TickFlag::new();

#[avr_device::interrupt(atmega328p)]
fn TIMER2_COMPA() {
    TICK.raise();
}

#[avr_device::entry]
fn main() -> ! {
    let dp = avr_device::atmega328p::Peripherals::take().unwrap();

    enable_pwm_pins(&dp.PORTD);
    let ramp = DutyRamp::new(Tc0Pwm::new(dp.TC0), RampMode::Wrap);

    let mut timer = Tc2Tick::new(dp.TC2);
    timer.configure_periodic_interrupt(&TEN_MS);

    let counter = DelayCounter::from_ticks(PWM_CHANGE_TICKS).unwrap();

    // enable interrupts globally
    unsafe { avr_device::interrupt::enable() };

    TickLoop::new(&TICK, counter, ramp).run()
}
