//! Sine wave on OC0A (PD6): one table sample per 62.5 kHz fast PWM period,
//! about 244 Hz after an RC low-pass filter.

#![no_std]
#![no_main]
#![feature(abi_avr_interrupt)]

use core::cell::RefCell;
use critical_section::Mutex;
use panic_halt as _;
use tick_sequencer::{PwmChannel, SINE_TABLE, WavePlayer};
use uno_demos::{Tc0Pwm, enable_pwm_pins};

static DAC: Mutex<RefCell<Option<(WavePlayer<'static>, Tc0Pwm)>>> =
    Mutex::new(RefCell::new(None));

#[avr_device::interrupt(atmega328p)]
fn TIMER0_COMPA() {
    critical_section::with(|cs| {
        if let Some((player, pwm)) = DAC.borrow_ref_mut(cs).as_mut() {
            player.on_carrier_tick(pwm, PwmChannel::A);
        }
    });
}

#[avr_device::entry]
fn main() -> ! {
    let dp = avr_device::atmega328p::Peripherals::take().unwrap();

    enable_pwm_pins(&dp.PORTD);
    let mut pwm = Tc0Pwm::new(dp.TC0);
    pwm.enable_carrier_interrupt();

    critical_section::with(|cs| {
        DAC.borrow(cs)
            .replace(Some((WavePlayer::new(&SINE_TABLE), pwm)));
    });

    // enable interrupts globally
    unsafe { avr_device::interrupt::enable() };

    loop {
        avr_device::asm::sleep();
    }
}
