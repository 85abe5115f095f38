//! Six charlieplexed LEDs on PD2..PD4, stepped every 500 ms by a 10 ms
//! Timer 2 tick.

#![no_std]
#![no_main]
#![feature(abi_avr_interrupt)]

use panic_halt as _;
use tick_sequencer::timing::TEN_MS;
use tick_sequencer::{
    DelayCounter, LED_BLINK_TICKS, LedSequencer, PeriodicTimer, TickFlag, TickLoop,
};
use uno_demos::{PortDLines, Tc2Tick};

static TICK: TickFlag = TickFlag::new();

#[avr_device::interrupt(atmega328p)]
fn TIMER2_COMPA() {
    TICK.raise();
}

#[avr_device::entry]
fn main() -> ! {
    let dp = avr_device::atmega328p::Peripherals::take().unwrap();

    let sequencer = LedSequencer::new(PortDLines::new(dp.PORTD));

    let mut timer = Tc2Tick::new(dp.TC2);
    timer.configure_periodic_interrupt(&TEN_MS);

    let counter = DelayCounter::from_ticks(LED_BLINK_TICKS).unwrap();

    // enable interrupts globally
    unsafe { avr_device::interrupt::enable() };

    TickLoop::new(&TICK, counter, sequencer).run()
}
