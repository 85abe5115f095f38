//! Single-slot tick notification shared between an interrupt and the main loop.
//!
//! [`TickFlag`] is a level, not a queue. The interrupt side only ever sets it,
//! the main loop only ever clears it. A tick raised while another one is
//! still pending merges into it; the merge is reported and counted so a slow
//! main loop is observable instead of silently losing time.

use core::cell::Cell;
use critical_section::Mutex;

/// Outcome of [`TickFlag::raise`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Raise {
    /// The flag was clear and is now pending.
    Fresh,

    /// A tick was already pending; this one merged into it.
    Coalesced,
}

/// Periodic tick flag.
///
/// Lives in a `static` so both the interrupt handler and the main loop can
/// reach it:
///
/// ```ignore
/// static TICK: TickFlag = TickFlag::new();
///
/// #[interrupt]
/// fn TIMER0_COMPA() {
///     TICK.raise();
/// }
/// ```
pub struct TickFlag {
    pending: Mutex<Cell<bool>>,
    coalesced: Mutex<Cell<u16>>,
}

impl TickFlag {
    /// Creates a clear flag.
    pub const fn new() -> Self {
        Self {
            pending: Mutex::new(Cell::new(false)),
            coalesced: Mutex::new(Cell::new(0)),
        }
    }

    /// Publishes a tick. Interrupt side only.
    ///
    /// Does no work beyond setting the level and, when a tick was already
    /// pending, bumping the coalesce counter (saturating).
    pub fn raise(&self) -> Raise {
        critical_section::with(|cs| {
            let pending = self.pending.borrow(cs);
            if pending.replace(true) {
                let coalesced = self.coalesced.borrow(cs);
                coalesced.set(coalesced.get().saturating_add(1));
                Raise::Coalesced
            } else {
                Raise::Fresh
            }
        })
    }

    /// Reads and clears the flag in one critical section. Main loop only.
    ///
    /// Returns true at most once per pending level, however many raises
    /// were merged into it.
    pub fn take(&self) -> bool {
        critical_section::with(|cs| self.pending.borrow(cs).replace(false))
    }

    /// Returns true if a tick is pending, without consuming it.
    pub fn is_pending(&self) -> bool {
        critical_section::with(|cs| self.pending.borrow(cs).get())
    }

    /// Number of raises that merged into an already pending tick.
    pub fn coalesced(&self) -> u16 {
        critical_section::with(|cs| self.coalesced.borrow(cs).get())
    }

    /// Resets the coalesce counter and returns its previous value.
    pub fn reset_coalesced(&self) -> u16 {
        critical_section::with(|cs| self.coalesced.borrow(cs).replace(0))
    }

    /// Spins until a tick is pending, then consumes it.
    pub fn wait(&self) {
        while !self.take() {
            core::hint::spin_loop();
        }
    }
}

impl Default for TickFlag {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_flag_is_clear() {
        let flag = TickFlag::new();
        assert!(!flag.is_pending());
        assert!(!flag.take());
        assert_eq!(flag.coalesced(), 0);
    }

    #[test]
    fn take_consumes_a_raise_exactly_once() {
        let flag = TickFlag::new();
        assert_eq!(flag.raise(), Raise::Fresh);
        assert!(flag.is_pending());
        assert!(flag.take());
        assert!(!flag.take());
    }

    #[test]
    fn second_raise_before_take_is_coalesced() {
        let flag = TickFlag::new();
        assert_eq!(flag.raise(), Raise::Fresh);
        assert_eq!(flag.raise(), Raise::Coalesced);
        assert_eq!(flag.raise(), Raise::Coalesced);

        assert!(flag.take());
        assert!(!flag.take());
        assert_eq!(flag.coalesced(), 2);

        assert_eq!(flag.reset_coalesced(), 2);
        assert_eq!(flag.coalesced(), 0);
    }

    #[test]
    fn wait_returns_once_tick_is_pending() {
        let flag = TickFlag::new();
        flag.raise();
        flag.wait();
        assert!(!flag.is_pending());
    }

    #[test]
    fn usable_from_static() {
        static FLAG: TickFlag = TickFlag::new();
        FLAG.raise();
        assert!(FLAG.take());
    }
}
