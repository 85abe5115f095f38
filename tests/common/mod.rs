//! Shared test infrastructure for tick-sequencer integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use tick_sequencer::{
    Direction, Level, Line, LineBank, LineState, Lines, PeriodicTimer, PwmChannel, PwmOutput,
    TickFlag, TimerConfig,
};

// ============================================================================
// Mock GPIO Port
// ============================================================================

/// One register write seen by the mock port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortWrite {
    Direction(Line, Direction),
    Level(Line, Level),
}

impl PortWrite {
    pub fn line(&self) -> Line {
        match self {
            PortWrite::Direction(line, _) | PortWrite::Level(line, _) => *line,
        }
    }
}

/// Mock AVR port with lines A, B, C on bits 2, 3, 4 (PD2..PD4).
///
/// Starts like the reference firmware after its init code: all three lines
/// driven low.
pub struct MockPort {
    pub ddr: u8,
    pub port: u8,
    writes: heapless::Vec<PortWrite, 256>,
}

impl MockPort {
    pub fn new() -> Self {
        Self {
            ddr: 0b0001_1100,
            port: 0,
            writes: heapless::Vec::new(),
        }
    }

    pub fn bit(line: Line) -> u8 {
        match line {
            Line::A => 1 << 2,
            Line::B => 1 << 3,
            Line::C => 1 << 4,
        }
    }

    /// Physical line configuration decoded from the registers.
    pub fn lines(&self) -> Lines {
        let decode = |line: Line| {
            let direction = if self.ddr & Self::bit(line) != 0 {
                Direction::Output
            } else {
                Direction::HighZ
            };
            let level = if self.port & Self::bit(line) != 0 {
                Level::High
            } else {
                Level::Low
            };
            LineState::new(direction, level)
        };
        Lines::new(decode(Line::A), decode(Line::B), decode(Line::C))
    }

    pub fn writes(&self) -> &[PortWrite] {
        &self.writes
    }

    pub fn clear_writes(&mut self) {
        self.writes.clear();
    }
}

impl LineBank for MockPort {
    fn set_pin_direction(&mut self, line: Line, direction: Direction) {
        match direction {
            Direction::Output => self.ddr |= Self::bit(line),
            Direction::HighZ => self.ddr &= !Self::bit(line),
        }
        let _ = self.writes.push(PortWrite::Direction(line, direction));
    }

    fn set_pin_level(&mut self, line: Line, level: Level) {
        match level {
            Level::High => self.port |= Self::bit(line),
            Level::Low => self.port &= !Self::bit(line),
        }
        let _ = self.writes.push(PortWrite::Level(line, level));
    }
}

// ============================================================================
// Mock PWM
// ============================================================================

/// Mock pair of compare registers that records every write.
pub struct MockPwm {
    pub ocr_a: u8,
    pub ocr_b: u8,
    history: heapless::Vec<(PwmChannel, u8), 1024>,
}

impl MockPwm {
    pub fn new() -> Self {
        Self {
            ocr_a: 0,
            ocr_b: 0,
            history: heapless::Vec::new(),
        }
    }

    pub fn history(&self) -> &[(PwmChannel, u8)] {
        &self.history
    }

    /// Values written to `channel`, in order.
    pub fn writes_to(&self, channel: PwmChannel) -> heapless::Vec<u8, 1024> {
        self.history
            .iter()
            .filter(|(c, _)| *c == channel)
            .map(|(_, value)| *value)
            .collect()
    }
}

impl PwmOutput for MockPwm {
    fn set_pwm_duty(&mut self, channel: PwmChannel, value: u8) {
        match channel {
            PwmChannel::A => self.ocr_a = value,
            PwmChannel::B => self.ocr_b = value,
        }
        let _ = self.history.push((channel, value));
    }
}

// ============================================================================
// Fake Tick Source
// ============================================================================

/// Fake timer: records its configuration and raises the flag on demand, the
/// way the compare-match interrupt would.
pub struct FakeTimer<'f> {
    flag: &'f TickFlag,
    config: Option<TimerConfig>,
}

impl<'f> FakeTimer<'f> {
    pub fn new(flag: &'f TickFlag) -> Self {
        Self { flag, config: None }
    }

    pub fn config(&self) -> Option<TimerConfig> {
        self.config
    }

    /// Simulates one compare-match interrupt.
    pub fn fire(&self) {
        self.flag.raise();
    }
}

impl PeriodicTimer for FakeTimer<'_> {
    fn configure_periodic_interrupt(&mut self, config: &TimerConfig) {
        self.config = Some(*config);
    }
}
