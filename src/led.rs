//! Tri-state LED sequencer.
//!
//! Six LEDs share three I/O lines (charlieplexing): each LED sits between two
//! lines, and lighting one means driving those two lines to opposite levels
//! while releasing the third to high impedance. [`LedSequencer`] steps
//! through seven states, and each transition touches only the lines that
//! change, as listed by [`LedState::updates`].

use crate::runner::Actuator;

/// One of the three shared LED lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Line {
    A,
    B,
    C,
}

impl Line {
    /// All lines in index order.
    pub const ALL: [Line; 3] = [Line::A, Line::B, Line::C];

    /// Position of this line in a [`Lines`] snapshot.
    pub const fn index(self) -> usize {
        match self {
            Line::A => 0,
            Line::B => 1,
            Line::C => 2,
        }
    }
}

/// Whether a line is driven or released.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Driven to its latched level.
    Output,
    /// Released (input, high impedance).
    HighZ,
}

/// Logic level of a line's output latch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    Low,
    High,
}

/// Direction and latched level of one line.
///
/// The level is kept while the line is released: on AVR parts the output
/// latch of an input pin selects its pull-up, so it is part of the physical
/// pin state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LineState {
    pub direction: Direction,
    pub level: Level,
}

impl LineState {
    /// A released line with its latch low.
    pub const RELEASED: Self = Self::new(Direction::HighZ, Level::Low);

    pub const fn new(direction: Direction, level: Level) -> Self {
        Self { direction, level }
    }

    /// A line driven to `level`.
    pub const fn driven(level: Level) -> Self {
        Self::new(Direction::Output, level)
    }

    /// Returns the driven level, or `None` while released.
    pub fn output(&self) -> Option<Level> {
        match self.direction {
            Direction::Output => Some(self.level),
            Direction::HighZ => None,
        }
    }
}

/// Snapshot of all three lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Lines([LineState; 3]);

impl Lines {
    pub const fn new(a: LineState, b: LineState, c: LineState) -> Self {
        Self([a, b, c])
    }

    /// Returns the state of `line`.
    pub fn get(&self, line: Line) -> LineState {
        self.0[line.index()]
    }

    fn get_mut(&mut self, line: Line) -> &mut LineState {
        &mut self.0[line.index()]
    }

    /// Applies a single partial update.
    pub fn apply(&mut self, update: LineUpdate) {
        match update {
            LineUpdate::Release(line) => self.get_mut(line).direction = Direction::HighZ,
            LineUpdate::Drive(line) => self.get_mut(line).direction = Direction::Output,
            LineUpdate::Set(line, level) => self.get_mut(line).level = level,
        }
    }

    /// Lines whose state differs between `self` and `other`.
    pub fn changed(&self, other: &Lines) -> impl Iterator<Item = Line> + '_ {
        let other = *other;
        Line::ALL
            .into_iter()
            .filter(move |line| self.get(*line) != other.get(*line))
    }
}

/// One register write: a direction bit or a level bit of one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineUpdate {
    /// Clear the direction bit (high impedance).
    Release(Line),
    /// Set the direction bit (output).
    Drive(Line),
    /// Write the output latch.
    Set(Line, Level),
}

const S0_UPDATES: &[LineUpdate] = &[
    LineUpdate::Release(Line::A),
    LineUpdate::Drive(Line::B),
    LineUpdate::Set(Line::B, Level::Low),
    LineUpdate::Set(Line::C, Level::High),
];
const S1_UPDATES: &[LineUpdate] = &[
    LineUpdate::Set(Line::B, Level::High),
    LineUpdate::Set(Line::C, Level::Low),
];
const S2_UPDATES: &[LineUpdate] = &[
    LineUpdate::Release(Line::C),
    LineUpdate::Drive(Line::A),
    LineUpdate::Set(Line::A, Level::Low),
    LineUpdate::Set(Line::B, Level::High),
];
const S3_UPDATES: &[LineUpdate] = &[
    LineUpdate::Set(Line::A, Level::High),
    LineUpdate::Set(Line::B, Level::Low),
];
const S4_UPDATES: &[LineUpdate] = &[
    LineUpdate::Release(Line::B),
    LineUpdate::Drive(Line::C),
    LineUpdate::Set(Line::A, Level::Low),
    LineUpdate::Set(Line::C, Level::High),
];
const S5_UPDATES: &[LineUpdate] = &[
    LineUpdate::Set(Line::C, Level::Low),
    LineUpdate::Set(Line::A, Level::High),
];
const S6_UPDATES: &[LineUpdate] = &[LineUpdate::Set(Line::A, Level::Low)];

const Z: LineState = LineState::RELEASED;
const LO: LineState = LineState::driven(Level::Low);
const HI: LineState = LineState::driven(Level::High);

const TARGETS: [Lines; 7] = [
    Lines::new(Z, LO, HI),
    Lines::new(Z, HI, LO),
    Lines::new(LO, HI, Z),
    Lines::new(HI, LO, Z),
    Lines::new(LO, Z, HI),
    Lines::new(HI, Z, LO),
    // C keeps the direction and level written in S5.
    Lines::new(LO, Z, LO),
];

/// State of the LED sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LedState {
    S0,
    S1,
    S2,
    S3,
    S4,
    S5,
    S6,
}

impl LedState {
    /// Number of states in one cycle.
    pub const COUNT: usize = 7;

    /// All states in sequence order.
    pub const ALL: [LedState; Self::COUNT] = [
        LedState::S0,
        LedState::S1,
        LedState::S2,
        LedState::S3,
        LedState::S4,
        LedState::S5,
        LedState::S6,
    ];

    /// The following state, wrapping from `S6` to `S0`.
    pub const fn next(self) -> Self {
        match self {
            LedState::S0 => LedState::S1,
            LedState::S1 => LedState::S2,
            LedState::S2 => LedState::S3,
            LedState::S3 => LedState::S4,
            LedState::S4 => LedState::S5,
            LedState::S5 => LedState::S6,
            LedState::S6 => LedState::S0,
        }
    }

    /// Position in the cycle, 0 through 6.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// State at cycle position `index`, if in range.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Register writes performed when entering this state, in order.
    pub const fn updates(self) -> &'static [LineUpdate] {
        match self {
            LedState::S0 => S0_UPDATES,
            LedState::S1 => S1_UPDATES,
            LedState::S2 => S2_UPDATES,
            LedState::S3 => S3_UPDATES,
            LedState::S4 => S4_UPDATES,
            LedState::S5 => S5_UPDATES,
            LedState::S6 => S6_UPDATES,
        }
    }

    /// Full line configuration present while in this state.
    pub const fn target(self) -> Lines {
        TARGETS[self.index()]
    }
}

/// Trait for abstracting the three LED lines.
///
/// Implement this for your GPIO port. Writes cannot fail; handle any
/// hardware errors internally.
pub trait LineBank {
    /// Drives or releases `line`.
    fn set_pin_direction(&mut self, line: Line, direction: Direction);

    /// Writes the output latch of `line`.
    fn set_pin_level(&mut self, line: Line, level: Level);
}

/// Steps three charlieplexed lines through the seven-state LED sequence.
///
/// Keeps a shadow copy of everything it wrote. The shadow is only reported,
/// never used to decide what to write: each transition writes exactly the
/// updates of the state it enters.
pub struct LedSequencer<B: LineBank> {
    bank: B,
    state: LedState,
    lines: Lines,
}

impl<B: LineBank> LedSequencer<B> {
    /// Creates a sequencer in `S0`, writing every line of the `S0`
    /// configuration.
    pub fn new(mut bank: B) -> Self {
        let lines = LedState::S0.target();
        for line in Line::ALL {
            let wanted = lines.get(line);
            bank.set_pin_level(line, wanted.level);
            bank.set_pin_direction(line, wanted.direction);
        }

        Self {
            bank,
            state: LedState::S0,
            lines,
        }
    }

    /// Moves to the next state and applies its partial updates.
    pub fn advance(&mut self) -> LedState {
        self.state = self.state.next();

        for &update in self.state.updates() {
            match update {
                LineUpdate::Release(line) => self.bank.set_pin_direction(line, Direction::HighZ),
                LineUpdate::Drive(line) => self.bank.set_pin_direction(line, Direction::Output),
                LineUpdate::Set(line, level) => self.bank.set_pin_level(line, level),
            }
            self.lines.apply(update);
        }

        #[cfg(feature = "defmt")]
        defmt::trace!("led: entered {}", self.state);

        self.state
    }

    /// Returns the current state.
    pub fn state(&self) -> LedState {
        self.state
    }

    /// Returns the line configuration last written.
    pub fn lines(&self) -> Lines {
        self.lines
    }

    /// Returns the underlying line bank.
    pub fn bank(&self) -> &B {
        &self.bank
    }

    /// Consumes the sequencer, returning the line bank.
    pub fn into_bank(self) -> B {
        self.bank
    }
}

impl<B: LineBank> Actuator for LedSequencer<B> {
    fn on_period(&mut self) {
        self.advance();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NullBank;

    impl LineBank for NullBank {
        fn set_pin_direction(&mut self, _line: Line, _direction: Direction) {}
        fn set_pin_level(&mut self, _line: Line, _level: Level) {}
    }

    #[test]
    fn next_wraps_after_last_state() {
        assert_eq!(LedState::S6.next(), LedState::S0);
        for (index, state) in LedState::ALL.iter().enumerate() {
            assert_eq!(state.index(), index);
            assert_eq!(LedState::from_index(index), Some(*state));
        }
        assert_eq!(LedState::from_index(7), None);
    }

    #[test]
    fn updates_reproduce_each_target_from_the_previous_one() {
        for state in LedState::ALL {
            let previous = LedState::ALL[(state.index() + LedState::COUNT - 1) % LedState::COUNT];
            let mut lines = previous.target();
            for &update in state.updates() {
                lines.apply(update);
            }
            assert_eq!(lines, state.target(), "entering {:?}", state);
        }
    }

    #[test]
    fn every_state_lights_at_most_one_led() {
        for state in LedState::ALL {
            let target = state.target();
            let driven: heapless::Vec<Level, 3> =
                Line::ALL.iter().filter_map(|line| target.get(*line).output()).collect();
            let high = driven.iter().filter(|level| **level == Level::High).count();
            assert!(high <= 1, "{:?} drives {} lines high", state, high);
        }
    }

    #[test]
    fn shadow_follows_the_table() {
        let mut sequencer = LedSequencer::new(NullBank);
        assert_eq!(sequencer.lines(), LedState::S0.target());
        for _ in 0..(LedState::COUNT * 2) {
            let state = sequencer.advance();
            assert_eq!(sequencer.lines(), state.target());
        }
    }
}
