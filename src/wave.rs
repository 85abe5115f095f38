//! Waveform table playback.
//!
//! At every PWM carrier period the next sample of a fixed 256-entry table is
//! written to the duty comparator. The output waveform repeats at
//! `carrier / 256` Hz (about 244 Hz at a 62.5 kHz carrier). Driven straight
//! from the carrier interrupt, without the slow tick.

use crate::pwm::{PwmChannel, PwmOutput};

/// Samples in one waveform cycle.
pub const TABLE_LEN: usize = 256;

/// One full sine cycle, 8-bit unsigned, centred on 128.
pub static SINE_TABLE: [u8; TABLE_LEN] = [
    128, 131, 134, 137, 140, 143, 146, 149, 152, 156, 159, 162, 165, 168, 171, 174,
    176, 179, 182, 185, 188, 191, 193, 196, 199, 201, 204, 206, 209, 211, 213, 216,
    218, 220, 222, 224, 226, 228, 230, 232, 234, 236, 237, 239, 240, 242, 243, 245,
    246, 247, 248, 249, 250, 251, 252, 252, 253, 254, 254, 255, 255, 255, 255, 255,
    255, 255, 255, 255, 255, 255, 254, 254, 253, 252, 252, 251, 250, 249, 248, 247,
    246, 245, 243, 242, 240, 239, 237, 236, 234, 232, 230, 228, 226, 224, 222, 220,
    218, 216, 213, 211, 209, 206, 204, 201, 199, 196, 193, 191, 188, 185, 182, 179,
    176, 174, 171, 168, 165, 162, 159, 156, 152, 149, 146, 143, 140, 137, 134, 131,
    127, 124, 121, 118, 115, 112, 109, 106, 103, 99, 96, 93, 90, 87, 84, 81,
    79, 76, 73, 70, 67, 64, 62, 59, 56, 54, 51, 49, 46, 44, 42, 39,
    37, 35, 33, 31, 29, 27, 25, 23, 21, 19, 18, 16, 15, 13, 12, 10,
    9, 8, 7, 6, 5, 4, 3, 3, 2, 1, 1, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 1, 1, 2, 3, 3, 4, 5, 6, 7, 8,
    9, 10, 12, 13, 15, 16, 18, 19, 21, 23, 25, 27, 29, 31, 33, 35,
    37, 39, 42, 44, 46, 49, 51, 54, 56, 59, 62, 64, 67, 70, 73, 76,
    79, 81, 84, 87, 90, 93, 96, 99, 103, 106, 109, 112, 115, 118, 121, 124,
];

/// Frequency of the played waveform in millihertz, or `None` for an empty
/// table.
pub const fn output_frequency_millihz(carrier_hz: u32, table_len: usize) -> Option<u64> {
    (carrier_hz as u64 * 1000).checked_div(table_len as u64)
}

/// Plays a 256-entry table one sample per carrier tick.
///
/// The index is a `u8`, so it wraps modulo the table length by itself.
/// Meant to be owned by the carrier interrupt handler.
#[derive(Debug, Clone)]
pub struct WavePlayer<'t> {
    table: &'t [u8; TABLE_LEN],
    index: u8,
}

impl<'t> WavePlayer<'t> {
    /// Creates a player positioned at the first sample.
    pub const fn new(table: &'t [u8; TABLE_LEN]) -> Self {
        Self { table, index: 0 }
    }

    /// Returns the sample at the current index and advances.
    pub fn next_sample(&mut self) -> u8 {
        let sample = self.table[self.index as usize];
        self.index = self.index.wrapping_add(1);
        sample
    }

    /// Writes the next sample to `channel` and returns it.
    pub fn on_carrier_tick<P: PwmOutput>(&mut self, output: &mut P, channel: PwmChannel) -> u8 {
        let sample = self.next_sample();
        output.set_pwm_duty(channel, sample);
        sample
    }

    /// Index of the sample played next.
    pub fn index(&self) -> u8 {
        self.index
    }

    /// Rewinds to the first sample.
    pub fn reset(&mut self) {
        self.index = 0;
    }

    /// The table being played.
    pub fn table(&self) -> &'t [u8; TABLE_LEN] {
        self.table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sine_table_is_centred_on_128() {
        assert_eq!(SINE_TABLE[0], 128);
        assert_eq!(SINE_TABLE[64], 255);
        assert_eq!(SINE_TABLE[128], 127);
        assert_eq!(SINE_TABLE[192], 0);

        let sum: u32 = SINE_TABLE.iter().map(|&v| v as u32).sum();
        assert_eq!(sum, 127 * 256 + 128);
    }

    #[test]
    fn second_half_mirrors_first_half() {
        for i in 0..TABLE_LEN / 2 {
            assert_eq!(SINE_TABLE[i] as u16 + SINE_TABLE[i + 128] as u16, 255, "index {}", i);
        }
    }

    #[test]
    fn quarter_wave_symmetry() {
        for k in 1..64 {
            assert_eq!(SINE_TABLE[64 - k], SINE_TABLE[64 + k]);
        }
    }

    #[test]
    fn reference_output_frequency() {
        assert_eq!(output_frequency_millihz(62_500, TABLE_LEN), Some(244_140));
    }

    #[test]
    fn output_frequency_of_empty_table_is_none() {
        assert_eq!(output_frequency_millihz(62_500, 0), None);
    }

    #[test]
    fn output_frequency_does_not_truncate() {
        assert_eq!(output_frequency_millihz(u32::MAX, 1), Some(u32::MAX as u64 * 1000));
    }

    #[test]
    fn reset_rewinds() {
        let mut player = WavePlayer::new(&SINE_TABLE);
        player.next_sample();
        player.next_sample();
        assert_eq!(player.index(), 2);
        player.reset();
        assert_eq!(player.next_sample(), 128);
    }
}
