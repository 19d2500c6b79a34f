//! DDS tone generator.
//!
//! 16-bit phase accumulator mapped through the sine LUT. The accumulator
//! wraps modulo 2^16 and represents phase in [0, 2π); the top 8 bits
//! index the 256-entry table.
//!
//! frequency = phase_increment * sample_rate / 2^16

use super::lut::SINE_LUT;

/// Phase-accumulator oscillator producing one Q15 sample per call.
///
/// No floating point, no error path: wrapping arithmetic only.
#[derive(Clone, Copy, Debug, Default)]
pub struct ToneGenerator {
    phase: u16,
    phase_inc: u16,
}

impl ToneGenerator {
    /// Create a generator at phase 0 with zero increment (DC output).
    pub const fn new() -> Self {
        Self {
            phase: 0,
            phase_inc: 0,
        }
    }

    /// Set the absolute phase, encoded as [0, 2π) over the u16 range.
    #[inline]
    pub fn set_phase(&mut self, phase: u16) {
        self.phase = phase;
    }

    /// Set the per-sample phase increment (selects the frequency).
    #[inline]
    pub fn set_phase_increment(&mut self, inc: u16) {
        self.phase_inc = inc;
    }

    /// Current phase increment.
    #[inline]
    pub fn phase_increment(&self) -> u16 {
        self.phase_inc
    }

    /// Advance the accumulator and return the next amplitude sample.
    #[inline]
    pub fn next_sample(&mut self) -> i16 {
        self.phase = self.phase.wrapping_add(self.phase_inc);
        SINE_LUT[(self.phase >> 8) as usize]
    }
}
