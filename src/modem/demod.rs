//! FSK demodulator: delay-line autocorrelator + IIR + threshold.
//!
//! The delay line is 22 samples deep. Multiplying the newest sample by
//! the oldest computes the autocorrelation at that lag; with the lag
//! matched to one period of a tone between mark and space, the product's
//! DC component lands on opposite signs for the two tones. The elliptic
//! low-pass strips the double-frequency ripple and a fixed threshold
//! recovers the bit.
//!
//! The threshold is empirically fixed, not adaptive. Misclassified
//! samples are not errors: the framing layer resynchronizes.

use crate::config::{AUTOCORR_LAG, DECISION_THRESHOLD};
use crate::dsp::BiquadDf2t;

/// Converts a Q15 sample stream into a bit stream, one bit per sample.
pub struct FskDemodulator {
    delay: [i16; AUTOCORR_LAG],
    pos: usize,
    filter: BiquadDf2t,
}

impl FskDemodulator {
    /// Create a demodulator with a zeroed delay line and cleared filter.
    pub const fn new() -> Self {
        Self {
            delay: [0; AUTOCORR_LAG],
            pos: 0,
            filter: BiquadDf2t::new(),
        }
    }

    /// Consume one received sample, produce one demodulated bit.
    ///
    /// Mark (1200 Hz) correlates negatively at the 22-sample lag and
    /// decodes as 1; space (2200 Hz) correlates positively and decodes
    /// as 0.
    #[inline]
    pub fn process(&mut self, sample: i16) -> u8 {
        let oldest = self.delay[self.pos];
        self.delay[self.pos] = sample;
        self.pos = (self.pos + 1) % AUTOCORR_LAG;

        // Q15 × Q15 product scaled back to Q15.
        let product = ((sample as i32 * oldest as i32) >> 15) as i16;
        let filtered = self.filter.process(product);

        u8::from(filtered < DECISION_THRESHOLD)
    }

    /// Clear the delay line and filter state.
    pub fn reset(&mut self) {
        self.delay = [0; AUTOCORR_LAG];
        self.pos = 0;
        self.filter.reset();
    }
}

impl Default for FskDemodulator {
    fn default() -> Self {
        Self::new()
    }
}
