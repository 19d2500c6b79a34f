//! Second-order IIR stage, Direct Form II Transpose, fixed point.
//!
//! Q15 input and output, Q14 coefficients, 32-bit internal state.
//! Used twice in the stack: as the modem output shaper and as the
//! demodulator's post-correlation low-pass.
//!
//! Reference design (Matlab):
//!
//! ```text
//! fs = 48000;
//! [b, a] = ellip(2, 1, 80, 1200/(fs/2));
//! ```
//!
//! Elliptic low-pass, 1 dB passband ripple, 80 dB stopband,
//! cutoff ≈ 1200 Hz at 48 kHz. Coefficients rounded to Q14 so the
//! a1 term (magnitude ≈ 1.82) stays representable in an i16.

/// Q14 numerator coefficients b0, b1, b2.
const B: [i32; 3] = [93, 179, 93];

/// Q14 denominator coefficients a1, a2 (a0 normalized to 1).
const A: [i32; 2] = [-29_769, 13_795];

/// Coefficient fractional bits.
const COEFF_SHIFT: u32 = 14;

/// Saturate a Q(15+14) accumulator back to the Q15 sample range.
#[inline]
fn saturate_q15(acc: i32) -> i16 {
    (acc >> COEFF_SHIFT).clamp(i16::MIN as i32, i16::MAX as i32) as i16
}

/// DF2T biquad with persistent state.
///
/// The two wide delay registers are the filter's memory; `reset`
/// clears them. Deterministic, no failure path.
#[derive(Clone, Copy, Debug, Default)]
pub struct BiquadDf2t {
    s1: i32,
    s2: i32,
}

impl BiquadDf2t {
    /// Create a stage with cleared state.
    pub const fn new() -> Self {
        Self { s1: 0, s2: 0 }
    }

    /// Clear the delay registers.
    #[inline]
    pub fn reset(&mut self) {
        self.s1 = 0;
        self.s2 = 0;
    }

    /// Filter one sample.
    ///
    /// DF2T recurrence:
    ///
    /// ```text
    /// y  = b0·x + s1
    /// s1 = b1·x − a1·y + s2
    /// s2 = b2·x − a2·y
    /// ```
    #[inline]
    pub fn process(&mut self, sample: i16) -> i16 {
        let x = sample as i32;
        let y = saturate_q15(B[0] * x + self.s1);
        let y32 = y as i32;
        self.s1 = B[1] * x - A[0] * y32 + self.s2;
        self.s2 = B[2] * x - A[1] * y32;
        y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dc_gain_near_unity() {
        // Passband ripple is 1 dB, so DC gain sits between 0.89 and 1.0.
        let mut iir = BiquadDf2t::new();
        let mut y = 0i16;
        for _ in 0..2000 {
            y = iir.process(20_000);
        }
        assert!(y > 17_000 && y <= 20_100, "dc response {y}");
    }

    #[test]
    fn test_reset_clears_memory() {
        let mut iir = BiquadDf2t::new();
        for _ in 0..100 {
            iir.process(12_345);
        }
        iir.reset();
        let mut fresh = BiquadDf2t::new();
        for _ in 0..50 {
            assert_eq!(iir.process(777), fresh.process(777));
        }
    }

    #[test]
    fn test_stopband_rejects_high_frequency() {
        // Nyquist-rate alternation (24 kHz) must come out heavily attenuated.
        let mut iir = BiquadDf2t::new();
        let mut peak = 0u16;
        for n in 0..2000 {
            let x = if n % 2 == 0 { 30_000 } else { -30_000 };
            let y = iir.process(x);
            if n > 500 {
                peak = peak.max(y.unsigned_abs());
            }
        }
        assert!(peak < 1_000, "stopband leakage {peak}");
    }
}
