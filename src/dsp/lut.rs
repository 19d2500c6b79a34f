//! Sine wave lookup table for tone generation.
//!
//! 256-entry table covering one full cycle, indexed by the top 8 bits
//! of the DDS phase accumulator. Values are Q15 for direct use as
//! codec samples.

/// Number of entries in the sine LUT.
pub const LUT_SIZE: usize = 256;

/// Pre-computed sine wave lookup table.
///
/// 256 samples covering 0 to 2π.
/// Amplitude: full Q15 range (-32767 to +32767).
/// Index 0 = 0°, 64 = 90°, 128 = 180°, 192 = 270°.
pub static SINE_LUT: [i16; LUT_SIZE] = {
    let mut table = [0i16; LUT_SIZE];
    let mut i = 0;
    while i < LUT_SIZE {
        let angle = (i as f64) * core::f64::consts::PI * 2.0 / (LUT_SIZE as f64);
        let sin_val = const_sin(angle);
        table[i] = (sin_val * 32767.0) as i16;
        i += 1;
    }
    table
};

/// Const-compatible sine approximation using a Taylor series.
///
/// The argument is folded into [-π/2, π/2] via quadrant symmetry
/// before the series, keeping the truncation error below 1 LSB of
/// the Q15 table everywhere.
const fn const_sin(x: f64) -> f64 {
    // Normalize to [-π, π]
    let mut x = x;
    while x > core::f64::consts::PI {
        x -= 2.0 * core::f64::consts::PI;
    }
    while x < -core::f64::consts::PI {
        x += 2.0 * core::f64::consts::PI;
    }

    // Fold into [-π/2, π/2]: sin(π − x) == sin(x)
    if x > core::f64::consts::FRAC_PI_2 {
        x = core::f64::consts::PI - x;
    } else if x < -core::f64::consts::FRAC_PI_2 {
        x = -core::f64::consts::PI - x;
    }

    // sin(x) = x - x³/3! + x⁵/5! - x⁷/7! + x⁹/9!
    let x2 = x * x;
    let x3 = x2 * x;
    let x5 = x3 * x2;
    let x7 = x5 * x2;
    let x9 = x7 * x2;

    x - x3 / 6.0 + x5 / 120.0 - x7 / 5040.0 + x9 / 362880.0
}
