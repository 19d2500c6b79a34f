//! Fixed-point signal processing primitives.
//!
//! Everything here is sample-at-a-time, deterministic and allocation-free:
//! - Sine lookup table (const-evaluated)
//! - DDS tone generator (16-bit phase accumulator)
//! - Direct-Form-II-Transpose biquad in Q15

pub mod dds;
pub mod iir;
pub mod lut;

pub use dds::ToneGenerator;
pub use iir::BiquadDf2t;
pub use lut::{LUT_SIZE, SINE_LUT};
