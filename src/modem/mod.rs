//! FSK modem: bit-exact modulation and demodulation state machines.
//!
//! Transmit path: message queue → UART frame encoder → tone selection →
//! DDS. Receive path: delay-line autocorrelator → IIR low-pass →
//! threshold decision → mid-bit sampler → UART frame decoder.
//!
//! All stages advance one sample (or one bit) per call and never block.

pub mod demod;
pub mod framing;
pub mod modulator;

pub use demod::FskDemodulator;
pub use framing::{BitSampler, UartDecoder, UartEncoder};
pub use modulator::FskModulator;
