//! FSK modulator: UART frame encoder driving a DDS tone pair.
//!
//! Bell-202-style tone plan: mark 1200 Hz, space 2200 Hz, 1200 baud.
//! Each bit holds its tone for [`SAMPLES_PER_BIT`] samples; the DDS
//! phase is continuous across tone switches, so the output has no
//! phase discontinuities.

use crate::config::{MARK_PHASE_INC, SAMPLES_PER_BIT, SPACE_PHASE_INC};
use crate::dsp::ToneGenerator;
use crate::error::BufferError;
use crate::modem::framing::UartEncoder;

/// Produces one Q15 transmit sample per call.
///
/// With nothing queued it transmits a continuous mark carrier,
/// which is the UART idle line.
pub struct FskModulator {
    dds: ToneGenerator,
    encoder: UartEncoder,
    samples_left: u16,
}

impl FskModulator {
    /// Create a modulator idling at mark.
    pub fn new() -> Self {
        let mut dds = ToneGenerator::new();
        dds.set_phase_increment(MARK_PHASE_INC);
        Self {
            dds,
            encoder: UartEncoder::new(),
            samples_left: 0,
        }
    }

    /// Queue one byte for transmission.
    #[inline]
    pub fn queue_byte(&mut self, byte: u8) -> Result<(), BufferError> {
        self.encoder.queue_byte(byte)
    }

    /// Queue a message; returns how many bytes fit in the queue.
    pub fn queue_message(&mut self, bytes: &[u8]) -> usize {
        self.encoder.queue_message(bytes)
    }

    /// True when the line is idle (no byte pending or in flight).
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.encoder.is_idle() && self.samples_left == 0
    }

    /// Generate the next transmit sample.
    #[inline]
    pub fn next_sample(&mut self) -> i16 {
        if self.samples_left == 0 {
            let bit = self.encoder.next_bit();
            self.dds.set_phase_increment(if bit == 1 {
                MARK_PHASE_INC
            } else {
                SPACE_PHASE_INC
            });
            self.samples_left = SAMPLES_PER_BIT;
        }
        self.samples_left -= 1;
        self.dds.next_sample()
    }
}

impl Default for FskModulator {
    fn default() -> Self {
        Self::new()
    }
}
