//! Module: config
//!
//! Purpose: Compile-time parameters for the modem stack.
//! Grouped by concern: audio transport, FSK tone plan, UART framing,
//! input classification, watchdog discipline.
//!
//! Safety: Constants only, no state.

/// Codec frame rate in Hz.
pub const SAMPLE_RATE_HZ: u32 = 48_000;

/// UART-over-FSK symbol rate in bits per second.
pub const BAUD_RATE: u32 = 1_200;

/// Audio samples per UART bit period (40 at 48 kHz / 1200 baud).
pub const SAMPLES_PER_BIT: u16 = (SAMPLE_RATE_HZ / BAUD_RATE) as u16;

/// Mark tone (logic 1, UART idle line) in Hz.
pub const MARK_HZ: u32 = 1_200;

/// Space tone (logic 0) in Hz.
pub const SPACE_HZ: u32 = 2_200;

/// Phase increment for a 16-bit DDS accumulator.
///
/// frequency = increment * SAMPLE_RATE_HZ / 2^16
pub const fn phase_increment(freq_hz: u32) -> u16 {
    ((freq_hz as u64 * 65_536) / SAMPLE_RATE_HZ as u64) as u16
}

/// DDS increment for the mark tone.
pub const MARK_PHASE_INC: u16 = phase_increment(MARK_HZ);

/// DDS increment for the space tone.
pub const SPACE_PHASE_INC: u16 = phase_increment(SPACE_HZ);

/// Autocorrelation lag of the demodulator delay line, in samples.
///
/// 22 samples at 48 kHz is one full period of ~2182 Hz, so the
/// lagged product is strongly positive for the space tone and
/// strongly negative for the mark tone.
pub const AUTOCORR_LAG: usize = 22;

/// Demodulator decision threshold on the filtered product (Q15).
///
/// The tone plan puts mark and space correlations on opposite signs,
/// so the decision reduces to a sign test.
pub const DECISION_THRESHOLD: i16 = 0;

/// Capacity of each codec-facing sample ring buffer.
///
/// Usable depth is one less (empty/full disambiguation).
pub const CODEC_QUEUE_LEN: usize = 8;

/// Number of silence slots pre-filled into the TX buffer at start,
/// so the transport has headroom before the first generated sample.
pub const TX_PREFILL: usize = 4;

/// Pending-byte capacity of the transmit message queue.
pub const MESSAGE_QUEUE_LEN: usize = 32;

/// Message queued for transmission on each short press.
pub const STATUS_MESSAGE: &[u8] = b"MODEM OK\r\n";

/// Minimum hold, in 1 ms scheduler ticks, for a release to count
/// as a short press.
pub const SHORT_PRESS_TICKS: u32 = 100;

/// Hold duration, in 1 ms scheduler ticks, at which a still-held
/// input is classified as a long press.
pub const LONG_PRESS_TICKS: u32 = 400;

/// Watchdog countdown period in watchdog-clock ticks (~20 ms at 100 kHz).
pub const WATCHDOG_TIMEOUT_TICKS: u32 = 2_000;

/// Arbitrary feed pattern; the feed sequence requires this byte and
/// its complement so a runaway write cannot feed the watchdog by accident.
pub const FEED_PATTERN: u8 = 0x5A;

/// Complement of [`FEED_PATTERN`].
pub const FEED_COMPLEMENT: u8 = !FEED_PATTERN;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_samples_per_bit() {
        assert_eq!(SAMPLES_PER_BIT, 40);
    }

    #[test]
    fn test_phase_increments() {
        // f = inc * fs / 2^16, verify round trip within 1 Hz
        let mark_back = MARK_PHASE_INC as u64 * SAMPLE_RATE_HZ as u64 / 65_536;
        let space_back = SPACE_PHASE_INC as u64 * SAMPLE_RATE_HZ as u64 / 65_536;
        assert!((mark_back as i64 - MARK_HZ as i64).abs() <= 1);
        assert!((space_back as i64 - SPACE_HZ as i64).abs() <= 1);
    }

    #[test]
    fn test_feed_patterns_are_complementary() {
        assert_eq!(FEED_PATTERN, !FEED_COMPLEMENT);
    }
}
