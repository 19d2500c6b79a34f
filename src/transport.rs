//! Sample transport service routine.
//!
//! Runs in the codec frame interrupt at 48 kHz. Strict fail-stop: an
//! empty TX ring or a full RX ring means a real-time deadline was
//! already missed, so the routine records the fault and reports it
//! instead of papering over the gap with silence or dropped samples.
//!
//! The routine only ever pops TX and pushes RX; the main loop does the
//! opposite, under its interrupt-mask critical section. The interrupt
//! itself never masks, nothing preempts it.

use crate::board::CodecTransport;
use crate::fault::{FaultCode, FaultState};
use crate::ring::RingBuffer;

/// Service one codec interrupt.
///
/// Checks transmit and receive readiness independently; the same
/// hardware event can signal both. The mono payload rides the left
/// channel and is mirrored onto the right.
///
/// On the first deadline miss the fault is recorded in `fault` and the
/// code is returned; the caller stops servicing and lets the watchdog
/// take it from there.
pub fn service_codec<C, const TN: usize, const RN: usize>(
    codec: &mut C,
    tx: &mut RingBuffer<i16, TN>,
    rx: &mut RingBuffer<i16, RN>,
    fault: &FaultState,
) -> Result<(), FaultCode>
where
    C: CodecTransport,
{
    if codec.is_transmit_ready() {
        match tx.pop() {
            Ok(sample) => codec.write_stereo(sample, sample),
            Err(_) => {
                fault.set(FaultCode::TxUnderrun, tx.len() as u32);
                return Err(FaultCode::TxUnderrun);
            }
        }
    }

    if codec.is_receive_ready() {
        let (left, _right) = codec.read_stereo();
        if rx.push(left).is_err() {
            fault.set(FaultCode::RxOverrun, rx.len() as u32);
            return Err(FaultCode::RxOverrun);
        }
    }

    Ok(())
}
