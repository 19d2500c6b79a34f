//! Simulated peripherals for host runs.
//!
//! [`LoopbackCodec`] wires the transmit output straight back into the
//! receive input through a short delay line, so the whole modem stack
//! can run end to end without hardware. [`SimBoard`] provides the
//! remaining collaborator traits with inspectable state.

use crate::board::{CodecTransport, DigitalInput, InterruptMask, StatusIndicator, TickSource};
use crate::indicator::StatusColor;
use crate::ring::RingBuffer;

/// Codec whose output loops back to its input.
///
/// `frame_tick()` models one 48 kHz frame interval: it arms both the
/// transmit-ready and receive-ready flags, each consumed by the next
/// transport service call.
pub struct LoopbackCodec {
    link: RingBuffer<i16, 64>,
    tx_ready: bool,
    rx_ready: bool,
}

impl LoopbackCodec {
    pub fn new() -> Self {
        Self {
            link: RingBuffer::new(0, 0),
            tx_ready: false,
            rx_ready: false,
        }
    }

    /// Advance one frame interval.
    pub fn frame_tick(&mut self) {
        self.tx_ready = true;
        // Receive side has data only once something was written
        self.rx_ready = !self.link.is_empty();
    }
}

impl Default for LoopbackCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl CodecTransport for LoopbackCodec {
    fn is_transmit_ready(&mut self) -> bool {
        let ready = self.tx_ready;
        self.tx_ready = false;
        ready
    }

    fn is_receive_ready(&mut self) -> bool {
        let ready = self.rx_ready;
        self.rx_ready = false;
        ready
    }

    fn write_stereo(&mut self, left: i16, _right: i16) {
        // Loopback wire drops frames only if the link overflows, which
        // a correctly paced test never does
        let _ = self.link.push(left);
    }

    fn read_stereo(&mut self) -> (i16, i16) {
        let sample = self.link.pop().unwrap_or(0);
        (sample, sample)
    }
}

/// Inspectable board: all collaborator traits backed by plain fields.
#[derive(Debug, Default)]
pub struct SimBoard {
    /// Level fed to `read_button`.
    pub button: bool,
    /// Set to make the next `tick_elapsed` fire.
    pub tick_flag: bool,
    /// Last color shown.
    pub color: StatusColor,
    /// Last activity level driven.
    pub activity: bool,
    /// Current mask nesting depth.
    pub mask_depth: u32,
    /// Highest mask depth ever observed.
    pub max_mask_depth: u32,
}

impl SimBoard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DigitalInput for SimBoard {
    fn read_button(&mut self) -> bool {
        self.button
    }
}

impl StatusIndicator for SimBoard {
    fn set_color(&mut self, color: StatusColor) {
        self.color = color;
    }

    fn set_activity(&mut self, on: bool) {
        self.activity = on;
    }
}

impl TickSource for SimBoard {
    fn tick_elapsed(&mut self) -> bool {
        let elapsed = self.tick_flag;
        self.tick_flag = false;
        elapsed
    }
}

impl InterruptMask for SimBoard {
    fn mask_interrupts(&mut self) {
        self.mask_depth += 1;
        self.max_mask_depth = self.max_mask_depth.max(self.mask_depth);
    }

    fn unmask_interrupts(&mut self) {
        self.mask_depth = self.mask_depth.saturating_sub(1);
    }
}
