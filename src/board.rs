//! Collaborator contracts consumed by the core.
//!
//! Each peripheral is an opaque capability behind a narrow trait;
//! register-level programming lives with the implementor, never here.
//! Simulated implementations for host runs live in [`crate::sim`].

use crate::indicator::StatusColor;

/// Synchronous-serial audio codec transport.
///
/// Sample format: 16-bit signed per channel, 48 kHz frame rate.
/// The same hardware event signals "transmit slot free" and "receive
/// slot full" independently; the service routine checks both.
pub trait CodecTransport {
    /// True when the transport can accept one outgoing frame.
    fn is_transmit_ready(&mut self) -> bool;

    /// True when one incoming frame is waiting.
    fn is_receive_ready(&mut self) -> bool;

    /// Write one stereo frame.
    fn write_stereo(&mut self, left: i16, right: i16);

    /// Read one stereo frame.
    fn read_stereo(&mut self) -> (i16, i16);
}

/// Raw digital input level.
pub trait DigitalInput {
    /// Sample the input (true = asserted).
    fn read_button(&mut self) -> bool;
}

/// Status display.
pub trait StatusIndicator {
    /// Show one of the eight status colors.
    fn set_color(&mut self, color: StatusColor);

    /// Drive the separate activity indicator (breathing channel).
    fn set_activity(&mut self, on: bool);
}

/// Edge-triggered periodic tick, nominal period 1 ms.
pub trait TickSource {
    /// True exactly once per elapsed period.
    fn tick_elapsed(&mut self) -> bool;
}

/// Interrupt masking for critical sections.
///
/// The executive brackets every single ring-buffer operation shared
/// with the transport interrupt between `mask` and `unmask`, keeping
/// the masked span as short as possible. The interrupt side never
/// masks: nothing preempts it.
pub trait InterruptMask {
    fn mask_interrupts(&mut self);
    fn unmask_interrupts(&mut self);
}
