//! Error types for the non-fatal layers of the stack.
//!
//! Ring-buffer errors are ordinary result values: the executive treats
//! them as backpressure, the transport service routine escalates them
//! to a [`FaultCode`](crate::fault::FaultCode). Configuration errors
//! are reported, never asserted on.

use thiserror::Error;

/// Ring-buffer operation failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum BufferError {
    /// Pop attempted on an empty buffer. State is unchanged.
    #[error("buffer empty")]
    Empty,

    /// Push attempted on a full buffer. State is unchanged.
    #[error("buffer full")]
    Full,
}

/// Static-configuration violation detected at runtime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Status color index outside the closed 8-entry table.
    #[error("status color index {0} out of range")]
    ColorIndexOutOfRange(u8),
}
