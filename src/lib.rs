//! # fsk-audio-modem
//!
//! Audio-rate FSK modem stack for a single-core microcontroller.
//!
//! ## Architecture
//!
//! Two fixed contexts share a pair of sample rings:
//! - The codec frame interrupt runs [`transport::service_codec`],
//!   popping transmit samples and pushing captured ones.
//! - The main loop runs [`executive::Executive::poll`], producing and
//!   consuming samples under short interrupt-mask brackets.
//!
//! Everything between the rings is a pure state machine testable on
//! the host: debounce, DDS, IIR, demodulator, UART framing, watchdog.
//! A missed real-time deadline is fail-stop; see [`fault`].

#![cfg_attr(not(test), no_std)]

pub mod board;
pub mod config;
pub mod debounce;
pub mod dsp;
pub mod error;
pub mod executive;
pub mod fault;
pub mod indicator;
pub mod logging;
pub mod modem;
pub mod ring;
pub mod sim;
pub mod transport;
pub mod watchdog;

pub use debounce::{Press, PressClassifier};
pub use error::{BufferError, ConfigError};
pub use executive::Executive;
pub use fault::{FaultCode, FaultState, PostMortem};
pub use indicator::StatusColor;
pub use logging::LogStream;
pub use modem::{FskDemodulator, FskModulator, UartDecoder, UartEncoder};
pub use ring::RingBuffer;
pub use watchdog::{WatchdogEvent, WatchdogMonitor};
