//! Fault state and post-mortem diagnostics.
//!
//! # Philosophy
//!
//! A modem that streams corrupted timing is worse than one that is
//! silent. Once a real-time deadline has been missed, buffer and DSP
//! state integrity is unknown: the system records what it can and
//! halts, leaving recovery to the hardware watchdog reset.
//!
//! The fail-stop policy lives at this single boundary. Low-level
//! components never halt on their own; they return a named fault and
//! the supervisor decides.

use core::sync::atomic::{AtomicBool, AtomicU32, AtomicU8, Ordering};

use crate::ring::RingBuffer;

/// Fault codes indicating why the stack stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum FaultCode {
    /// No fault (normal operation).
    None = 0,

    /// Transmit underrun: the interrupt found the TX ring empty.
    /// The main loop fell behind the codec; the output deadline is
    /// already missed.
    TxUnderrun = 1,

    /// Receive overrun: the interrupt found the RX ring full.
    /// Incoming samples would be lost; the input deadline is already
    /// missed.
    RxOverrun = 2,

    /// Watchdog countdown expired without a feed.
    WatchdogTimeout = 3,
}

impl FaultCode {
    /// Convert from raw u8 value.
    pub fn from_u8(value: u8) -> Self {
        match value {
            1 => FaultCode::TxUnderrun,
            2 => FaultCode::RxOverrun,
            3 => FaultCode::WatchdogTimeout,
            _ => FaultCode::None,
        }
    }
}

/// Shared fault state.
///
/// Set by the transport service routine or the watchdog path, checked
/// by whichever context owns the terminal spin. All access is atomic;
/// safe to touch from interrupt context.
pub struct FaultState {
    active: AtomicBool,
    code: AtomicU8,
    /// Additional data (e.g., buffer occupancy at the time of fault).
    data: AtomicU32,
    /// Total fault count since boot (never cleared).
    count: AtomicU32,
}

impl FaultState {
    /// Create new fault state (no fault).
    pub const fn new() -> Self {
        Self {
            active: AtomicBool::new(false),
            code: AtomicU8::new(0),
            data: AtomicU32::new(0),
            count: AtomicU32::new(0),
        }
    }

    /// Record a fault.
    #[inline]
    pub fn set(&self, code: FaultCode, data: u32) {
        self.code.store(code as u8, Ordering::Release);
        self.data.store(data, Ordering::Release);
        self.count.fetch_add(1, Ordering::Relaxed);
        self.active.store(true, Ordering::Release);
    }

    /// Check if a fault is currently active.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Get the fault code (meaningful only when `is_active()`).
    #[inline]
    pub fn code(&self) -> FaultCode {
        FaultCode::from_u8(self.code.load(Ordering::Acquire))
    }

    /// Get fault data (meaning depends on the code).
    #[inline]
    pub fn data(&self) -> u32 {
        self.data.load(Ordering::Acquire)
    }

    /// Total fault count since boot.
    #[inline]
    pub fn count(&self) -> u32 {
        self.count.load(Ordering::Relaxed)
    }

    /// Clear the active flag. The counter is preserved for diagnostics.
    #[inline]
    pub fn clear(&self) {
        self.active.store(false, Ordering::Release);
    }
}

impl Default for FaultState {
    fn default() -> Self {
        Self::new()
    }
}

/// Marker that post-mortem contents are a real capture, not
/// power-on garbage.
const CAPTURE_MAGIC: u32 = 0x5744_4F47; // "WDOG"

/// Ring-buffer flags captured at the moment of a watchdog fault.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BufferSnapshot {
    pub tx_empty: bool,
    pub tx_full: bool,
    pub rx_empty: bool,
    pub rx_full: bool,
}

/// Snapshot bit positions inside the packed flags byte.
const TX_EMPTY: u8 = 1 << 0;
const TX_FULL: u8 = 1 << 1;
const RX_EMPTY: u8 = 1 << 2;
const RX_FULL: u8 = 1 << 3;

/// Post-mortem capture cell.
///
/// On the target this static must be placed in a `.noinit`/`.uninit`
/// section so the flags survive the watchdog-forced reset for one
/// read by the post-mortem inspector.
pub struct PostMortem {
    magic: AtomicU32,
    flags: AtomicU8,
}

impl PostMortem {
    pub const fn new() -> Self {
        Self {
            magic: AtomicU32::new(0),
            flags: AtomicU8::new(0),
        }
    }

    /// Capture both buffers' empty/full flags.
    ///
    /// Runs in the highest-priority fault context; two atomic stores,
    /// nothing else.
    pub fn capture<const TN: usize, const RN: usize>(
        &self,
        tx: &RingBuffer<i16, TN>,
        rx: &RingBuffer<i16, RN>,
    ) {
        let mut flags = 0u8;
        if tx.is_empty() {
            flags |= TX_EMPTY;
        }
        if tx.is_full() {
            flags |= TX_FULL;
        }
        if rx.is_empty() {
            flags |= RX_EMPTY;
        }
        if rx.is_full() {
            flags |= RX_FULL;
        }
        self.flags.store(flags, Ordering::Release);
        self.magic.store(CAPTURE_MAGIC, Ordering::Release);
    }

    /// Read the capture, if one exists.
    ///
    /// Returns `None` when the cell holds power-on garbage (no magic).
    pub fn read(&self) -> Option<BufferSnapshot> {
        if self.magic.load(Ordering::Acquire) != CAPTURE_MAGIC {
            return None;
        }
        let flags = self.flags.load(Ordering::Acquire);
        Some(BufferSnapshot {
            tx_empty: flags & TX_EMPTY != 0,
            tx_full: flags & TX_FULL != 0,
            rx_empty: flags & RX_EMPTY != 0,
            rx_full: flags & RX_FULL != 0,
        })
    }

    /// Invalidate the capture after the inspector has read it.
    pub fn clear(&self) {
        self.magic.store(0, Ordering::Release);
    }
}

impl Default for PostMortem {
    fn default() -> Self {
        Self::new()
    }
}
