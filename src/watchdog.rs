//! Watchdog fault monitor.
//!
//! Models the unlock/feed/lock discipline of a hardware watchdog as a
//! pure countdown FSM so the fault path is testable on the host. The
//! board glue maps `tick()` onto the real counter interrupt and the
//! returned events onto interrupt-clear and reset generation.
//!
//! Feed protocol: a feed is accepted only when the caller presents the
//! feed pattern together with its bitwise complement. Anything else is
//! ignored, so a runaway loop spraying writes cannot keep the system
//! alive by accident.

use crate::config::WATCHDOG_TIMEOUT_TICKS;

/// What the monitor wants done after a `tick()`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WatchdogEvent {
    /// First expiry: raise the fault interrupt, capture diagnostics.
    Fault,
    /// Second expiry with reset generation enabled: reset the system.
    Reset,
}

/// Countdown watchdog with a two-stage expiry.
///
/// The first expiry raises a fault and reloads the counter; if the
/// fault handler never feeds (it must not), the second expiry resets.
#[derive(Clone, Copy, Debug)]
pub struct WatchdogMonitor {
    load: u32,
    counter: u32,
    reset_enabled: bool,
    running: bool,
    fault_pending: bool,
}

impl WatchdogMonitor {
    /// Create a stopped monitor with the default timeout.
    pub const fn new() -> Self {
        Self {
            load: WATCHDOG_TIMEOUT_TICKS,
            counter: WATCHDOG_TIMEOUT_TICKS,
            reset_enabled: true,
            running: false,
            fault_pending: false,
        }
    }

    /// Set timeout and reset behavior. Only effective while stopped.
    pub fn configure(&mut self, timeout_ticks: u32, reset_enabled: bool) {
        if self.running {
            return;
        }
        self.load = timeout_ticks;
        self.counter = timeout_ticks;
        self.reset_enabled = reset_enabled;
    }

    /// Start the countdown. Once running, configuration is locked.
    pub fn start(&mut self) {
        self.counter = self.load;
        self.fault_pending = false;
        self.running = true;
    }

    /// Feed the watchdog.
    ///
    /// Accepted only when `complement == !pattern`; an invalid pair is
    /// silently ignored. Feeds after a fault has fired are also
    /// ignored: a missed deadline is not forgiven.
    #[inline]
    pub fn feed(&mut self, pattern: u8, complement: u8) {
        if !self.running || self.fault_pending {
            return;
        }
        if complement == !pattern {
            self.counter = self.load;
        }
    }

    /// Current countdown value (diagnostics).
    #[inline]
    pub fn read_counter(&self) -> u32 {
        self.counter
    }

    /// True once the first expiry has fired.
    #[inline]
    pub fn is_fault_pending(&self) -> bool {
        self.fault_pending
    }

    /// Advance one tick; returns the action the board glue must take.
    pub fn tick(&mut self) -> Option<WatchdogEvent> {
        if !self.running {
            return None;
        }
        if self.counter > 0 {
            self.counter -= 1;
        }
        if self.counter > 0 {
            return None;
        }
        if !self.fault_pending {
            self.fault_pending = true;
            self.counter = self.load;
            return Some(WatchdogEvent::Fault);
        }
        if self.reset_enabled {
            self.running = false;
            return Some(WatchdogEvent::Reset);
        }
        // Reset generation disabled: hold at zero, keep reporting
        None
    }
}

impl Default for WatchdogMonitor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FEED_COMPLEMENT, FEED_PATTERN};

    #[test]
    fn test_regular_feeding_never_expires() {
        let mut wd = WatchdogMonitor::new();
        wd.configure(10, true);
        wd.start();
        for _ in 0..100 {
            assert_eq!(wd.tick(), None);
            wd.feed(FEED_PATTERN, FEED_COMPLEMENT);
        }
    }

    #[test]
    fn test_invalid_feed_is_ignored() {
        let mut wd = WatchdogMonitor::new();
        wd.configure(5, true);
        wd.start();
        for _ in 0..4 {
            assert_eq!(wd.tick(), None);
            wd.feed(FEED_PATTERN, FEED_PATTERN); // not the complement
        }
        assert_eq!(wd.tick(), Some(WatchdogEvent::Fault));
    }

    #[test]
    fn test_fault_then_reset_sequence() {
        let mut wd = WatchdogMonitor::new();
        wd.configure(3, true);
        wd.start();
        assert_eq!(wd.tick(), None);
        assert_eq!(wd.tick(), None);
        assert_eq!(wd.tick(), Some(WatchdogEvent::Fault));
        assert!(wd.is_fault_pending());

        // Feeding after the fault is refused
        wd.feed(FEED_PATTERN, FEED_COMPLEMENT);

        assert_eq!(wd.tick(), None);
        assert_eq!(wd.tick(), None);
        assert_eq!(wd.tick(), Some(WatchdogEvent::Reset));
    }

    #[test]
    fn test_reset_disabled_stops_at_fault() {
        let mut wd = WatchdogMonitor::new();
        wd.configure(2, false);
        wd.start();
        assert_eq!(wd.tick(), None);
        assert_eq!(wd.tick(), Some(WatchdogEvent::Fault));
        for _ in 0..10 {
            assert_eq!(wd.tick(), None);
        }
        assert!(wd.is_fault_pending());
    }

    #[test]
    fn test_configure_locked_while_running() {
        let mut wd = WatchdogMonitor::new();
        wd.configure(5, true);
        wd.start();
        wd.configure(1_000, false);
        assert_eq!(wd.read_counter(), 5);
    }
}
