//! Press classification for a raw digital input.
//!
//! Pure step function over an explicit state struct: call once per
//! 1 ms scheduler tick with the sampled level. Thresholds are tick
//! counts, not wall time.
//!
//! Classification:
//! - Release after holding ≥ short threshold and < long threshold →
//!   `Short`, reported exactly once at the release tick.
//! - Holding through the long threshold → `Long`, reported exactly
//!   once at the crossing, before release. The eventual release of a
//!   long press reports nothing.
//! - Anything else → `None` (including sub-threshold taps: debounce).

use crate::config::{LONG_PRESS_TICKS, SHORT_PRESS_TICKS};

/// Three-way press classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Press {
    /// No classifiable event this tick.
    #[default]
    None,
    /// Released after a short hold.
    Short,
    /// Still held past the long threshold.
    Long,
}

/// Debounce state: elapsed hold ticks, last observed level, and
/// whether a long press has already been latched for this hold.
#[derive(Clone, Copy, Debug, Default)]
pub struct PressClassifier {
    elapsed: u32,
    last_level: bool,
    long_latched: bool,
}

impl PressClassifier {
    /// Create a classifier with cleared state.
    pub const fn new() -> Self {
        Self {
            elapsed: 0,
            last_level: false,
            long_latched: false,
        }
    }

    /// Advance one tick.
    ///
    /// `level` is the sampled input (true = asserted). A truthy `reset`
    /// clears all state and returns [`Press::None`].
    pub fn classify(&mut self, level: bool, reset: bool) -> Press {
        if reset {
            *self = Self::new();
            return Press::None;
        }

        let released = self.last_level && !level;
        self.last_level = level;

        if level {
            self.elapsed = self.elapsed.saturating_add(1);
            if self.elapsed == LONG_PRESS_TICKS {
                self.long_latched = true;
                return Press::Long;
            }
            return Press::None;
        }

        let result = if released
            && !self.long_latched
            && self.elapsed >= SHORT_PRESS_TICKS
            && self.elapsed < LONG_PRESS_TICKS
        {
            Press::Short
        } else {
            Press::None
        };
        self.elapsed = 0;
        self.long_latched = false;
        result
    }
}
