//! Status indicator types and software-PWM effects.
//!
//! The color set is a closed 8-value enum mapped through a lookup table;
//! an out-of-range index is reported as a configuration error, never
//! asserted on. Effects keep their state in explicit structs stepped by
//! pure functions so they are testable without hardware.

use crate::error::ConfigError;

/// The eight displayable status colors (3-bit RGB).
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum StatusColor {
    #[default]
    Off = 0,
    Red = 1,
    Green = 2,
    Blue = 3,
    Yellow = 4,
    Magenta = 5,
    Cyan = 6,
    White = 7,
}

/// Counter-to-color table: index n shows the nth color.
const COLOR_TABLE: [StatusColor; 8] = [
    StatusColor::Off,
    StatusColor::Red,
    StatusColor::Green,
    StatusColor::Blue,
    StatusColor::Yellow,
    StatusColor::Magenta,
    StatusColor::Cyan,
    StatusColor::White,
];

impl StatusColor {
    /// Look up the color for a counter value.
    ///
    /// Indices outside the table report [`ConfigError::ColorIndexOutOfRange`].
    pub fn from_index(index: u8) -> Result<Self, ConfigError> {
        COLOR_TABLE
            .get(index as usize)
            .copied()
            .ok_or(ConfigError::ColorIndexOutOfRange(index))
    }
}

/// Software-PWM counter width for the effects below.
const PWM_TOP: u16 = 0xFF;

/// Breathing effect: triangle-wave brightness under software PWM.
///
/// Step once per executive iteration; the return value is the
/// instantaneous on/off level for the activity indicator.
#[derive(Clone, Copy, Debug, Default)]
pub struct BreathState {
    time_counter: u32,
    pwm_counter: u16,
}

impl BreathState {
    pub const fn new() -> Self {
        Self {
            time_counter: 0,
            pwm_counter: 0,
        }
    }

    /// Advance one step and return the indicator level.
    #[inline]
    pub fn step(&mut self) -> bool {
        self.time_counter += 1;
        let sawtooth = ((self.time_counter >> 10) as u16) & PWM_TOP;
        let triangle = if sawtooth < PWM_TOP / 2 {
            sawtooth
        } else {
            PWM_TOP - sawtooth
        };
        let brightness = triangle >> 2;

        let on = brightness >= self.pwm_counter;
        self.pwm_counter = (self.pwm_counter + 1) & PWM_TOP;
        on
    }
}

/// Blink effect: half-period of 512 steps, with a short off-notch to
/// keep the duty cycle visibly below 100 %.
#[derive(Clone, Copy, Debug, Default)]
pub struct BlinkState {
    step_counter: u16,
    lit: bool,
}

impl BlinkState {
    pub const fn new() -> Self {
        Self {
            step_counter: 0,
            lit: false,
        }
    }

    /// Advance one step; returns whether the color should show.
    #[inline]
    pub fn step(&mut self) -> bool {
        self.step_counter += 1;
        if self.step_counter == 512 {
            self.lit = !self.lit;
            self.step_counter = 0;
        }
        self.lit && (self.step_counter & 0xF) > 13
    }
}
