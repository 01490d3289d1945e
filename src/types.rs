//! Common types and data structures used across the traffic light application
//!
//! This module contains the phase, mode and color enums that make up the
//! shared signal state, plus the plain `Snapshot` record tasks read it through.

use crate::config::{
    GREEN_DURATION_SEC, INITIAL_PHASE, RED_DURATION_SEC, YELLOW_DURATION_SEC,
};

/// Day-mode traffic phase
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Phase {
    Green = 0,
    Yellow = 1,
    Red = 2,
}

impl Phase {
    /// Phase entered when this one expires (GREEN -> YELLOW -> RED -> GREEN)
    pub const fn next(self) -> Self {
        match self {
            Phase::Green => Phase::Yellow,
            Phase::Yellow => Phase::Red,
            Phase::Red => Phase::Green,
        }
    }

    /// Countdown value seeded when entering this phase, in seconds
    pub const fn duration_secs(self) -> u8 {
        match self {
            Phase::Green => GREEN_DURATION_SEC,
            Phase::Yellow => YELLOW_DURATION_SEC,
            Phase::Red => RED_DURATION_SEC,
        }
    }

    /// Indicator color that must accompany this phase in day mode
    pub const fn color(self) -> LedColor {
        match self {
            Phase::Green => LedColor::Green,
            Phase::Yellow => LedColor::Yellow,
            Phase::Red => LedColor::Red,
        }
    }

    pub(crate) const fn from_bits(bits: u8) -> Self {
        match bits {
            1 => Phase::Yellow,
            2 => Phase::Red,
            _ => Phase::Green,
        }
    }
}

/// Color directive for the tri-color indicator and the countdown matrix
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum LedColor {
    Red = 0,
    Green = 1,
    Yellow = 3,
}

impl LedColor {
    pub(crate) const fn from_bits(bits: u8) -> Self {
        match bits {
            0 => LedColor::Red,
            3 => LedColor::Yellow,
            _ => LedColor::Green,
        }
    }
}

/// Operating mode
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Mode {
    /// Full cyclic phase sequence with countdown
    Day = 0,
    /// Fixed yellow, no countdown
    Night = 1,
}

impl Mode {
    pub const fn toggled(self) -> Self {
        match self {
            Mode::Day => Mode::Night,
            Mode::Night => Mode::Day,
        }
    }

    pub(crate) const fn from_bits(bits: u8) -> Self {
        match bits {
            1 => Mode::Night,
            _ => Mode::Day,
        }
    }
}

/// A coherent copy of the shared signal state
///
/// `phase`, `countdown` and `color` are only meaningful while `mode` is
/// [`Mode::Day`]; in night mode they hold whatever was current when the mode
/// switched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Snapshot {
    pub phase: Phase,
    pub countdown: u8,
    pub color: LedColor,
    pub mode: Mode,
}

impl Snapshot {
    /// State at power-on and on every return to day mode
    pub const fn initial() -> Self {
        Self::entering(INITIAL_PHASE, Mode::Day)
    }

    /// State right at the start of `phase`, with a freshly seeded countdown
    pub const fn entering(phase: Phase, mode: Mode) -> Self {
        Self {
            phase,
            countdown: phase.duration_secs(),
            color: phase.color(),
            mode,
        }
    }

    /// Color the outputs should show right now: the phase color by day,
    /// yellow at night
    pub const fn output_color(&self) -> LedColor {
        match self.mode {
            Mode::Day => self.phase.color(),
            Mode::Night => LedColor::Yellow,
        }
    }

    pub(crate) const fn pack(&self) -> u32 {
        (self.phase as u32)
            | (self.countdown as u32) << 8
            | (self.color as u32) << 16
            | (self.mode as u32) << 24
    }

    pub(crate) const fn unpack(word: u32) -> Self {
        Self {
            phase: Phase::from_bits(word as u8),
            countdown: (word >> 8) as u8,
            color: LedColor::from_bits((word >> 16) as u8),
            mode: Mode::from_bits((word >> 24) as u8),
        }
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::initial()
    }
}

/// Application version information
pub struct AppVersion {
    pub major: u8,
    pub minor: u8,
    pub patch: u8,
}

impl AppVersion {
    pub const fn new(major: u8, minor: u8, patch: u8) -> Self {
        Self { major, minor, patch }
    }

    pub fn as_string(&self) -> &'static str {
        // For embedded, use a simple compile-time string
        env!("CARGO_PKG_VERSION")
    }
}

/// Current application version
pub const APP_VERSION: AppVersion = AppVersion::new(0, 1, 0);
