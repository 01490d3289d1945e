//! Phase transition engine
//!
//! Pure mapping from an expired phase to the next one. The countdown driver
//! calls [`advance`] once per tick after it has rendered and decremented;
//! nothing happens unless the countdown has reached exactly zero.

use crate::types::{Mode, Snapshot};

/// Apply the transition for one tick
///
/// GREEN(0) -> YELLOW/3, YELLOW(0) -> RED/6, RED(0) -> GREEN/9. Any other
/// countdown is returned untouched. Mode is preserved.
pub const fn advance(state: Snapshot) -> Snapshot {
    if state.countdown != 0 {
        return state;
    }
    Snapshot::entering(state.phase.next(), state.mode)
}

/// Countdown after the render half of a tick: one less, never below zero
pub const fn decrement(state: Snapshot) -> Snapshot {
    Snapshot {
        countdown: state.countdown.saturating_sub(1),
        ..state
    }
}

/// Whether `state` honours the day-mode invariants
///
/// The color must follow the phase and the countdown must lie within the
/// phase's duration. Night-mode states are always accepted.
pub const fn is_consistent(state: &Snapshot) -> bool {
    match state.mode {
        Mode::Night => true,
        Mode::Day => {
            state.color as u8 == state.phase.color() as u8
                && state.countdown <= state.phase.duration_secs()
        }
    }
}
