//! Day/night mode toggle
//!
//! Lowest priority task. Polls the mode button and flips the operating mode
//! on every press. Going back to day mode always restarts the cycle at
//! GREEN/9; going to night mode leaves phase and countdown as they were.
//!
//! Debouncing belongs to the input; the poll period is the only filtering done
//! here.

use embedded_hal::digital::InputPin;
use embedded_hal_async::delay::DelayNs;

use crate::config::MODE_BUTTON_POLL_MS;
use crate::state::SignalState;
use crate::types::{Mode, Snapshot};

/// Mode button input
pub trait ModeButton {
    fn is_pressed(&mut self) -> bool;
}

/// Push button wired to ground with a pull-up
pub struct ActiveLowButton<P: InputPin> {
    pin: P,
}

impl<P: InputPin> ActiveLowButton<P> {
    pub fn new(pin: P) -> Self {
        Self { pin }
    }
}

impl<P: InputPin> ModeButton for ActiveLowButton<P> {
    fn is_pressed(&mut self) -> bool {
        // A read error counts as released
        self.pin.is_low().unwrap_or(false)
    }
}

/// State after one mode flip
pub const fn toggle(state: Snapshot) -> Snapshot {
    match state.mode {
        Mode::Night => Snapshot::initial(),
        Mode::Day => Snapshot {
            mode: Mode::Night,
            ..state
        },
    }
}

/// Press-edge detector for the mode button
#[derive(Debug, Default)]
pub struct ModeToggle {
    was_pressed: bool,
}

impl ModeToggle {
    pub const fn new() -> Self {
        Self { was_pressed: false }
    }

    /// Sample the button once
    ///
    /// Returns the new mode when this sample is the start of a press. Holding
    /// the button down toggles only once.
    pub fn poll<B: ModeButton>(&mut self, state: &SignalState, button: &mut B) -> Option<Mode> {
        let pressed = button.is_pressed();
        let edge = pressed && !self.was_pressed;
        self.was_pressed = pressed;

        if !edge {
            return None;
        }

        let (_, after) = state.update(toggle);
        info!("Mode switched to {:?}", after.mode);
        Some(after.mode)
    }
}

/// Run the mode toggle forever
pub async fn run<B, D>(state: &SignalState, mut button: B, mut delay: D) -> !
where
    B: ModeButton,
    D: DelayNs,
{
    info!("Mode toggle task started");

    let mut detector = ModeToggle::new();
    loop {
        detector.poll(state, &mut button);
        delay.delay_ms(MODE_BUTTON_POLL_MS).await;
    }
}
