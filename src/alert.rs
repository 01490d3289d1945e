//! Audio alert
//!
//! Runs its own timing loop, independent of the countdown tick. The mode and
//! phase are sampled once at the start of each cycle and the burst and the
//! silence always run to completion, so a phase change is heard at most one
//! cycle late.

use embedded_hal_async::delay::DelayNs;

use crate::config::*;
use crate::state::SignalState;
use crate::types::{Mode, Phase, Snapshot};

/// Tone output (the PWM buzzer on the board)
#[allow(async_fn_in_trait)]
pub trait ToneGenerator {
    /// Sound a `tone_hz` tone for `duration_ms`, returning once it has stopped
    async fn beep(&mut self, duration_ms: u32, tone_hz: u32);
}

/// One burst followed by a silence
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AlertPattern {
    pub burst_ms: u32,
    pub silence_ms: u32,
}

impl AlertPattern {
    pub const GREEN: AlertPattern = AlertPattern::new(GREEN_BURST_MS, GREEN_SILENCE_MS);
    pub const YELLOW: AlertPattern = AlertPattern::new(YELLOW_BURST_MS, YELLOW_SILENCE_MS);
    pub const RED: AlertPattern = AlertPattern::new(RED_BURST_MS, RED_SILENCE_MS);
    pub const NIGHT: AlertPattern = AlertPattern::new(NIGHT_BURST_MS, NIGHT_SILENCE_MS);

    pub const fn new(burst_ms: u32, silence_ms: u32) -> Self {
        Self { burst_ms, silence_ms }
    }

    /// Pattern for `state`: per phase by day, a single slow pattern at night
    pub const fn for_state(state: &Snapshot) -> Self {
        match (state.mode, state.phase) {
            (Mode::Night, _) => Self::NIGHT,
            (Mode::Day, Phase::Green) => Self::GREEN,
            (Mode::Day, Phase::Yellow) => Self::YELLOW,
            (Mode::Day, Phase::Red) => Self::RED,
        }
    }

    /// Length of one burst plus silence
    pub const fn cycle_ms(&self) -> u32 {
        self.burst_ms + self.silence_ms
    }
}

/// Play one cycle for whatever the state is right now
pub async fn alert_cycle<T, D>(state: &SignalState, tone: &mut T, delay: &mut D) -> AlertPattern
where
    T: ToneGenerator,
    D: DelayNs,
{
    let pattern = AlertPattern::for_state(&state.snapshot());

    tone.beep(pattern.burst_ms, BUZZER_TONE_HZ).await;
    if pattern.silence_ms > 0 {
        delay.delay_ms(pattern.silence_ms).await;
    }
    pattern
}

/// Run the audio alert forever
pub async fn run<T, D>(state: &SignalState, mut tone: T, mut delay: D) -> !
where
    T: ToneGenerator,
    D: DelayNs,
{
    info!("Audio alert task started");

    let mut last = None;
    loop {
        let pattern = alert_cycle(state, &mut tone, &mut delay).await;
        if last != Some(pattern) {
            debug!("Alert cadence {}ms/{}ms", pattern.burst_ms, pattern.silence_ms);
            last = Some(pattern);
        }
    }
}
