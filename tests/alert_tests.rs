//! Integration tests for the audio alert cadence

mod common;
use common::*;

use embassy_futures::block_on;
use pico_traffic_light::alert::{alert_cycle, AlertPattern};
use pico_traffic_light::config::BUZZER_TONE_HZ;
use pico_traffic_light::state::SignalState;
use pico_traffic_light::types::{Mode, Phase, Snapshot};

fn one_cycle(snapshot: Snapshot) -> (MockTone, MockDelay, AlertPattern) {
    let state = SignalState::with(snapshot);
    let mut tone = MockTone::new();
    let mut delay = MockDelay::new();
    let pattern = block_on(alert_cycle(&state, &mut tone, &mut delay));
    (tone, delay, pattern)
}

/// Burst plus silence as actually requested from the collaborators
fn cadence_ms(tone: &MockTone, delay: &MockDelay) -> u32 {
    tone.beeps().iter().map(|(ms, _)| ms).sum::<u32>() + delay.total_ms()
}

#[test]
fn green_beeps_once_a_second() {
    let (tone, delay, pattern) = one_cycle(Snapshot::entering(Phase::Green, Mode::Day));
    assert_eq!(pattern, AlertPattern::GREEN);
    assert_eq!(tone.beeps(), &[(251, BUZZER_TONE_HZ)]);
    assert_eq!(cadence_ms(&tone, &delay), 1000);
}

#[test]
fn yellow_beeps_back_to_back() {
    let (tone, delay, pattern) = one_cycle(Snapshot::entering(Phase::Yellow, Mode::Day));
    assert_eq!(pattern, AlertPattern::YELLOW);
    assert_eq!(tone.beeps(), &[(251, BUZZER_TONE_HZ)]);
    assert!(delay.history().is_empty());
}

#[test]
fn red_cadence_is_one_and_a_half_seconds() {
    let (tone, delay, _) = one_cycle(Snapshot::entering(Phase::Red, Mode::Day));
    assert_eq!(tone.beeps(), &[(500, BUZZER_TONE_HZ)]);
    assert_eq!(delay.history(), &[1000]);
    assert_eq!(cadence_ms(&tone, &delay), 1500);
}

#[test]
fn night_ignores_phase() {
    for phase in [Phase::Green, Phase::Yellow, Phase::Red] {
        let (tone, delay, pattern) = one_cycle(Snapshot::entering(phase, Mode::Night));
        assert_eq!(pattern, AlertPattern::NIGHT);
        assert_eq!(tone.beeps(), &[(500, BUZZER_TONE_HZ)]);
        assert_eq!(cadence_ms(&tone, &delay), 2000);
    }
}

#[test]
fn pattern_is_sampled_once_per_cycle() {
    let state = SignalState::new();
    let mut tone = MockTone::new();
    let mut delay = MockDelay::new();

    let first = block_on(alert_cycle(&state, &mut tone, &mut delay));
    state.update(|_| Snapshot::entering(Phase::Red, Mode::Day));
    let second = block_on(alert_cycle(&state, &mut tone, &mut delay));

    assert_eq!(first, AlertPattern::GREEN);
    assert_eq!(second, AlertPattern::RED);
    assert_eq!(tone.beeps(), &[(251, BUZZER_TONE_HZ), (500, BUZZER_TONE_HZ)]);
    assert_eq!(delay.history(), &[749, 1000]);
}

#[test]
fn cycle_lengths() {
    assert_eq!(AlertPattern::GREEN.cycle_ms(), 1000);
    assert_eq!(AlertPattern::YELLOW.cycle_ms(), 251);
    assert_eq!(AlertPattern::RED.cycle_ms(), 1500);
    assert_eq!(AlertPattern::NIGHT.cycle_ms(), 2000);
}
