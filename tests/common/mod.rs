//! Shared test infrastructure for pico-traffic-light integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use core::cell::Cell;
use core::convert::Infallible;

use embedded_hal::pwm::{ErrorType, SetDutyCycle};
use embedded_hal_async::delay::DelayNs;
use pico_traffic_light::alert::ToneGenerator;
use pico_traffic_light::display::CharacterDisplay;
use pico_traffic_light::indicator::TriColorLed;
use pico_traffic_light::matrix::{Glyph, MatrixRenderer};
use pico_traffic_light::mode::ModeButton;
use pico_traffic_light::types::LedColor;

// ============================================================================
// Mock Delay
// ============================================================================

/// Delay that returns immediately and records every requested wait
pub struct MockDelay {
    history: heapless::Vec<u32, 128>,
}

impl MockDelay {
    pub fn new() -> Self {
        Self {
            history: heapless::Vec::new(),
        }
    }

    /// Requested waits in milliseconds, oldest first
    pub fn history(&self) -> &[u32] {
        &self.history
    }

    pub fn total_ms(&self) -> u32 {
        self.history.iter().sum()
    }

    pub fn clear(&mut self) {
        self.history.clear();
    }
}

impl DelayNs for MockDelay {
    async fn delay_ns(&mut self, ns: u32) {
        let _ = self.history.push(ns / 1_000_000);
    }

    async fn delay_ms(&mut self, ms: u32) {
        let _ = self.history.push(ms);
    }
}

// ============================================================================
// Mock Matrix
// ============================================================================

/// Matrix that records every glyph drawn along with its color
pub struct MockMatrix {
    frames: heapless::Vec<(Glyph, LedColor), 128>,
}

impl MockMatrix {
    pub fn new() -> Self {
        Self {
            frames: heapless::Vec::new(),
        }
    }

    pub fn frames(&self) -> &[(Glyph, LedColor)] {
        &self.frames
    }

    /// Digits drawn so far, oldest first
    pub fn digits(&self) -> heapless::Vec<u8, 128> {
        self.frames.iter().map(|(glyph, _)| glyph.index()).collect()
    }

    pub fn last(&self) -> Option<(Glyph, LedColor)> {
        self.frames.last().copied()
    }
}

impl MatrixRenderer for MockMatrix {
    async fn draw(&mut self, glyph: Glyph, color: LedColor, _brightness: u8) {
        let _ = self.frames.push((glyph, color));
    }
}

// ============================================================================
// Mock LEDs
// ============================================================================

/// Tri-color LED that records color changes
pub struct MockLed {
    current: Option<LedColor>,
    history: heapless::Vec<LedColor, 128>,
}

impl MockLed {
    pub fn new() -> Self {
        Self {
            current: None,
            history: heapless::Vec::new(),
        }
    }

    /// Color currently shown, `None` when off
    pub fn current(&self) -> Option<LedColor> {
        self.current
    }

    pub fn history(&self) -> &[LedColor] {
        &self.history
    }
}

impl TriColorLed for MockLed {
    fn set_color(&mut self, color: LedColor) {
        self.current = Some(color);
        let _ = self.history.push(color);
    }

    fn turn_off(&mut self) {
        self.current = None;
    }
}

/// PWM channel with an 8-bit duty range, writing its duty into a shared cell
pub struct MockChannel<'a> {
    duty: &'a Cell<u16>,
}

impl<'a> MockChannel<'a> {
    pub fn new(duty: &'a Cell<u16>) -> Self {
        Self { duty }
    }
}

impl ErrorType for MockChannel<'_> {
    type Error = Infallible;
}

impl SetDutyCycle for MockChannel<'_> {
    fn max_duty_cycle(&self) -> u16 {
        255
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        self.duty.set(duty);
        Ok(())
    }
}

// ============================================================================
// Mock Buzzer
// ============================================================================

/// Tone generator that records (duration ms, frequency Hz) per beep
pub struct MockTone {
    beeps: heapless::Vec<(u32, u32), 64>,
}

impl MockTone {
    pub fn new() -> Self {
        Self {
            beeps: heapless::Vec::new(),
        }
    }

    pub fn beeps(&self) -> &[(u32, u32)] {
        &self.beeps
    }
}

impl ToneGenerator for MockTone {
    async fn beep(&mut self, duration_ms: u32, tone_hz: u32) {
        let _ = self.beeps.push((duration_ms, tone_hz));
    }
}

// ============================================================================
// Mock Screen
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenOp {
    Clear(i32),
    Text(heapless::String<16>, i32, i32),
    Present,
}

/// Character display that records every call
pub struct MockScreen {
    ops: heapless::Vec<ScreenOp, 64>,
}

impl MockScreen {
    pub fn new() -> Self {
        Self {
            ops: heapless::Vec::new(),
        }
    }

    pub fn ops(&self) -> &[ScreenOp] {
        &self.ops
    }

    pub fn clear(&mut self) {
        self.ops.clear();
    }
}

impl CharacterDisplay for MockScreen {
    fn clear_region(&mut self, y: i32) {
        let _ = self.ops.push(ScreenOp::Clear(y));
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32) {
        let mut owned = heapless::String::new();
        let _ = owned.push_str(text);
        let _ = self.ops.push(ScreenOp::Text(owned, x, y));
    }

    fn present(&mut self) {
        let _ = self.ops.push(ScreenOp::Present);
    }
}

// ============================================================================
// Mock Button
// ============================================================================

/// Button that replays a scripted sequence of samples, then stays released
pub struct MockButton {
    script: heapless::Vec<bool, 64>,
    position: usize,
}

impl MockButton {
    pub fn new(script: &[bool]) -> Self {
        let mut samples = heapless::Vec::new();
        let _ = samples.extend_from_slice(script);
        Self {
            script: samples,
            position: 0,
        }
    }

    pub fn remaining(&self) -> usize {
        self.script.len().saturating_sub(self.position)
    }
}

impl ModeButton for MockButton {
    fn is_pressed(&mut self) -> bool {
        let pressed = self.script.get(self.position).copied().unwrap_or(false);
        self.position += 1;
        pressed
    }
}
