//! Tri-color indicator
//!
//! Maps the shared state to an LED color and drives it on every iteration.
//! Driving the same color again is harmless, so the task keeps no state
//! besides the last color it logged.

use embassy_futures::select::select;
use embedded_hal::pwm::SetDutyCycle;
use embedded_hal_async::delay::DelayNs;

use crate::config::{
    INDICATOR_POLL_MS, RGB_GREEN_LEVEL, RGB_PWM_TOP, RGB_RED_LEVEL, RGB_YELLOW_GREEN_LEVEL,
    RGB_YELLOW_RED_LEVEL,
};
use crate::state::SignalState;
use crate::types::LedColor;

/// Tri-color output (the PWM RGB LED on the board)
pub trait TriColorLed {
    fn set_color(&mut self, color: LedColor);
    fn turn_off(&mut self);
}

// ===================================================================
// PWM RGB LED
// ===================================================================

/// RGB LED driven by three PWM channels (common cathode)
///
/// Duty levels are relative to [`RGB_PWM_TOP`] and scaled to whatever maximum
/// duty the channels report.
pub struct PwmRgbLed<R, G, B>
where
    R: SetDutyCycle,
    G: SetDutyCycle,
    B: SetDutyCycle,
{
    red: R,
    green: G,
    blue: B,
}

impl<R, G, B> PwmRgbLed<R, G, B>
where
    R: SetDutyCycle,
    G: SetDutyCycle,
    B: SetDutyCycle,
{
    pub fn new(red: R, green: G, blue: B) -> Self {
        let mut led = Self { red, green, blue };
        led.turn_off();
        led
    }

    /// (red, green) levels out of [`RGB_PWM_TOP`] for `color`
    pub const fn levels(color: LedColor) -> (u16, u16) {
        match color {
            LedColor::Red => (RGB_RED_LEVEL, 0),
            LedColor::Green => (0, RGB_GREEN_LEVEL),
            LedColor::Yellow => (RGB_YELLOW_RED_LEVEL, RGB_YELLOW_GREEN_LEVEL),
        }
    }
}

impl<R, G, B> TriColorLed for PwmRgbLed<R, G, B>
where
    R: SetDutyCycle,
    G: SetDutyCycle,
    B: SetDutyCycle,
{
    fn set_color(&mut self, color: LedColor) {
        let (red, green) = Self::levels(color);
        let _ = self.red.set_duty_cycle_fraction(red, RGB_PWM_TOP);
        let _ = self.green.set_duty_cycle_fraction(green, RGB_PWM_TOP);
        let _ = self.blue.set_duty_cycle_fully_off();
    }

    fn turn_off(&mut self) {
        let _ = self.red.set_duty_cycle_fully_off();
        let _ = self.green.set_duty_cycle_fully_off();
        let _ = self.blue.set_duty_cycle_fully_off();
    }
}

// ===================================================================
// Indicator Task Body
// ===================================================================

/// Drive the LED from the current state
///
/// `last` holds the color driven on the previous call and is only used to
/// log changes.
pub fn indicator_step<L: TriColorLed>(
    state: &SignalState,
    led: &mut L,
    last: &mut Option<LedColor>,
) -> LedColor {
    let color = state.snapshot().output_color();
    led.set_color(color);

    if *last != Some(color) {
        debug!("Indicator color {:?}", color);
        *last = Some(color);
    }
    color
}

/// Run the indicator forever
///
/// Wakes as soon as the shared state changes and otherwise re-polls every
/// [`INDICATOR_POLL_MS`], which bounds how stale the LED can get.
pub async fn run<L, D>(state: &SignalState, mut led: L, mut delay: D) -> !
where
    L: TriColorLed,
    D: DelayNs,
{
    info!("Indicator task started");

    let mut last = None;
    loop {
        indicator_step(state, &mut led, &mut last);
        select(state.wait_changed(), delay.delay_ms(INDICATOR_POLL_MS)).await;
    }
}
