//! Integration tests for the status display and RGB indicator outputs

mod common;
use common::*;

use core::cell::Cell;

use embedded_graphics::mock_display::MockDisplay;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use pico_traffic_light::config::{STATUS_TEXT_X, STATUS_TEXT_Y};
use pico_traffic_light::display::{clear_row, draw_label, draw_splash, status_label, status_step};
use pico_traffic_light::indicator::{PwmRgbLed, TriColorLed};
use pico_traffic_light::state::SignalState;
use pico_traffic_light::types::{LedColor, Mode, Phase, Snapshot};

fn text(s: &str) -> ScreenOp {
    let mut owned = heapless::String::new();
    let _ = owned.push_str(s);
    ScreenOp::Text(owned, STATUS_TEXT_X, STATUS_TEXT_Y)
}

#[test]
fn labels_follow_the_phase() {
    let label = |phase| status_label(&Snapshot::entering(phase, Mode::Day));
    assert_eq!(label(Phase::Green), Some("Siga"));
    assert_eq!(label(Phase::Yellow), Some("Atencao"));
    assert_eq!(label(Phase::Red), Some("Pare"));
}

#[test]
fn day_step_clears_draws_and_presents() {
    let state = SignalState::with(Snapshot::entering(Phase::Yellow, Mode::Day));
    let mut screen = MockScreen::new();

    assert_eq!(status_step(&state, &mut screen), Some("Atencao"));
    assert_eq!(
        screen.ops(),
        &[ScreenOp::Clear(STATUS_TEXT_Y), text("Atencao"), ScreenOp::Present]
    );
}

#[test]
fn night_step_leaves_the_row_blank() {
    let state = SignalState::with(Snapshot::entering(Phase::Red, Mode::Night));
    let mut screen = MockScreen::new();

    assert_eq!(status_step(&state, &mut screen), None);
    assert_eq!(screen.ops(), &[ScreenOp::Clear(STATUS_TEXT_Y), ScreenOp::Present]);
}

#[test]
fn splash_draws_border() {
    let mut display: MockDisplay<BinaryColor> = MockDisplay::new();
    display.set_allow_out_of_bounds_drawing(true);
    display.set_allow_overdraw(true);

    draw_splash(&mut display).unwrap();

    assert_eq!(display.get_pixel(Point::new(0, 0)), Some(BinaryColor::On));
    assert_eq!(display.get_pixel(Point::new(10, 25)), Some(BinaryColor::On));
    assert_eq!(display.get_pixel(Point::new(10, 37)), Some(BinaryColor::On));
    assert_eq!(display.get_pixel(Point::new(2, 50)), Some(BinaryColor::Off));
}

#[test]
fn label_lands_in_the_message_row() {
    let mut display: MockDisplay<BinaryColor> = MockDisplay::new();
    display.set_allow_out_of_bounds_drawing(true);
    display.set_allow_overdraw(true);

    clear_row(&mut display, STATUS_TEXT_Y).ok();
    draw_label(&mut display, "Pare", STATUS_TEXT_X, STATUS_TEXT_Y).unwrap();

    let lit = display
        .bounding_box()
        .points()
        .filter(|p| display.get_pixel(*p) == Some(BinaryColor::On));
    for point in lit {
        assert!(point.x >= STATUS_TEXT_X);
        assert!((STATUS_TEXT_Y..STATUS_TEXT_Y + 10).contains(&point.y));
    }
    assert_eq!(display.get_pixel(Point::new(0, STATUS_TEXT_Y)), Some(BinaryColor::Off));
}

/// Drive `color` and read back (red, green, blue) duties
fn duties_for(color: LedColor) -> (u16, u16, u16) {
    let (red, green, blue) = (Cell::new(99), Cell::new(99), Cell::new(99));
    let mut led = PwmRgbLed::new(
        MockChannel::new(&red),
        MockChannel::new(&green),
        MockChannel::new(&blue),
    );
    led.set_color(color);
    (red.get(), green.get(), blue.get())
}

#[test]
fn rgb_duty_levels_per_color() {
    assert_eq!(duties_for(LedColor::Green), (0, 170, 0));
    assert_eq!(duties_for(LedColor::Red), (5, 0, 0));
    assert_eq!(duties_for(LedColor::Yellow), (5, 255, 0));
}

#[test]
fn rgb_led_starts_dark() {
    let (red, green, blue) = (Cell::new(99), Cell::new(99), Cell::new(99));
    let mut led = PwmRgbLed::new(
        MockChannel::new(&red),
        MockChannel::new(&green),
        MockChannel::new(&blue),
    );
    assert_eq!((red.get(), green.get(), blue.get()), (0, 0, 0));

    led.set_color(LedColor::Yellow);
    led.turn_off();
    assert_eq!((red.get(), green.get(), blue.get()), (0, 0, 0));
}
