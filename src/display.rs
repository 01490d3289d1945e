//! Status display
//!
//! Once per second the message row of the OLED is cleared and, in day mode,
//! the label for the current phase is written into it. The rest of the screen
//! keeps the splash drawn at startup.

use embedded_graphics::{
    mono_font::{ascii::FONT_5X8, ascii::FONT_6X10, MonoTextStyle},
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{Line, PrimitiveStyle, Rectangle},
    text::{Baseline, Text},
};
use embedded_hal_async::delay::DelayNs;

use crate::config::*;
use crate::state::SignalState;
use crate::types::{Mode, Phase, Snapshot};

/// Double-buffered text display (the SSD1306 on the board)
///
/// Drawing calls only touch the frame buffer; `present` pushes it out.
pub trait CharacterDisplay {
    /// Blank the message row starting at `y`
    fn clear_region(&mut self, y: i32);
    fn draw_text(&mut self, text: &str, x: i32, y: i32);
    fn present(&mut self);
}

// ===================================================================
// Drawing Helpers
// ===================================================================

/// Fill the full-width row of the status font starting at `y` with black
pub fn clear_row<D>(target: &mut D, y: i32) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    Rectangle::new(Point::new(0, y), Size::new(DISPLAY_WIDTH, STATUS_ROW_HEIGHT))
        .into_styled(PrimitiveStyle::with_fill(BinaryColor::Off))
        .draw(target)
}

/// Draw `text` in the status font with its top left corner at (`x`, `y`)
pub fn draw_label<D>(target: &mut D, text: &str, x: i32, y: i32) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let style = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);
    Text::with_baseline(text, Point::new(x, y), style, Baseline::Top).draw(target)?;
    Ok(())
}

/// Startup screen: border, two rules and the title lines
pub fn draw_splash<D>(target: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let stroke = PrimitiveStyle::with_stroke(BinaryColor::On, 1);
    let small = MonoTextStyle::new(&FONT_5X8, BinaryColor::On);

    target.clear(BinaryColor::Off)?;
    Rectangle::new(Point::zero(), Size::new(DISPLAY_WIDTH, DISPLAY_HEIGHT))
        .into_styled(stroke)
        .draw(target)?;
    Line::new(Point::new(3, 25), Point::new(123, 25))
        .into_styled(stroke)
        .draw(target)?;
    Line::new(Point::new(3, 37), Point::new(123, 37))
        .into_styled(stroke)
        .draw(target)?;

    Text::with_baseline(SPLASH_TITLE, Point::new(8, 6), small, Baseline::Top).draw(target)?;
    Text::with_baseline(SPLASH_SUBTITLE, Point::new(4, 16), small, Baseline::Top).draw(target)?;
    Text::with_baseline(SPLASH_FOOTER, Point::new(10, 28), small, Baseline::Top).draw(target)?;
    Ok(())
}

// ===================================================================
// Status Task Body
// ===================================================================

/// Message for the current state, `None` for a blank row
pub const fn status_label(state: &Snapshot) -> Option<&'static str> {
    match state.mode {
        Mode::Night => None,
        Mode::Day => Some(match state.phase {
            Phase::Green => LABEL_GO,
            Phase::Yellow => LABEL_CAUTION,
            Phase::Red => LABEL_STOP,
        }),
    }
}

/// Redraw the message row and present the frame
pub fn status_step<C: CharacterDisplay>(state: &SignalState, display: &mut C) -> Option<&'static str> {
    let label = status_label(&state.snapshot());

    display.clear_region(STATUS_TEXT_Y);
    if let Some(text) = label {
        display.draw_text(text, STATUS_TEXT_X, STATUS_TEXT_Y);
    }
    display.present();
    label
}

/// Run the status display forever
pub async fn run<C, D>(state: &SignalState, mut display: C, mut delay: D) -> !
where
    C: CharacterDisplay,
    D: DelayNs,
{
    info!("Status display task started");

    loop {
        status_step(state, &mut display);
        delay.delay_ms(STATUS_DISPLAY_PERIOD_MS).await;
    }
}
