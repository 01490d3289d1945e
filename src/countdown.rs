//! Countdown driver
//!
//! Highest priority task. Each tick it shows the current countdown digit on
//! the matrix, counts down, waits out the tick and then lets the phase engine
//! fire. In night mode it shows a yellow `0` and leaves phase and countdown
//! alone.

use embedded_hal_async::delay::DelayNs;

use crate::config::{MATRIX_BRIGHTNESS, TICK_PERIOD_MS};
use crate::engine;
use crate::matrix::{Glyph, MatrixRenderer};
use crate::state::SignalState;
use crate::types::{LedColor, Mode, Phase};

/// First half of a tick: render the digit and count down
///
/// The decrement and the value rendered come from the same atomic update, so
/// the digit on the matrix is exactly the countdown the tick started with.
pub async fn render_tick<M: MatrixRenderer>(state: &SignalState, matrix: &mut M) -> Glyph {
    let (before, _) = state.update(|s| match s.mode {
        Mode::Day => engine::decrement(s),
        Mode::Night => s,
    });

    let (glyph, color) = match before.mode {
        Mode::Day => (Glyph::digit(before.countdown), before.color),
        Mode::Night => (Glyph::digit(0), LedColor::Yellow),
    };
    matrix.draw(glyph, color, MATRIX_BRIGHTNESS).await;
    glyph
}

/// Second half of a tick: run the phase engine
///
/// Returns the phase entered if a transition fired.
pub fn finish_tick(state: &SignalState) -> Option<Phase> {
    let (before, after) = state.update(|s| match s.mode {
        Mode::Day => engine::advance(s),
        Mode::Night => s,
    });

    if after.phase != before.phase {
        info!("Phase {:?} -> {:?} ({}s)", before.phase, after.phase, after.countdown);
        Some(after.phase)
    } else {
        None
    }
}

/// One full tick: render, wait [`TICK_PERIOD_MS`], transition
pub async fn countdown_step<M, D>(state: &SignalState, matrix: &mut M, delay: &mut D) -> Glyph
where
    M: MatrixRenderer,
    D: DelayNs,
{
    let glyph = render_tick(state, matrix).await;
    trace!("Countdown glyph {}", glyph.index());
    delay.delay_ms(TICK_PERIOD_MS).await;
    finish_tick(state);
    glyph
}

/// Run the countdown driver forever
pub async fn run<M, D>(state: &SignalState, mut matrix: M, mut delay: D) -> !
where
    M: MatrixRenderer,
    D: DelayNs,
{
    info!("Countdown task started");

    loop {
        countdown_step(state, &mut matrix, &mut delay).await;
    }
}
