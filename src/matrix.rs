//! Countdown matrix glyphs
//!
//! 5x5 digit bitmaps for the WS2812 matrix and the mapping from a glyph to the
//! color of every LED on the chain. The board adapter only has to push the
//! composed frame out; see [`MatrixRenderer`].

use crate::config::{MATRIX_LEDS, MATRIX_LEVEL, MATRIX_SIZE};
use crate::types::LedColor;

// ===================================================================
// Glyphs
// ===================================================================

/// Rows top to bottom, bit 4 is the leftmost column
const DIGITS: [[u8; MATRIX_SIZE]; 10] = [
    [0b01110, 0b10001, 0b10001, 0b10001, 0b01110], // 0
    [0b00100, 0b01100, 0b00100, 0b00100, 0b01110], // 1
    [0b01110, 0b10001, 0b00110, 0b01000, 0b11111], // 2
    [0b11110, 0b00001, 0b01110, 0b00001, 0b11110], // 3
    [0b10010, 0b10010, 0b11111, 0b00010, 0b00010], // 4
    [0b11111, 0b10000, 0b11110, 0b00001, 0b11110], // 5
    [0b01110, 0b10000, 0b11110, 0b10001, 0b01110], // 6
    [0b11111, 0b00001, 0b00010, 0b00100, 0b00100], // 7
    [0b01110, 0b10001, 0b01110, 0b10001, 0b01110], // 8
    [0b01110, 0b10001, 0b01111, 0b00001, 0b01110], // 9
];

/// A numeric glyph index, always within 0..=9
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Glyph(u8);

impl Glyph {
    /// Glyph for `digit`
    ///
    /// # Panics
    ///
    /// If `digit > 9`. A countdown outside the digit range means the phase
    /// engine is broken, so this is never clamped.
    pub fn digit(digit: u8) -> Self {
        assert!(digit <= 9, "glyph index out of range");
        Self(digit)
    }

    pub const fn index(self) -> u8 {
        self.0
    }

    /// Whether the pixel at (`row`, `col`) is lit, row 0 being the top
    pub fn is_lit(self, row: usize, col: usize) -> bool {
        let bits = DIGITS[self.0 as usize][row];
        bits & (1 << (MATRIX_SIZE - 1 - col)) != 0
    }
}

// ===================================================================
// Frame Composition
// ===================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const OFF: Rgb = Rgb { r: 0, g: 0, b: 0 };

    /// Matrix color for `color` at `brightness`
    pub fn scaled(color: LedColor, brightness: u8) -> Self {
        let level = MATRIX_LEVEL.saturating_mul(brightness);
        match color {
            LedColor::Red => Rgb { r: level, g: 0, b: 0 },
            LedColor::Green => Rgb { r: 0, g: level, b: 0 },
            LedColor::Yellow => Rgb { r: level, g: level, b: 0 },
        }
    }
}

/// Position on the LED chain of the pixel at (`row`, `col`)
///
/// The chain starts at the bottom right corner and snakes upwards, so even
/// rows counted from the bottom run right to left.
pub const fn chain_index(row: usize, col: usize) -> usize {
    let from_bottom = MATRIX_SIZE - 1 - row;
    let offset = if from_bottom % 2 == 0 {
        MATRIX_SIZE - 1 - col
    } else {
        col
    };
    from_bottom * MATRIX_SIZE + offset
}

/// Colors for the whole chain showing `glyph`
pub fn compose_frame(glyph: Glyph, color: LedColor, brightness: u8) -> [Rgb; MATRIX_LEDS] {
    let lit = Rgb::scaled(color, brightness);
    let mut frame = [Rgb::OFF; MATRIX_LEDS];
    for row in 0..MATRIX_SIZE {
        for col in 0..MATRIX_SIZE {
            if glyph.is_lit(row, col) {
                frame[chain_index(row, col)] = lit;
            }
        }
    }
    frame
}

// ===================================================================
// Renderer Contract
// ===================================================================

/// Numeric glyph output (the WS2812 matrix on the board)
#[allow(async_fn_in_trait)]
pub trait MatrixRenderer {
    async fn draw(&mut self, glyph: Glyph, color: LedColor, brightness: u8);
}
