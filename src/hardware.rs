//! Hardware abstraction and initialization
//!
//! This module owns everything that is specific to the RP2040 board: pin
//! assignments, the adapters that implement the collaborator traits on top of
//! embassy-rp peripherals, and bring-up of those peripherals. Any failure here
//! is fatal; the controller never runs with a missing output.

use embassy_executor::SpawnError;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::{I2C1, PIO0};
use embassy_rp::pio::{self, Common, Pio};
use embassy_rp::pio_programs::ws2812::{PioWs2812, PioWs2812Program};
use embassy_rp::pwm::{self, Pwm, PwmOutput};
use embassy_rp::Peripherals;
use embassy_time::Timer;
use fixed::traits::ToFixed;
use smart_leds::RGB8;
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::{I2CDisplayInterface, Ssd1306};

use crate::alert::ToneGenerator;
use crate::config::*;
use crate::display::{clear_row, draw_label, draw_splash, CharacterDisplay};
use crate::indicator::PwmRgbLed;
use crate::matrix::{compose_frame, Glyph, MatrixRenderer};
use crate::mode::ActiveLowButton;
use crate::types::LedColor;

bind_interrupts!(pub struct Irqs {
    PIO0_IRQ_0 => pio::InterruptHandler<PIO0>;
});

/// Fatal bring-up failures
#[derive(Debug, defmt::Format)]
pub enum StartupError {
    /// OLED did not acknowledge initialisation
    Display,
    /// A PWM slice did not hand out the requested channel
    Pwm,
    /// An executor ran out of task slots
    Spawn(SpawnError),
}

impl From<SpawnError> for StartupError {
    fn from(err: SpawnError) -> Self {
        StartupError::Spawn(err)
    }
}

// ===================================================================
// WS2812 Countdown Matrix
// ===================================================================

/// 5x5 WS2812 matrix on PIO0 state machine 0
pub struct Ws2812Matrix {
    leds: PioWs2812<'static, PIO0, 0, MATRIX_LEDS>,
    // The PIO program must stay loaded for as long as the driver runs
    _common: Common<'static, PIO0>,
    _program: PioWs2812Program<'static, PIO0>,
}

impl MatrixRenderer for Ws2812Matrix {
    async fn draw(&mut self, glyph: Glyph, color: LedColor, brightness: u8) {
        let frame = compose_frame(glyph, color, brightness);
        let mut colors = [RGB8::default(); MATRIX_LEDS];
        for (out, pixel) in colors.iter_mut().zip(frame.iter()) {
            *out = RGB8::new(pixel.r, pixel.g, pixel.b);
        }
        self.leds.write(&colors).await;
    }
}

// ===================================================================
// PWM Buzzer
// ===================================================================

/// Passive buzzer on PWM channel B, tone set by the slice frequency
pub struct PwmBuzzer {
    pwm: Pwm<'static>,
    config: pwm::Config,
}

const BUZZER_DIVIDER: u32 = 64;

impl PwmBuzzer {
    fn new(pwm: Pwm<'static>, config: pwm::Config) -> Self {
        Self { pwm, config }
    }

    fn silence(&mut self) {
        self.config.compare_b = 0;
        self.pwm.set_config(&self.config);
    }
}

impl ToneGenerator for PwmBuzzer {
    async fn beep(&mut self, duration_ms: u32, tone_hz: u32) {
        if tone_hz > 0 {
            let clock = embassy_rp::clocks::clk_sys_freq();
            let top = (clock / (BUZZER_DIVIDER * tone_hz)).saturating_sub(1);
            let top = top.min(u16::MAX as u32) as u16;

            self.config.divider = (BUZZER_DIVIDER as u8).to_fixed();
            self.config.top = top;
            self.config.compare_b = top / 2;
            self.pwm.set_config(&self.config);
        }

        Timer::after_millis(duration_ms as u64).await;
        self.silence();
    }
}

// ===================================================================
// SSD1306 Status Display
// ===================================================================

type OledDriver = Ssd1306<
    I2CInterface<I2c<'static, I2C1, i2c::Blocking>>,
    DisplaySize128x64,
    BufferedGraphicsMode<DisplaySize128x64>,
>;

/// 128x64 OLED on I2C1, drawn in RAM and flushed on `present`
pub struct Oled {
    display: OledDriver,
}

impl CharacterDisplay for Oled {
    fn clear_region(&mut self, y: i32) {
        let _ = clear_row(&mut self.display, y);
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32) {
        let _ = draw_label(&mut self.display, text, x, y);
    }

    fn present(&mut self) {
        if self.display.flush().is_err() {
            warn!("OLED flush failed");
        }
    }
}

// ===================================================================
// Board Bring-up
// ===================================================================

pub type RgbLed = PwmRgbLed<PwmOutput<'static>, PwmOutput<'static>, PwmOutput<'static>>;

/// Every peripheral the controller tasks drive
pub struct Board {
    pub matrix: Ws2812Matrix,
    pub led: RgbLed,
    pub buzzer: PwmBuzzer,
    pub oled: Oled,
    pub mode_button: ActiveLowButton<Input<'static>>,
    pub bootsel_button: Input<'static>,
}

impl Board {
    /// Bring up all peripherals and draw the splash screen
    pub fn init(p: Peripherals) -> Result<Self, StartupError> {
        info!("Initializing board peripherals");

        // Countdown matrix
        let Pio { mut common, sm0, .. } = Pio::new(p.PIO0, Irqs);
        let program = PioWs2812Program::new(&mut common);
        let leds = PioWs2812::new(&mut common, sm0, p.DMA_CH0, p.PIN_7, &program);
        let matrix = Ws2812Matrix {
            leds,
            _common: common,
            _program: program,
        };

        // RGB indicator: green on slice 5 B, blue/red on slice 6 A/B
        let mut rgb_config = pwm::Config::default();
        rgb_config.top = RGB_PWM_TOP;
        let (_, green) = Pwm::new_output_b(p.PWM_SLICE5, p.PIN_11, rgb_config.clone()).split();
        let (blue, red) =
            Pwm::new_output_ab(p.PWM_SLICE6, p.PIN_12, p.PIN_13, rgb_config).split();
        let led = PwmRgbLed::new(
            red.ok_or(StartupError::Pwm)?,
            green.ok_or(StartupError::Pwm)?,
            blue.ok_or(StartupError::Pwm)?,
        );

        // Buzzer on slice 2 B, silent until the first beep
        let buzzer_config = pwm::Config::default();
        let mut buzzer = PwmBuzzer::new(
            Pwm::new_output_b(p.PWM_SLICE2, p.PIN_21, buzzer_config.clone()),
            buzzer_config,
        );
        buzzer.silence();

        // Status display
        let mut i2c_config = i2c::Config::default();
        i2c_config.frequency = OLED_I2C_BAUDRATE;
        let i2c = I2c::new_blocking(p.I2C1, p.PIN_15, p.PIN_14, i2c_config);
        let interface = I2CDisplayInterface::new_custom_address(i2c, OLED_I2C_ADDR);
        let mut display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
            .into_buffered_graphics_mode();
        display.init().map_err(|_| StartupError::Display)?;
        draw_splash(&mut display).map_err(|_| StartupError::Display)?;
        display.flush().map_err(|_| StartupError::Display)?;
        let oled = Oled { display };

        // Buttons
        let mode_button = ActiveLowButton::new(Input::new(p.PIN_5, Pull::Up));
        let bootsel_button = Input::new(p.PIN_6, Pull::Up);

        info!("Board peripherals ready");

        Ok(Self {
            matrix,
            led,
            buzzer,
            oled,
            mode_button,
            bootsel_button,
        })
    }
}
