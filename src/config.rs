//! Hardware and timing configuration for the traffic light controller
//! RP2040 (Raspberry Pi Pico) board with WS2812 matrix, RGB LED, buzzer and OLED

use crate::types::Phase;

// ===================================================================
// Phase Timing
// ===================================================================

pub const GREEN_DURATION_SEC: u8 = 9;
pub const YELLOW_DURATION_SEC: u8 = 3;
pub const RED_DURATION_SEC: u8 = 6;

/// Phase entered at power-on and on every return to day mode
pub const INITIAL_PHASE: Phase = Phase::Green;

/// Length of one countdown tick
pub const TICK_PERIOD_MS: u32 = 1000;

/// Highest countdown value the matrix can show
pub const MAX_COUNTDOWN: u8 = 9;

const _: () = assert!(
    GREEN_DURATION_SEC <= MAX_COUNTDOWN
        && YELLOW_DURATION_SEC <= MAX_COUNTDOWN
        && RED_DURATION_SEC <= MAX_COUNTDOWN
);

// ===================================================================
// Task Periods
// ===================================================================

pub const STATUS_DISPLAY_PERIOD_MS: u32 = 1000; // Redraw once per second
pub const MODE_BUTTON_POLL_MS: u32 = 100; // Mode button poll period
pub const INDICATOR_POLL_MS: u32 = 20; // Indicator re-poll bound when no change is signalled
pub const SUPERVISOR_HEARTBEAT_SECS: u64 = 60; // Status log interval

// ===================================================================
// Audio Alert Cadence
// ===================================================================

pub const BUZZER_TONE_HZ: u32 = 300;

pub const GREEN_BURST_MS: u32 = 251;
pub const GREEN_SILENCE_MS: u32 = 749; // 1 Hz cadence

pub const YELLOW_BURST_MS: u32 = 251;
pub const YELLOW_SILENCE_MS: u32 = 0; // Back to back

pub const RED_BURST_MS: u32 = 500;
pub const RED_SILENCE_MS: u32 = 1000; // 1.5 s cadence

pub const NIGHT_BURST_MS: u32 = 500;
pub const NIGHT_SILENCE_MS: u32 = 1500; // 2 s cadence

// ===================================================================
// Status Display (SSD1306 128x64)
// ===================================================================

pub const DISPLAY_WIDTH: u32 = 128;
pub const DISPLAY_HEIGHT: u32 = 64;
pub const STATUS_TEXT_X: i32 = 24;
pub const STATUS_TEXT_Y: i32 = 40;
pub const STATUS_ROW_HEIGHT: u32 = 10; // Matches FONT_6X10

pub const LABEL_GO: &str = "Siga";
pub const LABEL_CAUTION: &str = "Atencao";
pub const LABEL_STOP: &str = "Pare";

pub const SPLASH_TITLE: &str = "CEPEDI   TIC37";
pub const SPLASH_SUBTITLE: &str = "TrafficLightRTOS";
pub const SPLASH_FOOTER: &str = "  Embassy";

// ===================================================================
// Indicator / Matrix Output Levels
// ===================================================================

pub const RGB_PWM_TOP: u16 = 255;
pub const RGB_RED_LEVEL: u16 = 5;
pub const RGB_GREEN_LEVEL: u16 = 170;
pub const RGB_YELLOW_RED_LEVEL: u16 = 5;
pub const RGB_YELLOW_GREEN_LEVEL: u16 = 255;

pub const MATRIX_SIZE: usize = 5; // 5x5 WS2812 matrix
pub const MATRIX_LEDS: usize = MATRIX_SIZE * MATRIX_SIZE;
pub const MATRIX_LEVEL: u8 = 32; // Per-channel level at brightness 1
pub const MATRIX_BRIGHTNESS: u8 = 1;

// ===================================================================
// GPIO Pin Assignments - Raspberry Pi Pico
// ===================================================================

pub const MATRIX_PIN: u8 = 7; // WS2812 data
pub const RGB_RED_PIN: u8 = 13;
pub const RGB_GREEN_PIN: u8 = 11;
pub const RGB_BLUE_PIN: u8 = 12;
pub const BUZZER_PIN: u8 = 21;
pub const MODE_BUTTON_PIN: u8 = 5; // Button A, active low
pub const BOOTSEL_BUTTON_PIN: u8 = 6; // Button B, active low
pub const OLED_SDA_PIN: u8 = 14;
pub const OLED_SCL_PIN: u8 = 15;
pub const OLED_I2C_ADDR: u8 = 0x3C;
pub const OLED_I2C_BAUDRATE: u32 = 400_000;

// ===================================================================
// Task Priorities
// ===================================================================

/// Fixed scheduling class of every long-running task, highest first
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TaskPriority {
    Countdown,
    Indicator,
    StatusDisplay,
    AudioAlert,
    ModeToggle,
}

impl TaskPriority {
    pub const ALL: [TaskPriority; 5] = [
        TaskPriority::Countdown,
        TaskPriority::Indicator,
        TaskPriority::StatusDisplay,
        TaskPriority::AudioAlert,
        TaskPriority::ModeToggle,
    ];

    /// NVIC priority level (0 = most urgent) of the interrupt executor hosting
    /// the task, or `None` for the thread-mode executor
    pub const fn nvic_level(self) -> Option<u8> {
        match self {
            TaskPriority::Countdown => Some(0),
            TaskPriority::Indicator => Some(1),
            TaskPriority::StatusDisplay => Some(2),
            TaskPriority::AudioAlert => Some(3),
            TaskPriority::ModeToggle => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            TaskPriority::Countdown => "countdown",
            TaskPriority::Indicator => "indicator",
            TaskPriority::StatusDisplay => "status display",
            TaskPriority::AudioAlert => "audio alert",
            TaskPriority::ModeToggle => "mode toggle",
        }
    }
}
