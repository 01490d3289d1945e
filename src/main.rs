//! Pico Traffic Light - firmware entry point
//!
//! Hardware: Raspberry Pi Pico (RP2040)
//! Outputs: WS2812 5x5 matrix (GPIO7), RGB LED (GPIO13/11/12), buzzer (GPIO21),
//! SSD1306 OLED on I2C1 (GPIO14/15)
//! Inputs: mode button (GPIO5), reprogramming button (GPIO6)

#![no_std]
#![no_main]

use defmt::*;
use panic_halt as _;
use defmt_rtt as _; // global logger

use pico_traffic_light::hardware::Board;
use pico_traffic_light::supervisor::AppSupervisor;
use pico_traffic_light::tasks;

// ===================================================================
// Main Application Entry Point
// ===================================================================

#[cortex_m_rt::entry]
fn main() -> ! {
    let p = embassy_rp::init(Default::default());

    let supervisor = AppSupervisor::new();
    supervisor.print_startup_banner();

    let board = match Board::init(p) {
        Ok(board) => board,
        Err(e) => {
            error!("Board initialization failed: {:?}", e);
            core::panic!("Board initialization failed");
        }
    };

    tasks::start(board, supervisor)
}
