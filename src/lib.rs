//! Pico Traffic Light - Priority-scheduled traffic light controller for RP2040
//!
//! This library holds the controller logic and the firmware glue for a
//! BitDogLab-style board built around the Raspberry Pi Pico.
//!
//! ## Outputs
//! - 5x5 WS2812 matrix showing the seconds left in the current phase
//! - RGB LED showing the phase color
//! - SSD1306 OLED with a one-word status message
//! - Buzzer with a per-phase beep cadence
//!
//! ## Architecture
//! - **Shared state**: one atomic word holding phase, countdown, color and mode
//! - **Priorities**: countdown > indicator > status display > audio alert > mode toggle
//! - **Async**: Embassy interrupt executors, one per priority level
//! - **Host testable**: every task is a step function over small collaborator
//!   traits; only `hardware` and `tasks` touch the RP2040 (feature `rp2040`)

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod alert;
pub mod config;
pub mod countdown;
pub mod display;
pub mod engine;
pub mod indicator;
pub mod matrix;
pub mod mode;
pub mod state;
pub mod supervisor;
pub mod types;

#[cfg(feature = "rp2040")]
pub mod hardware;
#[cfg(feature = "rp2040")]
pub mod tasks;
