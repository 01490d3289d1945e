//! Application supervisor and monitoring
//!
//! This module provides the startup banner and a low-priority heartbeat that
//! periodically logs uptime and the shared signal state.

use embedded_hal_async::delay::DelayNs;

use crate::config::{self, TaskPriority};
use crate::state::SignalState;
use crate::types::APP_VERSION;

/// Application supervisor responsible for monitoring and lifecycle management
pub struct AppSupervisor {
    uptime_seconds: u32,
    last_heartbeat: u32,
    heartbeats: u32,
}

impl AppSupervisor {
    /// Create a new application supervisor
    pub const fn new() -> Self {
        Self {
            uptime_seconds: 0,
            last_heartbeat: 0,
            heartbeats: 0,
        }
    }

    /// Print application startup banner with board information
    pub fn print_startup_banner(&self) {
        info!("========================================");
        info!("Pico Traffic Light v{}", APP_VERSION.as_string());
        info!("========================================");
        info!("Hardware: RP2040 (Raspberry Pi Pico)");
        info!(
            "Phases: green {}s, yellow {}s, red {}s",
            config::GREEN_DURATION_SEC,
            config::YELLOW_DURATION_SEC,
            config::RED_DURATION_SEC
        );
        info!(
            "Matrix: GPIO{} | RGB: GPIO{}/{}/{} | Buzzer: GPIO{}",
            config::MATRIX_PIN,
            config::RGB_RED_PIN,
            config::RGB_GREEN_PIN,
            config::RGB_BLUE_PIN,
            config::BUZZER_PIN
        );
        info!(
            "OLED: I2C 0x{:02X} SDA GPIO{} SCL GPIO{}",
            config::OLED_I2C_ADDR,
            config::OLED_SDA_PIN,
            config::OLED_SCL_PIN
        );
        info!(
            "Buttons: mode GPIO{}, bootsel GPIO{}",
            config::MODE_BUTTON_PIN,
            config::BOOTSEL_BUTTON_PIN
        );
        for priority in TaskPriority::ALL {
            match priority.nvic_level() {
                Some(level) => info!("Task {}: interrupt executor P{}", priority.name(), level),
                None => info!("Task {}: thread executor", priority.name()),
            }
        }
        info!("========================================");
    }

    /// Print successful initialization message
    pub fn print_init_success(&self) {
        info!("Traffic light initialized successfully");
    }

    /// Account for `seconds` of elapsed time
    ///
    /// Returns true when a heartbeat is due.
    pub fn advance(&mut self, seconds: u32) -> bool {
        self.uptime_seconds = self.uptime_seconds.saturating_add(seconds);
        if self.uptime_seconds - self.last_heartbeat >= config::SUPERVISOR_HEARTBEAT_SECS as u32 {
            self.last_heartbeat = self.uptime_seconds;
            self.heartbeats += 1;
            true
        } else {
            false
        }
    }

    /// Run the main supervisor loop
    pub async fn run<D: DelayNs>(&mut self, state: &SignalState, mut delay: D) -> ! {
        info!("Application supervisor started");

        loop {
            // Wait for 10 seconds
            delay.delay_ms(10_000).await;

            if self.advance(10) {
                self.print_status(state);
            }
        }
    }

    /// Print current application status
    fn print_status(&self, state: &SignalState) {
        let minutes = self.uptime_seconds / 60;
        let hours = minutes / 60;
        let remaining_minutes = minutes % 60;
        let snapshot = state.snapshot();

        if hours > 0 {
            info!("Status: Uptime {}h{}m", hours, remaining_minutes);
        } else {
            info!("Status: Uptime {}m", minutes);
        }
        info!(
            "Signal: {:?} {:?} {}s ({:?})",
            snapshot.mode,
            snapshot.phase,
            snapshot.countdown,
            snapshot.color
        );
    }

    /// Get current uptime in seconds
    pub fn uptime(&self) -> u32 {
        self.uptime_seconds
    }

    /// Number of heartbeats logged so far
    pub fn heartbeats(&self) -> u32 {
        self.heartbeats
    }
}

impl Default for AppSupervisor {
    fn default() -> Self {
        Self::new()
    }
}
