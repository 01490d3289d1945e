//! Task spawning with fixed priorities
//!
//! The four most urgent tasks each get an `InterruptExecutor` on a software
//! interrupt whose NVIC priority comes from [`TaskPriority::nvic_level`]. A
//! ready countdown tick therefore preempts the indicator, which preempts the
//! status display, and so on. The mode toggle, the reprogramming watcher and
//! the supervisor share the thread-mode executor below all of them.

use embassy_executor::{Executor, InterruptExecutor, SendSpawner};
use embassy_rp::gpio::Input;
use embassy_rp::interrupt;
use embassy_rp::interrupt::{InterruptExt, Priority};
use embassy_time::Delay;
use static_cell::StaticCell;

use crate::config::TaskPriority;
use crate::hardware::{Board, Oled, PwmBuzzer, RgbLed, StartupError, Ws2812Matrix};
use crate::mode::ActiveLowButton;
use crate::state::SIGNAL_STATE;
use crate::supervisor::AppSupervisor;
use crate::{alert, countdown, display, indicator, mode};

// ===================================================================
// Executors
// ===================================================================

static EXECUTOR_COUNTDOWN: InterruptExecutor = InterruptExecutor::new();
static EXECUTOR_INDICATOR: InterruptExecutor = InterruptExecutor::new();
static EXECUTOR_DISPLAY: InterruptExecutor = InterruptExecutor::new();
static EXECUTOR_AUDIO: InterruptExecutor = InterruptExecutor::new();
static EXECUTOR_THREAD: StaticCell<Executor> = StaticCell::new();
static SUPERVISOR: StaticCell<AppSupervisor> = StaticCell::new();

#[allow(non_snake_case)]
#[interrupt]
unsafe fn SWI_IRQ_0() {
    EXECUTOR_COUNTDOWN.on_interrupt()
}

#[allow(non_snake_case)]
#[interrupt]
unsafe fn SWI_IRQ_1() {
    EXECUTOR_INDICATOR.on_interrupt()
}

#[allow(non_snake_case)]
#[interrupt]
unsafe fn SWI_IRQ_2() {
    EXECUTOR_DISPLAY.on_interrupt()
}

#[allow(non_snake_case)]
#[interrupt]
unsafe fn SWI_IRQ_3() {
    EXECUTOR_AUDIO.on_interrupt()
}

fn nvic_priority(task: TaskPriority) -> Priority {
    match task.nvic_level() {
        Some(0) => Priority::P0,
        Some(1) => Priority::P1,
        Some(2) => Priority::P2,
        _ => Priority::P3,
    }
}

/// Start the interrupt executor that hosts `task`
fn start_executor(task: TaskPriority) -> SendSpawner {
    let priority = nvic_priority(task);
    debug!("Executor for {} at priority level {}", task.name(), task.nvic_level());

    match task {
        TaskPriority::Countdown => {
            interrupt::SWI_IRQ_0.set_priority(priority);
            EXECUTOR_COUNTDOWN.start(interrupt::SWI_IRQ_0)
        }
        TaskPriority::Indicator => {
            interrupt::SWI_IRQ_1.set_priority(priority);
            EXECUTOR_INDICATOR.start(interrupt::SWI_IRQ_1)
        }
        TaskPriority::StatusDisplay => {
            interrupt::SWI_IRQ_2.set_priority(priority);
            EXECUTOR_DISPLAY.start(interrupt::SWI_IRQ_2)
        }
        TaskPriority::AudioAlert | TaskPriority::ModeToggle => {
            interrupt::SWI_IRQ_3.set_priority(priority);
            EXECUTOR_AUDIO.start(interrupt::SWI_IRQ_3)
        }
    }
}

// ===================================================================
// Task Wrappers
// ===================================================================

#[embassy_executor::task]
async fn countdown_task(matrix: Ws2812Matrix) -> ! {
    countdown::run(&SIGNAL_STATE, matrix, Delay).await
}

#[embassy_executor::task]
async fn indicator_task(led: RgbLed) -> ! {
    indicator::run(&SIGNAL_STATE, led, Delay).await
}

#[embassy_executor::task]
async fn status_display_task(oled: Oled) -> ! {
    display::run(&SIGNAL_STATE, oled, Delay).await
}

#[embassy_executor::task]
async fn audio_alert_task(buzzer: PwmBuzzer) -> ! {
    alert::run(&SIGNAL_STATE, buzzer, Delay).await
}

#[embassy_executor::task]
async fn mode_toggle_task(button: ActiveLowButton<Input<'static>>) -> ! {
    mode::run(&SIGNAL_STATE, button, Delay).await
}

#[embassy_executor::task]
async fn supervisor_task(supervisor: &'static mut AppSupervisor) -> ! {
    supervisor.print_init_success();
    supervisor.run(&SIGNAL_STATE, Delay).await
}

/// Enter the boot ROM's USB mass-storage mode on a press of the second button
///
/// There is no way back to the application short of a reset.
#[embassy_executor::task]
async fn bootsel_task(mut button: Input<'static>) -> ! {
    info!("Reprogramming watcher started");

    button.wait_for_falling_edge().await;
    warn!("Reprogramming requested, entering USB boot");
    embassy_rp::rom_data::reset_to_usb_boot(0, 0);

    loop {
        cortex_m::asm::wfe();
    }
}

// ===================================================================
// Startup
// ===================================================================

fn spawn_prioritised(
    matrix: Ws2812Matrix,
    led: RgbLed,
    oled: Oled,
    buzzer: PwmBuzzer,
) -> Result<(), StartupError> {
    start_executor(TaskPriority::Countdown).spawn(countdown_task(matrix))?;
    start_executor(TaskPriority::Indicator).spawn(indicator_task(led))?;
    start_executor(TaskPriority::StatusDisplay).spawn(status_display_task(oled))?;
    start_executor(TaskPriority::AudioAlert).spawn(audio_alert_task(buzzer))?;
    Ok(())
}

/// Spawn every task and run the thread-mode executor
pub fn start(board: Board, supervisor: AppSupervisor) -> ! {
    let Board {
        matrix,
        led,
        buzzer,
        oled,
        mode_button,
        bootsel_button,
    } = board;

    if let Err(e) = spawn_prioritised(matrix, led, oled, buzzer) {
        error!("Failed to spawn controller tasks: {:?}", e);
        core::panic!("Task spawning failed");
    }

    let supervisor = SUPERVISOR.init(supervisor);
    let executor = EXECUTOR_THREAD.init(Executor::new());
    executor.run(|spawner| {
        defmt::unwrap!(spawner.spawn(mode_toggle_task(mode_button)));
        defmt::unwrap!(spawner.spawn(bootsel_task(bootsel_button)));
        defmt::unwrap!(spawner.spawn(supervisor_task(supervisor)));
    })
}
