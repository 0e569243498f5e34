//! # TickOS Example Firmware
//!
//! Four periodic tasks sharing one board context under the priority-based
//! policy (one task per 1 ms tick):
//!
//! | Task | Period | Priority | Behavior |
//! |------|--------|----------|----------|
//! | `toggle_yellow_led` | 1000 ms | MEDIUM | Flips the yellow LED state |
//! | `toggle_red_led` | 500 ms | MEDIUM | Flips the red LED state |
//! | `print_value` | 2000 ms | LOWEST (default) | Logs the last sensor reading as a voltage |
//! | `sample_sensor` | 100 ms | HIGH | Samples the ADC while the button is held |
//!
//! All four are due at tick 0; the priority policy spreads them over the
//! first ticks (sensor, yellow, red, print) and they then keep their phase.
//!
//! Pin and ADC drivers are board specific and not part of the kernel; the
//! context below stands in for them and the state changes go to the ITM log.
//! Build with `--features rt` for a `thumbv7em-none-eabihf` target.

#![no_std]
#![no_main]

use core::cell::Cell;

use cortex_m_rt::entry;
use log::{info, LevelFilter};
use panic_halt as _;

use tickos::arch::cortex_m4::SysTickSource;
use tickos::{logger, Scheduler, SchedulerConfig, SchedulerPolicy, TaskParams, TaskPriority};

/// ADC full scale (12-bit converter).
const ADC_FULL_SCALE: u32 = 1 << 12;

/// ADC reference voltage in millivolts.
const VREF_MV: u32 = 3300;

// ---------------------------------------------------------------------------
// Shared board state
// ---------------------------------------------------------------------------

/// State shared by every task. Tasks run one at a time, so `Cell` is enough.
struct Board {
    yellow_led: Cell<bool>,
    red_led: Cell<bool>,
    /// Set by the button driver (EXTI handler) on real hardware.
    button_pressed: Cell<bool>,
    pot_value: Cell<u16>,
    /// Noise source standing in for the potentiometer.
    adc_state: Cell<u32>,
}

impl Board {
    const fn new() -> Self {
        Self {
            yellow_led: Cell::new(false),
            red_led: Cell::new(false),
            button_pressed: Cell::new(true),
            pot_value: Cell::new(0),
            adc_state: Cell::new(0x1234_5678),
        }
    }

    fn read_adc(&self) -> u16 {
        let next = self.adc_state.get().wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        self.adc_state.set(next);
        ((next >> 16) % ADC_FULL_SCALE) as u16
    }
}

// ---------------------------------------------------------------------------
// Task callbacks
// ---------------------------------------------------------------------------

fn toggle_yellow_led(board: &Board) {
    let on = !board.yellow_led.get();
    board.yellow_led.set(on);
    info!("yellow LED {}", if on { "on" } else { "off" });
}

fn toggle_red_led(board: &Board) {
    let on = !board.red_led.get();
    board.red_led.set(on);
    info!("red LED {}", if on { "on" } else { "off" });
}

fn print_value(board: &Board) {
    let raw = u32::from(board.pot_value.get());
    let millivolts = raw * VREF_MV / ADC_FULL_SCALE;
    info!(
        "potentiometer value: {} voltage: {}.{:02} V",
        raw,
        millivolts / 1000,
        (millivolts % 1000) / 10
    );
}

fn sample_sensor(board: &Board) {
    if !board.button_pressed.get() {
        return;
    }
    board.pot_value.set(board.read_adc());
}

// ---------------------------------------------------------------------------
// Main entry point
// ---------------------------------------------------------------------------

#[entry]
fn main() -> ! {
    // Take ownership of core peripherals
    let cp = cortex_m::Peripherals::take().unwrap();

    logger::init(cp.ITM, LevelFilter::Info).expect("Failed to install logger");

    let board = Board::new();
    let mut scheduler: Scheduler<'_, Board> = Scheduler::new(SchedulerPolicy::PriorityBased);

    // --- Register tasks ---

    scheduler
        .register(
            &toggle_yellow_led,
            &board,
            TaskParams::new(0, 1000).with_priority(TaskPriority::MEDIUM),
        )
        .expect("Failed to register toggle_yellow_led");

    scheduler
        .register(
            &toggle_red_led,
            &board,
            TaskParams::new(0, 500).with_priority(TaskPriority::MEDIUM),
        )
        .expect("Failed to register toggle_red_led");

    // Default (LOWEST) priority
    scheduler
        .register(&print_value, &board, TaskParams::new(0, 2000))
        .expect("Failed to register print_value");

    scheduler
        .register(
            &sample_sensor,
            &board,
            TaskParams::new(0, 100).with_priority(TaskPriority::HIGH),
        )
        .expect("Failed to register sample_sensor");

    let mut ticks = SysTickSource::new(cp.SYST, &SchedulerConfig::default())
        .expect("Failed to configure SysTick");

    // Start the scheduler — does not return
    scheduler.run_forever(&mut ticks)
}
