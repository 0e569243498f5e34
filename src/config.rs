//! # TickOS Configuration
//!
//! Compile-time constants governing the scheduler, plus the runtime
//! [`SchedulerConfig`] consumed by the tick source.
//! All limits are fixed at compile time — no dynamic allocation.

use crate::error::{Error, Result};

/// Default capacity of the task table.
/// Each slot is a few words of RAM; the table is stored inline in the
/// scheduler, so raising this grows the scheduler by that much.
pub const MAX_TASKS: usize = 5;

/// Scheduler tick frequency in Hz. One tick = 1 ms at the default.
pub const TICK_HZ: u32 = 1000;

/// System clock frequency in Hz (default for STM32F4 at 16 MHz HSI).
pub const SYSTEM_CLOCK_HZ: u32 = 16_000_000;

/// Largest value the 24-bit SysTick reload register can hold.
pub const SYST_MAX_RELOAD: u32 = 0x00FF_FFFF;

/// Runtime timing configuration for the tick source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct SchedulerConfig {
    /// Tick frequency in Hz.
    pub tick_hz: u32,
    /// Core clock feeding SysTick, in Hz.
    pub clock_hz: u32,
}

impl SchedulerConfig {
    pub const fn new() -> Self {
        Self {
            tick_hz: TICK_HZ,
            clock_hz: SYSTEM_CLOCK_HZ,
        }
    }

    pub const fn with_tick_hz(self, tick_hz: u32) -> Self {
        Self { tick_hz, ..self }
    }

    pub const fn with_clock_hz(self, clock_hz: u32) -> Self {
        Self { clock_hz, ..self }
    }

    /// SysTick reload value producing one wrap per tick.
    ///
    /// # Errors
    /// [`Error::InvalidTickRate`] if the tick rate is zero, faster than the
    /// core clock, or too slow for the 24-bit counter.
    pub fn systick_reload(&self) -> Result<u32> {
        if self.tick_hz == 0 || self.tick_hz > self.clock_hz {
            return Err(Error::InvalidTickRate(self.tick_hz));
        }
        let reload = self.clock_hz / self.tick_hz - 1;
        if reload == 0 || reload > SYST_MAX_RELOAD {
            return Err(Error::InvalidTickRate(self.tick_hz));
        }
        Ok(reload)
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self::new()
    }
}
