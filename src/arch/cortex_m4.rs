//! # Cortex-M4 Port Layer
//!
//! SysTick-backed tick source. The scheduler is cooperative, so there is
//! no exception handler or context switch here: the dispatch loop polls the
//! SysTick COUNTFLAG, which the counter sets every time it wraps.
//!
//! ## Timing
//!
//! ```text
//!  reload = clock_hz / tick_hz - 1        (16 MHz / 1 kHz → 15 999)
//!
//!  |── dispatch ──|── spin ──|── dispatch ──|── spin ──|
//!  ^ wrap                    ^ wrap
//! ```
//!
//! A dispatch longer than one tick makes the next `wait_tick` return
//! immediately (COUNTFLAG is sticky) and the schedule slips; ticks are not
//! queued.

use cortex_m::peripheral::syst::SystClkSource;
use cortex_m::peripheral::SYST;
use log::debug;

use crate::config::SchedulerConfig;
use crate::error::Result;
use crate::scheduler::TickSource;

pub struct SysTickSource {
    syst: SYST,
}

impl SysTickSource {
    /// Take ownership of SysTick and start it at the configured tick rate.
    ///
    /// The SysTick interrupt is left disabled; wraps are observed by polling.
    ///
    /// # Errors
    /// [`crate::Error::InvalidTickRate`] if the reload does not fit SysTick.
    pub fn new(mut syst: SYST, config: &SchedulerConfig) -> Result<Self> {
        let reload = config.systick_reload()?;

        syst.disable_counter();
        syst.disable_interrupt();
        syst.set_clock_source(SystClkSource::Core);
        syst.set_reload(reload);
        syst.clear_current();
        syst.enable_counter();

        debug!("systick: {} Hz tick, reload {}", config.tick_hz, reload);
        Ok(Self { syst })
    }
}

impl TickSource for SysTickSource {
    fn wait_tick(&mut self) {
        while !self.syst.has_wrapped() {
            core::hint::spin_loop();
        }
    }
}
