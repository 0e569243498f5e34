//! # Synchronization Primitives
//!
//! The scheduler itself never shares state: the task table is only touched
//! from the dispatch loop. Two things do cross contexts:
//!
//! - the stop request, which may be raised from an interrupt handler
//!   while the loop is running, and
//! - output peripherals (the ITM logger), guarded by a critical section.

use core::cell::Cell;
use core::sync::atomic::{AtomicBool, Ordering};

use cortex_m::interrupt;

// ---------------------------------------------------------------------------
// Stop signal
// ---------------------------------------------------------------------------

/// Polled by [`crate::Scheduler::run`] once per tick boundary.
pub trait StopSignal {
    fn should_stop(&self) -> bool;
}

impl StopSignal for AtomicBool {
    #[inline]
    fn should_stop(&self) -> bool {
        self.load(Ordering::Acquire)
    }
}

impl StopSignal for Cell<bool> {
    #[inline]
    fn should_stop(&self) -> bool {
        self.get()
    }
}

/// A stop signal that is never raised.
#[derive(Debug, Clone, Copy, Default)]
pub struct Never;

impl StopSignal for Never {
    #[inline]
    fn should_stop(&self) -> bool {
        false
    }
}

/// Interrupt-safe stop request, usable from a `static`.
///
/// ```ignore
/// static STOP: StopFlag = StopFlag::new();
///
/// #[exception]
/// fn HardFault(..) { STOP.request_stop(); }
/// ```
#[derive(Debug, Default)]
pub struct StopFlag(AtomicBool);

impl StopFlag {
    pub const fn new() -> Self {
        Self(AtomicBool::new(false))
    }

    pub fn request_stop(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Re-arm the flag so the loop can be started again.
    pub fn reset(&self) {
        self.0.store(false, Ordering::Release);
    }
}

impl StopSignal for StopFlag {
    #[inline]
    fn should_stop(&self) -> bool {
        self.0.should_stop()
    }
}

// ---------------------------------------------------------------------------
// Critical sections
// ---------------------------------------------------------------------------

/// Execute a closure within a critical section (interrupts disabled).
///
/// Interrupts are disabled on entry and restored on exit. Keep the body
/// short: it delays every interrupt, including SysTick.
///
/// Only meaningful on a Cortex-M target; never called from host tests.
#[inline]
pub fn critical_section<F, R>(f: F) -> R
where
    F: FnOnce(&interrupt::CriticalSection) -> R,
{
    interrupt::free(f)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_flag_round_trip() {
        static FLAG: StopFlag = StopFlag::new();
        assert!(!FLAG.should_stop());
        FLAG.request_stop();
        assert!(FLAG.should_stop());
        FLAG.reset();
        assert!(!FLAG.should_stop());
    }

    #[test]
    fn test_plain_signals() {
        assert!(!Never.should_stop());

        let cell = Cell::new(false);
        assert!(!cell.should_stop());
        cell.set(true);
        assert!(cell.should_stop());

        let atomic = AtomicBool::new(true);
        assert!(atomic.should_stop());
    }
}
