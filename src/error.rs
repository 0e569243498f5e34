//! # Errors
//!
//! Every fallible kernel operation returns [`Result`]. Task callbacks are
//! infallible from the scheduler's point of view, so the taxonomy is small.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// Registration attempted while every slot is active. The table is
    /// left untouched.
    #[error("task table full ({capacity} slots in use)")]
    TaskTableFull { capacity: usize },

    /// Raw policy identifier outside the supported set. No scheduler is
    /// produced.
    #[error("unsupported scheduler policy id {0}")]
    UnsupportedSchedulerPolicy(u8),

    /// Tick rate that SysTick cannot generate from the configured clock.
    #[error("tick rate {0} Hz cannot be generated by SysTick")]
    InvalidTickRate(u32),
}

pub type Result<T> = core::result::Result<T, Error>;
