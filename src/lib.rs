//! # TickOS — a tick-driven cooperative scheduler
//!
//! A single-core, non-preemptive task scheduler for ARM Cortex-M
//! microcontrollers. Periodic callbacks live in a fixed-capacity table and
//! are dispatched once per tick under one of two policies.
//!
//! ## Overview
//!
//! - **Round-robin**: every task whose countdown reached zero runs, in
//!   registration order. Zero, one or many tasks per tick.
//! - **Priority-based**: at most one task per tick, the eligible one with
//!   the lowest priority value (ties go to the earlier registration).
//!   Losers stay eligible; a task eligible every tick starves lower ones.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │            Application callbacks + context             │
//! ├────────────────────────────────────────────────────────┤
//! │             Scheduler facade (scheduler.rs)             │
//! │        register() · tick() · run() · run_forever()      │
//! ├──────────────────────────┬─────────────────────────────┤
//! │  Policies (policy.rs)    │   Stop signal (sync.rs)     │
//! │  ─ RoundRobin            │   ─ StopFlag / AtomicBool   │
//! │  ─ PriorityBased         │   ─ critical_section        │
//! ├──────────────────────────┴─────────────────────────────┤
//! │     Task table (table.rs) · Task record (task.rs)       │
//! ├────────────────────────────────────────────────────────┤
//! │      Tick source (arch/cortex_m4.rs) · ITM logger       │
//! ├────────────────────────────────────────────────────────┤
//! │              ARM Cortex-M4 Hardware (SysTick)           │
//! └────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Memory Model
//!
//! - **No heap**: the task table is stored inline, `[Option<TaskRecord>; N]`
//! - **No globals for task state**: each task carries a borrowed context
//! - **Run to completion**: callbacks must be short and never block
//!
//! ## Example
//!
//! ```
//! use core::cell::Cell;
//! use tickos::{Scheduler, SchedulerPolicy, TaskParams, TaskPriority};
//!
//! fn blink(led: &Cell<bool>) {
//!     led.set(!led.get());
//! }
//!
//! let led = Cell::new(false);
//! let mut scheduler: Scheduler<'_, Cell<bool>> = Scheduler::new(SchedulerPolicy::PriorityBased);
//! scheduler
//!     .register(&blink, &led, TaskParams::new(0, 500).with_priority(TaskPriority::HIGH))
//!     .unwrap();
//!
//! scheduler.tick();
//! assert!(led.get());
//! ```

#![cfg_attr(not(test), no_std)]

pub mod arch;
pub mod config;
pub mod error;
pub mod logger;
pub mod policy;
pub mod scheduler;
pub mod sync;
pub mod table;
pub mod task;

pub use config::{SchedulerConfig, MAX_TASKS};
pub use error::{Error, Result};
pub use policy::{Dispatch, PriorityBased, RoundRobin, SchedulerPolicy, TickReport};
pub use scheduler::{Scheduler, TickSource};
pub use sync::{Never, StopFlag, StopSignal};
pub use table::TaskTable;
pub use task::{TaskCallback, TaskId, TaskParams, TaskPriority, TaskRecord};
