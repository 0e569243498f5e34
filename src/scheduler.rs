//! # Scheduler
//!
//! The facade tying the task table to a dispatch policy and an external
//! tick. Non-preemptive and run-to-completion: each tick invokes exactly one
//! dispatcher pass, and every callback it starts finishes before the next.
//!
//! ## Tick Loop
//!
//! ```text
//! run(ticks, stop)
//!   loop
//!     ├─► stop.should_stop()?  ── yes ──► return ticks dispatched
//!     ├─► tick()               ← policy.dispatch(table)
//!     └─► ticks.wait_tick()    ← injected delay primitive (SysTick, mock, ...)
//! ```
//!
//! The stop signal is polled only at tick boundaries, so it never splits a
//! dispatch pass.

use log::info;

use crate::config::MAX_TASKS;
use crate::error::Result;
use crate::policy::{Dispatch, SchedulerPolicy, TickReport};
use crate::sync::StopSignal;
use crate::table::TaskTable;
use crate::task::{TaskCallback, TaskId, TaskParams, TaskRecord};

// ---------------------------------------------------------------------------
// Tick source
// ---------------------------------------------------------------------------

/// Blocks the caller for one scheduler tick.
///
/// Supplied by the host: [`crate::arch::cortex_m4::SysTickSource`] on
/// hardware, a scripted source in tests.
pub trait TickSource {
    fn wait_tick(&mut self);
}

impl<T: TickSource + ?Sized> TickSource for &mut T {
    #[inline]
    fn wait_tick(&mut self) {
        (**self).wait_tick()
    }
}

// ---------------------------------------------------------------------------
// Scheduler struct
// ---------------------------------------------------------------------------

/// Task table plus the policy chosen at construction.
///
/// `C` is the context type handed to every callback; `N` the table capacity.
pub struct Scheduler<'a, C: ?Sized, const N: usize = MAX_TASKS> {
    table: TaskTable<'a, C, N>,
    policy: SchedulerPolicy,
    tick_count: u64,
}

impl<'a, C: ?Sized, const N: usize> Scheduler<'a, C, N> {
    pub const fn new(policy: SchedulerPolicy) -> Self {
        Self {
            table: TaskTable::new(),
            policy,
            tick_count: 0,
        }
    }

    /// Build a scheduler from a raw policy id (`0` round-robin, `1`
    /// priority-based).
    ///
    /// # Errors
    /// [`crate::Error::UnsupportedSchedulerPolicy`] for any other id.
    pub fn from_policy_id(id: u8) -> Result<Self> {
        SchedulerPolicy::try_from(id).map(Self::new)
    }

    /// Register a task. See [`TaskTable::register`].
    ///
    /// Takes `&mut self`, so tasks are added before `run` or between
    /// `tick`/`run` calls; a callback cannot register another task.
    pub fn register(
        &mut self,
        callback: &'a dyn TaskCallback<C>,
        context: &'a C,
        params: TaskParams,
    ) -> Result<TaskId> {
        self.table.register(callback, context, params)
    }

    #[inline]
    pub fn policy(&self) -> SchedulerPolicy {
        self.policy
    }

    pub fn table(&self) -> &TaskTable<'a, C, N> {
        &self.table
    }

    pub fn task(&self, id: TaskId) -> Option<&TaskRecord<'a, C>> {
        self.table.get(id)
    }

    /// Active tasks in slot order.
    pub fn tasks(&self) -> impl Iterator<Item = (TaskId, &TaskRecord<'a, C>)> {
        self.table.iter()
    }

    pub fn active_count(&self) -> usize {
        self.table.active_count()
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    pub fn is_full(&self) -> bool {
        self.table.is_full()
    }

    /// Ticks dispatched so far.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Run one dispatcher pass under the configured policy.
    ///
    /// # Returns
    /// The tasks executed during this tick, in execution order.
    pub fn tick(&mut self) -> TickReport<N> {
        let mut report = TickReport::new();
        self.policy.dispatch(&mut self.table, &mut report);
        self.tick_count += 1;
        report
    }

    /// Drive the tick loop until `stop` is raised.
    ///
    /// # Returns
    /// The number of ticks dispatched by this call.
    pub fn run<T, S>(&mut self, ticks: &mut T, stop: &S) -> u64
    where
        T: TickSource + ?Sized,
        S: StopSignal + ?Sized,
    {
        info!(
            "scheduler started: policy={} tasks={}/{}",
            self.policy,
            self.active_count(),
            N
        );

        let mut dispatched = 0u64;
        while !stop.should_stop() {
            self.tick();
            ticks.wait_tick();
            dispatched += 1;
        }

        info!("scheduler stopped after {dispatched} ticks");
        dispatched
    }

    /// Drive the tick loop forever. **Does not return.**
    pub fn run_forever<T>(&mut self, ticks: &mut T) -> !
    where
        T: TickSource + ?Sized,
    {
        info!(
            "scheduler started: policy={} tasks={}/{}",
            self.policy,
            self.active_count(),
            N
        );

        loop {
            self.tick();
            ticks.wait_tick();
        }
    }
}

// ---------------------------------------------------------------------------
// Unit tests (host-only)
// ---------------------------------------------------------------------------
