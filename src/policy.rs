//! # Dispatch Policies
//!
//! The two scheduling policies, each a [`Dispatch`] strategy, and the closed
//! [`SchedulerPolicy`] variant the facade selects at construction.
//!
//! ## Per-tick Algorithms
//!
//! **Round-robin** — every eligible task runs, in slot order:
//! 1. For each active record: if eligible, run it and re-arm with its period
//! 2. Consume one tick of its countdown
//!
//! **Priority-based** — at most one task runs:
//! 1. Among eligible records pick the lowest priority value, ties to the
//!    lowest slot index
//! 2. Run it and re-arm with its period
//! 3. Consume one tick of every pending countdown
//!
//! Eligible tasks that lose the selection keep a zero countdown and compete
//! again next tick. A higher-priority task that is eligible every tick
//! therefore starves everything below it; this is intended behavior.

use core::fmt;

use log::trace;

use crate::error::Error;
use crate::table::TaskTable;
use crate::task::TaskId;

/// Ids of the tasks executed during one tick, in execution order.
pub type TickReport<const N: usize> = heapless::Vec<TaskId, N>;

/// One scheduling policy: a single pass over the table for one tick.
pub trait Dispatch {
    fn dispatch<C: ?Sized, const N: usize>(
        &self,
        table: &mut TaskTable<'_, C, N>,
        report: &mut TickReport<N>,
    );
}

// ---------------------------------------------------------------------------
// Round-robin
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default)]
pub struct RoundRobin;

impl Dispatch for RoundRobin {
    fn dispatch<C: ?Sized, const N: usize>(
        &self,
        table: &mut TaskTable<'_, C, N>,
        report: &mut TickReport<N>,
    ) {
        for (id, record) in table.iter_mut() {
            if record.is_eligible() {
                trace!("round-robin: running {id}");
                record.execute();
                report.push(id).ok();
            }
            record.elapse();
        }
    }
}

// ---------------------------------------------------------------------------
// Priority-based
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default)]
pub struct PriorityBased;

impl PriorityBased {
    /// Eligible task with the lowest priority value, lowest slot on ties.
    pub fn select<C: ?Sized, const N: usize>(table: &TaskTable<'_, C, N>) -> Option<TaskId> {
        table
            .iter()
            .filter(|(_, record)| record.is_eligible())
            .min_by_key(|(id, record)| (record.priority(), *id))
            .map(|(id, _)| id)
    }
}

impl Dispatch for PriorityBased {
    fn dispatch<C: ?Sized, const N: usize>(
        &self,
        table: &mut TaskTable<'_, C, N>,
        report: &mut TickReport<N>,
    ) {
        if let Some(id) = Self::select(table) {
            if let Some(record) = table.get_mut(id) {
                trace!("priority: running {id} (priority {})", record.priority().0);
                record.execute();
                report.push(id).ok();
            }
        }

        for (_, record) in table.iter_mut() {
            record.elapse();
        }
    }
}

// ---------------------------------------------------------------------------
// Policy selector
// ---------------------------------------------------------------------------

/// Scheduling policy, fixed for the lifetime of a scheduler.
///
/// Raw ids follow declaration order: `0` round-robin, `1` priority-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum SchedulerPolicy {
    #[default]
    RoundRobin = 0,
    PriorityBased = 1,
}

impl Dispatch for SchedulerPolicy {
    #[inline]
    fn dispatch<C: ?Sized, const N: usize>(
        &self,
        table: &mut TaskTable<'_, C, N>,
        report: &mut TickReport<N>,
    ) {
        match self {
            SchedulerPolicy::RoundRobin => RoundRobin.dispatch(table, report),
            SchedulerPolicy::PriorityBased => PriorityBased.dispatch(table, report),
        }
    }
}

impl TryFrom<u8> for SchedulerPolicy {
    type Error = Error;

    fn try_from(id: u8) -> Result<Self, Error> {
        match id {
            0 => Ok(SchedulerPolicy::RoundRobin),
            1 => Ok(SchedulerPolicy::PriorityBased),
            other => Err(Error::UnsupportedSchedulerPolicy(other)),
        }
    }
}

impl fmt::Display for SchedulerPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchedulerPolicy::RoundRobin => f.write_str("round-robin"),
            SchedulerPolicy::PriorityBased => f.write_str("priority-based"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{TaskParams, TaskPriority};
    use core::cell::RefCell;

    type Log = RefCell<Vec<&'static str>>;

    fn log_a(log: &Log) {
        log.borrow_mut().push("a");
    }

    fn log_b(log: &Log) {
        log.borrow_mut().push("b");
    }

    #[test]
    fn test_policy_ids() {
        assert_eq!(SchedulerPolicy::try_from(0), Ok(SchedulerPolicy::RoundRobin));
        assert_eq!(SchedulerPolicy::try_from(1), Ok(SchedulerPolicy::PriorityBased));
        assert_eq!(
            SchedulerPolicy::try_from(2),
            Err(Error::UnsupportedSchedulerPolicy(2))
        );
        assert_eq!(SchedulerPolicy::default(), SchedulerPolicy::RoundRobin);
    }

    #[test]
    fn test_round_robin_runs_all_eligible_in_slot_order() {
        let log = Log::default();
        let mut table: TaskTable<'_, Log, 4> = TaskTable::new();
        table
            .register(&log_b, &log, TaskParams::new(0, 5).with_priority(TaskPriority::LOW))
            .unwrap();
        table
            .register(&log_a, &log, TaskParams::new(0, 5).with_priority(TaskPriority::HIGH))
            .unwrap();

        let mut report = TickReport::new();
        RoundRobin.dispatch(&mut table, &mut report);

        assert_eq!(*log.borrow(), ["b", "a"]);
        assert_eq!(report.as_slice(), [TaskId(0), TaskId(1)]);
        // Re-armed to 5, then one tick consumed
        assert_eq!(table.get(TaskId(0)).unwrap().countdown(), 4);
    }

    #[test]
    fn test_priority_selects_lowest_value_then_lowest_slot() {
        let log = Log::default();
        let mut table: TaskTable<'_, Log, 4> = TaskTable::new();
        table
            .register(&log_b, &log, TaskParams::new(0, 3).with_priority(TaskPriority::LOW))
            .unwrap();
        table
            .register(&log_a, &log, TaskParams::new(0, 3).with_priority(TaskPriority::MEDIUM))
            .unwrap();
        table
            .register(&log_b, &log, TaskParams::new(0, 3).with_priority(TaskPriority::MEDIUM))
            .unwrap();

        assert_eq!(PriorityBased::select(&table), Some(TaskId(1)));

        let mut report = TickReport::new();
        PriorityBased.dispatch(&mut table, &mut report);
        assert_eq!(*log.borrow(), ["a"]);
        assert_eq!(report.as_slice(), [TaskId(1)]);

        // Losers stay eligible; the winner is re-armed and already elapsed
        assert_eq!(table.get(TaskId(0)).unwrap().countdown(), 0);
        assert_eq!(table.get(TaskId(1)).unwrap().countdown(), 2);
        assert_eq!(table.get(TaskId(2)).unwrap().countdown(), 0);
        assert_eq!(PriorityBased::select(&table), Some(TaskId(2)));
    }

    #[test]
    fn test_priority_with_nothing_eligible_only_counts_down() {
        let log = Log::default();
        let mut table: TaskTable<'_, Log, 2> = TaskTable::new();
        table.register(&log_a, &log, TaskParams::new(2, 1)).unwrap();

        let mut report = TickReport::new();
        PriorityBased.dispatch(&mut table, &mut report);

        assert!(report.is_empty());
        assert!(log.borrow().is_empty());
        assert_eq!(table.get(TaskId(0)).unwrap().countdown(), 1);
    }
}
