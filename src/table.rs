//! # Task Table
//!
//! Fixed-capacity arena of task records addressed by slot index. A slot is
//! either empty (`None`) or holds an active record; registration is
//! first-fit over empty slots and permanent, as tasks are never removed.

use log::{debug, warn};

use crate::config::MAX_TASKS;
use crate::error::{Error, Result};
use crate::task::{TaskCallback, TaskId, TaskParams, TaskRecord};

pub struct TaskTable<'a, C: ?Sized, const N: usize = MAX_TASKS> {
    slots: [Option<TaskRecord<'a, C>>; N],
}

impl<'a, C: ?Sized, const N: usize> TaskTable<'a, C, N> {
    pub const fn new() -> Self {
        Self {
            slots: [const { None }; N],
        }
    }

    /// Install a task in the first empty slot.
    ///
    /// # Returns
    /// - `Ok(id)` — the slot the task now permanently occupies
    /// - `Err(Error::TaskTableFull)` — every slot is active; nothing changed
    pub fn register(
        &mut self,
        callback: &'a dyn TaskCallback<C>,
        context: &'a C,
        params: TaskParams,
    ) -> Result<TaskId> {
        let Some(index) = self.slots.iter().position(Option::is_none) else {
            warn!("task table full, rejecting registration ({} slots)", N);
            return Err(Error::TaskTableFull { capacity: N });
        };

        self.slots[index] = Some(TaskRecord::new(callback, context, params));
        debug!(
            "registered task#{index}: delay={} period={} priority={}",
            params.initial_delay, params.period, params.priority.0
        );
        Ok(TaskId(index))
    }

    pub fn get(&self, id: TaskId) -> Option<&TaskRecord<'a, C>> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    /// Active records in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (TaskId, &TaskRecord<'a, C>)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|record| (TaskId(i), record)))
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = (TaskId, &mut TaskRecord<'a, C>)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_mut().map(|record| (TaskId(i), record)))
    }

    pub(crate) fn get_mut(&mut self, id: TaskId) -> Option<&mut TaskRecord<'a, C>> {
        self.slots.get_mut(id.0).and_then(Option::as_mut)
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }

    pub fn is_full(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }
}

impl<C: ?Sized, const N: usize> Default for TaskTable<'_, C, N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskPriority;

    fn noop(_: &()) {}

    #[test]
    fn test_register_fills_slots_in_order() {
        let mut table: TaskTable<'_, ()> = TaskTable::new();
        assert_eq!(table.capacity(), MAX_TASKS);
        assert_eq!(table.active_count(), 0);

        for expected in 0..MAX_TASKS {
            let id = table.register(&noop, &(), TaskParams::new(0, 1)).unwrap();
            assert_eq!(id.index(), expected);
        }
        assert!(table.is_full());
        assert_eq!(table.active_count(), MAX_TASKS);
    }

    #[test]
    fn test_full_table_rejects_without_side_effects() {
        let mut table: TaskTable<'_, (), 2> = TaskTable::new();
        table.register(&noop, &(), TaskParams::new(1, 5)).unwrap();
        table.register(&noop, &(), TaskParams::new(2, 6)).unwrap();

        let err = table
            .register(&noop, &(), TaskParams::new(9, 9).with_priority(TaskPriority::HIGH))
            .unwrap_err();
        assert_eq!(err, Error::TaskTableFull { capacity: 2 });

        let snapshot: Vec<_> = table
            .iter()
            .map(|(id, r)| (id.index(), r.countdown(), r.period(), r.priority()))
            .collect();
        assert_eq!(
            snapshot,
            [(0, 1, 5, TaskPriority::LOWEST), (1, 2, 6, TaskPriority::LOWEST)]
        );
    }

    #[test]
    fn test_default_table_hands_back_registered_context() {
        let context = 7u32;
        let callback = |_: &u32| {};
        let mut table: TaskTable<'_, u32, 2> = TaskTable::default();
        assert_eq!(table.active_count(), 0);

        let id = table.register(&callback, &context, TaskParams::new(0, 1)).unwrap();
        let record = table.get(id).unwrap();
        assert!(core::ptr::eq(record.context(), &context));
        assert_eq!(*record.context(), 7);
    }

    #[test]
    fn test_get_out_of_range_is_none() {
        let mut table: TaskTable<'_, (), 3> = TaskTable::new();
        let id = table.register(&noop, &(), TaskParams::new(4, 2)).unwrap();

        assert_eq!(table.get(id).map(TaskRecord::countdown), Some(4));
        assert!(table.get(TaskId(1)).is_none());
        assert!(table.get(TaskId(7)).is_none());
    }
}
