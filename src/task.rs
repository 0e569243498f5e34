//! # Task Record
//!
//! Defines the unit of schedulable work: a callback, the context it is
//! handed on every run, and the countdown state the dispatchers maintain.
//!
//! ## Countdown Model
//!
//! `countdown` is the number of ticks left, measured at the start of a tick,
//! before the task becomes eligible. A dispatch consumes one tick of every
//! pending countdown, including one re-armed during that same dispatch:
//!
//! ```text
//!   tick:        d        d+1   ...   d+p
//!   countdown:   0 ─run─► p ─► p-1 ... 0 ─run─► p ...
//!                         └ elapse ┘
//! ```
//!
//! so a task registered with delay `d` and period `p > 0` runs at
//! `d, d+p, d+2p, ...`. Periods 0 and 1 both mean "every tick".

use core::fmt;

// ---------------------------------------------------------------------------
// Identity and priority
// ---------------------------------------------------------------------------

/// Slot index assigned at registration. Permanent for the task's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(pub(crate) usize);

impl TaskId {
    /// Id for slot `index`. Lookups with an id that was never registered
    /// simply find nothing.
    pub const fn from_index(index: usize) -> Self {
        Self(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task#{}", self.0)
    }
}

/// Task priority (lower number = higher precedence).
///
/// Only consulted by the priority-based policy. Values between the named
/// levels are allowed for applications needing finer ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskPriority(pub u8);

impl TaskPriority {
    pub const HIGH: TaskPriority = TaskPriority(0);
    pub const MEDIUM: TaskPriority = TaskPriority(1);
    pub const LOW: TaskPriority = TaskPriority(2);
    /// Default for tasks registered without an explicit priority. Ranks
    /// below every other value.
    pub const LOWEST: TaskPriority = TaskPriority(u8::MAX);
}

impl Default for TaskPriority {
    fn default() -> Self {
        Self::LOWEST
    }
}

// ---------------------------------------------------------------------------
// Callback capability
// ---------------------------------------------------------------------------

/// Work executed by the scheduler each time a task becomes eligible.
///
/// The scheduler never inspects `context`; it only hands it back. Callbacks
/// must be short and must not block, since nothing else runs (not even the
/// tick clock) until they return. State shared between tasks goes through
/// interior mutability in the context (`Cell`, `RefCell`).
pub trait TaskCallback<C: ?Sized> {
    fn call(&self, context: &C);
}

impl<C: ?Sized, F> TaskCallback<C> for F
where
    F: Fn(&C),
{
    #[inline]
    fn call(&self, context: &C) {
        self(context)
    }
}

// ---------------------------------------------------------------------------
// Registration parameters
// ---------------------------------------------------------------------------

/// Timing and priority a task is registered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskParams {
    /// Ticks before the first run.
    pub initial_delay: u32,
    /// Countdown re-armed after every run.
    pub period: u32,
    pub priority: TaskPriority,
}

impl TaskParams {
    /// Parameters with the default priority, [`TaskPriority::LOWEST`].
    pub const fn new(initial_delay: u32, period: u32) -> Self {
        Self {
            initial_delay,
            period,
            priority: TaskPriority::LOWEST,
        }
    }

    pub const fn with_priority(self, priority: TaskPriority) -> Self {
        Self { priority, ..self }
    }
}

// ---------------------------------------------------------------------------
// Task record
// ---------------------------------------------------------------------------

/// One occupied slot of the task table.
pub struct TaskRecord<'a, C: ?Sized> {
    callback: &'a dyn TaskCallback<C>,
    context: &'a C,
    countdown: u32,
    period: u32,
    priority: TaskPriority,
    runs: u32,
}

impl<'a, C: ?Sized> TaskRecord<'a, C> {
    pub fn new(callback: &'a dyn TaskCallback<C>, context: &'a C, params: TaskParams) -> Self {
        Self {
            callback,
            context,
            countdown: params.initial_delay,
            period: params.period,
            priority: params.priority,
            runs: 0,
        }
    }

    #[inline]
    pub fn countdown(&self) -> u32 {
        self.countdown
    }

    #[inline]
    pub fn period(&self) -> u32 {
        self.period
    }

    #[inline]
    pub fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Number of times the callback has been invoked (wraps on overflow).
    #[inline]
    pub fn runs(&self) -> u32 {
        self.runs
    }

    /// Context handed to the callback. Shared with the registrant.
    #[inline]
    pub fn context(&self) -> &'a C {
        self.context
    }

    /// True when the countdown has reached zero on the current tick.
    #[inline]
    pub fn is_eligible(&self) -> bool {
        self.countdown == 0
    }

    /// Invoke the callback and re-arm the countdown with the period.
    pub(crate) fn execute(&mut self) {
        self.callback.call(self.context);
        self.countdown = self.period;
        self.runs = self.runs.wrapping_add(1);
    }

    /// Consume one tick of a pending countdown. Eligible tasks stay eligible.
    #[inline]
    pub(crate) fn elapse(&mut self) {
        if self.countdown > 0 {
            self.countdown -= 1;
        }
    }
}

impl<C: ?Sized> fmt::Debug for TaskRecord<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskRecord")
            .field("countdown", &self.countdown)
            .field("period", &self.period)
            .field("priority", &self.priority)
            .field("runs", &self.runs)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Unit tests (host-only)
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    fn bump(counter: &Cell<u32>) {
        counter.set(counter.get() + 1);
    }

    #[test]
    fn test_record_initialization() {
        let counter = Cell::new(0);
        let record = TaskRecord::new(&bump, &counter, TaskParams::new(3, 10));

        assert_eq!(record.countdown(), 3);
        assert_eq!(record.period(), 10);
        assert_eq!(record.priority(), TaskPriority::LOWEST);
        assert_eq!(record.runs(), 0);
        assert!(!record.is_eligible());
    }

    #[test]
    fn test_execute_rearms_countdown() {
        let counter = Cell::new(0);
        let mut record = TaskRecord::new(&bump, &counter, TaskParams::new(0, 4));

        assert!(record.is_eligible());
        record.execute();
        assert_eq!(counter.get(), 1);
        assert_eq!(record.countdown(), 4);
        assert_eq!(record.runs(), 1);
    }

    #[test]
    fn test_elapse_saturates_at_zero() {
        let counter = Cell::new(0);
        let mut record = TaskRecord::new(&bump, &counter, TaskParams::new(1, 1));

        record.elapse();
        assert_eq!(record.countdown(), 0);
        record.elapse();
        assert_eq!(record.countdown(), 0);
        assert_eq!(counter.get(), 0);
    }

    #[test]
    fn test_priority_ordering() {
        assert!(TaskPriority::HIGH < TaskPriority::MEDIUM);
        assert!(TaskPriority::MEDIUM < TaskPriority::LOW);
        assert!(TaskPriority::LOW < TaskPriority::LOWEST);
        assert_eq!(TaskPriority::default(), TaskPriority::LOWEST);
        assert!(TaskPriority(254) < TaskPriority::default());

        let params = TaskParams::new(0, 1).with_priority(TaskPriority::HIGH);
        assert_eq!(params.priority, TaskPriority::HIGH);
    }

    #[test]
    fn test_closure_callback_sees_context() {
        let seen = Cell::new(0u32);
        let offset = 40;
        let add = move |c: &Cell<u32>| c.set(c.get() + offset + 2);
        let mut record = TaskRecord::new(&add, &seen, TaskParams::new(0, 0));

        record.execute();
        assert_eq!(seen.get(), 42);
        assert!(record.is_eligible());
    }
}
