//! Caller-clocked task scheduler.
//!
//! The scheduler holds at most one pending task per [`TaskKind`].
//! Scheduling a kind that is already pending replaces it, which makes
//! cancellation races impossible: a stale deadline can never fire
//! after its kind was rescheduled or cancelled.
//!
//! Nothing here spawns threads or reads the wall clock. The host
//! passes `Instant`s in, asks for [`next_deadline`], sleeps however it
//! likes, and drains due tasks with [`pop_due`].
//!
//! [`next_deadline`]: Scheduler::next_deadline
//! [`pop_due`]: Scheduler::pop_due

use std::collections::HashMap;
use std::time::{Duration, Instant};

/// The kinds of scheduled work a clock host dispatches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    /// Once-a-second clock advance.
    Tick,
    /// Restore the display mid blink cycle.
    BlinkRestore,
    /// Start the next blink cycle.
    BlinkCycle,
    /// A pressed button crossed the hold threshold.
    HoldThreshold,
    /// The next auto-repeat step of a held button.
    HoldRepeat,
}

/// Identity of one scheduled instance of a task.
///
/// Comparing the id returned by [`Scheduler::schedule`] against
/// [`Scheduler::pending_id`] distinguishes a live deadline from a
/// superseded one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(u64);

#[derive(Debug, Clone, Copy)]
struct Entry {
    due: Instant,
    id: u64,
}

/// One-slot-per-kind deadline table.
#[derive(Debug, Default)]
pub struct Scheduler {
    pending: HashMap<TaskKind, Entry>,
    next_id: u64,
}

impl Scheduler {
    /// Create an empty scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `kind` to fire `delay` after `now`, replacing any
    /// pending instance of the same kind.
    pub fn schedule(&mut self, kind: TaskKind, now: Instant, delay: Duration) -> TaskId {
        self.next_id += 1;
        let id = self.next_id;
        self.pending.insert(kind, Entry { due: now + delay, id });
        TaskId(id)
    }

    /// Cancel the pending instance of `kind`, if any. Returns whether
    /// something was cancelled.
    pub fn cancel(&mut self, kind: TaskKind) -> bool {
        self.pending.remove(&kind).is_some()
    }

    /// Cancel everything.
    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    /// Whether `kind` has a pending deadline.
    pub fn is_scheduled(&self, kind: TaskKind) -> bool {
        self.pending.contains_key(&kind)
    }

    /// Id of the pending instance of `kind`, if any. A handle from an
    /// earlier [`schedule`](Self::schedule) call is live exactly when
    /// it equals this.
    pub fn pending_id(&self, kind: TaskKind) -> Option<TaskId> {
        self.pending.get(&kind).map(|entry| TaskId(entry.id))
    }

    /// The earliest pending deadline, if any. Hosts sleep until this.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.values().map(|entry| entry.due).min()
    }

    /// Remove and return every task due at or before `now`, ordered
    /// by deadline then by scheduling order.
    pub fn pop_due(&mut self, now: Instant) -> Vec<TaskKind> {
        let mut due: Vec<(TaskKind, Entry)> = self
            .pending
            .iter()
            .filter(|(_, entry)| entry.due <= now)
            .map(|(kind, entry)| (*kind, *entry))
            .collect();
        due.sort_by_key(|(_, entry)| (entry.due, entry.id));
        for (kind, _) in &due {
            self.pending.remove(kind);
        }
        due.into_iter().map(|(kind, _)| kind).collect()
    }
}
