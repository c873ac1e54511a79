//! Virtual-clock cooperative scheduler.
//!
//! Stands in for browser `setInterval` / `setTimeout`. Nothing runs on its
//! own: the driver calls [`Scheduler::pop_due`] while advancing the clock
//! and routes each fired task to its owner. Cancellation is synchronous, so
//! a cancelled task can never fire afterwards.

use std::time::Duration;

use rustc_hash::FxHashMap;

use crate::core::PlayerId;

/// Handle for a scheduled task.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(pub u64);

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Task({})", self.0)
    }
}

/// What a task does when it fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TaskKind {
    /// One countdown step. Repeats every tick.
    CountdownTick,
    /// Leave the feedback screen. Fires once.
    AdvanceRound,
}

#[derive(Clone, Debug)]
struct Entry {
    owner: PlayerId,
    kind: TaskKind,
    due: Duration,
    interval: Option<Duration>,
}

/// A task that came due.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FiredTask {
    pub id: TaskId,
    pub owner: PlayerId,
    pub kind: TaskKind,
    /// Virtual time at which it fired.
    pub at: Duration,
}

/// Single-threaded timer queue on a virtual clock.
#[derive(Clone, Debug, Default)]
pub struct Scheduler {
    now: Duration,
    next_id: u64,
    tasks: FxHashMap<TaskId, Entry>,
}

impl Scheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Fire `kind` once after `delay`.
    pub fn schedule_once(&mut self, owner: PlayerId, kind: TaskKind, delay: Duration) -> TaskId {
        self.insert(owner, kind, delay, None)
    }

    /// Fire `kind` every `interval`, starting one interval from now.
    pub fn schedule_repeating(&mut self, owner: PlayerId, kind: TaskKind, interval: Duration) -> TaskId {
        assert!(!interval.is_zero(), "repeating interval must be non-zero");
        self.insert(owner, kind, interval, Some(interval))
    }

    fn insert(
        &mut self,
        owner: PlayerId,
        kind: TaskKind,
        delay: Duration,
        interval: Option<Duration>,
    ) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.tasks.insert(
            id,
            Entry {
                owner,
                kind,
                due: self.now + delay,
                interval,
            },
        );
        id
    }

    /// Cancel a task. Returns false if it had already fired (one-shot) or
    /// was never scheduled.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        self.tasks.remove(&id).is_some()
    }

    /// Cancel every task owned by `owner`.
    pub fn cancel_owner(&mut self, owner: PlayerId) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|_, entry| entry.owner != owner);
        before - self.tasks.len()
    }

    #[must_use]
    pub fn is_scheduled(&self, id: TaskId) -> bool {
        self.tasks.contains_key(&id)
    }

    /// Number of live tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Number of live tasks owned by `owner`.
    #[must_use]
    pub fn owned_by(&self, owner: PlayerId) -> usize {
        self.tasks.values().filter(|e| e.owner == owner).count()
    }

    /// Pop the earliest task due at or before `until`, moving the clock to
    /// its due time. Ties break by id, i.e. scheduling order. Repeating
    /// tasks are re-armed one interval later.
    pub fn pop_due(&mut self, until: Duration) -> Option<FiredTask> {
        let (&id, _) = self
            .tasks
            .iter()
            .filter(|(_, entry)| entry.due <= until)
            .min_by_key(|(id, entry)| (entry.due, **id))?;

        let entry = self.tasks.get_mut(&id)?;
        let fired = FiredTask {
            id,
            owner: entry.owner,
            kind: entry.kind,
            at: entry.due,
        };
        match entry.interval {
            Some(interval) => entry.due += interval,
            None => {
                self.tasks.remove(&id);
            }
        }

        self.now = self.now.max(fired.at);
        Some(fired)
    }

    /// Move the clock forward without firing anything.
    ///
    /// Callers drain [`Scheduler::pop_due`] up to `until` first.
    pub fn settle(&mut self, until: Duration) {
        debug_assert!(
            self.tasks.values().all(|e| e.due > until),
            "settling past undrained tasks"
        );
        self.now = self.now.max(until);
    }
}
