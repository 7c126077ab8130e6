use std::time::Duration;

/// Work the session defers until later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deferred {
    /// Score the player's full selection.
    ScoreSelection,
    AiTurn,
    /// One second of the turn countdown.
    TimerTick,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(u64);

/// Single-shot deferred tasks against a clock the caller drives.
pub trait Scheduler {
    fn now(&self) -> Duration;

    fn after(&mut self, delay: Duration, task: Deferred) -> TaskId;

    /// Returns whether the task was still pending.
    fn cancel(&mut self, id: TaskId) -> bool;

    fn cancel_all(&mut self);

    /// Removes the earliest task due at or before `deadline` and moves the
    /// clock to its due time. Tasks due at the same instant come out in the
    /// order they were scheduled.
    fn pop_due(&mut self, deadline: Duration) -> Option<Deferred>;

    /// Moves the clock forward to `deadline` without running anything.
    fn advance_to(&mut self, deadline: Duration);

    fn pending(&self) -> usize;
}

#[derive(Debug, Clone)]
struct Entry {
    due: Duration,
    id: TaskId,
    task: Deferred,
}

/// Virtual-clock scheduler. Tests advance it by exact amounts; the terminal
/// front-ends advance it by measured wall time.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    now: Duration,
    next_id: u64,
    queue: Vec<Entry>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time until the next task is due, if any is pending.
    pub fn next_due_in(&self) -> Option<Duration> {
        self.queue
            .iter()
            .map(|entry| entry.due.saturating_sub(self.now))
            .min()
    }

    pub fn is_scheduled(&self, task: Deferred) -> bool {
        self.queue.iter().any(|entry| entry.task == task)
    }
}

impl Scheduler for ManualScheduler {
    fn now(&self) -> Duration {
        self.now
    }

    fn after(&mut self, delay: Duration, task: Deferred) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.queue.push(Entry {
            due: self.now + delay,
            id,
            task,
        });
        id
    }

    fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.queue.len();
        self.queue.retain(|entry| entry.id != id);
        self.queue.len() != before
    }

    fn cancel_all(&mut self) {
        self.queue.clear();
    }

    fn pop_due(&mut self, deadline: Duration) -> Option<Deferred> {
        let idx = self
            .queue
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.due <= deadline)
            .min_by_key(|(_, entry)| (entry.due, entry.id))
            .map(|(idx, _)| idx)?;
        let entry = self.queue.remove(idx);
        if entry.due > self.now {
            self.now = entry.due;
        }
        Some(entry.task)
    }

    fn advance_to(&mut self, deadline: Duration) {
        if deadline > self.now {
            self.now = deadline;
        }
    }

    fn pending(&self) -> usize {
        self.queue.len()
    }
}
