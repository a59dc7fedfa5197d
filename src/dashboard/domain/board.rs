//! Tab projection of the synchronized task collection.

use super::{Bounty, Submission, Task, TaskLifecycle, TaskStatus};

/// A task together with its display badge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskCard {
    task: Task,
    lifecycle: TaskLifecycle,
}

impl TaskCard {
    /// Classifies `task` at `now` and wraps it for display.
    #[must_use]
    pub fn new(task: Task, now: u64) -> Self {
        let lifecycle = TaskLifecycle::classify(&task, now);
        Self { task, lifecycle }
    }

    /// Returns the underlying task.
    #[must_use]
    pub const fn task(&self) -> &Task {
        &self.task
    }

    /// Returns the lifecycle badge.
    #[must_use]
    pub const fn lifecycle(&self) -> TaskLifecycle {
        self.lifecycle
    }

    /// Returns submissions the owner may still approve.
    ///
    /// Empty unless the task is open.
    #[must_use]
    pub fn approvable_submissions(&self) -> Vec<&Submission> {
        if !self.task.status().is_open() {
            return Vec::new();
        }
        self.task.pending_submissions().collect()
    }

    /// Returns `true` when the dashboard offers a cancel action.
    ///
    /// This is a display hint only. Whether a cancellation succeeds is
    /// decided by the ledger.
    #[must_use]
    pub fn cancel_offered(&self) -> bool {
        self.task.status().is_open() && self.task.submissions().is_empty()
    }
}

/// Tasks partitioned into the active, completed and cancelled tabs.
///
/// Partitioning follows ledger flags only. Expired tasks stay in the active
/// tab with an [`TaskLifecycle::Expired`] badge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskBoard {
    active: Vec<TaskCard>,
    completed: Vec<TaskCard>,
    cancelled: Vec<TaskCard>,
}

impl TaskBoard {
    /// Partitions `tasks` at `now`, preserving input order within each tab.
    #[must_use]
    pub fn partition(tasks: &[Task], now: u64) -> Self {
        let mut board = Self::default();
        for task in tasks {
            let card = TaskCard::new(task.clone(), now);
            match task.status() {
                TaskStatus::Open => board.active.push(card),
                TaskStatus::Completed => board.completed.push(card),
                TaskStatus::Cancelled => board.cancelled.push(card),
            }
        }
        board
    }

    /// Returns open tasks, including expired ones.
    #[must_use]
    pub fn active(&self) -> &[TaskCard] {
        &self.active
    }

    /// Returns completed tasks.
    #[must_use]
    pub fn completed(&self) -> &[TaskCard] {
        &self.completed
    }

    /// Returns cancelled tasks.
    #[must_use]
    pub fn cancelled(&self) -> &[TaskCard] {
        &self.cancelled
    }

    /// Returns the number of tasks across all tabs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.active.len() + self.completed.len() + self.cancelled.len()
    }

    /// Returns `true` when no tab holds a task.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the total bounty still escrowed by open tasks.
    #[must_use]
    pub fn escrowed_total(&self) -> Bounty {
        self.active
            .iter()
            .fold(Bounty::ZERO, |total, card| {
                total.saturating_add(card.task().bounty())
            })
    }
}
