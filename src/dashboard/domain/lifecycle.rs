//! Display lifecycle classification.

use super::{Task, TaskStatus};
use serde::{Deserialize, Serialize};

/// Lifecycle badge shown for a task.
///
/// The badge is derived on every projection and never stored, so a task can
/// move from `Active` to `Expired` without any ledger write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskLifecycle {
    /// Open and before its deadline.
    Active,
    /// Settled by an approved submission.
    Completed,
    /// Cancelled by the owner.
    Cancelled,
    /// Open but past its deadline.
    Expired,
}

impl TaskLifecycle {
    /// Classifies `task` at `now`, in seconds since the Unix epoch.
    ///
    /// Ledger settlement wins over the deadline: a completed task whose
    /// deadline has passed is still `Completed`.
    #[must_use]
    pub const fn classify(task: &Task, now: u64) -> Self {
        match task.status() {
            TaskStatus::Completed => Self::Completed,
            TaskStatus::Cancelled => Self::Cancelled,
            TaskStatus::Open if now > task.deadline() => Self::Expired,
            TaskStatus::Open => Self::Active,
        }
    }

    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Expired => "expired",
        }
    }
}
