//! User-facing notifications emitted by the dashboard service.

use crate::dashboard::domain::TaskId;
use alloy_primitives::TxHash;
use std::fmt;

/// Owner action driven against the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationAction {
    /// Approve a freelancer submission.
    Approve,
    /// Cancel a task.
    Cancel,
}

impl MutationAction {
    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Cancel => "cancel",
        }
    }
}

impl fmt::Display for MutationAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a refresh or mutation, ready for toast-style display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardNotice {
    /// The task collection was resynchronized.
    Refreshed {
        /// Number of tasks owned by the active account.
        owned_tasks: usize,
    },
    /// A refresh failed; the previous collection stays visible.
    RefreshFailed {
        /// Error message.
        message: String,
    },
    /// A transaction was confirmed by the ledger.
    MutationConfirmed {
        /// Action performed.
        action: MutationAction,
        /// Target task.
        task_id: TaskId,
        /// Confirmed transaction.
        transaction: TxHash,
    },
    /// An action failed; ledger and local state are unchanged.
    MutationFailed {
        /// Action attempted.
        action: MutationAction,
        /// Target task.
        task_id: TaskId,
        /// Error message.
        message: String,
    },
}

impl DashboardNotice {
    /// Returns `true` for failure notices.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::RefreshFailed { .. } | Self::MutationFailed { .. })
    }
}

impl fmt::Display for DashboardNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Refreshed { owned_tasks } => write!(f, "loaded {owned_tasks} tasks"),
            Self::RefreshFailed { message } => write!(f, "failed to load tasks: {message}"),
            Self::MutationConfirmed {
                action, task_id, ..
            } => write!(f, "{action} of task {task_id} confirmed"),
            Self::MutationFailed {
                action,
                task_id,
                message,
            } => write!(f, "{action} of task {task_id} failed: {message}"),
        }
    }
}
