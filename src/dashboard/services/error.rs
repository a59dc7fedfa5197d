//! Error types for dashboard synchronization and owner actions.

use super::{AggregationError, IdentityUnavailableError, MutationAction};
use crate::dashboard::{
    domain::{AccountAddress, TaskId, TaskStatus},
    ports::LedgerError,
};
use alloy_primitives::TxHash;
use std::time::Duration;
use thiserror::Error;

/// A refresh of the owned task collection failed.
#[derive(Debug, Clone, Error)]
pub enum SyncError {
    /// The active account could not be resolved.
    #[error(transparent)]
    Identity(#[from] IdentityUnavailableError),

    /// Ledger reads failed.
    #[error(transparent)]
    Aggregation(#[from] AggregationError),
}

/// A ledger transaction failed to go through.
#[derive(Debug, Clone, Error)]
pub enum TransactionError {
    /// The ledger refused the transaction at submission.
    #[error("transaction submission failed: {0}")]
    Submission(#[source] LedgerError),

    /// The transaction was submitted but not confirmed.
    #[error("transaction confirmation failed: {0}")]
    Confirmation(#[source] LedgerError),

    /// Confirmation did not arrive in time.
    #[error("transaction {hash} was not confirmed within {after:?}")]
    Timeout {
        /// Submitted transaction.
        hash: TxHash,
        /// Elapsed wait.
        after: Duration,
    },
}

/// An owner action was refused by local checks.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PreconditionViolation {
    /// The task is not in the active account's synchronized collection.
    #[error("task is not owned by the active account or does not exist")]
    UnknownTask,

    /// The task is already settled.
    #[error("task is {} and can no longer change", .0.as_str())]
    TaskNotOpen(TaskStatus),

    /// The freelancer has no submission on the task.
    #[error("no submission from {0}")]
    NoSubmission(AccountAddress),

    /// The freelancer's submission is already approved.
    #[error("submission from {0} is already approved")]
    AlreadyApproved(AccountAddress),
}

/// Why an owner action failed.
#[derive(Debug, Clone, Error)]
pub enum MutationFailureReason {
    /// No successful refresh has happened yet.
    #[error("tasks have not been loaded yet")]
    NotSynchronized,

    /// A local precondition does not hold.
    #[error(transparent)]
    Precondition(#[from] PreconditionViolation),

    /// The ledger transaction failed.
    #[error(transparent)]
    Transaction(#[from] TransactionError),
}

/// An owner action failed; ledger and local state are unchanged.
#[derive(Debug, Clone, Error)]
#[error("{action} of task {task_id} failed: {reason}")]
pub struct MutationFailed {
    /// Action attempted.
    pub action: MutationAction,
    /// Target task.
    pub task_id: TaskId,
    /// Failure cause.
    #[source]
    pub reason: MutationFailureReason,
}
