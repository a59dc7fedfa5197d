//! Error types for dashboard domain validation.

use thiserror::Error;

/// Errors returned while constructing dashboard domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DashboardDomainError {
    /// Task identifier zero is reserved by the ledger.
    #[error("invalid task identifier {0}, expected a positive integer")]
    InvalidTaskId(u64),

    /// The account address is empty after trimming.
    #[error("account address must not be empty")]
    EmptyAddress,

    /// The account address contains interior whitespace.
    #[error("invalid account address '{0}'")]
    InvalidAddress(String),

    /// The bounty amount is not a base-10 unsigned integer.
    #[error("invalid bounty amount '{0}', expected an unsigned integer")]
    InvalidBounty(String),

    /// A task record claims to be both completed and cancelled.
    #[error("task {0} is flagged as both completed and cancelled")]
    ConflictingTaskFlags(u64),
}
