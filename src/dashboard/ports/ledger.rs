//! Ledger gateway port for task reads and owner transactions.

use crate::dashboard::domain::{AccountAddress, TaskId};
use alloy_primitives::{TxHash, U256};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for ledger gateway operations.
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Task record as returned by the ledger, with fields named.
///
/// Values are passed through unvalidated; the aggregation service normalizes
/// them into domain types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerTaskRecord {
    /// Identifier stored in the record. Zero marks an unset slot.
    pub id: u64,
    /// Owner address as stored by the ledger.
    pub provider: String,
    /// Task description.
    pub description: String,
    /// Escrowed amount in base units.
    pub bounty: U256,
    /// Completion flag.
    pub is_completed: bool,
    /// Cancellation flag.
    pub is_cancelled: bool,
    /// Deadline in seconds since the Unix epoch.
    pub deadline: u64,
}

/// Submission record as returned by the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerSubmissionRecord {
    /// Submitting freelancer address.
    pub freelancer: String,
    /// Link to the submitted work.
    pub submission_link: String,
    /// Approval flag.
    pub is_approved: bool,
}

/// Receipt for a confirmed transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionReceipt {
    /// Transaction hash.
    pub hash: TxHash,
    /// Block that included the transaction.
    pub block_number: u64,
}

/// Handle to a submitted, not yet confirmed transaction.
#[async_trait]
pub trait PendingTransaction: Send + Sync {
    /// Returns the transaction hash assigned at submission.
    fn hash(&self) -> TxHash;

    /// Waits until the ledger finalizes the transaction.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Reverted`] when execution fails, or transport
    /// errors when the ledger cannot be reached.
    async fn confirm(&self) -> LedgerResult<TransactionReceipt>;
}

/// Read and write contract for the task ledger.
#[async_trait]
pub trait LedgerGateway: Send + Sync {
    /// Returns the ledger's task counter. Identifiers run from 1 to the
    /// counter inclusive.
    async fn task_count(&self) -> LedgerResult<u64>;

    /// Reads a single task record.
    async fn task(&self, id: TaskId) -> LedgerResult<LedgerTaskRecord>;

    /// Reads the submissions for a task in ledger emission order.
    async fn submissions(&self, id: TaskId) -> LedgerResult<Vec<LedgerSubmissionRecord>>;

    /// Submits an approval for the listed freelancers' submissions.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Rejected`] when the ledger refuses the
    /// transaction before it is broadcast.
    async fn approve_submission(
        &self,
        id: TaskId,
        approved_freelancers: &[AccountAddress],
    ) -> LedgerResult<Box<dyn PendingTransaction>>;

    /// Submits a cancellation for an open task.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Rejected`] when the ledger refuses the
    /// transaction before it is broadcast.
    async fn cancel_task(&self, id: TaskId) -> LedgerResult<Box<dyn PendingTransaction>>;
}

/// Errors returned by ledger gateway implementations.
#[derive(Debug, Clone, Error)]
pub enum LedgerError {
    /// A read call failed on the ledger side.
    #[error("ledger call {call} failed: {reason}")]
    CallFailed {
        /// Name of the failing call.
        call: &'static str,
        /// Failure description.
        reason: String,
    },

    /// The ledger returned a record that does not match the expected layout.
    #[error("malformed record for task {id}: {reason}")]
    MalformedRecord {
        /// Requested task identifier.
        id: u64,
        /// Decoding failure description.
        reason: String,
    },

    /// The transaction was refused before broadcast.
    #[error("transaction rejected: {0}")]
    Rejected(String),

    /// The transaction was included but its execution reverted.
    #[error("transaction {hash} reverted: {reason}")]
    Reverted {
        /// Transaction hash.
        hash: TxHash,
        /// Revert reason.
        reason: String,
    },

    /// Transport-layer failure.
    #[error("ledger transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl LedgerError {
    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}
