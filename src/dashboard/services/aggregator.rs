//! Enumeration of ledger tasks joined with their submissions.

use crate::dashboard::{
    domain::{AccountAddress, Bounty, DashboardDomainError, Submission, Task, TaskData, TaskId},
    ports::{LedgerError, LedgerGateway, LedgerSubmissionRecord, LedgerTaskRecord},
};
use futures::future::{try_join, try_join_all};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Errors raised while reading and joining ledger tasks.
#[derive(Debug, Clone, Error)]
pub enum AggregationError {
    /// The task counter could not be read.
    #[error("failed to read task count: {0}")]
    TaskCount(#[source] LedgerError),

    /// A task record could not be read.
    #[error("failed to read task {id}: {source}")]
    TaskRead {
        /// Requested task.
        id: TaskId,
        /// Ledger failure.
        source: LedgerError,
    },

    /// A submission list could not be read.
    #[error("failed to read submissions for task {id}: {source}")]
    SubmissionRead {
        /// Requested task.
        id: TaskId,
        /// Ledger failure.
        source: LedgerError,
    },

    /// A record failed domain validation.
    #[error("task {id} record is malformed: {source}")]
    MalformedRecord {
        /// Requested task.
        id: TaskId,
        /// Validation failure.
        source: DashboardDomainError,
    },

    /// The ledger answered a read with another task's record.
    #[error("read of task {requested} returned a record for task {returned}")]
    IdentifierMismatch {
        /// Requested task.
        requested: TaskId,
        /// Identifier found in the record.
        returned: u64,
    },
}

/// Reads every ledger task and joins it with its submissions.
pub struct TaskAggregator<L>
where
    L: LedgerGateway,
{
    ledger: Arc<L>,
}

impl<L> TaskAggregator<L>
where
    L: LedgerGateway,
{
    /// Creates an aggregator over `ledger`.
    #[must_use]
    pub const fn new(ledger: Arc<L>) -> Self {
        Self { ledger }
    }

    /// Loads all tasks known to the ledger, in identifier order.
    ///
    /// Task and submission reads for every identifier are dispatched together
    /// and awaited as two ordered batches, so the task at position *i* is
    /// always paired with the submissions read for the same identifier.
    /// Unset slots (record identifier zero) are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`AggregationError`] when the counter or any single read fails,
    /// or when a record does not validate.
    pub async fn load_all(&self) -> Result<Vec<Task>, AggregationError> {
        let count = self
            .ledger
            .task_count()
            .await
            .map_err(AggregationError::TaskCount)?;
        let ids: Vec<TaskId> = (1..=count).filter_map(|raw| TaskId::new(raw).ok()).collect();

        let task_reads = try_join_all(ids.iter().map(|id| self.read_task(*id)));
        let submission_reads = try_join_all(ids.iter().map(|id| self.read_submissions(*id)));
        let (records, submissions) = try_join(task_reads, submission_reads).await?;

        let mut tasks = Vec::with_capacity(ids.len());
        let joined = ids.into_iter().zip(records).zip(submissions);
        for ((id, record), submission_records) in joined {
            if let Some(task) = normalize(id, record, submission_records)? {
                tasks.push(task);
            }
        }
        debug!(task_count = count, loaded = tasks.len(), "loaded ledger tasks");
        Ok(tasks)
    }

    async fn read_task(&self, id: TaskId) -> Result<LedgerTaskRecord, AggregationError> {
        self.ledger
            .task(id)
            .await
            .map_err(|source| AggregationError::TaskRead { id, source })
    }

    async fn read_submissions(
        &self,
        id: TaskId,
    ) -> Result<Vec<LedgerSubmissionRecord>, AggregationError> {
        self.ledger
            .submissions(id)
            .await
            .map_err(|source| AggregationError::SubmissionRead { id, source })
    }
}

/// Converts a ledger record and its submissions into a task.
///
/// Returns `Ok(None)` for unset slots.
fn normalize(
    id: TaskId,
    record: LedgerTaskRecord,
    submission_records: Vec<LedgerSubmissionRecord>,
) -> Result<Option<Task>, AggregationError> {
    if record.id == 0 {
        debug!(task_id = %id, "skipping unset task slot");
        return Ok(None);
    }
    if record.id != id.value() {
        return Err(AggregationError::IdentifierMismatch {
            requested: id,
            returned: record.id,
        });
    }

    let malformed = |source| AggregationError::MalformedRecord { id, source };
    let submissions = submission_records
        .into_iter()
        .map(|submission| {
            AccountAddress::new(submission.freelancer).map(|freelancer| {
                Submission::new(freelancer, submission.submission_link, submission.is_approved)
            })
        })
        .collect::<Result<Vec<_>, _>>()
        .map_err(malformed)?;

    let data = TaskData {
        id,
        provider: AccountAddress::new(record.provider).map_err(malformed)?,
        description: record.description,
        bounty: Bounty::from_base_units(record.bounty),
        deadline: record.deadline,
        is_completed: record.is_completed,
        is_cancelled: record.is_cancelled,
    };
    Task::from_ledger(data, submissions)
        .map(Some)
        .map_err(malformed)
}
