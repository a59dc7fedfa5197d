//! Task aggregate and submission types.

use super::{AccountAddress, Bounty, DashboardDomainError, TaskId, TaskLifecycle};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Settlement status of a task as recorded by the ledger.
///
/// The ledger stores two flags; exactly one status holds at any time and only
/// [`TaskStatus::Open`] tasks may still transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Funds are escrowed and the task accepts actions.
    Open,
    /// A submission was approved and the bounty released.
    Completed,
    /// The owner cancelled the task and reclaimed the bounty.
    Cancelled,
}

impl TaskStatus {
    /// Derives the status from the ledger's completion and cancellation
    /// flags.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardDomainError::ConflictingTaskFlags`] when both flags
    /// are set.
    pub const fn from_flags(
        task_id: u64,
        is_completed: bool,
        is_cancelled: bool,
    ) -> Result<Self, DashboardDomainError> {
        match (is_completed, is_cancelled) {
            (false, false) => Ok(Self::Open),
            (true, false) => Ok(Self::Completed),
            (false, true) => Ok(Self::Cancelled),
            (true, true) => Err(DashboardDomainError::ConflictingTaskFlags(task_id)),
        }
    }

    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Returns `true` when the task can still be approved or cancelled.
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }
}

/// Freelancer submission against a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    freelancer: AccountAddress,
    link: String,
    approved: bool,
}

impl Submission {
    /// Creates a submission from ledger data.
    #[must_use]
    pub fn new(freelancer: AccountAddress, link: impl Into<String>, approved: bool) -> Self {
        Self {
            freelancer,
            link: link.into(),
            approved,
        }
    }

    /// Returns the submitting freelancer.
    #[must_use]
    pub const fn freelancer(&self) -> &AccountAddress {
        &self.freelancer
    }

    /// Returns the link to the submitted work.
    #[must_use]
    pub fn link(&self) -> &str {
        &self.link
    }

    /// Returns `true` once the owner has approved the submission.
    #[must_use]
    pub const fn is_approved(&self) -> bool {
        self.approved
    }
}

/// Parameter object carrying the scalar task fields read from the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskData {
    /// Ledger-assigned identifier.
    pub id: TaskId,
    /// Task owner.
    pub provider: AccountAddress,
    /// Free-form task description.
    pub description: String,
    /// Escrowed amount.
    pub bounty: Bounty,
    /// Deadline in seconds since the Unix epoch.
    pub deadline: u64,
    /// Ledger completion flag.
    pub is_completed: bool,
    /// Ledger cancellation flag.
    pub is_cancelled: bool,
}

/// Task aggregate as projected from the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    provider: AccountAddress,
    description: String,
    bounty: Bounty,
    deadline: u64,
    status: TaskStatus,
    submissions: Vec<Submission>,
}

impl Task {
    /// Builds a task from ledger fields and its submissions, in ledger
    /// emission order.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardDomainError::ConflictingTaskFlags`] when the ledger
    /// reports the task as both completed and cancelled.
    pub fn from_ledger(
        data: TaskData,
        submissions: Vec<Submission>,
    ) -> Result<Self, DashboardDomainError> {
        let status = TaskStatus::from_flags(data.id.value(), data.is_completed, data.is_cancelled)?;
        Ok(Self {
            id: data.id,
            provider: data.provider,
            description: data.description,
            bounty: data.bounty,
            deadline: data.deadline,
            status,
            submissions,
        })
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owner address.
    #[must_use]
    pub const fn provider(&self) -> &AccountAddress {
        &self.provider
    }

    /// Returns the task description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the escrowed bounty.
    #[must_use]
    pub const fn bounty(&self) -> Bounty {
        self.bounty
    }

    /// Returns the deadline in seconds since the Unix epoch.
    #[must_use]
    pub const fn deadline(&self) -> u64 {
        self.deadline
    }

    /// Returns the deadline as a UTC timestamp, when representable.
    #[must_use]
    pub fn deadline_at(&self) -> Option<DateTime<Utc>> {
        let seconds = i64::try_from(self.deadline).ok()?;
        DateTime::from_timestamp(seconds, 0)
    }

    /// Returns the ledger settlement status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns `true` when the ledger marks the task completed.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        matches!(self.status, TaskStatus::Completed)
    }

    /// Returns `true` when the ledger marks the task cancelled.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self.status, TaskStatus::Cancelled)
    }

    /// Returns submissions in ledger emission order.
    #[must_use]
    pub fn submissions(&self) -> &[Submission] {
        &self.submissions
    }

    /// Returns `true` when `account` owns this task.
    #[must_use]
    pub fn is_owned_by(&self, account: &AccountAddress) -> bool {
        self.provider == *account
    }

    /// Finds the submission made by `freelancer`, if any.
    #[must_use]
    pub fn submission_from(&self, freelancer: &AccountAddress) -> Option<&Submission> {
        self.submissions
            .iter()
            .find(|submission| submission.freelancer() == freelancer)
    }

    /// Returns submissions that have not been approved yet.
    pub fn pending_submissions(&self) -> impl Iterator<Item = &Submission> {
        self.submissions
            .iter()
            .filter(|submission| !submission.is_approved())
    }

    /// Classifies the task for display at `now` (seconds since the epoch).
    #[must_use]
    pub const fn lifecycle_at(&self, now: u64) -> TaskLifecycle {
        TaskLifecycle::classify(self, now)
    }
}
