//! Service layer owning the synchronized task collection and owner actions.

use super::{
    DashboardConfig, DashboardNotice, MutationAction, MutationFailed, MutationFailureReason,
    OwnershipFilter, PreconditionViolation, SyncError, TaskAggregator, TransactionError,
    filter_owned,
};
use crate::dashboard::{
    domain::{AccountAddress, Task, TaskBoard, TaskId},
    ports::{IdentityProvider, LedgerGateway, LedgerResult, PendingTransaction, TransactionReceipt},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::future::Future;
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::{Mutex, broadcast};
use tracing::{debug, info, warn};

/// Owned tasks captured by one successful refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSnapshot {
    owner: AccountAddress,
    tasks: Vec<Task>,
    synchronized_at: DateTime<Utc>,
}

impl TaskSnapshot {
    /// Creates a snapshot of `owner`'s tasks.
    #[must_use]
    pub const fn new(
        owner: AccountAddress,
        tasks: Vec<Task>,
        synchronized_at: DateTime<Utc>,
    ) -> Self {
        Self {
            owner,
            tasks,
            synchronized_at,
        }
    }

    /// Returns the account the snapshot was filtered for.
    #[must_use]
    pub const fn owner(&self) -> &AccountAddress {
        &self.owner
    }

    /// Returns the owned tasks in identifier order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns when the snapshot was taken.
    #[must_use]
    pub const fn synchronized_at(&self) -> DateTime<Utc> {
        self.synchronized_at
    }

    /// Finds an owned task by identifier.
    #[must_use]
    pub fn find(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == id)
    }
}

/// Result of a confirmed owner action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MutationOutcome {
    /// Action performed.
    pub action: MutationAction,
    /// Target task.
    pub task_id: TaskId,
    /// Ledger confirmation.
    pub receipt: TransactionReceipt,
    /// Whether the follow-up refresh succeeded. When `false` the previous
    /// snapshot is still shown.
    pub synchronized: bool,
}

/// Owner dashboard orchestration service.
///
/// The service holds the only copy of the synchronized collection and
/// replaces it wholesale after each successful refresh. Owner actions never
/// edit it: they submit a transaction, wait for confirmation and then
/// refresh from the ledger.
pub struct TaskDashboardService<L, I, C>
where
    L: LedgerGateway,
    I: IdentityProvider,
    C: Clock + Send + Sync,
{
    ledger: Arc<L>,
    aggregator: TaskAggregator<L>,
    ownership: OwnershipFilter<I>,
    clock: Arc<C>,
    config: DashboardConfig,
    snapshot: RwLock<Option<Arc<TaskSnapshot>>>,
    refresh_gate: Mutex<()>,
    notices: broadcast::Sender<DashboardNotice>,
}

impl<L, I, C> TaskDashboardService<L, I, C>
where
    L: LedgerGateway,
    I: IdentityProvider,
    C: Clock + Send + Sync,
{
    /// Creates a dashboard service with no tasks loaded.
    #[must_use]
    pub fn new(ledger: Arc<L>, identity: Arc<I>, clock: Arc<C>, config: DashboardConfig) -> Self {
        let (notices, _) = broadcast::channel(config.notice_capacity.max(1));
        Self {
            aggregator: TaskAggregator::new(Arc::clone(&ledger)),
            ledger,
            ownership: OwnershipFilter::new(identity),
            clock,
            config,
            snapshot: RwLock::new(None),
            refresh_gate: Mutex::new(()),
            notices,
        }
    }

    /// Subscribes to notices emitted after every refresh and owner action.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<DashboardNotice> {
        self.notices.subscribe()
    }

    /// Returns the current snapshot, if any refresh has succeeded.
    #[must_use]
    pub fn snapshot(&self) -> Option<Arc<TaskSnapshot>> {
        self.snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns `true` once the initial load has completed.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.snapshot().is_some()
    }

    /// Classifies and partitions the current snapshot at the clock's now.
    #[must_use]
    pub fn board(&self) -> Option<TaskBoard> {
        let snapshot = self.snapshot()?;
        Some(TaskBoard::partition(snapshot.tasks(), self.now()))
    }

    fn now(&self) -> u64 {
        u64::try_from(self.clock.utc().timestamp()).unwrap_or_default()
    }

    fn notify(&self, notice: DashboardNotice) {
        // No subscribers is fine.
        if self.notices.send(notice).is_err() {
            debug!("no dashboard notice subscribers");
        }
    }

    /// Reloads the active account's tasks from the ledger.
    ///
    /// Refreshes run one at a time. On failure the previous snapshot is
    /// kept.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError`] when the active account is unavailable or a
    /// ledger read fails.
    pub async fn refresh(&self) -> Result<Arc<TaskSnapshot>, SyncError> {
        let _gate = self.refresh_gate.lock().await;
        match self.synchronize().await {
            Ok(snapshot) => {
                *self
                    .snapshot
                    .write()
                    .unwrap_or_else(PoisonError::into_inner) = Some(Arc::clone(&snapshot));
                info!(
                    owner = %snapshot.owner(),
                    owned_tasks = snapshot.tasks().len(),
                    "dashboard synchronized"
                );
                self.notify(DashboardNotice::Refreshed {
                    owned_tasks: snapshot.tasks().len(),
                });
                Ok(snapshot)
            }
            Err(err) => {
                warn!(error = %err, "dashboard refresh failed, keeping previous snapshot");
                self.notify(DashboardNotice::RefreshFailed {
                    message: err.to_string(),
                });
                Err(err)
            }
        }
    }

    async fn synchronize(&self) -> Result<Arc<TaskSnapshot>, SyncError> {
        let owner = self.ownership.active_identity().await?;
        let tasks = self.aggregator.load_all().await?;
        let owned = filter_owned(tasks, &owner);
        Ok(Arc::new(TaskSnapshot::new(owner, owned, self.clock.utc())))
    }

    /// Approves `freelancer`'s submission on `task_id`, then refreshes.
    ///
    /// # Errors
    ///
    /// Returns [`MutationFailed`] when the task is unknown or settled, the
    /// freelancer has no pending submission, or the transaction is rejected,
    /// reverted or not confirmed in time.
    pub async fn approve_submission(
        &self,
        task_id: TaskId,
        freelancer: &AccountAddress,
    ) -> Result<MutationOutcome, MutationFailed> {
        let precondition = self.open_task(task_id).and_then(|task| {
            match task.submission_from(freelancer) {
                None => Err(PreconditionViolation::NoSubmission(freelancer.clone()).into()),
                Some(submission) if submission.is_approved() => {
                    Err(PreconditionViolation::AlreadyApproved(freelancer.clone()).into())
                }
                Some(_) => Ok(()),
            }
        });
        let approved = [freelancer.clone()];
        self.execute(
            MutationAction::Approve,
            task_id,
            precondition,
            self.ledger.approve_submission(task_id, &approved),
        )
        .await
    }

    /// Cancels `task_id`, then refreshes.
    ///
    /// Only ownership and open status are checked locally. Any further rule,
    /// such as refusing tasks with submissions, is the ledger's to enforce.
    ///
    /// # Errors
    ///
    /// Returns [`MutationFailed`] when the task is unknown or settled, or the
    /// transaction is rejected, reverted or not confirmed in time.
    pub async fn cancel_task(&self, task_id: TaskId) -> Result<MutationOutcome, MutationFailed> {
        let precondition = self.open_task(task_id).map(|_| ());
        self.execute(
            MutationAction::Cancel,
            task_id,
            precondition,
            self.ledger.cancel_task(task_id),
        )
        .await
    }

    fn open_task(&self, task_id: TaskId) -> Result<Task, MutationFailureReason> {
        let snapshot = self
            .snapshot()
            .ok_or(MutationFailureReason::NotSynchronized)?;
        let task = snapshot
            .find(task_id)
            .ok_or(PreconditionViolation::UnknownTask)?;
        if !task.status().is_open() {
            return Err(PreconditionViolation::TaskNotOpen(task.status()).into());
        }
        Ok(task.clone())
    }

    async fn execute<F>(
        &self,
        action: MutationAction,
        task_id: TaskId,
        precondition: Result<(), MutationFailureReason>,
        submit: F,
    ) -> Result<MutationOutcome, MutationFailed>
    where
        F: Future<Output = LedgerResult<Box<dyn PendingTransaction>>> + Send,
    {
        let confirmed = match precondition {
            Ok(()) => self.submit_and_confirm(action, task_id, submit).await,
            Err(reason) => Err(reason),
        };

        match confirmed {
            Ok(receipt) => {
                let synchronized = self.refresh().await.is_ok();
                info!(
                    %action,
                    %task_id,
                    transaction = %receipt.hash,
                    block = receipt.block_number,
                    synchronized,
                    "owner action confirmed"
                );
                self.notify(DashboardNotice::MutationConfirmed {
                    action,
                    task_id,
                    transaction: receipt.hash,
                });
                Ok(MutationOutcome {
                    action,
                    task_id,
                    receipt,
                    synchronized,
                })
            }
            Err(reason) => {
                let failure = MutationFailed {
                    action,
                    task_id,
                    reason,
                };
                warn!(%action, %task_id, error = %failure.reason, "owner action failed");
                self.notify(DashboardNotice::MutationFailed {
                    action,
                    task_id,
                    message: failure.reason.to_string(),
                });
                Err(failure)
            }
        }
    }

    async fn submit_and_confirm<F>(
        &self,
        action: MutationAction,
        task_id: TaskId,
        submit: F,
    ) -> Result<TransactionReceipt, MutationFailureReason>
    where
        F: Future<Output = LedgerResult<Box<dyn PendingTransaction>>> + Send,
    {
        let pending = submit.await.map_err(TransactionError::Submission)?;
        let hash = pending.hash();
        debug!(%action, %task_id, transaction = %hash, "awaiting confirmation");

        let timeout = self.config.confirmation_timeout;
        let receipt = tokio::time::timeout(timeout, pending.confirm())
            .await
            .map_err(|_| TransactionError::Timeout {
                hash,
                after: timeout,
            })?
            .map_err(TransactionError::Confirmation)?;
        Ok(receipt)
    }
}
