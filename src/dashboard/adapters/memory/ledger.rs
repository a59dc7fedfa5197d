//! In-memory task ledger for dashboard tests and local runs.

use alloy_primitives::{TxHash, U256, keccak256};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use crate::dashboard::{
    adapters::record_layout::{LedgerValue, TaskRecordLayout},
    domain::{AccountAddress, Bounty, TaskId},
    ports::{
        LedgerError, LedgerGateway, LedgerResult, LedgerSubmissionRecord, LedgerTaskRecord,
        PendingTransaction, TransactionReceipt,
    },
};

/// Address the contract reports for unset task slots.
const ZERO_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

/// A call observed by the in-memory ledger, in arrival order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerCall {
    /// Task counter read.
    TaskCount,
    /// Task record read.
    Task(TaskId),
    /// Submission list read.
    Submissions(TaskId),
    /// Approval submitted.
    ApproveSubmission(TaskId),
    /// Cancellation submitted.
    CancelTask(TaskId),
    /// Confirmation awaited for a transaction.
    Confirm(TxHash),
}

/// Task fields used to seed the in-memory ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerTaskSeed {
    provider: String,
    description: String,
    bounty: Bounty,
    deadline: u64,
    is_completed: bool,
    is_cancelled: bool,
}

impl LedgerTaskSeed {
    /// Creates an open task seed.
    #[must_use]
    pub fn new(
        provider: impl Into<String>,
        description: impl Into<String>,
        bounty: Bounty,
        deadline: u64,
    ) -> Self {
        Self {
            provider: provider.into(),
            description: description.into(),
            bounty,
            deadline,
            is_completed: false,
            is_cancelled: false,
        }
    }

    /// Marks the seeded task completed.
    #[must_use]
    pub const fn completed(mut self) -> Self {
        self.is_completed = true;
        self
    }

    /// Marks the seeded task cancelled.
    #[must_use]
    pub const fn cancelled(mut self) -> Self {
        self.is_cancelled = true;
        self
    }
}

/// Thread-safe in-memory ledger.
///
/// Task records are stored as positional tuples and decoded through
/// [`TaskRecordLayout::V1`] on every read. Transactions take effect only when
/// confirmed, and confirmation enforces the contract rules: only open tasks
/// transition, approvals need a pending submission from each listed
/// freelancer, and tasks with submissions cannot be cancelled.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLedger {
    state: Arc<RwLock<LedgerState>>,
}

#[derive(Debug, Default)]
struct LedgerState {
    tasks: Vec<Vec<LedgerValue>>,
    submissions: HashMap<u64, Vec<LedgerSubmissionRecord>>,
    balances: HashMap<String, U256>,
    failing_task_count: Option<String>,
    failing_task_reads: HashMap<u64, String>,
    failing_submission_reads: HashMap<u64, String>,
    read_delays: HashMap<u64, Duration>,
    reject_next: Option<String>,
    revert_next: Option<String>,
    journal: Vec<LedgerCall>,
    nonce: u64,
    block_number: u64,
}

#[derive(Debug, Clone)]
enum LedgerEffect {
    Approve {
        id: TaskId,
        freelancers: Vec<AccountAddress>,
    },
    Cancel {
        id: TaskId,
    },
}

fn lock_error(err: impl std::fmt::Display) -> LedgerError {
    LedgerError::transport(std::io::Error::other(err.to_string()))
}

fn slot_index(id: TaskId) -> Option<usize> {
    usize::try_from(id.value()).ok()?.checked_sub(1)
}

fn balance_key(address: &str) -> String {
    address.trim().to_ascii_lowercase()
}

impl InMemoryLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> LedgerResult<RwLockReadGuard<'_, LedgerState>> {
        self.state.read().map_err(lock_error)
    }

    fn write(&self) -> LedgerResult<RwLockWriteGuard<'_, LedgerState>> {
        self.state.write().map_err(lock_error)
    }

    /// Appends a task and returns its ledger-assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns ledger transport errors when lock acquisition fails.
    pub fn seed_task(&self, seed: LedgerTaskSeed) -> LedgerResult<TaskId> {
        let mut state = self.write()?;
        let id = next_task_id(&state)?;
        let record = LedgerTaskRecord {
            id: id.value(),
            provider: seed.provider,
            description: seed.description,
            bounty: seed.bounty.base_units(),
            is_completed: seed.is_completed,
            is_cancelled: seed.is_cancelled,
            deadline: seed.deadline,
        };
        state.tasks.push(TaskRecordLayout::V1.encode(&record));
        Ok(id)
    }

    /// Appends a slot the contract never initialized. Reads of that slot
    /// return a zeroed record.
    ///
    /// # Errors
    ///
    /// Returns ledger transport errors when lock acquisition fails.
    pub fn seed_unset_slot(&self) -> LedgerResult<TaskId> {
        let mut state = self.write()?;
        let id = next_task_id(&state)?;
        state.tasks.push(TaskRecordLayout::V1.encode(&unset_record()));
        Ok(id)
    }

    /// Appends a raw positional tuple, bypassing the record layout.
    ///
    /// # Errors
    ///
    /// Returns ledger transport errors when lock acquisition fails.
    pub fn seed_raw_tuple(&self, tuple: Vec<LedgerValue>) -> LedgerResult<TaskId> {
        let mut state = self.write()?;
        let id = next_task_id(&state)?;
        state.tasks.push(tuple);
        Ok(id)
    }

    /// Records a freelancer submission against a task.
    ///
    /// # Errors
    ///
    /// Returns ledger transport errors when lock acquisition fails.
    pub fn add_submission(
        &self,
        id: TaskId,
        freelancer: impl Into<String>,
        submission_link: impl Into<String>,
    ) -> LedgerResult<()> {
        let mut state = self.write()?;
        state
            .submissions
            .entry(id.value())
            .or_default()
            .push(LedgerSubmissionRecord {
                freelancer: freelancer.into(),
                submission_link: submission_link.into(),
                is_approved: false,
            });
        Ok(())
    }

    /// Makes every task counter read fail with `reason`.
    ///
    /// # Errors
    ///
    /// Returns ledger transport errors when lock acquisition fails.
    pub fn fail_task_count(&self, reason: impl Into<String>) -> LedgerResult<()> {
        self.write()?.failing_task_count = Some(reason.into());
        Ok(())
    }

    /// Makes reads of the task record for `id` fail with `reason`.
    ///
    /// # Errors
    ///
    /// Returns ledger transport errors when lock acquisition fails.
    pub fn fail_task_reads(&self, id: TaskId, reason: impl Into<String>) -> LedgerResult<()> {
        self.write()?
            .failing_task_reads
            .insert(id.value(), reason.into());
        Ok(())
    }

    /// Makes reads of the submissions for `id` fail with `reason`.
    ///
    /// # Errors
    ///
    /// Returns ledger transport errors when lock acquisition fails.
    pub fn fail_submission_reads(
        &self,
        id: TaskId,
        reason: impl Into<String>,
    ) -> LedgerResult<()> {
        self.write()?
            .failing_submission_reads
            .insert(id.value(), reason.into());
        Ok(())
    }

    /// Clears all injected read failures.
    ///
    /// # Errors
    ///
    /// Returns ledger transport errors when lock acquisition fails.
    pub fn clear_failures(&self) -> LedgerResult<()> {
        let mut state = self.write()?;
        state.failing_task_count = None;
        state.failing_task_reads.clear();
        state.failing_submission_reads.clear();
        Ok(())
    }

    /// Delays both reads for `id` by `delay`, so their responses arrive out
    /// of identifier order.
    ///
    /// # Errors
    ///
    /// Returns ledger transport errors when lock acquisition fails.
    pub fn delay_reads(&self, id: TaskId, delay: Duration) -> LedgerResult<()> {
        self.write()?.read_delays.insert(id.value(), delay);
        Ok(())
    }

    /// Rejects the next submitted transaction before broadcast.
    ///
    /// # Errors
    ///
    /// Returns ledger transport errors when lock acquisition fails.
    pub fn reject_next_transaction(&self, reason: impl Into<String>) -> LedgerResult<()> {
        self.write()?.reject_next = Some(reason.into());
        Ok(())
    }

    /// Reverts the next submitted transaction when it is confirmed.
    ///
    /// # Errors
    ///
    /// Returns ledger transport errors when lock acquisition fails.
    pub fn revert_next_transaction(&self, reason: impl Into<String>) -> LedgerResult<()> {
        self.write()?.revert_next = Some(reason.into());
        Ok(())
    }

    /// Returns every call received so far, in arrival order.
    ///
    /// # Errors
    ///
    /// Returns ledger transport errors when lock acquisition fails.
    pub fn journal(&self) -> LedgerResult<Vec<LedgerCall>> {
        Ok(self.read()?.journal.clone())
    }

    /// Returns funds paid out to `address` by settled tasks.
    ///
    /// # Errors
    ///
    /// Returns ledger transport errors when lock acquisition fails.
    pub fn balance_of(&self, address: &str) -> LedgerResult<Bounty> {
        let state = self.read()?;
        let balance = state
            .balances
            .get(&balance_key(address))
            .copied()
            .unwrap_or_default();
        Ok(Bounty::from_base_units(balance))
    }

    fn journal_read(
        &self,
        call: LedgerCall,
        id: Option<TaskId>,
    ) -> LedgerResult<Option<Duration>> {
        let mut state = self.write()?;
        state.journal.push(call);
        Ok(id.and_then(|task_id| state.read_delays.get(&task_id.value()).copied()))
    }

    fn submit(
        &self,
        call: LedgerCall,
        effect: LedgerEffect,
    ) -> LedgerResult<Box<dyn PendingTransaction>> {
        let mut state = self.write()?;
        state.journal.push(call);
        if let Some(reason) = state.reject_next.take() {
            return Err(LedgerError::Rejected(reason));
        }
        let id = effect.task_id();
        if state.slot(id).is_none() {
            return Err(LedgerError::Rejected(format!("task {id} does not exist")));
        }
        if matches!(&effect, LedgerEffect::Approve { freelancers, .. } if freelancers.is_empty()) {
            return Err(LedgerError::Rejected("no freelancers to approve".to_owned()));
        }

        state.nonce += 1;
        let hash = keccak256(format!("{call:?}:{}", state.nonce));
        Ok(Box::new(InMemoryPendingTransaction {
            hash,
            effect,
            revert: state.revert_next.take(),
            state: Arc::clone(&self.state),
        }))
    }
}

fn next_task_id(state: &LedgerState) -> LedgerResult<TaskId> {
    let next = u64::try_from(state.tasks.len())
        .ok()
        .and_then(|count| count.checked_add(1))
        .ok_or_else(|| LedgerError::Rejected("task counter overflow".to_owned()))?;
    TaskId::new(next).map_err(|err| LedgerError::Rejected(err.to_string()))
}

fn unset_record() -> LedgerTaskRecord {
    LedgerTaskRecord {
        id: 0,
        provider: ZERO_ADDRESS.to_owned(),
        description: String::new(),
        bounty: U256::ZERO,
        is_completed: false,
        is_cancelled: false,
        deadline: 0,
    }
}

impl LedgerEffect {
    const fn task_id(&self) -> TaskId {
        match self {
            Self::Approve { id, .. } | Self::Cancel { id } => *id,
        }
    }
}

impl LedgerState {
    fn slot(&self, id: TaskId) -> Option<&Vec<LedgerValue>> {
        self.tasks.get(slot_index(id)?)
    }

    fn open_record(&self, id: TaskId) -> Result<LedgerTaskRecord, String> {
        let tuple = self
            .slot(id)
            .ok_or_else(|| format!("task {id} does not exist"))?;
        let record = TaskRecordLayout::V1
            .decode(tuple)
            .map_err(|err| err.to_string())?;
        if record.is_completed || record.is_cancelled {
            return Err(format!("task {id} is not open"));
        }
        Ok(record)
    }

    fn store_record(&mut self, id: TaskId, record: &LedgerTaskRecord) {
        if let Some(slot) = slot_index(id).and_then(|index| self.tasks.get_mut(index)) {
            *slot = TaskRecordLayout::V1.encode(record);
        }
    }

    fn credit(&mut self, address: &str, amount: U256) {
        if amount.is_zero() {
            return;
        }
        let balance = self.balances.entry(balance_key(address)).or_default();
        *balance = balance.saturating_add(amount);
    }

    fn apply(&mut self, effect: &LedgerEffect) -> Result<(), String> {
        match effect {
            LedgerEffect::Approve { id, freelancers } => self.apply_approval(*id, freelancers),
            LedgerEffect::Cancel { id } => self.apply_cancellation(*id),
        }
    }

    fn apply_approval(
        &mut self,
        id: TaskId,
        freelancers: &[AccountAddress],
    ) -> Result<(), String> {
        let mut record = self.open_record(id)?;
        let submissions = self.submissions.entry(id.value()).or_default();

        let mut positions = Vec::with_capacity(freelancers.len());
        for freelancer in freelancers {
            let position = submissions
                .iter()
                .position(|submission| {
                    !submission.is_approved && freelancer.matches(&submission.freelancer)
                })
                .ok_or_else(|| format!("no pending submission from {freelancer} on task {id}"))?;
            positions.push(position);
        }
        for position in positions {
            if let Some(submission) = submissions.get_mut(position) {
                submission.is_approved = true;
            }
        }

        let count = U256::from(freelancers.len());
        let share = record.bounty.checked_div(count).unwrap_or_default();
        let remainder = record.bounty.checked_rem(count).unwrap_or_default();
        for freelancer in freelancers {
            self.credit(freelancer.as_str(), share);
        }
        self.credit(&record.provider, remainder);

        record.is_completed = true;
        self.store_record(id, &record);
        Ok(())
    }

    fn apply_cancellation(&mut self, id: TaskId) -> Result<(), String> {
        let mut record = self.open_record(id)?;
        let has_submissions = self
            .submissions
            .get(&id.value())
            .is_some_and(|submissions| !submissions.is_empty());
        if has_submissions {
            return Err(format!("task {id} has submissions"));
        }

        self.credit(&record.provider, record.bounty);
        record.is_cancelled = true;
        self.store_record(id, &record);
        Ok(())
    }
}

struct InMemoryPendingTransaction {
    hash: TxHash,
    effect: LedgerEffect,
    revert: Option<String>,
    state: Arc<RwLock<LedgerState>>,
}

#[async_trait]
impl PendingTransaction for InMemoryPendingTransaction {
    fn hash(&self) -> TxHash {
        self.hash
    }

    async fn confirm(&self) -> LedgerResult<TransactionReceipt> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.journal.push(LedgerCall::Confirm(self.hash));

        let outcome = self
            .revert
            .clone()
            .map_or_else(|| state.apply(&self.effect), Err);
        outcome.map_err(|reason| LedgerError::Reverted {
            hash: self.hash,
            reason,
        })?;

        state.block_number += 1;
        Ok(TransactionReceipt {
            hash: self.hash,
            block_number: state.block_number,
        })
    }
}

#[async_trait]
impl LedgerGateway for InMemoryLedger {
    async fn task_count(&self) -> LedgerResult<u64> {
        self.journal_read(LedgerCall::TaskCount, None)?;
        let state = self.read()?;
        if let Some(reason) = &state.failing_task_count {
            return Err(LedgerError::CallFailed {
                call: "task_count",
                reason: reason.clone(),
            });
        }
        u64::try_from(state.tasks.len()).map_err(lock_error)
    }

    async fn task(&self, id: TaskId) -> LedgerResult<LedgerTaskRecord> {
        if let Some(delay) = self.journal_read(LedgerCall::Task(id), Some(id))? {
            tokio::time::sleep(delay).await;
        }
        let state = self.read()?;
        if let Some(reason) = state.failing_task_reads.get(&id.value()) {
            return Err(LedgerError::CallFailed {
                call: "task",
                reason: reason.clone(),
            });
        }
        let Some(tuple) = state.slot(id) else {
            return Ok(unset_record());
        };
        TaskRecordLayout::V1
            .decode(tuple)
            .map_err(|err| LedgerError::MalformedRecord {
                id: id.value(),
                reason: err.to_string(),
            })
    }

    async fn submissions(&self, id: TaskId) -> LedgerResult<Vec<LedgerSubmissionRecord>> {
        if let Some(delay) = self.journal_read(LedgerCall::Submissions(id), Some(id))? {
            tokio::time::sleep(delay).await;
        }
        let state = self.read()?;
        if let Some(reason) = state.failing_submission_reads.get(&id.value()) {
            return Err(LedgerError::CallFailed {
                call: "submissions",
                reason: reason.clone(),
            });
        }
        Ok(state
            .submissions
            .get(&id.value())
            .cloned()
            .unwrap_or_default())
    }

    async fn approve_submission(
        &self,
        id: TaskId,
        approved_freelancers: &[AccountAddress],
    ) -> LedgerResult<Box<dyn PendingTransaction>> {
        self.submit(
            LedgerCall::ApproveSubmission(id),
            LedgerEffect::Approve {
                id,
                freelancers: approved_freelancers.to_vec(),
            },
        )
    }

    async fn cancel_task(&self, id: TaskId) -> LedgerResult<Box<dyn PendingTransaction>> {
        self.submit(LedgerCall::CancelTask(id), LedgerEffect::Cancel { id })
    }
}
