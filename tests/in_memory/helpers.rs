//! Shared test helpers for in-memory dashboard integration tests.

use bountydesk::dashboard::{
    adapters::memory::{InMemoryLedger, LedgerTaskSeed, StaticIdentityProvider},
    domain::{AccountAddress, Bounty, TaskId},
    services::{DashboardConfig, TaskDashboardService},
};
use chrono::Utc;
use mockable::DefaultClock;
use rstest::fixture;
use std::sync::Arc;

/// Dashboard service wired to in-memory adapters.
pub type TestService = TaskDashboardService<InMemoryLedger, StaticIdentityProvider, DefaultClock>;

/// Ledger, wallet and service shared by one test.
pub struct DashboardContext {
    pub ledger: Arc<InMemoryLedger>,
    pub identity: Arc<StaticIdentityProvider>,
    pub service: TestService,
}

/// Provides a dashboard connected as `0xA11CE`.
#[fixture]
pub fn context() -> DashboardContext {
    let ledger = Arc::new(InMemoryLedger::new());
    let identity = Arc::new(StaticIdentityProvider::connected(account("0xA11CE")));
    let service = TaskDashboardService::new(
        Arc::clone(&ledger),
        Arc::clone(&identity),
        Arc::new(DefaultClock),
        DashboardConfig::local(),
    );
    DashboardContext {
        ledger,
        identity,
        service,
    }
}

/// Parses a test account address.
///
/// # Panics
///
/// Panics if `raw` is not a valid address.
#[must_use]
pub fn account(raw: &str) -> AccountAddress {
    AccountAddress::new(raw).expect("valid test address")
}

/// Current Unix time in seconds.
///
/// # Panics
///
/// Panics if the system clock is before the epoch.
#[must_use]
pub fn unix_now() -> u64 {
    u64::try_from(Utc::now().timestamp()).expect("clock after epoch")
}

/// Seeds an open task due in one hour.
///
/// # Panics
///
/// Panics if the ledger cannot be seeded.
pub fn seed_open(ledger: &InMemoryLedger, provider: &str, bounty: u64) -> TaskId {
    ledger
        .seed_task(LedgerTaskSeed::new(
            provider,
            format!("bounty of {bounty}"),
            Bounty::from(bounty),
            unix_now() + 3_600,
        ))
        .expect("seed task")
}

/// Records a submission for `task_id`.
///
/// # Panics
///
/// Panics if the ledger cannot record the submission.
pub fn submit_work(ledger: &InMemoryLedger, task_id: TaskId, freelancer: &str) {
    ledger
        .add_submission(
            task_id,
            freelancer,
            format!("https://example.com/{freelancer}/{task_id}"),
        )
        .expect("add submission");
}

/// Returns the identifiers in a list of owned task cards.
#[must_use]
pub fn card_ids(cards: &[bountydesk::dashboard::domain::TaskCard]) -> Vec<u64> {
    cards.iter().map(|card| card.task().id().value()).collect()
}
