//! Shared world state for owner dashboard BDD scenarios.

use std::sync::Arc;

use bountydesk::dashboard::{
    adapters::memory::{InMemoryLedger, StaticIdentityProvider},
    domain::{AccountAddress, TaskBoard, TaskId},
    services::{
        DashboardConfig, MutationFailed, MutationOutcome, SyncError, TaskDashboardService,
        TaskSnapshot,
    },
};
use mockable::DefaultClock;
use rstest::fixture;

/// Service type used by the BDD world.
pub type TestDashboardService =
    TaskDashboardService<InMemoryLedger, StaticIdentityProvider, DefaultClock>;

/// Scenario world for owner dashboard behaviour tests.
pub struct DashboardWorld {
    pub ledger: Arc<InMemoryLedger>,
    pub identity: Arc<StaticIdentityProvider>,
    pub service: TestDashboardService,
    pub last_refresh: Option<Result<Arc<TaskSnapshot>, SyncError>>,
    pub last_action: Option<Result<MutationOutcome, MutationFailed>>,
}

impl DashboardWorld {
    /// Creates a world with an empty ledger and no connected wallet.
    #[must_use]
    pub fn new() -> Self {
        let ledger = Arc::new(InMemoryLedger::new());
        let identity = Arc::new(StaticIdentityProvider::disconnected());
        let service = TaskDashboardService::new(
            Arc::clone(&ledger),
            Arc::clone(&identity),
            Arc::new(DefaultClock),
            DashboardConfig::local(),
        );

        Self {
            ledger,
            identity,
            service,
            last_refresh: None,
            last_action: None,
        }
    }

    /// Returns the board for the current snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if no refresh has succeeded yet.
    pub fn board(&self) -> Result<TaskBoard, eyre::Report> {
        self.service
            .board()
            .ok_or_else(|| eyre::eyre!("dashboard has not synchronized"))
    }
}

impl Default for DashboardWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> DashboardWorld {
    DashboardWorld::default()
}

/// Parses a scenario account address.
///
/// # Errors
///
/// Returns an error if `raw` is not a valid address.
pub fn parse_account(raw: &str) -> Result<AccountAddress, eyre::Report> {
    AccountAddress::new(raw).map_err(|err| eyre::eyre!("invalid scenario address {raw}: {err}"))
}

/// Parses a scenario task identifier.
///
/// # Errors
///
/// Returns an error if `raw` is zero.
pub fn parse_task_id(raw: u64) -> Result<TaskId, eyre::Report> {
    TaskId::new(raw).map_err(|err| eyre::eyre!("invalid scenario task id: {err}"))
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
