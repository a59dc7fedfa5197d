//! Given steps for owner dashboard BDD scenarios.

use super::world::{DashboardWorld, parse_account, parse_task_id, run_async};
use bountydesk::dashboard::{adapters::memory::LedgerTaskSeed, domain::Bounty};
use chrono::Utc;
use eyre::WrapErr;
use rstest_bdd_macros::given;

fn unix_now() -> Result<u64, eyre::Report> {
    u64::try_from(Utc::now().timestamp()).wrap_err("clock before epoch")
}

fn seed(world: &DashboardWorld, task: LedgerTaskSeed) -> Result<(), eyre::Report> {
    world
        .ledger
        .seed_task(task)
        .wrap_err("seed ledger task for scenario")?;
    Ok(())
}

#[given(r#"a ledger task owned by "{provider}" with bounty {bounty:u64}"#)]
fn open_task(
    world: &mut DashboardWorld,
    provider: String,
    bounty: u64,
) -> Result<(), eyre::Report> {
    let deadline = unix_now()? + 3_600;
    seed(
        world,
        LedgerTaskSeed::new(provider, "Scenario task", Bounty::from(bounty), deadline),
    )
}

#[given(r#"a cancelled ledger task owned by "{provider}" with bounty {bounty:u64}"#)]
fn cancelled_task(
    world: &mut DashboardWorld,
    provider: String,
    bounty: u64,
) -> Result<(), eyre::Report> {
    let deadline = unix_now()? + 3_600;
    seed(
        world,
        LedgerTaskSeed::new(provider, "Dropped task", Bounty::from(bounty), deadline).cancelled(),
    )
}

#[given(r#"an expired ledger task owned by "{provider}""#)]
fn expired_task(world: &mut DashboardWorld, provider: String) -> Result<(), eyre::Report> {
    let deadline = unix_now()? - 10;
    seed(
        world,
        LedgerTaskSeed::new(provider, "Overdue task", Bounty::from(10_u64), deadline),
    )
}

#[given(r#"freelancer "{freelancer}" has submitted work on task {id:u64}"#)]
fn submitted_work(
    world: &mut DashboardWorld,
    freelancer: String,
    id: u64,
) -> Result<(), eyre::Report> {
    let task_id = parse_task_id(id)?;
    let link = format!("https://example.com/{freelancer}/{id}");
    world
        .ledger
        .add_submission(task_id, freelancer, link)
        .wrap_err("record submission for scenario")
}

#[given(r#"the wallet is connected as "{account}""#)]
fn wallet_connected(world: &mut DashboardWorld, account: String) -> Result<(), eyre::Report> {
    let address = parse_account(&account)?;
    world
        .identity
        .set_accounts(vec![address])
        .wrap_err("connect scenario wallet")
}

#[given("no wallet is connected")]
fn wallet_disconnected(world: &mut DashboardWorld) -> Result<(), eyre::Report> {
    world
        .identity
        .set_accounts(Vec::new())
        .wrap_err("disconnect scenario wallet")
}

#[given("the dashboard has synchronized")]
fn dashboard_synchronized(world: &mut DashboardWorld) -> Result<(), eyre::Report> {
    run_async(world.service.refresh()).wrap_err("initial refresh for scenario")?;
    Ok(())
}

#[given("the ledger will revert the next transaction")]
fn ledger_reverts(world: &mut DashboardWorld) -> Result<(), eyre::Report> {
    world
        .ledger
        .revert_next_transaction("execution reverted")
        .wrap_err("inject revert for scenario")
}
