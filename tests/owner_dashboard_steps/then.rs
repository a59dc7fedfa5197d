//! Then steps for owner dashboard BDD scenarios.

use super::world::{DashboardWorld, parse_task_id};
use bountydesk::dashboard::{
    domain::{Bounty, TaskLifecycle, TaskStatus},
    ports::LedgerError,
    services::{IdentityUnavailableError, MutationFailureReason, SyncError, TransactionError},
};
use eyre::WrapErr;
use rstest_bdd_macros::then;

fn expect_count(tab: &str, actual: usize, expected: u64) -> Result<(), eyre::Report> {
    let expected_len = usize::try_from(expected).wrap_err("scenario count out of range")?;
    if actual != expected_len {
        return Err(eyre::eyre!(
            "expected {expected} tasks in the {tab} tab, found {actual}"
        ));
    }
    Ok(())
}

#[then("the dashboard holds {count:u64} owned tasks")]
fn dashboard_holds(world: &DashboardWorld, count: u64) -> Result<(), eyre::Report> {
    let snapshot = world
        .service
        .snapshot()
        .ok_or_else(|| eyre::eyre!("dashboard has not synchronized"))?;
    expect_count("owned", snapshot.tasks().len(), count)
}

#[then("the active tab count is {count:u64}")]
fn active_tab_count(world: &DashboardWorld, count: u64) -> Result<(), eyre::Report> {
    expect_count("active", world.board()?.active().len(), count)
}

#[then("the completed tab count is {count:u64}")]
fn completed_tab_count(world: &DashboardWorld, count: u64) -> Result<(), eyre::Report> {
    expect_count("completed", world.board()?.completed().len(), count)
}

#[then("the cancelled tab count is {count:u64}")]
fn cancelled_tab_count(world: &DashboardWorld, count: u64) -> Result<(), eyre::Report> {
    expect_count("cancelled", world.board()?.cancelled().len(), count)
}

#[then("task {id:u64} is shown as expired")]
fn task_is_expired(world: &DashboardWorld, id: u64) -> Result<(), eyre::Report> {
    let task_id = parse_task_id(id)?;
    let board = world.board()?;
    let card = board
        .active()
        .iter()
        .find(|card| card.task().id() == task_id)
        .ok_or_else(|| eyre::eyre!("task {id} is not in the active tab"))?;
    if card.lifecycle() != TaskLifecycle::Expired {
        return Err(eyre::eyre!(
            "expected task {id} to be expired, found {}",
            card.lifecycle().as_str()
        ));
    }
    Ok(())
}

#[then("the action is confirmed and the dashboard is resynchronized")]
fn action_confirmed(world: &DashboardWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_action
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing action result"))?;
    match result {
        Ok(outcome) if outcome.synchronized => Ok(()),
        Ok(_) => Err(eyre::eyre!("action confirmed but dashboard not resynchronized")),
        Err(err) => Err(eyre::eyre!("expected confirmed action, got {err}")),
    }
}

#[then("the action fails with a reverted transaction")]
fn action_reverted(world: &DashboardWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_action
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing action result"))?;
    let reverted = matches!(
        result,
        Err(failure) if matches!(
            failure.reason,
            MutationFailureReason::Transaction(TransactionError::Confirmation(
                LedgerError::Reverted { .. }
            ))
        )
    );
    if !reverted {
        return Err(eyre::eyre!("expected reverted transaction, got {result:?}"));
    }
    Ok(())
}

#[then("the dashboard still shows task {id:u64} as open")]
fn task_still_open(world: &DashboardWorld, id: u64) -> Result<(), eyre::Report> {
    let task_id = parse_task_id(id)?;
    let snapshot = world
        .service
        .snapshot()
        .ok_or_else(|| eyre::eyre!("dashboard has not synchronized"))?;
    let task = snapshot
        .find(task_id)
        .ok_or_else(|| eyre::eyre!("task {id} missing from dashboard"))?;
    if task.status() != TaskStatus::Open {
        return Err(eyre::eyre!(
            "expected task {id} to be open, found {}",
            task.status().as_str()
        ));
    }
    Ok(())
}

#[then(r#"freelancer "{freelancer}" has been paid {amount:u64}"#)]
fn freelancer_paid(
    world: &DashboardWorld,
    freelancer: String,
    amount: u64,
) -> Result<(), eyre::Report> {
    let balance = world
        .ledger
        .balance_of(&freelancer)
        .wrap_err("read freelancer balance")?;
    if balance != Bounty::from(amount) {
        return Err(eyre::eyre!(
            "expected {freelancer} to hold {amount}, found {balance}"
        ));
    }
    Ok(())
}

#[then("the refresh fails because no wallet is connected")]
fn refresh_needs_wallet(world: &DashboardWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_refresh
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing refresh result"))?;
    if !matches!(
        result,
        Err(SyncError::Identity(IdentityUnavailableError::NoActiveAccount))
    ) {
        return Err(eyre::eyre!("expected NoActiveAccount, got {result:?}"));
    }
    if world.service.is_ready() {
        return Err(eyre::eyre!("dashboard should not be ready"));
    }
    Ok(())
}
