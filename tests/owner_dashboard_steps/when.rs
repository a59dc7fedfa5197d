//! When steps for owner dashboard BDD scenarios.

use super::world::{DashboardWorld, parse_account, parse_task_id, run_async};
use rstest_bdd_macros::when;

#[when("the dashboard refreshes")]
fn dashboard_refreshes(world: &mut DashboardWorld) {
    let result = run_async(world.service.refresh());
    world.last_refresh = Some(result);
}

#[when(r#"the owner approves the submission from "{freelancer}" on task {id:u64}"#)]
fn owner_approves(
    world: &mut DashboardWorld,
    freelancer: String,
    id: u64,
) -> Result<(), eyre::Report> {
    let task_id = parse_task_id(id)?;
    let address = parse_account(&freelancer)?;
    let result = run_async(world.service.approve_submission(task_id, &address));
    world.last_action = Some(result);
    Ok(())
}

#[when("the owner cancels task {id:u64}")]
fn owner_cancels(world: &mut DashboardWorld, id: u64) -> Result<(), eyre::Report> {
    let task_id = parse_task_id(id)?;
    let result = run_async(world.service.cancel_task(task_id));
    world.last_action = Some(result);
    Ok(())
}
