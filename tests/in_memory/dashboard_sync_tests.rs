//! In-memory integration tests for dashboard synchronization.

use super::helpers::{
    DashboardContext, account, card_ids, context, seed_open, submit_work, unix_now,
};
use bountydesk::dashboard::{
    adapters::memory::LedgerTaskSeed,
    domain::{Bounty, TaskLifecycle},
    services::{AggregationError, SyncError},
};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn owner_tasks_are_split_across_tabs(context: DashboardContext) {
    let open = seed_open(&context.ledger, "0xA11CE", 100);
    context
        .ledger
        .seed_task(LedgerTaskSeed::new("0xA11CE", "shipped", Bounty::from(5_u64), 1).completed())
        .expect("seed task");
    seed_open(&context.ledger, "0xB0B", 900);
    context
        .ledger
        .seed_task(LedgerTaskSeed::new("0xa11ce", "dropped", Bounty::from(7_u64), 1).cancelled())
        .expect("seed task");
    submit_work(&context.ledger, open, "0xF00");

    context.service.refresh().await.expect("refresh should succeed");

    let board = context.service.board().expect("board after refresh");
    assert_eq!(card_ids(board.active()), vec![1]);
    assert_eq!(card_ids(board.completed()), vec![2]);
    assert_eq!(card_ids(board.cancelled()), vec![4]);
    let card = board.active().first().expect("active card");
    assert_eq!(card.lifecycle(), TaskLifecycle::Active);
    assert_eq!(card.approvable_submissions().len(), 1);
    assert!(!card.cancel_offered());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn switching_wallet_refilters_on_next_refresh(context: DashboardContext) {
    seed_open(&context.ledger, "0xA11CE", 100);
    seed_open(&context.ledger, "0xB0B", 200);
    seed_open(&context.ledger, "0xB0B", 300);
    let first = context.service.refresh().await.expect("first refresh");
    assert_eq!(first.tasks().len(), 1);

    context
        .identity
        .set_accounts(vec![account("0xB0B"), account("0xA11CE")])
        .expect("switch wallet");
    let second = context.service.refresh().await.expect("second refresh");

    assert_eq!(second.owner(), &account("0xb0b"));
    let ids: Vec<u64> = second.tasks().iter().map(|task| task.id().value()).collect();
    assert_eq!(ids, vec![2, 3]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn tasks_created_after_a_refresh_appear_on_the_next_one(context: DashboardContext) {
    seed_open(&context.ledger, "0xA11CE", 100);
    context.service.refresh().await.expect("first refresh");

    seed_open(&context.ledger, "0xA11CE", 200);
    context.ledger.seed_unset_slot().expect("seed unset slot");
    seed_open(&context.ledger, "0xA11CE", 300);
    let snapshot = context.service.refresh().await.expect("second refresh");

    let ids: Vec<u64> = snapshot.tasks().iter().map(|task| task.id().value()).collect();
    assert_eq!(ids, vec![1, 2, 4]);
    let board = context.service.board().expect("board");
    assert_eq!(board.escrowed_total(), Bounty::from(600_u64));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn transient_read_failure_recovers_on_retry(context: DashboardContext) {
    let id = seed_open(&context.ledger, "0xA11CE", 100);
    context
        .ledger
        .fail_submission_reads(id, "rate limited")
        .expect("inject failure");

    let failed = context.service.refresh().await;
    assert!(matches!(
        failed,
        Err(SyncError::Aggregation(AggregationError::SubmissionRead { .. }))
    ));
    assert!(!context.service.is_ready());

    context.ledger.clear_failures().expect("clear failures");
    let snapshot = context.service.refresh().await.expect("retry should succeed");

    assert_eq!(snapshot.tasks().len(), 1);
    assert!(context.service.is_ready());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn past_deadline_is_badged_without_a_ledger_change(context: DashboardContext) {
    let now = unix_now();
    context
        .ledger
        .seed_task(LedgerTaskSeed::new(
            "0xA11CE",
            "overdue",
            Bounty::from(40_u64),
            now - 60,
        ))
        .expect("seed task");
    seed_open(&context.ledger, "0xA11CE", 10);

    context.service.refresh().await.expect("refresh should succeed");

    let board = context.service.board().expect("board");
    let lifecycles: Vec<TaskLifecycle> =
        board.active().iter().map(|card| card.lifecycle()).collect();
    assert_eq!(
        lifecycles,
        vec![TaskLifecycle::Expired, TaskLifecycle::Active]
    );
}
