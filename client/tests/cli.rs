//! `ledger` command runs against the in-memory gateway.

use std::sync::Arc;

use clap::Parser;
use ledger_client::domain::TransactionKind;
use ledger_client::inbound::cli::{Cli, RunError, run};
use ledger_client::test_support::{GatewayCall, InMemoryLedgerGateway, RecordingNotifier};

async fn run_args(
    gateway: &Arc<InMemoryLedgerGateway>,
    notifier: &Arc<RecordingNotifier>,
    args: &[&str],
) -> (Result<(), RunError>, String) {
    let cli = Cli::try_parse_from(args.iter().copied()).expect("arguments parse");
    let mut out = Vec::new();
    let outcome = run(
        &cli.command,
        Arc::clone(gateway),
        Arc::clone(notifier),
        &mut out,
    )
    .await;
    (outcome, String::from_utf8(out).expect("utf-8 output"))
}

#[tokio::test]
async fn transactions_list_prints_totals_rows() {
    let gateway = Arc::new(InMemoryLedgerGateway::new());
    let notifier = Arc::new(RecordingNotifier::new());
    let ana = gateway.seed_person("Ana", 30);
    gateway.seed_transaction(&ana, TransactionKind::Income, "salary", 500.0);
    gateway.seed_transaction(&ana, TransactionKind::Expense, "rent", 200.0);

    let (outcome, printed) =
        run_args(&gateway, &notifier, &["ledger", "transactions", "list"]).await;

    outcome.expect("listing succeeds");
    let lines: Vec<&str> = printed.lines().collect();
    assert!(lines.contains(&"Ana | INCOME | salary | 500.00"));
    assert!(lines.contains(&"Ana | EXPENSE | rent | 200.00"));
    assert!(lines.contains(&"Ana | 500.00 | 200.00 | 300.00"));
    assert_eq!(lines.last(), Some(&"500.00 | 200.00 | 300.00"));
    assert!(notifier.notifications().is_empty());
}

#[tokio::test]
async fn people_add_prints_refreshed_registry() {
    let gateway = Arc::new(InMemoryLedgerGateway::new());
    let notifier = Arc::new(RecordingNotifier::new());

    let (outcome, printed) = run_args(
        &gateway,
        &notifier,
        &["ledger", "people", "add", "--name", " Ana ", "--age", "30"],
    )
    .await;

    outcome.expect("add succeeds");
    assert_eq!(
        printed,
        "People\nName | Age | Created | Id\nAna | 30 | 2024-05-01 | p1\n"
    );
    assert_eq!(
        gateway.calls(),
        vec![
            GatewayCall::ListPeople,
            GatewayCall::CreatePerson,
            GatewayCall::ListPeople,
        ]
    );
}

#[tokio::test]
async fn people_delete_removes_row() {
    let gateway = Arc::new(InMemoryLedgerGateway::new());
    let notifier = Arc::new(RecordingNotifier::new());
    let ana = gateway.seed_person("Ana", 30);
    gateway.seed_person("Bruno", 41);

    let (outcome, printed) =
        run_args(&gateway, &notifier, &["ledger", "people", "delete", ana.as_ref()]).await;

    outcome.expect("delete succeeds");
    assert!(!printed.contains("Ana"));
    assert!(printed.contains("Bruno | 41"));
}

#[tokio::test]
async fn invalid_amount_fails_with_one_validation_notice() {
    let gateway = Arc::new(InMemoryLedgerGateway::new());
    let notifier = Arc::new(RecordingNotifier::new());
    let ana = gateway.seed_person("Ana", 30);

    let (outcome, printed) = run_args(
        &gateway,
        &notifier,
        &[
            "ledger",
            "transactions",
            "add",
            "--person",
            ana.as_ref(),
            "--kind",
            "expense",
            "--description",
            "rent",
            "--amount",
            "lots",
        ],
    )
    .await;

    assert!(matches!(outcome, Err(RunError::Sync(_))));
    assert!(printed.is_empty());
    assert_eq!(notifier.validation_count(), 1);
    assert_eq!(gateway.call_count(GatewayCall::CreateTransaction), 0);
}
