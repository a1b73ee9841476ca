//! End-to-end CLI tests against the seed backend.

use assert_cmd::Command;
use predicates::prelude::*;

fn deskhand() -> Command {
    let mut cmd = Command::cargo_bin("deskhand").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn help_lists_commands() {
    deskhand()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("transition"))
        .stdout(predicate::str::contains("transitions"))
        .stdout(predicate::str::contains("create"))
        .stdout(predicate::str::contains("remove-thread"));
}

#[test]
fn transitions_prints_reachable_statuses() {
    deskhand()
        .args(["transitions", "order", "shipped"])
        .assert()
        .success()
        .stdout(predicate::str::diff("delivered\n"));
}

#[test]
fn transitions_reports_terminal_status() {
    deskhand()
        .args(["transitions", "order", "delivered"])
        .assert()
        .success()
        .stdout(predicate::str::contains("delivered is terminal"));
}

#[test]
fn unknown_kind_is_an_error() {
    deskhand()
        .args(["transitions", "invoice", "open"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown entity kind `invoice`"));
}

#[test]
fn unknown_status_is_an_error() {
    deskhand()
        .args(["transitions", "order", "lost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown order status `lost`"));
}

#[test]
fn seed_list_shows_collection() {
    deskhand()
        .args(["--seed", "list", "order"])
        .assert()
        .success()
        .stdout(predicate::str::contains("o-1001"))
        .stdout(predicate::str::contains("o-1004"))
        .stdout(predicate::str::contains("4 records"));
}

#[test]
fn seed_list_applies_status_facet_and_search() {
    deskhand()
        .args(["--seed", "list", "order", "--status", "pending"])
        .assert()
        .success()
        .stdout(predicate::str::contains("o-1001"))
        .stdout(predicate::str::contains("1 of 4 records"));

    deskhand()
        .args(["--seed", "list", "order", "--search", "okafor", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Maya Okafor"));
}

#[test]
fn seed_transition_prints_updated_record() {
    deskhand()
        .args(["--seed", "transition", "order", "o-1001", "processing"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"processing\""))
        .stdout(predicate::str::contains("o-1001"));
}

#[test]
fn illegal_transition_fails_with_reason() {
    deskhand()
        .args(["--seed", "transition", "order", "o-1003", "cancelled"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "illegal transition from `shipped` to `cancelled`",
        ));
}

#[test]
fn transition_with_missing_side_effect_data_fails() {
    deskhand()
        .args([
            "--seed",
            "transition",
            "approval",
            "p-4001",
            "changes_requested",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("feedback"));
}

#[test]
fn transition_accepts_side_effect_fields() {
    deskhand()
        .args([
            "--seed",
            "transition",
            "approval",
            "p-4001",
            "approved",
            "--set",
            "approvedBy=dana",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"approved\""))
        .stdout(predicate::str::contains("dana"));
}

#[test]
fn seed_create_prints_backend_assigned_record() {
    deskhand()
        .args([
            "--seed",
            "create",
            "order",
            r#"{"customerName":"Lena Krause","platform":"shopify","totalCents":5400,"currency":"EUR","status":"pending"}"#,
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Lena Krause"))
        .stdout(predicate::str::contains("\"id\""));
}

#[test]
fn remove_thread_resolves_open_reports() {
    deskhand()
        .args(["--seed", "remove-thread", "t-5002"])
        .assert()
        .success()
        .stdout(predicate::str::contains("thread t-5002 removed"))
        .stdout(predicate::str::contains("2 reports resolved"));
}
