use std::process::{Command as StdCommand, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use assert_cmd::prelude::*;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn budget(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("budget").unwrap();
    cmd.env("BUDGET_TRACKER_DATA_DIR", data_dir.path())
        .env_remove("RUST_LOG");
    cmd
}

fn add(data_dir: &TempDir, description: &str, amount: &str, kind: &str, category: &str, date: &str) {
    budget(data_dir)
        .args(["add", description, amount, "--type", kind, "--category", category, "--date", date])
        .assert()
        .success();
}

#[test]
fn add_then_list() {
    let data_dir = TempDir::new().unwrap();
    add(&data_dir, "Salary", "1000", "income", "Job", "2024-01-01");

    budget(&data_dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Salary"))
        .stdout(predicate::str::contains("+$1000.00"))
        .stdout(predicate::str::contains("1 of 1 transactions"));
}

#[test]
fn summary_shows_totals_and_budget() {
    let data_dir = TempDir::new().unwrap();
    add(&data_dir, "Salary", "1000", "income", "Job", "2024-01-01");
    add(&data_dir, "Rent", "400", "expense", "Housing", "2024-01-02");
    budget(&data_dir).args(["budget", "set", "1000"]).assert().success();

    budget(&data_dir)
        .arg("summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("$600.00"))
        .stdout(predicate::str::contains("Recent transactions"))
        .stdout(predicate::str::contains("Monthly budget: $1000.00"));
}

#[test]
fn export_to_stdout() {
    let data_dir = TempDir::new().unwrap();
    add(&data_dir, "Lunch \"deluxe\"", "12.5", "expense", "Food", "2024-01-03");

    budget(&data_dir)
        .args(["export", "--output", "-"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "ID,Description,Amount,Type,Category,Date\n1,\"Lunch \"\"deluxe\"\"\",12.5,expense,Food,2024-01-03",
        ));
}

#[test]
fn delete_and_missing_delete() {
    let data_dir = TempDir::new().unwrap();
    add(&data_dir, "Coffee", "4.50", "expense", "Food", "2024-01-03");

    budget(&data_dir)
        .args(["delete", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted transaction #1"));

    budget(&data_dir)
        .args(["delete", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing deleted"));
}

#[test]
fn ids_keep_increasing_after_delete() {
    let data_dir = TempDir::new().unwrap();
    add(&data_dir, "One", "1", "expense", "Misc", "2024-01-01");
    add(&data_dir, "Two", "2", "expense", "Misc", "2024-01-01");
    budget(&data_dir).args(["delete", "2"]).assert().success();

    budget(&data_dir)
        .args(["add", "Three", "3", "--category", "Misc", "--date", "2024-01-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added transaction #3"));
}

#[test]
fn rejects_invalid_input() {
    let data_dir = TempDir::new().unwrap();

    budget(&data_dir)
        .args(["add", "Refund", "-5", "--category", "Misc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));

    budget(&data_dir)
        .args(["budget", "set", "plenty"])
        .assert()
        .failure();

    budget(&data_dir)
        .args(["budget", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No monthly budget set."));
}

#[test]
fn rejects_amounts_over_the_limit() {
    let data_dir = TempDir::new().unwrap();

    for _ in 0..2 {
        budget(&data_dir)
            .args(["add", "Windfall", "60000000000000000", "--type", "income", "--category", "Misc"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("must not exceed"));
    }

    budget(&data_dir)
        .arg("summary")
        .assert()
        .success();
}

#[test]
fn reset_with_force() {
    let data_dir = TempDir::new().unwrap();
    add(&data_dir, "Salary", "1000", "income", "Job", "2024-01-01");

    budget(&data_dir)
        .arg("reset")
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Reset cancelled."));

    budget(&data_dir).args(["reset", "--force"]).assert().success();

    budget(&data_dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No transactions found."));
}

#[test]
fn theme_toggle_persists() {
    let data_dir = TempDir::new().unwrap();

    budget(&data_dir)
        .args(["theme", "toggle"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Theme: dark"));

    budget(&data_dir)
        .arg("theme")
        .assert()
        .success()
        .stdout(predicate::str::contains("Theme: dark"));
}

#[test]
fn config_shows_paths() {
    let data_dir = TempDir::new().unwrap();

    budget(&data_dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Data directory"))
        .stdout(predicate::str::contains("Currency symbol: $"));
}

#[test]
fn watch_picks_up_changes_from_another_process() {
    let data_dir = TempDir::new().unwrap();
    std::fs::write(data_dir.path().join("config.json"), r#"{"poll_interval_ms": 20}"#).unwrap();

    let mut watcher = StdCommand::cargo_bin("budget")
        .unwrap()
        .env("BUDGET_TRACKER_DATA_DIR", data_dir.path())
        .args(["watch", "--max-updates", "1"])
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .unwrap();

    thread::sleep(Duration::from_millis(500));
    add(&data_dir, "Bonus", "250", "income", "Job", "2024-02-01");

    let deadline = Instant::now() + Duration::from_secs(10);
    let status = loop {
        if let Some(status) = watcher.try_wait().unwrap() {
            break Some(status);
        }
        if Instant::now() > deadline {
            watcher.kill().unwrap();
            break None;
        }
        thread::sleep(Duration::from_millis(20));
    };

    assert!(status.is_some_and(|s| s.success()), "watch did not see the change");
    let output = watcher.wait_with_output().unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Bonus"));
    assert!(stdout.contains("$250.00"));
}
