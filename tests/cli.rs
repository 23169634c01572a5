#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use chrono::Datelike;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn tracker_cmd(data_dir: &Path) -> Command {
    let mut cmd = Command::new(cargo_bin("tracker"));
    cmd.env("TRACKER_DATA_DIR", data_dir.as_os_str())
        .env_remove("TRACKER_LOG");
    cmd
}

fn init_tasks(data_dir: &Path) {
    tracker_cmd(data_dir).arg("init").assert().success();
}

#[test]
fn test_grocery_workflow() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();

    tracker_cmd(dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized task store"));
    assert!(dir.join("tasks.json").exists());
    assert!(dir.join("config.json").exists());

    tracker_cmd(dir)
        .args(["add", "Buy groceries"])
        .assert()
        .success()
        .stdout("Task added successfully (ID: 1)\n");

    tracker_cmd(dir)
        .arg("list")
        .assert()
        .success()
        .stdout("[1] todo         Buy groceries\n");

    tracker_cmd(dir)
        .args(["mark", "1", "done"])
        .assert()
        .success()
        .stdout(predicate::str::contains("marked as done"));

    let stored: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.join("tasks.json")).unwrap()).unwrap();
    assert_eq!(stored["records"][0]["status"], "done");
    assert!(stored["records"][0]["updated_at"].is_string());

    tracker_cmd(dir)
        .args(["delete", "1"])
        .assert()
        .success()
        .stdout("Task deleted successfully (ID: 1)\n");

    tracker_cmd(dir)
        .args(["list", "all"])
        .assert()
        .success()
        .stdout("No tasks found.\n");

    // Deleted ids are never handed out again
    tracker_cmd(dir)
        .args(["add", "Buy milk"])
        .assert()
        .success()
        .stdout("Task added successfully (ID: 2)\n");
}

#[test]
fn test_list_filters_by_status() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();
    init_tasks(dir);

    tracker_cmd(dir).args(["add", "one"]).assert().success();
    tracker_cmd(dir)
        .args(["add", "two", "--status", "in-progress"])
        .assert()
        .success();

    tracker_cmd(dir)
        .args(["list", "in-progress"])
        .assert()
        .success()
        .stdout("[2] in-progress  two\n");

    tracker_cmd(dir)
        .args(["list", "--counts"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "2 tasks (1 todo, 1 in-progress, 0 done)",
        ));
}

#[test]
fn test_update_and_show() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();
    init_tasks(dir);

    tracker_cmd(dir)
        .args(["add", "Draft", "--description", "first pass"])
        .assert()
        .success();

    tracker_cmd(dir)
        .args(["update", "1", "--title", "  Final  "])
        .assert()
        .success()
        .stdout("Task updated successfully (ID: 1)\n");

    tracker_cmd(dir)
        .args(["show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Title:       Final\n"))
        .stdout(predicate::str::contains("Description: first pass"))
        .stdout(predicate::str::contains("Updated:"));

    tracker_cmd(dir)
        .args(["update", "1", "--clear-description"])
        .assert()
        .success();

    tracker_cmd(dir)
        .args(["show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Description").not());
}

#[test]
fn test_empty_update_is_usage_error() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();
    init_tasks(dir);
    tracker_cmd(dir).args(["add", "task"]).assert().success();

    let before = fs::read_to_string(dir.join("tasks.json")).unwrap();

    tracker_cmd(dir)
        .args(["update", "1"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("No changes specified"));

    assert_eq!(fs::read_to_string(dir.join("tasks.json")).unwrap(), before);
}

#[test]
fn test_not_initialized() {
    let temp = TempDir::new().unwrap();

    tracker_cmd(temp.path())
        .arg("list")
        .assert()
        .code(4)
        .stderr(predicate::str::contains("run init first"));
}

#[test]
fn test_init_twice_requires_force() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();
    init_tasks(dir);
    tracker_cmd(dir).args(["add", "keep me"]).assert().success();

    tracker_cmd(dir)
        .arg("init")
        .assert()
        .code(4)
        .stderr(predicate::str::contains("already initialized"));

    tracker_cmd(dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("keep me"));

    tracker_cmd(dir).args(["init", "--force"]).assert().success();

    tracker_cmd(dir)
        .arg("list")
        .assert()
        .success()
        .stdout("No tasks found.\n");
}

#[test]
fn test_invalid_status() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();
    init_tasks(dir);
    tracker_cmd(dir).args(["add", "task"]).assert().success();

    let before = fs::read_to_string(dir.join("tasks.json")).unwrap();

    tracker_cmd(dir)
        .args(["mark", "1", "finished"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid status 'finished'"));

    tracker_cmd(dir)
        .args(["list", "someday"])
        .assert()
        .code(2);

    assert_eq!(fs::read_to_string(dir.join("tasks.json")).unwrap(), before);
}

#[test]
fn test_missing_id_is_not_found() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();
    init_tasks(dir);

    tracker_cmd(dir)
        .args(["delete", "42"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Task not found: 42"));

    tracker_cmd(dir).args(["mark", "42", "done"]).assert().code(3);
}

#[test]
fn test_corrupt_store_is_left_alone() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();
    let contents = r#"{"records": "not-a-list"}"#;
    fs::write(dir.join("tasks.json"), contents).unwrap();

    tracker_cmd(dir)
        .arg("list")
        .assert()
        .code(5)
        .stderr(predicate::str::contains("Corrupt store"));

    tracker_cmd(dir).args(["add", "task"]).assert().code(5);

    assert_eq!(fs::read_to_string(dir.join("tasks.json")).unwrap(), contents);
}

#[test]
fn test_persist_failure_keeps_previous_file() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();
    init_tasks(dir);
    tracker_cmd(dir).args(["add", "first"]).assert().success();

    let before = fs::read_to_string(dir.join("tasks.json")).unwrap();

    // A directory where the temp file should go makes the write fail
    fs::create_dir(dir.join("tasks.json.tmp")).unwrap();

    tracker_cmd(dir)
        .args(["add", "second"])
        .assert()
        .code(6)
        .stderr(predicate::str::contains("Failed to persist"));

    assert_eq!(fs::read_to_string(dir.join("tasks.json")).unwrap(), before);
}

#[test]
fn test_export_tasks_to_file() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();
    init_tasks(dir);
    tracker_cmd(dir).args(["add", "one"]).assert().success();
    tracker_cmd(dir)
        .args(["add", "two", "--status", "done"])
        .assert()
        .success();

    let output = dir.join("done.csv");
    tracker_cmd(dir)
        .args(["export", "--status", "done", "--output"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 1 tasks"));

    let csv = fs::read_to_string(&output).unwrap();
    let lines: Vec<_> = csv.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "id,title,description,status,created_at,updated_at");
    assert!(lines[1].starts_with("2,two,,done,"));
}

#[test]
fn test_expense_workflow_with_budget() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();
    let month = chrono::Local::now().month().to_string();

    tracker_cmd(dir)
        .args(["expense", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized expense store"));

    tracker_cmd(dir)
        .args(["expense", "budget", "set", "100", "--month", &month])
        .assert()
        .success()
        .stdout(predicate::str::contains("set to $100.00"));

    tracker_cmd(dir)
        .args(["expense", "add", "Lunch", "12.50", "--category", "food"])
        .assert()
        .success()
        .stdout("Expense added successfully (ID: 1)\n");

    tracker_cmd(dir)
        .args(["expense", "add", "Rent", "150", "--category", "housing"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Expense added successfully (ID: 2)"))
        .stdout(predicate::str::contains("exceeded by $62.50"));

    tracker_cmd(dir)
        .args(["expense", "summary"])
        .assert()
        .success()
        .stdout("Total expenses: $162.50\n");

    tracker_cmd(dir)
        .args(["expense", "summary", "--month", &month])
        .assert()
        .success()
        .stdout(predicate::str::contains("$162.50"));

    tracker_cmd(dir)
        .args(["expense", "list", "--category", "FOOD"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Lunch"))
        .stdout(predicate::str::contains("Rent").not());

    tracker_cmd(dir)
        .args(["expense", "budget", "check", "--month", &month])
        .assert()
        .success()
        .stdout(predicate::str::contains("Over by:"))
        .stdout(predicate::str::contains("$62.50"));

    tracker_cmd(dir)
        .args([
            "expense", "budget", "check", "--month", &month, "--amount", "500",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Remaining:"));

    tracker_cmd(dir)
        .args(["expense", "export", "--category", "housing"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "id,title,description,category,amount,created_at,updated_at\n2,Rent,,housing,150.00,",
        ));
}

#[test]
fn test_expense_default_category_and_invalid_input() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();
    tracker_cmd(dir).args(["expense", "init"]).assert().success();

    tracker_cmd(dir)
        .args(["expense", "add", "Stamps", "3"])
        .assert()
        .success();

    tracker_cmd(dir)
        .args(["expense", "summary", "--by-category"])
        .assert()
        .success()
        .stdout(predicate::str::contains("general"));

    tracker_cmd(dir)
        .args(["expense", "add", "Refund", "-5"])
        .assert()
        .code(2);

    tracker_cmd(dir)
        .args(["expense", "summary", "--month", "13"])
        .assert()
        .code(2);

    tracker_cmd(dir)
        .args(["expense", "budget", "check", "--month", "1", "--year", "1999"])
        .assert()
        .code(3);
}

#[test]
fn test_audit_log_off_by_default() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();
    init_tasks(dir);
    tracker_cmd(dir).args(["add", "Buy groceries"]).assert().success();

    assert!(!dir.join("audit.log").exists());
    tracker_cmd(dir)
        .arg("audit")
        .assert()
        .success()
        .stdout(predicate::str::contains("Auditing is off"));
}

#[test]
fn test_audit_log_records_changes() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path();
    init_tasks(dir);
    fs::write(dir.join("config.json"), r#"{"audit_enabled": true}"#).unwrap();
    tracker_cmd(dir).args(["add", "Buy groceries"]).assert().success();
    tracker_cmd(dir).args(["mark", "1", "done"]).assert().success();

    tracker_cmd(dir)
        .arg("audit")
        .assert()
        .success()
        .stdout(predicate::str::contains("CREATE Task #1 (Buy groceries)"))
        .stdout(predicate::str::contains("UPDATE Task #1"));
}

#[test]
fn test_data_dir_flag() {
    let temp = TempDir::new().unwrap();
    let other = temp.path().join("elsewhere");

    Command::new(cargo_bin("tracker"))
        .env_remove("TRACKER_DATA_DIR")
        .arg("--data-dir")
        .arg(&other)
        .arg("init")
        .assert()
        .success();

    assert!(other.join("tasks.json").exists());
}
