#![cfg(feature = "cli_api")]

use assert_cmd::Command;
use predicates::str::contains as str_contains;
use tempfile::{NamedTempFile, tempdir};

#[allow(deprecated)]
fn run_cli(script: &str) -> assert_cmd::assert::Assert {
    let mut cmd = Command::cargo_bin("cli").expect("cli binary");
    cmd.write_stdin(script.to_string()).assert()
}

#[test]
fn cli_adds_and_lists_tasks() {
    run_cli("task add Math 2 4 3 - Algebra worksheet +homework,week1\ntasks\nquit\n")
        .success()
        .stdout(str_contains("Added task id=1"))
        .stdout(str_contains("Algebra worksheet"))
        .stdout(str_contains("homework,week1"));
}

#[test]
fn cli_rejects_bad_task_input() {
    run_cli("task add Math lots 4 3 - Algebra\ntask add Math 2 4 3 tomorrow Algebra\ntask add Math 2\nquit\n")
        .success()
        .stdout(str_contains("Invalid hours"))
        .stdout(str_contains("Invalid due date"))
        .stdout(str_contains("Usage: task add"));
}

#[test]
fn cli_status_commands_report_new_status() {
    run_cli("task add - 1 3 3 - Flashcards\ndone 1\nundo 1\ntoggle 1\ndelete 1\ndelete 1\nquit\n")
        .success()
        .stdout(str_contains("Task 1 is now completed."))
        .stdout(str_contains("Task 1 is now pending."))
        .stdout(str_contains("Deleted task 1."))
        .stdout(str_contains("Error: task 1 not found"));
}

#[test]
fn cli_plan_spreads_effort_over_days() {
    let assert = run_cli("task add English 5 3 3 - Essay\nplan 2 3\nplan show\nquit\n").success();
    let output = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(output.contains("mode=commit, entries=3, hours=5.00"));
    assert!(output.contains("Session 1"));
    assert!(output.contains("1.00"));
}

#[test]
fn cli_preview_does_not_store_a_plan() {
    run_cli("task add English 5 3 3 - Essay\nplan 2 3 preview\nplan show\nquit\n")
        .success()
        .stdout(str_contains("mode=preview"))
        .stdout(str_contains("No study plan stored."));
}

#[test]
fn cli_plan_with_nothing_pending() {
    run_cli("plan\nplan clear\nquit\n")
        .success()
        .stdout(str_contains("No pending tasks to plan."))
        .stdout(str_contains("entries=0"))
        .stdout(str_contains("Study plan cleared."));
}

#[test]
fn cli_records_exams_and_classes() {
    let script = "project add Physics\nprojects\nexam add Physics 2999-01-01 Final exam\nexams\nclass add Physics Mon 09:00 10:30 Room 2\ntimetable Mon\nquit\n";
    run_cli(script)
        .success()
        .stdout(str_contains("Project 'Physics' added (id=1)."))
        .stdout(str_contains("Added exam id=2"))
        .stdout(str_contains("Final exam"))
        .stdout(str_contains("Added class id=3"))
        .stdout(str_contains("09:00-10:30"));
}

#[test]
fn cli_summary_counts_tasks() {
    run_cli("task add Math 1 3 3 - A\ntask add Bio 1 3 3 - B\ndone 2\nsummary\nquit\n")
        .success()
        .stdout(str_contains("total=2, completed=1, pending=1"));
}

#[test]
fn cli_exports_plan_csv() {
    let tmp = NamedTempFile::new().expect("create temp file");
    let path = tmp.path().to_string_lossy().to_string();
    let script = format!("task add English 3 3 3 - Essay\nplan 2 2\nexport plan csv {}\nquit\n", path);
    run_cli(&script)
        .success()
        .stdout(str_contains("Plan exported to"));
    let contents = std::fs::read_to_string(tmp.path()).expect("read csv");
    assert!(contents.starts_with("date,session,subject,task_id,task,hours"));
    assert!(contents.contains("English,1,Essay,2.00"));
    assert!(contents.contains("English,1,Essay,1.00"));
}

#[test]
fn cli_exports_board_json() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("board.json");
    let script = format!("task add - 1 3 3 - Read\nexport board {}\nquit\n", path.display());
    run_cli(&script)
        .success()
        .stdout(str_contains("Board exported to"));
    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).expect("read json")).expect("json");
    assert_eq!(value["tasks"][0]["project"], "Inbox");
}

#[test]
#[allow(deprecated)]
fn cli_reads_config_file() {
    let config = NamedTempFile::new().expect("create temp file");
    std::fs::write(config.path(), r#"{ "daily_hours": 1.0, "horizon_days": 2, "default_project": "General" }"#)
        .expect("write config");
    let mut cmd = Command::cargo_bin("cli").expect("cli binary");
    cmd.arg("--config")
        .arg(config.path())
        .write_stdin("task add - 5 3 3 - Big\nplan\nquit\n")
        .assert()
        .success()
        .stdout(str_contains("entries=2, hours=2.00"))
        .stdout(str_contains("unscheduled=3.00"));
}

#[test]
fn cli_unknown_command() {
    run_cli("frobnicate\nquit\n")
        .success()
        .stdout(str_contains("Unknown command. Type 'help'."));
}
