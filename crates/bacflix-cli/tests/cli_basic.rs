//! Basic CLI E2E tests.
//!
//! Each test runs the built binary against its own data directory.

use std::path::Path;
use std::process::Command;

use serde_json::Value;
use tempfile::TempDir;

/// Run a CLI command and return (exit code, stdout, stderr).
fn run_cli(dir: &Path, args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_bacflix"))
        .args(args)
        .env("BACFLIX_DATA_DIR", dir)
        .env_remove("BACFLIX_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

fn run_json(dir: &Path, args: &[&str]) -> Value {
    let (code, stdout, stderr) = run_cli(dir, args);
    assert_eq!(code, 0, "{args:?} failed: {stderr}");
    serde_json::from_str(&stdout).unwrap_or_else(|e| panic!("{args:?} printed non-JSON ({e}): {stdout}"))
}

#[test]
fn test_branch_list_marks_default_active() {
    let dir = TempDir::new().unwrap();
    let branches = run_json(dir.path(), &["branch", "list"]);
    let branches = branches.as_array().unwrap();
    assert_eq!(branches.len(), 3);
    assert_eq!(branches[0]["id"], "math");
    assert_eq!(branches[0]["active"], true);
    assert_eq!(branches[1]["active"], false);
}

#[test]
fn test_branch_select_persists() {
    let dir = TempDir::new().unwrap();
    let event = run_json(dir.path(), &["branch", "select", "tech"]);
    assert_eq!(event["type"], "BranchSelected");

    let subjects = run_json(dir.path(), &["subject", "list"]);
    assert_eq!(subjects.as_array().unwrap().len(), 4);
}

#[test]
fn test_branch_select_unknown_fails() {
    let dir = TempDir::new().unwrap();
    let (code, _, stderr) = run_cli(dir.path(), &["branch", "select", "history"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"));
}

#[test]
fn test_subject_level_rejects_bad_level() {
    let dir = TempDir::new().unwrap();
    let (code, _, stderr) = run_cli(dir.path(), &["subject", "level", "الرياضيات", "expert"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"));
}

#[test]
fn test_plan_generate_and_show() {
    let dir = TempDir::new().unwrap();
    let event = run_json(dir.path(), &["plan", "generate"]);
    assert_eq!(event["type"], "PlanGenerated");
    assert_eq!(event["tasks"], 24);
    assert_eq!(event["xp_awarded"], 20);

    let tasks = run_json(dir.path(), &["plan", "show", "--json"]);
    let tasks = tasks.as_array().unwrap();
    assert_eq!(tasks.len(), 24);
    assert_eq!(tasks[0]["id"], "task_0_0");
    assert_eq!(tasks[0]["time"], "08:30");

    let (code, stdout, _) = run_cli(dir.path(), &["plan", "show"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("progress: 0%"));
}

#[test]
fn test_plan_show_without_plan() {
    let dir = TempDir::new().unwrap();
    let (code, stdout, _) = run_cli(dir.path(), &["plan", "show"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("No plan yet"));
}

#[test]
fn test_task_toggle_and_rate() {
    let dir = TempDir::new().unwrap();
    run_json(dir.path(), &["plan", "generate"]);

    let event = run_json(dir.path(), &["task", "toggle", "task_0_0"]);
    assert_eq!(event["type"], "TaskToggled");
    assert_eq!(event["done"], true);
    assert_eq!(event["xp_awarded"], 15);

    let event = run_json(dir.path(), &["task", "rate", "task_0_0", "4"]);
    assert_eq!(event["type"], "ConfidenceSet");

    let task = run_json(dir.path(), &["task", "show", "task_0_0"]);
    assert_eq!(task["done"], true);
    assert_eq!(task["conf"], 4);

    let stats = run_json(dir.path(), &["stats"]);
    assert_eq!(stats["done"], 1);
    assert_eq!(stats["total"], 24);
    assert_eq!(stats["progress"], 4);
    assert_eq!(stats["xp"], 35);
}

#[test]
fn test_task_unknown_id_is_ignored() {
    let dir = TempDir::new().unwrap();
    run_json(dir.path(), &["plan", "generate"]);
    let event = run_json(dir.path(), &["task", "toggle", "task_9_9"]);
    assert_eq!(event["type"], "Ignored");
}

#[test]
fn test_task_rate_out_of_range_fails() {
    let dir = TempDir::new().unwrap();
    run_json(dir.path(), &["plan", "generate"]);
    let (code, _, stderr) = run_cli(dir.path(), &["task", "rate", "task_0_0", "9"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"));
}

#[test]
fn test_timer_start_status_reset() {
    let dir = TempDir::new().unwrap();
    let event = run_json(dir.path(), &["timer", "start"]);
    assert_eq!(event["type"], "TimerStarted");
    assert_eq!(event["mode"], "focus");

    let status = run_json(dir.path(), &["timer", "status"]);
    assert_eq!(status["timer"]["active"], true);
    assert_eq!(status["timer"]["mode"], "focus");

    let event = run_json(dir.path(), &["timer", "reset"]);
    assert_eq!(event["type"], "TimerReset");

    let status = run_json(dir.path(), &["timer", "status"]);
    assert_eq!(status["timer"]["active"], false);
    assert_eq!(status["timer"]["remaining_secs"], 1500);
    assert_eq!(status["timer"]["clock"], "25:00");
}

#[test]
fn test_timer_pause_when_idle_prints_state() {
    let dir = TempDir::new().unwrap();
    let state = run_json(dir.path(), &["timer", "pause"]);
    assert_eq!(state["active"], false);
    assert_eq!(state["remaining_secs"], 1500);
}

#[test]
fn test_cards_navigation() {
    let dir = TempDir::new().unwrap();
    let decks = run_json(dir.path(), &["cards", "list"]);
    assert_eq!(decks.as_array().unwrap().len(), 2);

    let view = run_json(dir.path(), &["cards", "select", "الرياضيات"]);
    assert_eq!(view["index"], 0);
    assert_eq!(view["count"], 3);
    assert!(view["answer"].is_null());

    let view = run_json(dir.path(), &["cards", "next"]);
    assert_eq!(view["index"], 1);

    let view = run_json(dir.path(), &["cards", "flip"]);
    assert_eq!(view["flipped"], true);
    assert_eq!(view["answer"], "1/x");

    let view = run_json(dir.path(), &["cards", "clear"]);
    assert!(view["subject"].is_null());
}

#[test]
fn test_cards_unknown_deck_fails() {
    let dir = TempDir::new().unwrap();
    let (code, _, _) = run_cli(dir.path(), &["cards", "select", "الفلسفة"]);
    assert_eq!(code, 1);
}

#[test]
fn test_tab_and_quote() {
    let dir = TempDir::new().unwrap();
    let event = run_json(dir.path(), &["tab", "stats"]);
    assert_eq!(event["tab"], "stats");
    let status = run_json(dir.path(), &["timer", "status"]);
    assert_eq!(status["tab"], "stats");

    let (code, _, _) = run_cli(dir.path(), &["tab", "settings"]);
    assert_eq!(code, 1);

    let (code, stdout, _) = run_cli(dir.path(), &["quote"]);
    assert_eq!(code, 0);
    assert!(!stdout.trim().is_empty());
}

#[test]
fn test_config_get_set() {
    let dir = TempDir::new().unwrap();
    let (code, stdout, _) = run_cli(dir.path(), &["config", "get", "timer.focus_minutes"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "25");

    let (code, _, _) = run_cli(dir.path(), &["config", "set", "timer.focus_minutes", "50"]);
    assert_eq!(code, 0);

    let status = run_json(dir.path(), &["timer", "status"]);
    assert_eq!(status["timer"]["remaining_secs"], 3000);

    let (code, _, _) = run_cli(dir.path(), &["config", "set", "timer.nope", "1"]);
    assert_eq!(code, 1);

    let (code, _, _) = run_cli(dir.path(), &["config", "reset"]);
    assert_eq!(code, 0);
    let (_, stdout, _) = run_cli(dir.path(), &["config", "get", "timer.focus_minutes"]);
    assert_eq!(stdout.trim(), "25");
}
