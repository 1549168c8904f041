use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn noir_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_noir"));
    cmd.current_dir(dir).env_remove("NOIR_DB").env_remove("RUST_LOG");
    cmd
}

fn run(dir: &Path, args: &[&str]) -> Output {
    noir_cmd(dir).args(args).output().unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

#[test]
fn test_add_creates_default_database() {
    let tmp = TempDir::new().unwrap();

    let output = run(tmp.path(), &["add", "Buy milk"]);

    assert!(output.status.success());
    assert!(stdout(&output).contains("Added note: Buy milk (ID: 1, Type: PERSONAL)"));
    assert!(tmp.path().join("data/notes.json").exists());
}

#[test]
fn test_add_with_note_type() {
    let tmp = TempDir::new().unwrap();
    run(tmp.path(), &["add", "Buy milk"]);

    let output = run(tmp.path(), &["add", "Deploy service", "--note-type", "INFRA"]);

    assert!(output.status.success());
    assert!(stdout(&output).contains("(ID: 2, Type: INFRA)"));
}

#[test]
fn test_add_rejects_invalid_input() {
    let tmp = TempDir::new().unwrap();

    let output = run(tmp.path(), &["add", "Something", "-t", "WORK"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Invalid note type: WORK"));

    let output = run(tmp.path(), &["add", "   "]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("title must not be empty"));

    let output = run(tmp.path(), &["list"]);
    assert!(stdout(&output).contains("No notes found!"));
}

#[test]
fn test_list_empty() {
    let tmp = TempDir::new().unwrap();

    let output = run(tmp.path(), &["list"]);

    assert!(output.status.success());
    assert!(stdout(&output).contains("📝 No notes found!"));
}

#[test]
fn test_list_renders_table() {
    let tmp = TempDir::new().unwrap();
    run(tmp.path(), &["add", "Buy milk"]);
    run(tmp.path(), &["add", "Deploy service", "-t", "infra"]);

    let output = run(tmp.path(), &["list"]);

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("Found 2 notes:"));
    assert!(out.contains("Title"));
    assert!(out.contains("Created At"));
    assert!(out.contains("Buy milk"));
    assert!(out.contains("Deploy service"));
    assert!(out.contains("⏳ Pending"));
}

#[test]
fn test_full_note_workflow() {
    let tmp = TempDir::new().unwrap();
    run(tmp.path(), &["add", "Buy milk"]);
    run(tmp.path(), &["add", "Deploy service", "--note-type", "INFRA"]);

    // Filter by type
    let output = run(tmp.path(), &["list", "--note-type", "INFRA", "--json"]);
    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let notes = parsed.as_array().unwrap();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0]["id"], 2);

    // Rename
    let output = run(tmp.path(), &["update", "1", "--title", "Buy oat milk"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("Note ID 1 updated successfully."));

    let output = run(tmp.path(), &["get", "1"]);
    assert!(stdout(&output).contains("Buy oat milk"));

    // Complete
    let output = run(tmp.path(), &["complete", "1"]);
    assert!(output.status.success());

    let output = run(tmp.path(), &["list", "--completed", "true", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let notes = parsed.as_array().unwrap();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0]["id"], 1);
    assert!(notes[0]["completed_at"].is_string());

    let output = run(tmp.path(), &["list", "--completed", "false", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(parsed.as_array().unwrap()[0]["id"], 2);
}

#[test]
fn test_update_missing_note_fails() {
    let tmp = TempDir::new().unwrap();

    let output = run(tmp.path(), &["update", "7", "--title", "New"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Note with ID 7 not found."));
}

#[test]
fn test_update_identical_values_is_noop() {
    let tmp = TempDir::new().unwrap();
    run(tmp.path(), &["add", "Plan trip", "-t", "PROJECT"]);

    let output = run(
        tmp.path(),
        &["update", "1", "--title", "Plan trip", "--note-type", "project"],
    );
    assert!(output.status.success());
    assert!(stdout(&output).contains("No update performed."));

    let output = run(tmp.path(), &["update", "1"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("No update performed."));
}

#[test]
fn test_update_note_type() {
    let tmp = TempDir::new().unwrap();
    run(tmp.path(), &["add", "Plan trip"]);

    let output = run(tmp.path(), &["update", "1", "-n", "PROJECT"]);
    assert!(output.status.success());

    let output = run(tmp.path(), &["get", "1", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(parsed["note_type"], "PROJECT");
    assert_eq!(parsed["title"], "Plan trip");
}

#[test]
fn test_complete_missing_note_fails() {
    let tmp = TempDir::new().unwrap();

    let output = run(tmp.path(), &["complete", "3"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("not found"));
}

#[test]
fn test_delete_requires_force_when_not_interactive() {
    let tmp = TempDir::new().unwrap();
    run(tmp.path(), &["add", "Temporary"]);

    let output = run(tmp.path(), &["delete", "1"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("--force"));

    let output = run(tmp.path(), &["delete", "1", "--force"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("Deleted note 1 - Temporary"));

    let output = run(tmp.path(), &["delete", "1", "--force"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Note with ID 1 not found."));
}

#[test]
fn test_db_flag_and_env_override_path() {
    let tmp = TempDir::new().unwrap();

    let output = run(tmp.path(), &["--db", "custom/store.json", "add", "Flagged"]);
    assert!(output.status.success());
    assert!(tmp.path().join("custom/store.json").exists());
    assert!(!tmp.path().join("data/notes.json").exists());

    let output = noir_cmd(tmp.path())
        .env("NOIR_DB", "custom/store.json")
        .args(["list"])
        .output()
        .unwrap();
    assert!(stdout(&output).contains("Flagged"));
}

#[test]
fn test_corrupt_database_fails_loudly() {
    let tmp = TempDir::new().unwrap();
    std::fs::create_dir_all(tmp.path().join("data")).unwrap();
    std::fs::write(
        tmp.path().join("data/notes.json"),
        r#"{"notes": {"1": {"title": "Broken", "note_type": "SOMEDAY", "created_at": "2024-01-01T00:00:00"}}}"#,
    )
    .unwrap();

    let output = run(tmp.path(), &["list"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Corrupt note store"));
}
