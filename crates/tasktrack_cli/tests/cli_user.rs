use std::path::PathBuf;
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_path(file_name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("tasktrack-{nanos}-{file_name}"))
}

fn run(tasks_path: &PathBuf, users_path: &PathBuf, args: &[&str]) -> Output {
    let exe = env!("CARGO_BIN_EXE_tasktrack");
    Command::new(exe)
        .args(args)
        .env("TASKTRACK_TASKS_PATH", tasks_path)
        .env("TASKTRACK_USERS_PATH", users_path)
        .env("TASKTRACK_CONFIG_PATH", temp_path("no-config.json"))
        .output()
        .expect("failed to run tasktrack")
}

#[test]
fn user_add_persists_between_invocations() {
    let tasks_path = temp_path("user-add-tasks.json");
    let users_path = temp_path("user-add-users.json");
    std::fs::write(&tasks_path, "[]").unwrap();

    let output = run(
        &tasks_path,
        &users_path,
        &["user", "add", "Jean", "jean@example.com"],
    );
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Added user: Jean <jean@example.com> (1)"));

    let output = run(&tasks_path, &users_path, &["user", "list"]);
    std::fs::remove_file(&tasks_path).ok();
    std::fs::remove_file(&users_path).ok();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("jean@example.com"));
}

#[test]
fn user_add_rejects_duplicate_email_case_insensitively() {
    let tasks_path = temp_path("user-dup-tasks.json");
    let users_path = temp_path("user-dup-users.json");
    std::fs::write(&tasks_path, "[]").unwrap();

    let output = run(
        &tasks_path,
        &users_path,
        &["user", "add", "Alice", "alice@example.com"],
    );
    assert!(output.status.success());

    let output = run(
        &tasks_path,
        &users_path,
        &["user", "add", "Bob", "ALICE@example.com"],
    );
    std::fs::remove_file(&tasks_path).ok();
    std::fs::remove_file(&users_path).ok();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Email already in use"));
}

#[test]
fn user_add_rejects_malformed_email() {
    let tasks_path = temp_path("user-bad-tasks.json");
    let users_path = temp_path("user-bad-users.json");
    std::fs::write(&tasks_path, "[]").unwrap();

    let output = run(&tasks_path, &users_path, &["user", "add", "Sam", "notanemail"]);
    std::fs::remove_file(&tasks_path).ok();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid email format"));
}

#[test]
fn user_list_sorts_by_name() {
    let tasks_path = temp_path("user-sort-tasks.json");
    let users_path = temp_path("user-sort-users.json");
    std::fs::write(&tasks_path, "[]").unwrap();

    for (name, email) in [
        ("Charlie", "c@example.com"),
        ("Alice", "a@example.com"),
        ("Bob", "b@example.com"),
    ] {
        let output = run(&tasks_path, &users_path, &["user", "add", name, email]);
        assert!(output.status.success());
    }

    let output = run(&tasks_path, &users_path, &["user", "list", "--json"]);
    std::fs::remove_file(&tasks_path).ok();
    std::fs::remove_file(&users_path).ok();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let names: Vec<&str> = value["users"]
        .as_array()
        .unwrap()
        .iter()
        .map(|user| user["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Alice", "Bob", "Charlie"]);
}
