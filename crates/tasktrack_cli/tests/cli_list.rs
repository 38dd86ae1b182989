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

fn fixture_tasks() -> serde_json::Value {
    serde_json::json!([
        {
            "id": 1,
            "title": "Rapport urgent",
            "description": "A rendre demain",
            "status": "TODO",
            "priority": "CRITICAL",
            "created_at": "2025-07-01T09:00:00"
        },
        {
            "id": 2,
            "title": "Faire les courses",
            "description": "Acheter du lait",
            "status": "DONE",
            "priority": "LOW",
            "created_at": "2025-07-02T09:00:00"
        },
        {
            "id": 3,
            "title": "Rapport mensuel",
            "description": "Statistiques de ventes",
            "status": "ONGOING",
            "priority": "NORMAL",
            "created_at": "2025-07-03T09:00:00"
        }
    ])
}

fn write_fixture(path: &PathBuf) {
    std::fs::write(path, serde_json::to_string_pretty(&fixture_tasks()).unwrap()).unwrap();
}

fn listed_ids(output: &Output) -> Vec<u64> {
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    value["tasks"]
        .as_array()
        .unwrap()
        .iter()
        .map(|task| task["id"].as_u64().unwrap())
        .collect()
}

#[test]
fn list_filters_by_status() {
    let tasks_path = temp_path("list-status-tasks.json");
    let users_path = temp_path("list-status-users.json");
    write_fixture(&tasks_path);

    let output = run(&tasks_path, &users_path, &["list", "--status", "TODO"]);
    std::fs::remove_file(&tasks_path).ok();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Rapport urgent"));
    assert!(!stdout.contains("Faire les courses"));
    assert!(!stdout.contains("Rapport mensuel"));
}

#[test]
fn list_rejects_invalid_filter_status() {
    let tasks_path = temp_path("list-bad-status-tasks.json");
    let users_path = temp_path("list-bad-status-users.json");
    write_fixture(&tasks_path);

    let output = run(&tasks_path, &users_path, &["list", "--status", "FINISHED"]);
    std::fs::remove_file(&tasks_path).ok();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid filter status"));
}

#[test]
fn list_sorts_by_priority_rank() {
    let tasks_path = temp_path("list-priority-tasks.json");
    let users_path = temp_path("list-priority-users.json");
    write_fixture(&tasks_path);

    let output = run(
        &tasks_path,
        &users_path,
        &["list", "--sort-by", "priority", "--order", "asc", "--json"],
    );
    std::fs::remove_file(&tasks_path).ok();

    assert!(output.status.success());
    // CRITICAL (1), NORMAL (3), LOW (2)
    assert_eq!(listed_ids(&output), [1, 3, 2]);
}

#[test]
fn list_sorts_by_status_rank_descending() {
    let tasks_path = temp_path("list-status-sort-tasks.json");
    let users_path = temp_path("list-status-sort-users.json");
    write_fixture(&tasks_path);

    let output = run(
        &tasks_path,
        &users_path,
        &["list", "--sort-by", "status", "--order", "desc", "--json"],
    );
    std::fs::remove_file(&tasks_path).ok();

    assert!(output.status.success());
    // DONE (2), ONGOING (3), TODO (1)
    assert_eq!(listed_ids(&output), [2, 3, 1]);
}

#[test]
fn list_paginates_with_metadata() {
    let tasks_path = temp_path("list-pages-tasks.json");
    let users_path = temp_path("list-pages-users.json");
    write_fixture(&tasks_path);

    let output = run(
        &tasks_path,
        &users_path,
        &["list", "--page", "2", "--page-size", "2", "--json"],
    );
    std::fs::remove_file(&tasks_path).ok();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["tasks"].as_array().unwrap().len(), 1);
    assert_eq!(value["pagination"]["current_page"], 2);
    assert_eq!(value["pagination"]["total_pages"], 2);
    assert_eq!(value["pagination"]["total_items"], 3);
}

#[test]
fn list_page_zero_is_an_empty_page() {
    let tasks_path = temp_path("list-page-zero-tasks.json");
    let users_path = temp_path("list-page-zero-users.json");
    write_fixture(&tasks_path);

    let output = run(&tasks_path, &users_path, &["list", "--page", "0", "--json"]);
    std::fs::remove_file(&tasks_path).ok();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(value["tasks"].as_array().unwrap().is_empty());
    assert_eq!(value["pagination"]["total_items"], 3);
}

#[test]
fn search_matches_title_and_description_case_insensitively() {
    let tasks_path = temp_path("search-tasks.json");
    let users_path = temp_path("search-users.json");
    write_fixture(&tasks_path);

    let output = run(&tasks_path, &users_path, &["search", "rapport", "--json"]);
    assert!(output.status.success());
    assert_eq!(listed_ids(&output).len(), 2);

    let output = run(&tasks_path, &users_path, &["search", "LAIT", "--json"]);
    std::fs::remove_file(&tasks_path).ok();

    assert!(output.status.success());
    assert_eq!(listed_ids(&output), [2]);
}

#[test]
fn overdue_lists_only_open_past_due_tasks() {
    let tasks_path = temp_path("overdue-tasks.json");
    let users_path = temp_path("overdue-users.json");
    let content = serde_json::json!([
        {
            "id": 1,
            "title": "Retard",
            "status": "TODO",
            "created_at": "2025-07-01T09:00:00",
            "due_date": "2020-01-01T00:00:00"
        },
        {
            "id": 2,
            "title": "Finie",
            "status": "DONE",
            "created_at": "2025-07-01T09:00:00",
            "due_date": "2020-01-01T00:00:00"
        },
        {
            "id": 3,
            "title": "Future",
            "status": "TODO",
            "created_at": "2025-07-01T09:00:00",
            "due_date": "2099-01-01T00:00:00"
        }
    ]);
    std::fs::write(&tasks_path, serde_json::to_string_pretty(&content).unwrap()).unwrap();

    let output = run(&tasks_path, &users_path, &["overdue"]);
    std::fs::remove_file(&tasks_path).ok();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Retard"));
    assert!(!stdout.contains("Finie"));
    assert!(!stdout.contains("Future"));
}
