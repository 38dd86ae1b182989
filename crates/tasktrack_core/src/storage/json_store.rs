//! JSON document access for the two persisted collections.
//!
//! The task document is read at most once per process and never
//! written back; a missing or unparsable file seeds the store with two
//! built-in records. The user document is re-read on every access and
//! rewritten wholesale on every user creation. Both sides prefer
//! availability over strict durability: I/O problems fall back to seed
//! or empty data instead of failing the process.

use crate::clock;
use crate::config::Config;
use crate::model::{Task, TaskPriority, TaskStatus, User};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

const TASKS_FILE_NAME: &str = "tasks.json";
const USERS_FILE_NAME: &str = "users.json";
const TASKS_ENV_VAR: &str = "TASKTRACK_TASKS_PATH";
const USERS_ENV_VAR: &str = "TASKTRACK_USERS_PATH";

pub fn default_data_dir() -> Option<PathBuf> {
    if cfg!(windows) {
        std::env::var("APPDATA")
            .ok()
            .map(|appdata| PathBuf::from(appdata).join("tasktrack"))
    } else {
        std::env::var("HOME")
            .ok()
            .map(|home| PathBuf::from(home).join(".config").join("tasktrack"))
    }
}

fn resolve_path(env_var: &str, configured: Option<&str>, file_name: &str) -> PathBuf {
    if let Ok(path) = std::env::var(env_var)
        && !path.trim().is_empty()
    {
        return PathBuf::from(path);
    }

    if let Some(path) = configured
        && !path.trim().is_empty()
    {
        return PathBuf::from(path);
    }

    default_data_dir()
        .map(|dir| dir.join(file_name))
        .unwrap_or_else(|| PathBuf::from(file_name))
}

pub fn tasks_path(config: &Config) -> PathBuf {
    resolve_path(TASKS_ENV_VAR, config.tasks_path.as_deref(), TASKS_FILE_NAME)
}

pub fn users_path(config: &Config) -> PathBuf {
    resolve_path(USERS_ENV_VAR, config.users_path.as_deref(), USERS_FILE_NAME)
}

fn read_document<T: DeserializeOwned>(path: &Path) -> Option<T> {
    let content = std::fs::read_to_string(path).ok()?;
    serde_json::from_str(&content).ok()
}

fn write_document<T: Serialize>(path: &Path, value: &T) {
    if let Some(parent) = path.parent()
        && std::fs::create_dir_all(parent).is_err()
    {
        return;
    }
    if let Ok(content) = serde_json::to_string_pretty(value) {
        std::fs::write(path, content).ok();
    }
}

pub fn load_tasks(path: &Path) -> Vec<Task> {
    read_document(path).unwrap_or_else(seed_tasks)
}

/// Two illustrative records used when no task document can be read.
pub fn seed_tasks() -> Vec<Task> {
    let now = clock::now_timestamp();
    vec![
        Task {
            id: 1,
            title: "Première tâche".to_string(),
            description: "Description de la première tâche".to_string(),
            status: TaskStatus::Todo,
            created_at: now.clone(),
            due_date: None,
            priority: TaskPriority::Normal,
            assignee_id: None,
            tags: BTreeSet::new(),
        },
        Task {
            id: 2,
            title: "Deuxième tâche".to_string(),
            description: "Description de la deuxième tâche".to_string(),
            status: TaskStatus::Done,
            created_at: now,
            due_date: None,
            priority: TaskPriority::Normal,
            assignee_id: None,
            tags: BTreeSet::new(),
        },
    ]
}

pub fn load_users(path: &Path) -> Vec<User> {
    read_document(path).unwrap_or_default()
}

pub fn save_users(path: &Path, users: &[User]) {
    write_document(path, &users);
}
