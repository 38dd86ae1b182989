use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TaskStatus {
    Todo,
    Ongoing,
    Done,
}

impl TaskStatus {
    /// Exact match against the wire vocabulary; no case folding.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "TODO" => Some(Self::Todo),
            "ONGOING" => Some(Self::Ongoing),
            "DONE" => Some(Self::Done),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "TODO",
            Self::Ongoing => "ONGOING",
            Self::Done => "DONE",
        }
    }

    /// Logical ordering used by the status sort: TODO < ONGOING < DONE.
    pub fn rank(self) -> u8 {
        match self {
            Self::Todo => 0,
            Self::Ongoing => 1,
            Self::Done => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TaskPriority {
    Low,
    Normal,
    High,
    Critical,
}

impl TaskPriority {
    /// Case-insensitive match; priorities are normalized to upper case.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_uppercase().as_str() {
            "LOW" => Some(Self::Low),
            "NORMAL" => Some(Self::Normal),
            "HIGH" => Some(Self::High),
            "CRITICAL" => Some(Self::Critical),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Normal => "NORMAL",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }

    /// Urgency ordering used by the priority sort: CRITICAL first.
    pub fn rank(self) -> u8 {
        match self {
            Self::Critical => 0,
            Self::High => 1,
            Self::Normal => 2,
            Self::Low => 3,
        }
    }
}

impl Default for TaskPriority {
    fn default() -> Self {
        Self::Normal
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: TaskStatus,
    pub created_at: String,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub priority: TaskPriority,
    #[serde(default)]
    pub assignee_id: Option<u64>,
    #[serde(default)]
    pub tags: BTreeSet<String>,
}

#[cfg(test)]
mod tests {
    use super::{TaskPriority, TaskStatus};

    #[test]
    fn status_parses_exact_values_only() {
        assert_eq!(TaskStatus::parse("TODO"), Some(TaskStatus::Todo));
        assert_eq!(TaskStatus::parse("DONE"), Some(TaskStatus::Done));
        assert_eq!(TaskStatus::parse("todo"), None);
        assert_eq!(TaskStatus::parse("ARCHIVED"), None);
    }

    #[test]
    fn status_ranks_in_logical_order() {
        assert!(TaskStatus::Todo.rank() < TaskStatus::Ongoing.rank());
        assert!(TaskStatus::Ongoing.rank() < TaskStatus::Done.rank());
    }

    #[test]
    fn priority_parses_case_insensitively() {
        assert_eq!(TaskPriority::parse("high"), Some(TaskPriority::High));
        assert_eq!(TaskPriority::parse(" Critical "), Some(TaskPriority::Critical));
        assert_eq!(TaskPriority::parse("SUPERHIGH"), None);
    }

    #[test]
    fn priority_ranks_critical_first() {
        let mut ranks = [
            TaskPriority::Low,
            TaskPriority::Critical,
            TaskPriority::Normal,
            TaskPriority::High,
        ];
        ranks.sort_by_key(|priority| priority.rank());
        assert_eq!(
            ranks,
            [
                TaskPriority::Critical,
                TaskPriority::High,
                TaskPriority::Normal,
                TaskPriority::Low,
            ]
        );
    }
}
