use crate::clock;
use crate::error::AppError;
use crate::model::{Task, TaskPriority, TaskStatus};
use crate::storage::json_store;
use crate::users::UserStore;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use time::Date;

pub const TITLE_MAX: usize = 100;
pub const DESCRIPTION_MAX: usize = 500;
pub const TAG_MAX: usize = 20;

/// Parameters for [`TaskStore::create`]. Only the title is mandatory.
#[derive(Debug, Clone, Copy, Default)]
pub struct NewTask<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub due_date: Option<&'a str>,
    pub priority: Option<&'a str>,
}

/// A mutation result that may carry an advisory warning (a due date in
/// the past is accepted, not rejected).
#[derive(Debug, Clone)]
pub struct TaskOutcome {
    pub task: Task,
    pub warning: Option<String>,
}

/// The in-memory task collection. Seeded once at process start from
/// the task document (or the built-in fallback) and never written back;
/// mutations live only for the lifetime of the process.
#[derive(Debug, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    pub fn load(path: &Path) -> Self {
        Self {
            tasks: json_store::load_tasks(path),
        }
    }

    pub fn new(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    fn next_id(&self) -> u64 {
        self.tasks.iter().map(|task| task.id).max().unwrap_or(0) + 1
    }

    fn find(&self, id: u64) -> Result<&Task, AppError> {
        self.tasks
            .iter()
            .find(|task| task.id == id)
            .ok_or(AppError::TaskNotFound)
    }

    fn find_mut(&mut self, id: u64) -> Result<&mut Task, AppError> {
        self.tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or(AppError::TaskNotFound)
    }

    pub fn create(&mut self, new_task: NewTask<'_>) -> Result<TaskOutcome, AppError> {
        let title = validate_title(new_task.title)?;
        if new_task.description.chars().count() > DESCRIPTION_MAX {
            return Err(AppError::DescriptionTooLong);
        }
        let priority = match new_task.priority {
            Some(raw) => TaskPriority::parse(raw).ok_or(AppError::InvalidPriority)?,
            None => TaskPriority::Normal,
        };
        let (due_date, warning) = parse_due_date_field(new_task.due_date)?;

        let task = Task {
            id: self.next_id(),
            title,
            description: new_task.description.to_string(),
            status: TaskStatus::Todo,
            created_at: clock::now_timestamp(),
            due_date,
            priority,
            assignee_id: None,
            tags: BTreeSet::new(),
        };
        self.tasks.push(task.clone());

        Ok(TaskOutcome { task, warning })
    }

    pub fn get(&self, id: &str) -> Result<Task, AppError> {
        let id = parse_task_id(id)?;
        self.find(id).cloned()
    }

    pub fn update(
        &mut self,
        id: &str,
        title: Option<&str>,
        description: Option<&str>,
    ) -> Result<Task, AppError> {
        let id = parse_task_id(id)?;
        self.find(id)?;

        let title = title.map(validate_title).transpose()?;
        if let Some(description) = description
            && description.chars().count() > DESCRIPTION_MAX
        {
            return Err(AppError::DescriptionTooLong);
        }

        let task = self.find_mut(id)?;
        if let Some(title) = title {
            task.title = title;
        }
        if let Some(description) = description {
            task.description = description.to_string();
        }
        Ok(task.clone())
    }

    /// Any status may follow any other; there is no transition graph.
    pub fn change_status(&mut self, id: &str, status: &str) -> Result<Task, AppError> {
        let status = TaskStatus::parse(status).ok_or(AppError::InvalidStatus)?;
        let id = parse_task_id(id)?;

        let task = self.find_mut(id)?;
        task.status = status;
        Ok(task.clone())
    }

    pub fn delete(&mut self, id: &str) -> Result<(), AppError> {
        let id = parse_task_id(id)?;
        let index = self
            .tasks
            .iter()
            .position(|task| task.id == id)
            .ok_or(AppError::TaskNotFound)?;
        self.tasks.remove(index);
        Ok(())
    }

    /// Set or clear the assignee. The user must exist at the moment of
    /// assignment; later user-side changes are not re-validated.
    pub fn assign(
        &mut self,
        id: &str,
        user_id: Option<&str>,
        users: &UserStore,
    ) -> Result<Task, AppError> {
        let id = parse_task_id(id)?;
        self.find(id)?;

        let assignee_id = match user_id {
            Some(raw) => {
                let user_id = parse_user_id(raw)?;
                if !users.exists(user_id) {
                    return Err(AppError::UserNotFound);
                }
                Some(user_id)
            }
            None => None,
        };

        let task = self.find_mut(id)?;
        task.assignee_id = assignee_id;
        Ok(task.clone())
    }

    pub fn set_due_date(&mut self, id: &str, date: Option<&str>) -> Result<TaskOutcome, AppError> {
        let id = parse_task_id(id)?;
        self.find(id)?;
        let (due_date, warning) = parse_due_date_field(date)?;

        let task = self.find_mut(id)?;
        task.due_date = due_date;
        Ok(TaskOutcome {
            task: task.clone(),
            warning,
        })
    }

    pub fn set_priority(&mut self, id: &str, priority: &str) -> Result<Task, AppError> {
        let priority = TaskPriority::parse(priority).ok_or(AppError::InvalidPriority)?;
        let id = parse_task_id(id)?;

        let task = self.find_mut(id)?;
        task.priority = priority;
        Ok(task.clone())
    }

    /// Adding an already-present tag is a no-op (tags are a set).
    pub fn add_tag(&mut self, id: &str, tag: &str) -> Result<Task, AppError> {
        let id = parse_task_id(id)?;
        let tag = validate_tag(tag)?;

        let task = self.find_mut(id)?;
        task.tags.insert(tag);
        Ok(task.clone())
    }

    /// Bulk add; every tag is validated before any is applied.
    pub fn add_tags(&mut self, id: &str, tags: &[String]) -> Result<Task, AppError> {
        let id = parse_task_id(id)?;
        let validated = tags
            .iter()
            .map(|tag| validate_tag(tag))
            .collect::<Result<Vec<_>, _>>()?;

        let task = self.find_mut(id)?;
        task.tags.extend(validated);
        Ok(task.clone())
    }

    /// Removing an absent tag is a no-op.
    pub fn remove_tag(&mut self, id: &str, tag: &str) -> Result<Task, AppError> {
        let id = parse_task_id(id)?;
        let task = self.find_mut(id)?;
        task.tags.remove(tag.trim());
        Ok(task.clone())
    }

    pub fn overdue_tasks(&self, today: Date) -> Vec<Task> {
        self.tasks
            .iter()
            .filter(|task| is_overdue(task, today))
            .cloned()
            .collect()
    }

    pub fn tasks_by_tag(&self, tag: &str) -> Vec<Task> {
        self.tasks
            .iter()
            .filter(|task| task.tags.contains(tag))
            .cloned()
            .collect()
    }

    pub fn tasks_by_any_tag(&self, tags: &[String]) -> Vec<Task> {
        self.tasks
            .iter()
            .filter(|task| tags.iter().any(|tag| task.tags.contains(tag)))
            .cloned()
            .collect()
    }

    pub fn all_tag_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for task in &self.tasks {
            for tag in &task.tags {
                *counts.entry(tag.clone()).or_insert(0) += 1;
            }
        }
        counts
    }
}

/// True iff the task still needs work (TODO or ONGOING) and its due
/// date's calendar day is strictly before `today`. An unparsable due
/// date counts as not overdue.
pub fn is_overdue(task: &Task, today: Date) -> bool {
    if !matches!(task.status, TaskStatus::Todo | TaskStatus::Ongoing) {
        return false;
    }
    task.due_date
        .as_deref()
        .is_some_and(|due_date| clock::is_past_day(due_date, today))
}

pub fn parse_task_id(raw: &str) -> Result<u64, AppError> {
    raw.trim().parse().map_err(|_| AppError::InvalidIdFormat)
}

pub fn parse_user_id(raw: &str) -> Result<u64, AppError> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::InvalidUserIdFormat)
}

fn validate_title(raw: &str) -> Result<String, AppError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AppError::EmptyTitle);
    }
    if trimmed.chars().count() > TITLE_MAX {
        return Err(AppError::TitleTooLong);
    }
    Ok(trimmed.to_string())
}

fn validate_tag(raw: &str) -> Result<String, AppError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.chars().count() > TAG_MAX {
        return Err(AppError::InvalidTag);
    }
    Ok(trimmed.to_string())
}

fn parse_due_date_field(raw: Option<&str>) -> Result<(Option<String>, Option<String>), AppError> {
    match raw {
        Some(raw) => {
            let normalized = clock::parse_due_date(raw)?;
            let warning = clock::is_past_day(&normalized, clock::today())
                .then(|| format!("due date {normalized} is in the past"));
            Ok((Some(normalized), warning))
        }
        None => Ok((None, None)),
    }
}
