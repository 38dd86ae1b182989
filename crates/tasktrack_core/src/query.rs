//! The read pipeline: filter, sort, paginate. Every read-oriented
//! operation (list, search, filter by status/priority/user/tag) is one
//! call into [`query_tasks`] with a subset of the filters populated.

use crate::error::AppError;
use crate::model::{Task, TaskPriority, TaskStatus};
use crate::store::{self, TaskStore};
use crate::users::UserStore;
use serde::Serialize;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    CreatedAt,
    Title,
    Status,
    Priority,
}

impl SortKey {
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        match raw {
            "created_at" => Ok(Self::CreatedAt),
            "title" => Ok(Self::Title),
            "status" => Ok(Self::Status),
            "priority" => Ok(Self::Priority),
            _ => Err(AppError::InvalidSortCriteria),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        match raw {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(AppError::InvalidSortOrder),
        }
    }
}

/// Stable sort over tasks. Status and priority order by their fixed
/// ranks in both directions; `desc` reverses the rank comparison, not
/// the sorted output, so equal keys keep their input order either way.
pub fn sort_tasks(
    mut tasks: Vec<Task>,
    sort_by: &str,
    order: &str,
) -> Result<Vec<Task>, AppError> {
    let key = SortKey::parse(sort_by)?;
    let order = SortOrder::parse(order)?;
    let directed = |ordering: Ordering| match order {
        SortOrder::Asc => ordering,
        SortOrder::Desc => ordering.reverse(),
    };

    match key {
        SortKey::CreatedAt => tasks.sort_by(|a, b| directed(a.created_at.cmp(&b.created_at))),
        SortKey::Title => {
            tasks.sort_by(|a, b| directed(a.title.to_lowercase().cmp(&b.title.to_lowercase())));
        }
        SortKey::Status => tasks.sort_by(|a, b| directed(a.status.rank().cmp(&b.status.rank()))),
        SortKey::Priority => {
            tasks.sort_by(|a, b| directed(a.priority.rank().cmp(&b.priority.rank())));
        }
    }

    Ok(tasks)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub current_page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

/// Slice out one page. An out-of-range page yields an empty slice with
/// the metadata unchanged; only a zero page size is an error.
pub fn paginate<T: Clone>(
    items: &[T],
    page: usize,
    page_size: usize,
) -> Result<(Vec<T>, Pagination), AppError> {
    if page_size == 0 {
        return Err(AppError::InvalidPageSize);
    }

    let total_items = items.len();
    let total_pages = total_items.div_ceil(page_size);
    // pages are 1-based; page 0 is out of range like any page past the end
    let slice = match page.checked_sub(1) {
        Some(zero_based) => {
            let start = zero_based.saturating_mul(page_size);
            if start >= total_items {
                Vec::new()
            } else {
                items[start..(start + page_size).min(total_items)].to_vec()
            }
        }
        None => Vec::new(),
    };

    Ok((
        slice,
        Pagination {
            current_page: page,
            page_size,
            total_pages,
            total_items,
        },
    ))
}

/// Assignee predicate: either "has exactly this user" or "has none".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssigneeFilter {
    Unassigned,
    User(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskQuery {
    pub status: Option<String>,
    pub priority: Option<String>,
    pub assignee: Option<AssigneeFilter>,
    pub keyword: Option<String>,
    pub tag: Option<String>,
    pub sort_by: String,
    pub order: String,
    pub page: usize,
    pub page_size: usize,
}

impl Default for TaskQuery {
    fn default() -> Self {
        Self {
            status: None,
            priority: None,
            assignee: None,
            keyword: None,
            tag: None,
            sort_by: "created_at".to_string(),
            order: "desc".to_string(),
            page: 1,
            page_size: 20,
        }
    }
}

/// The query facade. Parameters are validated in a fixed order (page
/// size, then status, priority, assignee, keyword, tag, then the sort
/// pair) so that error precedence is reproducible when several are
/// invalid at once; the filters themselves commute under AND.
pub fn query_tasks(
    tasks: &TaskStore,
    users: &UserStore,
    query: &TaskQuery,
) -> Result<(Vec<Task>, Pagination), AppError> {
    if query.page_size == 0 {
        return Err(AppError::InvalidPageSize);
    }

    let status = query
        .status
        .as_deref()
        .map(|raw| TaskStatus::parse(raw).ok_or(AppError::InvalidFilterStatus))
        .transpose()?;
    let priority = query
        .priority
        .as_deref()
        .map(|raw| TaskPriority::parse(raw).ok_or(AppError::InvalidPriority))
        .transpose()?;
    let assignee = match &query.assignee {
        Some(AssigneeFilter::User(raw)) => {
            let user_id = store::parse_user_id(raw)?;
            if !users.exists(user_id) {
                return Err(AppError::UserNotFound);
            }
            Some(Some(user_id))
        }
        Some(AssigneeFilter::Unassigned) => Some(None),
        None => None,
    };
    // an empty keyword matches everything, same as no keyword
    let keyword = query
        .keyword
        .as_deref()
        .map(str::to_lowercase)
        .filter(|keyword| !keyword.is_empty());
    let tag = query.tag.as_deref().map(str::trim);

    let filtered: Vec<Task> = tasks
        .tasks()
        .iter()
        .filter(|task| {
            status.is_none_or(|status| task.status == status)
                && priority.is_none_or(|priority| task.priority == priority)
                && assignee
                    .as_ref()
                    .is_none_or(|assignee| task.assignee_id == *assignee)
                && keyword.as_deref().is_none_or(|keyword| {
                    task.title.to_lowercase().contains(keyword)
                        || task.description.to_lowercase().contains(keyword)
                })
                && tag.is_none_or(|tag| task.tags.contains(tag))
        })
        .cloned()
        .collect();

    let sorted = sort_tasks(filtered, &query.sort_by, &query.order)?;
    paginate(&sorted, query.page, query.page_size)
}
