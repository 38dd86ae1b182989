use std::fmt;

/// Every recoverable failure the engine can report. All variants are
/// caller errors; storage problems never surface here (the stores fall
/// back to seed or empty data instead).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppError {
    InvalidIdFormat,
    TaskNotFound,
    EmptyTitle,
    TitleTooLong,
    DescriptionTooLong,
    InvalidStatus,
    InvalidPriority,
    InvalidFilterStatus,
    InvalidDate,
    InvalidTag,
    InvalidUserIdFormat,
    UserNotFound,
    InvalidPageSize,
    InvalidSortCriteria,
    InvalidSortOrder,
    NameRequired,
    NameTooLong,
    InvalidEmail,
    EmailInUse,
}

impl AppError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidIdFormat => "invalid_id_format",
            Self::TaskNotFound => "task_not_found",
            Self::EmptyTitle => "empty_title",
            Self::TitleTooLong => "title_too_long",
            Self::DescriptionTooLong => "description_too_long",
            Self::InvalidStatus => "invalid_status",
            Self::InvalidPriority => "invalid_priority",
            Self::InvalidFilterStatus => "invalid_filter_status",
            Self::InvalidDate => "invalid_date",
            Self::InvalidTag => "invalid_tag",
            Self::InvalidUserIdFormat => "invalid_user_id_format",
            Self::UserNotFound => "user_not_found",
            Self::InvalidPageSize => "invalid_page_size",
            Self::InvalidSortCriteria => "invalid_sort_criteria",
            Self::InvalidSortOrder => "invalid_sort_order",
            Self::NameRequired => "name_required",
            Self::NameTooLong => "name_too_long",
            Self::InvalidEmail => "invalid_email",
            Self::EmailInUse => "email_in_use",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::InvalidIdFormat => "Invalid ID format",
            Self::TaskNotFound => "Task not found",
            Self::EmptyTitle => "Title is required",
            Self::TitleTooLong => "Title cannot exceed 100 characters",
            Self::DescriptionTooLong => "Description cannot exceed 500 characters",
            Self::InvalidStatus => "Invalid status. Allowed values: TODO, ONGOING, DONE",
            Self::InvalidPriority => {
                "Invalid priority. Allowed values: LOW, NORMAL, HIGH, CRITICAL"
            }
            Self::InvalidFilterStatus => "Invalid filter status",
            Self::InvalidDate => "Invalid date format",
            Self::InvalidTag => "Invalid tag validation",
            Self::InvalidUserIdFormat => "Invalid user ID format",
            Self::UserNotFound => "User not found",
            Self::InvalidPageSize => "Invalid page size",
            Self::InvalidSortCriteria => "Invalid sort criteria",
            Self::InvalidSortOrder => "Invalid sort order",
            Self::NameRequired => "Name is required",
            Self::NameTooLong => "Name cannot exceed 50 characters",
            Self::InvalidEmail => "Invalid email format",
            Self::EmailInUse => "Email already in use",
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.code(), self.message())
    }
}

impl std::error::Error for AppError {}
