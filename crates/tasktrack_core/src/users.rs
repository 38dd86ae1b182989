use crate::clock;
use crate::error::AppError;
use crate::model::User;
use crate::query::{self, Pagination};
use crate::storage::json_store;
use std::path::PathBuf;

pub const NAME_MAX: usize = 50;

/// The user collection. Unlike [`crate::store::TaskStore`], this holds
/// no records in memory: every call reloads the document, every create
/// rewrites it wholesale. The asymmetry with the task side is a
/// deliberate contract, not an oversight.
#[derive(Debug, Clone)]
pub struct UserStore {
    path: PathBuf,
}

impl UserStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load(&self) -> Vec<User> {
        json_store::load_users(&self.path)
    }

    pub fn create(&self, name: &str, email: &str) -> Result<User, AppError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::NameRequired);
        }
        if name.chars().count() > NAME_MAX {
            return Err(AppError::NameTooLong);
        }

        let email = email.trim().to_lowercase();
        if !valid_email(&email) {
            return Err(AppError::InvalidEmail);
        }

        let mut users = self.load();
        if users.iter().any(|user| user.email.to_lowercase() == email) {
            return Err(AppError::EmailInUse);
        }

        let id = users.iter().map(|user| user.id).max().unwrap_or(0) + 1;
        let user = User {
            id,
            name: name.to_string(),
            email,
            created_at: clock::now_timestamp(),
        };
        users.push(user.clone());
        json_store::save_users(&self.path, &users);

        Ok(user)
    }

    /// All users sorted by name (case-insensitive, ascending), then
    /// paginated. The sort is not configurable.
    pub fn list(&self, page: usize, page_size: usize) -> Result<(Vec<User>, Pagination), AppError> {
        let mut users = self.load();
        users.sort_by_key(|user| user.name.to_lowercase());
        query::paginate(&users, page, page_size)
    }

    pub fn exists(&self, id: u64) -> bool {
        self.load().iter().any(|user| user.id == id)
    }

    pub fn find(&self, id: u64) -> Option<User> {
        self.load().into_iter().find(|user| user.id == id)
    }
}

/// Shape check equivalent to `^[^@]+@[^@]+\.[^@]+$`: a non-empty local
/// part, then a domain containing an interior dot, no second `@`.
fn valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(index, ch)| ch == '.' && index > 0 && index + 1 < domain.len())
}
