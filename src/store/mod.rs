//! Storage ports for users and tasks.
//!
//! Handlers only see the [`UserStore`] and [`TaskStore`] traits. Two backends
//! implement both: [`postgres::PgStore`] for deployments and
//! [`memory::MemoryStore`] for running without a database and for tests.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::{Task, User};

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Credential store.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError>;

    /// Inserts a user with an already hashed verifier.
    ///
    /// Fails with `AppError::ValidationError` for an empty or over-long
    /// username and with `AppError::Conflict` if the username is taken.
    async fn create_user(&self, username: &str, password_hash: &str) -> Result<User, AppError>;
}

/// Task store. Every operation acts on the single shared list.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// All tasks, ordered by id.
    async fn list(&self) -> Result<Vec<Task>, AppError>;

    async fn create(&self, name: &str, is_complete: bool) -> Result<Task, AppError>;

    /// Overwrites name and completion flag. `AppError::NotFound` for an unknown id.
    async fn update(&self, id: i32, name: &str, is_complete: bool) -> Result<(), AppError>;

    /// `AppError::NotFound` for an unknown id.
    async fn delete(&self, id: i32) -> Result<(), AppError>;
}

/// Longest username the credential store accepts, in characters.
pub const MAX_USERNAME_LEN: usize = 50;

pub(crate) fn task_not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Task {} not found", id))
}

/// Username rule applied by every backend before touching storage.
pub(crate) fn check_username(username: &str) -> Result<(), AppError> {
    let len = username.chars().count();
    if len == 0 || len > MAX_USERNAME_LEN {
        return Err(AppError::ValidationError(format!(
            "Username must be between 1 and {} characters",
            MAX_USERNAME_LEN
        )));
    }
    Ok(())
}
