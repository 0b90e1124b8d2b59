use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{check_username, task_not_found, TaskStore, UserStore};
use crate::error::AppError;
use crate::models::{Task, User};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    tasks: BTreeMap<i32, Task>,
    next_user_id: i32,
    next_task_id: i32,
}

/// In-process store with the same contract as the PostgreSQL one.
///
/// Ids start at 1 and are never reused, like a `SERIAL` column.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Advances an id counter, failing instead of wrapping once `i32` is exhausted.
fn next_id(counter: &mut i32, table: &str) -> Result<i32, AppError> {
    *counter = counter
        .checked_add(1)
        .ok_or_else(|| AppError::InternalServerError(format!("{} id space exhausted", table)))?;
    Ok(*counter)
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.username == username).cloned())
    }

    async fn create_user(&self, username: &str, password_hash: &str) -> Result<User, AppError> {
        check_username(username)?;

        let mut tables = self.tables.write().await;
        if tables.users.iter().any(|u| u.username == username) {
            return Err(AppError::Conflict(format!(
                "Username '{}' already exists",
                username
            )));
        }
        let id = next_id(&mut tables.next_user_id, "users")?;
        let user = User {
            id,
            username: username.to_string(),
            password_hash: password_hash.to_string(),
        };
        tables.users.push(user.clone());
        Ok(user)
    }
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Task>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.tasks.values().cloned().collect())
    }

    async fn create(&self, name: &str, is_complete: bool) -> Result<Task, AppError> {
        let mut tables = self.tables.write().await;
        let id = next_id(&mut tables.next_task_id, "items")?;
        let task = Task {
            id,
            name: name.to_string(),
            is_complete,
        };
        tables.tasks.insert(task.id, task.clone());
        Ok(task)
    }

    async fn update(&self, id: i32, name: &str, is_complete: bool) -> Result<(), AppError> {
        let mut tables = self.tables.write().await;
        let task = tables.tasks.get_mut(&id).ok_or_else(|| task_not_found(id))?;
        task.name = name.to_string();
        task.is_complete = is_complete;
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<(), AppError> {
        let mut tables = self.tables.write().await;
        tables
            .tasks
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| task_not_found(id))
    }
}
