pub mod memory;
pub mod migrations;
pub mod task;

use crate::shared::errors::StorageError;
use crate::shared::paths::ensure_dir;
use crate::tasks::types::{Task, TaskId};
use rusqlite::Connection;
use std::path::{Path, PathBuf};

pub use memory::MemoryTaskStore;

/// File name of the task database inside the storage directory.
pub const DATABASE_NAME: &str = "TODO_DATABASE";

/// Durable CRUD over tasks.
///
/// Update and delete on an id that does not exist succeed silently.
pub trait TaskStore {
    /// Insert a new incomplete task.
    fn create(&self, text: &str) -> Result<Task, StorageError>;

    fn update_text(&self, id: TaskId, text: &str) -> Result<(), StorageError>;

    fn update_completed(&self, id: TaskId, completed: bool) -> Result<(), StorageError>;

    fn delete(&self, id: TaskId) -> Result<(), StorageError>;

    /// Every task, oldest first.
    fn list_all(&self) -> Result<Vec<Task>, StorageError>;
}

/// SQLite-backed store. Each operation opens its own connection and
/// releases it before returning.
#[derive(Debug, Clone)]
pub struct SqliteTaskStore {
    db_path: PathBuf,
}

impl SqliteTaskStore {
    /// The file and its parent directory are created on first access.
    pub fn new(db_path: impl AsRef<Path>) -> Self {
        Self {
            db_path: db_path.as_ref().to_path_buf(),
        }
    }

    /// Store at `{dir}/TODO_DATABASE`.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(DATABASE_NAME))
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    fn open(&self) -> Result<Connection, StorageError> {
        if let Some(parent) = self.db_path.parent() {
            if !parent.as_os_str().is_empty() {
                ensure_dir(parent)?;
            }
        }

        let conn = Connection::open(&self.db_path).map_err(|source| StorageError::Open {
            path: self.db_path.clone(),
            source,
        })?;
        migrations::run_migrations(&conn)?;
        Ok(conn)
    }

    fn log_no_match(operation: &str, id: TaskId, rows: usize) {
        if rows == 0 {
            tracing::debug!(
                target: "tasks::storage",
                id = %id,
                operation,
                "No task matched; nothing changed"
            );
        }
    }
}

impl TaskStore for SqliteTaskStore {
    fn create(&self, text: &str) -> Result<Task, StorageError> {
        let conn = self.open()?;
        let task = task::insert_task(&conn, text)?;
        tracing::debug!(target: "tasks::storage", id = %task.id, "Inserted task");
        Ok(task)
    }

    fn update_text(&self, id: TaskId, text: &str) -> Result<(), StorageError> {
        let conn = self.open()?;
        let rows = task::update_task_text(&conn, id, text)?;
        Self::log_no_match("update_text", id, rows);
        Ok(())
    }

    fn update_completed(&self, id: TaskId, completed: bool) -> Result<(), StorageError> {
        let conn = self.open()?;
        let rows = task::update_task_status(&conn, id, completed)?;
        Self::log_no_match("update_completed", id, rows);
        Ok(())
    }

    fn delete(&self, id: TaskId) -> Result<(), StorageError> {
        let conn = self.open()?;
        let rows = task::delete_task(&conn, id)?;
        Self::log_no_match("delete", id, rows);
        Ok(())
    }

    fn list_all(&self) -> Result<Vec<Task>, StorageError> {
        let conn = self.open()?;
        let tasks = task::select_all_tasks(&conn)?;
        tracing::trace!(target: "tasks::storage", count = tasks.len(), "Loaded tasks");
        Ok(tasks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_created_on_first_access() {
        let tmp = tempfile::tempdir().unwrap();
        let store = SqliteTaskStore::in_dir(&tmp.path().join("nested"));
        assert!(!store.db_path().exists());

        assert!(store.list_all().unwrap().is_empty());
        assert!(store.db_path().exists());
        assert!(store.db_path().ends_with(DATABASE_NAME));
    }

    #[test]
    fn test_data_survives_a_new_handle() {
        let tmp = tempfile::tempdir().unwrap();
        let created = SqliteTaskStore::in_dir(tmp.path()).create("persist").unwrap();

        let reopened = SqliteTaskStore::in_dir(tmp.path());
        let tasks = reopened.list_all().unwrap();
        assert_eq!(tasks, vec![created]);
    }

    #[test]
    fn test_open_failure_is_reported() {
        let tmp = tempfile::tempdir().unwrap();
        // A directory where the database file should be
        let blocked = tmp.path().join("blocked");
        std::fs::create_dir_all(&blocked).unwrap();

        let store = SqliteTaskStore::new(&blocked);
        assert!(store.create("never").is_err());
    }
}
