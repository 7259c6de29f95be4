use super::TaskStore;
use crate::shared::errors::StorageError;
use crate::tasks::types::{Task, TaskId};
use std::sync::Mutex;

#[derive(Default)]
struct Inner {
    next_id: i64,
    tasks: Vec<Task>,
}

/// Volatile store with the same contract as the SQLite one.
#[derive(Default)]
pub struct MemoryTaskStore(Mutex<Inner>);

impl MemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn with<R>(&self, f: impl FnOnce(&mut Inner) -> R) -> R {
        let mut inner = self.0.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut inner)
    }
}

impl TaskStore for MemoryTaskStore {
    fn create(&self, text: &str) -> Result<Task, StorageError> {
        Ok(self.with(|inner| {
            inner.next_id += 1;
            let task = Task::new(TaskId(inner.next_id), text);
            inner.tasks.push(task.clone());
            task
        }))
    }

    fn update_text(&self, id: TaskId, text: &str) -> Result<(), StorageError> {
        self.with(|inner| {
            if let Some(task) = inner.tasks.iter_mut().find(|t| t.id == id) {
                task.text = text.to_string();
            }
        });
        Ok(())
    }

    fn update_completed(&self, id: TaskId, completed: bool) -> Result<(), StorageError> {
        self.with(|inner| {
            if let Some(task) = inner.tasks.iter_mut().find(|t| t.id == id) {
                task.completed = completed;
            }
        });
        Ok(())
    }

    fn delete(&self, id: TaskId) -> Result<(), StorageError> {
        self.with(|inner| inner.tasks.retain(|t| t.id != id));
        Ok(())
    }

    fn list_all(&self) -> Result<Vec<Task>, StorageError> {
        Ok(self.with(|inner| inner.tasks.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_sqlite_contract() {
        let store = MemoryTaskStore::new();
        let a = store.create("a").unwrap();
        let b = store.create("b").unwrap();
        store.delete(b.id).unwrap();
        let c = store.create("c").unwrap();

        assert!(c.id > b.id);
        store.update_text(TaskId(42), "ghost").unwrap();

        let texts: Vec<_> = store.list_all().unwrap().into_iter().map(|t| t.text).collect();
        assert_eq!(texts, vec!["a", "c"]);
        assert_eq!(a.id, TaskId(1));
    }
}
