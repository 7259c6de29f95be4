use std::path::PathBuf;
use thiserror::Error;

/// Failures of the local task database.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to prepare storage directory: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to open database at {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Database query failed: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("Database schema version {found} is newer than supported version {supported}")]
    UnsupportedVersion { found: i64, supported: i64 },
}

/// Rejections raised by the entry form before anything reaches the store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EntryError {
    #[error("Task text cannot be empty")]
    EmptyText,

    #[error("Save is disabled until the text is edited")]
    SaveDisabled,
}

/// Top-level error for task list operations.
#[derive(Error, Debug)]
pub enum TaskListError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Entry(#[from] EntryError),

    #[error("Row {index} is out of range for a list of {len} tasks")]
    IndexOutOfRange { index: usize, len: usize },
}

impl TaskListError {
    pub fn out_of_range(index: usize, len: usize) -> Self {
        TaskListError::IndexOutOfRange { index, len }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_wraps_into_task_list_error() {
        let err: TaskListError = StorageError::UnsupportedVersion {
            found: 3,
            supported: 1,
        }
        .into();

        assert!(matches!(
            err,
            TaskListError::Storage(StorageError::UnsupportedVersion { found: 3, .. })
        ));
        assert_eq!(
            err.to_string(),
            "Database schema version 3 is newer than supported version 1"
        );
    }

    #[test]
    fn test_out_of_range_message() {
        let err = TaskListError::out_of_range(4, 2);
        assert_eq!(err.to_string(), "Row 4 is out of range for a list of 2 tasks");
    }
}
