pub mod controller;
pub mod entry;
pub mod types;
pub mod view;

use crate::shared::errors::TaskListError;
use crate::storage::SqliteTaskStore;
use controller::TaskListController;
use std::path::Path;
use types::RefreshPolicy;
use view::ListView;

/// Open the task database in `storage_dir` and load the list once.
pub fn init_task_list<V: ListView>(
    storage_dir: &Path,
    view: V,
    policy: RefreshPolicy,
) -> Result<TaskListController<SqliteTaskStore, V>, TaskListError> {
    let store = SqliteTaskStore::in_dir(storage_dir);
    let controller = TaskListController::start(store, view, policy)?;
    tracing::info!(
        target: "tasks",
        "Task list initialized: {} tasks, policy {:?}",
        controller.len(),
        controller.policy()
    );
    Ok(controller)
}
