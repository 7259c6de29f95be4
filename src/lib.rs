pub mod logging;
pub mod settings;
pub mod shared;
pub mod storage;
pub mod tasks;

use logging::{LoggingError, LoggingGuards};
use settings::AppSettings;
use shared::errors::TaskListError;
use storage::SqliteTaskStore;
use tasks::controller::TaskListController;
use tasks::view::ListView;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StartError {
    #[error(transparent)]
    Logging(#[from] LoggingError),
    #[error("Failed to initialize task list: {0}")]
    Tasks(#[from] TaskListError),
}

/// A running task list: the controller plus the logging guards that keep
/// file output flushing.
pub struct App<V> {
    pub controller: TaskListController<SqliteTaskStore, V>,
    _logging: Option<LoggingGuards>,
}

/// Initialize logging, open the database and load the list.
///
/// When a global subscriber is already installed (embedding hosts, tests)
/// the existing one is kept.
pub fn start<V: ListView>(settings: &AppSettings, view: V) -> Result<App<V>, StartError> {
    let guards = match logging::init_logging(&settings.log_dir(), &settings.log_filter) {
        Ok(g) => Some(g),
        Err(LoggingError::Subscriber(e)) => {
            tracing::warn!(target: "system", "Keeping existing subscriber: {}", e);
            None
        }
        Err(e) => return Err(e.into()),
    };

    let storage_dir = settings.storage_dir();
    let controller = tasks::init_task_list(&storage_dir, view, settings.refresh_policy)?;
    tracing::info!(target: "system", "Task list ready at {:?}", storage_dir);

    Ok(App {
        controller,
        _logging: guards,
    })
}
