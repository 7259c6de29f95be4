use super::types::{Task, TaskId};
use crate::shared::errors::{EntryError, TaskListError};
use crate::storage::TaskStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryMode {
    Create,
    Update { id: TaskId },
}

/// What happened while the entry form was open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryOutcome {
    Created(Task),
    Updated { id: TaskId, text: String },
    Cancelled,
}

/// Single-line text entry used for both new tasks and edits.
///
/// Save is enabled only while the text is non-empty. An edit form opened
/// with existing text starts with save disabled until the text changes.
#[derive(Debug, Clone)]
pub struct EntryForm {
    mode: EntryMode,
    text: String,
    save_enabled: bool,
}

impl EntryForm {
    pub fn create() -> Self {
        Self {
            mode: EntryMode::Create,
            text: String::new(),
            save_enabled: false,
        }
    }

    pub fn edit(task: &Task) -> Self {
        Self {
            mode: EntryMode::Update { id: task.id },
            text: task.text.clone(),
            save_enabled: false,
        }
    }

    pub fn mode(&self) -> EntryMode {
        self.mode
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_save_enabled(&self) -> bool {
        self.save_enabled
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.save_enabled = !self.text.is_empty();
    }

    /// Write the form's text to the store.
    pub fn submit<S: TaskStore + ?Sized>(&self, store: &S) -> Result<EntryOutcome, TaskListError> {
        if self.text.is_empty() {
            return Err(EntryError::EmptyText.into());
        }
        if !self.save_enabled {
            return Err(EntryError::SaveDisabled.into());
        }

        match self.mode {
            EntryMode::Create => {
                let task = store.create(&self.text)?;
                tracing::info!(target: "tasks", id = %task.id, "Task created");
                Ok(EntryOutcome::Created(task))
            }
            EntryMode::Update { id } => {
                store.update_text(id, &self.text)?;
                tracing::info!(target: "tasks", id = %id, "Task text updated");
                Ok(EntryOutcome::Updated {
                    id,
                    text: self.text.clone(),
                })
            }
        }
    }

    /// Close the form without saving.
    pub fn dismiss(self) -> EntryOutcome {
        tracing::debug!(target: "tasks", mode = ?self.mode, "Entry dismissed");
        EntryOutcome::Cancelled
    }
}
