use super::entry::{EntryForm, EntryOutcome};
use super::types::{Freshness, RefreshPolicy, Task, TaskId};
use super::view::{Confirmation, Gesture, ListView};
use crate::shared::errors::TaskListError;
use crate::storage::TaskStore;

/// A delete swipe waiting for the user's answer.
///
/// Carries the task id so the confirmation acts on the same task even if
/// the rows moved in the meantime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingDelete {
    pub id: TaskId,
    pub index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// Deleted from the store; `position` is the row dropped from the
    /// snapshot, if it was still there.
    Removed { id: TaskId, position: Option<usize> },
    /// Nothing deleted; the swiped row was redrawn.
    Restored { id: TaskId },
}

/// What the list has to do next after a gesture.
#[derive(Debug, Clone)]
pub enum GestureEffect {
    Toggled(TaskId),
    ConfirmDelete(PendingDelete),
    OpenEntry(EntryForm),
}

/// Keeps the newest-first snapshot in step with the store and turns list
/// gestures into store calls.
pub struct TaskListController<S, V> {
    store: S,
    view: V,
    snapshot: Vec<Task>,
    freshness: Freshness,
    policy: RefreshPolicy,
}

impl<S: TaskStore, V: ListView> TaskListController<S, V> {
    /// Build a controller with an empty, stale snapshot.
    pub fn new(store: S, view: V, policy: RefreshPolicy) -> Self {
        Self {
            store,
            view,
            snapshot: Vec::new(),
            freshness: Freshness::Stale,
            policy,
        }
    }

    /// Build a controller and load the list once.
    pub fn start(store: S, view: V, policy: RefreshPolicy) -> Result<Self, TaskListError> {
        let mut controller = Self::new(store, view, policy);
        controller.refresh()?;
        Ok(controller)
    }

    pub fn snapshot(&self) -> &[Task] {
        &self.snapshot
    }

    pub fn freshness(&self) -> Freshness {
        self.freshness
    }

    pub fn policy(&self) -> RefreshPolicy {
        self.policy
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn len(&self) -> usize {
        self.snapshot.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot.is_empty()
    }

    /// Re-read every task from the store, newest first, and redraw.
    pub fn refresh(&mut self) -> Result<&[Task], TaskListError> {
        let mut tasks = match self.store.list_all() {
            Ok(tasks) => tasks,
            Err(e) => {
                self.freshness = Freshness::Stale;
                tracing::error!(target: "tasks", error = %e, "Failed to load tasks");
                return Err(e.into());
            }
        };
        tasks.reverse();

        self.snapshot = tasks;
        self.freshness = Freshness::Fresh;
        self.view.render(&self.snapshot);
        tracing::debug!(target: "tasks", count = self.snapshot.len(), "Task list refreshed");

        Ok(&self.snapshot)
    }

    fn task_at(&self, index: usize) -> Result<&Task, TaskListError> {
        self.snapshot
            .get(index)
            .ok_or_else(|| TaskListError::out_of_range(index, self.snapshot.len()))
    }

    fn position_of(&self, id: TaskId) -> Option<usize> {
        self.snapshot.iter().position(|t| t.id == id)
    }

    /// Persist a checkbox change. The row already shows the new state, so
    /// the list is not re-read.
    pub fn toggle_completed(&mut self, index: usize, checked: bool) -> Result<TaskId, TaskListError> {
        let id = self.task_at(index)?.id;
        self.store.update_completed(id, checked)?;

        self.snapshot[index].completed = checked;
        self.freshness = Freshness::Approximate;
        tracing::info!(target: "tasks", id = %id, completed = checked, "Task completion toggled");

        Ok(id)
    }

    /// Start a delete for the row at `index`. Nothing changes until
    /// [`resolve_delete`](Self::resolve_delete) is called with the answer.
    pub fn request_delete(&self, index: usize) -> Result<PendingDelete, TaskListError> {
        let id = self.task_at(index)?.id;
        Ok(PendingDelete { id, index })
    }

    pub fn resolve_delete(
        &mut self,
        pending: PendingDelete,
        confirmation: Confirmation,
    ) -> Result<DeleteOutcome, TaskListError> {
        match confirmation {
            Confirmation::Yes => {
                self.store.delete(pending.id)?;

                let position = self.position_of(pending.id);
                match position {
                    Some(position) => {
                        self.snapshot.remove(position);
                        self.view.item_removed(position);
                    }
                    None => tracing::debug!(
                        target: "tasks",
                        id = %pending.id,
                        "Deleted task was no longer in the list"
                    ),
                }
                self.freshness = Freshness::Approximate;
                tracing::info!(target: "tasks", id = %pending.id, "Task deleted");

                Ok(DeleteOutcome::Removed {
                    id: pending.id,
                    position,
                })
            }
            Confirmation::Cancel => {
                let position = self.position_of(pending.id).unwrap_or(pending.index);
                if let Some(task) = self.snapshot.get(position) {
                    self.view.item_changed(position, task);
                }
                Ok(DeleteOutcome::Restored { id: pending.id })
            }
        }
    }

    /// Form for a new task.
    pub fn open_create(&self) -> EntryForm {
        EntryForm::create()
    }

    /// Form pre-filled with the row's id and text.
    pub fn request_edit(&self, index: usize) -> Result<EntryForm, TaskListError> {
        Ok(EntryForm::edit(self.task_at(index)?))
    }

    /// Called when the entry form closes, whatever happened inside it.
    pub fn entry_closed(&mut self, outcome: EntryOutcome) -> Result<(), TaskListError> {
        if self.policy == RefreshPolicy::Always {
            self.refresh()?;
            return Ok(());
        }

        match outcome {
            EntryOutcome::Created(task) => {
                self.snapshot.insert(0, task);
            }
            EntryOutcome::Updated { id, text } => match self.position_of(id) {
                Some(position) => self.snapshot[position].text = text,
                None => {
                    // Not in the snapshot, so the store matched nothing either.
                    tracing::debug!(target: "tasks", id = %id, "Edited task is not listed");
                    return Ok(());
                }
            },
            EntryOutcome::Cancelled => return Ok(()),
        }

        self.freshness = Freshness::Approximate;
        self.view.render(&self.snapshot);
        Ok(())
    }

    /// Route a list gesture to the matching operation.
    pub fn handle(&mut self, gesture: Gesture) -> Result<GestureEffect, TaskListError> {
        match gesture {
            Gesture::Toggle { index, checked } => {
                self.toggle_completed(index, checked).map(GestureEffect::Toggled)
            }
            Gesture::SwipeRight(index) => self.request_delete(index).map(GestureEffect::ConfirmDelete),
            Gesture::SwipeLeft(index) => self.request_edit(index).map(GestureEffect::OpenEntry),
        }
    }
}
