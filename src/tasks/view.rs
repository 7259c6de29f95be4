use super::types::Task;

/// The list widget the controller drives.
pub trait ListView {
    /// Replace every row with `tasks`, in order.
    fn render(&mut self, tasks: &[Task]);

    /// Drop the row at `position` without touching the others.
    fn item_removed(&mut self, position: usize);

    /// Redraw a single row, e.g. after a swipe was cancelled.
    fn item_changed(&mut self, position: usize, task: &Task);
}

/// User input reported by the list, addressed by row index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    /// The row's checkbox now shows `checked`.
    Toggle { index: usize, checked: bool },
    /// Delete swipe; needs confirmation before anything is removed.
    SwipeRight(usize),
    /// Edit swipe; opens the entry form for the row.
    SwipeLeft(usize),
}

/// Answer to the "Delete Task / Are you sure?" prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Yes,
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    Rendered(Vec<Task>),
    Removed(usize),
    Changed(usize, Task),
}

/// View that keeps the rows it was given and a log of every call.
#[derive(Debug, Default)]
pub struct RecordingView {
    pub rows: Vec<Task>,
    pub events: Vec<ViewEvent>,
}

impl RecordingView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.rows.iter().map(|t| t.text.as_str()).collect()
    }
}

impl ListView for RecordingView {
    fn render(&mut self, tasks: &[Task]) {
        self.rows = tasks.to_vec();
        self.events.push(ViewEvent::Rendered(tasks.to_vec()));
    }

    fn item_removed(&mut self, position: usize) {
        if position < self.rows.len() {
            self.rows.remove(position);
        }
        self.events.push(ViewEvent::Removed(position));
    }

    fn item_changed(&mut self, position: usize, task: &Task) {
        if let Some(row) = self.rows.get_mut(position) {
            *row = task.clone();
        }
        self.events.push(ViewEvent::Changed(position, task.clone()));
    }
}
