use serde::{Deserialize, Serialize};
use std::fmt;

/// Row identifier assigned by the store; never reused after deletion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub i64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    pub fn new(id: TaskId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            completed: false,
        }
    }
}

/// How far the controller's snapshot can be trusted against the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Freshness {
    /// Rebuilt by the last `refresh()`.
    Fresh,
    /// Patched locally after a toggle or delete; the next refresh reconciles it.
    Approximate,
    /// The store changed and the snapshot has not caught up.
    Stale,
}

/// What the controller does when the entry form closes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RefreshPolicy {
    /// Re-read the whole list on every dismissal, whatever the outcome.
    #[default]
    Always,
    /// Apply the entry outcome to the snapshot without a round trip.
    Targeted,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_serializes_camel_case() {
        let task = Task {
            id: TaskId(7),
            text: "Buy milk".to_string(),
            completed: true,
        };

        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["text"], "Buy milk");
        assert_eq!(json["completed"], true);
    }

    #[test]
    fn test_new_task_is_incomplete() {
        let task = Task::new(TaskId(1), "Call mom");
        assert!(!task.completed);
    }

    #[test]
    fn test_refresh_policy_defaults_to_always() {
        assert_eq!(RefreshPolicy::default(), RefreshPolicy::Always);
        let parsed: RefreshPolicy = serde_json::from_str("\"targeted\"").unwrap();
        assert_eq!(parsed, RefreshPolicy::Targeted);
    }
}
